use clap::Subcommand;
use eyre::Result;
use timesheet_client::settings::Settings;

mod login;
mod logout;
mod status;

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Log in and keep the session for later commands
    Login(login::Cmd),
    /// Close the session on the server and forget it locally
    Logout,
    /// Check the stored session with the server
    Status,
}

impl Cmd {
    pub(crate) async fn run(self, settings: Settings) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.run(settings).await,
            Self::Logout => logout::run(settings).await,
            Self::Status => status::run(settings).await,
        }
    }
}
