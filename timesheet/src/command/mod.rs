use clap::Subcommand;
use eyre::Result;
use timesheet_client::settings::Settings;

mod account;
mod entries;
mod info;
mod resume;

#[derive(Subcommand, Debug)]
pub enum TimesheetCmd {
    #[command(flatten)]
    Account(account::Cmd),

    #[command(flatten)]
    Entries(entries::Cmd),

    /// Download the resume
    Resume(resume::Cmd),

    /// Show config paths and the session state
    Info,
}

impl TimesheetCmd {
    #[tokio::main]
    pub async fn run(self) -> Result<()> {
        let settings = Settings::new()?;
        tracing::trace!(command = ?self, "client command");

        match self {
            Self::Account(cmd) => cmd.run(settings).await,
            Self::Entries(cmd) => cmd.run(settings).await,
            Self::Resume(cmd) => cmd.run(settings).await,
            Self::Info => info::run(&settings),
        }
    }
}
