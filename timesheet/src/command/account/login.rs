use crate::app::App;
use clap::Parser;
use eyre::{Context, Result};
use timesheet_client::actions;
use timesheet_client::settings::Settings;
use timesheet_client::utils::{read_input, read_input_hidden};

#[derive(Parser, Debug)]
pub struct Cmd {
    #[arg(long, short)]
    pub username: Option<String>,
    #[arg(long, short)]
    pub password: Option<String>,
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let mut app = App::new(settings)?;

        if app.session.is_some() {
            println!("You are already logged in.");
            return Ok(());
        }

        let username = self.username.unwrap_or_else(|| read_input("username"));
        let password = self
            .password
            .unwrap_or_else(|| read_input_hidden("password"));

        let session =
            actions::start_login(&mut app.store, &mut app.client, &username, &password).await?;

        app.settings
            .save_session(&session)
            .wrap_err("Failed to create a session file")?;

        println!("Logged in as {}!", session.username);
        Ok(())
    }
}
