use crate::app::App;
use crate::view;
use clap::Parser;
use eyre::Result;
use timesheet_client::settings::Settings;

#[derive(Parser, Debug)]
pub struct Cmd {
    id: String,
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let mut app = App::new(settings)?;
        app.require_login()?;

        let entry = app.find_entry(&self.id).await?;
        print!("{}", view::entry_detail(&entry, view::local_offset()));

        Ok(())
    }
}
