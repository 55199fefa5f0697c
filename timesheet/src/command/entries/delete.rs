use crate::app::App;
use crate::view;
use clap::Parser;
use eyre::Result;
use timesheet_client::actions;
use timesheet_client::settings::Settings;
use timesheet_client::utils::read_input;

#[derive(Parser, Debug)]
pub struct Cmd {
    id: String,
    /// Skip the confirmation
    #[arg(short, long)]
    yes: bool,
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let mut app = App::new(settings)?;
        app.require_login()?;

        let entry = app.find_entry(&self.id).await?;

        if !self.yes {
            print!("{}", view::entry_detail(&entry, view::local_offset()));
            let answer = read_input("Delete this entry? (y/n)");
            if !answer.trim().eq_ignore_ascii_case("y") {
                println!("Nothing deleted");
                return Ok(());
            }
        }

        actions::delete_entry(&mut app.store, &app.client, &entry.id).await?;
        println!("Deleted entry {}", entry.id);
        Ok(())
    }
}
