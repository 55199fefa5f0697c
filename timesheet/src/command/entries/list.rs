use crate::app::App;
use crate::view;
use clap::Parser;
use eyre::Result;
use time::OffsetDateTime;
use timesheet_client::domain::{Period, Summary};
use timesheet_client::settings::Settings;

#[derive(Parser, Debug)]
pub struct Cmd {
    /// all, week, month, quarter or year
    #[arg(short, long, default_value = "all")]
    period: Period,
}

impl Cmd {
    pub async fn run(self, settings: Settings) -> Result<()> {
        let mut app = App::new(settings)?;
        app.require_login()?;
        app.load_entries(self.period).await?;

        let offset = view::local_offset();
        let entries = self
            .period
            .filter(&app.store.state().entries, OffsetDateTime::now_utc());

        println!("{}\n", self.period.label());
        print!("{}", view::entry_table(&entries, offset));
        println!();
        print!("{}", view::summary_card(&Summary::from_entries(entries)));

        Ok(())
    }
}
