use crate::app::App;
use crate::view;
use eyre::Result;
use timesheet_client::settings::Settings;

pub async fn run(settings: Settings) -> Result<()> {
    let app = App::new(settings)?;
    app.require_login()?;

    let summary = app.client.summary().await?;
    print!("{}", view::remote_summary(&summary));
    Ok(())
}
