use crate::app::App;
use eyre::Result;
use timesheet_client::actions;
use timesheet_client::settings::Settings;

pub async fn run(settings: Settings) -> Result<()> {
    let mut app = App::new(settings)?;

    if app.session.is_none() {
        println!("You are not logged in.");
        return Ok(());
    }

    if !actions::start_logout(&mut app.store, &mut app.client).await {
        println!("Remote server did not log out the session");
    }

    app.settings.clear_session()?;

    println!("You are logged out!");
    Ok(())
}
