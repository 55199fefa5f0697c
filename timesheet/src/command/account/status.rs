use crate::app::App;
use crate::view;
use eyre::Result;
use timesheet_client::actions;
use timesheet_client::settings::Settings;

pub async fn run(settings: Settings) -> Result<()> {
    let mut app = App::new(settings)?;
    let had_session = app.session.is_some();

    actions::ping(&mut app.store, &app.client).await;

    let user = &app.store.state().user;
    if had_session && !user.is_logged_in() {
        app.settings.clear_session()?;
        println!("Session expired. Log in again.");
        return Ok(());
    }

    println!("{}", view::user_line(user));
    Ok(())
}
