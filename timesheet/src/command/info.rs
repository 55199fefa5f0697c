use eyre::Result;
use timesheet_client::settings::Settings;

use crate::VERSION;

pub fn run(settings: &Settings) -> Result<()> {
    let env_config_dir = std::env::var("TIMESHEET_CONFIG_DIR");

    let vars = format!(
        "VARS:\nTIMESHEET_CONFIG_DIR = {:?}",
        env_config_dir.unwrap_or("None".into())
    );
    println!("{vars}\n");

    let mut paths = String::from("PATHS:\n");
    paths.push_str(&format!("config_path: {:?}\n", Settings::config_file()));
    paths.push_str(&format!("session_path: {:?}", settings.session_path));
    println!("{paths}\n");

    println!("SERVER:");
    println!("address: {}", settings.server_address);
    println!("api_root: {}", settings.api_root);
    println!("resume_path: {}\n", settings.resume_path);

    let auth = match settings.session()? {
        Some(session) => format!("Logged in as {}", session.username),
        None => "Unauthenticated".to_string(),
    };
    println!("ACCOUNT:");
    println!("Auth: {auth}\n");

    println!("Version: {VERSION}");
    Ok(())
}
