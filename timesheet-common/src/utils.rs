use std::path::PathBuf;

const APP_NAME: &str = "timesheet";

#[cfg(not(target_os = "windows"))]
const HOME_VAR: &str = "HOME";
#[cfg(target_os = "windows")]
const HOME_VAR: &str = "USERPROFILE";

/// An absolute path from the environment. Empty and relative values are
/// ignored, as XDG asks.
fn absolute_var(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .map(PathBuf::from)
        .filter(|x| x.is_absolute())
}

/// The user's home, or the working directory when none is set.
pub fn home_dir() -> PathBuf {
    absolute_var(HOME_VAR).unwrap_or_else(|| PathBuf::from("."))
}

fn app_dir(base: Option<PathBuf>, fallback: &[&str]) -> PathBuf {
    let base = base.unwrap_or_else(|| fallback.iter().fold(home_dir(), |dir, x| dir.join(x)));
    base.join(APP_NAME)
}

/// `config.toml` lives here.
pub fn config_dir() -> PathBuf {
    app_dir(absolute_var("XDG_CONFIG_HOME"), &[".config"])
}

/// The session file lives here.
pub fn data_dir() -> PathBuf {
    app_dir(absolute_var("XDG_DATA_HOME"), &[".local", "share"])
}
