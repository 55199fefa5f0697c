use crate::session::Session;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File as ConfigFile, FileFormat};
use eyre::{eyre, Context, Result};
use fs_err::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;

const EXAMPLE_CONFIG: &str = include_str!("../config.toml");

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct Settings {
    pub server_address: String,
    pub api_root: String,
    pub session_path: String,
    pub resume_path: String,
}

impl Settings {
    pub fn config_dir() -> PathBuf {
        std::env::var("TIMESHEET_CONFIG_DIR")
            .map_or_else(|_| timesheet_common::utils::config_dir(), PathBuf::from)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn session(&self) -> Result<Option<Session>> {
        Session::load(&PathBuf::from(&self.session_path))
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        session.save(&PathBuf::from(&self.session_path))
    }

    pub fn clear_session(&self) -> Result<()> {
        Session::clear(&PathBuf::from(&self.session_path))
    }

    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let data_dir = timesheet_common::utils::data_dir();
        let session_path = data_dir.join("session");

        Ok(Config::builder()
            .set_default("server_address", "http://127.0.0.1:8000")?
            .set_default("api_root", "/api")?
            .set_default("session_path", session_path.to_str())?
            .set_default("resume_path", "/static/resume.pdf")?)
    }

    fn environment() -> Environment {
        Environment::with_prefix("timesheet")
            .prefix_separator("_")
            .separator("__")
    }

    pub fn new() -> Result<Self> {
        let config_dir = Self::config_dir();
        let data_dir = timesheet_common::utils::data_dir();

        create_dir_all(&config_dir)
            .wrap_err_with(|| format!("Failed to create dir {config_dir:?}"))?;
        create_dir_all(&data_dir).wrap_err_with(|| format!("Failed to create dir {data_dir:?}"))?;

        let config_file = Self::config_file();
        let mut config_builder = Self::builder()?;
        config_builder = if config_file.exists() {
            config_builder.add_source(ConfigFile::from(config_file).format(FileFormat::Toml))
        } else {
            let mut file = File::create(&config_file).wrap_err("Failed to create config file")?;
            file.write_all(EXAMPLE_CONFIG.as_bytes())
                .wrap_err("Failed to write default config file")?;
            config_builder
        };

        Self::finish(config_builder.add_source(Self::environment()))
    }

    /// Deserialize a prepared builder and expand `~` and `$VARS` in paths.
    pub fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let mut settings: Settings = builder
            .build()?
            .try_deserialize()
            .map_err(|e| eyre!("Failed to deserialize {}", e))?;

        settings.session_path = expand_shell(&settings.session_path)?;

        Ok(settings)
    }
}

fn expand_shell(value: &str) -> Result<String> {
    Ok(shellexpand::full(value)?.to_string())
}
