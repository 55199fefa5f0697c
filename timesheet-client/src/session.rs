use eyre::{Context, Result};
use std::path::Path;
#[cfg(unix)]
use {fs_err::os::unix::fs::OpenOptionsExt, std::io::Write};

/// What a successful login leaves behind between runs.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub username: String,
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        fs_err::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        fs_err::write(path, content)?;
    }

    Ok(())
}

impl Session {
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs_err::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let session = serde_json::from_str(&raw).wrap_err("Failed to parse the session file")?;
        Ok(Some(session))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string(self)?;
        secure_write(path, &raw).wrap_err("Failed to write the session file")
    }

    pub fn clear(path: &Path) -> Result<()> {
        if path.exists() {
            fs_err::remove_file(path)?;
        }
        Ok(())
    }
}
