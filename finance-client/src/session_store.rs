use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

use crate::config::app_dir;

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn session_path() -> Result<PathBuf> {
    Ok(app_dir()?.join("session"))
}

pub fn load_session() -> Result<Option<String>> {
    load_session_from(&session_path()?)
}

fn load_session_from(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let session = std::fs::read_to_string(path).context("Failed to read session file")?;
    let session = session.trim().to_string();
    if session.is_empty() {
        return Ok(None);
    }
    Ok(Some(session))
}

pub fn save_session(session_id: &str) -> Result<()> {
    secure_write(&session_path()?, session_id)
}

pub fn clear_session() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_session_files_mean_logged_out() {
        let path = std::env::temp_dir().join(format!("finance-session-{}", uuid::Uuid::new_v4()));

        secure_write(&path, "  \n").unwrap();
        assert_eq!(load_session_from(&path).unwrap(), None);

        secure_write(&path, "abc123\n").unwrap();
        assert_eq!(load_session_from(&path).unwrap().as_deref(), Some("abc123"));

        std::fs::remove_file(path).unwrap();
    }
}
