use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

const CREDENTIALS_FILE: &str = "credentials.json";

/// Token and username kept between runs so the session can be restored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredCredentials {
    pub username: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: Option<PathBuf>,
}

impl CredentialStore {
    pub fn in_dir(dir: Option<PathBuf>) -> Self {
        Self {
            path: dir.map(|d| d.join(CREDENTIALS_FILE)),
        }
    }

    /// Missing or unreadable files count as "no stored credentials".
    pub fn load(&self) -> Option<StoredCredentials> {
        let path = self.path.as_ref()?;
        let contents = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<StoredCredentials>(&contents) {
            Ok(creds) => Some(creds),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable credentials");
                None
            }
        }
    }

    pub fn save(&self, creds: &StoredCredentials) -> Result<()> {
        let Some(path) = &self.path else { return Ok(()) };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(creds)?;
        fs::write(path, json)?;
        restrict_permissions(path)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match &self.path {
            Some(path) if path.is_file() => Ok(fs::remove_file(path)?),
            _ => Ok(()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
