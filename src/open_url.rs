use anyhow::{Context, Result};
use std::process::Command;

/// Opens a story link with the configured command, or the system default.
pub fn open_url(url: &str, open_command: Option<&str>) -> Result<()> {
    if let Some(cmd) = open_command.filter(|c| !c.trim().is_empty()) {
        Command::new(cmd)
            .arg(url)
            .spawn()
            .with_context(|| format!("failed to run {cmd}"))?;
        return Ok(());
    }
    open::that(url).with_context(|| format!("failed to open {url}"))
}
