use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use snooze::ApiConfig;
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

const APP_DIR: &str = "snooze";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub header: Option<String>,
    pub open_command: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub api: ApiConfig,
    pub header: Option<String>,
    pub open_command: Option<String>,
    /// Where per-user state (stored credentials) lives.
    pub state_dir: Option<PathBuf>,
}

pub fn load(
    config_override: Option<String>,
    base_url_override: Option<String>,
) -> Result<RuntimeConfig> {
    let parsed = match config_override {
        Some(path_str) => read_config(&PathBuf::from(&path_str))?,
        None => match default_config_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.is_file() => read_config(&path)?,
            // Built-in defaults
            _ => AppConfig::default(),
        },
    };
    resolve(parsed, base_url_override, default_config_dir())
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&txt).with_context(|| format!("failed to parse toml: {}", path.display()))
}

fn resolve(
    parsed: AppConfig,
    base_url_override: Option<String>,
    state_dir: Option<PathBuf>,
) -> Result<RuntimeConfig> {
    let mut api = ApiConfig::default();
    if let Some(raw) = base_url_override.or(parsed.base_url) {
        api.base_url = Url::parse(&raw).with_context(|| format!("invalid base url: {raw}"))?;
        anyhow::ensure!(
            !api.base_url.cannot_be_a_base(),
            "invalid base url: {raw} cannot carry a path"
        );
    }
    if let Some(secs) = parsed.timeout_secs {
        anyhow::ensure!(secs > 0, "timeout_secs must be at least 1");
        api.timeout = Duration::from_secs(secs);
    }
    Ok(RuntimeConfig {
        api,
        header: parsed.header,
        open_command: parsed.open_command,
        state_dir,
    })
}

pub fn default_config_dir() -> Option<PathBuf> {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        let mut p = PathBuf::from(xdg);
        p.push(APP_DIR);
        return Some(p);
    }
    if let Ok(home) = env::var("HOME") {
        let mut p = PathBuf::from(home);
        p.push(".config");
        p.push(APP_DIR);
        return Some(p);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use snooze::api::DEFAULT_BASE_URL;
    use std::io::Write;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg = resolve(AppConfig::default(), None, None).expect("defaults resolve");
        assert_eq!(cfg.api.base_url.as_str(), format!("{DEFAULT_BASE_URL}/"));
        assert_eq!(cfg.api.timeout, Duration::from_secs(10));
        assert!(cfg.header.is_none());
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "base_url = \"http://localhost:5000\"\ntimeout_secs = 3\nheader = \"Hack or Snooze\""
        )
        .expect("write config");

        let parsed = read_config(file.path()).expect("config parses");
        let cfg = resolve(parsed, None, None).expect("config resolves");

        assert_eq!(cfg.api.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(cfg.api.timeout, Duration::from_secs(3));
        assert_eq!(cfg.header.as_deref(), Some("Hack or Snooze"));
    }

    #[test]
    fn command_line_base_url_wins() {
        let parsed = AppConfig {
            base_url: Some("http://from-file.test".into()),
            ..AppConfig::default()
        };
        let cfg = resolve(parsed, Some("http://from-flag.test".into()), None).expect("resolves");
        assert_eq!(cfg.api.base_url.host_str(), Some("from-flag.test"));
    }

    #[test]
    fn rejects_bad_values() {
        let bad_url = AppConfig {
            base_url: Some("not a url".into()),
            ..AppConfig::default()
        };
        assert!(resolve(bad_url, None, None).is_err());

        let zero_timeout = AppConfig {
            timeout_secs: Some(0),
            ..AppConfig::default()
        };
        assert!(resolve(zero_timeout, None, None).is_err());
    }

    #[test]
    fn rejects_base_url_without_a_path() {
        let err = resolve(AppConfig::default(), Some("mailto:ops@example.com".into()), None)
            .expect_err("opaque urls cannot host the API");
        assert!(err.to_string().contains("cannot carry a path"), "{err}");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_config(&dir.path().join("absent.toml")).expect_err("must fail");
        assert!(err.to_string().contains("failed to read config"));
    }
}
