use crate::args::TimeZoneSetting;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (`--config`)
/// 2. APPREPORT_CONFIG environment variable
/// 3. `<config dir>/appreport/config.toml`
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("APPREPORT_CONFIG") {
        return Some(expand_tilde(Path::new(&env_path)));
    }

    dirs::config_dir().map(|dir| dir.join("appreport").join("config.toml"))
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    path.to_path_buf()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplianceConfig {
    /// Capture file answered by the offline appliance
    #[serde(default)]
    pub replay: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub granularity: Option<u64>,
    #[serde(default)]
    pub resolution: Option<u64>,
    #[serde(default)]
    pub timezone: Option<TimeZoneSetting>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub appliance: ApplianceConfig,
    #[serde(default)]
    pub defaults: Defaults,
}

impl Config {
    /// Load the config at the resolved path; a missing file yields defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match resolve_config_path(explicit_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        // Relative replay paths are taken relative to the config file
        if let Some(replay) = config.appliance.replay.as_mut()
            && replay.is_relative()
            && let Some(parent) = path.parent()
        {
            let joined = parent.join(&*replay);
            *replay = joined;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.appliance.replay, None);
        assert_eq!(config.defaults.granularity, None);
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_load_full_config() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
[appliance]
replay = "/var/lib/appreport/capture.json"

[defaults]
granularity = 60
resolution = 300
timezone = "local"
"#,
        )?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(
            config.appliance.replay,
            Some(PathBuf::from("/var/lib/appreport/capture.json"))
        );
        assert_eq!(config.defaults.granularity, Some(60));
        assert_eq!(config.defaults.resolution, Some(300));
        assert_eq!(config.defaults.timezone, Some(TimeZoneSetting::Local));

        Ok(())
    }

    #[test]
    fn test_relative_replay_path_follows_config_dir() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[appliance]\nreplay = \"capture.json\"\n")?;

        let config = Config::load_from(&config_path)?;
        assert_eq!(
            config.appliance.replay,
            Some(temp_dir.path().join("capture.json"))
        );

        Ok(())
    }

    #[test]
    fn test_invalid_config_is_an_error() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[defaults]\ngranularity = \"sixty\"\n")?;

        assert!(Config::load_from(&config_path).is_err());
        Ok(())
    }
}
