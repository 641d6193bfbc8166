//! Configuration management

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "bot-studio";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// How many runtime submissions the store keeps in memory
    #[serde(default = "default_submission_history")]
    pub submission_history: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            submission_history: default_submission_history(),
        }
    }
}

fn default_submission_history() -> usize {
    64
}

/// Get config directory (XDG_CONFIG_HOME or platform default)
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BOT_STUDIO_CONFIG_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/bot-studio");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".config").join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join(APP_DIR_NAME);
        }
    }

    PathBuf::from(".")
}

/// Get data directory (XDG_DATA_HOME or platform default)
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BOT_STUDIO_DATA_DIR") {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join("Library/Application Support/bot-studio");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join(APP_DIR_NAME);
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(".local/share").join(APP_DIR_NAME);
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(appdata) = std::env::var("LOCALAPPDATA") {
            return PathBuf::from(appdata).join(APP_DIR_NAME);
        }
    }

    PathBuf::from("./data")
}

pub fn load_config() -> Result<Config> {
    let config_dir = get_config_dir();

    let mut builder = ::config::Config::builder()
        .set_default("port", default_port() as i64)?
        .add_source(
            ::config::File::with_name(&config_dir.join("config").to_string_lossy()).required(false),
        )
        // BOT_STUDIO_PORT, BOT_STUDIO_CATALOG__SUBMISSION_HISTORY, ...
        .add_source(
            ::config::Environment::with_prefix("BOT_STUDIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

    // Explicit precedence: BOT_STUDIO_PORT > PORT > config file > default
    if let Ok(port) = std::env::var("BOT_STUDIO_PORT") {
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    } else if let Ok(port) = std::env::var("PORT") {
        // Container platforms commonly inject PORT
        if let Ok(port_num) = port.parse::<u16>() {
            builder = builder.set_override("port", port_num as i64)?;
        }
    }

    let config = builder.build()?;

    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_port_env() {
        env::remove_var("BOT_STUDIO_PORT");
        env::remove_var("PORT");
    }

    #[test]
    #[serial]
    fn test_defaults_without_config_file() {
        clear_port_env();
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        env::set_var("BOT_STUDIO_CONFIG_DIR", temp_dir.path());

        let config = load_config().expect("config should load");

        env::remove_var("BOT_STUDIO_CONFIG_DIR");

        assert_eq!(config.port, 8080);
        assert_eq!(config.catalog.submission_history, 64);
    }

    #[test]
    #[serial]
    fn test_port_env_fallback() {
        clear_port_env();
        env::set_var("BOT_STUDIO_CONFIG_DIR", "/tmp/bot-studio-test-nonexistent");
        env::set_var("PORT", "3000");

        let config = load_config().expect("config should load");

        clear_port_env();
        env::remove_var("BOT_STUDIO_CONFIG_DIR");

        assert_eq!(config.port, 3000, "PORT env var should set config.port");
    }

    #[test]
    #[serial]
    fn test_prefixed_port_takes_precedence_over_port() {
        clear_port_env();
        env::set_var("BOT_STUDIO_CONFIG_DIR", "/tmp/bot-studio-test-nonexistent");
        env::set_var("BOT_STUDIO_PORT", "5000");
        env::set_var("PORT", "3000");

        let config = load_config().expect("config should load");

        clear_port_env();
        env::remove_var("BOT_STUDIO_CONFIG_DIR");

        assert_eq!(config.port, 5000, "BOT_STUDIO_PORT should win over PORT");
    }

    #[test]
    #[serial]
    fn test_invalid_port_uses_default() {
        clear_port_env();
        env::set_var("BOT_STUDIO_CONFIG_DIR", "/tmp/bot-studio-test-nonexistent");
        env::set_var("PORT", "not-a-number");

        let config = load_config().expect("config should load");

        clear_port_env();
        env::remove_var("BOT_STUDIO_CONFIG_DIR");

        assert_eq!(config.port, 8080, "Invalid PORT should fall back to default");
    }

    #[test]
    #[serial]
    fn test_config_file_sets_submission_history() {
        clear_port_env();
        let temp_dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "port = 9100\n[catalog]\nsubmission_history = 8\n",
        )
        .expect("write config");
        env::set_var("BOT_STUDIO_CONFIG_DIR", temp_dir.path());

        let config = load_config().expect("config should load");

        env::remove_var("BOT_STUDIO_CONFIG_DIR");

        assert_eq!(config.port, 9100);
        assert_eq!(config.catalog.submission_history, 8);
    }

    #[test]
    #[serial]
    fn test_data_dir_override() {
        env::set_var("BOT_STUDIO_DATA_DIR", "/srv/bot-studio");
        let dir = get_data_dir();
        env::remove_var("BOT_STUDIO_DATA_DIR");

        assert_eq!(dir, PathBuf::from("/srv/bot-studio"));
    }
}
