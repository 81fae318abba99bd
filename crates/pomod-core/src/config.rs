use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Whether the surface honours background theme requests.
    #[serde(default = "DisplayConfig::default_color")]
    pub color: bool,
    #[serde(default = "DisplayConfig::default_font_size")]
    pub font_size: u32,
}

impl DisplayConfig {
    fn default_color() -> bool { true }
    fn default_font_size() -> u32 { 28 }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            font_size: 28,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "ClockConfig::default_format_24h")]
    pub format_24h: bool,
}

impl ClockConfig {
    fn default_format_24h() -> bool { true }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { format_24h: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputConfig {
    /// evdev key code acting as the primary button. None disables the watcher.
    #[serde(default)]
    pub button_key: Option<u16>,
}

impl Config {
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("pomod")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "parsing config TOML")
    }
}

pub fn socket_path() -> PathBuf {
    // POMOD_SOCK env var overrides for testing.
    if let Ok(path) = std::env::var("POMOD_SOCK") {
        return PathBuf::from(path);
    }
    dirs::runtime_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pomod.sock")
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- defaults ---

    #[test]
    fn default_color_is_enabled() {
        let config = Config::default();
        assert!(config.display.color);
    }

    #[test]
    fn default_font_size_is_28() {
        let config = Config::default();
        assert_eq!(config.display.font_size, 28);
    }

    #[test]
    fn default_clock_is_24h() {
        let config = Config::default();
        assert!(config.clock.format_24h);
    }

    #[test]
    fn default_has_no_hardware_button() {
        let config = Config::default();
        assert!(config.input.button_key.is_none());
    }

    // --- TOML parsing ---

    #[test]
    fn parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.display.color);
        assert_eq!(config.display.font_size, 28);
        assert!(config.clock.format_24h);
    }

    #[test]
    fn parse_monochrome_display() {
        let toml = r#"
[display]
color = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.display.color);
        // Other fields should still be defaults
        assert_eq!(config.display.font_size, 28);
    }

    #[test]
    fn parse_12h_clock() {
        let toml = r#"
[clock]
format_24h = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.clock.format_24h);
    }

    #[test]
    fn parse_button_key() {
        let toml = r#"
[input]
button_key = 119
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.button_key, Some(119));
    }

    #[test]
    fn load_from_missing_file_fails_with_path() {
        let err = Config::load_from(Path::new("/nonexistent/pomod/config.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/pomod/config.toml"));
    }

    #[test]
    fn load_from_reads_file() {
        let path = std::env::temp_dir().join(format!("pomod-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[display]\nfont_size = 40\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.display.font_size, 40);
    }

    // --- socket path ---

    #[test]
    fn socket_path_ends_with_pomod_sock() {
        if std::env::var("POMOD_SOCK").is_ok() {
            return;
        }
        let path = socket_path();
        assert_eq!(path.file_name().unwrap(), "pomod.sock");
    }
}
