use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::controller::HoldSettings;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    midi: MidiConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Deserialize, Default)]
struct MidiConfig {
    client_name: Option<String>,
    virtual_port_name: Option<String>,
    channel: Option<u8>,
    note_on_velocity: Option<u8>,
    note_off_velocity: Option<u8>,
    panic_velocity: Option<u8>,
}

#[derive(Deserialize, Default)]
struct LoggingConfig {
    level: Option<String>,
}

pub struct Config {
    midi: MidiConfig,
    logging: LoggingConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::embedded(),
        }
    }

    /// Embedded defaults merged with the file at `path`. A missing, unreadable
    /// or malformed file leaves the defaults untouched.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::embedded();
        if !path.exists() {
            return config;
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => {
                    merge_midi(&mut config.midi, user.midi);
                    merge_logging(&mut config.logging, user.logging);
                }
                Err(e) => {
                    log::warn!(
                        target: "config",
                        "ignoring malformed config {}: {}",
                        path.display(),
                        e
                    )
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
            }
        }
        config
    }

    fn embedded() -> Self {
        let base: ConfigFile = match toml::from_str(DEFAULT_CONFIG) {
            Ok(base) => base,
            Err(e) => {
                log::error!(target: "config", "embedded config.toml is invalid: {}", e);
                ConfigFile::default()
            }
        };
        Config {
            midi: base.midi,
            logging: base.logging,
        }
    }

    pub fn client_name(&self) -> &str {
        self.midi.client_name.as_deref().unwrap_or("midihold")
    }

    pub fn virtual_port_name(&self) -> &str {
        self.midi.virtual_port_name.as_deref().unwrap_or("hold-out")
    }

    /// Channel and velocities for the controller. The configured channel is
    /// 1-based; out of range values are clamped.
    pub fn settings(&self) -> HoldSettings {
        let fallback = HoldSettings::default();
        HoldSettings {
            channel: self
                .midi
                .channel
                .map(|c| c.clamp(1, 16) - 1)
                .unwrap_or(fallback.channel),
            note_on_velocity: self
                .midi
                .note_on_velocity
                .map(clamp_velocity)
                .unwrap_or(fallback.note_on_velocity),
            note_off_velocity: self
                .midi
                .note_off_velocity
                .map(clamp_velocity)
                .unwrap_or(fallback.note_off_velocity),
            panic_velocity: self
                .midi
                .panic_velocity
                .map(clamp_velocity)
                .unwrap_or(fallback.panic_velocity),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.logging
            .level
            .as_deref()
            .and_then(parse_level)
            .unwrap_or(log::LevelFilter::Info)
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("midihold").join("config.toml"))
}

fn clamp_velocity(v: u8) -> u8 {
    v.min(127)
}

fn merge_midi(base: &mut MidiConfig, user: MidiConfig) {
    if user.client_name.is_some() {
        base.client_name = user.client_name;
    }
    if user.virtual_port_name.is_some() {
        base.virtual_port_name = user.virtual_port_name;
    }
    if user.channel.is_some() {
        base.channel = user.channel;
    }
    if user.note_on_velocity.is_some() {
        base.note_on_velocity = user.note_on_velocity;
    }
    if user.note_off_velocity.is_some() {
        base.note_off_velocity = user.note_off_velocity;
    }
    if user.panic_velocity.is_some() {
        base.panic_velocity = user.panic_velocity;
    }
}

fn merge_logging(base: &mut LoggingConfig, user: LoggingConfig) {
    if user.level.is_some() {
        base.level = user.level;
    }
}

fn parse_level(s: &str) -> Option<log::LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(log::LevelFilter::Off),
        "error" => Some(log::LevelFilter::Error),
        "warn" | "warning" => Some(log::LevelFilter::Warn),
        "info" => Some(log::LevelFilter::Info),
        "debug" => Some(log::LevelFilter::Debug),
        "trace" => Some(log::LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_embedded_config() {
        let config = Config::embedded();
        assert_eq!(config.client_name(), "midihold");
        assert_eq!(config.virtual_port_name(), "hold-out");
        assert_eq!(config.settings(), HoldSettings::default());
        assert_eq!(config.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config.settings(), HoldSettings::default());
    }

    #[test]
    fn test_user_file_overrides_some_keys() {
        let file = write_config(
            r#"
[midi]
channel = 10
panic_velocity = 0

[logging]
level = "debug"
"#,
        );
        let config = Config::load_from(file.path());
        let settings = config.settings();
        assert_eq!(settings.channel, 9);
        assert_eq!(settings.panic_velocity, 0);
        assert_eq!(settings.note_on_velocity, 127);
        assert_eq!(config.client_name(), "midihold");
        assert_eq!(config.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let file = write_config(
            r#"
[midi]
channel = 0
note_on_velocity = 200
"#,
        );
        let settings = Config::load_from(file.path()).settings();
        assert_eq!(settings.channel, 0);
        assert_eq!(settings.note_on_velocity, 127);

        let file = write_config("[midi]\nchannel = 99\n");
        assert_eq!(Config::load_from(file.path()).settings().channel, 15);
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let file = write_config("[midi\nchannel = ");
        let config = Config::load_from(file.path());
        assert_eq!(config.settings(), HoldSettings::default());
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!(parse_level("WARN"), Some(log::LevelFilter::Warn));
        assert_eq!(parse_level("warning"), Some(log::LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(log::LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }
}
