//! Layered table configuration.
//!
//! Values resolve as built-in defaults, then the TOML file named by
//! `HOLDEM_CONFIG`, then the `HOLDEM_*` environment overrides. Each value
//! remembers which layer it came from so `cfg` can report it.

use std::fs;

use holdem_engine::options::{GameOptions, MAX_BUY_IN};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "HOLDEM_CONFIG";
pub const BUY_IN_ENV: &str = "HOLDEM_BUY_IN";
pub const BLIND_ENV: &str = "HOLDEM_BLIND";
pub const RAISE_DELAY_ENV: &str = "HOLDEM_RAISE_DELAY";
pub const SEED_ENV: &str = "HOLDEM_SEED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub buy_in: u32,
    /// Small blind every new game starts at
    pub blind: u32,
    /// Minutes between blind doublings, 0 disables them
    pub raise_delay: u32,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        let options = GameOptions::default();
        Self {
            buy_in: options.buy_in,
            blind: options.starting_blind,
            raise_delay: options.raise_delay,
            seed: None,
        }
    }
}

impl Config {
    /// Options for a freshly created table.
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            blind: self.blind,
            buy_in: self.buy_in,
            raise_delay: self.raise_delay,
            starting_blind: self.blind,
            seed: self.seed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub buy_in: ValueSource,
    pub blind: ValueSource,
    pub raise_delay: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            buy_in: ValueSource::Default,
            blind: ValueSource::Default,
            raise_delay: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "malformed config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.buy_in {
            cfg.buy_in = v;
            sources.buy_in = ValueSource::File;
        }
        if let Some(v) = f.blind {
            cfg.blind = v;
            sources.blind = ValueSource::File;
        }
        if let Some(v) = f.raise_delay {
            cfg.raise_delay = v;
            sources.raise_delay = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(v) = env_override(BUY_IN_ENV) {
        cfg.buy_in = parse_u32(&v, "buy-in")?;
        sources.buy_in = ValueSource::Env;
    }
    if let Some(v) = env_override(BLIND_ENV) {
        cfg.blind = parse_u32(&v, "blind")?;
        sources.blind = ValueSource::Env;
    }
    if let Some(v) = env_override(RAISE_DELAY_ENV) {
        cfg.raise_delay = parse_u32(&v, "raise-delay")?;
        sources.raise_delay = ValueSource::Env;
    }
    if let Some(v) = env_override(SEED_ENV) {
        cfg.seed = Some(
            v.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct FileConfig {
    #[serde(default)]
    buy_in: Option<u32>,
    #[serde(default)]
    blind: Option<u32>,
    #[serde(default)]
    raise_delay: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
}

fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_u32(raw: &str, what: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, raw)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.buy_in == 0 {
        return Err(ConfigError::Invalid("buy-in must be >0".into()));
    }
    if cfg.buy_in > MAX_BUY_IN {
        return Err(ConfigError::Invalid(format!(
            "buy-in must be at most {}",
            MAX_BUY_IN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_options() {
        let cfg = Config::default();
        assert_eq!(cfg.buy_in, 500);
        assert_eq!(cfg.blind, 5);
        assert_eq!(cfg.raise_delay, 30);
        let options = cfg.game_options();
        assert_eq!(options.starting_blind, 5);
        assert_eq!(options.seed, None);
    }

    #[test]
    fn file_keys_are_kebab_case() {
        let f: FileConfig = toml::from_str("buy-in = 1000\nraise-delay = 0\n").unwrap();
        assert_eq!(f.buy_in, Some(1000));
        assert_eq!(f.raise_delay, Some(0));
        assert_eq!(f.blind, None);
    }

    #[test]
    fn zero_buy_in_is_rejected() {
        let cfg = Config {
            buy_in: 0,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn buy_in_above_the_table_bound_is_rejected() {
        let at_bound = Config {
            buy_in: MAX_BUY_IN,
            ..Config::default()
        };
        assert!(validate(&at_bound).is_ok());
        let over = Config {
            buy_in: u32::MAX,
            ..Config::default()
        };
        match validate(&over) {
            Err(ConfigError::Invalid(msg)) => assert!(msg.starts_with("buy-in must be at most")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
