use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use homedir::my_home;
use serde::{Deserialize, Serialize};

use crate::search_query::DEFAULT_DATE_FORMAT;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Indent JSON output
    #[serde(default = "pretty_json")]
    pub pretty_json: bool,

    /// strftime format of `from:`/`to:` values
    #[serde(default = "date_format")]
    pub date_format: String,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: PathBuf,
}

fn pretty_json() -> bool {
    true
}

fn date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pretty_json: pretty_json(),
            date_format: date_format(),
            base_path: PathBuf::new(),
        }
    }
}

/// `BQ_BASE_PATH`, or `~/.config/bq`.
pub fn base_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("BQ_BASE_PATH") {
        return Ok(PathBuf::from(path));
    }

    let home = my_home()
        .context("could not determine home directory")?
        .context("home directory path is empty")?;
    Ok(home.join(".config").join("bq"))
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.date_format.trim().is_empty() {
            bail!("date_format must not be empty");
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            bail!("date_format {:?} is not a valid strftime format", self.date_format);
        }

        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_with(&base_path()?)
    }

    pub fn load_with(base_path: &Path) -> Result<Self> {
        let config_path = base_path.join(CONFIG_FILE);

        // create new if does not exist
        if !config_path.exists() {
            std::fs::create_dir_all(base_path)
                .with_context(|| format!("failed to create {}", base_path.display()))?;
            let defaults = serde_yml::to_string(&Self::default())?;
            std::fs::write(&config_path, defaults)
                .with_context(|| format!("failed to write {}", config_path.display()))?;
            log::info!("created default config at {}", config_path.display());
        }

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config: Self = serde_yml::from_str(&config_str)
            .with_context(|| format!("config {} is malformed", config_path.display()))?;

        config.base_path = base_path.to_path_buf();
        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.base_path.join(CONFIG_FILE);
        let config_str = serde_yml::to_string(&self)?;
        std::fs::write(&config_path, config_str)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        Ok(())
    }
}
