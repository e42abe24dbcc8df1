use crate::performance::{
    format::{self, Grouped, IntegerFormat, Plain},
    TimeUnit, DEFAULT_TITLE,
};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{fs::File, path::PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub unit: TimeUnit,
    #[serde(default, deserialize_with = "parse_grouping")]
    pub grouping: Grouping,
    #[serde(default)]
    pub fail_fast: bool,
    pub shell: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Step {
    pub name: String,
    pub cmd: String,
    pub unit: Option<TimeUnit>,
}

/// How the report groups the digits of elapsed values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grouping {
    #[default]
    Locale,
    None,
    Separator(char),
}

impl Grouping {
    #[must_use]
    pub fn integer_format(self) -> Box<dyn IntegerFormat + Send + Sync> {
        match self {
            Self::Locale => format::from_env(),
            Self::None => Box::new(Plain),
            Self::Separator(separator) => Box::new(Grouped::new(separator)),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Config {
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let file = File::open(&config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;

        let config: Self = serde_yaml::from_reader(file).context("Failed to parse config file")?;

        Ok(config)
    }
}

/// Parses `locale`, `none` or a single separator character into a `Grouping`.
fn parse_grouping<'de, D>(deserializer: D) -> Result<Grouping, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_grouping_str(&s).map_err(serde::de::Error::custom)
}

fn parse_grouping_str(input: &str) -> Result<Grouping> {
    let mut chars = input.chars();

    match (chars.next(), chars.next()) {
        (None, _) => Ok(Grouping::None),
        (Some(separator), None) => Ok(Grouping::Separator(separator)),
        _ => match input.to_ascii_lowercase().as_str() {
            "locale" => Ok(Grouping::Locale),
            "none" => Ok(Grouping::None),
            _ => Err(anyhow!("Invalid grouping: {}", input)),
        },
    }
}
