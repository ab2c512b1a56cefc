use eyre::{Result, WrapErr};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "marksheet.toml";
pub const DEFAULT_DATA_FILE: &str = "studentMarks.txt";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: Storage,
    pub display: Display,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Storage {
    pub file: PathBuf,
}

impl Default for Storage {
    fn default() -> Self {
        Storage {
            file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Display {
    /// Decimals shown for percentages.
    pub precision: usize,
}

impl Default for Display {
    fn default() -> Self {
        Display { precision: 1 }
    }
}

impl Config {
    /// Load `file_name`, or the default configuration file when `None`. Only
    /// the default file is allowed to be missing.
    pub fn load(file_name: Option<&Path>) -> Result<Config> {
        let path = file_name.unwrap_or(Path::new(DEFAULT_CONFIG));
        match fs::read_to_string(path) {
            Ok(text) => Config::parse(&text)
                .wrap_err_with(|| format!("cannot parse configuration file {}", path.display())),
            Err(e) if e.kind() == io::ErrorKind::NotFound && file_name.is_none() => {
                Ok(Config::default())
            }
            Err(e) => Err(e)
                .wrap_err_with(|| format!("cannot load configuration file {}", path.display())),
        }
    }

    pub fn parse(text: &str) -> Result<Config> {
        Ok(toml::from_str(text)?)
    }
}
