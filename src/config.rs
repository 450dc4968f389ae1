//! Configuration file handling for the ledger.
//!
//! The configuration file is stored at `$LEDGER_HOME/config.json` and names the files the ledger
//! reads and writes: the transaction file, the credential file and the two report artifacts.

use crate::error::{ErrorType, IntoResult, Res, Result};
use crate::utils;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_NAME: &str = "ledger";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const TRANSACTIONS_CSV: &str = "transactions.csv";
const USERS_JSON: &str = "users.json";
const CHART_SVG: &str = "category_chart.svg";
const EXPORT_XLSX: &str = "transactions.xlsx";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$LEDGER_HOME` and from there it loads (or creates) `$LEDGER_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// This will
    /// - create `ledger_home` if it does not exist
    /// - write a default `config.json` if there is none
    /// - otherwise load and validate the existing `config.json`
    pub fn load_or_create(ledger_home: impl Into<PathBuf>) -> Result<Self> {
        Self::load_or_create_inner(ledger_home.into()).pub_result(ErrorType::Config)
    }

    fn load_or_create_inner(maybe_relative: PathBuf) -> Res<Self> {
        utils::make_dir(&maybe_relative).context("Unable to create the ledger home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = if config_path.is_file() {
            debug!("Loading config from {}", config_path.display());
            ConfigFile::load(&config_path)?
        } else {
            info!("Creating a new config at {}", config_path.display());
            let config_file = ConfigFile::default();
            config_file.save(&config_path)?;
            config_file
        };

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The CSV file holding every transaction.
    pub fn transactions_path(&self) -> PathBuf {
        self.resolve(&self.config_file.transactions_path)
    }

    /// The JSON file mapping usernames to passwords.
    pub fn users_path(&self) -> PathBuf {
        self.resolve(&self.config_file.users_path)
    }

    /// Where the category bar chart is written.
    pub fn chart_path(&self) -> PathBuf {
        self.resolve(&self.config_file.chart_path)
    }

    /// Where the spreadsheet export is written.
    pub fn export_path(&self) -> PathBuf {
        self.resolve(&self.config_file.export_path)
    }

    /// Whether a freshly drawn chart is opened in the platform viewer.
    pub fn open_chart(&self) -> bool {
        self.config_file.open_chart
    }

    /// Returns `p` unchanged if it is absolute, otherwise joins it onto the ledger home.
    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            return p.to_path_buf();
        }
        self.root.join(p)
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "ledger",
///   "config_version": 1,
///   "transactions_path": "transactions.csv",
///   "users_path": "users.json",
///   "chart_path": "category_chart.svg",
///   "export_path": "transactions.xlsx",
///   "open_chart": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "ledger"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Path to the transaction file, relative to `$LEDGER_HOME` or absolute
    #[serde(default = "default_transactions_path")]
    transactions_path: PathBuf,

    /// Path to the credential file, relative to `$LEDGER_HOME` or absolute
    #[serde(default = "default_users_path")]
    users_path: PathBuf,

    #[serde(default = "default_chart_path")]
    chart_path: PathBuf,

    #[serde(default = "default_export_path")]
    export_path: PathBuf,

    /// Open the chart in a viewer after drawing it
    #[serde(default = "default_open_chart")]
    open_chart: bool,
}

fn default_transactions_path() -> PathBuf {
    PathBuf::from(TRANSACTIONS_CSV)
}

fn default_users_path() -> PathBuf {
    PathBuf::from(USERS_JSON)
}

fn default_chart_path() -> PathBuf {
    PathBuf::from(CHART_SVG)
}

fn default_export_path() -> PathBuf {
    PathBuf::from(EXPORT_XLSX)
}

fn default_open_chart() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            transactions_path: default_transactions_path(),
            users_path: default_users_path(),
            chart_path: default_chart_path(),
            export_path: default_export_path(),
            open_chart: default_open_chart(),
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or has the wrong `app_name` or
    /// `config_version`
    fn load(path: &Path) -> Res<Self> {
        let config: ConfigFile = utils::deserialize(path)?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version == CONFIG_VERSION,
            "Unsupported config_version in config file: expected {}, got {}",
            CONFIG_VERSION,
            config.config_version
        );

        Ok(config)
    }

    fn save(&self, path: &Path) -> Res<()> {
        utils::serialize(path, self).context("Unable to write config file")
    }
}
