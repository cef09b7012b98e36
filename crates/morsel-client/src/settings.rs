//! Runtime settings.
//!
//! Every value resolves as: explicit override (CLI flag) > `MORSEL_*`
//! environment variable > built-in default. Relative paths are resolved
//! against the current directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::date::parse_dataset_date;
use crate::ingest::persist::SALES_ARTIFACT;
use crate::{ClientError, ClientResult};

pub const HOME_ENV: &str = "MORSEL_HOME";
pub const DATA_DIR_ENV: &str = "MORSEL_DATA_DIR";
pub const OUTPUT_DIR_ENV: &str = "MORSEL_OUTPUT_DIR";
pub const PRODUCT_ENV: &str = "MORSEL_PRODUCT";
pub const DATASET_ENV: &str = "MORSEL_DATASET";
pub const HIKE_DATE_ENV: &str = "MORSEL_HIKE_DATE";
pub const HOST_ENV: &str = "MORSEL_HOST";
pub const PORT_ENV: &str = "MORSEL_PORT";

pub const DEFAULT_PRODUCT: &str = "pink morsel";
pub const DEFAULT_HIKE_DATE: &str = "2021-01-15";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub home: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub product: String,
    pub dataset_path: PathBuf,
    pub hike_date: NaiveDate,
    pub host: String,
    pub port: u16,
    pub write_intermediates: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub home: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub product: Option<String>,
    pub dataset: Option<PathBuf>,
    pub hike_date: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub skip_intermediates: bool,
}

impl Settings {
    pub fn resolve(overrides: &SettingsOverrides) -> ClientResult<Self> {
        Self::resolve_with_env(overrides, |name| std::env::var_os(name))
    }

    #[doc(hidden)]
    pub fn resolve_with_env<F>(overrides: &SettingsOverrides, env: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let env_path = |name: &str| env(name).filter(|value| !value.is_empty()).map(PathBuf::from);
        let env_string = |name: &str| {
            env(name)
                .map(|value| value.to_string_lossy().trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let home = match overrides.home.clone().or_else(|| env_path(HOME_ENV)) {
            Some(path) => absolutize(&path)?,
            None => current_dir()?,
        };
        let data_dir = resolve_dir(
            &home,
            overrides.data_dir.clone().or_else(|| env_path(DATA_DIR_ENV)),
            "data",
        );
        let output_dir = resolve_dir(
            &home,
            overrides.output_dir.clone().or_else(|| env_path(OUTPUT_DIR_ENV)),
            "",
        );
        let dataset_path = match overrides.dataset.clone().or_else(|| env_path(DATASET_ENV)) {
            Some(path) => join_relative(&home, &path),
            None => output_dir.join(SALES_ARTIFACT),
        };

        let product = overrides
            .product
            .clone()
            .or_else(|| env_string(PRODUCT_ENV))
            .unwrap_or_else(|| DEFAULT_PRODUCT.to_string());

        let hike_date = match overrides.hike_date.as_deref() {
            Some(value) => parse_setting_date("--hike-date", value)?,
            None => match env_string(HIKE_DATE_ENV) {
                Some(value) => parse_setting_date(HIKE_DATE_ENV, &value)?,
                None => parse_setting_date("default hike date", DEFAULT_HIKE_DATE)?,
            },
        };

        let host = overrides
            .host
            .clone()
            .or_else(|| env_string(HOST_ENV))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match overrides.port {
            Some(value) => value,
            None => match env_string(PORT_ENV) {
                Some(value) => value.parse::<u16>().map_err(|_| {
                    ClientError::invalid_setting(PORT_ENV, &value, "a TCP port between 0 and 65535")
                })?,
                None => DEFAULT_PORT,
            },
        };

        Ok(Self {
            home,
            data_dir,
            output_dir,
            product,
            dataset_path,
            hike_date,
            host,
            port,
            write_intermediates: !overrides.skip_intermediates,
        })
    }
}

fn parse_setting_date(source: &str, value: &str) -> ClientResult<NaiveDate> {
    parse_dataset_date(value)
        .ok_or_else(|| ClientError::invalid_setting(source, value, "a YYYY-MM-DD date"))
}

fn resolve_dir(home: &Path, candidate: Option<PathBuf>, default_child: &str) -> PathBuf {
    match candidate {
        Some(path) => join_relative(home, &path),
        None if default_child.is_empty() => home.to_path_buf(),
        None => home.join(default_child),
    }
}

fn join_relative(home: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    home.join(path)
}

fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(current_dir()?.join(path))
}

fn current_dir() -> ClientResult<PathBuf> {
    std::env::current_dir()
        .map_err(|error| ClientError::source_not_found(Path::new("."), &error.to_string()))
}
