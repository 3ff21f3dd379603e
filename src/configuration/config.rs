//! Holds the filter parameters, optionally loaded from a YAML file.
//!
//! Every field has a default matching the add-on deployment, so an empty YAML document
//! (or no file at all) gives a usable configuration:
//!
//! ```yaml
//! source: ../../../../../ClientLog.txt
//! destination: ./LoreHound.txt
//! marker: .LoreHound
//! separator: " - "
//! missing_separator: skip
//! ```
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::context;
use crate::misc::{
    error::{AppError, AppResult},
    util::*,
};

/// What to do when a line holds the marker but not the separator.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum MissingSeparator {
    /// Drop the line, log a warning and go on.
    Skip,
    /// Stop the whole run before anything is written.
    Abort,
}

impl Default for MissingSeparator {
    fn default() -> Self {
        MissingSeparator::Skip
    }
}

/// The filter configuration used to extract marker lines from a logfile.
#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The logfile to read from. Never modified.
    pub source: PathBuf,

    /// The accumulator file. Only appended to.
    pub destination: PathBuf,

    /// Lines are kept only if they contain this substring.
    pub marker: String,

    /// Kept lines are split at the first occurrence of this substring, and only the
    /// text after it is written.
    pub separator: String,

    /// Policy for kept lines lacking the separator.
    pub missing_separator: MissingSeparator,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            marker: DEFAULT_MARKER.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            missing_separator: MissingSeparator::default(),
        }
    }
}

impl std::str::FromStr for Config {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_yaml::from_str(s).map_err(AppError::Yaml)
    }
}

impl Config {
    /// Loads a YAML configuration file as a `Config` struct.
    pub fn from_path<P: AsRef<Path> + std::fmt::Debug>(file_name: P) -> AppResult<Config> {
        // open YAML file
        let file = std::fs::File::open(&file_name)
            .map_err(|e| context!(e, "unable to read configuration file: {:?}", &file_name))?;

        // load YAML data
        let yaml: Config = serde_yaml::from_reader(file)
            .map_err(|e| context!(e, "error reading configuration file {:?}", file_name))?;
        debug!(
            "sucessfully loaded YAML configuration file {:?}, marker={:?}",
            file_name, yaml.marker
        );

        Ok(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn config_defaults() {
        let config = Config::default();

        assert_eq!(config.source, PathBuf::from("../../../../../ClientLog.txt"));
        assert_eq!(config.destination, PathBuf::from("./LoreHound.txt"));
        assert_eq!(&config.marker, ".LoreHound");
        assert_eq!(&config.separator, " - ");
        assert_eq!(config.missing_separator, MissingSeparator::Skip);
    }

    #[test]
    fn config_partial() {
        let yaml = r#"
        source: /var/log/client.log
        marker: .OtherAddon
        missing_separator: abort
        "#;
        let config = Config::from_str(yaml).expect("unable to read YAML");

        assert_eq!(config.source, PathBuf::from("/var/log/client.log"));
        assert_eq!(config.destination, PathBuf::from("./LoreHound.txt"));
        assert_eq!(&config.marker, ".OtherAddon");
        assert_eq!(&config.separator, " - ");
        assert_eq!(config.missing_separator, MissingSeparator::Abort);
    }

    #[test]
    fn config_unknown_field() {
        let yaml = r#"
        source: /var/log/client.log
        pattern: foo
        "#;
        assert!(Config::from_str(yaml).is_err());
    }

    #[test]
    fn config_unknown_policy() {
        assert!(Config::from_str("missing_separator: retry").is_err());
    }

    #[test]
    fn config_from_path() {
        let mut path = std::env::temp_dir();
        path.push("logfilter_config_from_path.yml");
        std::fs::write(&path, "destination: /tmp/out.txt\nseparator: '|'\n")
            .expect("unable to write YAML file");

        let config = Config::from_path(&path).expect("unable to load YAML file");
        assert_eq!(config.destination, PathBuf::from("/tmp/out.txt"));
        assert_eq!(&config.separator, "|");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn config_from_missing_path() {
        let err = Config::from_path("/does/not/exist.yml").unwrap_err();
        assert_eq!(err.get_ioerror(), Some(std::io::ErrorKind::NotFound));
    }
}
