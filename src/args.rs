use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{error::ErrorKind, Arg, Command};
use simplelog::LevelFilter;

use logfilter::misc::{
    error::{AppCustomErrorKind, AppError, AppResult},
    util::DEFAULT_LOGGER_NAME,
};

// This structure holds the command line arguments. Filter parameters are optional
// because they override the configuration file, itself overriding defaults.
#[derive(Debug)]
pub struct CliOptions {
    pub config_file: Option<PathBuf>,
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub marker: Option<String>,
    pub separator: Option<String>,
    pub abort_on_malformed: bool,
    pub logger: PathBuf,
    pub logger_level: LevelFilter,
    pub reset_log: bool,
    pub check_conf: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        let mut logger = std::env::temp_dir();
        logger.push(DEFAULT_LOGGER_NAME);

        CliOptions {
            config_file: None,
            source: None,
            destination: None,
            marker: None,
            separator: None,
            abort_on_malformed: false,
            logger,
            logger_level: LevelFilter::Info,
            reset_log: false,
            check_conf: false,
        }
    }
}

impl CliOptions {
    pub fn get_options() -> AppResult<CliOptions> {
        CliOptions::from_args(std::env::args_os())
    }

    pub fn from_args<I, T>(args: I) -> AppResult<CliOptions>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Command::new("Log filter")
            .version(env!("CARGO_PKG_VERSION"))
            .author("Alain Viguier dandyvica@gmail.com")
            .about("Appends an add-on's records found in a client logfile to an accumulator file")
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .required(false)
                    .help("Name of the optional YAML configuration file")
                    .takes_value(true),
            )
            .arg(
                Arg::new("source")
                    .short('s')
                    .long("source")
                    .required(false)
                    .help("Logfile to extract lines from")
                    .takes_value(true),
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .required(false)
                    .help("File to which extracted lines are appended")
                    .takes_value(true),
            )
            .arg(
                Arg::new("marker")
                    .short('m')
                    .long("marker")
                    .required(false)
                    .help("Only lines containing this string are extracted")
                    .allow_hyphen_values(true)
                    .takes_value(true),
            )
            .arg(
                Arg::new("separator")
                    .short('p')
                    .long("separator")
                    .required(false)
                    .help("Extracted lines are cut after the first occurrence of this string")
                    .allow_hyphen_values(true)
                    .takes_value(true),
            )
            .arg(
                Arg::new("abort")
                    .short('a')
                    .long("abort-on-malformed")
                    .required(false)
                    .help("Abort without writing anything if a marker line lacks the separator")
                    .takes_value(false),
            )
            .arg(
                Arg::new("logger")
                    .short('l')
                    .long("logger")
                    .required(false)
                    .help("Name of the log file for logging information")
                    .takes_value(true),
            )
            .arg(
                Arg::new("loglevel")
                    .short('g')
                    .long("loglevel")
                    .required(false)
                    .help("Logger level: off, error, warn, info, debug or trace")
                    .takes_value(true),
            )
            .arg(
                Arg::new("reset")
                    .short('r')
                    .long("reset-log")
                    .required(false)
                    .help("Reset the logger file instead of appending to it")
                    .takes_value(false),
            )
            .arg(
                Arg::new("chkcnf")
                    .short('n')
                    .long("check-conf")
                    .required(false)
                    .help("Print out the resolved configuration and exit")
                    .takes_value(false),
            )
            .try_get_matches_from(args);

        // help and version are not errors: let clap print them and exit
        let matches = match matches {
            Ok(matches) => matches,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                _ => {
                    let msg = e.to_string();
                    let first = msg.lines().next().unwrap_or_default();
                    return Err(AppError::new(
                        AppCustomErrorKind::InvalidConfiguration,
                        first.trim_start_matches("error: "),
                    ));
                }
            },
        };

        // save all cli options into a structure
        let mut options = CliOptions::default();

        options.config_file = matches.value_of("config").map(PathBuf::from);
        options.source = matches.value_of("source").map(PathBuf::from);
        options.destination = matches.value_of("output").map(PathBuf::from);
        options.marker = matches.value_of("marker").map(String::from);
        options.separator = matches.value_of("separator").map(String::from);

        if let Some(logger) = matches.value_of("logger") {
            options.logger = PathBuf::from(logger);
        }

        if let Some(level) = matches.value_of("loglevel") {
            options.logger_level = LevelFilter::from_str(level).map_err(|_| {
                AppError::new(
                    AppCustomErrorKind::InvalidConfiguration,
                    &format!("unknown logger level: {}", level),
                )
            })?;
        }

        options.abort_on_malformed = matches.is_present("abort");
        options.reset_log = matches.is_present("reset");
        options.check_conf = matches.is_present("chkcnf");

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_argument() {
        let options = CliOptions::from_args(vec!["logfilter"]).unwrap();

        assert!(options.config_file.is_none());
        assert!(options.source.is_none());
        assert!(options.marker.is_none());
        assert!(!options.abort_on_malformed);
        assert_eq!(options.logger_level, LevelFilter::Info);
        assert!(options.logger.ends_with("logfilter.log"));
    }

    #[test]
    fn all_arguments() {
        let options = CliOptions::from_args(vec![
            "logfilter",
            "-c",
            "filter.yml",
            "--source",
            "ClientLog.txt",
            "-o",
            "out.txt",
            "--marker",
            ".OtherAddon",
            "--separator",
            " - ",
            "-a",
            "--logger",
            "/tmp/foo.log",
            "--loglevel",
            "debug",
            "-r",
            "-n",
        ])
        .unwrap();

        assert_eq!(options.config_file, Some(PathBuf::from("filter.yml")));
        assert_eq!(options.source, Some(PathBuf::from("ClientLog.txt")));
        assert_eq!(options.destination, Some(PathBuf::from("out.txt")));
        assert_eq!(options.marker.as_deref(), Some(".OtherAddon"));
        assert_eq!(options.separator.as_deref(), Some(" - "));
        assert!(options.abort_on_malformed);
        assert_eq!(options.logger, PathBuf::from("/tmp/foo.log"));
        assert_eq!(options.logger_level, LevelFilter::Debug);
        assert!(options.reset_log);
        assert!(options.check_conf);
    }

    #[test]
    fn hyphen_separator() {
        let options = CliOptions::from_args(vec!["logfilter", "-p", "-> "]).unwrap();
        assert_eq!(options.separator.as_deref(), Some("-> "));
    }

    #[test]
    fn extra_argument() {
        let err = CliOptions::from_args(vec!["logfilter", "-s", "ClientLog.txt", "ignored"])
            .unwrap_err();
        assert_eq!(
            err.get_custom_kind(),
            Some(&AppCustomErrorKind::InvalidConfiguration)
        );

        let msg = err.to_string();
        assert_eq!(msg.lines().count(), 1);
        assert!(msg.contains("ignored"));
    }

    #[test]
    fn unknown_option() {
        let err = CliOptions::from_args(vec!["logfilter", "--follow"]).unwrap_err();
        assert_eq!(
            err.get_custom_kind(),
            Some(&AppCustomErrorKind::InvalidConfiguration)
        );
        assert_eq!(err.to_string().lines().count(), 1);
    }

    #[test]
    fn bad_level() {
        let err = CliOptions::from_args(vec!["logfilter", "-g", "verbose"]).unwrap_err();
        assert_eq!(
            err.get_custom_kind(),
            Some(&AppCustomErrorKind::InvalidConfiguration)
        );
    }
}
