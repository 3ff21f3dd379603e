use std::process::exit;

use log::{error, info};

use logfilter::{
    logfile::filter::LogFilter,
    misc::{
        error::AppResult,
        util::{EXIT_FAILURE, EXIT_SUCCESS},
    },
};

mod args;
use args::CliOptions;

mod init;
use init::{init_config, init_log};

fn main() {
    match run() {
        Ok(_) => exit(EXIT_SUCCESS),
        Err(e) => {
            // no-op if the logger is not yet initialized
            error!("{}", e);
            eprintln!("{}", e);
            exit(EXIT_FAILURE);
        }
    }
}

fn run() -> AppResult<()> {
    // manage arguments from command line
    let options = CliOptions::get_options()?;

    // defaults, overriden by the configuration file if any, overriden by command line
    let config = init_config(&options)?;

    // print out config if requested and exit
    if options.check_conf {
        println!("{:#?}", config);
        return Ok(());
    }

    init_log(&options)?;
    info!("using configuration: {:?}", &config);

    // the whole work is done here
    let stats = LogFilter::new(&config)?.run()?;

    info!(
        "end of filtering: {} lines read, {} fragments appended, {} malformed lines",
        stats.lines_read, stats.fragments, stats.malformed
    );
    Ok(())
}
