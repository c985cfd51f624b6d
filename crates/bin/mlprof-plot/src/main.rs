use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use crate::plot::builder::PlotBuilder;

pub(crate) mod plot;

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct CliArgs {
    #[arg(short = 'c', long, value_name = "CONFIG_FILE")]
    config: String,
    /// Replaces the output path of the configuration file. Relative paths are
    /// taken from the current directory.
    #[arg(short = 'o', long, value_name = "OUTPUT_FILE")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let start = std::time::Instant::now();
    let mut builder = match PlotBuilder::new(&args.config) {
        Ok(builder) => builder,
        Err(e) => {
            eprintln!("Error while parsing the configuration file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(output) = args.output {
        builder.override_output(output);
    }
    if let Err(e) = builder.initiate_logging() {
        eprintln!("Error while configuring the logger: {}", e);
        return ExitCode::FAILURE;
    }

    match builder.run() {
        Ok(_) => {
            let elapsed = start.elapsed();
            info!("Plotting finished in {} ms.", elapsed.as_millis());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Plotting failed: {}", e);
            eprintln!("Plotting failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
