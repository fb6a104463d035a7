use clap::Parser;
use log::error;

use pdptw_solver::cli::{self, Cli, Command};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Command::Single {
            instance,
            method,
            algorithm,
            time,
            seed,
            starts,
            json,
            csv,
            output,
        } => match cli::run_single(
            &instance,
            method,
            algorithm,
            time,
            seed,
            starts,
            json.as_ref(),
            csv.as_ref(),
            output.as_ref(),
        ) {
            Ok(record) => {
                if record.feasible {
                    0
                } else {
                    2
                }
            }
            Err(err) => {
                error!("{err}");
                1
            }
        },
        Command::Batch {
            dir,
            time,
            seed,
            starts,
            json,
            csv,
        } => match cli::run_batch(&dir, time, seed, starts, json.as_ref(), csv.as_ref()) {
            Ok(records) => {
                if records.iter().all(|r| r.feasible) {
                    0
                } else {
                    2
                }
            }
            Err(err) => {
                error!("{err}");
                1
            }
        },
    };

    std::process::exit(exit_code);
}
