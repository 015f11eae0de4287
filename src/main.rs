// SPDX-License-Identifier: MPL-2.0
use image_depot::app::{self, cli};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("image_depot=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let flags = match cli::parse_flags(pico_args::Arguments::from_env()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("image-depot: {err}");
            eprintln!("Try 'image-depot --help'.");
            return ExitCode::from(2);
        }
    };
    init_tracing(flags.verbose);

    match app::run(flags).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            tracing::error!("{err}");
            eprintln!("image-depot: {err}");
            ExitCode::FAILURE
        }
    }
}
