mod api;
mod config;
mod error;
mod pipeline;
mod post;
mod report;
mod threads;
mod user;

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use api::threads::ThreadsClient;
use config::Config;
use error::Error;
use log::{error, info};
use pipeline::Outcome;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::parse();
    config.init_logger();
    info!("# Threads Insights #");
    info!("");

    let token = match config.token() {
        Some(token) => token,
        None => match prompt_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                info!("No access token given, run again with an access token");
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let code = match start(&config, token).await {
        Ok(Outcome::NoPosts) => {
            info!("No posts found");
            return ExitCode::SUCCESS;
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            if e.is_fatal() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    };

    if config.wait() {
        wait_for_enter();
    }
    code
}

async fn start(config: &Config, token: String) -> Result<Outcome, Error> {
    let client = ThreadsClient::new(config, token)?;
    let output = config.output();
    pipeline::run(config, &client, &output).await
}

/// Ask for the token on stdin, `None` when left empty
fn prompt_token() -> Result<Option<String>, Error> {
    print!("Access Token (press Enter when done): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let token = line.trim();
    Ok((!token.is_empty()).then(|| token.to_string()))
}

fn wait_for_enter() {
    print!("\nPress Enter to exit...");
    if io::stdout().flush().is_ok() {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok();
    }
}
