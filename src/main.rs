#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
mod executor;

use std::{path::PathBuf, process::ExitCode};

use argh::FromArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[macro_use]
extern crate tracing;

/// Ping a Minecraft: Java Edition server and print its status.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// server hostname or IP address
    #[argh(positional)]
    pub host: String,
    /// server port
    #[argh(option, short = 'p', default = "pinger::DEFAULT_PORT")]
    pub port: u16,
    /// deadline for the whole ping in seconds, 0 waits indefinitely
    #[argh(option, short = 't', default = "10")]
    pub timeout: u64,
    /// send a PROXY protocol header of this version (1 or 2) first
    #[argh(option)]
    pub proxy: Option<u8>,
    /// follow the _minecraft._tcp SRV record of the host
    #[argh(switch)]
    pub srv: bool,
    /// print the status document as JSON
    #[argh(switch)]
    pub json: bool,
    /// write the server icon to this PNG file
    #[argh(option)]
    pub favicon: Option<PathBuf>,
    /// log as JSON lines
    #[argh(switch)]
    pub log_json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args: Args = argh::from_env();
    start_tracing(args.log_json);
    match executor::run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!(%error, host = %args.host, port = args.port, "ping failed");
            ExitCode::FAILURE
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Failure {
    #[error("{0}")]
    Ping(#[from] pinger::Error),
    #[error("the server did not send a favicon")]
    NoFavicon,
    #[error("the favicon is not a base64 PNG data URI")]
    InvalidFavicon,
    #[error("the favicon is not valid base64: {0}")]
    FaviconDecode(#[from] base64::DecodeError),
    #[error("could not write the favicon: {0}")]
    FaviconWrite(#[source] std::io::Error),
    #[error("JSON processing error: {0}")]
    JsonProcessingFailed(#[from] serde_json::Error),
}

fn start_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(
            concat!(env!("CARGO_PKG_NAME"), "=info")
                .parse()
                .expect("static directive"),
        )
        .with_env_var("LOG")
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
