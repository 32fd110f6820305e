//! Example downloading a file with a progress bar, resuming a previous attempt
//!
//! ```text
//! cargo run --example fetch -- https://example.com/avr-1.6.20.tar.bz2 avr.tar.bz2
//! ```
//!
//! Interrupt it with Ctrl-C and run it again: the download picks up where it
//! stopped. Set `RUST_LOG=rangefetch=debug` to see the negotiation.

use color_eyre::{eyre::eyre, Result};
use rangefetch::{Download, DownloadOptions, ProgressBarOpts, ResumeState};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let url = args.next().ok_or_else(|| eyre!("usage: fetch <url> <destination> [--restart]"))?;
    let destination = args.next().ok_or_else(|| eyre!("usage: fetch <url> <destination> [--restart]"))?;
    let restart = args.any(|arg| arg == "--restart");

    let options = DownloadOptions::new().force_restart(restart);
    let mut download = Download::with_options(&destination, &url, options).await?;

    match download.state() {
        ResumeState::Resuming { offset } => eprintln!("Resuming after {} bytes", offset),
        ResumeState::Restarting { discarded } => {
            eprintln!("Server cannot resume, discarding {} bytes", discarded)
        }
        ResumeState::Starting => eprintln!("Starting download"),
    }

    let opts = ProgressBarOpts::with_pip_style();
    let bar = opts.for_download(&download)?;
    download
        .run_and_poll(|completed| bar.set_position(completed), Duration::from_millis(100))
        .await?;
    opts.finish(&bar);

    println!("Downloaded {} bytes into {}", download.completed(), destination);

    Ok(())
}
