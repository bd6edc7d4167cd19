use anyhow::Result;
use clap::Parser;
use lib_barline::{BarOptions, RefreshSignal, StatusBar};
use tokio::io::BufReader;

mod bar_logic;
use bar_logic::{config, layout, logger};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load_config(config::Config::parse());
    let log_file = logger::setup_logging(&config.log_dir(), config.log_level())?;
    log::info!("Logging to {}", log_file.display());

    let options = BarOptions {
        interval: config.interval(),
        palette: config.palette(),
    };
    let mut bar = StatusBar::new(tokio::io::stdout(), options, RefreshSignal::new());

    let blocks = config.layout();
    log::info!("Configured {} blocks", blocks.len());
    bar.register(layout::registration_batch(&blocks));

    if let Some(signal) = config.refresh_signal {
        if let Err(e) = lib_barline::forward_signal(signal, bar.refresh_signal()) {
            log::warn!("Cannot listen for signal {}: {}. Refresh on signal disabled.", signal, e);
        }
    }

    let input = config
        .click_events
        .unwrap_or(true)
        .then(|| BufReader::new(tokio::io::stdin()));

    if let Err(e) = bar.run(input).await {
        log::error!("Status bar stopped: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
