use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sitewatch::{
    Monitor,
    config::{Config, read_config_file},
    cycle::CheckCycle,
    source::MemoryMonitorSource,
    telegram::TelegramNotifier,
    util,
};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, level_filters::LevelFilter, trace, warn};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file
    #[arg(short)]
    file: String,
}

fn init() {
    let filter = filter::Targets::new().with_targets(vec![
        ("sitewatch", LevelFilter::TRACE),
        ("daemon", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    let config = read_config_file(&args.file)?;

    let monitors = load_monitors(&config);
    info!("watching {} monitors", monitors.len());

    let source = Arc::new(MemoryMonitorSource::with_monitors(monitors));
    let notifier = Arc::new(build_notifier(&config)?);
    let cycle = CheckCycle::new(
        source,
        notifier,
        Duration::from_secs(config.probe_timeout),
    );

    let mut ticker = interval(Duration::from_secs(config.cycle_interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match cycle.run().await {
                    Ok(summary) => debug!("{summary:?}"),
                    Err(e) => error!("cycle aborted: {e:#}"),
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Turn config entries into monitor records, enforcing the URL invariant the
/// check cycle assumes. Invalid entries are dropped with a warning.
fn load_monitors(config: &Config) -> Vec<Monitor> {
    let Some(entries) = &config.monitors else {
        return vec![];
    };

    let mut monitors = vec![];
    for entry in entries {
        let Some(url) = util::normalize_url(&entry.url) else {
            warn!("skipping monitor with invalid url: {:?}", entry.url);
            continue;
        };

        monitors.push(Monitor {
            id: monitors.len() as i64 + 1,
            user_id: entry.user_id,
            url,
            check_interval: entry.check_interval,
            is_active: entry.is_active,
        });
    }

    monitors
}

fn build_notifier(config: &Config) -> anyhow::Result<TelegramNotifier> {
    let telegram = config.telegram.as_ref();

    let token = telegram
        .and_then(|t| t.token.clone())
        .or_else(util::get_bot_token)
        .context("no bot token configured (set telegram.token or BOT_TOKEN)")?;

    Ok(match telegram.and_then(|t| t.api_base.clone()) {
        Some(api_base) => TelegramNotifier::with_api_base(token, api_base),
        None => TelegramNotifier::new(token),
    })
}
