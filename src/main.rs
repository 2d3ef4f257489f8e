use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use perp_momentum_scanner::catalog::{refresh_catalog, CatalogFilter};
use perp_momentum_scanner::config::{Config, LoggingConfig, DEFAULT_CONFIG_PATH};
use perp_momentum_scanner::exchange::{ExchangeClient, MarketDataSource};
use perp_momentum_scanner::lifecycle::{PaperTrader, TickOutcome};
use perp_momentum_scanner::model::market::ListedSymbol;
use perp_momentum_scanner::report;
use perp_momentum_scanner::scanner::{scan_cycle, ScanParams};
use perp_momentum_scanner::strategy::{selector_for, SymbolSelector};

#[derive(Parser, Debug)]
#[command(name = "perp-momentum-scanner")]
#[command(about = "Rank USDT perpetuals by short-term momentum, or paper-trade a trend signal", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to configuration file (defaults to config/default.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Seconds to sleep between cycles (overrides scanner.scan_interval_seconds)
    #[arg(long, global = true)]
    interval: Option<u64>,

    /// Run a single cycle and exit
    #[arg(long, global = true)]
    once: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Rank symbols by momentum score every cycle (default)
    Scan,
    /// Hold at most one simulated position with TP/SL/time exits
    Paper,
}

fn init_tracing(cfg: &LoggingConfig) -> Result<()> {
    let directives = format!(
        "{},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn,h2=warn",
        cfg.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directives));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // stdout carries the reports; logs go to stderr or a file.
    match (cfg.file.as_deref(), cfg.json) {
        (Some(path), json) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path))?;
            let builder = builder.with_writer(Mutex::new(file)).with_ansi(false);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        }
        (None, true) => builder.with_writer(std::io::stderr).json().init(),
        (None, false) => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

async fn run_scan_cycle(
    client: &ExchangeClient,
    catalog: &[ListedSymbol],
    params: &ScanParams,
) {
    let outcome = scan_cycle(client, catalog, params).await;
    println!("{}", report::format_scan_report(&outcome, &params.timeframe));
}

async fn run_paper_tick(
    client: &ExchangeClient,
    catalog: &[ListedSymbol],
    trader: &mut PaperTrader<dyn SymbolSelector + Send>,
) {
    let now_ms = chrono::Utc::now().timestamp_millis().max(0) as u64;
    match trader.tick(client, catalog, now_ms).await {
        TickOutcome::Opened(trade) => println!("{}", report::format_trade_opened(&trade)),
        TickOutcome::Closed(closed) => println!("{}", report::format_trade_closed(&closed)),
        TickOutcome::Holding {
            label,
            price,
            return_pct,
        } => tracing::info!(symbol = %label, price, return_pct, "Holding paper trade"),
        TickOutcome::NoCandidate => tracing::warn!("No symbol available to open a paper trade"),
        TickOutcome::SignalUnavailable { label, reason } => {
            tracing::warn!(symbol = %label, reason = %reason, "No signal this tick")
        }
        // Already logged by the trader; the trade is re-evaluated next tick.
        TickOutcome::PriceUnavailable { .. } => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install rustls crypto provider (required by rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    let cli = Cli::parse();
    let mut config =
        Config::load_or_default(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH))?;
    if let Some(secs) = cli.interval {
        config
            .override_scan_interval(secs)
            .context("invalid --interval")?;
    }
    init_tracing(&config.logging)?;

    let mode = cli.command.unwrap_or(Commands::Scan);
    let client = ExchangeClient::from_config(&config.exchange)
        .context("failed to build exchange HTTP client")?;
    let filter = CatalogFilter::from_config(&config);
    let params = ScanParams::from(&config.scanner);
    let interval = Duration::from_secs(config.scanner.scan_interval_seconds);
    let mut trader: PaperTrader<dyn SymbolSelector + Send> =
        PaperTrader::from_config(&config, selector_for(config.paper.selection));

    tracing::info!(
        mode = ?mode,
        venue = client.venue(),
        base_url = %config.exchange.resolved_base_url(),
        timeframe = %config.scanner.timeframe,
        interval_secs = interval.as_secs(),
        "Starting perp-momentum-scanner"
    );

    let mut catalog: Vec<ListedSymbol> = Vec::new();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        let cycle = async {
            if catalog.is_empty() || config.scanner.refresh_catalog_each_cycle {
                refresh_catalog(&client, &filter, &mut catalog).await;
            }
            if catalog.is_empty() {
                tracing::warn!("Symbol catalog unavailable; retrying next cycle");
                return;
            }
            match mode {
                Commands::Scan => run_scan_cycle(&client, &catalog, &params).await,
                Commands::Paper => run_paper_tick(&client, &catalog, &mut trader).await,
            }
        };

        tokio::select! {
            _ = cycle => {}
            _ = &mut shutdown => {
                tracing::info!("Interrupted; discarding in-flight cycle");
                break;
            }
        }

        if cli.once {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = &mut shutdown => {
                tracing::info!("Interrupted; shutting down");
                break;
            }
        }
    }

    if let Some(trade) = trader.lifecycle().current() {
        tracing::info!(
            symbol = %trade.label,
            trade_id = %trade.trade_id,
            "Exiting with paper trade still open (not persisted)"
        );
    }
    Ok(())
}
