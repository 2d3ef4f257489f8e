//! Tradeable symbol list for one venue.

use std::collections::HashMap;

use crate::config::{Config, SymbolNaming};
use crate::error::{AppError, FetchError};
use crate::exchange::MarketDataSource;
use crate::model::market::{Instrument, ListedSymbol, TickerSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    pub quote_asset: String,
    pub active_only: bool,
    pub perpetual_only: bool,
    pub min_quote_volume: Option<f64>,
    pub naming: SymbolNaming,
}

impl CatalogFilter {
    pub fn from_config(config: &Config) -> Self {
        Self {
            quote_asset: config.scanner.quote_asset.trim().to_ascii_uppercase(),
            active_only: true,
            perpetual_only: true,
            min_quote_volume: config.scanner.min_quote_volume_filter(),
            naming: config.exchange.symbol_naming,
        }
    }
}

/// Apply `filter` to a venue listing. Output is sorted by exchange id.
///
/// With a volume floor set, instruments missing from `tickers` are dropped:
/// a contract with no 24h ticker has no turnover to compare.
pub fn filter_instruments(
    instruments: &[Instrument],
    tickers: &[TickerSnapshot],
    filter: &CatalogFilter,
) -> Vec<ListedSymbol> {
    let turnover: HashMap<&str, f64> = tickers
        .iter()
        .map(|t| (t.symbol.as_str(), t.quote_volume_24h))
        .collect();

    let mut out: Vec<ListedSymbol> = instruments
        .iter()
        .filter(|i| i.quote_asset.eq_ignore_ascii_case(&filter.quote_asset))
        .filter(|i| !filter.active_only || i.trading)
        .filter(|i| !filter.perpetual_only || i.perpetual)
        .filter(|i| match filter.min_quote_volume {
            Some(floor) => turnover
                .get(i.symbol.as_str())
                .is_some_and(|v| *v >= floor),
            None => true,
        })
        .map(|i| ListedSymbol::new(i.symbol.clone(), i.label(filter.naming)))
        .collect();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out.dedup_by(|a, b| a.id == b.id);
    out
}

/// Query the venue and build the filtered catalog.
pub async fn load_catalog<S: MarketDataSource>(
    source: &S,
    filter: &CatalogFilter,
) -> Result<Vec<ListedSymbol>, AppError> {
    let instruments = source.instruments().await?;
    let tickers: Vec<TickerSnapshot> = match filter.min_quote_volume {
        Some(_) => source.tickers().await?,
        None => Vec::new(),
    };

    let listed = filter_instruments(&instruments, &tickers, filter);
    tracing::info!(
        venue = source.venue(),
        listed = instruments.len(),
        selected = listed.len(),
        quote = %filter.quote_asset,
        min_quote_volume = ?filter.min_quote_volume,
        "Market catalog loaded"
    );
    if listed.is_empty() {
        return Err(AppError::EmptyCatalog {
            quote: filter.quote_asset.clone(),
        });
    }
    Ok(listed)
}

/// Re-query the catalog, keeping `current` when the refresh fails.
pub async fn refresh_catalog<S: MarketDataSource>(
    source: &S,
    filter: &CatalogFilter,
    current: &mut Vec<ListedSymbol>,
) {
    match load_catalog(source, filter).await {
        Ok(fresh) => *current = fresh,
        Err(AppError::MarketData(FetchError::Api { code, msg, .. })) => {
            tracing::warn!(code, msg = %msg, kept = current.len(), "Catalog refresh rejected; keeping previous list");
        }
        Err(e) => {
            tracing::warn!(error = %e, kept = current.len(), "Catalog refresh failed; keeping previous list");
        }
    }
}
