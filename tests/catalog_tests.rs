mod support;

use perp_momentum_scanner::catalog::{filter_instruments, load_catalog, refresh_catalog, CatalogFilter};
use perp_momentum_scanner::config::{Config, SymbolNaming};
use perp_momentum_scanner::model::market::{Instrument, ListedSymbol, TickerSnapshot};
use perp_momentum_scanner::AppError;
use support::{perp, FakeMarket};

fn ticker(symbol: &str, quote_volume_24h: f64) -> TickerSnapshot {
    TickerSnapshot {
        symbol: symbol.to_string(),
        quote_volume_24h,
    }
}

fn listing() -> Vec<Instrument> {
    let mut halted = perp("OLDUSDT", "OLD", "USDT");
    halted.trading = false;
    let mut dated = perp("BTCUSDT-27DEC", "BTC", "USDT");
    dated.perpetual = false;
    vec![
        perp("SOLUSDT", "SOL", "USDT"),
        perp("BTCUSDT", "BTC", "USDT"),
        perp("ETHUSDT", "ETH", "USDT"),
        perp("BTCUSDC", "BTC", "USDC"),
        halted,
        dated,
    ]
}

fn liquidity() -> Vec<TickerSnapshot> {
    vec![
        ticker("BTCUSDT", 2.0e9),
        ticker("ETHUSDT", 4.0e6),
        ticker("BTCUSDC", 9.0e9),
        ticker("OLDUSDT", 9.0e9),
        ticker("BTCUSDT-27DEC", 9.0e9),
    ]
}

fn filter(min_quote_volume: Option<f64>, naming: SymbolNaming) -> CatalogFilter {
    CatalogFilter {
        quote_asset: "USDT".to_string(),
        active_only: true,
        perpetual_only: true,
        min_quote_volume,
        naming,
    }
}

#[test]
fn keeps_active_quote_perpetuals_sorted() {
    let out = filter_instruments(&listing(), &[], &filter(None, SymbolNaming::Native));
    let ids: Vec<&str> = out.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    assert!(out.iter().all(|s| s.id == s.label));
}

#[test]
fn volume_floor_drops_thin_and_unticked_symbols() {
    let out = filter_instruments(
        &listing(),
        &liquidity(),
        &filter(Some(5.0e6), SymbolNaming::Unified),
    );
    // ETH is under the floor, SOL has no ticker at all.
    assert_eq!(out, vec![ListedSymbol::new("BTCUSDT", "BTC/USDT")]);
}

#[test]
fn filter_from_config_follows_scanner_settings() {
    let mut cfg = Config::default();
    cfg.scanner.quote_asset = " usdt ".to_string();
    cfg.scanner.min_quote_volume = 0.0;
    let f = CatalogFilter::from_config(&cfg);
    assert_eq!(f.quote_asset, "USDT");
    assert_eq!(f.min_quote_volume, None);
    assert_eq!(f.naming, SymbolNaming::Unified);
}

#[tokio::test]
async fn load_catalog_applies_the_filter() {
    let market = FakeMarket {
        instruments: listing(),
        tickers: liquidity(),
        ..FakeMarket::default()
    };
    let out = load_catalog(&market, &filter(Some(1.0e6), SymbolNaming::Unified))
        .await
        .unwrap();
    let labels: Vec<&str> = out.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["BTC/USDT", "ETH/USDT"]);
}

#[tokio::test]
async fn nothing_passing_is_an_error() {
    let market = FakeMarket {
        instruments: vec![perp("BTCUSDC", "BTC", "USDC")],
        ..FakeMarket::default()
    };
    let err = load_catalog(&market, &filter(None, SymbolNaming::Native))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyCatalog { ref quote } if quote == "USDT"));
}

#[tokio::test]
async fn failed_refresh_keeps_the_previous_list() {
    let market = FakeMarket::default();
    let mut current = vec![ListedSymbol::new("BTCUSDT", "BTC/USDT")];
    refresh_catalog(&market, &filter(None, SymbolNaming::Unified), &mut current).await;
    assert_eq!(current.len(), 1);

    let market = FakeMarket {
        instruments: listing(),
        ..FakeMarket::default()
    };
    refresh_catalog(&market, &filter(None, SymbolNaming::Unified), &mut current).await;
    assert_eq!(current.len(), 3);
}
