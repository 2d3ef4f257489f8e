use perp_momentum_scanner::config::{Config, SelectionPolicy, SymbolNaming, Venue};

const FULL: &str = r#"
[exchange]
venue = "binance_futures"
rest_base_url = "http://localhost:8080/"
symbol_naming = "native"
request_timeout_secs = 5

[scanner]
scan_interval_seconds = 60
timeframe = "15m"
candle_limit = 40
top_n = 5
min_quote_volume = 0.0
quote_asset = "USDT"
fetch_concurrency = 4
refresh_catalog_each_cycle = true

[paper]
risk_reward = 1.5
hold_minutes = 30
signal_candle_limit = 120
fast_span = 10
slow_span = 30
atr_period = 7
selection = "round_robin"

[logging]
level = "debug"
json = true
file = "scanner.log"
"#;

#[test]
fn parses_every_section() {
    let cfg = Config::from_toml_str(FULL).unwrap();

    assert_eq!(cfg.exchange.venue, Venue::BinanceFutures);
    assert_eq!(cfg.exchange.resolved_base_url(), "http://localhost:8080");
    assert_eq!(cfg.exchange.symbol_naming, SymbolNaming::Native);
    assert_eq!(cfg.exchange.request_timeout_secs, 5);

    assert_eq!(cfg.scanner.scan_interval_seconds, 60);
    assert_eq!(cfg.scanner.timeframe_ms().unwrap(), 900_000);
    assert_eq!(cfg.scanner.candle_limit, 40);
    assert_eq!(cfg.scanner.top_n, 5);
    assert_eq!(cfg.scanner.min_quote_volume_filter(), None);
    assert_eq!(cfg.scanner.fetch_concurrency, 4);
    assert!(cfg.scanner.refresh_catalog_each_cycle);

    assert_eq!(cfg.paper.risk_reward, 1.5);
    assert_eq!(cfg.paper.hold_ms(), 1_800_000);
    assert_eq!(cfg.paper.signal_candle_limit, 120);
    assert_eq!((cfg.paper.fast_span, cfg.paper.slow_span, cfg.paper.atr_period), (10, 30, 7));
    assert_eq!(cfg.paper.selection, SelectionPolicy::RoundRobin);

    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.file.as_deref(), Some("scanner.log"));
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let cfg = Config::from_toml_str("[scanner]\ntop_n = 3\n").unwrap();
    assert_eq!(cfg.scanner.top_n, 3);
    assert_eq!(cfg.scanner.scan_interval_seconds, 20);
    assert_eq!(cfg.scanner.timeframe, "5m");
    assert_eq!(cfg.scanner.candle_limit, 30);
    assert_eq!(cfg.scanner.min_quote_volume_filter(), Some(5_000_000.0));
    assert_eq!(cfg.exchange.venue, Venue::Bybit);
    assert_eq!(cfg.exchange.resolved_base_url(), "https://api.bybit.com");
    assert_eq!(cfg.paper.hold_ms(), 900_000);
    assert_eq!(cfg.paper.risk_reward, 2.0);
    assert_eq!(cfg.paper.selection, SelectionPolicy::Random);
}

#[test]
fn empty_document_is_the_default_config() {
    let cfg = Config::from_toml_str("").unwrap();
    assert_eq!(cfg.scanner.top_n, 10);
    assert_eq!(cfg.logging.level, "info");
    assert!(cfg.validate().is_ok());
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        ("[scanner]\ntop_n = 0\n", "top_n"),
        ("[scanner]\ntimeframe = \"5x\"\n", "timeframe"),
        ("[scanner]\ncandle_limit = 9\n", "candle_limit"),
        ("[scanner]\nscan_interval_seconds = 0\n", "scan_interval_seconds"),
        ("[scanner]\nfetch_concurrency = 0\n", "fetch_concurrency"),
        ("[scanner]\nquote_asset = \"\"\n", "quote_asset"),
        ("[paper]\nrisk_reward = -1.0\n", "risk_reward"),
        ("[paper]\nhold_minutes = 0\n", "hold_minutes"),
        ("[paper]\nslow_span = 0\n", "slow_span"),
    ];
    for (toml, field) in cases {
        let err = Config::from_toml_str(toml).unwrap_err();
        assert!(
            format!("{:#}", err).contains(field),
            "{} should mention {}: {:#}",
            toml.trim(),
            field,
            err
        );
    }
}

#[test]
fn unknown_enum_value_fails_to_parse() {
    assert!(Config::from_toml_str("[exchange]\nvenue = \"kraken\"\n").is_err());
}

#[test]
fn load_reads_a_file() {
    let path = std::env::temp_dir().join(format!("scanner-config-{}.toml", std::process::id()));
    std::fs::write(&path, "[scanner]\ntop_n = 7\n").unwrap();
    let cfg = Config::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(cfg.scanner.top_n, 7);

    assert!(Config::load(std::path::Path::new("/definitely/not/here.toml")).is_err());
}

#[test]
fn env_override_applies_without_a_config_file() {
    use perp_momentum_scanner::config::REST_BASE_URL_ENV;

    let missing = std::env::temp_dir().join(format!("no-such-dir-{}/default.toml", std::process::id()));
    std::env::set_var(REST_BASE_URL_ENV, "http://127.0.0.1:9999");
    let cfg = Config::load_or_default(None, &missing);
    std::env::remove_var(REST_BASE_URL_ENV);

    let cfg = cfg.unwrap();
    assert_eq!(cfg.exchange.resolved_base_url(), "http://127.0.0.1:9999");
    assert_eq!(cfg.scanner.top_n, 10);
}

#[test]
fn interval_override_is_validated() {
    let mut cfg = Config::default();
    assert!(cfg.override_scan_interval(45).is_ok());
    assert_eq!(cfg.scanner.scan_interval_seconds, 45);

    let err = cfg.override_scan_interval(0).unwrap_err();
    assert!(err.to_string().contains("scan_interval_seconds"));
}
