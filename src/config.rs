use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::error::AppError;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const REST_BASE_URL_ENV: &str = "SCANNER_REST_BASE_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exchange: ExchangeConfig,
    pub scanner: ScannerConfig,
    pub paper: PaperConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Venue {
    #[default]
    Bybit,
    BinanceFutures,
}

impl Venue {
    pub fn default_rest_base_url(self) -> &'static str {
        match self {
            Venue::Bybit => "https://api.bybit.com",
            Venue::BinanceFutures => "https://fapi.binance.com",
        }
    }
}

/// How symbols are labelled in reports. Requests always use the exchange id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolNaming {
    /// `BTCUSDT`
    Native,
    /// `BTC/USDT`
    #[default]
    Unified,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeConfig {
    pub venue: Venue,
    /// Empty means the venue's public endpoint.
    pub rest_base_url: String,
    pub symbol_naming: SymbolNaming,
    pub request_timeout_secs: u64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            venue: Venue::default(),
            rest_base_url: String::new(),
            symbol_naming: SymbolNaming::default(),
            request_timeout_secs: 10,
        }
    }
}

impl ExchangeConfig {
    pub fn resolved_base_url(&self) -> String {
        let trimmed = self.rest_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            self.venue.default_rest_base_url().to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub scan_interval_seconds: u64,
    pub timeframe: String,
    pub candle_limit: usize,
    pub top_n: usize,
    /// 24h quote turnover floor. Zero or negative disables the filter.
    pub min_quote_volume: f64,
    pub quote_asset: String,
    pub fetch_concurrency: usize,
    pub refresh_catalog_each_cycle: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            scan_interval_seconds: 20,
            timeframe: "5m".to_string(),
            candle_limit: 30,
            top_n: 10,
            min_quote_volume: 5_000_000.0,
            quote_asset: "USDT".to_string(),
            fetch_concurrency: 8,
            refresh_catalog_each_cycle: false,
        }
    }
}

impl ScannerConfig {
    pub fn min_quote_volume_filter(&self) -> Option<f64> {
        (self.min_quote_volume > 0.0).then_some(self.min_quote_volume)
    }

    pub fn timeframe_ms(&self) -> Result<u64> {
        parse_interval_ms(&self.timeframe)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    #[default]
    Random,
    RoundRobin,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaperConfig {
    pub risk_reward: f64,
    pub hold_minutes: u64,
    /// Candles fetched when opening a trade; the slow EMA warms up progressively
    /// when fewer than `slow_span` are available.
    pub signal_candle_limit: usize,
    pub fast_span: usize,
    pub slow_span: usize,
    pub atr_period: usize,
    pub selection: SelectionPolicy,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            risk_reward: 2.0,
            hold_minutes: 15,
            signal_candle_limit: 100,
            fast_span: 20,
            slow_span: 50,
            atr_period: 14,
            selection: SelectionPolicy::default(),
        }
    }
}

impl PaperConfig {
    pub fn hold_ms(&self) -> u64 {
        self.hold_minutes.saturating_mul(60_000)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    /// When set, logs go to this file and stdout carries only the reports.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

/// Parse a kline interval string (e.g. "1s", "5m", "1h", "1d", "1w", "1M") into milliseconds.
pub fn parse_interval_ms(s: &str) -> Result<u64> {
    if s.len() < 2 {
        bail!("invalid interval '{}': expected format like '5m'", s);
    }

    let (num_str, suffix) = s.split_at(s.len() - 1);
    let n: u64 = num_str.parse().with_context(|| {
        format!(
            "invalid interval '{}': quantity must be a positive integer",
            s
        )
    })?;
    if n == 0 {
        bail!("invalid interval '{}': quantity must be > 0", s);
    }

    let unit_ms = match suffix {
        "s" => 1_000,
        "m" => 60_000,
        "h" => 3_600_000,
        "d" => 86_400_000,
        "w" => 7 * 86_400_000,
        "M" => 30 * 86_400_000,
        _ => bail!(
            "invalid interval '{}': unsupported suffix '{}', expected one of s/m/h/d/w/M",
            s,
            suffix
        ),
    };

    n.checked_mul(unit_ms)
        .with_context(|| format!("invalid interval '{}': value is too large", s))
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to load {}", path.display()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load `path` if given, else `default_path` if it exists, else built-in
    /// defaults. Environment overrides apply in every case.
    pub fn load_or_default(path: Option<&Path>, default_path: &Path) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None if default_path.exists() => Self::load(default_path),
            None => {
                dotenvy::dotenv().ok();
                let mut config = Self::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(REST_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.exchange.rest_base_url = url;
            }
        }
    }

    /// Replace the scan interval (e.g. from the command line) and re-validate.
    pub fn override_scan_interval(&mut self, secs: u64) -> Result<(), AppError> {
        self.scanner.scan_interval_seconds = secs;
        self.validate()
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let scanner = &self.scanner;
        self.scanner
            .timeframe_ms()
            .map_err(|e| AppError::Config(format!("scanner.timeframe: {:#}", e)))?;
        if scanner.scan_interval_seconds == 0 {
            return Err(AppError::Config(
                "scanner.scan_interval_seconds must be > 0".to_string(),
            ));
        }
        if scanner.top_n == 0 {
            return Err(AppError::Config("scanner.top_n must be > 0".to_string()));
        }
        if scanner.candle_limit < crate::scanner::MIN_WINDOW_LEN {
            return Err(AppError::Config(format!(
                "scanner.candle_limit must be >= {}",
                crate::scanner::MIN_WINDOW_LEN
            )));
        }
        if scanner.fetch_concurrency == 0 {
            return Err(AppError::Config(
                "scanner.fetch_concurrency must be > 0".to_string(),
            ));
        }
        if scanner.quote_asset.trim().is_empty() {
            return Err(AppError::Config(
                "scanner.quote_asset must not be empty".to_string(),
            ));
        }

        let paper = &self.paper;
        if !(paper.risk_reward.is_finite() && paper.risk_reward > 0.0) {
            return Err(AppError::Config(
                "paper.risk_reward must be a positive number".to_string(),
            ));
        }
        if paper.hold_minutes == 0 {
            return Err(AppError::Config("paper.hold_minutes must be > 0".to_string()));
        }
        if paper.fast_span == 0 || paper.slow_span == 0 || paper.atr_period == 0 {
            return Err(AppError::Config(
                "paper.fast_span, paper.slow_span and paper.atr_period must be > 0".to_string(),
            ));
        }
        if paper.signal_candle_limit == 0 {
            return Err(AppError::Config(
                "paper.signal_candle_limit must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
