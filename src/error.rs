use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("market data error: {0}")]
    MarketData(#[from] FetchError),

    #[error("catalog is empty: no {quote} perpetuals passed the filter")]
    EmptyCatalog { quote: String },
}

/// Failure of a single market-data request. Callers skip the affected symbol
/// for the current cycle and retry naturally on the next one.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{venue} rejected request (code {code}): {msg}")]
    Api {
        venue: &'static str,
        code: i64,
        msg: String,
    },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),
}

impl FetchError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::Malformed(detail.into())
    }
}
