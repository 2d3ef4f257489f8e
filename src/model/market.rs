use crate::config::SymbolNaming;

/// Venue-neutral view of one listed derivatives contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub base_asset: String,
    pub quote_asset: String,
    pub trading: bool,
    pub perpetual: bool,
}

impl Instrument {
    pub fn label(&self, naming: SymbolNaming) -> String {
        match naming {
            SymbolNaming::Native => self.symbol.clone(),
            SymbolNaming::Unified => format!("{}/{}", self.base_asset, self.quote_asset),
        }
    }
}

/// 24h ticker summary used for the liquidity filter.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSnapshot {
    pub symbol: String,
    pub quote_volume_24h: f64,
}

/// A catalog entry: exchange id for requests, label for reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListedSymbol {
    pub id: String,
    pub label: String,
}

impl ListedSymbol {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
