use rand::seq::SliceRandom;

use crate::config::SelectionPolicy;
use crate::model::market::ListedSymbol;

/// Picks the symbol a new paper trade is opened on.
pub trait SymbolSelector {
    fn select<'a>(&mut self, candidates: &'a [ListedSymbol]) -> Option<&'a ListedSymbol>;
}

/// Uniform random choice over every candidate.
#[derive(Debug, Default)]
pub struct RandomSelector;

impl SymbolSelector for RandomSelector {
    fn select<'a>(&mut self, candidates: &'a [ListedSymbol]) -> Option<&'a ListedSymbol> {
        candidates.choose(&mut rand::thread_rng())
    }
}

/// Walks the candidate list in order, wrapping around.
#[derive(Debug, Default)]
pub struct RoundRobinSelector {
    next: usize,
}

impl SymbolSelector for RoundRobinSelector {
    fn select<'a>(&mut self, candidates: &'a [ListedSymbol]) -> Option<&'a ListedSymbol> {
        if candidates.is_empty() {
            return None;
        }
        let idx = self.next % candidates.len();
        self.next = idx + 1;
        candidates.get(idx)
    }
}

pub fn selector_for(policy: SelectionPolicy) -> Box<dyn SymbolSelector + Send> {
    match policy {
        SelectionPolicy::Random => Box::new(RandomSelector),
        SelectionPolicy::RoundRobin => Box::<RoundRobinSelector>::default(),
    }
}
