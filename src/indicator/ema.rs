/// Exponential moving average parameterised by span (`alpha = 2 / (span + 1)`).
///
/// Seeded with the first value and updated on every push, so it produces a
/// value from the first observation onward. Early values lean toward the
/// seed until roughly `span` observations have been folded in.
#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    alpha: f64,
    ema: Option<f64>,
    samples: usize,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span > 0, "EMA span must be > 0");
        Self {
            span,
            alpha: 2.0 / (span as f64 + 1.0),
            ema: None,
            samples: 0,
        }
    }

    /// Push a new value and return the updated EMA.
    pub fn push(&mut self, value: f64) -> f64 {
        let next = match self.ema {
            Some(prev) => prev + (value - prev) * self.alpha,
            None => value,
        };
        self.ema = Some(next);
        self.samples += 1;
        next
    }

    pub fn value(&self) -> Option<f64> {
        self.ema
    }

    /// True once at least `span` values have been folded in.
    pub fn is_warm(&self) -> bool {
        self.samples >= self.span
    }
}
