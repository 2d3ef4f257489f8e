/// Trailing mean over at most `period` values, backed by a ring buffer.
///
/// Before the buffer fills, `mean` averages whatever has been pushed so far,
/// which gives short histories a usable (if noisier) value instead of nothing.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
    sum: f64,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "SMA period must be > 0");
        Self {
            period,
            buffer: vec![0.0; period],
            head: 0,
            count: 0,
            sum: 0.0,
        }
    }

    /// Push a value and return the trailing mean.
    pub fn push(&mut self, value: f64) -> f64 {
        if self.count >= self.period {
            self.sum -= self.buffer[self.head];
        } else {
            self.count += 1;
        }
        self.buffer[self.head] = value;
        self.sum += value;
        self.head = (self.head + 1) % self.period;
        self.sum / self.count as f64
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

}
