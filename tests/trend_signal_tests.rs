mod support;

use perp_momentum_scanner::model::candle::Candle;
use perp_momentum_scanner::model::signal::Direction;
use perp_momentum_scanner::strategy::TrendSignalGenerator;
use support::flat_volume;

fn series(f: impl Fn(usize) -> f64, len: usize) -> Vec<f64> {
    (0..len).map(f).collect()
}

#[test]
fn rising_closes_go_long_with_range_stop() {
    let window = flat_volume(&series(|i| 100.0 + i as f64, 60));
    let sig = TrendSignalGenerator::default()
        .signal("BTCUSDT", &window, 1_000)
        .unwrap();

    assert_eq!(sig.direction, Direction::Long);
    assert_eq!(sig.symbol, "BTCUSDT");
    assert_eq!(sig.opened_at_ms, 1_000);
    assert!((sig.entry - 159.0).abs() < 1e-9);
    assert!((sig.stop_loss - 157.0).abs() < 1e-9);
    assert!((sig.take_profit - 163.0).abs() < 1e-9);
}

#[test]
fn falling_closes_go_short() {
    let window = flat_volume(&series(|i| 200.0 - i as f64, 60));
    let sig = TrendSignalGenerator::default()
        .signal("ETHUSDT", &window, 0)
        .unwrap();

    assert_eq!(sig.direction, Direction::Short);
    assert!((sig.entry - 141.0).abs() < 1e-9);
    assert!((sig.stop_loss - 143.0).abs() < 1e-9);
    assert!((sig.take_profit - 137.0).abs() < 1e-9);
    assert!(sig.take_profit < sig.entry && sig.entry < sig.stop_loss);
}

#[test]
fn equal_averages_resolve_to_short() {
    let window = flat_volume(&vec![42.0; 60]);
    let sig = TrendSignalGenerator::default()
        .signal("FLATUSDT", &window, 0)
        .unwrap();
    assert_eq!(sig.direction, Direction::Short);
}

#[test]
fn window_shorter_than_slow_span_still_signals() {
    let window = flat_volume(&series(|i| 10.0 + i as f64 * 0.5, 30));
    let sig = TrendSignalGenerator::default()
        .signal("SOLUSDT", &window, 0)
        .unwrap();
    assert_eq!(sig.direction, Direction::Long);
    assert!((sig.entry - 24.5).abs() < 1e-9);
}

#[test]
fn reward_is_a_fixed_multiple_of_risk() {
    let window = flat_volume(&series(|i| 50.0 + (i as f64 * 0.3).sin() * 4.0, 80));
    for rr in [1.5, 3.0] {
        let generator = TrendSignalGenerator::new(20, 50, 14, rr);
        let sig = generator.signal("XRPUSDT", &window, 0).unwrap();
        assert!(sig.risk_distance() > 0.0);
        assert!((sig.reward_distance() - rr * sig.risk_distance()).abs() < 1e-9);
        assert_eq!(generator.risk_reward(), rr);
    }
}

#[test]
fn empty_window_has_no_signal() {
    assert!(TrendSignalGenerator::default().signal("X", &[], 0).is_none());
}

#[test]
fn zero_range_window_has_no_signal() {
    let window: Vec<Candle> = (0..60)
        .map(|i| Candle {
            open_time: i * 300_000,
            open: 5.0,
            high: 5.0,
            low: 5.0,
            close: 5.0,
            volume: 10.0,
        })
        .collect();
    assert!(TrendSignalGenerator::default().signal("DEADUSDT", &window, 0).is_none());
}

#[test]
#[should_panic(expected = "indicator periods must be > 0")]
fn zero_period_is_rejected() {
    TrendSignalGenerator::new(20, 0, 14, 2.0);
}
