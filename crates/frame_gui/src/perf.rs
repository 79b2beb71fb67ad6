//! Render timing

use std::time::Instant;

/// Run `f` and log how long it took at debug level
pub fn measure<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    log::debug!("{} took {:.3} ms", label, start.elapsed().as_secs_f64() * 1000.0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_returns_value() {
        assert_eq!(measure("sum", || (1..=4).sum::<u32>()), 10);
    }
}
