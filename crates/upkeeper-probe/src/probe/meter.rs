//! Gas metering
//!
//! A [`GasMeter`] captures a baseline when started and converts elapsed
//! wall-clock time into gas units when read. One nanosecond of metered work
//! is one gas unit.

use std::time::Instant;

use upkeeper_common::Gas;

/// Single-use meter for one delegated check.
#[derive(Debug, Clone)]
pub struct GasMeter {
    started: Instant,
}

impl GasMeter {
    /// Start a meter, capturing the baseline now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Gas consumed since the meter was started.
    ///
    /// A reading is never zero: the meter levies a floor charge of one unit
    /// for its own bookkeeping.
    pub fn consumed(&self) -> Gas {
        let nanos = self.started.elapsed().as_nanos();
        let units = u64::try_from(nanos).unwrap_or(u64::MAX);
        Gas::new(units.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_reading_is_never_zero() {
        let meter = GasMeter::start();
        assert!(meter.consumed().units() >= 1);
    }

    #[test]
    fn test_readings_do_not_decrease() {
        let meter = GasMeter::start();
        let first = meter.consumed();
        std::thread::sleep(Duration::from_millis(5));
        let second = meter.consumed();
        assert!(second >= first);
        // 5ms of sleep is at least 5M units
        assert!(second.units() >= 5_000_000);
    }
}
