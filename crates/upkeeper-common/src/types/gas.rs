//! Gas unit counting

/// Gas consumed by a delegated check, in probe gas units.
///
/// One unit corresponds to one nanosecond of metered wall-clock work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gas(u64);

impl Gas {
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    pub const fn units(self) -> u64 {
        self.0
    }
}

impl From<u64> for Gas {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl std::fmt::Display for Gas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
