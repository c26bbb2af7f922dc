//! Store configuration.

use std::sync::Arc;

use crate::mutation::{Clock, SystemClock};

/// Store configuration options.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Emit a JSON dump of every written row at trace level.
    pub dump_rows: bool,
    /// Source of version timestamps.
    pub clock: Arc<dyn Clock>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dump_rows: false,
            clock: Arc::new(SystemClock::new()),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dump_rows flag.
    pub fn dump_rows(mut self, value: bool) -> Self {
        self.dump_rows = value;
        self
    }

    /// Use `clock` for version timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::ManualClock;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(!config.dump_rows);
        assert!(config.clock.now_nanos() > 0);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new()
            .dump_rows(true)
            .clock(Arc::new(ManualClock::starting_at(42)));

        assert!(config.dump_rows);
        assert_eq!(config.clock.now_nanos(), 42);
    }
}
