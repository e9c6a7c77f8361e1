//! Shared, atomically updatable severity threshold

use super::log_level::LogLevel;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Minimum enabled severity for one context lineage.
///
/// Cloning produces another handle on the same cell, so a change made
/// through any clone is observed by every holder.
///
/// # Example
///
/// ```
/// use rust_context_logger::{LevelController, LogLevel};
///
/// let level = LevelController::new(LogLevel::Info);
/// let shared = level.clone();
///
/// shared.set_level(LogLevel::Error);
/// assert!(!level.enabled(LogLevel::Warn));
/// ```
#[derive(Clone)]
pub struct LevelController {
    threshold: Arc<AtomicU8>,
}

impl LevelController {
    pub fn new(level: LogLevel) -> Self {
        Self {
            threshold: Arc::new(AtomicU8::new(level.as_u8())),
        }
    }

    /// Current threshold
    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.threshold.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.threshold.store(level.as_u8(), Ordering::Release);
    }

    /// Whether `level` is at or above the current threshold
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level.is_enabled_at(self.level())
    }

    /// Whether both handles point at the same cell
    pub fn same_lineage(&self, other: &LevelController) -> bool {
        Arc::ptr_eq(&self.threshold, &other.threshold)
    }
}

impl Default for LevelController {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

impl fmt::Debug for LevelController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelController")
            .field("level", &self.level())
            .finish()
    }
}
