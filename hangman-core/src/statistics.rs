use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

/// Cache key holding the formatted average of remaining moves
pub const MOVES_REMAINING_KEY: &str = "MOVES_REMAINING";

/// Mean of the given remaining-mistake counts, `None` when there are none
pub fn average_remaining(remaining: &[i32]) -> Option<f64> {
    if remaining.is_empty() {
        return None;
    }
    let total: i64 = remaining.iter().map(|&r| i64::from(r)).sum();
    Some(total as f64 / remaining.len() as f64)
}

pub fn format_average(average: f64) -> String {
    format!("The average moves remaining is {:.2}", average)
}

/// Process-wide slot for derived statistics.
///
/// Starts empty and only changes through [`StatisticsCache::recompute`];
/// nothing invalidates it implicitly.
#[derive(Debug, Default)]
pub struct StatisticsCache {
    entries: RwLock<HashMap<&'static str, String>>,
}

impl StatisticsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached average with one computed from `remaining`.
    ///
    /// With no in-progress games the previous value is kept and `None` is
    /// returned.
    pub fn recompute(&self, remaining: &[i32]) -> Option<String> {
        let average = average_remaining(remaining)?;
        let message = format_average(average);

        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(MOVES_REMAINING_KEY, message.clone());

        debug!(games = remaining.len(), average, "Cached average moves remaining");
        Some(message)
    }

    /// Last computed value, or an empty string if nothing was computed yet
    pub fn read(&self) -> String {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(MOVES_REMAINING_KEY)
            .cloned()
            .unwrap_or_default()
    }
}
