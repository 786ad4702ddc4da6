//! Period-over-period comparison.

use serde::Serialize;
use utoipa::ToSchema;

/// Which way a count moved relative to the prior period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Direction {
    Up,
    Down,
    Same,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub direction: Direction,
    /// Absolute change as a percentage of the prior count; `None` when the
    /// prior count is zero.
    pub percent: Option<f64>,
}

/// Compares `current` against `prior`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compare(current: u64, prior: u64) -> Comparison {
    let direction = match current.cmp(&prior) {
        std::cmp::Ordering::Greater => Direction::Up,
        std::cmp::Ordering::Less => Direction::Down,
        std::cmp::Ordering::Equal => Direction::Same,
    };
    let percent = (prior != 0).then(|| current.abs_diff(prior) as f64 / prior as f64 * 100.0);
    Comparison { direction, percent }
}
