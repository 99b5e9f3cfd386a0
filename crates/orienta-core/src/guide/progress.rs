//! Completion progress of a guide.

use serde::Serialize;
use std::fmt;

use super::DayEntry;

/// Completed days over total days, with a percentage rounded down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

impl Progress {
    pub fn from_days(days: &[DayEntry]) -> Self {
        let total = days.len();
        let completed = days.iter().filter(|day| day.completed).count();
        let percent = if total == 0 {
            0
        } else {
            (completed * 100 / total) as u8
        };
        Self {
            completed,
            total,
            percent,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} days ({}%)", self.completed, self.total, self.percent)
    }
}
