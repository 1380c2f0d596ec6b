//! Worker type.

use serde::{Deserialize, Serialize};

/// An available delivery worker.
///
/// One worker drives exactly one vehicle per candidate solution. The
/// `had_break` flag records whether the worker already took their shift
/// break; workers who have not yet had it may see their route start pushed
/// past the break window. Accumulated overtime is bookkeeping for payroll
/// reporting and does not feed back into route costs.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::Worker;
///
/// let mut w = Worker::new(7, false);
/// assert!(!w.had_break());
/// w.add_overtime(1.5);
/// assert!((w.overtime() - 1.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    id: usize,
    had_break: bool,
    overtime: f64,
}

impl Worker {
    /// Creates a new worker.
    pub fn new(id: usize, had_break: bool) -> Self {
        Self {
            id,
            had_break,
            overtime: 0.0,
        }
    }

    /// Worker ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Whether this worker already took their shift break.
    pub fn had_break(&self) -> bool {
        self.had_break
    }

    /// Accumulated overtime in hours.
    pub fn overtime(&self) -> f64 {
        self.overtime
    }

    /// Adds worked overtime hours to this worker's tally.
    pub fn add_overtime(&mut self, hours: f64) {
        self.overtime += hours;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_new() {
        let w = Worker::new(3, true);
        assert_eq!(w.id(), 3);
        assert!(w.had_break());
        assert_eq!(w.overtime(), 0.0);
    }

    #[test]
    fn test_worker_overtime_accumulates() {
        let mut w = Worker::new(0, false);
        w.add_overtime(0.5);
        w.add_overtime(2.0);
        assert!((w.overtime() - 2.5).abs() < 1e-10);
    }
}
