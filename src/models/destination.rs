//! Delivery destination type.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// A delivery destination (or the depot) on the integer grid.
///
/// Destinations are immutable after creation and are referenced by their
/// index in the problem's destination sequence; the `id` is carried only for
/// reporting. The `last` flag marks the final package of a customer order.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Destination, Timestamp};
///
/// let depot = Destination::depot(20, 30);
/// let d = Destination::new(1, 5, 12, Timestamp::from_hm(14, 0));
/// assert_eq!(d.id(), 1);
/// assert!(!d.is_last());
/// assert!((depot.distance_to(&d) - 33.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    id: usize,
    x: i32,
    y: i32,
    deadline: Timestamp,
    last: bool,
}

impl Destination {
    /// Creates a new destination with a delivery deadline.
    pub fn new(id: usize, x: i32, y: i32, deadline: Timestamp) -> Self {
        Self {
            id,
            x,
            y,
            deadline,
            last: false,
        }
    }

    /// Creates the depot at the given coordinates (no deadline).
    pub fn depot(x: i32, y: i32) -> Self {
        Self::new(0, x, y, Timestamp::MAX)
    }

    /// Marks this destination as the last package of its order.
    pub fn mark_last(mut self) -> Self {
        self.last = true;
        self
    }

    /// Destination ID (reporting only; routing uses sequence indices).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Delivery deadline.
    pub fn deadline(&self) -> Timestamp {
        self.deadline
    }

    /// Whether this is the last package of its order.
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Manhattan distance to another destination.
    pub fn distance_to(&self, other: &Destination) -> f64 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx + dy) as f64
    }
}
