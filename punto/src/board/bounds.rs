use serde::{Deserialize, Serialize};

/// A rectangle of cells represented by a min + max coordinate pair.
///
/// The two coordinates form an _inclusive_ 2D range, i.e. unlike in a
/// half-open range, it's possible for a point with `x == x_max`
/// to be contained in the area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x_min: i8,
    pub y_min: i8,
    pub x_max: i8,
    pub y_max: i8,
}

impl Bounds {
    pub fn contains(&self, x: i8, y: i8) -> bool {
        self.contains_x(x) && self.contains_y(y)
    }

    pub fn contains_x(&self, x: i8) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    pub fn contains_y(&self, y: i8) -> bool {
        y >= self.y_min && y <= self.y_max
    }

    /// The square of side `2 * radius + 1` centered on `(x, y)`.
    pub fn around(x: i8, y: i8, radius: i8) -> Self {
        Self {
            x_min: x - radius,
            y_min: y - radius,
            x_max: x + radius,
            y_max: y + radius,
        }
    }

    /// Number of columns covered.
    pub fn width(&self) -> i8 {
        self.x_max - self.x_min + 1
    }

    /// Number of rows covered.
    pub fn height(&self) -> i8 {
        self.y_max - self.y_min + 1
    }

    /// Whether `other` lies completely inside of `self`.
    pub fn encloses(&self, other: &Bounds) -> bool {
        self.contains(other.x_min, other.y_min) && self.contains(other.x_max, other.y_max)
    }

    /// Shrinks `self` so that it lies inside of `limit`.
    pub fn clamp_to(&mut self, limit: &Bounds) {
        self.x_min = self.x_min.max(limit.x_min);
        self.y_min = self.y_min.max(limit.y_min);
        self.x_max = self.x_max.min(limit.x_max);
        self.y_max = self.y_max.min(limit.y_max);
    }
}
