use serde::{Deserialize, Serialize};

/// Axis-aligned box in image pixel space, stored as top-left corner plus size.
///
/// Coordinates are not clipped to the image: a box may start at a negative
/// offset or extend past the right/bottom edge.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BvrBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub w: i32,
    pub h: i32,
}

impl BvrBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::default().with_x1y1_wh(x, y, w, h)
    }

    /// Returns the center x-coordinate of the bounding box.
    pub fn cx(&self) -> f32 {
        self.x1 as f32 + self.w as f32 / 2.
    }

    /// Returns the center y-coordinate of the bounding box.
    pub fn cy(&self) -> f32 {
        self.y1 as f32 + self.h as f32 / 2.
    }

    /// Returns the bounding box coordinates and size as `(x, y, w, h)`.
    pub fn xy1_wh(&self) -> (i32, i32, i32, i32) {
        (self.x1, self.y1, self.w, self.h)
    }

    /// Computes the area of the bounding box. Negative extents count as zero.
    pub fn area(&self) -> i64 {
        self.w.max(0) as i64 * self.h.max(0) as i64
    }

    /// Computes the intersection area between this bounding box and another.
    pub fn intersect(&self, other: &BvrBox) -> i64 {
        let left = self.x1.max(other.x1) as i64;
        let right = self.x2.min(other.x2) as i64;
        let top = self.y1.max(other.y1) as i64;
        let bottom = self.y2.min(other.y2) as i64;
        (right - left).max(0) * (bottom - top).max(0)
    }

    /// Computes the union area between this bounding box and another.
    pub fn union(&self, other: &BvrBox) -> i64 {
        self.area() + other.area() - self.intersect(other)
    }

    /// Computes the intersection over union (IoU) between this bounding box and another.
    ///
    /// Returns `0.0` when the union is empty, so two degenerate boxes never divide by zero.
    pub fn iou(&self, other: &BvrBox) -> f32 {
        let union = self.union(other);
        if union <= 0 {
            return 0.;
        }
        (self.intersect(other) as f64 / union as f64) as f32
    }

    /// Sets the bounding box's coordinates and dimensions using `(x, y, w, h)`.
    ///
    /// # Arguments
    ///
    /// * `x` - The x-coordinate of the top-left corner.
    /// * `y` - The y-coordinate of the top-left corner.
    /// * `w` - The width of the bounding box.
    /// * `h` - The height of the bounding box.
    ///
    /// # Returns
    ///
    /// A `BvrBox` instance with updated coordinates and dimensions.
    pub fn with_x1y1_wh(mut self, x: i32, y: i32, w: i32, h: i32) -> Self {
        self.x1 = x;
        self.y1 = y;
        self.w = w;
        self.h = h;

        self.x2 = x.saturating_add(w);
        self.y2 = y.saturating_add(h);
        self
    }
}
