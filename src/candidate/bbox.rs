//! Center-size bounding boxes and their overlap measures.

/// Axis-aligned box stored as center and size in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Horizontal center.
    pub center_x: f32,
    /// Vertical center.
    pub center_y: f32,
    /// Full width.
    pub width: f32,
    /// Full height.
    pub height: f32,
}

impl BoundingBox {
    /// Creates a box from its center and size.
    pub const fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self {
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Left edge (`center_x - width / 2`).
    pub fn left(&self) -> f32 {
        self.center_x - self.width / 2.0
    }

    /// Top edge.
    pub fn top(&self) -> f32 {
        self.center_y - self.height / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.center_x + self.width / 2.0
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.center_y + self.height / 2.0
    }

    /// Whether the box encloses any area.
    ///
    /// Zero, negative and non-finite extents (as produced by a malformed
    /// tensor) count as empty.
    pub fn is_empty(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        !(positive(self.width) && positive(self.height))
            || !self.center_x.is_finite()
            || !self.center_y.is_finite()
    }

    /// Area in square pixels; empty boxes have zero area.
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.width * self.height
    }

    /// Area shared with `other`.
    pub fn intersection_area(&self, other: &BoundingBox) -> f32 {
        if self.is_empty() || other.is_empty() {
            return 0.0;
        }
        let w = self.right().min(other.right()) - self.left().max(other.left());
        let h = self.bottom().min(other.bottom()) - self.top().max(other.top());
        if w <= 0.0 || h <= 0.0 {
            return 0.0;
        }
        w * h
    }

    /// Intersection over union with `other`, in `[0, 1]`.
    ///
    /// Returns 0 whenever either box is empty or the union vanishes, so the
    /// ratio is always finite.
    pub fn iou(&self, other: &BoundingBox) -> f32 {
        let intersection = self.intersection_area(other);
        if intersection <= 0.0 {
            return 0.0;
        }
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        let ratio = intersection / union;
        if ratio.is_finite() {
            ratio.min(1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BoundingBox;

    #[test]
    fn corners_follow_center_and_size() {
        let b = BoundingBox::new(10.0, 20.0, 4.0, 6.0);
        assert_eq!(b.left(), 8.0);
        assert_eq!(b.right(), 12.0);
        assert_eq!(b.top(), 17.0);
        assert_eq!(b.bottom(), 23.0);
        assert_eq!(b.area(), 24.0);
    }

    #[test]
    fn identical_boxes_overlap_fully() {
        let b = BoundingBox::new(10.0, 10.0, 20.0, 20.0);
        assert!((b.iou(&b) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn half_shifted_boxes_have_one_third_iou() {
        let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BoundingBox::new(1.0, 0.0, 2.0, 2.0);
        assert!((a.intersection_area(&b) - 2.0).abs() < 1e-6);
        assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);
        assert!((b.iou(&a) - a.iou(&b)).abs() < 1e-6);
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BoundingBox::new(2.0, 0.0, 2.0, 2.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn degenerate_boxes_never_overlap() {
        let good = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let degenerate = [
            BoundingBox::new(0.0, 0.0, 0.0, 10.0),
            BoundingBox::new(0.0, 0.0, -10.0, 10.0),
            BoundingBox::new(0.0, 0.0, f32::NAN, 10.0),
            BoundingBox::new(0.0, 0.0, f32::INFINITY, f32::INFINITY),
            BoundingBox::new(f32::NAN, 0.0, 10.0, 10.0),
        ];
        for bad in degenerate {
            assert_eq!(bad.area(), 0.0);
            assert_eq!(good.iou(&bad), 0.0);
            assert_eq!(bad.iou(&good), 0.0);
            assert_eq!(bad.iou(&bad), 0.0);
        }
    }
}
