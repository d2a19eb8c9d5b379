//! Per-side touch intervals recorded on an item.

/// A `[min, max]` interval along one side of an item, normalized to the side
/// length.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactRange {
    min: f64,
    max: f64,
}

impl ContactRange {
    pub fn new(min: f64, max: f64) -> Self {
        ContactRange { min, max }
    }

    /// The whole side.
    pub fn full() -> Self {
        ContactRange::new(0.0, 1.0)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn set_min(&mut self, min: f64) {
        self.min = min;
    }

    pub fn set_max(&mut self, max: f64) {
        self.max = max;
    }

    pub fn set(&mut self, min: f64, max: f64) {
        self.min = min;
        self.max = max;
    }

    pub fn empty(&self) -> bool {
        self.max <= self.min
    }

    pub fn clear(&mut self) {
        self.min = 0.0;
        self.max = 0.0;
    }
}

/// The contacts of an item on its four sides, plus the interior contact flag
/// raised when another item ended up inside it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactInfo {
    left: ContactRange,
    right: ContactRange,
    top: ContactRange,
    bottom: ContactRange,
    middle: bool,
}

impl ContactInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn left_contact(&self) -> ContactRange {
        self.left
    }

    pub fn right_contact(&self) -> ContactRange {
        self.right
    }

    pub fn top_contact(&self) -> ContactRange {
        self.top
    }

    pub fn bottom_contact(&self) -> ContactRange {
        self.bottom
    }

    pub fn has_left_contact(&self) -> bool {
        !self.left.empty()
    }

    pub fn has_right_contact(&self) -> bool {
        !self.right.empty()
    }

    pub fn has_top_contact(&self) -> bool {
        !self.top.empty()
    }

    pub fn has_bottom_contact(&self) -> bool {
        !self.bottom.empty()
    }

    pub fn has_middle_contact(&self) -> bool {
        self.middle
    }

    pub fn has_side_contact(&self) -> bool {
        self.has_left_contact()
            || self.has_right_contact()
            || self.has_top_contact()
            || self.has_bottom_contact()
    }

    pub fn has_contact(&self) -> bool {
        self.has_side_contact() || self.has_middle_contact()
    }

    pub fn set_left_contact(&mut self, min: f64, max: f64) {
        self.left.set(min, max);
    }

    pub fn set_right_contact(&mut self, min: f64, max: f64) {
        self.right.set(min, max);
    }

    pub fn set_top_contact(&mut self, min: f64, max: f64) {
        self.top.set(min, max);
    }

    pub fn set_bottom_contact(&mut self, min: f64, max: f64) {
        self.bottom.set(min, max);
    }

    pub fn set_middle_contact(&mut self, contact: bool) {
        self.middle = contact;
    }

    pub fn clear_left_contact(&mut self) {
        self.left.clear();
    }

    pub fn clear_right_contact(&mut self) {
        self.right.clear();
    }

    pub fn clear_top_contact(&mut self) {
        self.top.clear();
    }

    pub fn clear_bottom_contact(&mut self) {
        self.bottom.clear();
    }

    pub fn clear_contacts(&mut self) {
        self.left.clear();
        self.right.clear();
        self.top.clear();
        self.bottom.clear();
        self.middle = false;
    }
}
