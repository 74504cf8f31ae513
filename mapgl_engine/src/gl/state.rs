/// Cached driver state value
///
/// Mirrors one piece of global driver state so redundant driver calls can be
/// skipped. A value marked dirty is always re-applied on the next update.

#[derive(Debug, Clone, Copy)]
pub struct State<T: Copy + PartialEq> {
    current: T,
    dirty: bool,
}

impl<T: Copy + PartialEq> State<T> {
    /// Cache the driver's initial value
    pub fn new(initial: T) -> Self {
        Self { current: initial, dirty: false }
    }

    /// Last value applied to the driver
    pub fn get(&self) -> T {
        self.current
    }

    /// Whether the cached value may no longer match the driver
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forget the cached value; the next `update` reaches the driver
    pub fn set_dirty(&mut self) {
        self.dirty = true;
    }

    /// Record a value the driver took on by itself, without calling it
    pub fn reset(&mut self, value: T) {
        self.current = value;
        self.dirty = false;
    }

    /// Apply `value` through `apply` unless the driver already holds it
    ///
    /// Returns whether `apply` was called.
    pub fn update(&mut self, value: T, apply: impl FnOnce(T)) -> bool {
        if !self.dirty && self.current == value {
            return false;
        }
        self.current = value;
        self.dirty = false;
        apply(value);
        true
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
