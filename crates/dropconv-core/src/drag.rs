//! Drag-over tracking for the drop zone.
//!
//! Browsers fire `dragleave` on the parent when the pointer moves onto
//! a child element, immediately followed by `dragenter` on the child.
//! Toggling the highlight on each event makes it flicker, so enters
//! and leaves are counted and the highlight only clears when the count
//! returns to zero.

/// Nesting-tolerant drag-over counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragCounter {
    depth: u32,
}

impl DragCounter {
    /// A pointer entered the zone or one of its children.
    pub const fn enter(&mut self) {
        self.depth = self.depth.saturating_add(1);
    }

    /// A pointer left the zone or one of its children.
    ///
    /// Never goes below zero, so a stray `dragleave` (e.g. a drag that
    /// started inside the zone) cannot wedge the highlight.
    pub const fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Forget all nesting, e.g. after a drop.
    pub const fn reset(&mut self) {
        self.depth = 0;
    }

    /// Whether the drop zone should be highlighted.
    #[must_use]
    pub const fn is_over(self) -> bool {
        self.depth > 0
    }

    /// Current nesting depth.
    #[must_use]
    pub const fn depth(self) -> u32 {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_enter_leave_keeps_highlight() {
        let mut counter = DragCounter::default();
        counter.enter(); // zone
        counter.enter(); // child
        counter.leave(); // zone (moving onto child)
        assert!(counter.is_over());
        counter.leave(); // child
        assert!(!counter.is_over());
    }

    #[test]
    fn never_goes_negative() {
        let mut counter = DragCounter::default();
        counter.leave();
        counter.leave();
        assert_eq!(counter.depth(), 0);
        counter.enter();
        assert!(counter.is_over());
        counter.leave();
        assert!(!counter.is_over());
    }

    #[test]
    fn reset_clears_any_depth() {
        let mut counter = DragCounter::default();
        for _ in 0..5 {
            counter.enter();
        }
        counter.reset();
        assert_eq!(counter.depth(), 0);
        assert!(!counter.is_over());
    }
}
