//! Headless versions of the three costing forms.
//!
//! Each surface keeps the last confirmed values, a draft the user edits and
//! a [`Busy`] flag that renderers read to disable controls. Actions take
//! `&mut self`, so a surface never has two requests in flight.

mod budget_drawer;
mod organization;
mod selector;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

pub use budget_drawer::BudgetDrawer;
pub use organization::OrganizationMethodForm;
pub use selector::MethodSelector;

/// Shared "request in flight" flag, cloneable into a render loop.
#[derive(Debug, Clone, Default)]
pub struct Busy(Arc<AtomicBool>);

impl Busy {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Sets the flag until the guard drops, also when the request future is
    /// dropped halfway.
    fn start(&self) -> BusyGuard {
        self.0.store(true, Ordering::Release);
        BusyGuard(self.0.clone())
    }
}

struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_clears_when_the_guard_drops() {
        let busy = Busy::default();
        let observer = busy.clone();

        let guard = busy.start();
        assert!(observer.is_set());

        drop(guard);
        assert!(!observer.is_set());
    }
}
