//! Deferred-transport adapters.
//!
//! Lazies created with [`Lazy::deferred`] or [`Lazy::closure`] are not
//! forced while transforming for a deferred target. The transformer hands
//! back one of these wrappers instead, carrying the same producer, so the
//! receiving framework decides when (and whether) to pay for the value.

use std::fmt;

use crate::error::LazyError;
use crate::lazy::Lazy;
use crate::property::Field;

/// Deferred prop object carrying a lazy producer.
#[derive(Clone)]
pub struct DeferredProp {
    lazy: Lazy,
}

impl DeferredProp {
    pub fn new(lazy: Lazy) -> Self {
        Self { lazy }
    }

    pub fn is_resolved(&self) -> bool {
        self.lazy.is_resolved()
    }

    pub fn resolve(&self) -> Result<&Field, LazyError> {
        self.lazy.resolve()
    }

    /// Convert into the plain callable variant over the same producer.
    pub fn into_closure(self) -> DeferredClosure {
        DeferredClosure { lazy: self.lazy }
    }
}

impl fmt::Debug for DeferredProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredProp")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}

/// Plain deferred callable over a lazy producer.
#[derive(Clone)]
pub struct DeferredClosure {
    lazy: Lazy,
}

impl DeferredClosure {
    pub fn new(lazy: Lazy) -> Self {
        Self { lazy }
    }

    pub fn call(&self) -> Result<&Field, LazyError> {
        self.lazy.resolve()
    }
}

impl fmt::Debug for DeferredClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredClosure")
            .field("resolved", &self.lazy.is_resolved())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn wrappers_share_the_producer() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let lazy = Lazy::deferred(move || {
            counter.set(counter.get() + 1);
            "Freek"
        });

        let prop = DeferredProp::new(lazy.clone());
        assert!(!prop.is_resolved());

        let closure = prop.clone().into_closure();
        assert_eq!(closure.call().unwrap().as_str(), Some("Freek"));
        assert_eq!(prop.resolve().unwrap().as_str(), Some("Freek"));
        assert!(lazy.is_resolved());
        assert_eq!(calls.get(), 1);
    }
}
