//! Utilities for valid-ready channels.
//!
//! A transfer happens in a cycle where the forward `valid` and the backward `ready` are both high.
//! The producer must keep `inner` stable while `valid` is high and `ready` is low.

/// Valid/ready channel's forward signals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Valid<V> {
    /// Inner data. Don't-care while `valid` is low.
    pub inner: V,

    /// Valid bit
    pub valid: bool,
}

impl<V> Valid<V> {
    /// Creates a new value.
    pub fn new(valid: bool, inner: V) -> Self { Self { inner, valid } }

    /// Creates a valid value.
    pub fn valid(inner: V) -> Self { Self::new(true, inner) }

    /// Creates an invalid value.
    pub fn invalid() -> Self
    where V: Default {
        Self::new(false, V::default())
    }

    /// Returns the inner value if valid.
    pub fn as_option(&self) -> Option<&V> { self.valid.then_some(&self.inner) }

    /// Returns the inner value if valid.
    pub fn into_option(self) -> Option<V> { self.valid.then_some(self.inner) }

    /// Returns whether the value transfers this cycle under `ready`.
    pub fn fire(&self, ready: Ready) -> bool { self.valid && ready.ready }
}

impl<V: Default> From<Option<V>> for Valid<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(inner) => Self::valid(inner),
            None => Self::invalid(),
        }
    }
}

/// Ready signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ready {
    /// Ready bit
    pub ready: bool,
}

impl Ready {
    /// Creates a new ready signal.
    pub fn new(ready: bool) -> Self { Self { ready } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fire_needs_both_sides() {
        assert!(Valid::valid(1u8).fire(Ready::new(true)));
        assert!(!Valid::valid(1u8).fire(Ready::new(false)));
        assert!(!Valid::<u8>::invalid().fire(Ready::new(true)));
    }

    #[test]
    fn option_conversions() {
        assert_eq!(Valid::from(Some(3u8)).into_option(), Some(3));
        assert_eq!(Valid::<u8>::from(None).as_option(), None);
    }
}
