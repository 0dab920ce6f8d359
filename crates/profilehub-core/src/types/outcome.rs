//! Result of a single source fetch.

/// A fragment together with how it was obtained.
///
/// `Fresh` covers both a complete fetch and one where only some secondary
/// fields fell back to defaults. `Degraded` means the primary lookup failed
/// and the fragment is a placeholder built from last-known identity data.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome<F> {
    /// The primary lookup succeeded.
    Fresh(F),
    /// The primary lookup failed; the fragment is a placeholder.
    Degraded(F),
}

impl<F> SourceOutcome<F> {
    /// Whether the whole fragment is a placeholder.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Borrow the fragment regardless of how it was obtained.
    pub fn fragment(&self) -> &F {
        match self {
            Self::Fresh(f) | Self::Degraded(f) => f,
        }
    }

    /// Take the fragment regardless of how it was obtained.
    pub fn into_fragment(self) -> F {
        match self {
            Self::Fresh(f) | Self::Degraded(f) => f,
        }
    }
}
