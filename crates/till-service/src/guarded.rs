//! Result wrapper for operations behind the access guard.

/// Outcome of a guarded operation.
///
/// `SignedOut` and `Denied` are ordinary values: the caller decides what
/// the user sees (a redirect to the login page, a "not allowed" page).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// The caller has no valid session.
    SignedOut,
    /// The caller is signed in below the required trust level.
    Denied,
    /// The operation ran.
    Done(T),
}

impl<T> Guarded<T> {
    /// The operation's value, if it ran.
    pub fn done(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::SignedOut | Self::Denied => None,
        }
    }

    /// Whether the operation ran.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Maps the value of a completed operation.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Guarded<U> {
        match self {
            Self::SignedOut => Guarded::SignedOut,
            Self::Denied => Guarded::Denied,
            Self::Done(value) => Guarded::Done(f(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_preserves_refusals() {
        assert_eq!(Guarded::<u8>::SignedOut.map(|v| v + 1), Guarded::SignedOut);
        assert_eq!(Guarded::<u8>::Denied.map(|v| v + 1), Guarded::Denied);
        assert_eq!(Guarded::Done(1u8).map(|v| v + 1), Guarded::Done(2));
        assert_eq!(Guarded::Done(3u8).done(), Some(3));
        assert!(!Guarded::<u8>::Denied.is_done());
    }
}
