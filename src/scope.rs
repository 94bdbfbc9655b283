//! Lifetime scopes for registrations.

/// The caching policy applied to a registration's produced value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
  /// Built on first resolution, then the same value is returned for the
  /// lifetime of the container.
  #[default]
  Singleton,
  /// Built fresh on every resolution.
  Transient,
}

impl Scope {
  /// Whether this scope caches the produced value.
  pub fn is_cached(self) -> bool {
    matches!(self, Scope::Singleton)
  }
}
