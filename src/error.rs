//! Resolution error taxonomy.
//!
//! The container never recovers locally: every failure is returned to the
//! caller of `resolve`/`get` synchronously. Panics raised inside user
//! factories propagate unchanged.

use std::fmt;

use thiserror::Error;

use crate::core::ServiceKey;

/// The ordered path of keys that was being resolved when a cycle was found,
/// ending with the repeated key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionChain(Vec<ServiceKey>);

impl ResolutionChain {
  pub(crate) fn new(chain: Vec<ServiceKey>) -> Self {
    Self(chain)
  }

  pub fn keys(&self) -> &[ServiceKey] {
    &self.0
  }
}

impl fmt::Display for ResolutionChain {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, key) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(" -> ")?;
      }
      write!(f, "{key}")?;
    }
    Ok(())
  }
}

/// Why a `resolve`/`get` call failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// The key was never explicitly registered and could not be registered by
  /// convention (e.g. a trait with no bound implementation).
  #[error("no registration found for service {0}")]
  MissingRegistration(ServiceKey),

  /// The dependency graph loops back on itself. `chain` names the full
  /// resolution path, ending with the repeated key.
  #[error("circular dependency detected while resolving {key}: {chain}")]
  CircularDependency {
    key: ServiceKey,
    chain: ResolutionChain,
  },
}
