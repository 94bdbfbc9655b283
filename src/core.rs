//! Core data structures: service keys, providers, and the per-thread
//! resolution stack used for cycle detection.

use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::fmt;

use once_cell::sync::OnceCell;

use crate::container::Container;
use crate::error::{ResolutionChain, ResolveError};

thread_local! {
  // The ordered stack of services currently being resolved on this thread.
  // A key appearing twice means the dependency graph loops back on itself.
  static RESOLVING_STACK: RefCell<Vec<ServiceKey>> = RefCell::new(Vec::new());
}

/// Identifies a registration: the requested type, optionally qualified by a
/// name so multiple implementations of the same type can coexist.
#[derive(Clone)]
pub struct ServiceKey {
  type_id: TypeId,
  name: Option<String>,
  type_name: &'static str,
}

impl ServiceKey {
  pub(crate) fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: None,
      type_name: type_name::<T>(),
    }
  }

  pub(crate) fn named<T: ?Sized + Any>(name: &str) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: Some(name.to_owned()),
      type_name: type_name::<T>(),
    }
  }

  /// The fully-qualified name of the requested type.
  pub fn type_name(&self) -> &'static str {
    self.type_name
  }

  /// The name qualifier, if this key was registered with one.
  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

// Identity is (type, name); `type_name` rides along for diagnostics only.
impl PartialEq for ServiceKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id && self.name == other.name
  }
}
impl Eq for ServiceKey {}

impl std::hash::Hash for ServiceKey {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
    self.name.hash(state);
  }
}

impl fmt::Display for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "{} (name: {:?})", self.type_name, name),
      None => f.write_str(self.type_name),
    }
  }
}

impl fmt::Debug for ServiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "Key({}, name = {:?})", self.type_name, name),
      None => write!(f, "Key({})", self.type_name),
    }
  }
}

/// An RAII guard around one `resolve`/`get` frame.
///
/// Acquiring it pushes the key onto the thread-local resolution stack and
/// fails with [`ResolveError::CircularDependency`] if the key is already on
/// the stack. Dropping it pops the key again.
pub(crate) struct ResolutionGuard {
  key: ServiceKey,
}

impl ResolutionGuard {
  pub(crate) fn acquire(key: ServiceKey) -> Result<Self, ResolveError> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(start) = stack.iter().position(|frame| *frame == key) {
        let mut chain: Vec<ServiceKey> = stack[start..].to_vec();
        chain.push(key.clone());
        return Err(ResolveError::CircularDependency {
          key: key.clone(),
          chain: ResolutionChain::new(chain),
        });
      }
      stack.push(key.clone());
      Ok(Self { key })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      let popped = stack.borrow_mut().pop();
      debug_assert_eq!(popped.as_ref(), Some(&self.key));
    });
  }
}

/// A boxed `Arc<T>` (or `Arc<dyn I>`) erased behind `Any`.
pub(crate) type BoxedService = Box<dyn Any + Send + Sync>;

/// A construction strategy. Factories receive the owning container so they
/// can resolve their own dependencies; a factory error is a dependency
/// failure bubbling up from a recursive resolution.
pub(crate) type FactoryFn =
  Box<dyn Fn(&Container) -> Result<BoxedService, ResolveError> + Send + Sync>;

pub(crate) enum Provider {
  /// A pre-built value, returned verbatim on every resolution.
  Instance(BoxedService),
  /// Built at most once; the cell serializes concurrent first resolutions.
  Singleton {
    cell: OnceCell<BoxedService>,
    factory: FactoryFn,
  },
  /// Same caching behavior as `Singleton`, kept as a distinct variant: the
  /// dedicated bucket for configuration-style services.
  Settings {
    cell: OnceCell<BoxedService>,
    factory: FactoryFn,
  },
  /// Built fresh on every resolution, never cached.
  Transient { factory: FactoryFn },
}
