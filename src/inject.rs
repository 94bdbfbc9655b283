//! Traits driving auto-registration.
//!
//! A dynamically-typed container discovers a type's dependencies by
//! inspecting its constructor at runtime. Here the same information is
//! declared at compile time: [`Injectable`] states how a type is built from
//! the container, and [`FromEnv`] marks configuration-style types that
//! build themselves from the process environment with no external input.
//! The [`injectable!`](crate::injectable) and [`settings!`](crate::settings)
//! macros generate the impls for the common shapes.

use crate::container::Container;
use crate::error::ResolveError;

/// Which bucket an auto-registration lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
  /// An ordinary service, auto-registered at the container's default scope.
  Service,
  /// A configuration-style service, auto-registered at the container's
  /// settings scope into the dedicated settings bucket.
  Settings,
}

/// A type the container can construct by resolving its dependencies.
///
/// `construct` resolves each dependency through the container, so an
/// unregistered `Injectable` dependency is registered lazily on the way
/// down. Resolution is depth-first and fully recursive.
///
/// # Examples
///
/// ```
/// use lattice_ioc::{Container, Injectable, ResolveError};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Clock;
/// impl Injectable for Clock {
///   fn construct(_: &Container) -> Result<Self, ResolveError> {
///     Ok(Clock)
///   }
/// }
///
/// struct Scheduler {
///   clock: Arc<Clock>,
/// }
/// impl Injectable for Scheduler {
///   fn construct(container: &Container) -> Result<Self, ResolveError> {
///     Ok(Scheduler { clock: container.resolve::<Clock>()? })
///   }
/// }
///
/// let container = Container::new();
/// let scheduler = container.resolve::<Scheduler>().unwrap();
/// let clock = container.resolve::<Clock>().unwrap();
/// assert!(Arc::ptr_eq(&scheduler.clock, &clock));
/// ```
pub trait Injectable: Sized + Send + Sync + 'static {
  /// The bucket used when this type is auto-registered.
  const KIND: ServiceKind = ServiceKind::Service;

  /// Builds a value, resolving every dependency from `container`.
  fn construct(container: &Container) -> Result<Self, ResolveError>;
}

/// A settings-style type: built from ambient configuration (environment
/// variables, built-in defaults) with zero externally supplied arguments.
///
/// Every `FromEnv` type is [`Injectable`] with
/// [`ServiceKind::Settings`], so resolving it without any explicit
/// registration lands it in the settings bucket.
pub trait FromEnv: Sized + Send + Sync + 'static {
  fn from_env() -> Self;
}

impl<T: FromEnv> Injectable for T {
  const KIND: ServiceKind = ServiceKind::Settings;

  fn construct(_container: &Container) -> Result<Self, ResolveError> {
    Ok(T::from_env())
  }
}
