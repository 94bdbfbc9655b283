//! The global IoC container instance and access functions.

use once_cell::sync::Lazy;

use crate::container::Container;

// The one and only global container instance, created on first access.
// Production bootstrap registers its explicit bindings here once per
// process; tests that need isolation construct their own `Container`.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// # Examples
///
/// ```
/// use lattice_ioc::global;
///
/// fn register_services() {
///   global().add_instance(String::from("Hello from global!"));
/// }
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
