//! Public macros for ergonomic resolution and wiring.

/// Resolves a previously registered service from the global container,
/// panicking if it is missing.
///
/// Auto-registration does not apply here; use
/// [`Container::resolve`](crate::Container::resolve) (or
/// [`resolve_from!`](crate::resolve_from)) for the auto-registering path,
/// and [`Container::get`](crate::Container::get) for a non-panicking lookup.
///
/// # Panics
///
/// Panics if the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use lattice_ioc::{global, resolve};
///
/// global().add_singleton(|_| String::from("hello"));
///
/// let message = resolve!(String);
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use lattice_ioc::{global, resolve};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().add_singleton_trait::<dyn Greeter>(|_| Arc::new(EnglishGreeter));
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  // Concrete type: resolve!(MyService)
  ($type:ty) => {
    $crate::global().get::<$type>(None).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {}: {}",
        std::any::type_name::<$type>(),
        err
      )
    })
  };

  // Named concrete type: resolve!(MyService, "name")
  ($type:ty, $name:expr) => {
    $crate::global().get::<$type>(Some($name)).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {} with name '{}': {}",
        std::any::type_name::<$type>(),
        $name,
        err
      )
    })
  };

  // Trait object: resolve!(trait MyTrait)
  (trait $trait_ident:ident) => {
    $crate::global().get::<dyn $trait_ident>(None).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required trait service {}: {}",
        std::any::type_name::<dyn $trait_ident>(),
        err
      )
    })
  };

  // Named trait object: resolve!(trait MyTrait, "name")
  (trait $trait_ident:ident, $name:expr) => {
    $crate::global()
      .get::<dyn $trait_ident>(Some($name))
      .unwrap_or_else(|err| {
        panic!(
          "Failed to resolve required trait service {} with name '{}': {}",
          std::any::type_name::<dyn $trait_ident>(),
          $name,
          err
        )
      })
  };
}

/// Resolves a service from an explicit container, panicking if resolution
/// fails. The plain-type arm goes through the auto-registering
/// [`Container::resolve`](crate::Container::resolve) path.
///
/// # Examples
///
/// ```
/// use lattice_ioc::{injectable, resolve_from, Container};
///
/// struct Clock;
/// injectable!(Clock {});
///
/// let container = Container::new();
/// let clock = resolve_from!(container, Clock);
/// # let _ = clock;
/// ```
#[macro_export]
macro_rules! resolve_from {
  // Auto-registering: resolve_from!(container, MyService)
  ($container:expr, $type:ty) => {
    $container.resolve::<$type>().unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {}: {}",
        std::any::type_name::<$type>(),
        err
      )
    })
  };

  // Named lookup: resolve_from!(container, MyService, "name")
  ($container:expr, $type:ty, $name:expr) => {
    $container.get::<$type>(Some($name)).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required service {} with name '{}': {}",
        std::any::type_name::<$type>(),
        $name,
        err
      )
    })
  };

  // Trait lookup: resolve_from!(container, trait MyTrait)
  ($container:expr, trait $trait_ident:ident) => {
    $container.get::<dyn $trait_ident>(None).unwrap_or_else(|err| {
      panic!(
        "Failed to resolve required trait service {}: {}",
        std::any::type_name::<dyn $trait_ident>(),
        err
      )
    })
  };
}

/// Implements [`Injectable`](crate::Injectable) for a struct whose fields
/// are all `Arc`-wrapped `Injectable` dependencies, resolving each through
/// the container.
///
/// Trait-object dependencies need a hand-written impl against
/// [`Container::get`](crate::Container::get), since a trait cannot be
/// `Injectable` itself.
///
/// # Examples
///
/// ```
/// use lattice_ioc::{injectable, Container};
/// use std::sync::Arc;
///
/// struct Repo;
/// injectable!(Repo {});
///
/// struct UserService {
///   repo: Arc<Repo>,
/// }
/// injectable!(UserService { repo: Repo });
///
/// let container = Container::new();
/// let service = container.resolve::<UserService>().unwrap();
/// let repo = container.resolve::<Repo>().unwrap();
/// assert!(Arc::ptr_eq(&service.repo, &repo));
/// ```
#[macro_export]
macro_rules! injectable {
  ($type:ident { $($field:ident : $dep:ty),* $(,)? }) => {
    impl $crate::Injectable for $type {
      fn construct(
        container: &$crate::Container,
      ) -> ::core::result::Result<Self, $crate::ResolveError> {
        ::core::result::Result::Ok(Self {
          $($field: container.resolve::<$dep>()?,)*
        })
      }
    }
  };
}

/// Implements [`FromEnv`](crate::FromEnv) for a settings struct.
///
/// Each field is read from the named environment variable and parsed with
/// `FromStr`; an absent or unparseable variable falls back to the supplied
/// default. The bare form delegates to the type's `Default` impl.
///
/// # Examples
///
/// ```
/// use lattice_ioc::{settings, Container};
///
/// struct RedisSettings {
///   url: String,
///   pool_size: usize,
/// }
///
/// settings!(RedisSettings {
///   url: "REDIS_URL" => "redis://127.0.0.1:6379".to_string(),
///   pool_size: "REDIS_POOL_SIZE" => 8,
/// });
///
/// let container = Container::new();
/// let redis = container.resolve::<RedisSettings>().unwrap();
/// assert_eq!(redis.pool_size, 8);
/// ```
#[macro_export]
macro_rules! settings {
  ($type:ident { $($field:ident : $var:literal => $default:expr),* $(,)? }) => {
    impl $crate::FromEnv for $type {
      fn from_env() -> Self {
        Self {
          $($field: ::std::env::var($var)
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_else(|| $default),)*
        }
      }
    }
  };

  ($type:ty) => {
    impl $crate::FromEnv for $type {
      fn from_env() -> Self {
        <$type as ::core::default::Default>::default()
      }
    }
  };
}
