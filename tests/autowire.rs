//! Auto-registration: convention-based registration on first resolution,
//! recursive graph construction, settings detection, overrides, and cycle
//! detection.

use lattice_ioc::{injectable, settings, Container, Injectable, ResolveError, Scope};
use pretty_assertions::assert_eq;
use std::sync::Arc;

// --- Test Fixtures ---

// A three-level dependency chain, none of it registered explicitly.
struct TokenRepo;
injectable!(TokenRepo {});

struct TokenService {
  repo: Arc<TokenRepo>,
}
injectable!(TokenService { repo: TokenRepo });

struct TokenController {
  service: Arc<TokenService>,
}
injectable!(TokenController {
  service: TokenService,
});

// A settings-style type with environment-sourced fields.
struct JwtSettings {
  issuer: String,
  ttl_secs: u64,
}
settings!(JwtSettings {
  issuer: "AUTOWIRE_TEST_JWT_ISSUER" => "lattice".to_string(),
  ttl_secs: "AUTOWIRE_TEST_JWT_TTL" => 900,
});

// --- Tests ---

#[test]
fn test_recursive_resolution_without_any_registration() {
  // Arrange
  let container = Container::new();

  // Act
  let controller = container.resolve::<TokenController>().unwrap();

  // Assert: the whole chain was constructed, and every link is the shared
  // singleton the container registered on the way down.
  let service = container.resolve::<TokenService>().unwrap();
  let repo = container.resolve::<TokenRepo>().unwrap();
  assert!(Arc::ptr_eq(&controller.service, &service));
  assert!(Arc::ptr_eq(&service.repo, &repo));
}

#[test]
fn test_auto_registered_singleton_identity() {
  // Arrange
  let container = Container::new();

  // Act
  let r1 = container.resolve::<TokenRepo>().unwrap();
  let r2 = container.resolve::<TokenRepo>().unwrap();

  // Assert
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_settings_auto_binding() {
  // Arrange: no registration for JwtSettings anywhere.
  let container = Container::new();

  // Act
  let s1 = container.resolve::<JwtSettings>().unwrap();
  let s2 = container.resolve::<JwtSettings>().unwrap();

  // Assert: built from defaults, cached in the settings bucket.
  assert_eq!(s1.issuer, "lattice");
  assert_eq!(s1.ttl_secs, 900);
  assert!(Arc::ptr_eq(&s1, &s2));
}

#[test]
fn test_settings_scope_is_configurable() {
  // Arrange: settings transient, ordinary services singleton.
  let container = Container::with_scopes(Scope::Transient, Scope::Singleton);

  // Act
  let s1 = container.resolve::<JwtSettings>().unwrap();
  let s2 = container.resolve::<JwtSettings>().unwrap();
  let r1 = container.resolve::<TokenRepo>().unwrap();
  let r2 = container.resolve::<TokenRepo>().unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&s1, &s2));
  assert!(Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_default_scope_is_configurable() {
  // Arrange: ordinary services transient, settings singleton.
  let container = Container::with_scopes(Scope::Singleton, Scope::Transient);

  // Act
  let r1 = container.resolve::<TokenRepo>().unwrap();
  let r2 = container.resolve::<TokenRepo>().unwrap();
  let s1 = container.resolve::<JwtSettings>().unwrap();
  let s2 = container.resolve::<JwtSettings>().unwrap();

  // Assert
  assert!(!Arc::ptr_eq(&r1, &r2));
  assert!(Arc::ptr_eq(&s1, &s2));
}

#[test]
fn test_explicit_injectable_registration_picks_scope() {
  // Arrange
  let container = Container::new();
  container.add_injectable::<TokenRepo>(Scope::Transient);

  // Act
  let r1 = container.resolve::<TokenRepo>().unwrap();
  let r2 = container.resolve::<TokenRepo>().unwrap();

  // Assert: the explicit transient registration wins over the singleton
  // default auto-registration would have used.
  assert!(!Arc::ptr_eq(&r1, &r2));
}

#[test]
fn test_override_before_first_resolution_wins() {
  // Arrange
  #[derive(Debug, PartialEq)]
  struct Flagged {
    tag: &'static str,
  }
  impl Injectable for Flagged {
    fn construct(_: &Container) -> Result<Self, ResolveError> {
      Ok(Flagged { tag: "real" })
    }
  }

  let container = Container::new();
  container.add_instance(Flagged { tag: "double" });

  // Act
  let resolved = container.resolve::<Flagged>().unwrap();

  // Assert
  assert_eq!(resolved.tag, "double");
}

#[test]
fn test_override_after_resolution_only_affects_later_resolutions() {
  // The documented sharp edge: an override registered after something has
  // already resolved the real singleton does not rewrite history.

  // Arrange
  struct Registry {
    tag: &'static str,
  }
  impl Injectable for Registry {
    fn construct(_: &Container) -> Result<Self, ResolveError> {
      Ok(Registry { tag: "real" })
    }
  }

  let container = Container::new();
  let before = container.resolve::<Registry>().unwrap();

  // Act
  container.add_instance(Registry { tag: "double" });
  let after = container.resolve::<Registry>().unwrap();

  // Assert
  assert_eq!(before.tag, "real");
  assert_eq!(after.tag, "double");
  assert!(!Arc::ptr_eq(&before, &after));
}

#[test]
fn test_re_registration_is_idempotent_and_last_write_wins() {
  // Arrange
  let container = Container::new();
  container.add_instance(String::from("first"));
  container.add_instance(String::from("second"));

  // Act
  let value = container.get::<String>(None).unwrap();

  // Assert
  assert_eq!(*value, "second");
}

#[test]
fn test_missing_trait_dependency_inside_graph_fails_fast() {
  // Arrange
  trait Mailer: Send + Sync {
    fn deliver(&self) -> &'static str;
  }
  struct Notifier {
    mailer: Arc<dyn Mailer>,
  }
  impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_struct("Notifier").finish_non_exhaustive()
    }
  }
  impl Injectable for Notifier {
    fn construct(container: &Container) -> Result<Self, ResolveError> {
      Ok(Notifier {
        mailer: container.get::<dyn Mailer>(None)?,
      })
    }
  }

  let container = Container::new();

  // Act: no binding for the trait yet.
  let err = container.resolve::<Notifier>().unwrap_err();

  // Assert
  assert!(matches!(err, ResolveError::MissingRegistration(_)));
  assert!(err.to_string().contains("Mailer"));

  // Bind the trait and the same graph now resolves.
  struct Smtp;
  impl Mailer for Smtp {
    fn deliver(&self) -> &'static str {
      "delivered"
    }
  }
  container.add_singleton_trait::<dyn Mailer>(|_| Arc::new(Smtp));
  let notifier = container.resolve::<Notifier>().unwrap();
  assert_eq!(notifier.mailer.deliver(), "delivered");
}

#[test]
fn test_circular_dependency_is_reported_not_recursed() {
  // Arrange: Left and Right each require the other.
  #[derive(Debug)]
  struct Left {
    _right: Arc<Right>,
  }
  #[derive(Debug)]
  struct Right {
    _left: Arc<Left>,
  }
  impl Injectable for Left {
    fn construct(container: &Container) -> Result<Self, ResolveError> {
      Ok(Left {
        _right: container.resolve::<Right>()?,
      })
    }
  }
  impl Injectable for Right {
    fn construct(container: &Container) -> Result<Self, ResolveError> {
      Ok(Right {
        _left: container.resolve::<Left>()?,
      })
    }
  }

  let container = Container::new();

  // Act
  let err = container.resolve::<Left>().unwrap_err();

  // Assert: the chain names both participants.
  match &err {
    ResolveError::CircularDependency { chain, .. } => {
      assert!(chain.keys().len() >= 3);
    }
    other => panic!("expected CircularDependency, got {other:?}"),
  }
  let message = err.to_string();
  assert!(message.contains("Left"));
  assert!(message.contains("Right"));
}

#[test]
fn test_self_dependency_is_reported() {
  // Arrange
  #[derive(Debug)]
  struct Ouroboros {
    _this: Arc<Ouroboros>,
  }
  impl Injectable for Ouroboros {
    fn construct(container: &Container) -> Result<Self, ResolveError> {
      Ok(Ouroboros {
        _this: container.resolve::<Ouroboros>()?,
      })
    }
  }

  let container = Container::new();

  // Act
  let err = container.resolve::<Ouroboros>().unwrap_err();

  // Assert
  assert!(matches!(err, ResolveError::CircularDependency { .. }));
}

#[test]
fn test_failed_resolution_leaves_no_cached_value() {
  // A singleton whose construction fails must be constructible again once
  // the missing binding is supplied.

  // Arrange
  trait Store: Send + Sync {
    fn name(&self) -> &'static str;
  }
  struct Cache {
    store: Arc<dyn Store>,
  }
  impl Injectable for Cache {
    fn construct(container: &Container) -> Result<Self, ResolveError> {
      Ok(Cache {
        store: container.get::<dyn Store>(None)?,
      })
    }
  }

  let container = Container::new();
  assert!(container.resolve::<Cache>().is_err());

  // Act: supply the binding and retry.
  struct Redis;
  impl Store for Redis {
    fn name(&self) -> &'static str {
      "redis"
    }
  }
  container.add_singleton_trait::<dyn Store>(|_| Arc::new(Redis));
  let cache = container.resolve::<Cache>().unwrap();

  // Assert
  assert_eq!(cache.store.name(), "redis");
}
