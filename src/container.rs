//! The main `Container` struct and its associated methods.

use std::any::{type_name, Any};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::core::{BoxedService, FactoryFn, Provider, ResolutionGuard, ServiceKey};
use crate::error::ResolveError;
use crate::inject::{FromEnv, Injectable, ServiceKind};
use crate::scope::Scope;

/// The Inversion of Control (IoC) container.
///
/// Holds the registrations for all services. It is thread-safe and allows
/// dynamic registration at any point in the application's lifecycle, plus
/// lazy auto-registration on first resolution for [`Injectable`] types.
///
/// Re-registering a key silently overwrites the previous entry (last write
/// wins); tests rely on this to substitute doubles. An override only takes
/// effect for resolutions that happen after it: anything that resolved the
/// previous singleton already keeps its `Arc`.
#[derive(Default)]
pub struct Container {
  providers: DashMap<ServiceKey, Arc<Provider>>,
  settings_scope: Scope,
  default_scope: Scope,
}

impl Container {
  /// Creates a new, empty `Container` with both auto-registration scopes
  /// set to [`Scope::Singleton`].
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a container with explicit auto-registration scopes:
  /// `settings_scope` for [`FromEnv`](crate::FromEnv) types, `default_scope`
  /// for every other [`Injectable`].
  pub fn with_scopes(settings_scope: Scope, default_scope: Scope) -> Self {
    Self {
      providers: DashMap::new(),
      settings_scope,
      default_scope,
    }
  }

  // --- PRIVATE HELPERS ---

  fn key_for<T: ?Sized + Any>(name: Option<&str>) -> ServiceKey {
    match name {
      Some(n) => ServiceKey::named::<T>(n),
      None => ServiceKey::of::<T>(),
    }
  }

  fn insert(&self, key: ServiceKey, provider: Provider) {
    debug!(service = %key, "registered service");
    self.providers.insert(key, Arc::new(provider));
  }

  fn add_instance_internal<T: Any + Send + Sync>(&self, name: Option<&str>, instance: T) {
    let key = Self::key_for::<T>(name);
    self.insert(key, Provider::Instance(Box::new(Arc::new(instance))));
  }

  fn add_singleton_internal<T: Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    let key = Self::key_for::<T>(name);
    let factory: FactoryFn =
      Box::new(move |container| Ok(Box::new(Arc::new(factory(container))) as BoxedService));
    self.insert(
      key,
      Provider::Singleton {
        cell: OnceCell::new(),
        factory,
      },
    );
  }

  fn add_transient_internal<T: Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    let key = Self::key_for::<T>(name);
    let factory: FactoryFn =
      Box::new(move |container| Ok(Box::new(Arc::new(factory(container))) as BoxedService));
    self.insert(key, Provider::Transient { factory });
  }

  fn add_singleton_trait_internal<I: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
    factory: impl Fn(&Container) -> Arc<I> + Send + Sync + 'static,
  ) {
    let key = Self::key_for::<I>(name);
    let factory: FactoryFn =
      Box::new(move |container| Ok(Box::new(factory(container)) as BoxedService));
    self.insert(
      key,
      Provider::Singleton {
        cell: OnceCell::new(),
        factory,
      },
    );
  }

  /// A provider that constructs `T` through its `Injectable` impl, placed
  /// in the bucket `T::KIND` selects.
  fn wired_provider<T: Injectable>(scope: Scope) -> Provider {
    let factory: FactoryFn = Box::new(|container| {
      T::construct(container).map(|value| Box::new(Arc::new(value)) as BoxedService)
    });
    match (scope, T::KIND) {
      (Scope::Transient, _) => Provider::Transient { factory },
      (Scope::Singleton, ServiceKind::Settings) => Provider::Settings {
        cell: OnceCell::new(),
        factory,
      },
      (Scope::Singleton, ServiceKind::Service) => Provider::Singleton {
        cell: OnceCell::new(),
        factory,
      },
    }
  }

  /// The lazy auto-registration step: a missing unnamed key for an
  /// `Injectable` type is registered by convention before lookup.
  fn register_if_missing<T: Injectable>(&self) {
    let key = ServiceKey::of::<T>();
    if self.providers.contains_key(&key) {
      return;
    }
    let scope = match T::KIND {
      ServiceKind::Settings => self.settings_scope,
      ServiceKind::Service => self.default_scope,
    };
    // `or_insert_with` keeps a concurrent explicit registration intact.
    self
      .providers
      .entry(key)
      .or_insert_with(|| Arc::new(Self::wired_provider::<T>(scope)));
    debug!(
      service = %type_name::<T>(),
      kind = ?T::KIND,
      scope = ?scope,
      "auto-registered service"
    );
  }

  // --- PUBLIC API ---

  // --- Instance Registration ---
  pub fn add_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.add_instance_internal(None, instance);
  }
  pub fn add_instance_with_name<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.add_instance_internal(Some(name), instance);
  }

  // --- Singleton Registration ---
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.add_singleton_internal(None, factory);
  }
  pub fn add_singleton_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.add_singleton_internal(Some(name), factory);
  }

  // --- Transient Registration ---
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.add_transient_internal(None, factory);
  }
  pub fn add_transient_with_name<T: Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.add_transient_internal(Some(name), factory);
  }

  // --- Trait Registration ---
  /// Binds an abstract trait to a concrete implementation. The factory
  /// receives the container so the implementation can resolve its own
  /// dependencies.
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    factory: impl Fn(&Container) -> Arc<I> + Send + Sync + 'static,
  ) {
    self.add_singleton_trait_internal(None, factory);
  }
  pub fn add_singleton_trait_with_name<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    factory: impl Fn(&Container) -> Arc<I> + Send + Sync + 'static,
  ) {
    self.add_singleton_trait_internal(Some(name), factory);
  }

  // --- Constructible Registration ---
  /// Explicitly registers an [`Injectable`] type at `scope`, constructed by
  /// resolving its declared dependencies. This is what auto-registration
  /// does implicitly; registering explicitly lets you pick the scope or a
  /// name.
  pub fn add_injectable<T: Injectable>(&self, scope: Scope) {
    let key = ServiceKey::of::<T>();
    self.insert(key, Self::wired_provider::<T>(scope));
  }
  pub fn add_injectable_with_name<T: Injectable>(&self, name: &str, scope: Scope) {
    let key = ServiceKey::named::<T>(name);
    self.insert(key, Self::wired_provider::<T>(scope));
  }

  /// Explicitly registers a settings-style type at the container's
  /// settings scope.
  pub fn add_settings<T: FromEnv>(&self) {
    self.add_injectable::<T>(self.settings_scope);
  }

  // --- Resolution ---

  /// Looks up a previously registered service. No auto-registration is
  /// attempted: an absent key is [`ResolveError::MissingRegistration`].
  ///
  /// This is the resolution path for trait objects and named services.
  pub fn get<T: ?Sized + Any + Send + Sync>(
    &self,
    name: Option<&str>,
  ) -> Result<Arc<T>, ResolveError> {
    let key = Self::key_for::<T>(name);
    let _guard = ResolutionGuard::acquire(key.clone())?;

    // Clone the provider handle out of the map before running any factory:
    // a factory resolving its own dependencies may insert new registrations,
    // which must not happen while a map shard reference is held.
    let provider = match self.providers.get(&key) {
      Some(entry) => Arc::clone(entry.value()),
      None => return Err(ResolveError::MissingRegistration(key)),
    };

    let resolved = match &*provider {
      Provider::Instance(value) => value.downcast_ref::<Arc<T>>().cloned(),
      Provider::Singleton { cell, factory } | Provider::Settings { cell, factory } => cell
        .get_or_try_init(|| factory(self))?
        .downcast_ref::<Arc<T>>()
        .cloned(),
      Provider::Transient { factory } => factory(self)?
        .downcast::<Arc<T>>()
        .ok()
        .map(|boxed| *boxed),
    };

    // A provider stored under T's key always boxes an Arc<T>, so a failed
    // downcast means the entry is unusable for this request.
    resolved.ok_or(ResolveError::MissingRegistration(key))
  }

  /// Resolves an [`Injectable`] service, registering it by convention first
  /// if it was never registered: [`FromEnv`](crate::FromEnv) types go to the
  /// settings bucket at the settings scope, everything else is registered as
  /// a constructible type at the default scope. Dependencies auto-register
  /// the same way, recursively.
  pub fn resolve<T: Injectable>(&self) -> Result<Arc<T>, ResolveError> {
    self.register_if_missing::<T>();
    self.get::<T>(None)
  }
}
