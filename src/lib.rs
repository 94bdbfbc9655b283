//! # Lattice IoC
//!
//! A flexible, thread-safe, auto-registering Inversion of Control (IoC)
//! container for Rust.
//!
//! Lattice IoC manages dependencies within your application. Services can be
//! registered dynamically at any point in the application's lifecycle, and
//! types implementing [`Injectable`] never need explicit registration at
//! all: the first [`Container::resolve`] call registers them by convention
//! and constructs them by resolving their declared dependencies, depth-first
//! and fully recursively.
//!
//! ## Core Concepts
//!
//! - **Container**: the central registry mapping keys (type, or type + name)
//!   to construction strategies: a pre-built instance, a factory, or a
//!   constructible [`Injectable`] type.
//! - **Scope**: singleton registrations cache their value for the lifetime
//!   of the container; transient registrations build a fresh value on every
//!   resolution.
//! - **Auto-registration**: resolving an unregistered [`Injectable`] type
//!   registers it lazily. Settings-style types ([`FromEnv`]) land in a
//!   dedicated settings bucket; everything else is registered at the
//!   container's default scope.
//! - **Overrides**: re-registering a key overwrites the previous entry with
//!   no error. Tests use this to substitute doubles before resolving the
//!   graph under test.
//! - **Failure**: resolution returns [`ResolveError`] for a missing binding
//!   or a circular dependency; factory panics propagate unchanged.
//!
//! ## Quick Start
//!
//! ```
//! use lattice_ioc::{injectable, settings, Container};
//! use std::sync::Arc;
//!
//! // A settings-style type: built from the environment, zero arguments.
//! struct QueueSettings {
//!   broker_url: String,
//! }
//! settings!(QueueSettings {
//!   broker_url: "BROKER_URL" => "amqp://127.0.0.1:5672".to_string(),
//! });
//!
//! // An abstract seam, bound explicitly at bootstrap.
//! trait Mailer: Send + Sync {
//!   fn send(&self, to: &str) -> String;
//! }
//! struct SmtpMailer;
//! impl Mailer for SmtpMailer {
//!   fn send(&self, to: &str) -> String {
//!     format!("sent to {to}")
//!   }
//! }
//!
//! // A service wired from its dependencies.
//! struct PingTask {
//!   queue: Arc<QueueSettings>,
//! }
//! injectable!(PingTask { queue: QueueSettings });
//!
//! let container = Container::new();
//! container.add_singleton_trait::<dyn Mailer>(|_| Arc::new(SmtpMailer));
//!
//! // No registration for PingTask or QueueSettings: both auto-register.
//! let task = container.resolve::<PingTask>().unwrap();
//! assert_eq!(task.queue.broker_url, "amqp://127.0.0.1:5672");
//!
//! let mailer = container.get::<dyn Mailer>(None).unwrap();
//! assert_eq!(mailer.send("ops"), "sent to ops");
//! ```

mod container;
mod core;
mod error;
mod global;
mod inject;
mod macros;
mod scope;

pub use container::Container;
pub use self::core::ServiceKey;
pub use error::{ResolutionChain, ResolveError};
pub use global::global;
pub use inject::{FromEnv, Injectable, ServiceKind};
pub use scope::Scope;
