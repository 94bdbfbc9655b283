//! The test-override pattern: because registration is last-write-wins, a
//! test substitutes a double by registering it BEFORE anything resolves the
//! dependent graph. Overriding after a resolution only affects later
//! resolutions; values already handed out keep the real object.

use lattice_ioc::{Container, Injectable, ResolveError};
use std::sync::Arc;

struct SmsGateway {
  endpoint: String,
}

impl Injectable for SmsGateway {
  fn construct(_: &Container) -> Result<Self, ResolveError> {
    Ok(SmsGateway {
      endpoint: "https://sms.example.com".to_string(),
    })
  }
}

struct AlertService {
  gateway: Arc<SmsGateway>,
}

impl Injectable for AlertService {
  fn construct(container: &Container) -> Result<Self, ResolveError> {
    Ok(AlertService {
      gateway: container.resolve::<SmsGateway>()?,
    })
  }
}

fn main() {
  // --- Override registered in time ---
  let container = Container::new();
  container.add_instance(SmsGateway {
    endpoint: "stub://captured".to_string(),
  });

  let alerts = container.resolve::<AlertService>().unwrap();
  println!("gateway endpoint: {}", alerts.gateway.endpoint);
  assert_eq!(alerts.gateway.endpoint, "stub://captured");

  // --- Override registered too late ---
  let container = Container::new();
  let early = container.resolve::<AlertService>().unwrap();

  container.add_instance(SmsGateway {
    endpoint: "stub://too-late".to_string(),
  });

  // The early resolver still holds the real singleton.
  println!("early resolver sees: {}", early.gateway.endpoint);
  assert_eq!(early.gateway.endpoint, "https://sms.example.com");

  // Only a later resolution observes the override.
  let late_gateway = container.resolve::<SmsGateway>().unwrap();
  println!("late resolver sees: {}", late_gateway.endpoint);
  assert_eq!(late_gateway.endpoint, "stub://too-late");
}
