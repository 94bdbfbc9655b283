//! Settings-style services: zero-argument construction from the process
//! environment, cached in the container's dedicated settings bucket.

use lattice_ioc::{settings, Container};
use std::sync::Arc;

struct BrokerSettings {
  url: String,
  prefetch: u16,
}
settings!(BrokerSettings {
  url: "BROKER_URL" => "amqp://guest@127.0.0.1:5672".to_string(),
  prefetch: "BROKER_PREFETCH" => 32,
});

fn main() {
  std::env::set_var("BROKER_PREFETCH", "64");

  let container = Container::new();

  // No registration: the first resolve auto-registers BrokerSettings.
  let broker = container.resolve::<BrokerSettings>().unwrap();
  println!("broker url: {}", broker.url);
  println!("prefetch:   {} (from BROKER_PREFETCH)", broker.prefetch);
  assert_eq!(broker.prefetch, 64);

  // Settings are cached like singletons.
  let again = container.resolve::<BrokerSettings>().unwrap();
  assert!(Arc::ptr_eq(&broker, &again));
  println!("second resolution returned the identical settings object.");
}
