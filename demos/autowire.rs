use lattice_ioc::{injectable, settings, Container};
use std::sync::Arc;

// A settings-style type. Auto-registered into the settings bucket on first
// resolution, built from environment variables with defaults.
struct CacheSettings {
  url: String,
  ttl_secs: u64,
}
settings!(CacheSettings {
  url: "CACHE_URL" => "redis://127.0.0.1:6379".to_string(),
  ttl_secs: "CACHE_TTL_SECS" => 300,
});

// An ordinary service chain. None of it is registered explicitly; each link
// is auto-registered as the container walks the graph depth-first.
struct SessionStore {
  cache: Arc<CacheSettings>,
}
injectable!(SessionStore { cache: CacheSettings });

struct SessionService {
  store: Arc<SessionStore>,
}
injectable!(SessionService { store: SessionStore });

fn main() {
  // Show the container's debug logs for explicit and implicit registrations.
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .init();

  let container = Container::new();

  println!("--- Resolving SessionService with an empty container ---");
  let service = container
    .resolve::<SessionService>()
    .expect("auto-registration should wire the whole chain");

  println!(
    "SessionService built; cache at {} with ttl {}s",
    service.store.cache.url, service.store.cache.ttl_secs
  );

  // Every link in the chain is the shared singleton.
  let store = container.resolve::<SessionStore>().unwrap();
  assert!(Arc::ptr_eq(&service.store, &store));
  println!("SessionStore is the same instance the service holds, as expected.");
}
