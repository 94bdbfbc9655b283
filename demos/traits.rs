//! Abstract-to-concrete binding: services registered against a trait and
//! resolved as trait objects, with named variants coexisting.

use lattice_ioc::{resolve_from, Container};
use std::sync::Arc;

trait TokenSigner: Send + Sync {
  fn sign(&self, claims: &str) -> String;
}

struct HmacSigner {
  secret: String,
}
impl TokenSigner for HmacSigner {
  fn sign(&self, claims: &str) -> String {
    format!("hmac({claims}, key={})", self.secret)
  }
}

struct UnsignedSigner;
impl TokenSigner for UnsignedSigner {
  fn sign(&self, claims: &str) -> String {
    format!("none({claims})")
  }
}

fn main() {
  let container = Container::new();

  // The default binding, plus a named alternative for test environments.
  container.add_singleton_trait::<dyn TokenSigner>(|_| {
    Arc::new(HmacSigner {
      secret: "s3cr3t".to_string(),
    })
  });
  container.add_singleton_trait_with_name::<dyn TokenSigner>("insecure", |_| {
    Arc::new(UnsignedSigner)
  });

  let signer = resolve_from!(container, trait TokenSigner);
  println!("default binding: {}", signer.sign("sub=42"));

  let insecure = container.get::<dyn TokenSigner>(Some("insecure")).unwrap();
  println!("named binding:   {}", insecure.sign("sub=42"));
}
