use base58::ToBase58;
use uuid::Uuid;

use kuleana_common::prelude::*;

/// Mints engine-assigned instance ids: a `wf-` tag over a base58
/// rendering of a UUIDv4, unique for the lifetime of the store.
pub struct IdGenerator;

impl IdGenerator {
    pub fn generate() -> InlineStr {
        format!("wf-{}", Uuid::new_v4().as_bytes().to_base58()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        let a = IdGenerator::generate();
        let b = IdGenerator::generate();
        assert!(a.starts_with("wf-"));
        assert_ne!(a, b);
    }
}
