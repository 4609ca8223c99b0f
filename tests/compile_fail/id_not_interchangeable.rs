// ABOUTME: Compile-fail test verifying ContainerId and NetworkId are not interchangeable.
// ABOUTME: This test should fail to compile, validating type safety.

use container_intents::types::{ContainerId, NetworkId};

fn main() {
    let _id: ContainerId = NetworkId::new("net123"); // ERROR: expected ContainerId, found NetworkId
}
