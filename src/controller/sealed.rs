// ABOUTME: Sealed trait pattern for intent and controller traits.
// ABOUTME: Prevents external implementations, allowing non-breaking evolution.

/// Only engine adapters inside this crate implement the intent traits.
/// New mutators can then be added without breaking downstream code.
pub trait Sealed {}
