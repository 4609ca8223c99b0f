// ABOUTME: Phantom-typed identifiers handed out by the container engine.
// ABOUTME: Container, network and image ids share a representation but not a type.

use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for the phantom parameter. Empty enums cannot be instantiated.
pub enum ContainerMarker {}
pub enum NetworkMarker {}
pub enum ImageMarker {}

/// Engine-assigned identifier tagged with the kind of resource it names.
///
/// A `ContainerId` cannot be passed where a `NetworkId` is expected even though
/// both are plain strings on the wire.
#[must_use = "ids reference engine resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_inner(self) -> String {
        self.value
    }

    /// First twelve characters, the form `docker ps` prints.
    pub fn short(&self) -> &str {
        match self.value.char_indices().nth(12) {
            Some((idx, _)) => &self.value[..idx],
            None => &self.value,
        }
    }
}

// T is only a marker, so these impls must not require T: Trait.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

pub type ContainerId = Id<ContainerMarker>;
pub type NetworkId = Id<NetworkMarker>;
pub type ImageId = Id<ImageMarker>;
