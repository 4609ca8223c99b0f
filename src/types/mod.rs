// ABOUTME: Type-safe identifiers and parsed image references.
// ABOUTME: Phantom-typed ids keep container and network ids from being swapped.

mod id;
mod image_ref;

pub use id::{ContainerId, ImageId, NetworkId};
pub use image_ref::{ImageRef, ParseImageRefError};
