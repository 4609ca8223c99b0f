// ABOUTME: Top-level factory handing out controllers over a lazily resolved engine.

use super::container_controller::ContainerController;
use super::sealed::Sealed;

pub trait ContainerProvider: Sealed {
    type Controller: ContainerController;

    /// A controller whose engine client is resolved on first use.
    /// Never touches the network or the filesystem itself.
    fn lazy_controller(&self) -> Self::Controller;
}
