// ABOUTME: Compile-fail test verifying an intent is consumed by perform.
// ABOUTME: This test should fail to compile, validating single use.

use container_intents::controller::{ContainerController, ContainerProvider, StartContainerIntent};
use container_intents::docker::DockerContainerProvider;
use container_intents::types::ContainerId;

async fn start_twice() {
    let controller = DockerContainerProvider::default().lazy_controller();
    let intent = controller.start_container_intent(&ContainerId::new("abc"));
    let _ = StartContainerIntent::perform(intent).await;
    let _ = StartContainerIntent::perform(intent).await; // ERROR: use of moved value: `intent`
}

fn main() {
    let _ = start_twice();
}
