//! Scenario tests for the modal lifecycle against the headless backend

mod random_sequences;

use crate::config::ModalWindowConfig;
use crate::foundation::logging;
use crate::foundation::math::Extent;
use crate::modal::{ModalEventHandler, ModalLifecycleController};
use crate::platform::{HeadlessBackend, NativeEvent, SurfaceContent, WindowId, WindowingBackend};

type Controller = ModalLifecycleController<HeadlessBackend>;

/// Controller with a host window created but no parent surface attached
fn detached_controller() -> (Controller, WindowId) {
    logging::init_for_tests();
    let mut backend = HeadlessBackend::new();
    let host = backend
        .create_window("Modal IsModal Test - Parent Window", Extent::new(600, 400))
        .unwrap();
    (ModalLifecycleController::new(backend, ModalWindowConfig::default()), host)
}

/// Controller with the parent surface attached
fn attached_controller() -> (Controller, WindowId) {
    let (mut controller, host) = detached_controller();
    controller
        .attach_parent(host, &SurfaceContent::new(Extent::new(800, 600)))
        .unwrap();
    (controller, host)
}

/// Route pending platform events the way the host loop does
///
/// Returns the number of events routed.
fn dispatch_platform_events(controller: &mut Controller) -> usize {
    let events = controller.backend_mut().poll_events();
    let count = events.len();
    for event in events {
        match event {
            NativeEvent::CloseRequested(window) => {
                if !controller.on_close_requested(window) {
                    let _ = controller.backend_mut().destroy_window(window);
                }
            }
            NativeEvent::VisibilityChanged { window, visible } => {
                controller.on_visibility_changed(window, visible);
            }
            _ => {}
        }
    }
    count
}

/// Press the modal's title bar close button and route the result
fn system_close(controller: &mut Controller) -> bool {
    let Some(window) = controller.modal_surface().map(|surface| surface.window) else {
        return false;
    };
    let pressed = controller.backend_mut().click_close_button(window);
    dispatch_platform_events(controller);
    pressed
}
