//! Randomised show/close sequences
//!
//! Seeds are fixed so a failure reproduces exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::foundation::math::Point;
use crate::modal::ModalLifecycleState;

#[derive(Debug, Clone, Copy)]
enum Action {
    Show,
    Close,
    SystemClose,
    ClickParent,
}

impl Action {
    fn pick(rng: &mut StdRng) -> Self {
        match rng.gen_range(0..4) {
            0 => Self::Show,
            1 => Self::Close,
            2 => Self::SystemClose,
            _ => Self::ClickParent,
        }
    }
}

fn check_invariants(controller: &Controller, host: WindowId, step: usize, action: Action) {
    let backend = controller.backend();
    let context = format!("step {} after {:?}", step, action);

    assert!(controller.registry().live_modal_count() <= 1, "{}", context);
    assert!(backend.live_popup_count() <= 1, "{}", context);

    match controller.state() {
        ModalLifecycleState::Shown => {
            assert!(!backend.is_input_enabled(host), "{}", context);
            assert!(!controller.parent().unwrap().input_enabled, "{}", context);
            assert_eq!(controller.registry().live_modal_count(), 1, "{}", context);
        }
        ModalLifecycleState::Absent => {
            assert!(backend.is_input_enabled(host), "{}", context);
            assert!(controller.parent().unwrap().input_enabled, "{}", context);
            assert_eq!(backend.foreground(), Some(host), "{}", context);
            assert_eq!(controller.registry().live_modal_count(), 0, "{}", context);
            assert_eq!(backend.live_popup_count(), 0, "{}", context);
        }
        other => panic!("{}: transient state {:?} observed", context, other),
    }
}

fn run_sequence(seed: u64, steps: usize) {
    let (mut controller, host) = attached_controller();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut responsive_clicks = 0;

    for step in 0..steps {
        let action = Action::pick(&mut rng);
        match action {
            Action::Show => {
                let status = controller.request_show().unwrap();
                assert_eq!(status.state(), ModalLifecycleState::Shown);
            }
            Action::Close => {
                controller.request_close();
            }
            Action::SystemClose => {
                let had_modal = controller.modal_surface().is_some();
                assert_eq!(system_close(&mut controller), had_modal);
            }
            Action::ClickParent => {
                let delivered = controller.backend_mut().click(host, Point::new(40, 80));
                assert_eq!(delivered, controller.state() == ModalLifecycleState::Absent);
                if delivered {
                    responsive_clicks += 1;
                }
            }
        }
        dispatch_platform_events(&mut controller);
        check_invariants(&controller, host, step, action);
    }

    controller.shutdown();
    check_invariants(&controller, host, steps, Action::Close);
    assert_eq!(
        controller.lifecycle().created_total(),
        controller.lifecycle().destroyed_total()
    );
    log::debug!("seed {}: {} responsive clicks", seed, responsive_clicks);
}

#[test]
fn test_random_sequences_hold_invariants() {
    for seed in [1, 7, 42, 1337, 0xDEAD_BEEF] {
        run_sequence(seed, 200);
    }
}

#[test]
fn test_long_random_sequence() {
    run_sequence(2024, 2000);
}
