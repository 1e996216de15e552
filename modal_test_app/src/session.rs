//! Scripted interaction session
//!
//! Plays a list of simulated user actions against the headless backend, one
//! dispatch tick at a time, then checks that nothing leaked and the parent
//! window was left usable.

use site_bridge::config::{ScriptAction, ScriptStep};
use site_bridge::foundation::math::Point;
use site_bridge::prelude::*;

/// Ticks pumped after the last scripted step before the session gives up
const SETTLE_TICKS: u64 = 5;

pub struct Session {
    host: ModalTestHost<HeadlessBackend>,
    steps: Vec<ScriptStep>,
    next_step: usize,
}

impl Session {
    pub fn new(host: ModalTestHost<HeadlessBackend>, script: &[ScriptStep]) -> Self {
        let steps = expand(script);
        log::info!("Scripted session with {} actions", steps.len());
        Self {
            host,
            steps,
            next_step: 0,
        }
    }

    /// Pump the host until the script is done or the parent goes away
    pub fn run(&mut self) {
        let last_tick = self.steps.last().map_or(0, |step| step.at);

        while self.host.is_running() {
            let tick = self.host.tick() + 1;
            while let Some(step) = self.steps.get(self.next_step).copied().filter(|s| s.at <= tick) {
                self.next_step += 1;
                log::debug!("tick {}: {:?}", tick, step.action);
                self.perform(step.action);
            }

            self.host.pump();
            if tick >= last_tick + SETTLE_TICKS {
                break;
            }
        }

        if self.host.is_running() {
            log::info!("Script finished with the parent window open; shutting down");
            self.host.shutdown();
        }
    }

    fn perform(&mut self, action: ScriptAction) {
        let parent = self.host.parent_window();
        match action {
            ScriptAction::ShowModal => {
                if !self.host.backend_mut().press_button(parent, CommandId::ShowModal) {
                    log::info!("Show Modal press blocked: parent is disabled");
                }
            }
            ScriptAction::CloseModal => {
                if !self.host.backend_mut().press_button(parent, CommandId::CloseModal) {
                    log::info!("Close Modal press blocked: parent is disabled");
                }
            }
            ScriptAction::CloseModalWindow => {
                let modal = self.host.controller().modal_surface().map(|surface| surface.window);
                match modal {
                    Some(window) => {
                        if !self.host.backend_mut().click_close_button(window) {
                            log::warn!("Modal {} has no reachable close button", window);
                        }
                    }
                    None => log::info!("No modal window to close"),
                }
            }
            ScriptAction::ClickParent { x, y } => {
                if !self.host.backend_mut().click(parent, Point::new(x, y)) {
                    log::info!("Parent click blocked while the modal is open");
                }
            }
            ScriptAction::CloseParentWindow => {
                if !self.host.backend_mut().request_window_close(parent) {
                    log::warn!("Parent window {} is already gone", parent);
                }
            }
            ScriptAction::RapidCycle { .. } => {
                log::warn!("Unexpanded rapid cycle step ignored");
            }
        }
    }

    /// Check end-of-session invariants; returns one message per failure
    pub fn verify(&self) -> Vec<String> {
        let controller = self.host.controller();
        let backend = self.host.backend();
        let lifecycle = controller.lifecycle();
        let mut failures = Vec::new();

        if controller.state() != ModalLifecycleState::Absent {
            failures.push(format!("modal left in state {:?}", controller.state()));
        }
        if controller.registry().live_modal_count() != 0 {
            failures.push(format!(
                "{} modal surface record(s) leaked",
                controller.registry().live_modal_count()
            ));
        }
        if backend.live_popup_count() != 0 {
            failures.push(format!("{} popup window(s) leaked", backend.live_popup_count()));
        }
        let parent_contents = usize::from(controller.parent().is_some());
        if backend.live_content_count() > parent_contents {
            failures.push(format!(
                "{} content island(s) leaked",
                backend.live_content_count() - parent_contents
            ));
        }
        if lifecycle.created_total() != lifecycle.destroyed_total() {
            failures.push(format!(
                "{} modals created but {} destroyed",
                lifecycle.created_total(),
                lifecycle.destroyed_total()
            ));
        }

        let parent = self.host.parent_window();
        if backend.window_exists(parent) && !backend.is_input_enabled(parent) {
            failures.push("parent window left disabled".to_string());
        }
        if controller.parent().is_some_and(|surface| !surface.input_enabled) {
            failures.push("parent surface recorded as disabled".to_string());
        }

        failures
    }

    pub fn log_summary(&self) {
        let stats = self.host.stats();
        let lifecycle = self.host.controller().lifecycle();
        log::info!("=== Session summary ===");
        log::info!("  ticks:              {}", self.host.tick());
        log::info!("  modals shown:       {}", stats.shows);
        log::info!("  modals closed:      {}", stats.closes);
        log::info!("  rejected shows:     {}", stats.rejected_shows);
        log::info!("  responsive clicks:  {}", stats.responsive_clicks);
        log::info!("  blocked inputs:     {}", self.host.backend().blocked_input_count());
        log::info!(
            "  surfaces:           {} created, {} destroyed",
            lifecycle.created_total(),
            lifecycle.destroyed_total()
        );
    }
}

/// Flatten rapid cycles into show / title-bar close pairs, ordered by tick
///
/// The close half goes through the modal's own close button because the
/// host's Close Modal button is unreachable while the modal is up.
fn expand(script: &[ScriptStep]) -> Vec<ScriptStep> {
    let mut steps = Vec::with_capacity(script.len());
    for step in script {
        match step.action {
            ScriptAction::RapidCycle { iterations } => {
                for i in 0..u64::from(iterations) {
                    steps.push(ScriptStep::new(step.at + 2 * i, ScriptAction::ShowModal));
                    steps.push(ScriptStep::new(step.at + 2 * i + 1, ScriptAction::CloseModalWindow));
                }
            }
            action => steps.push(ScriptStep::new(step.at, action)),
        }
    }
    steps.sort_by_key(|step| step.at);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &[ScriptStep]) -> Session {
        let host = ModalTestHost::startup(HeadlessBackend::new(), &ModalTestConfig::default()).unwrap();
        Session::new(host, script)
    }

    #[test]
    fn test_rapid_cycle_expansion() {
        let steps = expand(&[
            ScriptStep::new(10, ScriptAction::CloseParentWindow),
            ScriptStep::new(2, ScriptAction::RapidCycle { iterations: 2 }),
        ]);

        assert_eq!(
            steps,
            vec![
                ScriptStep::new(2, ScriptAction::ShowModal),
                ScriptStep::new(3, ScriptAction::CloseModalWindow),
                ScriptStep::new(4, ScriptAction::ShowModal),
                ScriptStep::new(5, ScriptAction::CloseModalWindow),
                ScriptStep::new(10, ScriptAction::CloseParentWindow),
            ]
        );
    }

    #[test]
    fn test_default_session_passes_checks() {
        let mut session = session(&ScriptStep::default_session());
        session.run();

        assert!(session.verify().is_empty(), "{:?}", session.verify());
        assert!(!session.host.is_running());
        let stats = session.host.stats();
        assert_eq!(stats.shows, 12);
        assert_eq!(stats.closes, 12);
        assert_eq!(stats.responsive_clicks, 1);
        // Second show press and first parent click hit the disabled parent
        assert_eq!(session.host.backend().blocked_input_count(), 2);
    }

    #[test]
    fn test_script_ending_with_open_modal_is_cleaned_up() {
        let mut session = session(&[ScriptStep::new(1, ScriptAction::ShowModal)]);
        session.run();

        assert!(session.verify().is_empty());
        assert_eq!(session.host.stats().closes, 1);
        assert!(session.host.backend().is_input_enabled(session.host.parent_window()));
    }

    #[test]
    fn test_disabled_parent_is_reported() {
        let mut session = session(&[]);
        let parent = session.host.parent_window();
        session.host.backend_mut().set_input_enabled(parent, false).unwrap();

        let failures = session.verify();

        assert_eq!(failures, vec!["parent window left disabled".to_string()]);
    }
}
