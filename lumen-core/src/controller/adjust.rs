//! Manual adjustment session driven through the controller
//!
//! The menu stays open for the whole session so that consecutive batches
//! of presses go straight to the directional lines.

use embedded_hal_async::delay::DelayNs;
use lumen_hal::{Clock, OutputPin, PressCounter};

use super::report::StoreStatus;
use super::Controller;
use crate::session::AdjustSession;
use crate::traits::{CurveStore, Feedback, SensorBank};

impl<P, D, C, S, B, F, St> Controller<P, D, C, S, B, F, St>
where
    P: OutputPin,
    D: DelayNs,
    C: Clock,
    S: SensorBank,
    B: PressCounter,
    F: Feedback,
    St: CurveStore,
{
    /// Run a session until the buttons go idle
    ///
    /// `light` is the sample taken when the session was triggered; a
    /// changed result is recorded against its bucket. Returns the final
    /// brightness and what happened to the corrected curve.
    pub(super) async fn run_session(&mut self, light: u16) -> (u8, StoreStatus) {
        let start = self.state.current_brightness;
        self.feedback.show_level(start);
        self.panel.open_menu(&mut self.delay).await;

        let mut session = AdjustSession::new(start, self.clock.now_ms(), &self.config.session);

        loop {
            let presses = self.buttons.drain();
            if let Some(delta) = session.apply(presses) {
                self.panel
                    .change_brightness(&mut self.delay, delta, false)
                    .await;
                self.feedback.show_level(session.level());
                session.mark_input(self.clock.now_ms());
            }

            if session.is_idle(self.clock.now_ms()) {
                break;
            }
            self.delay.delay_ms(self.config.session.poll_ms).await;
        }

        self.panel.close_menu(&mut self.delay).await;

        if !session.changed() {
            return (session.level(), StoreStatus::Unchanged);
        }

        self.map.update_on_user_correction(light, session.level());
        let store = match self.store.save(&self.map).await {
            Ok(()) => StoreStatus::Saved,
            Err(e) => StoreStatus::Failed(e),
        };
        (session.level(), store)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ControllerConfig;
    use crate::controller::{LoopAction, StoreStatus};
    use crate::curve::BrightnessMap;
    use crate::testing::{Button, Line, Sim, SimController};
    use crate::traits::StoreError;
    use embassy_futures::block_on;
    use lumen_hal::FlashError;

    /// Menu open press plus render wait
    const OPEN_MS: u64 = 130 + 500;

    fn awake_at(sim: &Sim, light: u16) -> SimController<'_> {
        sim.queue_power(&[750]);
        sim.queue_light(&[light]);
        let mut controller = sim.controller(ControllerConfig::default());
        block_on(controller.step());
        sim.clear_edges();
        controller
    }

    #[test]
    fn test_idle_session_exits_unchanged() {
        let sim = Sim::new();
        let mut controller = awake_at(&sim, 400);
        let t0 = sim.now();

        sim.press_now(Button::A, 1);
        let report = block_on(controller.step());
        assert_eq!(
            report.action,
            LoopAction::Adjusted {
                from: 40,
                to: 40,
                store: StoreStatus::Unchanged
            }
        );

        // Triggering press is not applied
        assert_eq!(sim.presses(Line::Down), 0);
        assert_eq!(sim.presses(Line::Up), 1);
        let idle = sim.first_press_at(Line::Menu).unwrap() - (t0 + OPEN_MS);
        assert!((3_000..=3_050).contains(&idle), "idle for {idle} ms");

        assert_eq!(sim.levels(), [40, 40]);
        assert_eq!(sim.saves(), 0);
        assert_eq!(*controller.map(), BrightnessMap::new());
    }

    #[test]
    fn test_session_adjusts_and_corrects_curve() {
        let sim = Sim::new();
        let mut controller = awake_at(&sim, 400);
        let t0 = sim.now();

        sim.press_now(Button::B, 1);
        sim.press_at(Button::B, t0 + 1_000, 2);
        let report = block_on(controller.step());
        assert_eq!(
            report.action,
            LoopAction::Adjusted {
                from: 40,
                to: 50,
                store: StoreStatus::Saved
            }
        );

        // Open, then ten steps inside the open menu, then close
        assert_eq!(sim.presses(Line::Up), 1 + 10);
        assert_eq!(sim.presses(Line::Menu), 1);
        let changed_at = t0 + 1_030 + 10 * 130;
        assert_eq!(sim.first_press_at(Line::Menu), Some(changed_at + 3_050));
        assert_eq!(sim.levels(), [40, 40, 50]);

        let map = controller.map();
        assert_eq!(map.lookup(400), 50);
        assert_eq!(map.lookup(450), 50);
        assert_eq!(map.lookup(350), 35);
        assert_eq!(map.lookup(1000), 100);
        assert!(map.is_monotonic());
        assert_eq!(sim.stored(), Some(*map));
        assert_eq!(sim.saves(), 1);

        let state = controller.state();
        assert_eq!(state.current_brightness, 50);
        assert_eq!(state.last_applied_light, Some(400));
    }

    #[test]
    fn test_session_presses_down() {
        let sim = Sim::new();
        let mut controller = awake_at(&sim, 400);
        let t0 = sim.now();

        sim.press_now(Button::A, 1);
        sim.press_at(Button::A, t0 + 700, 3);
        let report = block_on(controller.step());
        assert_eq!(
            report.action,
            LoopAction::Adjusted {
                from: 40,
                to: 25,
                store: StoreStatus::Saved
            }
        );
        assert_eq!(sim.presses(Line::Down), 15);
        assert_eq!(controller.map().lookup(0), 0);
        assert_eq!(controller.map().lookup(300), 25);
    }

    #[test]
    fn test_session_clamps_at_floor() {
        let sim = Sim::new();
        let mut controller = awake_at(&sim, 0);
        let t0 = sim.now();

        sim.press_now(Button::A, 1);
        sim.press_at(Button::A, t0 + 1_000, 3);
        let report = block_on(controller.step());
        assert_eq!(
            report.action,
            LoopAction::Adjusted {
                from: 0,
                to: 0,
                store: StoreStatus::Unchanged
            }
        );

        // Presses at the floor are not activity
        assert_eq!(sim.presses(Line::Down), 0);
        let idle = sim.first_press_at(Line::Menu).unwrap() - (t0 + OPEN_MS);
        assert!((3_000..=3_050).contains(&idle));
    }

    #[test]
    fn test_session_clamps_at_ceiling() {
        let sim = Sim::new();
        let mut controller = awake_at(&sim, 900);
        let t0 = sim.now();

        sim.press_now(Button::B, 1);
        sim.press_at(Button::B, t0 + 1_000, 5);
        let report = block_on(controller.step());
        assert_eq!(
            report.action,
            LoopAction::Adjusted {
                from: 90,
                to: 100,
                store: StoreStatus::Saved
            }
        );
        assert_eq!(sim.presses(Line::Up), 1 + 10);
    }

    #[test]
    fn test_save_failure_keeps_correction() {
        let sim = Sim::new();
        sim.fail_saves(true);
        let mut controller = awake_at(&sim, 400);
        let t0 = sim.now();

        sim.press_now(Button::B, 1);
        sim.press_at(Button::B, t0 + 1_000, 1);
        let report = block_on(controller.step());
        assert_eq!(
            report.action,
            LoopAction::Adjusted {
                from: 40,
                to: 45,
                store: StoreStatus::Failed(StoreError::Flash(FlashError::Full))
            }
        );
        assert_eq!(controller.map().lookup(400), 45);
        assert_eq!(controller.state().current_brightness, 45);
        assert_eq!(sim.stored(), None);
    }

    #[test]
    fn test_manual_level_then_auto_holds() {
        let sim = Sim::new();
        let mut controller = awake_at(&sim, 400);
        let t0 = sim.now();

        sim.press_now(Button::B, 1);
        sim.press_at(Button::B, t0 + 1_000, 2);
        block_on(controller.step());

        sim.clear_edges();
        let report = block_on(controller.step());
        assert_eq!(report.action, LoopAction::Held { light: 400 });
        assert!(sim.press_order().is_empty());
    }
}
