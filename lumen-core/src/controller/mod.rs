//! Main control loop
//!
//! [`Controller`] owns every collaborator and all mutable state: the
//! brightness curve, the power detector and the brightness bookkeeping.
//! Each call to [`Controller::step`] runs one iteration of the loop and
//! waits out that iteration's delays before returning, so the caller is
//! just `loop { controller.step().await; }`.
//!
//! ```text
//!   Asleep ──sense > threshold──▶ settle, reset to 0 ──▶ Awake
//!     ▲                                                    │
//!     └──────────────── sense <= threshold ────────────────┘
//! ```
//!
//! While awake, button presses take priority over the light curve.

mod adjust;
pub mod report;

use embedded_hal_async::delay::DelayNs;
use lumen_hal::{Clock, OutputPin, PressCounter};

use crate::actuator::MonitorPanel;
use crate::config::ControllerConfig;
use crate::curve::BrightnessMap;
use crate::session::ButtonPair;
use crate::state::{ControllerState, PowerDetector, PowerState, PowerTransition};
use crate::traits::{CurveStore, Feedback, SensorBank, StoreError};

pub use report::{LoopAction, StepReport, StoreStatus};

/// The brightness controller
pub struct Controller<P, D, C, S, B, F, St> {
    panel: MonitorPanel<P>,
    delay: D,
    clock: C,
    sensors: S,
    buttons: ButtonPair<B>,
    feedback: F,
    store: St,
    map: BrightnessMap,
    detector: PowerDetector,
    state: ControllerState,
    config: ControllerConfig,
}

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
    /// Create a controller; it starts asleep with the default curve
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        panel: MonitorPanel<P>,
        delay: D,
        clock: C,
        sensors: S,
        buttons: ButtonPair<B>,
        feedback: F,
        store: St,
        config: ControllerConfig,
    ) -> Self {
        Self {
            panel,
            delay,
            clock,
            sensors,
            buttons,
            feedback,
            store,
            map: BrightnessMap::new(),
            detector: PowerDetector::new(config.power.threshold),
            state: ControllerState::default(),
            config,
        }
    }

    /// Brightness bookkeeping
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Current brightness curve
    pub fn map(&self) -> &BrightnessMap {
        &self.map
    }

    /// Active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Replace the default curve with the stored one, if any
    ///
    /// Returns `Ok(true)` if a curve was restored. On error the default
    /// curve stays in place.
    pub async fn restore_curve(&mut self) -> Result<bool, StoreError> {
        match self.store.load().await? {
            Some(map) => {
                self.map = map;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Run one loop iteration
    pub async fn step(&mut self) -> StepReport {
        let sense = self.sensors.power_sense().await;
        let transition = self.detector.update(sense);
        self.state.power = self.detector.state();

        let action = match (transition, self.detector.state()) {
            (Some(PowerTransition::Slept), _) => {
                // Bookkeeping is rebuilt by the next wake calibration
                self.delay.delay_ms(self.config.power.asleep_poll_ms).await;
                LoopAction::Slept
            }
            (_, PowerState::Asleep) => {
                self.delay.delay_ms(self.config.power.asleep_poll_ms).await;
                LoopAction::Asleep
            }
            (wake, PowerState::Awake) => {
                if wake == Some(PowerTransition::Woke) {
                    self.wake().await;
                }
                let action = self.run_awake().await;
                self.delay.delay_ms(self.config.auto.loop_interval_ms).await;
                action
            }
        };

        StepReport::new(transition, action)
    }

    /// Wake calibration: drive the monitor to a known brightness of 0
    async fn wake(&mut self) {
        self.delay.delay_ms(self.config.power.wake_settle_ms).await;
        self.panel
            .reset_to_zero(&mut self.delay, &mut self.feedback)
            .await;
        self.state = ControllerState::calibrated();

        // Presses made while the monitor was off are stale
        self.buttons.drain();
    }

    async fn run_awake(&mut self) -> LoopAction {
        let light = self.sensors.light().await;
        let presses = self.buttons.drain();
        let from = self.state.current_brightness;

        if !presses.is_empty() {
            // The triggering presses only open the session
            let (to, store) = self.run_session(light).await;
            self.state.commit(to, light);
            return LoopAction::Adjusted { from, to, store };
        }

        if !self.state.light_moved(light, self.config.auto.hysteresis) {
            return LoopAction::Held { light };
        }

        let to = self.map.lookup(light);
        if to == from {
            return LoopAction::Unchanged { light };
        }

        self.feedback.show_level(to);
        let delta = to as i16 - from as i16;
        self.panel
            .change_brightness(&mut self.delay, delta, true)
            .await;
        self.delay.delay_ms(self.config.auto.settle_ms).await;
        self.state.commit(to, light);

        LoopAction::Applied { from, to, light }
    }
}
