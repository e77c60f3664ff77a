//! Controller task
//!
//! Runs the brightness control loop forever and logs what each
//! iteration did.

use defmt::*;
use embassy_time::Delay;
use lumen_core::state::PowerTransition;
use lumen_core::{Controller, LoopAction, StepReport, StoreStatus};
use lumen_hal::SharedPressCounter;
use lumen_hal_rp2040::adc::AdcSensors;
use lumen_hal_rp2040::gpio::PanelLine;
use lumen_hal_rp2040::time::EmbassyClock;

use crate::feedback::ChannelFeedback;
use crate::store::BoardStore;

/// The controller wired to this board
pub type BoardController = Controller<
    PanelLine<'static>,
    Delay,
    EmbassyClock,
    AdcSensors<'static>,
    &'static SharedPressCounter,
    ChannelFeedback,
    BoardStore,
>;

#[embassy_executor::task]
pub async fn controller_task(mut controller: BoardController) {
    info!("Controller task started");

    match controller.restore_curve().await {
        Ok(true) => info!("Restored brightness curve from flash"),
        Ok(false) => debug!("No stored brightness curve, using default"),
        Err(e) => warn!("Failed to restore brightness curve: {:?}, using default", e),
    }

    loop {
        let report = controller.step().await;
        log_report(&report);
    }
}

fn log_report(report: &StepReport) {
    match report.transition {
        Some(PowerTransition::Woke) => info!("Monitor on, calibrated to brightness 0"),
        Some(PowerTransition::Slept) => info!("Monitor off"),
        None => {}
    }

    match report.action {
        LoopAction::Asleep | LoopAction::Slept => {}
        LoopAction::Adjusted { from, to, store } => {
            if report.changed_brightness() {
                info!("Manual adjustment {} -> {}", from, to);
            } else {
                debug!("Adjustment session left brightness at {}", to);
            }
            if let StoreStatus::Failed(e) = store {
                warn!("Failed to save brightness curve: {:?}", e);
            }
        }
        LoopAction::Applied { from, to, light } => {
            info!("Light {}: brightness {} -> {}", light, from, to);
        }
        LoopAction::Held { light } => trace!("Light {} within hysteresis", light),
        LoopAction::Unchanged { light } => trace!("Light {}: brightness unchanged", light),
    }
}
