//! Monitor front-panel driver
//!
//! Presses the monitor's Up, Down and Menu buttons by pulsing the output
//! lines wired across them. Every operation blocks (awaits) until the last
//! pulse and settle time have elapsed; nothing here can be cancelled
//! halfway, because the monitor's menu firmware cannot be interrupted
//! either.

use embedded_hal_async::delay::DelayNs;
use lumen_hal::OutputPin;

use crate::config::PanelTiming;
use crate::traits::Feedback;

/// Message shown while the wake calibration runs
pub const CALIBRATING_TEXT: &str = "CALIBRATING";

/// One of the monitor's front-panel buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelButton {
    /// Brightness up; also opens the brightness menu
    Up,
    /// Brightness down
    Down,
    /// Closes the brightness menu
    Menu,
}

/// A batch of presses on one button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressCommand {
    pub button: PanelButton,
    pub count: u32,
}

impl PressCommand {
    pub const fn new(button: PanelButton, count: u32) -> Self {
        Self { button, count }
    }

    /// Directional presses for a brightness delta
    ///
    /// Negative deltas press Down, positive ones press Up.
    pub fn for_delta(delta: i16) -> Self {
        let button = if delta < 0 {
            PanelButton::Down
        } else {
            PanelButton::Up
        };
        Self::new(button, delta.unsigned_abs() as u32)
    }
}

/// Driver for the three button lines
pub struct MonitorPanel<P> {
    up: P,
    down: P,
    menu: P,
    timing: PanelTiming,
}

impl<P: OutputPin> MonitorPanel<P> {
    /// Create a panel driver; all lines are driven low
    pub fn new(up: P, down: P, menu: P, timing: PanelTiming) -> Self {
        let mut panel = Self {
            up,
            down,
            menu,
            timing,
        };
        panel.up.set_low();
        panel.down.set_low();
        panel.menu.set_low();
        panel
    }

    fn line(&mut self, button: PanelButton) -> &mut P {
        match button {
            PanelButton::Up => &mut self.up,
            PanelButton::Down => &mut self.down,
            PanelButton::Menu => &mut self.menu,
        }
    }

    /// Press `button` `count` times with an explicit pulse length
    pub async fn press_for<D: DelayNs>(
        &mut self,
        delay: &mut D,
        button: PanelButton,
        count: u32,
        pulse_ms: u32,
    ) {
        let gap_ms = self.timing.gap_ms;
        for _ in 0..count {
            self.line(button).set_high();
            delay.delay_ms(pulse_ms).await;
            self.line(button).set_low();
            delay.delay_ms(gap_ms).await;
        }
    }

    /// Press `button` `count` times with the standard pulse
    pub async fn press<D: DelayNs>(&mut self, delay: &mut D, button: PanelButton, count: u32) {
        let pulse_ms = self.timing.pulse_ms;
        self.press_for(delay, button, count, pulse_ms).await;
    }

    /// Execute a press command
    pub async fn execute<D: DelayNs>(&mut self, delay: &mut D, command: PressCommand) {
        self.press(delay, command.button, command.count).await;
    }

    /// Open the brightness menu (one Up press) and wait for it to render
    pub async fn open_menu<D: DelayNs>(&mut self, delay: &mut D) {
        self.press(delay, PanelButton::Up, 1).await;
        delay.delay_ms(self.timing.menu_open_ms).await;
    }

    /// Close the brightness menu (one Menu press)
    pub async fn close_menu<D: DelayNs>(&mut self, delay: &mut D) {
        self.press(delay, PanelButton::Menu, 1).await;
    }

    /// Step the monitor brightness by `delta`
    ///
    /// With `via_menu` the brightness menu is opened first and closed
    /// afterwards. Without it the caller must already have the menu open.
    /// A zero delta does nothing at all.
    pub async fn change_brightness<D: DelayNs>(
        &mut self,
        delay: &mut D,
        delta: i16,
        via_menu: bool,
    ) {
        if delta == 0 {
            return;
        }

        if via_menu {
            self.open_menu(delay).await;
        }

        self.execute(delay, PressCommand::for_delta(delta)).await;

        if via_menu {
            delay.delay_ms(self.timing.menu_close_ms).await;
            self.close_menu(delay).await;
        }
    }

    /// Drive the monitor to brightness 0 regardless of where it is
    ///
    /// Holds Down long enough to reach the floor from 100.
    pub async fn reset_to_zero<D: DelayNs, F: Feedback>(
        &mut self,
        delay: &mut D,
        feedback: &mut F,
    ) {
        feedback.show_text(CALIBRATING_TEXT);

        self.press(delay, PanelButton::Up, 1).await;
        delay.delay_ms(self.timing.reset_open_ms).await;

        let hold_ms = self.timing.reset_hold_ms;
        self.press_for(delay, PanelButton::Down, 1, hold_ms).await;
        delay.delay_ms(self.timing.reset_release_ms).await;

        self.close_menu(delay).await;
        delay.delay_ms(self.timing.reset_close_ms).await;
    }
}
