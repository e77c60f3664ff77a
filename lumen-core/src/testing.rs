//! Simulated board for host tests
//!
//! Every part shares one [`Sim`]: delays advance its virtual clock, pins
//! record their edges against it, and scripted sensor samples and button
//! presses are served from it. Nothing runs concurrently, so `block_on`
//! drives a whole control-loop iteration to completion instantly.

use core::cell::{Cell, RefCell};
use std::collections::VecDeque;

use embedded_hal_async::delay::DelayNs;
use lumen_hal::{Clock, OutputPin, PressCounter};

use crate::actuator::MonitorPanel;
use crate::config::{ControllerConfig, PanelTiming};
use crate::controller::Controller;
use crate::session::ButtonPair;
use crate::curve::BrightnessMap;
use crate::traits::{CurveStore, Feedback, SensorBank, StoreError};

const NS_PER_MS: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Up,
    Down,
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    line: Line,
    high: bool,
    at_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledPress {
    button: Button,
    at_ms: u64,
    count: u32,
}

/// Scripted analog input: yields queued samples, then repeats the last one
#[derive(Debug, Default)]
struct Script {
    queue: VecDeque<u16>,
    last: u16,
    reads: usize,
}

impl Script {
    fn next(&mut self) -> u16 {
        if let Some(sample) = self.queue.pop_front() {
            self.last = sample;
        }
        self.reads += 1;
        self.last
    }
}

pub type SimController<'a> = Controller<
    SimPin<'a>,
    SimDelay<'a>,
    SimClock<'a>,
    SimSensors<'a>,
    SimButton<'a>,
    SimFeedback<'a>,
    MemStore<'a>,
>;

#[derive(Default)]
pub struct Sim {
    now_ns: Cell<u64>,
    edges: RefCell<Vec<Edge>>,
    light: RefCell<Script>,
    power: RefCell<Script>,
    presses: RefCell<Vec<ScheduledPress>>,
    levels: RefCell<Vec<u8>>,
    texts: RefCell<Vec<String>>,
    stored: RefCell<Option<BrightnessMap>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
}

impl Sim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> u64 {
        self.now_ns.get() / NS_PER_MS
    }

    fn advance_ns(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get() + ns);
    }

    // Parts

    pub fn pin(&self, line: Line) -> SimPin<'_> {
        SimPin {
            sim: self,
            line,
            high: false,
        }
    }

    pub fn panel(&self, timing: PanelTiming) -> MonitorPanel<SimPin<'_>> {
        MonitorPanel::new(
            self.pin(Line::Up),
            self.pin(Line::Down),
            self.pin(Line::Menu),
            timing,
        )
    }

    pub fn delay(&self) -> SimDelay<'_> {
        SimDelay { sim: self }
    }

    pub fn clock(&self) -> SimClock<'_> {
        SimClock { sim: self }
    }

    pub fn sensors(&self) -> SimSensors<'_> {
        SimSensors { sim: self }
    }

    pub fn button(&self, button: Button) -> SimButton<'_> {
        SimButton { sim: self, button }
    }

    pub fn buttons(&self) -> ButtonPair<SimButton<'_>> {
        ButtonPair::new(self.button(Button::A), self.button(Button::B))
    }

    pub fn feedback(&self) -> SimFeedback<'_> {
        SimFeedback { sim: self }
    }

    pub fn store(&self) -> MemStore<'_> {
        MemStore { sim: self }
    }

    pub fn controller(&self, config: ControllerConfig) -> SimController<'_> {
        Controller::new(
            self.panel(config.panel),
            self.delay(),
            self.clock(),
            self.sensors(),
            self.buttons(),
            self.feedback(),
            self.store(),
            config,
        )
    }

    // Scripting

    pub fn queue_light(&self, samples: &[u16]) {
        self.light.borrow_mut().queue.extend(samples);
    }

    pub fn queue_power(&self, samples: &[u16]) {
        self.power.borrow_mut().queue.extend(samples);
    }

    /// Make `count` presses of `button` visible from `at_ms` on
    pub fn press_at(&self, button: Button, at_ms: u64, count: u32) {
        self.presses.borrow_mut().push(ScheduledPress {
            button,
            at_ms,
            count,
        });
    }

    pub fn press_now(&self, button: Button, count: u32) {
        self.press_at(button, self.now(), count);
    }

    pub fn set_stored(&self, map: Option<BrightnessMap>) {
        *self.stored.borrow_mut() = map;
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    // Inspection

    /// Number of presses (rising edges) on a line
    pub fn presses(&self, line: Line) -> usize {
        self.press_order().iter().filter(|&&l| l == line).count()
    }

    /// Lines in the order they were pressed
    pub fn press_order(&self) -> Vec<Line> {
        self.edges
            .borrow()
            .iter()
            .filter(|e| e.high)
            .map(|e| e.line)
            .collect()
    }

    /// `(start_ms, held_ms)` for every completed pulse on a line
    pub fn pulses(&self, line: Line) -> Vec<(u64, u64)> {
        let mut pulses = Vec::new();
        let mut rose_at = None;
        for edge in self.edges.borrow().iter().filter(|e| e.line == line) {
            if edge.high {
                rose_at = Some(edge.at_ms);
            } else if let Some(start) = rose_at.take() {
                pulses.push((start, edge.at_ms - start));
            }
        }
        pulses
    }

    /// Time of the first rising edge on a line
    pub fn first_press_at(&self, line: Line) -> Option<u64> {
        self.pulses(line).first().map(|&(start, _)| start)
    }

    pub fn clear_edges(&self) {
        self.edges.borrow_mut().clear();
    }

    pub fn levels(&self) -> Vec<u8> {
        self.levels.borrow().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.borrow().clone()
    }

    pub fn light_reads(&self) -> usize {
        self.light.borrow().reads
    }

    pub fn stored(&self) -> Option<BrightnessMap> {
        *self.stored.borrow()
    }

    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

pub struct SimPin<'a> {
    sim: &'a Sim,
    line: Line,
    high: bool,
}

impl OutputPin for SimPin<'_> {
    fn set_high(&mut self) {
        self.high = true;
        self.sim.edges.borrow_mut().push(Edge {
            line: self.line,
            high: true,
            at_ms: self.sim.now(),
        });
    }

    fn set_low(&mut self) {
        // Only record real falling edges; construction drives lines low
        if self.high {
            self.sim.edges.borrow_mut().push(Edge {
                line: self.line,
                high: false,
                at_ms: self.sim.now(),
            });
        }
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

pub struct SimDelay<'a> {
    sim: &'a Sim,
}

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.sim.advance_ns(ns as u64);
    }

    async fn delay_us(&mut self, us: u32) {
        self.sim.advance_ns(us as u64 * 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.sim.advance_ns(ms as u64 * NS_PER_MS);
    }
}

pub struct SimClock<'a> {
    sim: &'a Sim,
}

impl Clock for SimClock<'_> {
    fn now_ms(&self) -> u64 {
        self.sim.now()
    }
}

pub struct SimSensors<'a> {
    sim: &'a Sim,
}

impl SensorBank for SimSensors<'_> {
    async fn light(&mut self) -> u16 {
        self.sim.light.borrow_mut().next()
    }

    async fn power_sense(&mut self) -> u16 {
        self.sim.power.borrow_mut().next()
    }
}

pub struct SimButton<'a> {
    sim: &'a Sim,
    button: Button,
}

impl PressCounter for SimButton<'_> {
    fn take_presses(&mut self) -> u32 {
        let now = self.sim.now();
        let mut total = 0;
        self.sim.presses.borrow_mut().retain(|p| {
            if p.button == self.button && p.at_ms <= now {
                total += p.count;
                false
            } else {
                true
            }
        });
        total
    }

    fn is_pressed(&self) -> bool {
        false
    }
}

pub struct SimFeedback<'a> {
    sim: &'a Sim,
}

impl Feedback for SimFeedback<'_> {
    fn show_level(&mut self, level: u8) {
        self.sim.levels.borrow_mut().push(level);
    }

    fn show_text(&mut self, text: &str) {
        self.sim.texts.borrow_mut().push(text.to_string());
    }
}

pub struct MemStore<'a> {
    sim: &'a Sim,
}

impl CurveStore for MemStore<'_> {
    async fn load(&mut self) -> Result<Option<BrightnessMap>, StoreError> {
        Ok(self.sim.stored())
    }

    async fn save(&mut self, map: &BrightnessMap) -> Result<(), StoreError> {
        if self.sim.fail_saves.get() {
            return Err(StoreError::Flash(lumen_hal::FlashError::Full));
        }
        self.sim.set_stored(Some(*map));
        self.sim.saves.set(self.sim.saves.get() + 1);
        Ok(())
    }
}
