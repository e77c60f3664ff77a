//! Push-button abstractions
//!
//! The controller never looks at raw button edges. It only asks how many
//! presses happened since it last asked, which is how the press counters
//! on the board behave.
//!
//! [`SharedPressCounter`] is the usual implementation: an interrupt-driven
//! task records presses into it and the control loop drains it.

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// A button that counts presses in the background
pub trait PressCounter {
    /// Number of presses since the previous call
    ///
    /// Reading drains the counter: a second call with no new presses
    /// in between returns 0.
    fn take_presses(&mut self) -> u32;

    /// Whether the button is held down right now
    fn is_pressed(&self) -> bool;
}

impl<T: PressCounter + ?Sized> PressCounter for &mut T {
    fn take_presses(&mut self) -> u32 {
        (**self).take_presses()
    }

    fn is_pressed(&self) -> bool {
        (**self).is_pressed()
    }
}

/// Press counter shared between a button task and the control loop
///
/// Lives in a `static`; the writer side uses [`record_press`] and
/// [`set_held`], the reader side a `&SharedPressCounter` as a
/// [`PressCounter`].
///
/// [`record_press`]: SharedPressCounter::record_press
/// [`set_held`]: SharedPressCounter::set_held
pub struct SharedPressCounter {
    presses: AtomicU32,
    held: AtomicBool,
}

impl SharedPressCounter {
    pub const fn new() -> Self {
        Self {
            presses: AtomicU32::new(0),
            held: AtomicBool::new(false),
        }
    }

    /// Count one debounced press
    pub fn record_press(&self) {
        self.presses.fetch_add(1, Ordering::Relaxed);
    }

    /// Update the held state
    pub fn set_held(&self, held: bool) {
        self.held.store(held, Ordering::Relaxed);
    }

    /// Presses not yet drained
    pub fn pending(&self) -> u32 {
        self.presses.load(Ordering::Relaxed)
    }
}

impl Default for SharedPressCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PressCounter for &SharedPressCounter {
    fn take_presses(&mut self) -> u32 {
        self.presses.swap(0, Ordering::AcqRel)
    }

    fn is_pressed(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }
}
