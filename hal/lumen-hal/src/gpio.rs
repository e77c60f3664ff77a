//! GPIO pin abstractions
//!
//! Output lines only. Inputs on this board are the onboard buttons, which
//! are exposed as press counters instead (see [`crate::button`]).

/// Digital output pin
///
/// Writes cannot fail. The monitor's button lines are plain push-pull
/// outputs driving an opto-isolator or transistor.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }

    fn is_set_high(&self) -> bool {
        (**self).is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = MockPin { high: false };

        pin.set_state(true);
        assert!(pin.is_set_high());

        pin.set_state(false);
        assert!(pin.is_set_low());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn drive<P: OutputPin>(mut pin: P) {
            pin.set_high();
        }

        let mut pin = MockPin { high: false };
        drive(&mut pin);
        assert!(pin.high);
    }
}
