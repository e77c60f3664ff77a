//! User feedback trait

/// Write-only feedback surface (LED matrix, log, ...)
///
/// Feedback never influences control flow. Implementations should return
/// quickly; a scrolling display must scroll in the background.
pub trait Feedback {
    /// Show a brightness level
    fn show_level(&mut self, level: u8);

    /// Show a short status message
    fn show_text(&mut self, text: &str);
}

impl<T: Feedback + ?Sized> Feedback for &mut T {
    fn show_level(&mut self, level: u8) {
        (**self).show_level(level);
    }

    fn show_text(&mut self, text: &str) {
        (**self).show_text(text);
    }
}
