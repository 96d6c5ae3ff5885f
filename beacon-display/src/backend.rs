//! Display backend trait
//!
//! Defines the rectangle-drawing interface widgets render through.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Coordinates or dimensions outside the panel
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Rectangle-capable display backend
///
/// Provides a hardware-agnostic interface for the rectangle primitives
/// widgets are built from. Implementations handle the specifics of
/// TFT, OLED, or other display types; `Color` is whatever pixel
/// representation the driver uses.
pub trait GraphicsBackend {
    /// Driver-specific color handle
    type Color: Copy;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Self::Color,
    ) -> Result<(), DisplayError>;

    /// Draw a rectangle outline
    fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Self::Color,
    ) -> Result<(), DisplayError>;

    /// Get panel dimensions in pixels
    fn pixel_dimensions(&self) -> (u16, u16);
}
