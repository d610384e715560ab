//! Status indicator trait

/// Trait for the board status indicator
///
/// A single on/off lamp, usually the onboard LED. The host drives it
/// through dedicated commands; the firmware also latches it on to signal
/// a fatal storage failure.
pub trait Indicator {
    /// Turn the indicator on or off
    fn set(&mut self, on: bool);
}
