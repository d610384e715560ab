//! Board component adapters

use embassy_rp::gpio::Output;

use obscura_core::traits::Indicator;

/// Onboard LED as the host-visible status indicator
pub struct LedIndicator {
    pin: Output<'static>,
}

impl LedIndicator {
    pub fn new(pin: Output<'static>) -> Self {
        Self { pin }
    }
}

impl Indicator for LedIndicator {
    fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}
