//! Indicator LED on a GPIO output.

use crate::traits::IndicatorLine;
use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};

/// One LED output line.
pub struct Esp32Led {
    pin: PinDriver<'static, AnyOutputPin, Output>,
}

impl Esp32Led {
    /// Configure `pin_number` as an output, initially low.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization fails.
    pub fn new(pin_number: i32) -> anyhow::Result<Self> {
        // Safety: the composition root hands each configured pin number
        // to exactly one driver.
        let io = unsafe { AnyOutputPin::new(pin_number) };
        let pin = PinDriver::output(io)?;
        Ok(Self { pin })
    }
}

impl IndicatorLine for Esp32Led {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
    }
}
