//! Blocking delay backed by the FreeRTOS tick sleep.
//!
//! Yields the calling task to the scheduler, so a blink or a retry wait
//! does not starve the Wi-Fi and MQTT housekeeping tasks.

use crate::traits::Delay;
use embedded_hal::delay::DelayNs;
use esp_idf_hal::delay::FreeRtos;

/// FreeRTOS-backed [`Delay`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Delay;

impl Esp32Delay {
    /// Creates a new delay source.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Delay for Esp32Delay {
    fn delay_ms(&mut self, ms: u32) {
        FreeRtos.delay_ms(ms);
    }
}
