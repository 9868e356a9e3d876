//! Doorbell button on a pulled-up GPIO with a falling-edge interrupt.
//!
//! The ISR does the minimum possible: it notifies the press-service
//! context and returns. Debounce sampling and everything downstream of
//! it run in that context, not in the ISR.
//!
//! esp-idf disarms a GPIO interrupt when it fires; this driver re-arms
//! it only when [`await_falling_edge`](Esp32Button::await_falling_edge)
//! is called again. Edges that arrive while a press is being serviced
//! are therefore dropped — at most one press is in flight at a time.

use crate::traits::InputLine;
use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, Input, InterruptType, PinDriver, Pull};
use esp_idf_hal::task::notification::Notification;
use std::num::NonZeroU32;

/// Interrupt-driven button input.
pub struct Esp32Button {
    pin: PinDriver<'static, AnyIOPin, Input>,
    notification: Notification,
}

impl Esp32Button {
    /// Configure `pin_number` as a pulled-up input and register the
    /// edge callback. The callback is registered exactly once here and
    /// never re-registered.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO initialization or ISR registration
    /// fails.
    pub fn new(pin_number: i32) -> anyhow::Result<Self> {
        // Safety: the composition root hands each configured pin number
        // to exactly one driver.
        let io = unsafe { AnyIOPin::new(pin_number) };
        let mut pin = PinDriver::input(io)?;
        pin.set_pull(Pull::Up)?;
        pin.set_interrupt_type(InterruptType::NegEdge)?;

        let notification = Notification::new();
        let notifier = notification.notifier();
        // Safety: the ISR touches only the notifier, which is Send + Sync.
        unsafe {
            pin.subscribe(move || {
                notifier.notify_and_yield(NonZeroU32::new(1).unwrap());
            })?;
        }

        Ok(Self { pin, notification })
    }

    /// Block until the next falling edge.
    ///
    /// Re-arms the interrupt before waiting, so edges during the
    /// previous press's servicing window were dropped, not queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the interrupt cannot be re-armed.
    pub fn await_falling_edge(&mut self) -> anyhow::Result<()> {
        self.pin.enable_interrupt()?;
        self.notification.wait(BLOCK);
        Ok(())
    }
}

impl InputLine for Esp32Button {
    fn is_active(&mut self) -> bool {
        // Active low: pressed shorts the pulled-up pin to ground
        self.pin.is_low()
    }
}
