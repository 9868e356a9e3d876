//! Persistence abstraction for the configuration record.
//!
//! The configuration overlay (see [`crate::config`]) reads and writes one
//! opaque text record at a well-known location. On ESP32 that location is
//! an NVS entry; in tests it is an in-memory slot. Either way, failures
//! are reported but never fatal to the caller.

extern crate alloc;
use alloc::string::String;

/// One-record text store for the persisted configuration.
pub trait ConfigStore {
    /// Error type for read/write failures.
    type Error: core::fmt::Debug;

    /// Read the stored record.
    ///
    /// Returns `Ok(None)` when no record has ever been written — this is
    /// the normal first-boot case, distinct from a read failure.
    fn read(&mut self) -> Result<Option<String>, Self::Error>;

    /// Replace the stored record.
    fn write(&mut self, contents: &str) -> Result<(), Self::Error>;
}
