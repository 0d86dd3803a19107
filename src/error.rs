//! Unified error types for the IRLatch firmware.
//!
//! This is a fail-safe polling loop: almost nothing is fallible at
//! runtime. The variants here cover the boot path (peripheral and
//! capture-driver bring-up) and configuration loading; steady-state
//! storage problems are typed separately on the ports and logged rather
//! than propagated. All variants are `Copy` so they can be passed around
//! without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
    /// The IR capture driver failed.
    Capture(CaptureError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Capture(e) => write!(f, "capture: {e}"),
        }
    }
}

/// Errors from the RMT capture driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// RMT channel or ring buffer installation failed (IDF error code).
    DriverInstallFailed(i32),
    /// A transmission exceeded the pulse buffer and was truncated.
    Overflow,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DriverInstallFailed(rc) => write!(f, "RMT driver install failed (rc={rc})"),
            Self::Overflow => write!(f, "pulse buffer overflow"),
        }
    }
}

impl From<CaptureError> for Error {
    fn from(e: CaptureError) -> Self {
        Self::Capture(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
