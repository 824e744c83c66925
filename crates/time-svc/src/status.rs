//! Peripheral status translation.
//!
//! Every status code coming out of the register layer is translated exactly
//! once, here, at the driver boundary. Unknown codes map to
//! [`RtcError::HardwareFault`]: an unrecognised status must never be read as
//! success.

use platform::HalStatus;

use crate::error::RtcError;

/// Translate a peripheral status into a driver result.
///
/// | Status | Result |
/// |---|---|
/// | `OK` | `Ok(())` |
/// | `BUSY` | [`RtcError::Busy`] |
/// | `TIMEOUT` | [`RtcError::TimedOut`] |
/// | `ERROR` or anything else | [`RtcError::HardwareFault`] |
pub const fn translate(status: HalStatus) -> Result<(), RtcError> {
    match status {
        HalStatus::OK => Ok(()),
        HalStatus::BUSY => Err(RtcError::Busy),
        HalStatus::TIMEOUT => Err(RtcError::TimedOut),
        _ => Err(RtcError::HardwareFault),
    }
}

/// Error side of [`translate`], used for `Result<_, HalStatus>` reads.
///
/// A register layer that reports `OK` as an error is itself broken, so that
/// case is a hardware fault as well.
impl From<HalStatus> for RtcError {
    fn from(status: HalStatus) -> Self {
        match translate(status) {
            Err(err) => err,
            Ok(()) => RtcError::HardwareFault,
        }
    }
}
