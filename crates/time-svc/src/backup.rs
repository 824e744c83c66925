//! Backup-domain write window.
//!
//! RTC calendar and alarm registers sit behind the PWR_CR.DBP write lock.
//! [`WriteWindow`] unlocks it on creation and locks it again when dropped,
//! so every return path (including `?`) leaves the domain write-protected.

use core::ops::{Deref, DerefMut};

use platform::RtcPeripheral;

/// Open backup-domain write access for the lifetime of the guard.
///
/// The guard borrows the peripheral mutably and derefs to it; register
/// writes go through the guard.
///
/// ```
/// # use platform::mocks::MockRtc;
/// # use time_svc::backup::WriteWindow;
/// let mut rtc = MockRtc::cold();
/// {
///     let _window = WriteWindow::open(&mut rtc);
/// }
/// assert!(!rtc.backup_access());
/// ```
pub struct WriteWindow<'a, P: RtcPeripheral> {
    peripheral: &'a mut P,
}

impl<'a, P: RtcPeripheral> WriteWindow<'a, P> {
    /// Enable backup-domain write access.
    pub fn open(peripheral: &'a mut P) -> Self {
        trace!("rtc: backup write window open");
        peripheral.set_backup_access(true);
        Self { peripheral }
    }
}

impl<P: RtcPeripheral> Deref for WriteWindow<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.peripheral
    }
}

impl<P: RtcPeripheral> DerefMut for WriteWindow<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.peripheral
    }
}

impl<P: RtcPeripheral> Drop for WriteWindow<'_, P> {
    fn drop(&mut self) {
        self.peripheral.set_backup_access(false);
        trace!("rtc: backup write window closed");
    }
}
