//! Lock serializing read-modify-write cycles on the configuration registers.
//!
//! CONFIG and MEASUREMENT_CONFIG pack several unrelated settings into one
//! byte each and the device has no field-level write. Two overlapping
//! read-modify-write cycles would silently drop one of the changes, so every
//! driver that may touch the same device must share one `ConfigLock`. A single
//! lock covers both registers and every driver instance handed to it.
//!
//! Async updates wait for the lock. Blocking updates never wait: a blocking
//! caller that finds the lock taken, by an async update suspended mid-cycle or
//! by another thread, gets [`Error::ConfigBusy`]. The bus transactions run
//! outside any critical section; the raw mutex is only held while the lock
//! flag itself is taken or released.
//!
//! ```
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use hdc2010_rs::ConfigLock;
//!
//! static CONFIG_LOCK: ConfigLock<CriticalSectionRawMutex> = ConfigLock::new();
//! ```

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex;

use crate::error::Error;

pub struct ConfigLock<M: RawMutex> {
    shared: mutex::Mutex<M, ()>,
}

impl<M: RawMutex> ConfigLock<M> {
    pub const fn new() -> Self {
        Self {
            shared: mutex::Mutex::new(()),
        }
    }

    /// Snapshot for diagnostics: true if an update held the lock at the
    /// moment of the call. May be stale by the time it returns.
    pub fn is_locked(&self) -> bool {
        self.shared.try_lock().is_err()
    }

    /// Run a blocking update with the lock held.
    ///
    /// Fails with [`Error::ConfigBusy`] instead of waiting when the lock is taken.
    pub(crate) fn run_blocking<T, E>(&self, f: impl FnOnce() -> Result<T, Error<E>>) -> Result<T, Error<E>> {
        let _guard = self.shared.try_lock().map_err(|_| Error::ConfigBusy)?;
        f()
    }

    /// Wait for the lock. Dropping the guard releases it.
    #[cfg(feature = "async")]
    pub(crate) async fn acquire(&self) -> mutex::MutexGuard<'_, M, ()> {
        self.shared.lock().await
    }
}

impl<M: RawMutex> Default for ConfigLock<M> {
    fn default() -> Self {
        Self::new()
    }
}
