//! Backend selection module.
//!
//! This module defines the available execution strategies for elementwise kernels
//! and provides functions to set and get the current one.
//!
//! # Supported Backends
//!
//! - `Cpu` — Data-parallel kernels on the `rayon` thread pool (default).
//! - `Serial` — Plain iterator loops on the calling thread.
//!
//! The backend is stored globally using an `AtomicU8`, so it can be switched
//! at runtime without threading a configuration value through every call.
//! Results are identical under both backends; only scheduling differs.

use core::convert::TryFrom;
use core::sync::atomic::{AtomicU8, Ordering};

/// Enumeration of supported kernel backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Backend {
    /// Rayon-parallel CPU kernels (default).
    #[default]
    Cpu = 0,
    /// Single-threaded CPU kernels.
    Serial,
}

impl TryFrom<u8> for Backend {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Cpu),
            1 => Ok(Self::Serial),
            _ => Err(()),
        }
    }
}

/// Internal global state for the active backend.
static GLOBAL_DEFAULT_BACKEND: AtomicU8 = AtomicU8::new(Backend::Cpu as u8);

/// Sets the active backend used by [`crate::ops::dispatch`].
///
/// # Example
///
/// ```
/// use micronode::backend::{set_backend, Backend};
/// set_backend(Backend::Serial);
/// # set_backend(Backend::Cpu);
/// ```
pub fn set_backend(b: Backend) {
    log::debug!("switching kernel backend to {b:?}");
    GLOBAL_DEFAULT_BACKEND.store(b as u8, Ordering::Release);
}

/// Returns the currently active backend.
///
/// If the stored value is invalid, defaults to [`Backend::Cpu`].
pub fn get_backend() -> Backend {
    Backend::try_from(GLOBAL_DEFAULT_BACKEND.load(Ordering::Acquire)).unwrap_or_default()
}
