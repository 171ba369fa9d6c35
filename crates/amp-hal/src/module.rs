//! Module context and the single-device slot.
//!
//! The host contract allows at most one live device per module. The module is
//! an explicit context owning that slot; nothing here hides state in a
//! global. The exported C ABI surface owns the one process-wide context the
//! host demands, everything else (including every test) builds its own.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use amp_platform::mixer::MixerBackend;

use crate::clock::ClockGate;
use crate::config::HalConfig;
use crate::device::AmplifierDevice;
use crate::vendor::{OpenError, VendorDriverLoader};

/// Occupies the module's device slot for its lifetime; frees it on drop.
#[derive(Debug)]
pub(crate) struct SlotGuard {
    slot: Arc<AtomicBool>,
}

impl SlotGuard {
    /// Claim `slot`, or `None` if a device already holds it. A failed claim
    /// leaves the holder untouched.
    pub(crate) fn claim(slot: &Arc<AtomicBool>) -> Option<Self> {
        slot.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                slot: Arc::clone(slot),
            })
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
        tracing::debug!("amplifier device slot released");
    }
}

/// Amplifier module context: configuration, vendor loader, mixer backend,
/// and the single-occupancy device slot.
pub struct AmplifierModule<L, B> {
    config: HalConfig,
    loader: L,
    mixer: B,
    slot: Arc<AtomicBool>,
}

impl<L, B> AmplifierModule<L, B>
where
    L: VendorDriverLoader,
    B: MixerBackend + Clone,
{
    /// Create a module context with an empty device slot.
    pub fn new(config: HalConfig, loader: L, mixer: B) -> Self {
        Self {
            config,
            loader,
            mixer,
            slot: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Open the amplifier device.
    ///
    /// Claims the slot, then runs the loader's full construction sequence
    /// (load, resolve, initialize). Any failure frees the slot again before
    /// returning, so a failed open may be retried; only a fully constructed
    /// device ever occupies the slot.
    ///
    /// # Errors
    ///
    /// [`OpenError::AlreadyOpen`] if a device is live, otherwise whatever
    /// the loader reports.
    pub fn open_device(&self) -> Result<AmplifierDevice<L::Driver, B>, OpenError> {
        let slot = SlotGuard::claim(&self.slot).ok_or(OpenError::AlreadyOpen)?;
        let vendor = self.loader.load(&self.config)?;
        let clock = ClockGate::new(self.mixer.clone(), &self.config);
        tracing::info!("amplifier device opened");
        Ok(AmplifierDevice::new(vendor, clock, slot))
    }

    /// The module's configuration.
    pub fn config(&self) -> &HalConfig {
        &self.config
    }
}
