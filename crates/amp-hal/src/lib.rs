//! External speaker amplifier HAL module
//!
//! Translates the host audio framework's output-route notifications into the
//! control sequence the TFA9890 speaker amplifier needs: gate the codec MCLK
//! on, walk the vendor library's enable or disable sequence, gate the MCLK
//! back off. Everything else the host could notify about is ignored.
//!
//! # Architecture Layers
//!
//! ```text
//! Host audio framework (dlopen + descriptor symbol)
//!         ↓
//! C ABI surface ([`export`], [`hal_abi`] — record layout, panic guards)
//!         ↓
//! Typed core ([`module`], [`device`] — slot, sequencing)
//!         ↓
//! Control paths ([`clock`] → mixer backend, [`vendor`] → amplifier blob)
//! ```
//!
//! # Features
//!
//! - `alsa-mixer`: real mixer backend over alsa-lib's control interface
//! - `hal-module`: the exported module surface; implies `alsa-mixer`
//!
//! The default build has no hardware dependencies: every layer below the
//! export surface is generic over its backends and runs against the mocks.
//!
//! # Example
//!
//! Opening a device and driving a route change, with the hardware mocked:
//!
//! ```
//! use amp_hal::vendor::MockVendorLoader;
//! use amp_hal::{AmplifierModule, HalConfig};
//! use amp_platform::mocks::{CallJournal, MockMixer};
//! use amp_platform::SndDevice;
//!
//! let journal = CallJournal::new();
//! let module = AmplifierModule::new(
//!     HalConfig::default(),
//!     MockVendorLoader::new(journal.clone()),
//!     MockMixer::new(journal.clone()),
//! );
//!
//! let mut device = module.open_device().expect("slot is free");
//! device.enable_output_devices(SndDevice::OUT_SPEAKER, true);
//! assert!(!journal.is_empty());
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Pedantic lints suppressed for this crate:
#![allow(clippy::doc_markdown)] // chip and control names in doc comments
#![allow(clippy::must_use_candidate)] // plain accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(feature = "alsa-mixer")]
pub mod alsa_mixer;
pub mod clock;
pub mod config;
pub mod device;
#[cfg(feature = "hal-module")]
pub mod export;
pub mod hal_abi;
pub mod module;
pub mod vendor;

pub use clock::ClockGate;
pub use config::HalConfig;
pub use device::AmplifierDevice;
pub use module::AmplifierModule;
pub use vendor::{OpenError, VendorAmplifier, VendorDriverLoader};

#[cfg(feature = "alsa-mixer")]
pub use alsa_mixer::AlsaMixer;
