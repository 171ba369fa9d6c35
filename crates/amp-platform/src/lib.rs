//! Platform contracts for the external speaker amplifier HAL
//!
//! This crate carries everything the amplifier module shares with (or copies
//! from) the surrounding platform, so the HAL crate itself holds only
//! amplifier logic:
//!
//! ```text
//! Host audio framework
//!         ↓  (C plugin ABI: [`abi`])
//! Amplifier HAL module (amp-hal crate)
//!         ↓  (control path: [`mixer`] traits)
//! Platform mixer / routing layer ([`snd_device`] identifiers)
//! ```
//!
//! # Modules
//!
//! - [`abi`] — `#[repr(C)]` plugin descriptor structs, tags, versions, and
//!   the negative status-code table of the host contract
//! - [`mixer`] — control-path traits (backend / card / control) and the
//!   mixer error taxonomy
//! - [`snd_device`] — output-route identifiers and speaker classification
//! - [`mocks`] — scriptable mixer double and the shared call journal

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
// Pedantic lints suppressed for this contracts crate:
#![allow(clippy::doc_markdown)] // platform control names in doc comments
#![allow(clippy::must_use_candidate)] // plain accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod abi;
pub mod mixer;
pub mod mocks;
pub mod snd_device;

pub use mixer::{ControlType, MixerBackend, MixerControl, MixerDevice, MixerError};
pub use mocks::{CallJournal, MockMixer};
pub use snd_device::SndDevice;
