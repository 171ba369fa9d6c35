//! Mixer control-path abstraction.
//!
//! The platform exposes codec knobs as named, typed controls on a mixer card.
//! This module defines the small synchronous contract the amplifier needs
//! (open by card index, look a control up by name, check its type, write a
//! value) as traits so the clock gateway can run against the real ALSA
//! control binding on device and against [`crate::mocks::MockMixer`] in
//! tests. Handles close on drop; nothing here is held across gateway calls.

use std::ffi::c_int;

use crate::abi::status;

// ── Control types ────────────────────────────────────────────────────────────

/// Value kind reported by the control path for a mixer control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlType {
    /// On/off switch.
    Bool,
    /// Integer range.
    Int,
    /// One of a fixed set of named items.
    Enumerated,
    /// Raw byte array.
    Bytes,
    /// IEC958 (S/PDIF) channel status.
    Iec958,
    /// 64-bit integer range.
    Int64,
    /// Anything the binding cannot map.
    Unknown,
}

// ── Error taxonomy ───────────────────────────────────────────────────────────

/// Failures surfaced by the mixer control path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MixerError {
    /// The mixer card could not be opened at all.
    #[error("mixer card {card} unavailable")]
    Unavailable {
        /// Card index that failed to open.
        card: u32,
    },

    /// No control with the requested name exists on the card.
    #[error("mixer control {name:?} not found")]
    ControlNotFound {
        /// Requested control name.
        name: String,
    },

    /// The control exists but its type is not the one the caller requires.
    #[error("mixer control {name:?} has unsupported type {actual:?}")]
    UnsupportedControlType {
        /// Control name.
        name: String,
        /// Type the control actually reported.
        actual: ControlType,
    },

    /// Writing the control value failed.
    #[error("write to mixer control {name:?} failed: {reason}")]
    WriteFailed {
        /// Control name.
        name: String,
        /// Binding-specific failure description.
        reason: String,
    },
}

impl MixerError {
    /// The negative status code reported for this failure at the HAL ABI.
    ///
    /// `WriteFailed` maps to the unspecified code: the original control path
    /// has no distinct status for it.
    #[must_use]
    pub fn status(&self) -> c_int {
        match self {
            Self::Unavailable { .. } | Self::WriteFailed { .. } => status::FAILED,
            Self::ControlNotFound { .. } => status::NO_DEVICE,
            Self::UnsupportedControlType { .. } => status::UNSUPPORTED_CONTROL,
        }
    }
}

// ── Control-path traits ──────────────────────────────────────────────────────

/// Entry point of a mixer binding: opens cards by index.
pub trait MixerBackend {
    /// Open card handle. Dropping it closes the card.
    type Device: MixerDevice;

    /// Open the mixer card at `card`.
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::Unavailable`] if the card cannot be opened.
    fn open(&self, card: u32) -> Result<Self::Device, MixerError>;
}

/// An open mixer card.
pub trait MixerDevice {
    /// Borrowed handle to one control on this card.
    type Control<'a>: MixerControl
    where
        Self: 'a;

    /// Look up a control by its exact name.
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::ControlNotFound`] if no control has that name.
    fn control_by_name(&self, name: &str) -> Result<Self::Control<'_>, MixerError>;
}

/// One named control on an open card.
pub trait MixerControl {
    /// The control's value kind.
    fn control_type(&self) -> ControlType;

    /// Write a boolean value at `index` within the control's value array.
    ///
    /// # Errors
    ///
    /// Returns [`MixerError::WriteFailed`] if the control path rejects the
    /// write.
    fn set_bool(&self, index: u32, value: bool) -> Result<(), MixerError>;
}
