//! ALSA control-interface binding for the mixer traits.
//!
//! Compiled behind the `alsa-mixer` feature; the build host needs libasound.
//! Talks to the control (ctl) interface directly rather than the simple-mixer
//! layer: the clock gate writes one named element by exact name, which is
//! below what the simple-mixer abstraction models.

use std::ffi::CString;

use alsa::ctl::{Ctl, ElemId, ElemIface, ElemType, ElemValue};
use amp_platform::mixer::{ControlType, MixerBackend, MixerControl, MixerDevice, MixerError};

/// Mixer backend over alsa-lib's control interface.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlsaMixer;

impl AlsaMixer {
    /// Create the backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MixerBackend for AlsaMixer {
    type Device = AlsaCard;

    fn open(&self, card: u32) -> Result<Self::Device, MixerError> {
        let name = format!("hw:{card}");
        let ctl = Ctl::new(&name, false).map_err(|_| MixerError::Unavailable { card })?;
        Ok(AlsaCard { ctl })
    }
}

/// Open control node for one card. The underlying handle closes on drop.
pub struct AlsaCard {
    ctl: Ctl,
}

impl MixerDevice for AlsaCard {
    type Control<'a> = AlsaControl<'a>;

    fn control_by_name(&self, name: &str) -> Result<Self::Control<'_>, MixerError> {
        let not_found = || MixerError::ControlNotFound {
            name: name.to_owned(),
        };

        // A name with an interior NUL cannot exist on the card.
        let c_name = CString::new(name).map_err(|_| not_found())?;
        let mut id = ElemId::new(ElemIface::Mixer);
        id.set_name(&c_name);

        let info = self.ctl.elem_info(&id).map_err(|_| not_found())?;
        Ok(AlsaControl {
            card: self,
            id,
            element_type: info.get_type(),
            name: name.to_owned(),
        })
    }
}

/// One resolved control element on an open card.
pub struct AlsaControl<'a> {
    card: &'a AlsaCard,
    id: ElemId,
    element_type: ElemType,
    name: String,
}

impl AlsaControl<'_> {
    fn write_failed(&self, reason: impl Into<String>) -> MixerError {
        MixerError::WriteFailed {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl MixerControl for AlsaControl<'_> {
    fn control_type(&self) -> ControlType {
        match self.element_type {
            ElemType::Boolean => ControlType::Bool,
            ElemType::Integer => ControlType::Int,
            ElemType::Enumerated => ControlType::Enumerated,
            ElemType::Bytes => ControlType::Bytes,
            ElemType::IEC958 => ControlType::Iec958,
            ElemType::Integer64 => ControlType::Int64,
            _ => ControlType::Unknown,
        }
    }

    fn set_bool(&self, index: u32, value: bool) -> Result<(), MixerError> {
        let mut elem = ElemValue::new(self.element_type)
            .ok_or_else(|| self.write_failed("element value allocation failed"))?;
        elem.set_id(&self.id);

        // Encode the boolean per the element's actual type, the way the
        // platform's control tools do for on/off writes.
        let stored = match self.element_type {
            ElemType::Boolean => elem.set_boolean(index, value),
            ElemType::Integer => elem.set_integer(index, i32::from(value)),
            ElemType::Enumerated => elem.set_enumerated(index, u32::from(value)),
            _ => None,
        };
        stored.ok_or_else(|| self.write_failed("element type does not take a boolean"))?;

        self.card
            .ctl
            .elem_write(&elem)
            .map_err(|err| self.write_failed(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_card_is_unavailable() {
        let err = match AlsaMixer::new().open(9999) {
            Ok(_) => panic!("card 9999 should not exist"),
            Err(err) => err,
        };
        assert_eq!(err, MixerError::Unavailable { card: 9999 });
    }
}
