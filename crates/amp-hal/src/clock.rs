//! Codec clock gateway.
//!
//! The TFA9890's vendor sequence only takes effect while the codec master
//! clock runs, so every speaker transition brackets the vendor calls with a
//! clock-on / clock-off pair. The gate is stateless per call: it opens the
//! mixer, validates the named control, writes one boolean, and lets the
//! handle close on drop — on every path, including failures.

use amp_platform::mixer::{ControlType, MixerBackend, MixerControl, MixerDevice, MixerError};

use crate::config::HalConfig;

/// Call-scoped gateway toggling the codec clock control.
#[derive(Debug)]
pub struct ClockGate<B> {
    backend: B,
    card: u32,
    control_name: String,
}

impl<B: MixerBackend> ClockGate<B> {
    /// Create a gate over `backend` for the configured card and control.
    pub fn new(backend: B, config: &HalConfig) -> Self {
        Self {
            backend,
            card: config.mixer_card,
            control_name: config.clock_ctl_name.clone(),
        }
    }

    /// Toggle the clock control.
    ///
    /// No retries: every failure is a single immediate return, logged at
    /// error severity. The caller decides whether to proceed regardless;
    /// the routing handler does, so the ABI mapping in
    /// [`MixerError::status`] never reaches the host from this plugin.
    ///
    /// # Errors
    ///
    /// [`MixerError::Unavailable`] if the card cannot be opened,
    /// [`MixerError::ControlNotFound`] if the control is absent,
    /// [`MixerError::UnsupportedControlType`] if it is not enumerated, and
    /// [`MixerError::WriteFailed`] if the control path rejects the write.
    pub fn set_enabled(&self, enable: bool) -> Result<(), MixerError> {
        let result = self.toggle(enable);
        match &result {
            Ok(()) => tracing::debug!(enable, control = %self.control_name, "codec clock toggled"),
            Err(err) => tracing::error!(%err, "codec clock toggle failed"),
        }
        result
    }

    fn toggle(&self, enable: bool) -> Result<(), MixerError> {
        let card = self.backend.open(self.card)?;
        let control = card.control_by_name(&self.control_name)?;
        let actual = control.control_type();
        if actual != ControlType::Enumerated {
            return Err(MixerError::UnsupportedControlType {
                name: self.control_name.clone(),
                actual,
            });
        }
        control.set_bool(0, enable)
        // `card` drops here, releasing the mixer handle on every branch.
    }
}

#[cfg(test)]
mod tests {
    use amp_platform::mocks::{CallJournal, MockMixer};

    use super::*;

    fn gate_with(mixer: &MockMixer) -> ClockGate<MockMixer> {
        ClockGate::new(mixer.clone(), &HalConfig::default())
    }

    #[test]
    fn enable_writes_one_at_index_zero() {
        let journal = CallJournal::new();
        let mixer = MockMixer::new(journal.clone());
        mixer.add_control("Codec MCLK Switch", ControlType::Enumerated);

        gate_with(&mixer).set_enabled(true).unwrap();

        assert_eq!(
            journal.entries(),
            ["mixer_open(0)", "ctl_write(Codec MCLK Switch, 0, 1)"]
        );
        assert_eq!(mixer.open_handles(), 0);
    }

    #[test]
    fn disable_writes_zero_at_index_zero() {
        let journal = CallJournal::new();
        let mixer = MockMixer::new(journal.clone());
        mixer.add_control("Codec MCLK Switch", ControlType::Enumerated);

        gate_with(&mixer).set_enabled(false).unwrap();

        assert_eq!(
            journal.entries(),
            ["mixer_open(0)", "ctl_write(Codec MCLK Switch, 0, 0)"]
        );
    }

    #[test]
    fn unavailable_card_reported() {
        let mixer = MockMixer::new(CallJournal::new());
        mixer.set_card_available(false);

        let err = gate_with(&mixer).set_enabled(true).unwrap_err();
        assert_eq!(err, MixerError::Unavailable { card: 0 });
        assert_eq!(mixer.open_handles(), 0);
    }

    #[test]
    fn missing_control_releases_the_handle() {
        let mixer = MockMixer::new(CallJournal::new());

        let err = gate_with(&mixer).set_enabled(true).unwrap_err();
        assert_eq!(
            err,
            MixerError::ControlNotFound {
                name: "Codec MCLK Switch".to_owned()
            }
        );
        assert_eq!(mixer.open_handles(), 0);
    }

    #[test]
    fn non_enumerated_control_is_unsupported() {
        let mixer = MockMixer::new(CallJournal::new());
        mixer.add_control("Codec MCLK Switch", ControlType::Bool);

        let err = gate_with(&mixer).set_enabled(true).unwrap_err();
        assert_eq!(
            err,
            MixerError::UnsupportedControlType {
                name: "Codec MCLK Switch".to_owned(),
                actual: ControlType::Bool
            }
        );
        assert_eq!(mixer.open_handles(), 0);
    }

    #[test]
    fn rejected_write_releases_the_handle() {
        let mixer = MockMixer::new(CallJournal::new());
        mixer.add_control("Codec MCLK Switch", ControlType::Enumerated);
        mixer.fail_writes("Codec MCLK Switch");

        let err = gate_with(&mixer).set_enabled(true).unwrap_err();
        assert!(matches!(err, MixerError::WriteFailed { .. }));
        assert_eq!(mixer.open_handles(), 0);
    }
}
