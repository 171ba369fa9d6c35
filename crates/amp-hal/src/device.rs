//! The live amplifier device and the routing transition handler.

use amp_platform::mixer::MixerBackend;
use amp_platform::snd_device::SndDevice;

use crate::clock::ClockGate;
use crate::module::SlotGuard;
use crate::vendor::VendorAmplifier;

/// The one live amplifier device.
///
/// Owns the vendor driver (and through it the loaded vendor library), the
/// clock gate, and the module's device slot. Dropping the device releases
/// all three; the vendor library is unloaded and a future open succeeds.
#[derive(Debug)]
pub struct AmplifierDevice<V, B> {
    vendor: V,
    clock: ClockGate<B>,
    _slot: SlotGuard,
}

impl<V, B> AmplifierDevice<V, B>
where
    V: VendorAmplifier,
    B: MixerBackend,
{
    pub(crate) fn new(vendor: V, clock: ClockGate<B>, slot: SlotGuard) -> Self {
        Self {
            vendor,
            clock,
            _slot: slot,
        }
    }

    /// Handle an output routing change.
    ///
    /// Non-speaker routes are a strict no-op: no mixer call, no vendor call.
    /// Speaker routes run the clock-bracketed vendor sequence:
    ///
    /// ```text
    /// enable:  clocks on, speaker_needed(1), set_device(0), set_mode(0),
    ///          speaker_on(1), clocks off
    /// disable: clocks on, set_device(0), speaker_needed(0), set_mode(0),
    ///          speaker_off(1), clocks off
    /// ```
    ///
    /// The needed/device reorder between the two paths is load-bearing: the
    /// vendor state machine depends on the exact call order. Do not
    /// normalize it.
    ///
    /// Clock-gate failures and vendor statuses are discarded, and the clocks
    /// are always switched back off; the transition reports nothing and the
    /// C ABI surface returns success to the host either way. That is the
    /// shipped contract the platform depends on, pinned by tests.
    pub fn enable_output_devices(&mut self, device: SndDevice, enable: bool) {
        if !device.is_speaker() {
            return;
        }
        tracing::debug!(?device, enable, "speaker route transition");

        let _ = self.clock.set_enabled(true);
        if enable {
            self.vendor.set_speaker_needed(1);
            self.vendor.set_device(0);
            self.vendor.set_mode(0);
            self.vendor.speaker_on(1);
        } else {
            self.vendor.set_device(0);
            self.vendor.set_speaker_needed(0);
            self.vendor.set_mode(0);
            self.vendor.speaker_off(1);
        }
        let _ = self.clock.set_enabled(false);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    use amp_platform::mixer::ControlType;
    use amp_platform::mocks::{CallJournal, MockMixer};

    use super::*;
    use crate::config::HalConfig;
    use crate::vendor::MockVendor;

    fn device_with(
        journal: &CallJournal,
        mixer: &MockMixer,
    ) -> AmplifierDevice<MockVendor, MockMixer> {
        let slot = Arc::new(AtomicBool::new(false));
        let guard = SlotGuard::claim(&slot).unwrap();
        let clock = ClockGate::new(mixer.clone(), &HalConfig::default());
        AmplifierDevice::new(MockVendor::new(journal.clone()), clock, guard)
    }

    fn mixer_with_clock_control(journal: &CallJournal) -> MockMixer {
        let mixer = MockMixer::new(journal.clone());
        mixer.add_control("Codec MCLK Switch", ControlType::Enumerated);
        mixer
    }

    #[test]
    fn speaker_enable_runs_the_exact_sequence() {
        let journal = CallJournal::new();
        let mixer = mixer_with_clock_control(&journal);
        let mut device = device_with(&journal, &mixer);

        device.enable_output_devices(SndDevice::OUT_SPEAKER, true);

        assert_eq!(
            journal.entries(),
            [
                "mixer_open(0)",
                "ctl_write(Codec MCLK Switch, 0, 1)",
                "speaker_needed(1)",
                "set_device(0)",
                "set_mode(0)",
                "speaker_on(1)",
                "mixer_open(0)",
                "ctl_write(Codec MCLK Switch, 0, 0)",
            ]
        );
    }

    #[test]
    fn speaker_disable_reorders_needed_after_device() {
        let journal = CallJournal::new();
        let mixer = mixer_with_clock_control(&journal);
        let mut device = device_with(&journal, &mixer);

        device.enable_output_devices(SndDevice::OUT_VOICE_SPEAKER, false);

        assert_eq!(
            journal.entries(),
            [
                "mixer_open(0)",
                "ctl_write(Codec MCLK Switch, 0, 1)",
                "set_device(0)",
                "speaker_needed(0)",
                "set_mode(0)",
                "speaker_off(1)",
                "mixer_open(0)",
                "ctl_write(Codec MCLK Switch, 0, 0)",
            ]
        );
    }

    #[test]
    fn non_speaker_routes_touch_nothing() {
        let journal = CallJournal::new();
        let mixer = mixer_with_clock_control(&journal);
        let mut device = device_with(&journal, &mixer);

        for route in [
            SndDevice::NONE,
            SndDevice::OUT_HANDSET,
            SndDevice::OUT_HEADPHONES,
            SndDevice::OUT_HDMI,
            SndDevice::OUT_SPEAKER_PROTECTED,
            SndDevice::from_raw(0x7FFF_FFFF),
        ] {
            device.enable_output_devices(route, true);
            device.enable_output_devices(route, false);
        }

        assert!(journal.is_empty(), "got calls: {:?}", journal.entries());
    }

    #[test]
    fn missing_clock_control_is_swallowed_and_sequence_still_runs() {
        let journal = CallJournal::new();
        let mixer = MockMixer::new(journal.clone());
        let mut device = device_with(&journal, &mixer);

        device.enable_output_devices(SndDevice::OUT_SPEAKER, true);

        // Both gate calls open the mixer, find no control, and are ignored;
        // the vendor sequence runs regardless.
        assert_eq!(
            journal.entries(),
            [
                "mixer_open(0)",
                "speaker_needed(1)",
                "set_device(0)",
                "set_mode(0)",
                "speaker_on(1)",
                "mixer_open(0)",
            ]
        );
        assert_eq!(mixer.open_handles(), 0);
    }

    #[test]
    fn unavailable_mixer_is_swallowed_and_sequence_still_runs() {
        let journal = CallJournal::new();
        let mixer = MockMixer::new(journal.clone());
        mixer.set_card_available(false);
        let mut device = device_with(&journal, &mixer);

        device.enable_output_devices(SndDevice::OUT_SPEAKER, false);

        assert_eq!(
            journal.entries(),
            [
                "set_device(0)",
                "speaker_needed(0)",
                "set_mode(0)",
                "speaker_off(1)",
            ]
        );
    }
}
