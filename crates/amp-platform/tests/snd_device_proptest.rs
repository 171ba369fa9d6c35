//! Property-based tests for the speaker-relevance classification.
//! Verifies the speaker set is closed: membership holds for exactly the
//! listed routes and for no other identifier.

use amp_platform::snd_device::SndDevice;

/// Raw values of every speaker-relevant route.
const SPEAKER_RAW: [u32; 7] = [
    SndDevice::OUT_SPEAKER.raw(),
    SndDevice::OUT_SPEAKER_REVERSE.raw(),
    SndDevice::OUT_SPEAKER_AND_HEADPHONES.raw(),
    SndDevice::OUT_VOICE_SPEAKER.raw(),
    SndDevice::OUT_SPEAKER_AND_HDMI.raw(),
    SndDevice::OUT_SPEAKER_AND_USB_HEADSET.raw(),
    SndDevice::OUT_SPEAKER_AND_ANC_HEADSET.raw(),
];

proptest::proptest! {
    /// is_speaker never panics and agrees with set membership for any u32.
    #[test]
    fn classification_matches_membership(raw in 0u32..=u32::MAX) {
        let device = SndDevice::from_raw(raw);
        let expected = SPEAKER_RAW.contains(&raw);
        assert_eq!(device.is_speaker(), expected,
            "is_speaker({raw}) should be {expected}");
    }

    /// Identifiers beyond the known table always classify as non-speaker.
    #[test]
    fn unknown_identifiers_are_never_speaker(raw in 26u32..=u32::MAX) {
        assert!(!SndDevice::from_raw(raw).is_speaker(),
            "unknown identifier {raw} must not drive the amplifier");
    }

    /// from_raw/raw round-trips every identifier unchanged.
    #[test]
    fn raw_round_trips(raw in 0u32..=u32::MAX) {
        assert_eq!(SndDevice::from_raw(raw).raw(), raw);
    }
}
