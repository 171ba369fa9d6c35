//! Output-route identifiers owned by the platform routing layer.
//!
//! The routing layer hands this module a raw `u32` sound-device identifier on
//! every route change. The values are fixed by the platform's device table;
//! this crate carries its own copy because the amplifier shim is compiled out
//! of the platform tree. Only output routes appear here — the amplifier never
//! sees capture routes.

// ── Identifier newtype ───────────────────────────────────────────────────────

/// A platform sound-device (output route) identifier.
///
/// Wraps the raw `u32` the routing layer passes across the HAL ABI. Values
/// outside the table below are possible (newer platform builds add routes);
/// unknown values classify as non-speaker and are ignored by the amplifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SndDevice(u32);

impl SndDevice {
    /// No active route.
    pub const NONE: Self = Self(0);

    /// Earpiece (handset receiver).
    pub const OUT_HANDSET: Self = Self(1);
    /// Loudspeaker, default orientation.
    pub const OUT_SPEAKER: Self = Self(2);
    /// Loudspeaker with swapped channel orientation (device rotated).
    pub const OUT_SPEAKER_REVERSE: Self = Self(3);
    /// Wired headphones.
    pub const OUT_HEADPHONES: Self = Self(4);
    /// Line out.
    pub const OUT_LINE: Self = Self(5);
    /// Loudspeaker and wired headphones simultaneously.
    pub const OUT_SPEAKER_AND_HEADPHONES: Self = Self(6);
    /// Loudspeaker and line out simultaneously.
    pub const OUT_SPEAKER_AND_LINE: Self = Self(7);
    /// Earpiece during a voice call.
    pub const OUT_VOICE_HANDSET: Self = Self(8);
    /// Loudspeaker during a voice call (speakerphone).
    pub const OUT_VOICE_SPEAKER: Self = Self(9);
    /// Wired headphones during a voice call.
    pub const OUT_VOICE_HEADPHONES: Self = Self(10);
    /// Line out during a voice call.
    pub const OUT_VOICE_LINE: Self = Self(11);
    /// HDMI audio.
    pub const OUT_HDMI: Self = Self(12);
    /// Loudspeaker and HDMI simultaneously.
    pub const OUT_SPEAKER_AND_HDMI: Self = Self(13);
    /// USB headset.
    pub const OUT_USB_HEADSET: Self = Self(14);
    /// USB headphones.
    pub const OUT_USB_HEADPHONES: Self = Self(15);
    /// Loudspeaker and USB headset simultaneously.
    pub const OUT_SPEAKER_AND_USB_HEADSET: Self = Self(16);
    /// FM transmitter.
    pub const OUT_TRANSMISSION_FM: Self = Self(17);
    /// Active-noise-cancelling headset.
    pub const OUT_ANC_HEADSET: Self = Self(18);
    /// Feedback ANC headset.
    pub const OUT_ANC_FB_HEADSET: Self = Self(19);
    /// ANC headset during a voice call.
    pub const OUT_VOICE_ANC_HEADSET: Self = Self(20);
    /// Feedback ANC headset during a voice call.
    pub const OUT_VOICE_ANC_FB_HEADSET: Self = Self(21);
    /// Loudspeaker and ANC headset simultaneously.
    pub const OUT_SPEAKER_AND_ANC_HEADSET: Self = Self(22);
    /// ANC earpiece.
    pub const OUT_ANC_HANDSET: Self = Self(23);
    /// Loudspeaker with feedback speaker protection.
    pub const OUT_SPEAKER_PROTECTED: Self = Self(24);
    /// Voice-call loudspeaker with feedback speaker protection.
    pub const OUT_VOICE_SPEAKER_PROTECTED: Self = Self(25);

    /// Wrap a raw identifier received from the routing layer.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Return the raw identifier value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether this route drives the external speaker amplifier.
    ///
    /// Membership is a closed set: exactly the routes where the loudspeaker
    /// is an active output. Combo routes that include the speaker count;
    /// everything else (headphones, line, HDMI alone, unknown values) does
    /// not. The protected-speaker routes use the codec's internal feedback
    /// path and bypass the external amplifier.
    #[must_use]
    pub fn is_speaker(self) -> bool {
        matches!(
            self,
            Self::OUT_SPEAKER
                | Self::OUT_SPEAKER_REVERSE
                | Self::OUT_SPEAKER_AND_HEADPHONES
                | Self::OUT_VOICE_SPEAKER
                | Self::OUT_SPEAKER_AND_HDMI
                | Self::OUT_SPEAKER_AND_USB_HEADSET
                | Self::OUT_SPEAKER_AND_ANC_HEADSET
        )
    }
}

impl From<u32> for SndDevice {
    fn from(raw: u32) -> Self {
        Self::from_raw(raw)
    }
}
