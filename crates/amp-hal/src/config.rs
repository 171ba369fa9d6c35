//! Deployment configuration.
//!
//! The shipped device image uses [`HalConfig::default`], which is exactly the
//! fixed constants in [`defaults`]. The serde representation exists for
//! embedders and tests that relocate the vendor library or rename the clock
//! control; the exported HAL module itself never reads a config file.

use std::path::PathBuf;

use serde::Deserialize;

/// Fixed platform constants of the shipped configuration.
pub mod defaults {
    /// Mixer card holding the codec clock control.
    pub const MIXER_CARD: u32 = 0;
    /// Name of the enumerated control gating the codec master clock.
    pub const CLOCK_CTL_NAME: &str = "Codec MCLK Switch";
    /// Vendor amplifier control library, resolved by the dynamic linker.
    pub const VENDOR_LIB: &str = "libtfa9890.so";
    /// Sample rate handed to the vendor initialize entry point.
    pub const SAMPLE_RATE_HZ: u32 = 48_000;
}

/// Amplifier module configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HalConfig {
    /// Mixer card index to open for the clock toggle.
    pub mixer_card: u32,
    /// Name of the clock control; must be an enumerated control on the card.
    pub clock_ctl_name: String,
    /// Vendor library path, or a bare soname resolved by the linker search
    /// path.
    pub vendor_lib: PathBuf,
    /// Sample rate passed to the vendor initialize entry point.
    pub sample_rate_hz: u32,
}

impl Default for HalConfig {
    fn default() -> Self {
        Self {
            mixer_card: defaults::MIXER_CARD,
            clock_ctl_name: defaults::CLOCK_CTL_NAME.to_owned(),
            vendor_lib: PathBuf::from(defaults::VENDOR_LIB),
            sample_rate_hz: defaults::SAMPLE_RATE_HZ,
        }
    }
}

impl HalConfig {
    /// Parse a configuration from JSON. Absent fields keep their defaults;
    /// unknown fields are rejected.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error on malformed JSON or unknown
    /// fields.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_shipped_constants() {
        let config = HalConfig::default();
        assert_eq!(config.mixer_card, 0);
        assert_eq!(config.clock_ctl_name, "Codec MCLK Switch");
        assert_eq!(config.vendor_lib, PathBuf::from("libtfa9890.so"));
        assert_eq!(config.sample_rate_hz, 48_000);
    }

    #[test]
    fn json_overrides_only_the_named_fields() {
        let config =
            HalConfig::from_json_str(r#"{ "vendor_lib": "/vendor/lib/libtfa9890.so" }"#).unwrap();
        assert_eq!(config.vendor_lib, PathBuf::from("/vendor/lib/libtfa9890.so"));
        assert_eq!(config.clock_ctl_name, "Codec MCLK Switch");
        assert_eq!(config.sample_rate_hz, 48_000);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(HalConfig::from_json_str(r#"{ "mixer_crad": 1 }"#).is_err());
    }
}
