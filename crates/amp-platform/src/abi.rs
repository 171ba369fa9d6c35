//! Host HAL plugin ABI.
//!
//! The host audio framework discovers a plugin by `dlopen`ing it and looking
//! up one exported descriptor symbol. These structs mirror the host's C
//! headers field for field; the host reads and calls through them by raw
//! offset, so field order, widths, and the reserved padding are all part of
//! the contract and must never change.

use std::ffi::{c_char, c_int, c_void};

// ── Tags and versions ────────────────────────────────────────────────────────

/// Tag marking a module descriptor (`"HWMT"` packed big-endian).
pub const HARDWARE_MODULE_TAG: u32 = 0x4857_4D54;

/// Tag marking an open device record (`"HWDT"` packed big-endian).
pub const HARDWARE_DEVICE_TAG: u32 = 0x4857_4454;

/// Amplifier module API version 0.1 (`major << 8 | minor`).
pub const AMPLIFIER_MODULE_API_VERSION_0_1: u16 = 0x0001;

/// Version of the HAL header contract itself, 1.0.
pub const HARDWARE_HAL_API_VERSION: u16 = 0x0100;

/// Device API version 1.0, written into [`HwDevice::version`].
pub const HARDWARE_DEVICE_API_VERSION_1_0: u32 = 0x0100;

/// Module identifier string the host uses to locate the amplifier plugin.
/// NUL-terminated for direct use as a C string.
pub const AMPLIFIER_MODULE_ID: &[u8] = b"audio_amplifier\0";

/// Name of the descriptor symbol the host resolves after loading the plugin.
pub const MODULE_INFO_SYM: &str = "HMI";

// ── Entry-point signatures ───────────────────────────────────────────────────

/// Device-open entry in the module method table.
pub type OpenFn = unsafe extern "C" fn(
    module: *const HwModule,
    name: *const c_char,
    device: *mut *mut HwDevice,
) -> c_int;

/// Device-close entry stored in [`HwDevice::close`].
pub type CloseFn = unsafe extern "C" fn(device: *mut HwDevice) -> c_int;

/// Routing notification with an enable/disable flag.
pub type EnableDevicesFn =
    unsafe extern "C" fn(device: *mut AmplifierDeviceAbi, devices: u32, enable: bool) -> c_int;

/// Routing notification carrying only the new device set.
pub type SetDevicesFn =
    unsafe extern "C" fn(device: *mut AmplifierDeviceAbi, devices: u32) -> c_int;

/// Audio-mode change notification (mode values owned by the host).
pub type SetModeFn = unsafe extern "C" fn(device: *mut AmplifierDeviceAbi, mode: c_int) -> c_int;

/// Output-stream start notification.
pub type OutputStreamStartFn = unsafe extern "C" fn(
    device: *mut AmplifierDeviceAbi,
    stream: *mut AudioStreamOut,
    offload: bool,
) -> c_int;

/// Input-stream start notification.
pub type InputStreamStartFn =
    unsafe extern "C" fn(device: *mut AmplifierDeviceAbi, stream: *mut AudioStreamIn) -> c_int;

/// Output-stream standby notification.
pub type OutputStreamStandbyFn =
    unsafe extern "C" fn(device: *mut AmplifierDeviceAbi, stream: *mut AudioStreamOut) -> c_int;

/// Input-stream standby notification.
pub type InputStreamStandbyFn =
    unsafe extern "C" fn(device: *mut AmplifierDeviceAbi, stream: *mut AudioStreamIn) -> c_int;

// ── Opaque host types ────────────────────────────────────────────────────────

/// Host-owned output stream, opaque to the amplifier.
#[repr(C)]
pub struct AudioStreamOut {
    _private: [u8; 0],
}

/// Host-owned input stream, opaque to the amplifier.
#[repr(C)]
pub struct AudioStreamIn {
    _private: [u8; 0],
}

// ── Descriptor structs ───────────────────────────────────────────────────────

/// Module method table; the host calls [`HwModuleMethods::open`] to obtain a
/// device record.
#[repr(C)]
#[derive(Debug)]
pub struct HwModuleMethods {
    /// Opens a device instance. `Option` gives the nullable C function
    /// pointer its null representation.
    pub open: Option<OpenFn>,
}

/// Module descriptor the host inspects after loading the plugin.
#[repr(C)]
#[derive(Debug)]
pub struct HwModule {
    /// Must be [`HARDWARE_MODULE_TAG`].
    pub tag: u32,
    /// Module API version implemented by this plugin.
    pub module_api_version: u16,
    /// HAL header contract version.
    pub hal_api_version: u16,
    /// Module identifier, NUL-terminated.
    pub id: *const c_char,
    /// Human-readable module name, NUL-terminated.
    pub name: *const c_char,
    /// Author string, NUL-terminated.
    pub author: *const c_char,
    /// Method table with the open entry point.
    pub methods: *const HwModuleMethods,
    /// Written by the host's loader with the dlopen handle; null until then.
    pub dso: *mut c_void,
    /// Padding reserved by the host headers; pointer-width per the host
    /// headers (u32 on ILP32, u64 on LP64).
    pub reserved: [usize; 25],
}

/// Common header embedded at offset 0 of every open device record.
#[repr(C)]
#[derive(Debug)]
pub struct HwDevice {
    /// Must be [`HARDWARE_DEVICE_TAG`].
    pub tag: u32,
    /// Device API version, see [`HARDWARE_DEVICE_API_VERSION_1_0`].
    pub version: u32,
    /// Back-pointer to the owning module descriptor.
    pub module: *const HwModule,
    /// Reserved words; pointer-width per the host headers (u32 on ILP32,
    /// u64 on LP64).
    pub reserved: [usize; 12],
    /// Close entry point; the host calls this exactly once per open record.
    pub close: Option<CloseFn>,
}

/// Amplifier module descriptor: the common header is its only field, but the
/// wrapper type is what the exported symbol is declared as.
#[repr(C)]
#[derive(Debug)]
pub struct AmplifierModuleInfo {
    /// Common module descriptor.
    pub common: HwModule,
}

/// Amplifier device record handed to the host by `open`.
///
/// The host null-checks every entry before calling it; a plugin populates
/// only the notifications it acts on and leaves the rest null.
#[repr(C)]
#[derive(Debug)]
pub struct AmplifierDeviceAbi {
    /// Common device header (tag, version, module, close).
    pub common: HwDevice,
    /// Input routing changed.
    pub set_input_devices: Option<SetDevicesFn>,
    /// Output routing changed.
    pub set_output_devices: Option<SetDevicesFn>,
    /// Output routing changed, with explicit enable/disable direction.
    pub enable_output_devices: Option<EnableDevicesFn>,
    /// Input routing changed, with explicit enable/disable direction.
    pub enable_input_devices: Option<EnableDevicesFn>,
    /// Audio mode (call state) changed.
    pub set_mode: Option<SetModeFn>,
    /// An output stream is starting.
    pub output_stream_start: Option<OutputStreamStartFn>,
    /// An input stream is starting.
    pub input_stream_start: Option<InputStreamStartFn>,
    /// An output stream entered standby.
    pub output_stream_standby: Option<OutputStreamStandbyFn>,
    /// An input stream entered standby.
    pub input_stream_standby: Option<InputStreamStandbyFn>,
}

// ── Status codes ─────────────────────────────────────────────────────────────

/// Negative-errno status codes the host understands. Every ABI entry point
/// returns one of these; 0 is success. Control-path failures map onto this
/// table via [`crate::mixer::MixerError::status`].
pub mod status {
    use std::ffi::c_int;

    /// Success.
    pub const OK: c_int = 0;
    /// Unspecified failure (mixer open, or a panic caught at the boundary).
    pub const FAILED: c_int = -1;
    /// A device instance is already open (-EBUSY).
    pub const ALREADY_OPEN: c_int = -16;
    /// Device record allocation failed (-ENOMEM).
    pub const OUT_OF_MEMORY: c_int = -12;
    /// Vendor driver, symbol, or named control absent (-ENODEV).
    pub const NO_DEVICE: c_int = -19;
    /// The named control exists but has the wrong type (-ENOTTY).
    pub const UNSUPPORTED_CONTROL: c_int = -25;
}
