//! Plumbing between the host's C device record and the typed core.
//!
//! The host talks to an open device through raw function pointers stored in
//! the record it got back from `open`. This module builds that record: it
//! boxes the typed [`AmplifierDevice`] together with the ABI struct and
//! installs monomorphized trampolines that recover the typed device from the
//! raw pointer. Everything here is backend-generic so the whole round trip
//! runs against mocks.

use std::ffi::c_int;
use std::panic::{catch_unwind, AssertUnwindSafe};

use amp_platform::abi::{
    status, AmplifierDeviceAbi, HwDevice, HwModule, HARDWARE_DEVICE_API_VERSION_1_0,
    HARDWARE_DEVICE_TAG,
};
use amp_platform::mixer::MixerBackend;
use amp_platform::snd_device::SndDevice;

use crate::device::AmplifierDevice;
use crate::vendor::VendorAmplifier;

/// Heap layout of an open device as the host sees it.
///
/// `repr(C)` pins the ABI record at offset 0, so the `*mut DeviceShim`
/// returned by [`publish`] doubles as the `*mut AmplifierDeviceAbi` the host
/// expects, and every trampoline can cast straight back.
#[repr(C)]
struct DeviceShim<V, B> {
    abi: AmplifierDeviceAbi,
    core: AmplifierDevice<V, B>,
}

/// Box `core` behind a host-visible device record.
///
/// The returned pointer owns the allocation; the host releases it by calling
/// the `close` entry stored in the record. Only the entry points this plugin
/// acts on are populated, the rest stay null for the host's null checks.
pub fn publish<V, B>(core: AmplifierDevice<V, B>, module: *const HwModule) -> *mut AmplifierDeviceAbi
where
    V: VendorAmplifier,
    B: MixerBackend,
{
    let shim = Box::new(DeviceShim {
        abi: AmplifierDeviceAbi {
            common: HwDevice {
                tag: HARDWARE_DEVICE_TAG,
                version: HARDWARE_DEVICE_API_VERSION_1_0,
                module,
                reserved: [0; 12],
                close: Some(close_device::<V, B>),
            },
            set_input_devices: None,
            set_output_devices: None,
            enable_output_devices: Some(enable_output_devices::<V, B>),
            enable_input_devices: None,
            set_mode: None,
            output_stream_start: None,
            input_stream_start: None,
            output_stream_standby: None,
            input_stream_standby: None,
        },
        core,
    });
    Box::into_raw(shim).cast::<AmplifierDeviceAbi>()
}

// ── Panic containment ────────────────────────────────────────────────────────

/// Extract a readable message from a panic payload.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        return (*msg).to_owned();
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return msg.clone();
    }
    "non-string panic payload".to_owned()
}

/// Run an entry-point body, converting a panic into [`status::FAILED`].
///
/// Unwinding across an `extern "C"` boundary is undefined behaviour, so every
/// trampoline wraps its body in this.
pub(crate) fn guard_status(op: &'static str, f: impl FnOnce() -> c_int) -> c_int {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(code) => code,
        Err(payload) => {
            let msg = panic_message(payload);
            tracing::error!(op, panic = %msg, "panic caught at the C ABI boundary");
            status::FAILED
        }
    }
}

// ── Trampolines ──────────────────────────────────────────────────────────────

/// `close` entry stored in the device record. Tears down the whole shim:
/// vendor driver, loaded library, mixer backend, and the module slot.
unsafe extern "C" fn close_device<V, B>(device: *mut HwDevice) -> c_int
where
    V: VendorAmplifier,
    B: MixerBackend,
{
    guard_status("close", || {
        if device.is_null() {
            // Nothing to tear down; mirror the host's tolerance for a
            // close on a record that never opened.
            return status::OK;
        }
        // SAFETY: the host only hands back pointers produced by `publish`,
        // which allocated a `DeviceShim<V, B>` with the ABI record at
        // offset 0, and it calls close at most once per record.
        drop(unsafe { Box::from_raw(device.cast::<DeviceShim<V, B>>()) });
        tracing::info!("amplifier device closed");
        status::OK
    })
}

/// `enable_output_devices` entry stored in the device record.
unsafe extern "C" fn enable_output_devices<V, B>(
    device: *mut AmplifierDeviceAbi,
    devices: u32,
    enable: bool,
) -> c_int
where
    V: VendorAmplifier,
    B: MixerBackend,
{
    guard_status("enable_output_devices", || {
        if device.is_null() {
            return status::FAILED;
        }
        // SAFETY: pointer provenance as in `close_device`, and the host
        // serializes entry-point calls on a device, so no other reference
        // to the shim is live during this call.
        let shim = unsafe { &mut *device.cast::<DeviceShim<V, B>>() };
        shim.core
            .enable_output_devices(SndDevice::from_raw(devices), enable);
        status::OK
    })
}
