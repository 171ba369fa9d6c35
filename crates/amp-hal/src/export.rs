//! Exported plugin surface the host loads.
//!
//! Compiled behind the `hal-module` feature, which also pulls in the real
//! ALSA backend; together with the `cdylib` crate type this produces the
//! shared object the host `dlopen`s. This is the only module with
//! process-global state: the loader contract is a bare exported descriptor
//! symbol, so the module context lives in a `OnceLock` reached only from the
//! descriptor's entry points.

use std::ffi::{c_char, c_int};
use std::ptr;
use std::sync::OnceLock;

use amp_platform::abi::{
    status, AmplifierModuleInfo, HwDevice, HwModule, HwModuleMethods,
    AMPLIFIER_MODULE_API_VERSION_0_1, AMPLIFIER_MODULE_ID, HARDWARE_HAL_API_VERSION,
    HARDWARE_MODULE_TAG,
};

use crate::alsa_mixer::AlsaMixer;
use crate::config::HalConfig;
use crate::hal_abi;
use crate::module::AmplifierModule;
use crate::vendor::Tfa9890Loader;

/// Module name shown in host dumps. NUL-terminated.
const MODULE_NAME: &[u8] = b"TFA9890 speaker amplifier HAL\0";

/// Author string shown in host dumps. NUL-terminated.
const MODULE_AUTHOR: &[u8] = b"SoulAudio\0";

static METHODS: HwModuleMethods = HwModuleMethods {
    open: Some(open_amplifier),
};

/// The one process-wide module context, created on first open.
static MODULE: OnceLock<AmplifierModule<Tfa9890Loader, AlsaMixer>> = OnceLock::new();

/// The descriptor symbol the host resolves after `dlopen`.
///
/// Mutable because the host's loader writes the `dso` field with its dlopen
/// handle after resolving the symbol; nothing on this side touches the
/// descriptor after initialization.
#[no_mangle]
pub static mut HMI: AmplifierModuleInfo = AmplifierModuleInfo {
    common: HwModule {
        tag: HARDWARE_MODULE_TAG,
        module_api_version: AMPLIFIER_MODULE_API_VERSION_0_1,
        hal_api_version: HARDWARE_HAL_API_VERSION,
        id: AMPLIFIER_MODULE_ID.as_ptr().cast(),
        name: MODULE_NAME.as_ptr().cast(),
        author: MODULE_AUTHOR.as_ptr().cast(),
        methods: &METHODS,
        dso: ptr::null_mut(),
        reserved: [0; 25],
    },
};

/// Module `open` entry point.
///
/// The host passes the id it matched the descriptor on; this descriptor only
/// ever advertises the amplifier id, so `name` is not re-checked.
unsafe extern "C" fn open_amplifier(
    module: *const HwModule,
    _name: *const c_char,
    device: *mut *mut HwDevice,
) -> c_int {
    hal_abi::guard_status("open", || {
        init_tracing();
        if device.is_null() {
            return status::FAILED;
        }

        let context = MODULE.get_or_init(|| {
            AmplifierModule::new(HalConfig::default(), Tfa9890Loader::new(), AlsaMixer::new())
        });
        match context.open_device() {
            Ok(core) => {
                let record = hal_abi::publish(core, module);
                // SAFETY: `device` is the host's non-null out-pointer,
                // checked above.
                unsafe { *device = record.cast::<HwDevice>() };
                status::OK
            }
            Err(err) => {
                tracing::error!(%err, "amplifier open failed");
                err.status()
            }
        }
    })
}

/// Install the process-wide tracing subscriber on first open.
///
/// Repeat opens and foreign subscribers make `try_init` fail; logs then go
/// wherever the process already sends them. Verbosity comes from
/// `AMP_HAL_LOG`, defaulting to `info`.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env("AMP_HAL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
