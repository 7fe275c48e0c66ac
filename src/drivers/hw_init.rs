//! One-shot ADC bring-up and raw conversions.
//!
//! Configures the ADC1 oneshot unit for the mux sense line using raw
//! ESP-IDF sys calls.  Called once from `main()` before the control loop
//! starts.  GPIOs are owned by `esp-idf-hal` pin drivers instead.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: `adc1_read` performs a oneshot conversion.
//! On host/test: the multiplexer routes a channel index into a static and
//! `adc1_read` returns whatever counts were injected for that channel.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    AdcChannelFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::AdcChannelFailed(rc) => write!(f, "ADC1 channel config failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

impl From<HwInitError> for crate::error::Error {
    fn from(e: HwInitError) -> Self {
        match e {
            HwInitError::AdcInitFailed(_) => Self::Init("ADC1 unit"),
            HwInitError::AdcChannelFailed(_) => Self::Init("ADC1 channel"),
        }
    }
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
pub fn init_adc(channel: u32) -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    // SAFETY: handle was created above; single-threaded init.
    let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcChannelFailed(ret));
    }

    info!("hw_init: ADC1 CH{} configured (mux sense line)", channel);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_adc(_channel: u32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ADC init skipped");
    Ok(())
}

/// One raw conversion, `None` if the driver reports an error.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Option<u16> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract, single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return None;
    }
    Some(raw.clamp(0, i32::from(u16::MAX)) as u16)
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU16, Ordering};

    pub(super) const SIM_MUX_INPUTS: usize = 8;

    static SIM_COUNTS: [AtomicU16; SIM_MUX_INPUTS] = [const { AtomicU16::new(0) }; SIM_MUX_INPUTS];
    static SIM_ROUTED: AtomicU8 = AtomicU8::new(0);
    static SIM_FAULT: AtomicBool = AtomicBool::new(false);

    pub fn sim_set_channel_counts(mux_channel: u8, counts: u16) {
        if let Some(slot) = SIM_COUNTS.get(usize::from(mux_channel)) {
            slot.store(counts, Ordering::Relaxed);
        }
    }

    /// Make every conversion fail until cleared.
    pub fn sim_set_adc_fault(fail: bool) {
        SIM_FAULT.store(fail, Ordering::Relaxed);
    }

    /// Called by the mux driver after it drives the select lines.
    pub fn sim_route(mux_channel: u8) {
        SIM_ROUTED.store(mux_channel, Ordering::Relaxed);
    }

    pub fn sim_routed() -> u8 {
        SIM_ROUTED.load(Ordering::Relaxed)
    }

    pub(super) fn read() -> Option<u16> {
        if SIM_FAULT.load(Ordering::Relaxed) {
            return None;
        }
        SIM_COUNTS
            .get(usize::from(sim_routed()))
            .map(|slot| slot.load(Ordering::Relaxed))
    }
}

#[cfg(not(target_os = "espidf"))]
pub use sim::{sim_route, sim_routed, sim_set_adc_fault, sim_set_channel_counts};

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Option<u16> {
    sim::read()
}
