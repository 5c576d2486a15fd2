//! Whole-system power estimate.

use crate::{
    category::Category,
    parts::{CpuSpec, GpuSpec},
    selection::Build,
};

/// Flat allowance for every part that is not the CPU or GPU.
pub const HEADROOM_WATTS: f64 = 100.0;

/// `cpu.tdp + gpu.tdp + HEADROOM_WATTS`, missing parts or tdp counting as 0.
///
/// The sum is exact; fractional tdp values are kept as given.
pub fn estimate_wattage(build: &Build) -> f64 {
    let cpu = build
        .get(Category::Cpu)
        .and_then(|p| CpuSpec::from_product(p).tdp);
    let gpu = build
        .get(Category::Gpu)
        .and_then(|p| GpuSpec::from_product(p).tdp);
    watts(cpu) + watts(gpu) + HEADROOM_WATTS
}

fn watts(tdp: Option<f64>) -> f64 {
    match tdp {
        Some(t) if t.is_finite() && t > 0.0 => t,
        _ => 0.0,
    }
}

/// Watt figure for messages: `165` rather than `165.0`, `65.5` as is.
pub fn format_watts(w: f64) -> String {
    if w.fract() == 0.0 && w.abs() < 1e15 {
        format!("{}", w as i64)
    } else {
        format!("{w}")
    }
}
