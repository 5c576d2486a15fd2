//! The individual pairwise rules. Each returns `None` when it does not apply.

use crate::{
    category::Category,
    parts::{BoardSpec, CaseSpec, CoolerSpec, CpuSpec, PsuSpec, RamSpec, StorageSpec},
    selection::Build,
};

use super::{CheckKind, Level, Note, wattage::format_watts};

const MISSING: &str = "(missing)";

fn show(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or(MISSING)
}

fn show_list(v: &Option<Vec<String>>) -> String {
    match v {
        Some(items) if !items.is_empty() => items.join(", "),
        _ => MISSING.to_string(),
    }
}

// Both sides must be present and equal; absence is a mismatch.
fn same(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}

fn contains(list: &Option<Vec<String>>, item: &Option<String>) -> bool {
    match (list, item) {
        (Some(list), Some(item)) => list.iter().any(|x| x == item),
        _ => false,
    }
}

pub(super) fn cpu_board(b: &Build) -> Option<Note> {
    let cpu = CpuSpec::from_product(b.get(Category::Cpu)?);
    let mb = BoardSpec::from_product(b.get(Category::Motherboard)?);
    let note = if same(&cpu.socket, &mb.socket) {
        Note::new(
            CheckKind::CpuBoard,
            Level::Ok,
            format!(
                "CPU socket {} matches motherboard socket {}",
                show(&cpu.socket),
                show(&mb.socket)
            ),
        )
    } else {
        Note::new(
            CheckKind::CpuBoard,
            Level::Error,
            format!(
                "CPU socket {} does not match motherboard socket {}",
                show(&cpu.socket),
                show(&mb.socket)
            ),
        )
    };
    Some(note)
}

pub(super) fn ram_board(b: &Build) -> Option<Note> {
    let ram = RamSpec::from_product(b.get(Category::Ram)?);
    let mb = BoardSpec::from_product(b.get(Category::Motherboard)?);
    let note = if same(&ram.ram_type, &mb.ram_type) {
        Note::new(
            CheckKind::RamBoard,
            Level::Ok,
            format!("Memory type {} is supported by the motherboard", show(&ram.ram_type)),
        )
    } else {
        Note::new(
            CheckKind::RamBoard,
            Level::Error,
            format!(
                "Memory type {} does not match motherboard memory type {}",
                show(&ram.ram_type),
                show(&mb.ram_type)
            ),
        )
    };
    Some(note)
}

pub(super) fn gpu_board(b: &Build) -> Option<Note> {
    b.get(Category::Gpu)?;
    let mb = BoardSpec::from_product(b.get(Category::Motherboard)?);
    let note = if mb.pcie_slots > 0 {
        Note::new(
            CheckKind::GpuBoard,
            Level::Ok,
            format!("Motherboard has {} PCIe slot(s) for the GPU", mb.pcie_slots),
        )
    } else {
        Note::new(
            CheckKind::GpuBoard,
            Level::Error,
            "Motherboard has no PCIe slot for the GPU",
        )
    };
    Some(note)
}

pub(super) fn case_board(b: &Build) -> Option<Note> {
    let case = CaseSpec::from_product(b.get(Category::Case)?);
    let mb = BoardSpec::from_product(b.get(Category::Motherboard)?);
    let note = if contains(&case.form_factor_support, &mb.form_factor) {
        Note::new(
            CheckKind::CaseBoard,
            Level::Ok,
            format!("Case fits a {} motherboard", show(&mb.form_factor)),
        )
    } else {
        Note::new(
            CheckKind::CaseBoard,
            Level::Error,
            format!(
                "Case supports {} but the motherboard is {}",
                show_list(&case.form_factor_support),
                show(&mb.form_factor)
            ),
        )
    };
    Some(note)
}

pub(super) fn cooler_cpu(b: &Build) -> Option<Note> {
    let cooler = CoolerSpec::from_product(b.get(Category::Cooler)?);
    let cpu = CpuSpec::from_product(b.get(Category::Cpu)?);
    let note = if contains(&cooler.socket_support, &cpu.socket) {
        Note::new(
            CheckKind::CoolerCpu,
            Level::Ok,
            format!("Cooler supports socket {}", show(&cpu.socket)),
        )
    } else {
        Note::new(
            CheckKind::CoolerCpu,
            Level::Error,
            format!(
                "Cooler supports {} but the CPU socket is {}",
                show_list(&cooler.socket_support),
                show(&cpu.socket)
            ),
        )
    };
    Some(note)
}

pub(super) fn storage_board(b: &Build) -> Option<Note> {
    let drive = StorageSpec::from_product(b.get(Category::Storage)?);
    let mb = BoardSpec::from_product(b.get(Category::Motherboard)?);
    // Only performed when both sides declare something to compare.
    drive.interface.as_ref()?;
    mb.storage.as_ref()?;
    let note = if contains(&mb.storage, &drive.interface) {
        Note::new(
            CheckKind::StorageBoard,
            Level::Ok,
            format!("Motherboard supports {} drives", show(&drive.interface)),
        )
    } else {
        Note::new(
            CheckKind::StorageBoard,
            Level::Error,
            format!(
                "Drive interface {} is not among the motherboard's {}",
                show(&drive.interface),
                show_list(&mb.storage)
            ),
        )
    };
    Some(note)
}

pub(super) fn psu_wattage(b: &Build, required: f64) -> Option<Note> {
    let psu = PsuSpec::from_product(b.get(Category::Psu)?);
    let rated = psu.wattage.unwrap_or(0.0);
    let note = if rated < required {
        Note::new(
            CheckKind::PsuWattage,
            Level::Warn,
            format!(
                "PSU {} W is below estimated {} W",
                format_watts(rated),
                format_watts(required)
            ),
        )
    } else {
        Note::new(
            CheckKind::PsuWattage,
            Level::Ok,
            format!(
                "PSU {} W covers estimated {} W",
                format_watts(rated),
                format_watts(required)
            ),
        )
    };
    Some(note)
}
