//! Compatibility engine.
//!
//! [`evaluate`] runs a fixed, ordered list of pairwise checks over a [`Build`]
//! and returns one [`Note`] for each check it could perform. A check is
//! performed only when both of its categories are filled; otherwise it emits
//! nothing. Checks never short-circuit each other.
//!
//! | # | check                  | emits                                        |
//! |---|------------------------|----------------------------------------------|
//! | 1 | CPU × Motherboard      | error on socket mismatch                     |
//! | 2 | RAM × Motherboard      | error on memory type mismatch                |
//! | 3 | GPU × Motherboard      | error when the board has no PCIe slot        |
//! | 4 | Case × Motherboard     | error when the board form factor won't fit   |
//! | 5 | Cooler × CPU           | error when the cooler lacks the CPU socket   |
//! | 6 | Storage × Motherboard  | error on unsupported drive interface         |
//! | 7 | PSU                    | warn when rated wattage < estimated draw     |
//!
//! A missing attribute on either side of a performed check counts as a
//! mismatch. Check 6 only runs when the drive declares an interface and the
//! board declares a storage list.

mod checks;
mod wattage;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selection::Build;

pub use wattage::{HEADROOM_WATTS, estimate_wattage, format_watts};

/// Severity of a note. Ordered `Ok < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Compatible.
    Ok,
    /// Works, but worth a second look.
    Warn,
    /// Will not work together.
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Ok => "ok",
            Level::Warn => "warn",
            Level::Error => "error",
        })
    }
}

/// Which rule produced a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// CPU socket vs board socket.
    CpuBoard,
    /// RAM type vs board memory type.
    RamBoard,
    /// GPU needs a PCIe slot on the board.
    GpuBoard,
    /// Case form factors vs board form factor.
    CaseBoard,
    /// Cooler sockets vs CPU socket.
    CoolerCpu,
    /// Drive interface vs board storage list.
    StorageBoard,
    /// PSU rating vs estimated draw.
    PsuWattage,
}

/// One advisory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Producing rule.
    pub check: CheckKind,
    /// Severity.
    pub level: Level,
    /// Human-readable explanation naming the compared values.
    pub message: String,
}

impl Note {
    pub(crate) fn new(check: CheckKind, level: Level, message: impl Into<String>) -> Self {
        Self {
            check,
            level,
            message: message.into(),
        }
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Notes in check order.
    pub notes: Vec<Note>,
    /// Estimated draw used by the PSU check.
    pub required_watts: f64,
}

impl Report {
    /// Worst level among the notes; `None` when no check could run yet.
    ///
    /// `None` means "nothing to evaluate", which is not the same as a
    /// non-empty report that is all `Ok`.
    pub fn overall(&self) -> Option<Level> {
        self.notes.iter().map(|n| n.level).max()
    }

    /// True when no check was performed.
    pub fn is_pending(&self) -> bool {
        self.notes.is_empty()
    }

    /// Notes at exactly `level`.
    pub fn with_level(&self, level: Level) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(move |n| n.level == level)
    }
}

/// Run every applicable check over `build`.
pub fn evaluate(build: &Build) -> Report {
    let required_watts = estimate_wattage(build);

    let notes: Vec<Note> = [
        checks::cpu_board(build),
        checks::ram_board(build),
        checks::gpu_board(build),
        checks::case_board(build),
        checks::cooler_cpu(build),
        checks::storage_board(build),
        checks::psu_wattage(build, required_watts),
    ]
    .into_iter()
    .flatten()
    .collect();

    let report = Report {
        notes,
        required_watts,
    };
    tracing::debug!(
        parts = build.len(),
        notes = report.notes.len(),
        errors = report.with_level(Level::Error).count(),
        warnings = report.with_level(Level::Warn).count(),
        required_watts,
        "compatibility evaluated"
    );
    report
}
