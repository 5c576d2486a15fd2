//! Typed, per-category views over a product's open attribute bag.
//!
//! The compatibility engine never reads raw attribute keys; it goes through
//! [`PartSpec`], which pulls the fields each category is known to carry and
//! leaves everything else in [`Product::attributes`].
//!
//! Lookup rules:
//! - Text fields accept strings, numbers and booleans and compare by their
//!   textual form (`1700` and `"1700"` are the same socket).
//! - List fields accept a JSON array or a single scalar, which is read as a
//!   one-element list.
//! - Numeric fields accept numbers or numeric strings; anything else is absent.

use serde_json::Value;

use crate::{category::Category, product::Product};

/// Processor fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuSpec {
    /// Socket name, e.g. "AM5".
    pub socket: Option<String>,
    /// Thermal design power in watts.
    pub tdp: Option<f64>,
}

/// Mainboard fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardSpec {
    /// CPU socket.
    pub socket: Option<String>,
    /// Supported memory generation, e.g. "DDR5".
    pub ram_type: Option<String>,
    /// Board form factor, e.g. "ATX".
    pub form_factor: Option<String>,
    /// Count of PCIe slots; `0` when the attribute is missing or falsy.
    pub pcie_slots: u32,
    /// Drive interfaces the board offers, when declared.
    pub storage: Option<Vec<String>>,
}

/// Graphics card fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuSpec {
    /// Board power in watts.
    pub tdp: Option<f64>,
    /// Bus interface (informational only).
    pub interface: Option<String>,
}

/// Memory kit fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RamSpec {
    /// Memory generation.
    pub ram_type: Option<String>,
    /// Kit capacity.
    pub size_gb: Option<f64>,
}

/// Drive fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorageSpec {
    /// Drive interface, e.g. "NVMe".
    pub interface: Option<String>,
    /// Capacity.
    pub size_gb: Option<f64>,
}

/// Power supply fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PsuSpec {
    /// Rated output in watts.
    pub wattage: Option<f64>,
}

/// Chassis fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseSpec {
    /// Board form factors the case accepts.
    pub form_factor_support: Option<Vec<String>>,
}

/// Cooler fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoolerSpec {
    /// CPU sockets the mount kit fits.
    pub socket_support: Option<Vec<String>>,
}

/// Known fields of a product, tagged by its category.
#[derive(Debug, Clone, PartialEq)]
pub enum PartSpec {
    /// See [`CpuSpec`].
    Cpu(CpuSpec),
    /// See [`BoardSpec`].
    Motherboard(BoardSpec),
    /// See [`GpuSpec`].
    Gpu(GpuSpec),
    /// See [`RamSpec`].
    Ram(RamSpec),
    /// See [`StorageSpec`].
    Storage(StorageSpec),
    /// See [`PsuSpec`].
    Psu(PsuSpec),
    /// See [`CaseSpec`].
    Case(CaseSpec),
    /// See [`CoolerSpec`].
    Cooler(CoolerSpec),
}

impl PartSpec {
    /// Read the typed view for `p` according to its category.
    pub fn of(p: &Product) -> Self {
        match p.category {
            Category::Cpu => PartSpec::Cpu(CpuSpec::from_product(p)),
            Category::Motherboard => PartSpec::Motherboard(BoardSpec::from_product(p)),
            Category::Gpu => PartSpec::Gpu(GpuSpec::from_product(p)),
            Category::Ram => PartSpec::Ram(RamSpec::from_product(p)),
            Category::Storage => PartSpec::Storage(StorageSpec::from_product(p)),
            Category::Psu => PartSpec::Psu(PsuSpec::from_product(p)),
            Category::Case => PartSpec::Case(CaseSpec::from_product(p)),
            Category::Cooler => PartSpec::Cooler(CoolerSpec::from_product(p)),
        }
    }

    /// Category the view belongs to.
    pub fn category(&self) -> Category {
        match self {
            PartSpec::Cpu(_) => Category::Cpu,
            PartSpec::Motherboard(_) => Category::Motherboard,
            PartSpec::Gpu(_) => Category::Gpu,
            PartSpec::Ram(_) => Category::Ram,
            PartSpec::Storage(_) => Category::Storage,
            PartSpec::Psu(_) => Category::Psu,
            PartSpec::Case(_) => Category::Case,
            PartSpec::Cooler(_) => Category::Cooler,
        }
    }
}

impl CpuSpec {
    /// Read from `socket` and `tdp`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            socket: text(p, "socket"),
            tdp: number(p, "tdp"),
        }
    }
}

impl BoardSpec {
    /// Read from `socket`, `ramType`, `formFactor`, `pcieSlots` and `storage`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            socket: text(p, "socket"),
            ram_type: text(p, "ramType"),
            form_factor: text(p, "formFactor"),
            pcie_slots: count(p, "pcieSlots"),
            storage: list(p, "storage"),
        }
    }
}

impl GpuSpec {
    /// Read from `tdp` and `interface`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            tdp: number(p, "tdp"),
            interface: text(p, "interface"),
        }
    }
}

impl RamSpec {
    /// Read from `type`, falling back to `ramType`, and `sizeGB`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            ram_type: text(p, "type").or_else(|| text(p, "ramType")),
            size_gb: number(p, "sizeGB"),
        }
    }
}

impl StorageSpec {
    /// Read from `interface` and `sizeGB`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            interface: text(p, "interface"),
            size_gb: number(p, "sizeGB"),
        }
    }
}

impl PsuSpec {
    /// Read from `wattage`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            wattage: number(p, "wattage"),
        }
    }
}

impl CaseSpec {
    /// Read from `formFactorSupport`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            form_factor_support: list(p, "formFactorSupport"),
        }
    }
}

impl CoolerSpec {
    /// Read from `socketSupport`.
    pub fn from_product(p: &Product) -> Self {
        Self {
            socket_support: list(p, "socketSupport"),
        }
    }
}

/// Textual form of a scalar; `None` for null, empty strings, arrays and objects.
pub fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn text(p: &Product, key: &str) -> Option<String> {
    p.attributes.get(key).and_then(scalar_text)
}

fn number(p: &Product, key: &str) -> Option<f64> {
    match p.attributes.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn list(p: &Product, key: &str) -> Option<Vec<String>> {
    match p.attributes.get(key)? {
        Value::Array(items) => Some(items.iter().filter_map(scalar_text).collect()),
        Value::Null => None,
        other => scalar_text(other).map(|s| vec![s]),
    }
}

// Truthiness of a count-like attribute. Any non-zero number and any
// non-empty string is at least one slot; a whole number above one keeps
// its value.
fn count(p: &Product, key: &str) -> u32 {
    match p.attributes.get(key) {
        Some(Value::Number(n)) => n.as_f64().map(slots).unwrap_or(0),
        Some(Value::Bool(true)) => 1,
        Some(Value::String(s)) if !s.is_empty() => {
            s.trim().parse::<f64>().map(slots).unwrap_or(1).max(1)
        }
        Some(Value::Array(items)) if !items.is_empty() => items.len() as u32,
        _ => 0,
    }
}

fn slots(f: f64) -> u32 {
    if f == 0.0 || f.is_nan() {
        0
    } else if f >= 1.0 {
        f.min(f64::from(u32::MAX)) as u32
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_render_without_fraction() {
        assert_eq!(scalar_text(&json!(1700)).as_deref(), Some("1700"));
        assert_eq!(scalar_text(&json!(1700.0)).as_deref(), Some("1700"));
        assert_eq!(scalar_text(&json!(2.5)).as_deref(), Some("2.5"));
        assert_eq!(scalar_text(&json!("")), None);
        assert_eq!(scalar_text(&json!(null)), None);
    }

    #[test]
    fn board_view_reads_known_keys() {
        let p = Product::new("X670E", Category::Motherboard, 300.0, 1)
            .with_attr("socket", "AM5")
            .with_attr("ramType", "DDR5")
            .with_attr("formFactor", "ATX")
            .with_attr("pcieSlots", "2")
            .with_attr("storage", "NVMe")
            .with_attr("rgb", true);
        let PartSpec::Motherboard(b) = PartSpec::of(&p) else {
            panic!("wrong variant");
        };
        assert_eq!(b.socket.as_deref(), Some("AM5"));
        assert_eq!(b.ram_type.as_deref(), Some("DDR5"));
        assert_eq!(b.pcie_slots, 2);
        assert_eq!(b.storage, Some(vec!["NVMe".to_string()]));
        // residual keys stay on the product
        assert_eq!(p.attributes.get("rgb"), Some(&json!(true)));
    }

    #[test]
    fn ram_type_falls_back_to_ram_type_key() {
        let typed = Product::new("kit", Category::Ram, 90.0, 1).with_attr("type", "DDR5");
        let imported = Product::new("kit", Category::Ram, 90.0, 1).with_attr("ramType", "DDR4");
        assert_eq!(RamSpec::from_product(&typed).ram_type.as_deref(), Some("DDR5"));
        assert_eq!(RamSpec::from_product(&imported).ram_type.as_deref(), Some("DDR4"));
    }

    #[test]
    fn pcie_slot_truthiness() {
        let mk = |v: Value| Product::new("b", Category::Motherboard, 1.0, 1).with_attr("pcieSlots", v);
        assert_eq!(BoardSpec::from_product(&mk(json!(0))).pcie_slots, 0);
        assert_eq!(BoardSpec::from_product(&mk(json!(""))).pcie_slots, 0);
        assert_eq!(BoardSpec::from_product(&mk(json!(false))).pcie_slots, 0);
        assert_eq!(BoardSpec::from_product(&mk(json!(true))).pcie_slots, 1);
        assert_eq!(BoardSpec::from_product(&mk(json!("x16"))).pcie_slots, 1);
        assert_eq!(BoardSpec::from_product(&mk(json!(3))).pcie_slots, 3);
    }

    #[test]
    fn any_nonzero_or_nonblank_pcie_value_is_a_slot() {
        let mk = |v: Value| Product::new("b", Category::Motherboard, 1.0, 1).with_attr("pcieSlots", v);
        assert_eq!(BoardSpec::from_product(&mk(json!(0.5))).pcie_slots, 1);
        assert_eq!(BoardSpec::from_product(&mk(json!(-1))).pcie_slots, 1);
        assert_eq!(BoardSpec::from_product(&mk(json!("0"))).pcie_slots, 1);
        assert_eq!(BoardSpec::from_product(&mk(json!(" "))).pcie_slots, 1);
        assert_eq!(BoardSpec::from_product(&mk(json!("2"))).pcie_slots, 2);
        assert_eq!(BoardSpec::from_product(&mk(json!(2.7))).pcie_slots, 2);
        assert_eq!(BoardSpec::from_product(&mk(json!([]))).pcie_slots, 0);
    }

    #[test]
    fn tdp_accepts_numeric_strings_only() {
        let a = Product::new("c", Category::Cpu, 1.0, 1).with_attr("tdp", " 105 ");
        let b = Product::new("c", Category::Cpu, 1.0, 1).with_attr("tdp", "hot");
        assert_eq!(CpuSpec::from_product(&a).tdp, Some(105.0));
        assert_eq!(CpuSpec::from_product(&b).tdp, None);
    }
}
