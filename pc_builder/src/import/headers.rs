//! Header normalization and the alias tables the normalizer resolves against.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

/// Lowercase and keep only alphanumeric characters (Unicode-aware).
///
/// `"Form Factor (Support)"` becomes `"formfactorsupport"`, and Cyrillic
/// headers keep their letters: `"Форм-фактор"` becomes `"формфактор"`.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn aliases(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|a| normalize_header(a)).collect()
}

/// Headers that name the product category.
pub static CATEGORY: Lazy<Vec<String>> = Lazy::new(|| {
    aliases(&["category", "cat", "kind", "component", "категория", "компонент"])
});

/// Headers that name the product.
pub static NAME: Lazy<Vec<String>> = Lazy::new(|| {
    aliases(&[
        "name",
        "product",
        "product name",
        "title",
        "model",
        "название",
        "наименование",
        "модель",
        "товар",
    ])
});

/// Headers that hold the price.
pub static PRICE: Lazy<Vec<String>> =
    Lazy::new(|| aliases(&["price", "cost", "price usd", "цена", "стоимость"]));

/// Headers that hold the stock count.
pub static STOCK: Lazy<Vec<String>> = Lazy::new(|| {
    aliases(&[
        "stock",
        "qty",
        "quantity",
        "in stock",
        "count",
        "количество",
        "остаток",
        "наличие",
    ])
});

/// Headers holding a JSON object of extra attributes.
pub static ATTRIBUTES: Lazy<Vec<String>> = Lazy::new(|| {
    aliases(&["attributes", "attrs", "specs", "json", "характеристики", "атрибуты"])
});

/// Attribute key -> header aliases, tried in order.
pub static ATTRIBUTE_KEYS: Lazy<Vec<(&'static str, Vec<String>)>> = Lazy::new(|| {
    vec![
        ("socket", aliases(&["socket", "cpu socket", "сокет"])),
        ("tdp", aliases(&["tdp", "tdp w", "теплопакет"])),
        (
            "ramType",
            aliases(&["ramType", "ram type", "memory type", "тип памяти"]),
        ),
        ("formFactor", aliases(&["formFactor", "form factor", "форм-фактор"])),
        (
            "formFactorSupport",
            aliases(&[
                "formFactorSupport",
                "supported form factors",
                "поддержка форм-факторов",
            ]),
        ),
        ("pcieSlots", aliases(&["pcieSlots", "pcie slots", "pcie", "слоты pcie"])),
        ("interface", aliases(&["interface", "интерфейс"])),
        (
            "storage",
            aliases(&["storage", "storage interfaces", "накопители"]),
        ),
        ("wattage", aliases(&["wattage", "watts", "power", "мощность"])),
        (
            "sizeGB",
            aliases(&["sizeGB", "size gb", "size", "capacity", "объем", "объём"]),
        ),
        (
            "socketSupport",
            aliases(&["socketSupport", "supported sockets", "sockets", "поддержка сокетов"]),
        ),
    ]
});

/// Normalized header -> cell for one row. Later columns win on collisions.
pub struct HeaderLookup<'a> {
    cells: IndexMap<String, &'a Value>,
}

impl<'a> HeaderLookup<'a> {
    /// Index a raw row by normalized header.
    pub fn new(row: &'a IndexMap<String, Value>) -> Self {
        let cells = row
            .iter()
            .map(|(h, v)| (normalize_header(h), v))
            .collect();
        Self { cells }
    }

    /// First alias present with a non-blank value.
    pub fn first(&self, aliases: &[String]) -> Option<&'a Value> {
        aliases
            .iter()
            .filter_map(|a| self.cells.get(a).copied())
            .find(|v| !is_blank(v))
    }
}

/// Null or whitespace-only string.
pub fn is_blank(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
