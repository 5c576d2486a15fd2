//! Built-in catalog: one compatible AM5/DDR5/ATX build plus a few parts that
//! trip the compatibility rules.

use serde_json::json;

use crate::{
    category::Category,
    product::{Product, ProductId},
};

fn seeded(id: &str, name: &str, category: Category, price: f64, stock: u32) -> Product {
    Product {
        id: ProductId::from(id),
        ..Product::new(name, category, price, stock)
    }
}

/// Products used when no saved catalog can be loaded. Ids are stable.
pub fn default_seed() -> Vec<Product> {
    vec![
        seeded("seed-cpu-r5-7600", "AMD Ryzen 5 7600", Category::Cpu, 199.0, 12)
            .with_attr("socket", "AM5")
            .with_attr("tdp", 65),
        seeded("seed-cpu-i5-13400f", "Intel Core i5-13400F", Category::Cpu, 189.0, 8)
            .with_attr("socket", "LGA1700")
            .with_attr("tdp", 65),
        seeded("seed-mb-b650", "MSI B650 Tomahawk", Category::Motherboard, 219.0, 5)
            .with_attr("socket", "AM5")
            .with_attr("ramType", "DDR5")
            .with_attr("formFactor", "ATX")
            .with_attr("pcieSlots", 2)
            .with_attr("storage", json!(["NVMe", "SATA"])),
        seeded("seed-mb-b760i", "ASUS ROG Strix B760-I", Category::Motherboard, 189.0, 3)
            .with_attr("socket", "LGA1700")
            .with_attr("ramType", "DDR4")
            .with_attr("formFactor", "ITX")
            .with_attr("pcieSlots", 1)
            .with_attr("storage", json!(["NVMe"])),
        seeded("seed-gpu-4070", "NVIDIA GeForce RTX 4070", Category::Gpu, 599.0, 4)
            .with_attr("tdp", 200)
            .with_attr("interface", "PCIe 4.0"),
        seeded("seed-ram-ddr5-32", "Kingston Fury 32GB DDR5-6000", Category::Ram, 109.0, 20)
            .with_attr("type", "DDR5")
            .with_attr("sizeGB", 32),
        seeded("seed-ram-ddr4-16", "Corsair Vengeance 16GB DDR4-3200", Category::Ram, 45.0, 15)
            .with_attr("type", "DDR4")
            .with_attr("sizeGB", 16),
        seeded("seed-ssd-990", "Samsung 990 Pro 1TB", Category::Storage, 119.0, 10)
            .with_attr("interface", "NVMe")
            .with_attr("sizeGB", 1000),
        seeded("seed-psu-650", "Seasonic Focus GX-650", Category::Psu, 99.0, 6)
            .with_attr("wattage", 650),
        seeded("seed-psu-250", "Generic 250W", Category::Psu, 25.0, 2)
            .with_attr("wattage", 250),
        seeded("seed-case-4000d", "Corsair 4000D Airflow", Category::Case, 104.0, 7)
            .with_attr("formFactorSupport", json!(["ATX", "mATX", "ITX"])),
        seeded("seed-cooler-ak400", "DeepCool AK400", Category::Cooler, 35.0, 9)
            .with_attr("socketSupport", json!(["AM4", "AM5", "LGA1700"])),
    ]
}
