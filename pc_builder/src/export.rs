//! Read-only renderings of the current build: a plain-text summary for the
//! clipboard and a standalone HTML page for printing.
//!
//! Both are `Display` views, so [`summary_text`] and [`printable_html`] are
//! plain `to_string()` calls.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::{
    category::Category,
    compat::{Level, Report, format_watts},
    selection::Build,
};

/// Price with two decimals followed by the currency label.
pub fn format_price(amount: f64, currency: &str) -> String {
    format!("{amount:.2} {currency}")
}

fn status_line(report: &Report) -> &'static str {
    match report.overall() {
        None => "nothing to check yet",
        Some(Level::Ok) => "all checks passed",
        Some(Level::Warn) => "warnings",
        Some(Level::Error) => "incompatible",
    }
}

/// Plain-text summary view.
pub struct TextSummary<'a> {
    /// Build to render.
    pub build: &'a Build,
    /// Its compatibility report.
    pub report: &'a Report,
    /// Currency label for prices.
    pub currency: &'a str,
}

impl fmt::Display for TextSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = Category::ALL.iter().map(|c| c.label().len()).max().unwrap_or(0);

        writeln!(f, "PC build summary")?;
        writeln!(f, "================")?;
        for cat in Category::ALL {
            match self.build.get(cat) {
                Some(p) => writeln!(
                    f,
                    "{:<width$}  {} - {}",
                    cat.label(),
                    p.name,
                    format_price(p.price, self.currency)
                )?,
                None => writeln!(f, "{:<width$}  not selected", cat.label())?,
            }
        }
        writeln!(f)?;
        writeln!(f, "Total: {}", format_price(self.build.total_price(), self.currency))?;
        writeln!(f, "Estimated power: {} W", format_watts(self.report.required_watts))?;
        writeln!(f, "Compatibility: {}", status_line(self.report))?;
        for note in &self.report.notes {
            writeln!(f, "  [{}] {}", note.level, note.message)?;
        }
        Ok(())
    }
}

/// Plain-text summary, one line per category.
pub fn summary_text(build: &Build, report: &Report, currency: &str) -> String {
    TextSummary {
        build,
        report,
        currency,
    }
    .to_string()
}

// Text escaped for HTML element content and attribute values.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(raw: &str) -> String {
    Escaped(raw).to_string()
}

const STYLE: &str = "body{font-family:sans-serif}table{border-collapse:collapse}\
td,th{border:1px solid #999;padding:4px 8px}.error{color:#b00}.warn{color:#a60}.ok{color:#070}";

/// Printable HTML document view.
pub struct HtmlSummary<'a> {
    /// Build to render.
    pub build: &'a Build,
    /// Its compatibility report.
    pub report: &'a Report,
    /// Currency label for prices.
    pub currency: &'a str,
    /// Timestamp printed in the header.
    pub generated_at: DateTime<Utc>,
}

impl fmt::Display for HtmlSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>PC build summary</title>")?;
        writeln!(f, "<style>{STYLE}</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body onload=\"window.print()\">")?;
        writeln!(f, "<h1>PC build summary</h1>")?;
        writeln!(f, "<p>Generated {}</p>", self.generated_at.format("%Y-%m-%d %H:%M UTC"))?;
        writeln!(f, "<table>")?;
        writeln!(f, "<tr><th>Category</th><th>Part</th><th>Price</th></tr>")?;
        for cat in Category::ALL {
            match self.build.get(cat) {
                Some(p) => writeln!(
                    f,
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                    cat.label(),
                    Escaped(&p.name),
                    Escaped(&format_price(p.price, self.currency))
                )?,
                None => writeln!(
                    f,
                    "<tr><td>{}</td><td><em>not selected</em></td><td></td></tr>",
                    cat.label()
                )?,
            }
        }
        writeln!(
            f,
            "<tr><th colspan=\"2\">Total</th><th>{}</th></tr>",
            Escaped(&format_price(self.build.total_price(), self.currency))
        )?;
        writeln!(f, "</table>")?;
        writeln!(
            f,
            "<p>Estimated power: {} W</p>",
            format_watts(self.report.required_watts)
        )?;
        writeln!(f, "<h2>Compatibility: {}</h2>", status_line(self.report))?;
        if !self.report.notes.is_empty() {
            writeln!(f, "<ul>")?;
            for note in &self.report.notes {
                writeln!(f, "<li class=\"{}\">{}</li>", note.level, Escaped(&note.message))?;
            }
            writeln!(f, "</ul>")?;
        }
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

/// Standalone printable HTML document.
pub fn printable_html(
    build: &Build,
    report: &Report,
    currency: &str,
    generated_at: DateTime<Utc>,
) -> String {
    HtmlSummary {
        build,
        report,
        currency,
        generated_at,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compat::evaluate, product::Product};
    use chrono::TimeZone;

    fn sample() -> Build {
        let mut b = Build::new();
        b.pick(
            Product::new("Ryzen 5 7600", Category::Cpu, 199.0, 1)
                .with_attr("socket", "AM5")
                .with_attr("tdp", 65),
        );
        b.pick(Product::new("B650 <Tomahawk>", Category::Motherboard, 219.5, 1).with_attr("socket", "AM4"));
        b
    }

    #[test]
    fn text_summary_layout() {
        let b = sample();
        let text = summary_text(&b, &evaluate(&b), "USD");
        let expected = "\
PC build summary
================
CPU          Ryzen 5 7600 - 199.00 USD
Motherboard  B650 <Tomahawk> - 219.50 USD
GPU          not selected
RAM          not selected
Storage      not selected
PSU          not selected
Case         not selected
Cooler       not selected

Total: 418.50 USD
Estimated power: 165 W
Compatibility: incompatible
  [error] CPU socket AM5 does not match motherboard socket AM4
";
        assert_eq!(text, expected);
    }

    #[test]
    fn empty_build_is_pending_in_summary() {
        let b = Build::new();
        let text = summary_text(&b, &evaluate(&b), "EUR");
        assert!(text.contains("Total: 0.00 EUR"));
        assert!(text.contains("Compatibility: nothing to check yet"));
    }

    #[test]
    fn html_escapes_user_text() {
        let b = sample();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        let html = printable_html(&b, &evaluate(&b), "USD", at);
        assert!(html.contains("B650 &lt;Tomahawk&gt;"));
        assert!(!html.contains("<Tomahawk>"));
        assert!(html.contains("Generated 2025-03-01 12:30 UTC"));
        assert!(html.contains("<li class=\"error\">"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn fractional_estimate_is_printed_as_is() {
        let mut b = Build::new();
        b.pick(Product::new("Odd CPU", Category::Cpu, 99.0, 1).with_attr("tdp", 65.5));
        let text = summary_text(&b, &evaluate(&b), "USD");
        assert!(text.contains("Estimated power: 165.5 W"), "{text}");
    }

    #[test]
    fn escape_covers_quotes() {
        assert_eq!(escape_html(r#"a&b "c" 'd'"#), "a&amp;b &quot;c&quot; &#39;d&#39;");
    }
}
