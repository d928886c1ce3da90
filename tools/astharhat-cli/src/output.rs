//! Output formatting for the CLI.

use std::time::Duration;

use astharhat_commerce::catalog::CatalogItem;
use astharhat_commerce::Money;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a dimmed line under a header.
    pub fn subtitle(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", style(msg).dim());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a product listing as a table.
    pub fn products(&self, items: &[CatalogItem]) {
        if self.json {
            return;
        }
        let widths = [4, 28, 16, 12, 12];
        self.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "MOQ"], &widths);
        for item in items {
            self.table_row(
                &[
                    item.id.as_str(),
                    &item.name,
                    &item.category,
                    &price_label(item),
                    item.moq.as_deref().unwrap_or("-"),
                ],
                &widths,
            );
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Price with the markdown shown when the item is on offer.
pub fn price_label(item: &CatalogItem) -> String {
    match (item.original_price, item.discount_percent()) {
        (Some(original), Some(pct)) => {
            format!("{} ({} -{}%)", item.price.display(), original.display(), pct)
        }
        _ => item.price.display(),
    }
}

/// Money styled for totals.
pub fn money(amount: &Money) -> String {
    style(amount.display()).bold().to_string()
}

/// Checkout state badge.
pub fn state_badge(state: &str) -> String {
    match state {
        "confirmed" => style(state).green().to_string(),
        "submitting" => style(state).yellow().to_string(),
        "form_entry" => style(state).dim().to_string(),
        _ => state.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astharhat_commerce::catalog::Catalog;
    use astharhat_commerce::ProductId;

    #[test]
    fn test_price_label_shows_markdown() {
        console::set_colors_enabled(false);
        let catalog = Catalog::builtin();
        let watch = catalog.get(&ProductId::new("p1")).unwrap();
        let label = price_label(watch);
        assert!(label.starts_with("৳5,500"));
        assert!(label.contains("৳7,500"));
    }
}
