//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use savekaro_browse::LoadState;
use savekaro_catalog::catalog::{format_rupees, Product};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

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

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// One product per line: price, discount, brand, title.
    pub fn product_row(&self, index: usize, product: &Product) {
        if self.json {
            return;
        }
        let title_width = self.term_width().saturating_sub(48).max(20);
        println!(
            "  {:>4}  {:>10}  {}  {:<16}  {}  {}",
            style(index).dim(),
            format_rupees(product.price),
            discount_badge(product.discount_percent),
            console::truncate_str(&product.brand, 16, "…"),
            console::truncate_str(&product.title, title_width, "…"),
            style(product.id.as_str()).dim(),
        );
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
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn term_width(&self) -> usize {
        match self.term.size_checked() {
            Some((_, cols)) => cols as usize,
            None => 100,
        }
    }
}

/// Coloured listing state.
pub fn state_badge(state: &LoadState) -> String {
    match state {
        s if s.is_loading() => style("loading").yellow().to_string(),
        LoadState::Ready => style("ready").green().to_string(),
        LoadState::Error(_) => style("error").red().to_string(),
        _ => style("idle").dim().to_string(),
    }
}

/// `-35%`, highlighted for bigger discounts.
pub fn discount_badge(percent: u32) -> String {
    let text = format!("{:>4}", format!("-{}%", percent));
    match percent {
        0 => style(format!("{:>4}", "")).to_string(),
        1..=29 => style(text).yellow().to_string(),
        _ => style(text).green().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_badge_text() {
        console::set_colors_enabled(false);
        assert_eq!(discount_badge(35), "-35%");
        assert_eq!(discount_badge(5), " -5%");
        assert_eq!(discount_badge(0), "    ");
    }

    #[test]
    fn test_state_badge_text() {
        console::set_colors_enabled(false);
        assert_eq!(state_badge(&LoadState::Error("x".to_string())), "error");
        assert_eq!(state_badge(&LoadState::LoadingMore), "loading");
    }
}
