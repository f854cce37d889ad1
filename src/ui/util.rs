use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{Outcome, Summary};

/// Format an amount with a currency symbol, thousand separators and 2 decimal places.
/// e.g. `(1234567.891, "R$")` → `"R$ 1,234,567.89"`
pub(crate) fn format_money(val: Decimal, symbol: &str) -> String {
    let abs = val
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val < Decimal::ZERO && !abs.is_zero() {
        "-"
    } else {
        ""
    };
    if symbol.is_empty() {
        format!("{sign}{with_commas}.{dec_part}")
    } else {
        format!("{sign}{symbol} {with_commas}.{dec_part}")
    }
}

/// One-sentence closing report for the event.
pub(crate) fn outcome_message(summary: &Summary, currency: &str) -> String {
    match summary.outcome() {
        Outcome::Profit { share_per_member } => format!(
            "Profit of {}. Each of the {} members gets back {} on top of their contribution.",
            format_money(summary.profit_or_loss, currency),
            summary.member_count,
            format_money(share_per_member, currency)
        ),
        Outcome::Covered => {
            "The event is paid for by member contributions plus ticket sales.".to_string()
        }
        Outcome::Shortfall { missing } => format!(
            "Short on cash! Members still need to put in {} in total.",
            format_money(missing, currency)
        ),
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Move a list cursor down by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_down(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if *index + 1 < len {
        *index += 1;
        if *index >= *scroll + page {
            *scroll = index.saturating_sub(page.saturating_sub(1));
        }
    }
}

/// Move a list cursor up by one, adjusting scroll to keep cursor visible.
pub(crate) fn scroll_up(index: &mut usize, scroll: &mut usize) {
    *index = index.saturating_sub(1);
    if *index < *scroll {
        *scroll = *index;
    }
}

/// Jump cursor to the top of a list.
pub(crate) fn scroll_to_top(index: &mut usize, scroll: &mut usize) {
    *index = 0;
    *scroll = 0;
}

/// Jump cursor to the bottom of a list.
pub(crate) fn scroll_to_bottom(index: &mut usize, scroll: &mut usize, len: usize, page: usize) {
    if len > 0 {
        *index = len - 1;
        *scroll = index.saturating_sub(page.saturating_sub(1));
    }
}

/// Expand a leading `~/` to the home directory.
pub(crate) fn expand_home(path: &str) -> std::path::PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = directories::UserDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    std::path::PathBuf::from(path)
}
