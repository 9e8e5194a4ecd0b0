//! Currency display helpers for money columns and line totals

/// Formats an amount as dollars with two decimals, e.g. `$8429.90`
#[must_use]
pub fn format_money(amount: f64) -> String {
    let cents = (amount * 100.0).round() / 100.0;
    if cents < 0.0 {
        format!("-${:.2}", -cents)
    } else {
        format!("${:.2}", cents.abs())
    }
}

/// Parses a displayed amount, accepting a leading `$` and `,` separators
#[must_use]
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits: String = rest
        .strip_prefix('$')
        .unwrap_or(rest)
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -value } else { value })
}
