//! Display formatting shared by the CLI tables and the TUI.

/// Marker rendered for absent values.
pub const NOT_APPLICABLE: &str = "N/A";

/// Directory (relative to the API base URL) that holds provider logos.
pub const LOGO_DIR: &str = "static/logos";

/// Render a parameter count given in millions.
///
/// Counts of 1000M and above are shown in billions, truncated toward zero
/// (`1500` -> `"1B"`); smaller counts keep the `M` suffix.
pub fn format_parameter_count(millions: u64) -> String {
    if millions >= 1000 {
        format!("{}B", millions / 1000)
    } else {
        format!("{}M", millions)
    }
}

/// Reconstruct a magnitude in millions from a suffixed count.
///
/// Accepts the rendered form (`"7B"`, `"500M"`), decimals (`"1.5B"`),
/// grouped raw numbers (`"13,000"`) and is case-insensitive on the suffix.
pub fn parse_parameter_count(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() || text == NOT_APPLICABLE {
        return None;
    }

    let (number, scale) = match text.chars().last()? {
        'B' | 'b' => (&text[..text.len() - 1], 1000.0),
        'M' | 'm' => (&text[..text.len() - 1], 1.0),
        _ => (text, 1.0),
    };

    let value: f64 = number.trim().replace(',', "").parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some((value * scale).round() as u64)
}

/// Render an integer with `,` thousands separators (`128000` -> `"128,000"`).
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Parse a number that may contain grouping separators.
pub fn parse_grouped(text: &str) -> Option<u64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    cleaned.parse().ok()
}

pub fn or_not_applicable(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(NOT_APPLICABLE)
        .to_string()
}

pub fn parameter_count_text(value: Option<u64>) -> String {
    value
        .map(format_parameter_count)
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

pub fn grouped_text(value: Option<u64>) -> String {
    value
        .map(format_grouped)
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

/// Resolve a provider logo fragment to its path. No fragment, no logo.
pub fn logo_path(fragment: Option<&str>) -> Option<String> {
    let fragment = fragment.map(str::trim).filter(|f| !f.is_empty())?;
    Some(format!("{}/{}", LOGO_DIR, fragment))
}
