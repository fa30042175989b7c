use tracing::trace;

/// Replace hyphens in a URL slug with spaces, e.g. `cold-medicine` becomes
/// `cold medicine`.
pub fn humanize_slug(slug: &str) -> String {
    slug.replace('-', " ")
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Capitalize every whitespace separated word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a currency formatted price such as `"$1,299.50"` into a number.
///
/// Dollar signs, thousands separators and whitespace are ignored. Returns
/// `None` for anything that is not a finite, non-negative amount, which the
/// caller treats as the "Unknown" price.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        trace!(?raw, "Price empty after cleaning");
        return None;
    }
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        _ => {
            trace!(?raw, "Unparseable price");
            None
        }
    }
}
