//! Reduction of displayed price text to a number.

use tracker_core::types::Price;

/// Reduce displayed price text such as `"₹79,990"` or `"$1,299.99"` to a price.
///
/// Takes the first run of digits with its `,` thousands separators and `.`
/// decimal point, ignoring currency symbols around it. Yields `None` for text
/// without digits, a minus sign anywhere before the number, a `,` after the
/// decimal point (as in `"1.299,00"`), or a number followed by `%`.
pub fn clean_price_text(text: &str) -> Option<Price> {
    let start = text.find(|c: char| c.is_ascii_digit())?;

    if text[..start].contains('-') {
        return None;
    }

    let end = text[start..]
        .find(|c: char| !(c.is_ascii_digit() || c == ',' || c == '.'))
        .map_or(text.len(), |offset| start + offset);
    let number = &text[start..end];

    if text[end..].starts_with('%') {
        return None;
    }
    if let Some(dot) = number.find('.') {
        if number[dot..].contains(',') {
            return None;
        }
    }

    let digits: String = number.chars().filter(|c| *c != ',').collect();
    Price::parse(digits.trim_end_matches('.'))
}
