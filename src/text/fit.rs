/// Glyph appended to a shortened string.
pub const ELLIPSIS: char = '\u{2026}';

/// Rendered-width oracle for a single font at a single size.
pub trait TextMeasure {
    fn width(&mut self, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str) -> f32,
{
    fn width(&mut self, text: &str) -> f32 {
        self(text)
    }
}

/// Shorten `text` until it renders within `max_width`.
///
/// Text that already fits (including exactly at the limit) comes back unchanged. Otherwise the
/// longest proper char prefix that still fits with [`ELLIPSIS`] appended wins; when not even one
/// character fits, the ellipsis alone is returned.
pub fn fit(text: &str, measure: &mut impl TextMeasure, max_width: f32) -> String {
    if measure.width(text) <= max_width {
        return text.to_string();
    }

    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .collect();

    let mut candidate = String::with_capacity(text.len() + ELLIPSIS.len_utf8());
    for &end in boundaries.iter().rev() {
        candidate.clear();
        candidate.push_str(&text[..end]);
        candidate.push(ELLIPSIS);
        if measure.width(&candidate) <= max_width {
            return candidate;
        }
    }
    ELLIPSIS.to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
