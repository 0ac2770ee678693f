//! French-locale display formatting and filename slugging.
//!
//! Pure string functions — formatting is applied once, at derivation time,
//! so every currency/area value lands in the template already localized.

/// Suggested filenames are capped so Content-Disposition stays sane.
const MAX_SLUG_LEN: usize = 50;

/// Format a number with fixed precision, decimal comma, and thousands
/// grouped by spaces: `1234.5` at precision 2 → `"1 234,50"`.
pub fn format_number(value: f64, precision: usize) -> String {
    let fixed = format!("{value:.precision$}");
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped},{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Reduce a display name to a filename-safe slug: accented Latin folded to
/// ASCII, lowercased, non-alphanumeric runs collapsed to single hyphens,
/// no leading/trailing hyphen, at most 50 bytes.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.to_lowercase().chars() {
        let folded = match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        };
        if folded.is_ascii_alphanumeric() {
            out.push(folded);
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    // Output is pure ASCII at this point, so byte truncation is safe.
    out.truncate(MAX_SLUG_LEN);
    while out.ends_with('-') {
        out.pop();
    }
    out
}
