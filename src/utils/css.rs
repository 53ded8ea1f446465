//! CSS value helpers: inline declaration parsing, lengths and colors.

use regex::Regex;
use std::sync::LazyLock;

/// Number with an optional CSS length unit.
static LENGTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(px|em|rem|%|vh|vw|vmin|vmax|ch|ex|pt|cm|mm|in)?$")
        .expect("length pattern is valid")
});

/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`.
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

/// Functional notations and bare keywords (`red`, `transparent`, `currentColor`).
static NAMED_OR_FUNC_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?:rgba?|hsla?)\([^()]*\)|[a-zA-Z]+)$").expect("color pattern is valid")
});

// ============================================================================
// Declarations
// ============================================================================

/// Parse an inline `style` value into `(property, value)` pairs.
///
/// Property names are lower-cased and both sides trimmed. Segments without
/// a `:` or with an empty side are skipped.
pub fn parse_declarations(input: &str) -> impl Iterator<Item = (String, &str)> {
    input.split(';').filter_map(|decl| {
        let (key, value) = decl.split_once(':')?;
        let (key, value) = (key.trim(), value.trim());
        (!key.is_empty() && !value.is_empty()).then(|| (key.to_ascii_lowercase(), value))
    })
}

// ============================================================================
// Lengths
// ============================================================================

/// Normalize a CSS length, appending `default_unit` to bare numbers.
///
/// Returns `None` for anything that is not a non-negative length or `auto`.
pub fn normalize_length(value: &str, default_unit: &str) -> Option<String> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
        return Some("auto".into());
    }

    let caps = LENGTH.captures(value)?;
    match caps.get(1) {
        Some(_) => Some(value.to_string()),
        None => Some(format!("{value}{default_unit}")),
    }
}

// ============================================================================
// Colors
// ============================================================================

/// Check if a value is a hex color.
#[inline]
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Check if a value looks like a CSS color rather than an image reference.
pub fn is_color(value: &str) -> bool {
    let value = value.trim();
    is_hex_color(value) || NAMED_OR_FUNC_COLOR.is_match(value)
}

/// Relative luminance (0.0 dark .. 1.0 light) of a hex color.
///
/// Alpha is ignored. Returns `None` for anything that is not a hex color.
pub fn hex_luminance(value: &str) -> Option<f32> {
    let value = value.trim();
    if !is_hex_color(value) {
        return None;
    }

    let digits = &value[1..];
    let (r, g, b) = match digits.len() {
        3 | 4 => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map(|v| v * 17);
            (channel(0).ok()?, channel(1).ok()?, channel(2).ok()?)
        }
        _ => {
            let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
            (channel(0).ok()?, channel(2).ok()?, channel(4).ok()?)
        }
    };

    let linear = |c: u8| {
        let c = f32::from(c) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    Some(0.2126 * linear(r) + 0.7152 * linear(g) + 0.0722 * linear(b))
}

// ============================================================================
// Tests
// ============================================================================
