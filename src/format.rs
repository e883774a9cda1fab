//! Number formatting for dashboard output
//!
//! Rounding follows JavaScript's `Number.prototype.toFixed`: exact halves
//! round away from zero, so `0.125` at two decimals is `"0.13"`.

/// Scale to B/M/K at 1e9/1e6/1e3 and print with `decimals` places
pub fn format_number(num: f64, decimals: usize) -> String {
    if num >= 1e9 {
        format!("{}B", to_fixed(num / 1e9, decimals))
    } else if num >= 1e6 {
        format!("{}M", to_fixed(num / 1e6, decimals))
    } else if num >= 1e3 {
        format!("{}K", to_fixed(num / 1e3, decimals))
    } else {
        to_fixed(num, decimals)
    }
}

pub fn format_percentage(num: f64, decimals: usize) -> String {
    format!("{}%", to_fixed(num, decimals))
}

/// Fixed-point text with ties rounded away from zero
pub fn to_fixed(num: f64, decimals: usize) -> String {
    if num.is_nan() {
        return "NaN".to_string();
    }
    if num.is_infinite() {
        return if num > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if num.abs() >= 1e21 {
        return exponent_form(num);
    }

    let magnitude = num.abs();
    let nudged = if is_exact_tie(magnitude, decimals) {
        // Smallest step up moves the tie onto the far side
        f64::from_bits(magnitude.to_bits() + 1)
    } else {
        magnitude
    };

    let text = format!("{:.*}", decimals, nudged);
    // Negative values keep their sign even when they round to zero; -0.0 does not
    if num < 0.0 {
        format!("-{}", text)
    } else {
        text
    }
}

/// Shortest round-trip digits with a signed exponent (`1e+21`, `-2.5e+30`)
fn exponent_form(num: f64) -> String {
    let text = format!("{:e}", num);
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => text,
    }
}

/// True when the exact binary value ends in a single 5 right after `decimals`
fn is_exact_tie(magnitude: f64, decimals: usize) -> bool {
    let expanded = format!("{:.*}", decimals + 30, magnitude);
    let Some(dot) = expanded.find('.') else {
        return false;
    };
    let tail = &expanded[dot + 1 + decimals..];
    let mut chars = tail.chars();
    chars.next() == Some('5') && chars.all(|c| c == '0')
}
