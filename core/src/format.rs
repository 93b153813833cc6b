//! Rounding and display conventions shared by every KPI card and read-out.
//!
//! Currency: "MX$ " + integer-rounded amount with comma thousands separators.
//! Percentages: one decimal place.

use crate::types::{Mxn, Pct, Pp};

pub const CURRENCY_PREFIX: &str = "MX$ ";

/// Round to one decimal place on the exact decimal expansion of `x`,
/// halves away from zero. Matches JavaScript `toFixed(1)`: 1.45 is stored
/// as 1.4499… and rounds to 1.4, while an exact 0.25 rounds to 0.3.
pub fn round1(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    // 60 fractional digits cover every bit of any |x| >= 2^-7; smaller
    // magnitudes round to 0.0 regardless.
    let expanded = format!("{:.60}", x.abs());
    let Some((int_part, frac)) = expanded.split_once('.') else {
        return x;
    };
    let mut digits = frac.bytes().map(|b| b - b'0');
    let tenths = digits.next().unwrap_or(0);
    let round_up = digits.next().unwrap_or(0) >= 5;

    let Ok(whole) = format!("{int_part}{tenths}").parse::<f64>() else {
        return x;
    };
    let magnitude = (whole + if round_up { 1.0 } else { 0.0 }) / 10.0;
    magnitude.copysign(x)
}

/// `num / den * 100`, or 0 when the denominator is not positive.
pub fn safe_pct(num: f64, den: f64) -> Pct {
    if den > 0.0 {
        num / den * 100.0
    } else {
        0.0
    }
}

/// Integer rounding with halves going toward +infinity (-2.5 -> -2, 2.5 -> 3).
pub fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

/// Group an unsigned integer with comma thousands separators.
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Signed integer with thousands separators.
pub fn format_signed_thousands(n: i64) -> String {
    let grouped = format_thousands(n.unsigned_abs());
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_mxn(amount: Mxn) -> String {
    format!("{CURRENCY_PREFIX}{}", format_signed_thousands(round_half_up(amount)))
}

pub fn format_pct(pct: Pct) -> String {
    format!("{:.1}%", round1(pct) + 0.0)
}

/// "+1.6 pp" for gains, "-0.4 pp" for losses. Zero renders as "+0.0 pp".
pub fn format_pp_signed(pp: Pp) -> String {
    // Adding 0.0 folds -0.0 into 0.0.
    let pp = round1(pp) + 0.0;
    let sign = if pp >= 0.0 { "+" } else { "" };
    format!("{sign}{pp:.1} pp")
}
