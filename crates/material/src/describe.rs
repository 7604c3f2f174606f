//! Text rendering shared by the material data containers.

use std::fmt::Write;

use ndarray::ArrayView1;

/// Marker rendered in place of entries when every value is zero.
pub(crate) const EMPTY: &str = " data: (empty)";

/// Column header used above chemical identifiers in multi-phase data.
pub(crate) const CHEMICAL_HEADER: &str = "chemical";

/// Returns the display name of a phase tag, if it has one.
///
/// ```
/// use ether_material::phase_name;
///
/// assert_eq!(phase_name('g'), Some("vapor"));
/// assert_eq!(phase_name('x'), None);
/// ```
#[must_use]
pub fn phase_name(phase: char) -> Option<&'static str> {
    match phase {
        's' => Some("solid"),
        'l' => Some("liquid"),
        'L' => Some("LIQUID"),
        'g' => Some("vapor"),
        _ => None,
    }
}

/// Returns the identifiers and values of the nonzero entries, in order.
pub fn nonzeros<'a, I>(ids: I, values: ArrayView1<'_, f64>) -> (Vec<&'a str>, Vec<f64>)
where
    I: IntoIterator<Item = &'a str>,
{
    ids.into_iter()
        .zip(values.iter().copied())
        .filter(|&(_, value)| value != 0.0)
        .unzip()
}

/// Formats a value with the given number of significant digits.
///
/// Uses fixed notation when the decimal exponent lies in `-4..digits` and
/// scientific notation otherwise, dropping trailing zeros in both cases.
///
/// ```
/// use ether_material::format_significant;
///
/// assert_eq!(format_significant(5.0, 3), "5");
/// assert_eq!(format_significant(12.345, 3), "12.3");
/// assert_eq!(format_significant(1234.5, 3), "1.23e+03");
/// assert_eq!(format_significant(0.000_012, 3), "1.2e-05");
/// ```
#[must_use]
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.into();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    let max_exponent = i32::try_from(digits).unwrap_or(i32::MAX);
    if (-4..max_exponent).contains(&exponent) {
        let decimals = usize::try_from(max_exponent - 1 - exponent).unwrap_or(0);
        let fixed = format!("{value:.decimals$}");
        trim_zeros(&fixed).to_owned()
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exponent.unsigned_abs())
    }
}

fn trim_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Appends `identifier value` lines, padding identifiers to `width`.
///
/// With more than `n` entries, the first `n - 1` are written, then an
/// ellipsis line, then the last entry.
/// Every line after the first starts with `indent`.
pub(crate) fn push_entries(
    out: &mut String,
    ids: &[&str],
    values: &[f64],
    width: usize,
    n: usize,
    indent: &str,
) {
    let Some((last_id, ids)) = ids.split_last() else {
        return;
    };
    let Some((last_value, _)) = values.split_last() else {
        return;
    };

    let truncate_at = n.checked_sub(1);
    for (i, (id, value)) in ids.iter().zip(values).enumerate() {
        if Some(i) == truncate_at {
            out.push_str("...\n");
            out.push_str(indent);
            break;
        }
        push_entry(out, id, *value, width);
        out.push('\n');
        out.push_str(indent);
    }
    push_entry(out, last_id, *last_value, width);
}

fn push_entry(out: &mut String, id: &str, value: f64, width: usize) {
    // Writing to a `String` cannot fail.
    let _ = write!(out, "{id:<width$} {}", format_significant(value, 3));
}

/// Returns the display width of the longest identifier.
pub(crate) fn max_width<'a>(ids: impl IntoIterator<Item = &'a str>) -> usize {
    ids.into_iter()
        .map(|id| id.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn three_significant_digits() {
        let cases = [
            (5.0, "5"),
            (-2.5, "-2.5"),
            (1.0, "1"),
            (100.0, "100"),
            (999.4, "999"),
            (999.6, "1e+03"),
            (0.1, "0.1"),
            (0.333_333, "0.333"),
            (0.000_123_4, "0.000123"),
            (0.000_012_34, "1.23e-05"),
            (123_456.0, "1.23e+05"),
            (1.0e20, "1e+20"),
            (-4.5e-7, "-4.5e-07"),
            (12.05, "12.1"),
            (f64::NAN, "nan"),
            (f64::NEG_INFINITY, "-inf"),
        ];

        for (value, expected) in cases {
            assert_eq!(format_significant(value, 3), expected, "value {value}");
        }
    }

    #[test]
    fn other_precisions() {
        assert_eq!(format_significant(3.14159, 1), "3");
        assert_eq!(format_significant(3.14159, 0), "3");
        assert_eq!(format_significant(3.14159, 5), "3.1416");
        assert_eq!(format_significant(12_345.0, 5), "12345");
    }

    #[test]
    fn nonzeros_keep_order() {
        let (ids, values) = nonzeros(["A", "B", "C", "D"], array![0.0, 2.0, 0.0, -1.0].view());

        assert_eq!(ids, vec!["B", "D"]);
        assert_eq!(values, vec![2.0, -1.0]);
    }

    #[test]
    fn entries_are_truncated_with_the_last_kept() {
        let ids = ["A", "B", "C", "D", "E", "F"];
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

        let mut out = String::new();
        push_entries(&mut out, &ids, &values, 2, 3, "  ");
        assert_eq!(out, "A  1\n  B  2\n  ...\n  F  6");

        let mut out = String::new();
        push_entries(&mut out, &ids, &values, 2, 6, "");
        assert_eq!(out.lines().count(), 6);
        assert!(!out.contains("..."));
    }

    #[test]
    fn zero_limit_shows_everything() {
        let ids = ["A", "B", "C"];
        let values = [1.0, 2.0, 3.0];

        let mut out = String::new();
        push_entries(&mut out, &ids, &values, 1, 0, "");
        assert_eq!(out, "A 1\nB 2\nC 3");
    }
}
