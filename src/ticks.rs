#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

// Upper bound on ticks per axis; the interval heuristic yields at most ~25.
const MAX_TICKS: usize = 256;
const LABEL_SIG_DIGITS: i32 = 3;

/// Gridline spacing for `[lo, hi]`: the largest power of ten below the span,
/// halved when the span would hold six or fewer. The Y axis may halve a
/// second time when five or fewer remain.
pub fn tick_interval(lo: f64, hi: f64, axis: Axis) -> Option<f64> {
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    let mut raw = 10f64.powf(span.log10().floor());
    if span / raw <= 6.0 {
        raw /= 2.0;
    }
    if axis == Axis::Y && span / raw <= 5.0 {
        raw /= 2.0;
    }
    Some(raw)
}

/// Tick values from `floor(lo / raw) * raw` up to, but excluding, `hi`.
/// A zero-width range gets a single tick at `lo`; non-finite bounds get none.
pub fn axis_ticks(lo: f64, hi: f64, axis: Axis) -> Vec<f64> {
    if !lo.is_finite() || !hi.is_finite() {
        return Vec::new();
    }
    let Some(raw) = tick_interval(lo, hi, axis) else {
        return vec![lo];
    };
    let start = (lo / raw).floor() * raw;
    (0..MAX_TICKS)
        .map(|k| start + k as f64 * raw)
        .take_while(|step| *step < hi)
        .collect()
}

/// Shortest rendering of `value` at three significant digits, using
/// `1.5E+03`-style notation for very large or very small magnitudes.
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // Let the float formatter do the rounding, then read back the exponent.
    let sci = format!("{:.*e}", (LABEL_SIG_DIGITS - 1) as usize, value);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if exp < -4 || exp >= LABEL_SIG_DIGITS {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}E{}{:02}", trim_fraction(mantissa), sign, exp.abs())
    } else {
        let decimals = (LABEL_SIG_DIGITS - 1 - exp).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::{format_tick, trim_fraction};

    #[test]
    fn labels_use_three_significant_digits() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(20.0), "20");
        assert_eq!(format_tick(22.5), "22.5");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(0.125), "0.125");
        assert_eq!(format_tick(-2.5), "-2.5");
        assert_eq!(format_tick(123.456), "123");
    }

    #[test]
    fn labels_switch_to_exponent_form() {
        assert_eq!(format_tick(1000.0), "1E+03");
        assert_eq!(format_tick(1_700_000_000_000.0), "1.7E+12");
        assert_eq!(format_tick(999.6), "1E+03");
        assert_eq!(format_tick(0.00002), "2E-05");
    }

    #[test]
    fn trim_leaves_integers_alone() {
        assert_eq!(trim_fraction("100"), "100");
        assert_eq!(trim_fraction("1.50"), "1.5");
        assert_eq!(trim_fraction("2.00"), "2");
    }
}
