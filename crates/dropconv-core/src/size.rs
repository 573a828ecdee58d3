//! Human-readable byte counts.

const BINARY_UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
const SI_UNITS: [&str; 8] = ["kB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Format a byte count for display, e.g. `1536` -> `"1.5 KiB"`.
///
/// Binary mode divides by 1024 and uses `KiB`, `MiB`, ... suffixes.
/// SI mode (`si = true`) divides by 1000 and uses `kB`, `MB`, ...
/// Counts below one unit are printed as whole bytes (`"500 B"`).
/// Anything past the largest unit stays in `YiB`/`YB`.
#[must_use]
#[allow(clippy::cast_precision_loss)] // display only; one decimal place
pub fn human_file_size(bytes: u64, si: bool) -> String {
    let (threshold, units) = if si {
        (1000.0, &SI_UNITS)
    } else {
        (1024.0, &BINARY_UNITS)
    };

    let mut value = bytes as f64;
    if value < threshold {
        return format!("{bytes} B");
    }

    let mut unit = 0;
    value /= threshold;
    while value >= threshold && unit < units.len() - 1 {
        value /= threshold;
        unit += 1;
    }

    format!("{} {}", one_decimal(value), units[unit])
}

/// One decimal place, rounding exact halves up (`1.25` -> `"1.3"`).
///
/// `{:.1}` rounds ties to even, which would print `1280` bytes as
/// `1.2 KiB`. The fractional part of a double has at most 52 binary
/// digits, so 52 decimal places print it exactly and the hundredths
/// digit decides the rounding.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // value is in 1.0..1024.0 or saturated
fn one_decimal(value: f64) -> String {
    let fraction = format!("{:.52}", value.fract());
    let digit = |i: usize| fraction.as_bytes().get(i).map_or(0, |d| u64::from(d - b'0'));

    let mut tenths = value.trunc() as u64 * 10 + digit(2);
    if digit(3) >= 5 {
        tenths += 1;
    }
    format!("{}.{}", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_prints_bytes() {
        assert_eq!(human_file_size(0, false), "0 B");
        assert_eq!(human_file_size(500, false), "500 B");
        assert_eq!(human_file_size(1023, false), "1023 B");
        assert_eq!(human_file_size(999, true), "999 B");
    }

    #[test]
    fn binary_units() {
        assert_eq!(human_file_size(1024, false), "1.0 KiB");
        assert_eq!(human_file_size(1536, false), "1.5 KiB");
        assert_eq!(human_file_size(20 * 1024 * 1024, false), "20.0 MiB");
        assert_eq!(human_file_size(3 * 1024 * 1024 * 1024, false), "3.0 GiB");
    }

    #[test]
    fn si_divides_by_thousand() {
        assert_eq!(human_file_size(1000, true), "1.0 kB");
        assert_eq!(human_file_size(1024, true), "1.0 kB");
        assert_eq!(human_file_size(1_500_000, true), "1.5 MB");
        // 1000 bytes is still below the binary threshold.
        assert_eq!(human_file_size(1000, false), "1000 B");
    }

    #[test]
    fn exact_halves_round_up() {
        assert_eq!(human_file_size(1280, false), "1.3 KiB");
        assert_eq!(human_file_size(5376, false), "5.3 KiB");
        assert_eq!(human_file_size(1_310_720, false), "1.3 MiB");
        assert_eq!(human_file_size(1250, true), "1.3 kB");
        // 1.15 is stored just below the half, so it rounds down.
        assert_eq!(human_file_size(1150, true), "1.1 kB");
        // Carries into the next whole number.
        assert_eq!(human_file_size(1023 * 1024 + 1000, false), "1024.0 KiB");
    }

    #[test]
    fn saturates_at_largest_unit() {
        // u64::MAX is ~16 EiB, so it never reaches the last unit; make
        // sure the loop bound holds for the largest representable value.
        assert_eq!(human_file_size(u64::MAX, false), "16.0 EiB");
        assert_eq!(human_file_size(u64::MAX, true), "18.4 EB");
    }
}
