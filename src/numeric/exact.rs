// ============================================================================
// Exact Summation
// Error-free transformations and distances between representable values
// ============================================================================

use super::precision::Precision;
use smallvec::SmallVec;

/// Error-free sum: returns `(s, e)` with `s = fl(a + b)` and `a + b = s + e`
/// exactly (Knuth's TwoSum). Valid while `s` does not overflow.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Exact sum of `values`, correctly rounded to binary64.
///
/// Maintains a non-overlapping expansion of partial sums (Shewchuk) and
/// rounds it once at the end with a half-even correction, so the result is
/// independent of the order of `values`.
///
/// Special values: any NaN, or infinities of both signs, give NaN; infinities
/// of one sign give that infinity. Finite inputs whose partial sums overflow
/// are summed again at a reduced scale, so an intermediate overflow only
/// yields an infinity when the exact sum itself rounds beyond `f64::MAX`.
pub fn exact_sum(values: &[f64]) -> f64 {
    let special = values
        .iter()
        .filter(|v| !v.is_finite())
        .fold(None, |acc: Option<f64>, &v| Some(acc.map_or(v, |s| s + v)));
    if let Some(s) = special {
        return s;
    }

    match accumulate(values.iter().copied()) {
        Ok(partials) => round_expansion(&partials),
        Err(_) => scaled_sum(values),
    }
}

type Partials = SmallVec<[f64; 8]>;

/// Grow an expansion over `values`. Fails with the offending value when an
/// input or a partial sum is not finite.
fn accumulate<I>(values: I) -> Result<Partials, f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut partials = Partials::new();

    for value in values {
        if !value.is_finite() {
            return Err(value);
        }

        let mut x = value;
        let mut kept = 0;
        for j in 0..partials.len() {
            let mut y = partials[j];
            if x.abs() < y.abs() {
                std::mem::swap(&mut x, &mut y);
            }
            let hi = x + y;
            if !hi.is_finite() {
                return Err(hi);
            }
            let lo = y - (hi - x);
            if lo != 0.0 {
                partials[kept] = lo;
                kept += 1;
            }
            x = hi;
        }
        partials.truncate(kept);
        partials.push(x);
    }

    Ok(partials)
}

/// Sum finite `values` whose running sums overflow binary64.
///
/// Large values are divided by `2^k` with `2^(k-1) > values.len()`, which
/// keeps every partial of their expansion below `f64::MAX / 2`. Division is
/// exact for values at least `2^k * f64::MIN_POSITIVE`; smaller values are
/// summed unscaled, where they cannot overflow. Both expansions are then
/// merged at full scale.
fn scaled_sum(values: &[f64]) -> f64 {
    let k = (usize::BITS - values.len().leading_zeros() + 1) as i32;
    let scale = 2f64.powi(k);
    let threshold = f64::MIN_POSITIVE * scale;

    let large = values
        .iter()
        .filter(|v| v.abs() >= threshold)
        .map(|v| v / scale);
    let small = values.iter().copied().filter(|v| v.abs() < threshold);

    let merged = accumulate(large).and_then(|large| {
        let small = accumulate(small)?;
        accumulate(large.iter().map(|p| p * scale).chain(small))
    });

    match merged {
        Ok(partials) => round_expansion(&partials),
        Err(overflow) => overflow,
    }
}

/// Round a non-overlapping expansion (ascending magnitude) to binary64.
fn round_expansion(partials: &[f64]) -> f64 {
    let Some(mut n) = partials.len().checked_sub(1) else {
        return 0.0;
    };

    let mut hi = partials[n];
    let mut lo = 0.0;
    while n > 0 {
        let x = hi;
        n -= 1;
        let y = partials[n];
        hi = x + y;
        let yr = hi - x;
        lo = y - yr;
        if lo != 0.0 {
            break;
        }
    }

    // Half-way case: the remaining partials decide the rounding direction
    if n > 0 && ((lo < 0.0 && partials[n - 1] < 0.0) || (lo > 0.0 && partials[n - 1] > 0.0)) {
        let y = lo * 2.0;
        let x = hi + y;
        let yr = x - hi;
        if y == yr {
            hi = x;
        }
    }

    hi
}

/// Number of representable values of `precision` between `a` and `b`.
///
/// Both values are first rounded to `precision`. `+0.0` and `-0.0` are at
/// distance zero; infinities sit one step beyond the largest finite value.
/// Returns `None` if either value is NaN.
pub fn ulp_distance(a: f64, b: f64, precision: Precision) -> Option<u64> {
    if a.is_nan() || b.is_nan() {
        return None;
    }

    let (oa, ob) = match precision {
        Precision::Float32 => (
            i128::from(ordered_bits_f32(a as f32)),
            i128::from(ordered_bits_f32(b as f32)),
        ),
        Precision::Float64 => (i128::from(ordered_bits_f64(a)), i128::from(ordered_bits_f64(b))),
    };

    Some((oa - ob).unsigned_abs() as u64)
}

/// Map the bit pattern onto a signed integer line that preserves ordering.
#[inline]
fn ordered_bits_f64(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN.wrapping_sub(bits)
    } else {
        bits
    }
}

#[inline]
fn ordered_bits_f32(x: f32) -> i32 {
    let bits = x.to_bits() as i32;
    if bits < 0 {
        i32::MIN.wrapping_sub(bits)
    } else {
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sum_recovers_lost_term() {
        let (s, e) = two_sum(1e16, 1.0);
        assert_eq!(s, 1e16);
        assert_eq!(e, 1.0);

        let (s, e) = two_sum(0.5, 0.25);
        assert_eq!(s, 0.75);
        assert_eq!(e, 0.0);
    }

    #[test]
    fn test_exact_sum_cancellation() {
        assert_eq!(exact_sum(&[1e16, 1.0, -1e16]), 1.0);
        assert_eq!(exact_sum(&[1e20, 1.0, -1e20]), 1.0);
        assert_eq!(exact_sum(&[1e30, 1e-5, -1e30]), 1e-5);
    }

    #[test]
    fn test_exact_sum_is_correctly_rounded() {
        // Naive left-to-right gives 0.6000000000000001
        assert_eq!(exact_sum(&[0.1, 0.2, 0.3]), 0.6);
        assert_eq!(exact_sum(&[0.3, 0.2, 0.1]), 0.6);
    }

    #[test]
    fn test_exact_sum_half_even_correction() {
        // 1 + 2^-53 + 2^-106 lies just above the half-way point
        let tiny = 2f64.powi(-106);
        let half_ulp = 2f64.powi(-53);
        assert_eq!(exact_sum(&[1.0, half_ulp, tiny]), 1.0 + f64::EPSILON);
        // Exactly half-way rounds to even
        assert_eq!(exact_sum(&[1.0, half_ulp]), 1.0);
    }

    #[test]
    fn test_exact_sum_empty_and_zero() {
        assert_eq!(exact_sum(&[]), 0.0);
        assert_eq!(exact_sum(&[0.0, 0.0]), 0.0);
        assert_eq!(exact_sum(&[2.5]), 2.5);
    }

    #[test]
    fn test_exact_sum_specials() {
        assert!(exact_sum(&[f64::NAN, 1.0]).is_nan());
        assert!(exact_sum(&[f64::INFINITY, f64::NEG_INFINITY]).is_nan());
        assert_eq!(exact_sum(&[f64::INFINITY, 1.0, -1.0]), f64::INFINITY);
        assert_eq!(exact_sum(&[f64::MAX, f64::MAX]), f64::INFINITY);
        assert_eq!(exact_sum(&[-f64::MAX, -f64::MAX]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_exact_sum_recovers_from_intermediate_overflow() {
        let m = f64::MAX;
        assert_eq!(exact_sum(&[m, m, -m]), m);
        assert_eq!(exact_sum(&[m, -m, m]), m);
        assert_eq!(exact_sum(&[-m, m, m]), m);
        assert_eq!(exact_sum(&[m, m, -m, -m, 1.0]), 1.0);
        assert_eq!(exact_sum(&[m, m, 5e-324, -m, -m]), 5e-324);
        assert_eq!(exact_sum(&[m, m, m, -m, -m, 0.5]), m);
    }

    #[test]
    fn test_exact_sum_infinity_beats_finite_overflow() {
        let m = f64::MAX;
        assert_eq!(exact_sum(&[m, m, f64::NEG_INFINITY]), f64::NEG_INFINITY);
        assert_eq!(exact_sum(&[f64::NEG_INFINITY, m, m]), f64::NEG_INFINITY);
        assert!(exact_sum(&[m, m, f64::NEG_INFINITY, f64::INFINITY]).is_nan());
    }

    #[test]
    fn test_ulp_distance() {
        assert_eq!(ulp_distance(1.0, 1.0, Precision::Float64), Some(0));
        assert_eq!(
            ulp_distance(1.0, 1.0 + f64::EPSILON, Precision::Float64),
            Some(1)
        );
        assert_eq!(ulp_distance(0.0, -0.0, Precision::Float64), Some(0));
        assert_eq!(ulp_distance(0.0, 1.0, Precision::Float32), Some(0x3f80_0000));
        assert_eq!(
            ulp_distance(-f64::from(f32::MIN_POSITIVE), f64::from(f32::MIN_POSITIVE), Precision::Float32),
            Some(2 * 0x0080_0000)
        );
        assert_eq!(ulp_distance(f64::NAN, 1.0, Precision::Float64), None);
    }

    #[test]
    fn test_ulp_distance_between_precisions() {
        // 0.6 and 0.6000000000000001 are neighbours in binary64
        assert_eq!(ulp_distance(0.6, 0.1 + 0.2 + 0.3, Precision::Float64), Some(1));
        // Both collapse to the same binary32 value
        assert_eq!(ulp_distance(0.6, 0.1 + 0.2 + 0.3, Precision::Float32), Some(0));
    }
}
