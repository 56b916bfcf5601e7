//! Overflow-safe aggregate arithmetic.
//!
//! `Decimal` operators panic when a result leaves the representable range.
//! Store values are untrusted, so every sum and ratio the engines report goes
//! through these helpers, which saturate and log instead.

use rust_decimal::Decimal;

/// Sums `values`, pinning the total to `Decimal::MAX`/`MIN` on overflow.
pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    let mut saturated = false;
    let total = values.into_iter().fold(Decimal::ZERO, |total, value| {
        total.checked_add(value).unwrap_or_else(|| {
            saturated = true;
            total.saturating_add(value)
        })
    });
    if saturated {
        tracing::warn!(%total, "Decimal sum overflowed and was saturated.");
    }
    total
}

/// `100 × part / whole`, zero when `whole` is zero and saturated on overflow.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or_else(|| {
            tracing::warn!(%part, %whole, "Percentage overflowed and was saturated.");
            if part.is_sign_negative() == whole.is_sign_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_sum_matches_plain_addition_in_range() {
        assert_eq!(saturating_sum([dec!(1.5), dec!(-0.5), dec!(10)]), dec!(11));
        assert_eq!(saturating_sum(Vec::new()), Decimal::ZERO);
    }

    #[test]
    fn test_sum_saturates_at_the_bounds() {
        assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
        assert_eq!(saturating_sum([Decimal::MIN, dec!(-1)]), Decimal::MIN);
        // Later values still move a saturated total back into range.
        assert_eq!(
            saturating_sum([Decimal::MAX, Decimal::ONE, -Decimal::MAX]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(dec!(25), dec!(200)), dec!(12.5));
        assert_eq!(percentage(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage(Decimal::MAX, dec!(0.001)), Decimal::MAX);
        assert_eq!(percentage(Decimal::MIN, dec!(0.001)), Decimal::MIN);
    }
}
