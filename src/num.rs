use alloy::primitives::{I256, U256};
use fastnum::{
    bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

/// Fixed-point to decimal converter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Converter {
    decimals: u8,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self { decimals }
    }

    /// Scale factor `10^decimals` in raw units, saturates at `U256::MAX`.
    pub fn scale(&self) -> U256 {
        U256::from(10u64).saturating_pow(U256::from(self.decimals))
    }

    /// Converts raw unsigned units into a human-readable decimal,
    /// `None` if the value does not fit into `N` limbs.
    pub fn from_unsigned<const N: usize>(&self, value: U256) -> Option<UnsignedDecimal<N>> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())?;
        Some(UnsignedDecimal::<N>::from_parts(
            unscaled,
            -(self.decimals as i32),
            Context::default().with_rounding_mode(RoundingMode::Floor),
        ))
    }
}

/// Splits a signed raw amount into its sign and magnitude.
/// Returns `true` for negative values.
pub fn split_sign(value: I256) -> (bool, U256) {
    (value.is_negative(), value.unsigned_abs())
}

/// `a * b * c / d`, multiplying before dividing, with floor rounding.
/// `None` on overflow or division by zero.
pub fn mul_mul_div(a: U256, b: U256, c: U256, d: U256) -> Option<U256> {
    if d.is_zero() {
        return None;
    }
    a.checked_mul(b)?.checked_mul(c)?.checked_div(d)
}

#[cfg(test)]
mod tests {
    use fastnum::udec128;

    use super::*;

    #[test]
    fn test_numeric_converter_from_unsigned() {
        assert_eq!(
            Converter::new(0).from_unsigned::<2>(U256::from(1234567890)),
            Some(udec128!(1234567890))
        );
        assert_eq!(
            Converter::new(6).from_unsigned::<2>(U256::from(1234567890)),
            Some(udec128!(1234.56789))
        );
        assert_eq!(
            Converter::new(9).from_unsigned::<2>(U256::from(2_000_000_000u64)),
            Some(udec128!(2))
        );
        assert_eq!(
            Converter::new(12).from_unsigned::<2>(U256::from(1234567890)),
            Some(udec128!(0.00123456789))
        );
    }

    #[test]
    fn test_numeric_converter_overflow() {
        assert_eq!(Converter::new(6).from_unsigned::<2>(U256::MAX), None);
    }

    #[test]
    fn test_numeric_converter_scale() {
        assert_eq!(Converter::new(0).scale(), U256::from(1));
        assert_eq!(Converter::new(6).scale(), U256::from(1_000_000));
        assert_eq!(
            Converter::new(18).scale(),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert_eq!(Converter::new(200).scale(), U256::MAX);
    }

    #[test]
    fn test_split_sign() {
        assert_eq!(
            split_sign(I256::try_from(-42).unwrap()),
            (true, U256::from(42))
        );
        assert_eq!(
            split_sign(I256::try_from(42).unwrap()),
            (false, U256::from(42))
        );
        assert_eq!(split_sign(I256::ZERO), (false, U256::ZERO));
    }

    #[test]
    fn test_mul_mul_div_floors() {
        assert_eq!(
            mul_mul_div(U256::from(7), U256::from(3), U256::from(1), U256::from(2)),
            Some(U256::from(10))
        );
        // Dividing before the last multiplication would give zero
        assert_eq!(
            mul_mul_div(
                U256::from(1_500),
                U256::from(1_000_000_000u64),
                U256::from(1_000_000u64),
                U256::from(1_000_000_000_000_000_000u64)
            ),
            Some(U256::from(1))
        );
        assert_eq!(
            mul_mul_div(U256::from(1), U256::from(1), U256::from(1), U256::ZERO),
            None
        );
        assert_eq!(
            mul_mul_div(U256::MAX, U256::from(2), U256::from(1), U256::from(1)),
            None
        );
    }
}
