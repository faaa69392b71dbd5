use num_bigint::BigInt;
use tracing::{debug, trace};

use crate::error::{RecoveryError, Result};
use crate::rational::Rational;
use crate::share::Share;

/// Recovers the secret (the constant term of the polynomial) from the first
/// `k` of `shares`.
///
/// Which `k` shares are passed, and in which order, is up to the caller; any
/// `k` points on the same polynomial give the same result. Fails with
/// [`RecoveryError::InsufficientPoints`] before doing any arithmetic if fewer
/// than `k` shares are given, with [`RecoveryError::DivisionByZero`] if two
/// chosen shares have the same `x`, and with
/// [`RecoveryError::NonIntegralResult`] if the points do not lie on a
/// degree `k-1` integer polynomial.
pub fn reconstruct_secret(shares: &[Share], k: usize) -> Result<BigInt> {
    if k == 0 {
        return Err(RecoveryError::InvalidThreshold(k));
    }
    if shares.len() < k {
        return Err(RecoveryError::InsufficientPoints {
            needed: k,
            available: shares.len(),
        });
    }

    let chosen = &shares[..k];
    debug!(k, available = shares.len(), "interpolating at x = 0");

    let secret = interpolate_at_zero(chosen)?;
    trace!(%secret, "accumulated fraction");
    secret.into_integer()
}

/// Performs a Lagrange interpolation over the rationals at the origin for
/// the polynomial through all of `shares`.
/// The result is the value of the polynomial at x=0, i.e. its zero-degree
/// coefficient, as an exact fraction.
pub fn interpolate_at_zero(shares: &[Share]) -> Result<Rational> {
    let xs: Vec<BigInt> = shares.iter().map(|share| share.x.clone()).collect();

    shares
        .iter()
        .enumerate()
        .try_fold(Rational::zero(), |acc, (i, share)| -> Result<Rational> {
            let term = basis_at_zero(i, &xs)?.mul_integer(&share.y);
            Ok(acc.add(&term))
        })
}

/// Lagrange basis value `L_i(0) = Π_{j≠i} (0 - x_j) / (x_i - x_j)`.
///
/// # Panics
///
/// Panics if `i` is out of bounds for `xs`.
pub fn basis_at_zero(i: usize, xs: &[BigInt]) -> Result<Rational> {
    let xi = &xs[i];

    let (numer, denom) = xs
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != i)
        .fold((Rational::one(), Rational::one()), |(numer, denom), (_, xj)| {
            (numer.mul_integer(&-xj), denom.mul_integer(&(xi - xj)))
        });

    numer.div(&denom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(points: &[(i64, i64)]) -> Vec<Share> {
        points.iter().copied().map(Share::from).collect()
    }

    fn ratio(n: i64, d: i64) -> Rational {
        Rational::new(BigInt::from(n), BigInt::from(d)).unwrap()
    }

    // Horner evaluation, coefficients lowest degree first.
    fn evaluate(coefficients: &[BigInt], x: &BigInt) -> BigInt {
        coefficients
            .iter()
            .rev()
            .fold(BigInt::from(0), |acc, c| acc * x + c)
    }

    #[test]
    fn line_through_three_points() {
        let points = shares(&[(1, 3), (2, 5), (3, 7)]);
        assert_eq!(reconstruct_secret(&points, 3).unwrap(), BigInt::from(1));
    }

    #[test]
    fn quadratic_uses_first_k_points() {
        // y = x^2 + 3
        let points = shares(&[(1, 4), (2, 7), (3, 12), (4, 19)]);
        assert_eq!(reconstruct_secret(&points, 3).unwrap(), BigInt::from(3));
        assert_eq!(reconstruct_secret(&points[1..], 3).unwrap(), BigInt::from(3));
    }

    #[test]
    fn basis_values_at_zero() {
        let xs: Vec<BigInt> = [1, 2, 3].iter().map(|x| BigInt::from(*x)).collect();
        assert_eq!(basis_at_zero(0, &xs).unwrap(), ratio(3, 1));
        assert_eq!(basis_at_zero(1, &xs).unwrap(), ratio(-3, 1));
        assert_eq!(basis_at_zero(2, &xs).unwrap(), ratio(1, 1));

        let xs: Vec<BigInt> = [1, 2, 4].iter().map(|x| BigInt::from(*x)).collect();
        assert_eq!(basis_at_zero(0, &xs).unwrap(), ratio(8, 3));
        assert_eq!(basis_at_zero(2, &xs).unwrap(), ratio(1, 3));
    }

    #[test]
    fn basis_values_sum_to_one() {
        let xs: Vec<BigInt> = [2, 5, 7, 11, 13].iter().map(|x| BigInt::from(*x)).collect();
        let sum = (0..xs.len())
            .map(|i| basis_at_zero(i, &xs).unwrap())
            .fold(Rational::zero(), |acc, l| acc.add(&l));
        assert_eq!(sum, Rational::one());
    }

    #[test]
    fn single_point_is_the_secret() {
        let points = shares(&[(9, -42)]);
        assert_eq!(reconstruct_secret(&points, 1).unwrap(), BigInt::from(-42));
    }

    #[test]
    fn negative_and_unordered_x() {
        // y = 3x^2 - 5x + 11
        let points = shares(&[(4, 39), (-2, 33), (7, 123)]);
        assert_eq!(reconstruct_secret(&points, 3).unwrap(), BigInt::from(11));
    }

    #[test]
    fn duplicate_x_is_division_by_zero() {
        let points = shares(&[(1, 3), (1, 3), (2, 5)]);
        let err = reconstruct_secret(&points, 3).unwrap_err();
        assert!(matches!(err, RecoveryError::DivisionByZero));
    }

    #[test]
    fn too_few_points() {
        let points = shares(&[(1, 3), (2, 5)]);
        match reconstruct_secret(&points, 3) {
            Err(RecoveryError::InsufficientPoints { needed, available }) => {
                assert_eq!((needed, available), (3, 2));
            }
            other => panic!("expected InsufficientPoints, got {:?}", other),
        }
    }

    #[test]
    fn zero_threshold_is_rejected() {
        let err = reconstruct_secret(&shares(&[(1, 3)]), 0).unwrap_err();
        assert!(matches!(err, RecoveryError::InvalidThreshold(0)));
    }

    #[test]
    fn perturbed_point_changes_secret() {
        assert_eq!(
            reconstruct_secret(&shares(&[(1, 3), (2, 5)]), 2).unwrap(),
            BigInt::from(1)
        );
        assert_eq!(
            reconstruct_secret(&shares(&[(1, 3), (2, 6)]), 2).unwrap(),
            BigInt::from(0)
        );
    }

    #[test]
    fn inconsistent_points_are_non_integral() {
        match reconstruct_secret(&shares(&[(1, 3), (2, 5), (4, 8)]), 3) {
            Err(RecoveryError::NonIntegralResult(text)) => assert_eq!(text, "2/3"),
            other => panic!("expected NonIntegralResult, got {:?}", other),
        }
        assert!(matches!(
            reconstruct_secret(&shares(&[(1, 0), (3, 1)]), 2),
            Err(RecoveryError::NonIntegralResult(_))
        ));
    }

    #[test]
    fn interpolate_keeps_the_exact_fraction() {
        let value = interpolate_at_zero(&shares(&[(1, 0), (3, 1)])).unwrap();
        assert_eq!(value, ratio(-1, 2));
    }

    #[test]
    fn hundreds_of_digits_stay_exact() {
        let secret = BigInt::parse_bytes(
            b"31415926535897932384626433832795028841971693993751058209749445923078164062862089986280348253421170679\
              82148086513282306647093844609550582231725359408128481117450284102701938521105559644622948954930381964",
            10,
        )
        .unwrap();
        let coefficients = vec![
            secret.clone(),
            -BigInt::from(10).pow(250) + 7,
            BigInt::from(3).pow(400),
            -BigInt::from(2).pow(777),
            BigInt::from(123456789),
        ];

        let points: Vec<Share> = [3i64, 17, 5, 1000, 42, 9]
            .iter()
            .map(|x| {
                let x = BigInt::from(*x);
                let y = evaluate(&coefficients, &x);
                Share::new(x, y)
            })
            .collect();

        assert_eq!(reconstruct_secret(&points, 5).unwrap(), secret);
        assert_eq!(reconstruct_secret(&points[1..], 5).unwrap(), secret);
    }
}
