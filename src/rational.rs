use std::fmt;
use std::ops::{Add, Mul};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::error::{RecoveryError, Result};

/// An exact fraction of two big integers.
///
/// The value is always kept in lowest terms and the denominator is always
/// strictly positive, so two equal fractions have identical representations
/// and the derived `PartialEq` is value equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Builds `numer / denom` in lowest terms.
    ///
    /// Fails with [`RecoveryError::DivisionByZero`] when `denom` is zero.
    pub fn new(numer: BigInt, denom: BigInt) -> Result<Self> {
        if denom.is_zero() {
            return Err(RecoveryError::DivisionByZero);
        }
        if denom.is_negative() {
            Ok(Self::reduce(-numer, -denom))
        } else {
            Ok(Self::reduce(numer, denom))
        }
    }

    pub fn from_integer(value: BigInt) -> Self {
        Rational {
            numer: value,
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(BigInt::zero())
    }

    pub fn one() -> Self {
        Self::from_integer(BigInt::one())
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    /// `a/b + c/d = (ad + cb) / bd`, reduced.
    pub fn add(&self, other: &Rational) -> Self {
        let numer = &self.numer * &other.denom + &other.numer * &self.denom;
        Self::reduce(numer, &self.denom * &other.denom)
    }

    pub fn mul(&self, other: &Rational) -> Self {
        Self::reduce(&self.numer * &other.numer, &self.denom * &other.denom)
    }

    /// Multiplies by an integer without a full reduction pass.
    ///
    /// The numerator is already coprime to the denominator, so cancelling
    /// `gcd(value, denom)` up front leaves the product in lowest terms.
    pub fn mul_integer(&self, value: &BigInt) -> Self {
        let g = value.gcd(&self.denom);
        Rational {
            numer: &self.numer * (value / &g),
            denom: &self.denom / &g,
        }
    }

    /// Fails with [`RecoveryError::DivisionByZero`] when `other` is zero.
    pub fn div(&self, other: &Rational) -> Result<Self> {
        if other.numer.is_zero() {
            return Err(RecoveryError::DivisionByZero);
        }
        let reciprocal = Self::new(other.denom.clone(), other.numer.clone())?;
        Ok(self.mul(&reciprocal))
    }

    /// Returns the integer value, or [`RecoveryError::NonIntegralResult`]
    /// if the fraction does not reduce to a whole number.
    pub fn into_integer(self) -> Result<BigInt> {
        if self.is_integer() {
            Ok(self.numer)
        } else {
            Err(RecoveryError::NonIntegralResult(self.to_string()))
        }
    }

    // denom must be strictly positive
    fn reduce(numer: BigInt, denom: BigInt) -> Self {
        // gcd(0, d) = d, so zero always ends up as 0/1
        let g = numer.gcd(&denom);
        if g.is_one() {
            return Rational { numer, denom };
        }
        Rational {
            numer: numer / &g,
            denom: denom / g,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

impl From<BigInt> for Rational {
    fn from(value: BigInt) -> Self {
        Self::from_integer(value)
    }
}

impl<'a> Add<&'a Rational> for &'a Rational {
    type Output = Rational;

    fn add(self, rhs: &'a Rational) -> Rational {
        Rational::add(self, rhs)
    }
}

impl<'a> Mul<&'a Rational> for &'a Rational {
    type Output = Rational;

    fn mul(self, rhs: &'a Rational) -> Rational {
        Rational::mul(self, rhs)
    }
}
