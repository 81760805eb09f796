//! Elements of the quadratic extension field F_{p^2} = F_p(i), i^2 = -1.
//!
//! Adjoining i is valid because p = 3 mod 4, which makes -1 a nonsquare
//! in F_p. Elements are pairs (a, b) representing a + b*i, with each
//! coordinate independently in Montgomery form.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{ConstOne, ConstZero, One, Zero};
use rand::distributions::{Distribution, Standard};
use rand::Rng;

use crate::constants::FP751_NUM_WORDS;
use crate::error::Result;
use crate::fp751::{
    fp751_montgomery_reduce, fp751_mul, fp751_sub_reduced, fp751_x2_add_lazy,
    fp751_x2_sub_lazy, Fp751Element, Fp751X2,
};
use crate::prime_field::PrimeFieldElement;

/// An element a + b*i of F_{p^2}, with coordinates in Montgomery form.
///
/// The constant-time discipline is the same as for [`PrimeFieldElement`]:
/// everything except `PartialEq` / [`vartime_eq`] is safe on secret data.
///
/// [`vartime_eq`]: Self::vartime_eq
#[derive(Clone, Copy, Debug)]
pub struct ExtensionFieldElement {
    pub a: PrimeFieldElement,
    pub b: PrimeFieldElement,
}

impl ExtensionFieldElement {
    /// The additive identity 0 + 0*i.
    pub const ZERO: Self = Self {
        a: PrimeFieldElement::ZERO,
        b: PrimeFieldElement::ZERO,
    };

    /// The multiplicative identity 1 + 0*i.
    pub const ONE: Self = Self {
        a: PrimeFieldElement::ONE,
        b: PrimeFieldElement::ZERO,
    };

    pub fn new(a: PrimeFieldElement, b: PrimeFieldElement) -> Self {
        Self { a, b }
    }

    /// Construct an element from the canonical limb encodings of its two
    /// coordinates. See [`PrimeFieldElement::try_from_canonical`].
    pub fn try_from_canonical(
        a: [u64; FP751_NUM_WORDS],
        b: [u64; FP751_NUM_WORDS],
    ) -> Result<Self> {
        Ok(Self {
            a: PrimeFieldElement::try_from_canonical(a)?,
            b: PrimeFieldElement::try_from_canonical(b)?,
        })
    }

    /// Returns x^2 = (a^2 - b^2) + 2ab*i, computed as (a+b)(a-b) for the
    /// real part to save one multiplication.
    #[must_use]
    pub fn square(&self) -> Self {
        let a2 = self.a + self.a;
        let a_plus_b = self.a + self.b;
        let a_minus_b = self.a - self.b;
        Self {
            a: a_plus_b * a_minus_b,
            b: a2 * self.b,
        }
    }

    /// Returns 1/x = (a - b*i) / (a^2 + b^2).
    ///
    /// The norm a^2 + b^2 is accumulated double-width and reduced once,
    /// then inverted in the prime field; zero input yields zero, as for
    /// [`PrimeFieldElement::inv`].
    #[must_use]
    pub fn inv(&self) -> Self {
        let a = &self.a.0;
        let b = &self.b.0;

        let mut asq = Fp751X2::ZERO;
        let mut bsq = Fp751X2::ZERO;
        fp751_mul(&mut asq, a, a);
        fp751_mul(&mut bsq, b, b);
        let mut norm_wide = Fp751X2::ZERO;
        fp751_x2_add_lazy(&mut norm_wide, &asq, &bsq);
        let mut norm = Fp751Element::ZERO;
        fp751_montgomery_reduce(&mut norm, &norm_wide);

        let norm_inv = PrimeFieldElement(norm).inv();
        Self {
            a: self.a * norm_inv,
            b: -self.b * norm_inv,
        }
    }

    /// Equality modulo p, coordinatewise. Variable time; test and debug
    /// use only.
    pub fn vartime_eq(&self, other: &Self) -> bool {
        self.a.vartime_eq(&other.a) && self.b.vartime_eq(&other.b)
    }
}

impl Default for ExtensionFieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Mul for ExtensionFieldElement {
    type Output = Self;

    /// (a + b*i)(c + d*i) = (ac - bd) + (ad + bc)*i with Karatsuba's
    /// identity (b - a)(c - d) = (bc + ad) - ac - bd, so only three
    /// double-width multiplications are needed. The cross term is
    /// assembled with lazy double-width additions and reduced once.
    fn mul(self, rhs: Self) -> Self {
        let a = &self.a.0;
        let b = &self.b.0;
        let c = &rhs.a.0;
        let d = &rhs.b.0;

        let mut ac = Fp751X2::ZERO;
        let mut bd = Fp751X2::ZERO;
        fp751_mul(&mut ac, a, c);
        fp751_mul(&mut bd, b, d);

        let mut b_minus_a = Fp751Element::ZERO;
        let mut c_minus_d = Fp751Element::ZERO;
        fp751_sub_reduced(&mut b_minus_a, b, a);
        fp751_sub_reduced(&mut c_minus_d, c, d);

        let mut cross = Fp751X2::ZERO;
        fp751_mul(&mut cross, &b_minus_a, &c_minus_d);
        let mut ad_plus_bc = Fp751X2::ZERO;
        fp751_x2_add_lazy(&mut ad_plus_bc, &cross, &ac);
        let mut cross_sum = Fp751X2::ZERO;
        fp751_x2_add_lazy(&mut cross_sum, &ad_plus_bc, &bd);

        let mut imag = Fp751Element::ZERO;
        fp751_montgomery_reduce(&mut imag, &cross_sum);

        let mut ac_minus_bd = Fp751X2::ZERO;
        fp751_x2_sub_lazy(&mut ac_minus_bd, &ac, &bd);
        let mut real = Fp751Element::ZERO;
        fp751_montgomery_reduce(&mut real, &ac_minus_bd);

        Self {
            a: PrimeFieldElement(real),
            b: PrimeFieldElement(imag),
        }
    }
}

impl MulAssign for ExtensionFieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Add for ExtensionFieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            a: self.a + rhs.a,
            b: self.b + rhs.b,
        }
    }
}

impl AddAssign for ExtensionFieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ExtensionFieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            a: self.a - rhs.a,
            b: self.b - rhs.b,
        }
    }
}

impl SubAssign for ExtensionFieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for ExtensionFieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

/// Variable-time; see [`ExtensionFieldElement::vartime_eq`].
impl PartialEq for ExtensionFieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.vartime_eq(other)
    }
}

impl Eq for ExtensionFieldElement {}

impl Zero for ExtensionFieldElement {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.vartime_eq(&Self::ZERO)
    }
}

impl ConstZero for ExtensionFieldElement {
    const ZERO: Self = Self::ZERO;
}

impl One for ExtensionFieldElement {
    fn one() -> Self {
        Self::ONE
    }

    fn is_one(&self) -> bool {
        self.vartime_eq(&Self::ONE)
    }
}

impl ConstOne for ExtensionFieldElement {
    const ONE: Self = Self::ONE;
}

impl Distribution<ExtensionFieldElement> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ExtensionFieldElement {
        ExtensionFieldElement {
            a: rng.gen(),
            b: rng.gen(),
        }
    }
}

impl fmt::Display for ExtensionFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}*i", self.a, self.b)
    }
}
