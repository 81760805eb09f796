//! Word-level residue arithmetic modulo p = 2^372 * 3^239 - 1.
//!
//! A single-width residue is kept in the working range [0, 2p); only
//! [`fp751_strong_reduce`] lands in the canonical range [0, p). Operations
//! whose name carries `reduced` reduce back into the working range, `lazy`
//! operations skip reduction entirely and are only safe to feed into
//! [`fp751_mul`] or [`fp751_montgomery_reduce`] within the documented
//! bounds.
//!
//! Every function here is constant-time: the instruction and memory-access
//! sequence is independent of operand values. The one exception is
//! [`Fp751Element::vartime_eq`], which is named accordingly and must stay
//! out of any code path touching secret data.

use crate::constants::{FP751_NUM_WORDS, P751, P751_X2};

/// A residue modulo p, as 12 little-endian 64-bit limbs.
///
/// No particular meaning is assigned to the representation: it may hold a
/// value in Montgomery form or not. Tracking that meaning is left to the
/// wrapping element types.
#[derive(Clone, Copy, Debug)]
pub struct Fp751Element(pub [u64; FP751_NUM_WORDS]);

/// An unreduced product of two single-width residues, as 24 limbs.
#[derive(Clone, Copy, Debug)]
pub struct Fp751X2(pub [u64; 2 * FP751_NUM_WORDS]);

impl Fp751Element {
    pub const ZERO: Self = Self([0u64; FP751_NUM_WORDS]);

    /// Equality modulo p. Variable time: strong-reduces copies of both
    /// operands before comparing limbs. Test and debug use only.
    pub fn vartime_eq(&self, other: &Self) -> bool {
        let mut x = *self;
        let mut y = *other;
        fp751_strong_reduce(&mut x);
        fp751_strong_reduce(&mut y);
        x.0 == y.0
    }

    /// True iff the limbs encode a canonical residue, i.e. a value in
    /// [0, p). Runs in constant time, though callers only ever apply it
    /// to public inputs.
    pub fn is_canonical(&self) -> bool {
        let mut borrow = 0u64;
        for i in 0..FP751_NUM_WORDS {
            let (_, b) = sbb(self.0[i], P751[i], borrow);
            borrow = b;
        }
        // borrow is all-ones exactly when self < p
        borrow != 0
    }
}

impl Fp751X2 {
    pub const ZERO: Self = Self([0u64; 2 * FP751_NUM_WORDS]);
}

/// Add with carry: returns (a + b + carry) split into (low, high) words.
#[inline(always)]
const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// Subtract with borrow. The incoming and outgoing borrow is either 0 or
/// all-ones, so it doubles as a selection mask.
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (t as u64, (t >> 64) as u64)
}

/// Multiply-accumulate: returns (acc + a*b + carry) as (low, high) words.
/// Cannot overflow: (2^64-1) + (2^64-1)^2 + (2^64-1) = 2^128 - 1.
#[inline(always)]
const fn mac(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = (acc as u128) + (a as u128) * (b as u128) + (carry as u128);
    (t as u64, (t >> 64) as u64)
}

/// z = x + y in the working range: inputs in [0, 2p), output in [0, 2p).
pub fn fp751_add_reduced(z: &mut Fp751Element, x: &Fp751Element, y: &Fp751Element) {
    let mut t = [0u64; FP751_NUM_WORDS];
    let mut carry = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, c) = adc(x.0[i], y.0[i], carry);
        t[i] = lo;
        carry = c;
    }
    // x + y < 4p < 2^768, so the final carry is always zero; reduce the
    // sum back below 2p with one masked subtraction.
    conditional_sub(&mut z.0, &t, &P751_X2);
}

/// z = x - y in the working range: inputs in [0, 2p), output in [0, 2p).
pub fn fp751_sub_reduced(z: &mut Fp751Element, x: &Fp751Element, y: &Fp751Element) {
    let mut borrow = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, b) = sbb(x.0[i], y.0[i], borrow);
        z.0[i] = lo;
        borrow = b;
    }
    // Add 2p back when the subtraction went negative.
    let mask = borrow;
    let mut carry = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, c) = adc(z.0[i], P751_X2[i] & mask, carry);
        z.0[i] = lo;
        carry = c;
    }
}

/// z = x + y without reduction. The inputs must be small enough that the
/// sum fits in twelve limbs; values in the working range always are.
pub fn fp751_add_lazy(z: &mut Fp751Element, x: &Fp751Element, y: &Fp751Element) {
    let mut carry = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, c) = adc(x.0[i], y.0[i], carry);
        z.0[i] = lo;
        carry = c;
    }
}

/// z = x + y on double-width values, without reduction.
pub fn fp751_x2_add_lazy(z: &mut Fp751X2, x: &Fp751X2, y: &Fp751X2) {
    let mut carry = 0u64;
    for i in 0..2 * FP751_NUM_WORDS {
        let (lo, c) = adc(x.0[i], y.0[i], carry);
        z.0[i] = lo;
        carry = c;
    }
}

/// z = x - y on double-width values. When the difference is negative,
/// p * 2^768 is added back so that z stays a nonnegative representative of
/// the same residue class; the result is then still a valid input to
/// [`fp751_montgomery_reduce`].
pub fn fp751_x2_sub_lazy(z: &mut Fp751X2, x: &Fp751X2, y: &Fp751X2) {
    let mut borrow = 0u64;
    for i in 0..2 * FP751_NUM_WORDS {
        let (lo, b) = sbb(x.0[i], y.0[i], borrow);
        z.0[i] = lo;
        borrow = b;
    }
    // Masked add of p to the upper half, i.e. of p * 2^768 to the value.
    let mask = borrow;
    let mut carry = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, c) = adc(z.0[FP751_NUM_WORDS + i], P751[i] & mask, carry);
        z.0[FP751_NUM_WORDS + i] = lo;
        carry = c;
    }
}

/// z = x * y, the exact double-width product. Schoolbook multiplication
/// with 128-bit accumulation; every iteration count is fixed.
pub fn fp751_mul(z: &mut Fp751X2, x: &Fp751Element, y: &Fp751Element) {
    let mut t = [0u64; 2 * FP751_NUM_WORDS];
    for i in 0..FP751_NUM_WORDS {
        let mut carry = 0u64;
        for j in 0..FP751_NUM_WORDS {
            let (lo, c) = mac(t[i + j], x.0[i], y.0[j], carry);
            t[i + j] = lo;
            carry = c;
        }
        t[i + FP751_NUM_WORDS] = carry;
    }
    z.0 = t;
}

/// Montgomery reduction: z = x * R^{-1} mod p, with R = 2^768.
///
/// Because p = 2^372 * 3^239 - 1 is congruent to -1 modulo 2^64, the
/// Montgomery factor -p^{-1} mod 2^64 is exactly 1, so each round folds
/// the lowest limb of the accumulator directly.
///
/// Requires x < 2 * p * 2^768; the output is in the working range [0, 2p).
pub fn fp751_montgomery_reduce(z: &mut Fp751Element, x: &Fp751X2) {
    let mut t = [0u64; 2 * FP751_NUM_WORDS + 1];
    t[..2 * FP751_NUM_WORDS].copy_from_slice(&x.0);

    for i in 0..FP751_NUM_WORDS {
        // m = t[i] * (-p^{-1} mod 2^64) mod 2^64 = t[i]
        let m = t[i];
        let mut carry = 0u64;
        for j in 0..FP751_NUM_WORDS {
            let (lo, c) = mac(t[i + j], m, P751[j], carry);
            t[i + j] = lo;
            carry = c;
        }
        for k in (i + FP751_NUM_WORDS)..(2 * FP751_NUM_WORDS + 1) {
            let (lo, c) = adc(t[k], carry, 0);
            t[k] = lo;
            carry = c;
        }
    }

    // The low half is now zero; the quotient t >> 768 is below 3p.
    // One masked subtraction of 2p lands it in [0, 2p).
    let mut hi = [0u64; FP751_NUM_WORDS];
    hi.copy_from_slice(&t[FP751_NUM_WORDS..2 * FP751_NUM_WORDS]);
    conditional_sub(&mut z.0, &hi, &P751_X2);
}

/// Normalize x from the working range [0, 2p) to the canonical range [0, p).
pub fn fp751_strong_reduce(x: &mut Fp751Element) {
    let t = x.0;
    conditional_sub(&mut x.0, &t, &P751);
}

/// z = t - m if t >= m, else t. Branch-free: subtracts unconditionally and
/// adds m back under the borrow mask.
fn conditional_sub(z: &mut [u64; FP751_NUM_WORDS], t: &[u64; FP751_NUM_WORDS], m: &[u64; FP751_NUM_WORDS]) {
    let mut w = [0u64; FP751_NUM_WORDS];
    let mut borrow = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, b) = sbb(t[i], m[i], borrow);
        w[i] = lo;
        borrow = b;
    }
    let mask = borrow;
    let mut carry = 0u64;
    for i in 0..FP751_NUM_WORDS {
        let (lo, c) = adc(w[i], m[i] & mask, carry);
        z[i] = lo;
        carry = c;
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::constants::{MONTGOMERY_R, MONTGOMERY_RSQ};
    use crate::test_util::{arb_residue, big_to_limbs, limbs_to_big, p_big};

    #[test]
    fn prime_constant_matches_reference() {
        assert_eq!(limbs_to_big(&P751), p_big());
        assert_eq!(limbs_to_big(&P751_X2), 2u32 * p_big());
    }

    #[test]
    fn montgomery_constants_match_reference() {
        let p = p_big();
        let r = (BigUint::one() << 768u32) % &p;
        assert_eq!(limbs_to_big(&MONTGOMERY_R), r);
        assert_eq!(limbs_to_big(&MONTGOMERY_RSQ), (&r * &r) % &p);
    }

    #[proptest]
    fn add_reduced_matches_reference(
        #[strategy(arb_residue())] x: Fp751Element,
        #[strategy(arb_residue())] y: Fp751Element,
    ) {
        let mut z = Fp751Element::ZERO;
        fp751_add_reduced(&mut z, &x, &y);
        let p = p_big();
        prop_assert!(limbs_to_big(&z.0) < 2u32 * &p);
        prop_assert_eq!(
            limbs_to_big(&z.0) % &p,
            (limbs_to_big(&x.0) + limbs_to_big(&y.0)) % &p
        );
    }

    #[proptest]
    fn sub_reduced_matches_reference(
        #[strategy(arb_residue())] x: Fp751Element,
        #[strategy(arb_residue())] y: Fp751Element,
    ) {
        let mut z = Fp751Element::ZERO;
        fp751_sub_reduced(&mut z, &x, &y);
        let p = p_big();
        prop_assert!(limbs_to_big(&z.0) < 2u32 * &p);
        prop_assert_eq!(
            limbs_to_big(&z.0) % &p,
            (limbs_to_big(&x.0) + 2u32 * &p - limbs_to_big(&y.0)) % &p
        );
    }

    #[proptest]
    fn add_lazy_is_exact(
        #[strategy(arb_residue())] x: Fp751Element,
        #[strategy(arb_residue())] y: Fp751Element,
    ) {
        let mut z = Fp751Element::ZERO;
        fp751_add_lazy(&mut z, &x, &y);
        // Values in the working range sum below 2^752, so no carry is lost
        // and the lazy sum is still a valid multiplication input.
        prop_assert_eq!(
            limbs_to_big(&z.0),
            limbs_to_big(&x.0) + limbs_to_big(&y.0)
        );
    }

    #[proptest]
    fn mul_is_exact(
        #[strategy(arb_residue())] x: Fp751Element,
        #[strategy(arb_residue())] y: Fp751Element,
    ) {
        let mut z = Fp751X2::ZERO;
        fp751_mul(&mut z, &x, &y);
        prop_assert_eq!(
            limbs_to_big(&z.0),
            limbs_to_big(&x.0) * limbs_to_big(&y.0)
        );
    }

    #[proptest]
    fn montgomery_reduce_divides_out_r(
        #[strategy(arb_residue())] x: Fp751Element,
        #[strategy(arb_residue())] y: Fp751Element,
    ) {
        let mut prod = Fp751X2::ZERO;
        fp751_mul(&mut prod, &x, &y);
        let mut z = Fp751Element::ZERO;
        fp751_montgomery_reduce(&mut z, &prod);

        let p = p_big();
        let r_inv = (BigUint::one() << 768u32).modpow(&(&p - 2u32), &p);
        prop_assert!(limbs_to_big(&z.0) < 2u32 * &p);
        prop_assert_eq!(
            limbs_to_big(&z.0) % &p,
            limbs_to_big(&prod.0) * r_inv % &p
        );
    }

    #[proptest]
    fn x2_sub_lazy_stays_nonnegative(
        #[strategy(arb_residue())] a: Fp751Element,
        #[strategy(arb_residue())] b: Fp751Element,
    ) {
        // ac - bd with c = b and d = a maximizes the chance of borrow.
        let mut ab = Fp751X2::ZERO;
        let mut ba = Fp751X2::ZERO;
        fp751_mul(&mut ab, &a, &b);
        fp751_mul(&mut ba, &b, &a);
        let mut small = Fp751X2::ZERO;
        fp751_mul(&mut small, &a, &a);
        let mut diff = Fp751X2::ZERO;
        fp751_x2_sub_lazy(&mut diff, &small, &ab);

        let p = p_big();
        let expected = (limbs_to_big(&small.0) + (&p << 768u32)
            - limbs_to_big(&ab.0))
            % (&p << 768u32);
        prop_assert_eq!(limbs_to_big(&diff.0), expected);
        // Sanity: the exact-difference case has no correction term.
        let mut zero = Fp751X2::ZERO;
        fp751_x2_sub_lazy(&mut zero, &ab, &ba);
        prop_assert_eq!(limbs_to_big(&zero.0), BigUint::ZERO);
    }

    #[proptest]
    fn strong_reduce_is_canonical_and_idempotent(
        #[strategy(arb_residue())] x: Fp751Element,
    ) {
        let mut once = x;
        fp751_strong_reduce(&mut once);
        prop_assert!(once.is_canonical());
        let mut twice = once;
        fp751_strong_reduce(&mut twice);
        prop_assert_eq!(once.0, twice.0);
    }

    #[test]
    fn strong_reduce_wraps_values_in_upper_half_of_working_range() {
        let p = p_big();
        let mut x = Fp751Element(big_to_limbs(&(&p + 5u32)));
        fp751_strong_reduce(&mut x);
        assert_eq!(limbs_to_big(&x.0), BigUint::from(5u32));

        let mut p_itself = Fp751Element(big_to_limbs(&p));
        fp751_strong_reduce(&mut p_itself);
        assert_eq!(limbs_to_big(&p_itself.0), BigUint::ZERO);
    }

    #[test]
    fn vartime_eq_sees_through_noncanonical_representatives() {
        let p = p_big();
        let x = Fp751Element(big_to_limbs(&BigUint::from(42u32)));
        let y = Fp751Element(big_to_limbs(&(&p + 42u32)));
        assert!(x.vartime_eq(&y));
        let z = Fp751Element(big_to_limbs(&(&p + 43u32)));
        assert!(!x.vartime_eq(&z));
    }

    #[test]
    fn is_canonical_boundary() {
        let p = p_big();
        assert!(Fp751Element(big_to_limbs(&(&p - 1u32))).is_canonical());
        assert!(!Fp751Element(big_to_limbs(&p)).is_canonical());
        assert!(Fp751Element::ZERO.is_canonical());
    }
}
