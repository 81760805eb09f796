//! Reference big-integer helpers shared by the test modules.

use num_bigint::BigUint;
use num_traits::One;
use proptest::prelude::*;

use crate::constants::FP751_NUM_WORDS;
use crate::fp751::{fp751_strong_reduce, Fp751Element};

/// The prime p = 2^372 * 3^239 - 1 as a big integer.
pub fn p_big() -> BigUint {
    (BigUint::one() << 372u32) * BigUint::from(3u32).pow(239) - 1u32
}

pub fn limbs_to_big(limbs: &[u64]) -> BigUint {
    limbs
        .iter()
        .rev()
        .fold(BigUint::ZERO, |acc, &l| (acc << 64u32) + l)
}

pub fn big_to_limbs(n: &BigUint) -> [u64; FP751_NUM_WORDS] {
    let mut limbs = [0u64; FP751_NUM_WORDS];
    for (i, d) in n.to_u64_digits().into_iter().enumerate() {
        limbs[i] = d;
    }
    limbs
}

/// A uniform-ish canonical residue: any 751-bit limb pattern is below 2p,
/// so one strong reduce makes it canonical.
pub fn arb_residue() -> impl Strategy<Value = Fp751Element> {
    proptest::array::uniform12(any::<u64>()).prop_map(|mut limbs| {
        limbs[FP751_NUM_WORDS - 1] &= (1u64 << 47) - 1;
        let mut e = Fp751Element(limbs);
        fp751_strong_reduce(&mut e);
        e
    })
}
