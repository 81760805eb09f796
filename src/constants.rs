//! Limb-level constants for the field F_p, p = 2^372 * 3^239 - 1.
//!
//! Everything here is derived from that one prime; see the tests at the
//! bottom of `fp751.rs` for cross-checks against reference big-integer
//! arithmetic.

/// Number of 64-bit limbs in a single-width residue.
pub const FP751_NUM_WORDS: usize = 12;

/// The prime p = 2^372 * 3^239 - 1, little-endian limbs.
pub const P751: [u64; FP751_NUM_WORDS] = [
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xeeafffffffffffff,
    0xe3ec968549f878a8, 0xda959b1a13f7cc76, 0x084e9867d6ebe876,
    0x8562b5045cb25748, 0x0e12909f97badc66, 0x00006fe5d541f71c,
];

/// 2*p, the upper bound of the working range of a single-width residue.
pub const P751_X2: [u64; FP751_NUM_WORDS] = [
    0xfffffffffffffffe, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xffffffffffffffff, 0xdd5fffffffffffff,
    0xc7d92d0a93f0f151, 0xb52b363427ef98ed, 0x109d30cfadd7d0ed,
    0x0ac56a08b964ae90, 0x1c25213f2f75b8cd, 0x0000dfcbaa83ee38,
];

/// The Montgomery radix R = 2^768 mod p. This is also the Montgomery
/// representation of 1.
pub const MONTGOMERY_R: [u64; FP751_NUM_WORDS] = [
    0x00000000000249ad, 0x0000000000000000, 0x0000000000000000,
    0x0000000000000000, 0x0000000000000000, 0x8310000000000000,
    0x5527b1e4375c6c66, 0x697797bf3f4f24d0, 0xc89db7b2ac5c4e2e,
    0x4ca4b439d2076956, 0x10f7926c7512c7e9, 0x00002d5b24bce5e2,
];

/// R^2 mod p, used to carry a plain integer into Montgomery form with a
/// single Montgomery multiplication.
pub const MONTGOMERY_RSQ: [u64; FP751_NUM_WORDS] = [
    0x233046449dad4058, 0xdb010161a696452a, 0x5e36941472e3fd8e,
    0xf40bfe2082a2e706, 0x4932cca8904f8751, 0x1f735f1f1ee7fc81,
    0xa24f4d80c1048e18, 0xb56c383ccdb607c5, 0x441dd47b735f9c90,
    0x5673ed2c6a6ac82a, 0x06c905261132294b, 0x000041ad830f1f35,
];
