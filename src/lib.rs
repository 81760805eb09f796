//! Field arithmetic for isogeny-based cryptography over the 751-bit prime
//! p = 2^372 * 3^239 - 1: the prime field F_p and its quadratic extension
//! F_{p^2} = F_p(i), both in Montgomery form.
//!
//! Every operation is constant-time except those carrying a `vartime`
//! prefix (and the `PartialEq` impls that delegate to them), which exist
//! for tests and assertions only.

pub mod constants;
pub mod error;
pub mod extension_field;
pub mod fp751;
pub mod prelude;
pub mod prime_field;

#[cfg(test)]
pub(crate) mod test_util;

pub use extension_field::ExtensionFieldElement;
pub use prime_field::PrimeFieldElement;
