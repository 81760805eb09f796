use thiserror::Error;

/// Common result type used across this crate.
pub type Result<T, E = FieldError> = core::result::Result<T, E>;

/// Errors from the fallible element constructors.
///
/// The arithmetic operations themselves are total and never fail; only
/// constructing an element from externally supplied limbs can.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum FieldError {
    #[error("non-canonical residue: value is not below the modulus p = 2^372 * 3^239 - 1")]
    NotCanonical,
}
