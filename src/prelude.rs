pub use crate::{
    error::{FieldError, Result},
    extension_field::ExtensionFieldElement,
    prime_field::PrimeFieldElement,
};
