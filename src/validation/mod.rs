//! Eager checks on a pivot definition.
//!
//! Every rule runs before the first enumeration or evaluation call, so a
//! malformed definition never produces partial output.

pub use self::validator::{Shape, Validator};

mod validator;
mod rules {
    pub mod aliases;
    pub mod arity;
    pub mod roles;
}
