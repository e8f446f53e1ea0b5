//! Turns typed engine output into the JSON shapes callers consume.
pub mod assembler;

pub use assembler::ResultAssembler;
