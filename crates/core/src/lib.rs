//! Domain primitives shared by the store and HTTP layers.
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod kind;
pub mod members;
pub mod types;
pub mod validation;
