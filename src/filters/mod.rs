//! Parsed representations of the rule families handled by this crate.

pub mod redirect;
pub mod scriptlet;
