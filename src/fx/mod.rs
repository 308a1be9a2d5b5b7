//! Output effects.

pub mod chorus;
