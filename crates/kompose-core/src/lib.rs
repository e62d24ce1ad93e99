//! Core types shared by every kompose crate.
//!
//! This crate provides:
//! - The value model (numbers, strings, colors, font styles) and
//!   [`Reference`]s binding a value to a named design variable or style
//! - The layout IR produced by the converter and consumed by the renderer
//! - Error types

pub mod errors;
pub mod ir;
pub mod types;

pub use errors::*;
pub use ir::*;
pub use types::*;
