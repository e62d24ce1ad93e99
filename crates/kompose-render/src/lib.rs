//! Compose source rendering of kompose layout IR.
//!
//! [`render`] walks a [`kompose_core::Node`] tree and produces
//! [`kompose_mapping::RenderedCode`]: Kotlin Compose source whose design
//! values are token segments registered in a
//! [`kompose_mapping::MutableMappingTable`].

pub mod formatter;
pub mod renderer;

pub use formatter::ComposeFormatter;
pub use renderer::{render, RenderOptions, Renderer};
