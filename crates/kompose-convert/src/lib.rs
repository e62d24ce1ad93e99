//! Design document to layout IR conversion for kompose.
//!
//! A [`DesignDocument`] holds the scene tree exported from the design tool
//! together with its style and variable registries. The converter walks the
//! tree, asking a [`NodeFacts`] provider for each node's background, border,
//! corner radii, auto-layout and text facts, and produces a
//! [`kompose_core::Node`] tree.
//!
//! # Example
//!
//! ```ignore
//! use kompose_convert::{convert, DesignDocument, DocumentFacts};
//!
//! let document = DesignDocument::from_json(&json)?;
//! let facts = DocumentFacts::new(&document);
//! let ir = convert(&facts, &document.root).await;
//! ```

pub mod converter;
pub mod document;
pub mod facts;
pub mod scene;

pub use converter::{convert, Converter};
pub use document::{DesignDocument, DocumentError, Style, Variable, VariableType, VariableValue};
pub use facts::{
    CornerRadii, DocumentFacts, LayoutDirection, NodeBackground, NodeBorder, NodeFacts,
    NodeLayout, NodeText,
};
pub use scene::{FrameNode, Mixable, NodeClass, Paint, SceneNode, TextNode};
