//! Design document: a scene tree plus the style and variable registries its
//! nodes refer to.

use indexmap::IndexMap;
use kompose_core::{Color, FontName, LetterSpacing, LineHeight, TextCase, TextDecoration};
use serde::Deserialize;
use thiserror::Error;

use crate::scene::{Paint, SceneNode};

/// Errors while loading a design document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid design document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A shared style, keyed by id in [`DesignDocument::styles`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Style {
    Paint(PaintStyle),
    Text(TextStyle),
    /// Effect and grid styles.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaintStyle {
    pub name: String,
    #[serde(default)]
    pub paints: Vec<Paint>,
}

/// Text style fields. The weight is not part of a text style; it is taken
/// from the node using the style.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub name: String,
    pub font_size: f64,
    pub font_name: FontName,
    #[serde(default)]
    pub text_decoration: TextDecoration,
    #[serde(default)]
    pub letter_spacing: LetterSpacing,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub text_case: TextCase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableType {
    Boolean,
    Float,
    String,
    Color,
}

/// Resolved value of a variable in the document's current mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum VariableValue {
    Boolean(bool),
    Float(f64),
    String(String),
    Color(Color),
}

/// A design variable, keyed by id in [`DesignDocument::variables`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub resolved_type: VariableType,
    pub value: Option<VariableValue>,
}

/// A scene tree together with the registries its bindings resolve against.
#[derive(Debug, Clone, Deserialize)]
pub struct DesignDocument {
    pub root: SceneNode,
    #[serde(default)]
    pub styles: IndexMap<String, Style>,
    #[serde(default)]
    pub variables: IndexMap<String, Variable>,
}

impl DesignDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, DocumentError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn style(&self, id: &str) -> Option<&Style> {
        self.styles.get(id)
    }

    /// The variable `id` if it exists and has the expected type.
    pub fn variable(&self, id: &str, expected: VariableType) -> Option<&Variable> {
        self.variables
            .get(id)
            .filter(|variable| variable.resolved_type == expected)
    }
}
