//! Design-token mapping table for kompose.
//!
//! The renderer registers every value it emits (paddings, corner radii,
//! colors, text styles) in a [`MutableMappingTable`], deduplicated by a stable
//! id derived from the token's name. The frozen [`MappingTable`] is what gets
//! persisted as config text and edited by the user.
//!
//! # Example
//!
//! ```ignore
//! use kompose_mapping::{MappingTable, MutableMappingTable};
//!
//! let saved = MappingTable::from_config(&settings.mapping_config)?;
//! let mut table = MutableMappingTable::new();
//! let code = kompose_render::render(&mut table, &root)?;
//! table.merge(&saved, true);
//! let text = code.to_source(&table.freeze(), true);
//! ```

mod config;
mod segment;
mod table;

pub use config::ParsedConfig;
pub use segment::{parse_marked, replace_markers, wrap_reference_mapping, RenderedCode, Segment, MAPPING_MARKER};
pub use table::{
    create_id, Category, MappingKey, MappingTable, MappingTableValue, MutableMappingTable,
    ValueFormatter,
};
