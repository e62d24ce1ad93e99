//! Config text format of a mapping table.
//!
//! One TOML table per category, each holding `"name" = "value"` string
//! entries:
//!
//! ```toml
//! [padding]
//! "spacing/md" = "16.dp"
//!
//! [color]
//! "Brand/Primary" = "Color(0xFF3B82F6)"
//! ```

use indexmap::IndexMap;
use kompose_core::ConfigError;

use crate::table::{Category, MappingTable, MappingTableValue};

/// A validated config: entries per category, in file order.
pub type ParsedConfig = IndexMap<Category, IndexMap<String, String>>;

impl MappingTable {
    /// Serialize all four categories as config text.
    pub fn to_config(&self) -> String {
        let mut root = toml::Table::new();
        for category in Category::ALL {
            let section: toml::Table = self
                .category(category)
                .map(|entry| (entry.name.clone(), toml::Value::String(entry.value.clone())))
                .collect();
            root.insert(category.as_str().to_string(), toml::Value::Table(section));
        }
        root.to_string()
    }

    /// Parse and validate config text without building a table.
    pub fn check_config(config: &str) -> Result<ParsedConfig, ConfigError> {
        let root: toml::Table = config.parse().map_err(|e: toml::de::Error| ConfigError::Syntax {
            message: e.to_string(),
        })?;

        let mut parsed = ParsedConfig::new();
        for (key, section) in root {
            let category: Category = key
                .parse()
                .map_err(|_| ConfigError::UnknownCategory { key: key.clone() })?;
            let toml::Value::Table(entries) = section else {
                return Err(ConfigError::InvalidSection { key });
            };

            let values = parsed.entry(category).or_default();
            for (name, value) in entries {
                match value {
                    toml::Value::String(value) => {
                        values.insert(name, value);
                    }
                    _ => return Err(ConfigError::UnsupportedValue { key: name }),
                }
            }
        }
        Ok(parsed)
    }

    /// Build a table from config text. Ids are recomputed from the names.
    pub fn from_config(config: &str) -> Result<MappingTable, ConfigError> {
        let parsed = Self::check_config(config)?;
        let entries = parsed.into_iter().flat_map(|(category, values)| {
            values
                .into_iter()
                .map(move |(name, value)| MappingTableValue::new(category, name, value))
        });
        Ok(MappingTable::from_entries(entries))
    }

    /// Like [`MappingTable::from_config`], but a malformed config yields an
    /// empty table instead of an error.
    pub fn from_config_or_empty(config: &str) -> MappingTable {
        Self::from_config(config).unwrap_or_else(|e| {
            log::warn!("Ignoring mapping config: {}", e);
            MappingTable::empty()
        })
    }
}
