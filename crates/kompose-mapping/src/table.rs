//! Mapping table types: the render-session builder and the immutable table.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use kompose_core::{Bindable, RenderError, Value};
use serde::{Deserialize, Serialize};

/// Stable identity of a mapping entry, derived from its name.
pub type MappingKey = i32;

/// The four token categories a mapping table keeps apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Padding,
    Shape,
    Color,
    Text,
}

impl Category {
    /// All categories, in config order.
    pub const ALL: [Category; 4] = [
        Category::Padding,
        Category::Shape,
        Category::Color,
        Category::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Padding => "padding",
            Category::Shape => "shape",
            Category::Color => "color",
            Category::Text => "text",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

/// Compute the id of a token name.
///
/// Java-style string hash over UTF-16 code units with wrapping 32-bit
/// arithmetic, so ids agree with the ones the host plugin persisted.
pub fn create_id(name: &str) -> MappingKey {
    name.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as i32))
}

/// One entry of the mapping table. `value` is already rendered source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingTableValue {
    pub id: MappingKey,
    pub name: String,
    pub value: String,
    pub table: Category,
}

impl MappingTableValue {
    pub fn new(table: Category, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: create_id(&name),
            name,
            value: value.into(),
            table,
        }
    }
}

/// Turns a design value into the source text stored in the table.
pub trait ValueFormatter {
    fn format_value(&self, value: &Value) -> Result<String, RenderError>;
}

impl<F> ValueFormatter for F
where
    F: Fn(&Value) -> Result<String, RenderError>,
{
    fn format_value(&self, value: &Value) -> Result<String, RenderError> {
        self(value)
    }
}

type Entries = IndexMap<MappingKey, MappingTableValue>;

/// Per-category entries in insertion order.
#[derive(Debug, Clone, Default)]
struct Tables {
    padding: Entries,
    shape: Entries,
    color: Entries,
    text: Entries,
}

impl Tables {
    fn get(&self, category: Category) -> &Entries {
        match category {
            Category::Padding => &self.padding,
            Category::Shape => &self.shape,
            Category::Color => &self.color,
            Category::Text => &self.text,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Entries {
        match category {
            Category::Padding => &mut self.padding,
            Category::Shape => &mut self.shape,
            Category::Color => &mut self.color,
            Category::Text => &mut self.text,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &MappingTableValue> {
        Category::ALL
            .into_iter()
            .flat_map(move |category| self.get(category).values())
    }

    fn merge(&mut self, other: &Tables, overwrite: bool) {
        for entry in other.iter() {
            let entries = self.get_mut(entry.table);
            if overwrite || !entries.contains_key(&entry.id) {
                entries.insert(entry.id, entry.clone());
            }
        }
    }

    fn content_equals(&self, other: &Tables) -> bool {
        Category::ALL.into_iter().all(|category| {
            let (a, b) = (self.get(category), other.get(category));
            a.len() == b.len()
                && a.iter().all(|(id, entry)| {
                    b.get(id).map_or(false, |other| other.value == entry.value)
                })
        })
    }
}

/// Builder that accumulates entries during one render pass.
#[derive(Debug, Clone, Default)]
pub struct MutableMappingTable {
    tables: Tables,
}

impl MutableMappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a value and return its entry.
    ///
    /// Absent and blank literals (zero, empty string) are skipped. A reference
    /// is keyed by its name, a literal by its own rendered text. The first
    /// entry registered under an id wins; later values for the same name are
    /// ignored.
    pub fn add_reference<T, F>(
        &mut self,
        category: Category,
        value: Option<&Bindable<T>>,
        formatter: &F,
    ) -> Result<Option<MappingTableValue>, RenderError>
    where
        T: Clone + Into<Value>,
        F: ValueFormatter + ?Sized,
    {
        let Some(value) = value else {
            return Ok(None);
        };
        if value.is_blank() {
            return Ok(None);
        }

        let rendered = formatter.format_value(&value.to_value())?;
        let name = match value.reference() {
            Some(reference) => reference.name.clone(),
            None => rendered.clone(),
        };
        let entry = MappingTableValue::new(category, name, rendered);
        let stored = self
            .tables
            .get_mut(category)
            .entry(entry.id)
            .or_insert(entry);
        Ok(Some(stored.clone()))
    }

    pub fn get(&self, category: Category, id: MappingKey) -> Option<&MappingTableValue> {
        self.tables.get(category).get(&id)
    }

    /// Layer the entries of a frozen table onto this one. Existing entries are
    /// only replaced when `overwrite` is set; nothing is ever removed.
    pub fn merge(&mut self, frozen: &MappingTable, overwrite: bool) {
        self.tables.merge(&frozen.tables, overwrite);
    }

    /// Snapshot the entries into an immutable table.
    pub fn freeze(&self) -> MappingTable {
        MappingTable {
            tables: self.tables.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.tables.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<MappingTable> for MutableMappingTable {
    fn from(table: MappingTable) -> Self {
        Self {
            tables: table.tables,
        }
    }
}

/// Immutable mapping table, as persisted and edited by the user.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    tables: Tables,
}

impl MappingTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from entries. Later entries with an already seen id
    /// replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = MappingTableValue>) -> Self {
        let mut tables = Tables::default();
        for entry in entries {
            tables.get_mut(entry.table).insert(entry.id, entry);
        }
        Self { tables }
    }

    pub fn get(&self, category: Category, id: MappingKey) -> Option<&MappingTableValue> {
        self.tables.get(category).get(&id)
    }

    /// Entries of one category, in insertion order.
    pub fn category(&self, category: Category) -> impl Iterator<Item = &MappingTableValue> {
        self.tables.get(category).values()
    }

    /// All entries, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &MappingTableValue> {
        self.tables.iter()
    }

    /// A copy of this table with one entry's value replaced. Unknown ids leave
    /// the table unchanged.
    pub fn update_value(&self, category: Category, id: MappingKey, value: impl Into<String>) -> Self {
        let mut table = self.clone();
        if let Some(entry) = table.tables.get_mut(category).get_mut(&id) {
            entry.value = value.into();
        }
        table
    }

    /// A copy of this table with `other` layered on top, see
    /// [`MutableMappingTable::merge`].
    pub fn merge(&self, other: &MappingTable, overwrite: bool) -> Self {
        let mut table = self.clone();
        table.tables.merge(&other.tables, overwrite);
        table
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        Category::ALL
            .into_iter()
            .all(|category| self.tables.get(category).is_empty())
    }

    /// Same ids with the same values in every category. Entry order and names
    /// are not compared.
    pub fn content_equals(&self, other: &MappingTable) -> bool {
        self.tables.content_equals(&other.tables)
    }
}

impl PartialEq for MappingTable {
    fn eq(&self, other: &Self) -> bool {
        self.content_equals(other)
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a MappingTableValue;
    type IntoIter = Box<dyn Iterator<Item = &'a MappingTableValue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
