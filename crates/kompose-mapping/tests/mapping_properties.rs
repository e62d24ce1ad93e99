//! Property tests for ids, config round trips and merging.

use std::collections::HashMap;

use kompose_core::{Bindable, RenderError, Reference, Value};
use kompose_mapping::{create_id, Category, MappingTable, MappingTableValue, MutableMappingTable};
use proptest::prelude::*;

fn format(value: &Value) -> Result<String, RenderError> {
    Ok(match value {
        Value::Number(n) => format!("{n}.dp"),
        Value::String(s) => format!("\"{s}\""),
        Value::Color(c) => format!("Color(0x{})", c.to_argb_hex()),
        Value::Font(f) => format!("TextStyle(fontSize = {}.sp)", f.font_size),
    })
}

fn category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn entry() -> impl Strategy<Value = MappingTableValue> {
    (category(), "[a-zA-Z0-9/ _.\\-]{1,24}", "[ -~]{0,32}")
        .prop_map(|(category, name, value)| MappingTableValue::new(category, name, value))
}

fn table() -> impl Strategy<Value = MappingTable> {
    prop::collection::vec(entry(), 0..40).prop_map(MappingTable::from_entries)
}

proptest! {
    #[test]
    fn test_config_round_trip(table in table()) {
        let restored = MappingTable::from_config(&table.to_config()).unwrap();
        prop_assert!(restored.content_equals(&table));
    }

    #[test]
    fn test_equal_names_hash_equal(name in "\\PC{0,40}") {
        prop_assert_eq!(create_id(&name), create_id(&name.clone()));
    }

    #[test]
    fn test_merge_never_removes(base in table(), other in table(), overwrite in any::<bool>()) {
        let merged = base.merge(&other, overwrite);
        for entry in base.iter() {
            prop_assert!(merged.get(entry.table, entry.id).is_some());
        }
        for entry in other.iter() {
            let stored = merged.get(entry.table, entry.id).unwrap();
            if overwrite {
                prop_assert_eq!(&stored.value, &entry.value);
            } else if base.get(entry.table, entry.id).is_none() {
                prop_assert_eq!(&stored.value, &entry.value);
            }
        }
    }

    #[test]
    fn test_first_write_wins(name in "[a-z/]{1,16}", first in 1.0f64..100.0, second in 1.0f64..100.0) {
        let mut table = MutableMappingTable::new();
        let a = Bindable::Bound(Reference::new("V:a", name.clone(), first));
        let b = Bindable::Bound(Reference::new("V:b", name.clone(), second));

        table.add_reference(Category::Padding, Some(&a), &format).unwrap();
        let stored = table.add_reference(Category::Padding, Some(&b), &format).unwrap().unwrap();
        prop_assert_eq!(stored.value, format!("{first}.dp"));
        prop_assert_eq!(table.len(), 1);
    }
}

#[test]
fn test_no_collisions_among_generated_names() {
    let mut seen: HashMap<i32, String> = HashMap::new();
    let names = (0..4000)
        .map(|i| format!("palette/color-{i}"))
        .chain((0..4000).map(|i| format!("spacing/{i}")))
        .chain((0..4000).map(|i| format!("Token {i}")));

    for name in names {
        let id = create_id(&name);
        if let Some(previous) = seen.insert(id, name.clone()) {
            panic!("{name:?} collides with {previous:?}");
        }
    }
    assert_eq!(seen.len(), 12000);
}
