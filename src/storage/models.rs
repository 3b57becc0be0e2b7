//! Storage record models for the persistence layer.
//!
//! [`ItemRecord`] is the on-disk shape of an item. It is kept separate from the
//! domain [`Item`] so the wire names (`isFavorite`) and legacy defaults stay a
//! storage concern.

use crate::domain::error::Result;
use crate::domain::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// One element of the persisted JSON array.
///
/// ```json
/// {"id": 1718000000000, "text": "buy milk", "completed": false, "isFavorite": true}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: ItemId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,

    /// Absent in data written before favorites existed.
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            text: item.text.clone(),
            completed: item.completed,
            is_favorite: item.is_favorite,
        }
    }
}

impl From<ItemRecord> for Item {
    fn from(record: ItemRecord) -> Self {
        Self {
            id: record.id,
            text: record.text,
            completed: record.completed,
            is_favorite: record.is_favorite,
        }
    }
}

/// Serializes items, in order, to the persisted blob.
///
/// # Errors
///
/// Returns [`TodoError::Serde`](crate::domain::TodoError::Serde) if JSON
/// serialization fails.
pub fn encode_items(items: &[Item]) -> Result<String> {
    let records: Vec<ItemRecord> = items.iter().map(ItemRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Parses the persisted blob back into items, preserving order.
///
/// # Errors
///
/// Returns [`TodoError::Serde`](crate::domain::TodoError::Serde) if the blob is
/// not a JSON array of item records.
pub fn decode_items(blob: &str) -> Result<Vec<Item>> {
    let records: Vec<ItemRecord> = serde_json::from_str(blob)?;
    Ok(records.into_iter().map(Item::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn round_trip_preserves_order_and_flags() {
        let mut first = Item::new(ItemId::new(3), "wash dishes");
        first.is_favorite = true;
        let mut second = Item::new(ItemId::new(1), "buy milk");
        second.completed = true;
        let items = vec![first, second];

        let blob = encode_items(&items).expect("encode");
        assert_eq!(decode_items(&blob).expect("decode"), items);
    }

    #[test]
    fn uses_camel_case_favorite_key() {
        let blob = encode_items(&[Item::new(ItemId::new(5), "x")]).expect("encode");
        assert_eq!(
            blob,
            r#"[{"id":5,"text":"x","completed":false,"isFavorite":false}]"#
        );
    }

    #[test]
    fn legacy_records_default_favorite_to_false() {
        let items = decode_items(r#"[{"id":1,"text":"old","completed":true}]"#).expect("decode");
        assert_eq!(items.len(), 1);
        assert!(items[0].completed);
        assert!(!items[0].is_favorite);
    }

    #[test]
    fn non_array_blob_is_rejected() {
        assert!(matches!(
            decode_items(r#"{"todos":[]}"#),
            Err(crate::domain::TodoError::Serde(_))
        ));
        assert!(decode_items("not json").is_err());
    }
}
