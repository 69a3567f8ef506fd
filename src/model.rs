//! Item admission and the queue snapshot.
//!
//! Items are opaque to the queue: anything serde can turn into a structured
//! JSON value. A snapshot is the complete ordered contents of one queue and
//! is what the backing file stores, encoded as a single JSON array.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Serialize an item and check that it is admissible.
///
/// Bare scalars are rejected so that everything a queue holds round-trips
/// through the snapshot encoding with its structure intact.
pub(crate) fn encode_item<T: Serialize>(item: &T) -> Result<Value> {
    let value = serde_json::to_value(item).map_err(Error::Encode)?;
    match value {
        Value::Object(_) | Value::Array(_) => Ok(value),
        Value::Null => Err(Error::InvalidItem("null")),
        Value::Bool(_) => Err(Error::InvalidItem("boolean")),
        Value::Number(_) => Err(Error::InvalidItem("number")),
        Value::String(_) => Err(Error::InvalidItem("string")),
    }
}

/// Decode a stored item back into the caller's type.
pub(crate) fn decode_item<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(Error::Decode)
}

/// The complete state of a queue: encoded items in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Snapshot {
    items: VecDeque<Value>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Append an encoded item to the tail.
    pub fn push(&mut self, value: Value) {
        self.items.push_back(value);
    }

    /// Remove and return the head item, oldest first.
    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop_front()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Encode to the stored byte form.
    pub fn encode(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Write(e.into()))
    }

    /// Decode from stored bytes. Anything unparseable is a corrupt snapshot,
    /// including a zero-length file.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(Error::CorruptSnapshot)
    }

    /// The byte form a freshly created backing file is initialized with.
    pub fn empty_encoding() -> &'static [u8] {
        b"[]"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn objects_and_arrays_are_admitted() {
        assert!(encode_item(&json!({"task": "index"})).is_ok());
        assert!(encode_item(&json!(["a", "b"])).is_ok());
    }

    #[test]
    fn bare_scalars_are_rejected() {
        for (value, kind) in [
            (json!(null), "null"),
            (json!(true), "boolean"),
            (json!(42), "number"),
            (json!("job"), "string"),
        ] {
            match encode_item(&value) {
                Err(Error::InvalidItem(k)) => assert_eq!(k, kind),
                other => panic!("expected InvalidItem({kind}), got {other:?}"),
            }
        }
    }

    #[test]
    fn snapshot_roundtrips_in_order() {
        let mut snapshot = Snapshot::default();
        snapshot.push(json!({"id": 1}));
        snapshot.push(json!({"id": 2}));

        let restored = Snapshot::decode(&snapshot.encode().unwrap()).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn garbage_bytes_are_corrupt() {
        assert!(matches!(
            Snapshot::decode(b"not a snapshot {{{"),
            Err(Error::CorruptSnapshot(_))
        ));
        assert!(matches!(
            Snapshot::decode(b""),
            Err(Error::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn empty_encoding_decodes_to_empty_snapshot() {
        let snapshot = Snapshot::decode(Snapshot::empty_encoding()).unwrap();
        assert_eq!(snapshot.len(), 0);
    }
}
