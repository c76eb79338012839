//! Decoded MAT values.
//!
//! [`DecodedValue`] is the fully materialized result of decoding a MAT
//! variable. It owns all of its data and keeps no link to the file it came
//! from.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A decoded MATLAB value.
///
/// Structs become [`Mapping`](DecodedValue::Mapping)s (field order
/// preserved), numeric arrays become nested
/// [`Sequence`](DecodedValue::Sequence)s or a bare
/// [`Scalar`](DecodedValue::Scalar), char arrays become
/// [`Text`](DecodedValue::Text), and cell arrays become sequences of
/// arbitrary values.
///
/// # Example
///
/// ```
/// use mat73_rs::DecodedValue;
///
/// let v = DecodedValue::from(vec![1.0, 2.0, 3.0]);
/// assert_eq!(v.len(), Some(3));
/// assert_eq!(v.index(1).and_then(DecodedValue::as_f64), Some(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// A single number.
    Scalar(f64),

    /// A character array.
    Text(String),

    /// An ordered list of values.
    Sequence(Vec<DecodedValue>),

    /// A struct: field name to value, in source order.
    Mapping(IndexMap<String, DecodedValue>),

    /// MATLAB's empty matrix `[]`.
    EmptyArray,
}

impl DecodedValue {
    /// Get the number if this is a scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DecodedValue::Scalar(x) => Some(*x),
            _ => None,
        }
    }

    /// Get the string if this is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DecodedValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the elements if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[DecodedValue]> {
        match self {
            DecodedValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Get the fields if this is a mapping.
    pub fn as_mapping(&self) -> Option<&IndexMap<String, DecodedValue>> {
        match self {
            DecodedValue::Mapping(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a field of a mapping.
    pub fn get(&self, field: &str) -> Option<&DecodedValue> {
        self.as_mapping()?.get(field)
    }

    /// Look up an element of a sequence.
    pub fn index(&self, i: usize) -> Option<&DecodedValue> {
        self.as_sequence()?.get(i)
    }

    /// Number of elements of a sequence or fields of a mapping.
    pub fn len(&self) -> Option<usize> {
        match self {
            DecodedValue::Sequence(items) => Some(items.len()),
            DecodedValue::Mapping(fields) => Some(fields.len()),
            _ => None,
        }
    }

    /// Check if this is MATLAB's empty matrix.
    pub fn is_empty_array(&self) -> bool {
        matches!(self, DecodedValue::EmptyArray)
    }

    /// Short name of the variant, for diagnostics and listings.
    pub fn kind_name(&self) -> &'static str {
        match self {
            DecodedValue::Scalar(_) => "scalar",
            DecodedValue::Text(_) => "text",
            DecodedValue::Sequence(_) => "sequence",
            DecodedValue::Mapping(_) => "mapping",
            DecodedValue::EmptyArray => "empty",
        }
    }
}

impl From<f64> for DecodedValue {
    fn from(x: f64) -> Self {
        DecodedValue::Scalar(x)
    }
}

impl From<&str> for DecodedValue {
    fn from(s: &str) -> Self {
        DecodedValue::Text(s.to_string())
    }
}

impl From<String> for DecodedValue {
    fn from(s: String) -> Self {
        DecodedValue::Text(s)
    }
}

impl From<Vec<f64>> for DecodedValue {
    fn from(values: Vec<f64>) -> Self {
        DecodedValue::Sequence(values.into_iter().map(DecodedValue::Scalar).collect())
    }
}

impl From<Vec<DecodedValue>> for DecodedValue {
    fn from(items: Vec<DecodedValue>) -> Self {
        DecodedValue::Sequence(items)
    }
}

impl From<IndexMap<String, DecodedValue>> for DecodedValue {
    fn from(fields: IndexMap<String, DecodedValue>) -> Self {
        DecodedValue::Mapping(fields)
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Scalar(x) => serializer.serialize_f64(*x),
            DecodedValue::Text(s) => serializer.serialize_str(s),
            DecodedValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DecodedValue::Mapping(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            DecodedValue::EmptyArray => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut fields = IndexMap::new();
        fields.insert("name".to_string(), DecodedValue::from("sensor"));
        fields.insert("gain".to_string(), DecodedValue::from(2.5));
        let v = DecodedValue::from(fields);

        assert_eq!(v.get("name").and_then(DecodedValue::as_str), Some("sensor"));
        assert_eq!(v.get("gain").and_then(DecodedValue::as_f64), Some(2.5));
        assert_eq!(v.len(), Some(2));
        assert!(v.get("missing").is_none());
        assert_eq!(v.kind_name(), "mapping");
    }

    #[test]
    fn test_serialize_json() {
        let mut fields = IndexMap::new();
        fields.insert("z".to_string(), DecodedValue::from(vec![1.0, 2.0]));
        fields.insert("a".to_string(), DecodedValue::EmptyArray);
        fields.insert("s".to_string(), DecodedValue::from("hi"));
        let v = DecodedValue::from(fields);

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"z":[1.0,2.0],"a":[],"s":"hi"}"#);
    }
}
