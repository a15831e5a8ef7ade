//! Dynamic representation of any supported BSON element.
//!
//! Used when no static target type is known, decoding into [`Value`] accepts
//! every supported element type.
//!
//! ```rust
//! use bsonette::{bson, Document, Value};
//!
//! let mut doc = Document::new();
//! doc.insert("BSON".to_owned(), Value::from(vec![
//!     Value::from("awesome"),
//!     Value::from(5.05),
//!     Value::from(1986),
//! ]));
//!
//! let b = bson::to_bin(&doc).unwrap();
//! let out: Document = bson::from_bin(&b).unwrap();
//! assert_eq!(out, doc);
//! assert_eq!(out["BSON"].as_array().map(|a| a.len()), Some(3));
//! ```

mod array;
mod document;

pub use self::array::Array;
pub use self::document::Document;

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::bson::ElementType;
use crate::bytes::Bytes;
use crate::de::{Deserialize, Map, Seq, Shape, Visitor};
use crate::error::Result;
use crate::ser::{Fragment, Serialize};
use crate::Place;

/// Any supported BSON element.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Double(f64),
    String(String),
    Binary(Vec<u8>),
    Boolean(bool),
    /// Millisecond resolution
    DateTime(DateTime<Utc>),
    Int32(i32),
    Int64(i64),
    Document(Document),
    Array(Array),
}

/// An empty document.
impl Default for Value {
    fn default() -> Self {
        Value::Document(Document::new())
    }
}

impl Value {
    pub fn element_type(&self) -> ElementType {
        match self {
            Value::Double(_) => ElementType::Double,
            Value::String(_) => ElementType::String,
            Value::Binary(_) => ElementType::Binary,
            Value::Boolean(_) => ElementType::Boolean,
            Value::DateTime(_) => ElementType::DateTime,
            Value::Int32(_) => ElementType::Int32,
            Value::Int64(_) => ElementType::Int64,
            Value::Document(_) => ElementType::Document,
            Value::Array(_) => ElementType::Array,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&[u8]> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    /// Either integer width, int32 widened.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(n) => Some(*n as i64),
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Element named `key` when `self` is a document.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_document().and_then(|doc| doc.get(key))
    }
}

macro_rules! from_impl {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

from_impl!(
    f64 => Double,
    String => String,
    &str => String,
    Cow<'_, str> => String,
    Bytes => Binary,
    bool => Boolean,
    DateTime<Utc> => DateTime,
    i32 => Int32,
    i64 => Int64,
    Document => Document,
    Array => Array
);

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Array::from(v))
    }
}

impl Serialize for Value {
    fn begin(&self) -> Result<Fragment> {
        match self {
            Value::Double(n) => Ok(Fragment::Double(*n)),
            Value::String(s) => Ok(Fragment::Str(Cow::Borrowed(s))),
            Value::Binary(b) => Ok(Fragment::Bin(Cow::Borrowed(b))),
            Value::Boolean(b) => Ok(Fragment::Bool(*b)),
            Value::DateTime(dt) => Ok(Fragment::DateTime(*dt)),
            Value::Int32(n) => Ok(Fragment::I32(*n)),
            Value::Int64(n) => Ok(Fragment::I64(*n)),
            Value::Document(doc) => doc.begin(),
            Value::Array(array) => array.begin(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<Value> {
            fn double(&mut self, n: f64) -> Result<()> {
                self.out = Some(Value::Double(n));
                Ok(())
            }

            fn string(&mut self, s: &'de str) -> Result<()> {
                self.out = Some(Value::String(s.to_owned()));
                Ok(())
            }

            fn binary(&mut self, b: &'de [u8]) -> Result<()> {
                self.out = Some(Value::Binary(b.to_vec()));
                Ok(())
            }

            fn boolean(&mut self, b: bool) -> Result<()> {
                self.out = Some(Value::Boolean(b));
                Ok(())
            }

            fn datetime(&mut self, dt: DateTime<Utc>) -> Result<()> {
                self.out = Some(Value::DateTime(dt));
                Ok(())
            }

            fn int32(&mut self, n: i32) -> Result<()> {
                self.out = Some(Value::Int32(n));
                Ok(())
            }

            fn int64(&mut self, n: i64) -> Result<()> {
                self.out = Some(Value::Int64(n));
                Ok(())
            }

            fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
                let mut doc = None;
                <Document as Deserialize>::begin(&mut doc).document(m)?;
                self.out = doc.map(Value::Document);
                Ok(())
            }

            fn array(&mut self, s: &mut dyn Seq<'de>) -> Result<()> {
                let mut array = None;
                <Array as Deserialize>::begin(&mut array).array(s)?;
                self.out = array.map(Value::Array);
                Ok(())
            }
        }
        Place::new(out)
    }

    fn shape() -> Shape {
        Shape::Dynamic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let v = Value::from(1986);
        assert_eq!(v.element_type(), ElementType::Int32);
        assert_eq!(v.as_i32(), Some(1986));
        assert_eq!(v.as_i64(), Some(1986));
        assert_eq!(v.as_f64(), None);

        let v = Value::from("awesome");
        assert_eq!(v.as_str(), Some("awesome"));
        assert_eq!(v.get("x"), None);

        let v = Value::from(Bytes::from(vec![1, 2]));
        assert_eq!(v.as_binary(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn nested_get() {
        let mut doc = Document::new();
        doc.insert("a".to_owned(), Value::from(true));
        let v = Value::from(doc);
        assert_eq!(v.get("a").and_then(Value::as_bool), Some(true));
        assert!(Value::default().as_document().unwrap().is_empty());
    }
}
