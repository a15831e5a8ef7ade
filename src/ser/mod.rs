//! Serialization traits.
//!
//! Serialization in bsonette works by asking a value for a [`Fragment`]: a
//! scalar already converted to its wire representation, or a stream over the
//! entries of a map, struct or sequence. The fragment a value returns is its
//! classification, see [`classify`].
//!
//! ## Serializing a primitive
//!
//! ```rust
//! use bsonette::ser::{Fragment, Serialize};
//!
//! // The data structure that we want to serialize as a primitive.
//! struct MyBoolean(bool);
//!
//! impl Serialize for MyBoolean {
//!     fn begin(&self) -> bsonette::Result<Fragment> {
//!         Ok(Fragment::Bool(self.0))
//!     }
//! }
//! ```
//!
//! ## Serializing a map or struct
//!
//! This code demonstrates what is generated for structs by
//! `#[derive(Serialize)]`.
//!
//! ```rust
//! use bsonette::ser::{Fields, Fragment, Serialize};
//!
//! // The struct that we would like to serialize.
//! struct Demo {
//!     code: i32,
//!     message: String,
//! }
//!
//! impl Serialize for Demo {
//!     fn begin(&self) -> bsonette::Result<Fragment> {
//!         let mut fields = Fields::with_capacity(2);
//!         fields.field("code", &self.code);
//!         fields.field("message", &self.message);
//!         Ok(Fragment::Map(Box::new(fields)))
//!     }
//! }
//! ```

mod impls;

use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::bson::ElementType;
use crate::error::Result;

pub use self::impls::Key;

/// Trait for data structures that can be serialized to BSON.
///
/// [Refer to the module documentation for examples.][crate::ser]
pub trait Serialize {
    /// Classifies `self` and exposes its content.
    ///
    /// Values without a wire representation fail here with
    /// `ErrorKind::UnsupportedType`, a `None` behind an `Option` fails with
    /// `ErrorKind::NullValue`.
    fn begin(&self) -> Result<Fragment>;
}

/// One value decomposed into its wire representation.
pub enum Fragment<'a> {
    Double(f64),
    Str(Cow<'a, str>),
    Bin(Cow<'a, [u8]>),
    Bool(bool),
    DateTime(DateTime<Utc>),
    I32(i32),
    I64(i64),
    /// Sequence like, written as an array
    Seq(Box<dyn Seq<'a> + 'a>),
    /// Map or struct like, written as a document
    Map(Box<dyn Map<'a> + 'a>),
}

impl<'a> Fragment<'a> {
    pub fn element_type(&self) -> ElementType {
        match self {
            Fragment::Double(_) => ElementType::Double,
            Fragment::Str(_) => ElementType::String,
            Fragment::Bin(_) => ElementType::Binary,
            Fragment::Bool(_) => ElementType::Boolean,
            Fragment::DateTime(_) => ElementType::DateTime,
            Fragment::I32(_) => ElementType::Int32,
            Fragment::I64(_) => ElementType::Int64,
            Fragment::Seq(_) => ElementType::Array,
            Fragment::Map(_) => ElementType::Document,
        }
    }
}

/// Trait that can iterate elements of a sequence.
pub trait Seq<'a> {
    fn next(&mut self) -> Option<&'a dyn Serialize>;
}

/// Trait that can iterate key-value entries of a map or struct.
///
/// Entries may come in any order, the encoder sorts them.
pub trait Map<'a> {
    fn next(&mut self) -> Result<Option<(Cow<'a, str>, &'a dyn Serialize)>>;
}

/// Element type `value` would be written as.
///
/// ```rust
/// use bsonette::ser::classify;
/// use bsonette::ElementType;
///
/// assert_eq!(classify(&5i32).unwrap(), ElementType::Int32);
/// assert_eq!(classify(&Some(5i64)).unwrap(), ElementType::Int64);
/// assert_eq!(classify(&vec![1.0f64]).unwrap(), ElementType::Array);
/// assert!(classify(&5u32).is_err());
/// assert!(classify(&None::<i32>).is_err());
/// ```
pub fn classify(value: &dyn Serialize) -> Result<ElementType> {
    value.begin().map(|fragment| fragment.element_type())
}

/// Named fields of a struct, in declaration order.
///
/// Used by `#[derive(Serialize)]`.
pub struct Fields<'a> {
    entries: Vec<(&'a str, &'a dyn Serialize)>,
    pos: usize,
}

impl<'a> Fields<'a> {
    pub fn with_capacity(cap: usize) -> Self {
        Fields {
            entries: Vec::with_capacity(cap),
            pos: 0,
        }
    }

    pub fn field(&mut self, name: &'a str, value: &'a dyn Serialize) {
        self.entries.push((name, value));
    }
}

impl<'a> Map<'a> for Fields<'a> {
    fn next(&mut self) -> Result<Option<(Cow<'a, str>, &'a dyn Serialize)>> {
        match self.entries.get(self.pos) {
            Some(&(k, v)) => {
                self.pos += 1;
                Ok(Some((Cow::Borrowed(k), v)))
            }
            None => Ok(None),
        }
    }
}
