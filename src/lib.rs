//! Deterministic BSON encoding and schema-directed decoding.
//!
//! Values are written as BSON documents with their keys in ascending byte
//! order, so equal inputs always encode to identical bytes. Decoding is
//! driven by the target type: every element must match the declared type of
//! the field it lands in, and the input must be consumed exactly.
//!
//! # Struct
//!
//! ```rust
//! use bsonette::{bson, Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
//! struct Example<'a> {
//!     code: i32,
//!     #[bsonette(rename = "msg")]
//!     message: &'a str,
//!     #[bsonette(skip)]
//!     ignore: i32,
//! }
//!
//! fn main() -> bsonette::Result<()> {
//!     let example = Example {
//!         code: 200,
//!         message: "reminiscent of Serde",
//!         ignore: 7,
//!     };
//!
//!     let b = bson::to_bin(&example)?;
//!
//!     let out: Example = bson::from_bin(&b)?;
//!     assert_eq!(out.code, 200);
//!     assert_eq!(out.message, "reminiscent of Serde");
//!     assert_eq!(out.ignore, 0);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Enum
//!
//! Enums made of unit variants travel as strings.
//!
//! ```rust
//! use bsonette::{Serialize, Deserialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! enum Level {
//!     Low,
//!     #[bsonette(rename = "HIGH")]
//!     High,
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/bsonette/0.1.0")]
#![allow(clippy::needless_doctest_main)]

extern crate self as bsonette;

#[cfg(feature = "derive")]
#[doc(hidden)]
pub use bsonette_internal::*;

// Not public API.
#[doc(hidden)]
pub mod export;

#[macro_use]
mod place;

mod error;
mod ignore;

pub mod bson;
pub mod buffer;
pub mod bytes;
pub mod de;
pub mod ser;
pub mod value;

pub use crate::bson::{from_bin, from_bin_into, to_bin, ElementType};
pub use crate::bytes::Bytes;
#[doc(inline)]
pub use crate::de::Deserialize;
pub use crate::error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use crate::ser::Serialize;
pub use crate::value::{Array, Document, Value};

make_place!(Place);
