//! BSON data format.
//!
//! Only documents travel at the top level. A document is a little endian
//! `i32` byte length, its elements and a `\x00` terminator, every element
//! being a type tag, a null terminated name and a payload. The map
//! `{"hello": "world"}` is serialized as:
//!
//! ```text
//! \x16\x00\x00\x00
//! \x02 hello\x00 \x06\x00\x00\x00 world\x00
//! \x00
//! ```

mod element;
pub use self::element::*;

mod ser;
pub use self::ser::*;

mod de;
pub use self::de::*;
