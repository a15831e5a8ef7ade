//! Deserialization traits.
//!
//! Deserialization in bsonette works by returning a "place" into which data
//! may be written through the methods of the `Visitor` trait object.
//!
//! Use the `make_place!` macro to acquire a "place" type. A library may use a
//! single place type across all of its Deserialize impls, or each impl or each
//! module may use a private place type. There is no difference.
//!
//! A place is simply:
//!
//! ```rust
//! struct Place<T> {
//!     out: Option<T>,
//! }
//! ```
//!
//! Upon successful deserialization the output object is written as `Some(T)`
//! into the `out` field of the place.
//!
//! Every `Visitor` method is one wire element type. The default
//! implementations fail with `ErrorKind::TypeMismatch`, so a type accepts
//! exactly the element types whose methods it overrides.
//!
//! ## Deserializing a primitive
//!
//! ```rust
//! use bsonette::{make_place, Result};
//! use bsonette::de::{Deserialize, Visitor};
//!
//! make_place!(Place);
//!
//! struct MyBoolean(bool);
//!
//! // We override the methods of the element types our Rust type supports
//! // deserializing from, and write the result into the `out` field of our
//! // output place.
//! //
//! // These methods may perform validation and decide to return an error.
//! impl<'de> Visitor<'de> for Place<MyBoolean> {
//!     fn expecting(&self) -> &'static str {
//!         "MyBoolean"
//!     }
//!
//!     fn boolean(&mut self, b: bool) -> Result<()> {
//!         self.out = Some(MyBoolean(b));
//!         Ok(())
//!     }
//! }
//!
//! impl<'de> Deserialize<'de> for MyBoolean {
//!     fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
//!         // All Deserialize impls will look exactly like this. There is no
//!         // other correct implementation of Deserialize.
//!         Place::new(out)
//!     }
//! }
//! ```
//!
//! ## Deserializing a sequence
//!
//! ```rust
//! use bsonette::{make_place, Result};
//! use bsonette::de::{Deserialize, Seq, Shape, Visitor};
//!
//! make_place!(Place);
//!
//! struct MyVec<T>(Vec<T>);
//!
//! impl<'de, T: Deserialize<'de>> Visitor<'de> for Place<MyVec<T>> {
//!     fn array(&mut self, s: &mut dyn Seq<'de>) -> Result<()> {
//!         let mut vec = vec![];
//!         let mut element = None;
//!         while s.visit(Deserialize::begin(&mut element))? {
//!             if let Some(e) = element.take() {
//!                 vec.push(e);
//!             }
//!         }
//!         self.out = Some(MyVec(vec));
//!         Ok(())
//!     }
//! }
//!
//! impl<'de, T: Deserialize<'de>> Deserialize<'de> for MyVec<T> {
//!     fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
//!         Place::new(out)
//!     }
//!
//!     fn shape() -> Shape {
//!         Shape::Seq
//!     }
//! }
//! ```
//!
//! ## Deserializing a map or struct
//!
//! This code demonstrates what is generated for structs by
//! `#[derive(Deserialize)]`. Fields missing from the input keep the value
//! they had before decoding.
//!
//! ```rust
//! use bsonette::{make_place, Error, Result};
//! use bsonette::de::{Deserialize, Map, Shape, Visitor};
//!
//! make_place!(Place);
//!
//! // The struct that we would like to deserialize.
//! #[derive(Default)]
//! struct Demo {
//!     code: i32,
//!     message: String,
//! }
//!
//! impl<'de> Visitor<'de> for Place<Demo> {
//!     fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
//!         let demo = self.out.get_or_insert_with(Demo::default);
//!         while let Some(k) = m.next()? {
//!             match k {
//!                 "code" => {
//!                     let mut code = None;
//!                     m.visit(Deserialize::begin(&mut code))?;
//!                     if let Some(code) = code {
//!                         demo.code = code;
//!                     }
//!                 }
//!                 "message" => {
//!                     let mut message = None;
//!                     m.visit(Deserialize::begin(&mut message))?;
//!                     if let Some(message) = message {
//!                         demo.message = message;
//!                     }
//!                 }
//!                 _ => return Err(Error::field_not_found(k)),
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! impl<'de> Deserialize<'de> for Demo {
//!     fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
//!         Place::new(out)
//!     }
//!
//!     fn shape() -> Shape {
//!         Shape::Struct
//!     }
//! }
//! ```

mod impls;

use chrono::{DateTime, Utc};

use crate::bson::ElementType;
use crate::error::{Error, Result};

/// Trait for data structures that can be deserialized from BSON.
///
/// [Refer to the module documentation for examples.][crate::de]
pub trait Deserialize<'de>: Sized {
    /// The only correct implementation of this method is:
    ///
    /// ```rust
    /// # use bsonette::make_place;
    /// # use bsonette::de::{Deserialize, Visitor};
    /// #
    /// # make_place!(Place);
    /// # struct S;
    /// # impl<'de> Visitor<'de> for Place<S> {}
    /// #
    /// # impl<'de> Deserialize<'de> for S {
    /// fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
    ///     Place::new(out)
    /// }
    /// # }
    /// ```
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de>;

    /// Target shape, only struct-like and map-like targets may be decoded
    /// from a top-level document.
    #[inline]
    fn shape() -> Shape {
        Shape::Scalar
    }
}

/// Caller-declared expectation for a decoded value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Named fields, set by name
    Struct,
    /// Uniform values keyed by string
    Map,
    /// Uniform elements, appended in read order
    Seq,
    /// Any supported element type
    Dynamic,
    Scalar,
}

/// Trait that can write data into an output place.
///
/// [Refer to the module documentation for examples.][crate::de]
pub trait Visitor<'de> {
    /// Name of the expected target, reported in type mismatch errors.
    fn expecting(&self) -> &'static str {
        "value"
    }

    fn double(&mut self, n: f64) -> Result<()> {
        let _ = n;
        Err(Error::type_mismatch(ElementType::Double, self.expecting()))
    }

    fn string(&mut self, s: &'de str) -> Result<()> {
        let _ = s;
        Err(Error::type_mismatch(ElementType::String, self.expecting()))
    }

    fn binary(&mut self, b: &'de [u8]) -> Result<()> {
        let _ = b;
        Err(Error::type_mismatch(ElementType::Binary, self.expecting()))
    }

    fn boolean(&mut self, b: bool) -> Result<()> {
        let _ = b;
        Err(Error::type_mismatch(ElementType::Boolean, self.expecting()))
    }

    fn datetime(&mut self, dt: DateTime<Utc>) -> Result<()> {
        let _ = dt;
        Err(Error::type_mismatch(ElementType::DateTime, self.expecting()))
    }

    fn int32(&mut self, n: i32) -> Result<()> {
        let _ = n;
        Err(Error::type_mismatch(ElementType::Int32, self.expecting()))
    }

    fn int64(&mut self, n: i64) -> Result<()> {
        let _ = n;
        Err(Error::type_mismatch(ElementType::Int64, self.expecting()))
    }

    fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
        let _ = m;
        Err(Error::type_mismatch(ElementType::Document, self.expecting()))
    }

    fn array(&mut self, s: &mut dyn Seq<'de>) -> Result<()> {
        let _ = s;
        Err(Error::type_mismatch(ElementType::Array, self.expecting()))
    }
}

/// Elements of an array, in read order.
pub trait Seq<'de> {
    /// Decodes the next element into `v`, returns `false` once the array is
    /// exhausted.
    fn visit(&mut self, v: &mut dyn Visitor<'de>) -> Result<bool>;
}

/// Named elements of a document.
///
/// An element returned by `next` and not visited is skipped.
pub trait Map<'de> {
    fn next(&mut self) -> Result<Option<&'de str>>;
    fn visit(&mut self, v: &mut dyn Visitor<'de>) -> Result<()>;
}
