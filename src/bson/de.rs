use chrono::{DateTime, TimeZone, Utc};
use paste::paste;
use std::mem;

use crate::bson::{ElementType, MAX_DEPTH};
use crate::de::{Deserialize, Map, Seq, Shape, Visitor};
use crate::error::{Error, Result};

/// Deserialize a BSON document into any deserializable map or struct.
///
/// ```rust
/// use bsonette::{bson, Deserialize};
///
/// #[derive(Deserialize, Debug, Default)]
/// struct Example {
///     code: i32,
///     message: String,
/// }
///
/// fn main() -> bsonette::Result<()> {
///     let b = b"\x31\x00\x00\x00\
///               \x10code\x00\xc8\x00\x00\x00\
///               \x02message\x00\x15\x00\x00\x00reminiscent of Serde\x00\
///               \x00";
///
///     let out: Example = bson::from_bin(b)?;
///     assert_eq!(out.code, 200);
///     assert_eq!(out.message, "reminiscent of Serde");
///
///     Ok(())
/// }
/// ```
pub fn from_bin<'de, T>(b: &'de [u8]) -> Result<T>
where
    T: Deserialize<'de> + Default,
{
    let mut out = T::default();
    from_bin_into(b, &mut out)?;
    Ok(out)
}

/// Deserialize a BSON document into an existing value.
///
/// Struct fields absent from the input keep their current value, maps and
/// sequences are replaced. The entire input must be a single document.
///
/// Decoding is not transactional. On failure the fields written before the
/// error keep their new values and every other part of `target` keeps its
/// prior value.
pub fn from_bin_into<'de, T>(b: &'de [u8], target: &mut T) -> Result<()>
where
    T: Deserialize<'de> + Default,
{
    match T::shape() {
        Shape::Struct | Shape::Map | Shape::Dynamic => {}
        Shape::Seq => return Err(Error::array_at_top_level()),
        Shape::Scalar => {
            return Err(Error::unsupported_top_level_type(
                std::any::type_name::<T>(),
            ))
        }
    }

    let mut out = Some(mem::take(target));
    let mut de = BsonDe::new(b);
    let result = de.document(T::begin(&mut out)).and_then(|()| de.end());

    if let Some(value) = out {
        *target = value;
    }
    result
}

struct BsonDe<'de> {
    input: &'de [u8],
    index: usize,
    /// Documents and arrays currently open
    depth: usize,
}

macro_rules! read_impl {
    ($($t:ident),*) => {
        $(paste! {
            fn [<read_ $t>] (&mut self) -> Result<$t> {
                let mut bytes = [0u8; mem::size_of::<$t>()];
                bytes.copy_from_slice(self.read_bytes(mem::size_of::<$t>())?);
                Ok($t::from_le_bytes(bytes))
            }
        })*
    };
}

/// Provides various functions to read bytes from the input and interpret
/// them as little endian primitives, every read is bounds checked.
impl<'de> BsonDe<'de> {
    fn new(input: &'de [u8]) -> Self {
        BsonDe {
            input,
            index: 0,
            depth: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.index
    }

    fn end(&self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(Error::trailing_bytes(n)),
        }
    }

    read_impl!(u8, i32, i64, f64);

    fn read_bytes(&mut self, len: usize) -> Result<&'de [u8]> {
        let input = self.input;
        let end = self
            .index
            .checked_add(len)
            .filter(|end| *end <= input.len())
            .ok_or_else(|| Error::truncated_input(len, self.remaining()))?;
        let bytes = &input[self.index..end];
        self.index = end;
        Ok(bytes)
    }

    fn read_utf8(bytes: &'de [u8]) -> Result<&'de str> {
        simdutf8::basic::from_utf8(bytes).map_err(|_| Error::invalid_utf8())
    }

    /// Element name, everything up to the next `\x00`.
    fn read_cstring(&mut self) -> Result<&'de str> {
        let input = self.input;
        let rest = &input[self.index..];
        let len = rest
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| Error::truncated_input(rest.len() + 1, rest.len()))?;
        let bytes = self.read_bytes(len)?;
        self.index += 1;
        Self::read_utf8(bytes)
    }

    fn read_string(&mut self) -> Result<&'de str> {
        let size = self.read_i32()?;
        if size < 1 {
            return Err(Error::invalid_length(size));
        }
        let bytes = self.read_bytes(size as usize - 1)?;
        match self.read_u8()? {
            0 => Self::read_utf8(bytes),
            byte => Err(Error::invalid_string_terminator(byte)),
        }
    }

    fn read_binary(&mut self) -> Result<&'de [u8]> {
        let size = self.read_i32()?;
        if size < 0 {
            return Err(Error::invalid_length(size));
        }
        // Subtype, always read as generic binary data
        self.read_u8()?;
        self.read_bytes(size as usize)
    }

    fn read_boolean(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(Error::invalid_boolean_byte(byte)),
        }
    }

    fn read_datetime(&mut self) -> Result<DateTime<Utc>> {
        let millis = self.read_i64()?;
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| Error::datetime_out_of_range(millis))
    }

    fn element(&mut self, ty: ElementType, v: &mut dyn Visitor<'de>) -> Result<()> {
        match ty {
            ElementType::Double => v.double(self.read_f64()?),
            ElementType::String => {
                let s = self.read_string()?;
                v.string(s)
            }
            ElementType::Document => self.document(v),
            ElementType::Array => self.array(v),
            ElementType::Binary => {
                let b = self.read_binary()?;
                v.binary(b)
            }
            ElementType::Boolean => v.boolean(self.read_boolean()?),
            ElementType::DateTime => v.datetime(self.read_datetime()?),
            ElementType::Int32 => v.int32(self.read_i32()?),
            ElementType::Int64 => v.int64(self.read_i64()?),
            _ => Err(Error::unsupported_tag(ty as u8)),
        }
    }

    fn begin_document(&mut self) -> Result<(usize, i32)> {
        let start = self.index;
        let declared = self.read_i32()?;
        // Length prefix and terminator
        if declared < 5 {
            return Err(Error::invalid_length(declared));
        }
        Ok((start, declared))
    }

    /// Runs `f` one nesting level deeper.
    fn nested<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if self.depth >= MAX_DEPTH {
            return Err(Error::depth_limit_exceeded(MAX_DEPTH));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn document(&mut self, v: &mut dyn Visitor<'de>) -> Result<()> {
        self.nested(|de| {
            let (start, declared) = de.begin_document()?;
            let mut access = Access::new(de, start, declared);
            v.document(&mut access)?;
            access.finish()
        })
    }

    fn array(&mut self, v: &mut dyn Visitor<'de>) -> Result<()> {
        self.nested(|de| {
            let (start, declared) = de.begin_document()?;
            let mut access = Access::new(de, start, declared);
            v.array(&mut access)?;
            access.finish()
        })
    }
}

/// Elements of one document or array being read.
struct Access<'a, 'de: 'a> {
    de: &'a mut BsonDe<'de>,
    start: usize,
    declared: i32,
    /// Element whose name was handed out but whose payload wasn't read yet
    pending: Option<(ElementType, &'de str)>,
    done: bool,
}

impl<'a, 'de> Access<'a, 'de> {
    fn new(de: &'a mut BsonDe<'de>, start: usize, declared: i32) -> Self {
        Access {
            de,
            start,
            declared,
            pending: None,
            done: false,
        }
    }

    /// Reads the next element header, `None` at the terminator.
    fn advance(&mut self) -> Result<Option<(ElementType, &'de str)>> {
        if self.done {
            return Ok(None);
        }

        let tag = self.de.read_u8()?;
        if tag == ElementType::Done as u8 {
            self.done = true;
            let consumed = self.de.index - self.start;
            if consumed != self.declared as usize {
                return Err(Error::length_mismatch(self.declared, consumed));
            }
            return Ok(None);
        }

        let name = self.de.read_cstring()?;
        match ElementType::from_u8(tag) {
            Some(ty) if ty.is_supported() => Ok(Some((ty, name))),
            _ => Err(Error::unsupported_tag(tag).in_field(name)),
        }
    }

    fn read(&mut self, ty: ElementType, name: &str, v: &mut dyn Visitor<'de>) -> Result<()> {
        self.de.element(ty, v).map_err(|e| e.in_field(name))
    }

    fn skip_pending(&mut self) -> Result<()> {
        match self.pending.take() {
            Some((ty, name)) => self.read(ty, name, <dyn Visitor>::ignore()),
            None => Ok(()),
        }
    }

    /// Skips whatever the visitor left unread, up to and including the
    /// terminator.
    fn finish(&mut self) -> Result<()> {
        self.skip_pending()?;
        while let Some((ty, name)) = self.advance()? {
            self.read(ty, name, <dyn Visitor>::ignore())?;
        }
        Ok(())
    }
}

impl<'a, 'de> Map<'de> for Access<'a, 'de> {
    fn next(&mut self) -> Result<Option<&'de str>> {
        self.skip_pending()?;
        match self.advance()? {
            Some((ty, name)) => {
                self.pending = Some((ty, name));
                Ok(Some(name))
            }
            None => Ok(None),
        }
    }

    fn visit(&mut self, v: &mut dyn Visitor<'de>) -> Result<()> {
        match self.pending.take() {
            Some((ty, name)) => self.read(ty, name, v),
            None => Err(Error::custom("no pending element to visit")),
        }
    }
}

impl<'a, 'de> Seq<'de> for Access<'a, 'de> {
    fn visit(&mut self, v: &mut dyn Visitor<'de>) -> Result<bool> {
        self.skip_pending()?;
        match self.advance()? {
            Some((ty, name)) => {
                self.read(ty, name, v)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn read_primitives() {
        let b = [
            0x2a, 0x00, 0x00, 0x00, //
            0xfb, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, //
            0x01,
        ];
        let mut de = BsonDe::new(&b);
        assert_eq!(de.read_i32().unwrap(), 42);
        assert_eq!(de.read_i64().unwrap(), -5);
        assert_eq!(de.read_boolean().unwrap(), true);
        assert!(de.end().is_ok());
    }

    #[test]
    fn read_past_end() {
        let b = [0x01, 0x02];
        let mut de = BsonDe::new(&b);
        let err = de.read_i32().unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::TruncatedInput {
                needed: 4,
                remaining: 2
            }
        );
    }

    #[test]
    fn read_strings() {
        let b = b"key\x00\x04\x00\x00\x00abc\x00";
        let mut de = BsonDe::new(b);
        assert_eq!(de.read_cstring().unwrap(), "key");
        assert_eq!(de.read_string().unwrap(), "abc");
        assert_eq!(de.remaining(), 0);

        let b = b"\x04\x00\x00\x00abcd";
        let err = BsonDe::new(b).read_string().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidStringTerminator(b'd'));

        let b = b"\x00\x00\x00\x00";
        let err = BsonDe::new(b).read_string().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidLength(0));
    }

    #[test]
    fn read_cstring_without_terminator() {
        let b = b"abc";
        let err = BsonDe::new(b).read_cstring().unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::TruncatedInput {
                needed: 4,
                remaining: 3
            }
        );
    }

    #[test]
    fn read_invalid_utf8() {
        let b = b"\x03\x00\x00\x00\xff\xfe\x00";
        let err = BsonDe::new(b).read_string().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidUtf8);
    }

    #[test]
    fn read_binary_skips_subtype() {
        let b = b"\x02\x00\x00\x00\x80\x01\x02";
        let mut de = BsonDe::new(b);
        assert_eq!(de.read_binary().unwrap(), &[1, 2][..]);
        assert_eq!(de.remaining(), 0);
    }

    #[test]
    fn read_bad_boolean() {
        let err = BsonDe::new(&[2u8]).read_boolean().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidBooleanByte(2));
    }

    // {"a": {"a": ... {} ... }} with `levels` documents in total
    fn nested_documents(levels: usize) -> Vec<u8> {
        let mut doc = Vec::with_capacity(8 * levels);
        for level in (2..=levels).rev() {
            let size = (5 + 8 * (level - 1)) as i32;
            doc.extend_from_slice(&size.to_le_bytes());
            doc.extend_from_slice(&[0x03, b'a', 0x00]);
        }
        doc.extend_from_slice(&[0x05, 0x00, 0x00, 0x00, 0x00]);
        doc.resize(doc.len() + levels - 1, 0x00);
        doc
    }

    #[test]
    fn nesting_depth_limit() {
        use crate::value::Value;

        let b = nested_documents(MAX_DEPTH);
        let value: Value = from_bin(&b).unwrap();
        let mut depth = 1;
        let mut cursor = &value;
        while let Some(inner) = cursor.get("a") {
            depth += 1;
            cursor = inner;
        }
        assert_eq!(depth, MAX_DEPTH);

        let b = nested_documents(MAX_DEPTH + 1);
        let err = from_bin::<Value>(&b).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(MAX_DEPTH));
        assert_eq!(err.path().len(), MAX_DEPTH);

        // Skipped elements count too
        let mut de = BsonDe::new(&b);
        let err = de.document(<dyn Visitor>::ignore()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(MAX_DEPTH));
        assert_eq!(de.depth, 0);
    }

    #[test]
    fn far_too_deep_input_fails_cleanly() {
        let b = nested_documents(200_000);
        let err = from_bin::<crate::value::Value>(&b).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DepthLimitExceeded(MAX_DEPTH));
    }

    #[test]
    fn read_datetime_range() {
        let b = 1_136_214_245_000i64.to_le_bytes();
        let dt = BsonDe::new(&b).read_datetime().unwrap();
        assert_eq!(dt.to_rfc3339(), "2006-01-02T15:04:05+00:00");

        let b = i64::MAX.to_le_bytes();
        let err = BsonDe::new(&b).read_datetime().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DateTimeOutOfRange(i64::MAX));
    }
}
