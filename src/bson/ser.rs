use std::borrow::Cow;
use std::convert::TryFrom;

use crate::bson::{BINARY_SUBTYPE, MAX_SIZE};
use crate::buffer::Buffer;
use crate::error::{Error, Result};
use crate::ser::{Fragment, Map, Seq, Serialize};

/// Serialize any serializable map or struct into a BSON byte vec.
///
/// Document keys are written in ascending byte order, so equal inputs always
/// produce identical bytes regardless of map iteration order.
///
/// ```rust
/// use bsonette::{bson, Serialize};
///
/// #[derive(Serialize, Debug)]
/// struct Example {
///     code: i32,
///     message: String,
/// }
///
/// fn main() -> bsonette::Result<()> {
///     let example = Example {
///         code: 200,
///         message: "reminiscent of Serde".to_owned(),
///     };
///
///     let b = bson::to_bin(&example)?;
///     assert_eq!(&b[..4], &(b.len() as i32).to_le_bytes()[..]);
///     Ok(())
/// }
/// ```
pub fn to_bin<T: ?Sized + Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut out = Buffer::with_capacity(128);
    match value.begin()? {
        Fragment::Map(map) => write_document(&mut out, map)?,
        Fragment::Seq(_) => return Err(Error::array_at_top_level()),
        other => {
            return Err(Error::unsupported_top_level_type(
                other.element_type().name(),
            ))
        }
    }
    Ok(out.into_vec())
}

// Reserves the length prefix and returns its position
fn begin_document(out: &mut Buffer) -> usize {
    let start = out.len();
    out.write_i32(0);
    start
}

// Writes the terminator then back-patches the length prefix at `start`
fn end_document(out: &mut Buffer, start: usize) -> Result<()> {
    out.write_u8(0x00);
    let size = out.len() - start;
    let size = i32::try_from(size).map_err(|_| Error::size_overflow(size))?;
    out.patch_i32(start, size);
    Ok(())
}

fn write_document<'a>(out: &mut Buffer, mut map: Box<dyn Map<'a> + 'a>) -> Result<()> {
    let mut entries: Vec<(Cow<'a, str>, &'a dyn Serialize)> = vec![];
    while let Some(entry) = map.next()? {
        entries.push(entry);
    }

    if let Some((key, _)) = entries.iter().find(|(key, _)| key.contains('\0')) {
        return Err(Error::invalid_key(key));
    }

    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    let start = begin_document(out);
    for (key, value) in &entries {
        write_element(out, key, *value).map_err(|e| e.in_field(key))?;
    }
    end_document(out, start)
}

fn write_array<'a>(out: &mut Buffer, mut seq: Box<dyn Seq<'a> + 'a>) -> Result<()> {
    let start = begin_document(out);
    let mut key = itoa::Buffer::new();
    let mut index = 0usize;
    while let Some(value) = seq.next() {
        let name = key.format(index);
        write_element(out, name, value).map_err(|e| e.in_field(name))?;
        index += 1;
    }
    end_document(out, start)
}

fn write_element(out: &mut Buffer, key: &str, value: &dyn Serialize) -> Result<()> {
    let fragment = value.begin()?;

    out.write_u8(fragment.element_type() as u8);
    out.write_cstring(key);

    match fragment {
        Fragment::Double(n) => out.write_f64(n),
        Fragment::Str(s) => {
            let size = s.len() + 1;
            if size > MAX_SIZE {
                return Err(Error::size_overflow(s.len()));
            }
            out.write_i32(size as i32);
            out.extend_from_slice(s.as_bytes());
            out.write_u8(0x00);
        }
        Fragment::Bin(b) => {
            if b.len() > MAX_SIZE {
                return Err(Error::size_overflow(b.len()));
            }
            out.write_i32(b.len() as i32);
            out.write_u8(BINARY_SUBTYPE);
            out.extend_from_slice(&b);
        }
        Fragment::Bool(b) => out.write_u8(b as u8),
        Fragment::DateTime(dt) => out.write_i64(dt.timestamp_millis()),
        Fragment::I32(n) => out.write_i32(n),
        Fragment::I64(n) => out.write_i64(n),
        Fragment::Seq(seq) => write_array(out, seq)?,
        Fragment::Map(map) => write_document(out, map)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn empty_document() {
        let map: BTreeMap<String, i32> = BTreeMap::new();
        assert_eq!(to_bin(&map).unwrap(), vec![5, 0, 0, 0, 0]);
    }

    #[test]
    fn int32_element() {
        let mut map = BTreeMap::new();
        map.insert("a", 1i32);
        assert_eq!(
            to_bin(&map).unwrap(),
            vec![0x0c, 0, 0, 0, 0x10, b'a', 0, 1, 0, 0, 0, 0]
        );
    }

    #[test]
    fn array_keys_follow_index_order() {
        let mut map = BTreeMap::new();
        map.insert("v", (0..11).collect::<Vec<i32>>());
        let b = to_bin(&map).unwrap();
        // "10" comes after "9" even though it sorts before it byte-wise
        let nine = b.windows(3).position(|w| w == [0x10, b'9', 0]).unwrap();
        let ten = b.windows(4).position(|w| w == [0x10, b'1', b'0', 0]).unwrap();
        assert!(nine < ten);
    }
}
