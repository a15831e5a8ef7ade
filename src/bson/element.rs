use std::fmt::{self, Display};

/// Binary subtype written for every binary element (generic binary data).
pub const BINARY_SUBTYPE: u8 = 0x00;

/// Largest encodable document, string or binary body.
pub const MAX_SIZE: usize = i32::MAX as usize;

/// Deepest nesting of documents and arrays accepted by the decoder, the top
/// level document included.
pub const MAX_DEPTH: usize = 100;

/// Wire element type tag.
///
/// Every tag defined by the BSON format is listed so decoding can name it in
/// errors, but only the ones for which [`ElementType::is_supported`] holds are
/// ever written or accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementType {
    /// Document terminator
    Done = 0x00,
    Double = 0x01,
    String = 0x02,
    Document = 0x03,
    Array = 0x04,
    Binary = 0x05,
    Undefined = 0x06,
    ObjectId = 0x07,
    Boolean = 0x08,
    DateTime = 0x09,
    Null = 0x0A,
    Regex = 0x0B,
    DbPointer = 0x0C,
    JavaScript = 0x0D,
    Symbol = 0x0E,
    JavaScriptWithScope = 0x0F,
    Int32 = 0x10,
    Timestamp = 0x11,
    Int64 = 0x12,
    Decimal128 = 0x13,
    MaxKey = 0x7F,
    MinKey = 0xFF,
}

impl ElementType {
    pub fn from_u8(tag: u8) -> Option<Self> {
        use ElementType::*;
        let ty = match tag {
            0x00 => Done,
            0x01 => Double,
            0x02 => String,
            0x03 => Document,
            0x04 => Array,
            0x05 => Binary,
            0x06 => Undefined,
            0x07 => ObjectId,
            0x08 => Boolean,
            0x09 => DateTime,
            0x0A => Null,
            0x0B => Regex,
            0x0C => DbPointer,
            0x0D => JavaScript,
            0x0E => Symbol,
            0x0F => JavaScriptWithScope,
            0x10 => Int32,
            0x11 => Timestamp,
            0x12 => Int64,
            0x13 => Decimal128,
            0x7F => MaxKey,
            0xFF => MinKey,
            _ => return None,
        };
        Some(ty)
    }

    /// Tags this crate reads and writes. The terminator is not an element.
    pub fn is_supported(self) -> bool {
        use ElementType::*;
        match self {
            Double | String | Document | Array | Binary | Boolean | DateTime | Int32 | Int64 => {
                true
            }
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        use ElementType::*;
        match self {
            Done => "end of document",
            Double => "double",
            String => "string",
            Document => "document",
            Array => "array",
            Binary => "binary",
            Undefined => "undefined",
            ObjectId => "object id",
            Boolean => "boolean",
            DateTime => "utc datetime",
            Null => "null",
            Regex => "regex",
            DbPointer => "db pointer",
            JavaScript => "javascript code",
            Symbol => "symbol",
            JavaScriptWithScope => "javascript code with scope",
            Int32 => "int32",
            Timestamp => "timestamp",
            Int64 => "int64",
            Decimal128 => "decimal128",
            MaxKey => "max key",
            MinKey => "min key",
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for tag in 0..=255u8 {
            if let Some(ty) = ElementType::from_u8(tag) {
                assert_eq!(ty as u8, tag);
            }
        }
    }

    #[test]
    fn supported_set() {
        let supported = (0..=255u8)
            .filter_map(ElementType::from_u8)
            .filter(|ty| ty.is_supported())
            .map(|ty| ty as u8)
            .collect::<Vec<_>>();
        assert_eq!(
            supported,
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x08, 0x09, 0x10, 0x12]
        );
        assert!(!ElementType::Done.is_supported());
    }

    #[test]
    fn unknown_tags() {
        assert_eq!(ElementType::from_u8(0x14), None);
        assert_eq!(ElementType::from_u8(0x80), None);
        assert_eq!(ElementType::from_u8(0x7F), Some(ElementType::MaxKey));
        assert_eq!(ElementType::from_u8(0xFF), Some(ElementType::MinKey));
    }
}
