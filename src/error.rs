use std::fmt::{self, Display};

use crate::bson::ElementType;

/// Error type when serialization or deserialization fails.
///
/// Carries the kind of failure and the path of element names leading to it,
/// outermost first. `Display` renders it as `field {a}: field {b}: <kind>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    path: Vec<String>,
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorKind {
    /// Value kind without an element type mapping, or a wire tag that is
    /// recognized but not implemented.
    UnsupportedType(String),
    /// `None` behind an optional indirection, BSON null is not representable.
    NullValue,
    /// String, binary or document body longer than `i32::MAX` bytes.
    SizeOverflow(usize),
    /// Document key with an embedded `\0`.
    InvalidKey(String),
    /// Wire element type can't be decoded into the declared target.
    TypeMismatch {
        found: ElementType,
        expected: &'static str,
    },
    /// Struct target has no field with this name.
    FieldNotFound(String),
    /// Consumed bytes at the document terminator disagree with its length prefix.
    LengthMismatch { declared: i32, consumed: usize },
    /// Input ended before a read of `needed` bytes could complete.
    TruncatedInput { needed: usize, remaining: usize },
    /// Bytes left after the top level document.
    TrailingBytes(usize),
    InvalidStringTerminator(u8),
    InvalidBooleanByte(u8),
    /// Negative or undersized length prefix.
    InvalidLength(i32),
    InvalidUtf8,
    DateTimeOutOfRange(i64),
    /// Map keyed by something other than a string.
    NonStringMapKey(&'static str),
    ArrayAtTopLevel,
    UnsupportedTopLevelType(String),
    UnknownVariant(String),
    /// Documents and arrays nested deeper than the decoder allows.
    DepthLimitExceeded(usize),
    /// Free form error raised by a user defined `Visitor`.
    Message(String),
}

/// Result type returned by serialization and deserialization functions.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Error { kind, path: vec![] }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Element names from the outermost document down to the failing element.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Prefixes the error path with the enclosing element name.
    pub fn in_field(mut self, name: &str) -> Self {
        self.path.insert(0, name.to_owned());
        self
    }

    pub fn custom<T: Display>(msg: T) -> Self {
        Error::new(ErrorKind::Message(msg.to_string()))
    }

    pub(crate) fn unsupported_type<T: Into<String>>(what: T) -> Self {
        Error::new(ErrorKind::UnsupportedType(what.into()))
    }

    pub(crate) fn unsupported_tag(tag: u8) -> Self {
        match ElementType::from_u8(tag) {
            Some(ty) => Error::unsupported_type(format!("{} (0x{:02x})", ty, tag)),
            None => Error::unsupported_type(format!("unknown element type 0x{:02x}", tag)),
        }
    }

    pub(crate) fn null_value() -> Self {
        Error::new(ErrorKind::NullValue)
    }

    pub(crate) fn size_overflow(size: usize) -> Self {
        Error::new(ErrorKind::SizeOverflow(size))
    }

    pub(crate) fn invalid_key(key: &str) -> Self {
        Error::new(ErrorKind::InvalidKey(key.to_owned()))
    }

    pub fn type_mismatch(found: ElementType, expected: &'static str) -> Self {
        Error::new(ErrorKind::TypeMismatch { found, expected })
    }

    pub fn field_not_found(name: &str) -> Self {
        Error::new(ErrorKind::FieldNotFound(name.to_owned()))
    }

    pub(crate) fn length_mismatch(declared: i32, consumed: usize) -> Self {
        Error::new(ErrorKind::LengthMismatch { declared, consumed })
    }

    pub(crate) fn truncated_input(needed: usize, remaining: usize) -> Self {
        Error::new(ErrorKind::TruncatedInput { needed, remaining })
    }

    pub(crate) fn trailing_bytes(count: usize) -> Self {
        Error::new(ErrorKind::TrailingBytes(count))
    }

    pub(crate) fn invalid_string_terminator(byte: u8) -> Self {
        Error::new(ErrorKind::InvalidStringTerminator(byte))
    }

    pub(crate) fn invalid_boolean_byte(byte: u8) -> Self {
        Error::new(ErrorKind::InvalidBooleanByte(byte))
    }

    pub(crate) fn invalid_length(length: i32) -> Self {
        Error::new(ErrorKind::InvalidLength(length))
    }

    pub(crate) fn invalid_utf8() -> Self {
        Error::new(ErrorKind::InvalidUtf8)
    }

    pub(crate) fn datetime_out_of_range(millis: i64) -> Self {
        Error::new(ErrorKind::DateTimeOutOfRange(millis))
    }

    pub(crate) fn non_string_map_key(key_type: &'static str) -> Self {
        Error::new(ErrorKind::NonStringMapKey(key_type))
    }

    pub(crate) fn array_at_top_level() -> Self {
        Error::new(ErrorKind::ArrayAtTopLevel)
    }

    pub(crate) fn unsupported_top_level_type<T: Into<String>>(what: T) -> Self {
        Error::new(ErrorKind::UnsupportedTopLevelType(what.into()))
    }

    pub fn unknown_variant(variant: &str) -> Self {
        Error::new(ErrorKind::UnknownVariant(variant.to_owned()))
    }

    pub(crate) fn depth_limit_exceeded(limit: usize) -> Self {
        Error::new(ErrorKind::DepthLimitExceeded(limit))
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::UnsupportedType(what) => write!(f, "unsupported type {}", what),
            ErrorKind::NullValue => f.write_str("null values are not supported"),
            ErrorKind::SizeOverflow(size) => {
                write!(f, "size {} exceeds the maximum of {} bytes", size, i32::MAX)
            }
            ErrorKind::InvalidKey(key) => write!(f, "null bytes not allowed in keys ({:?})", key),
            ErrorKind::TypeMismatch { found, expected } => {
                write!(f, "cannot convert {} to {}", found, expected)
            }
            ErrorKind::FieldNotFound(name) => write!(f, "field {{{}}} not found", name),
            ErrorKind::LengthMismatch { declared, consumed } => write!(
                f,
                "expected size ({}) does not match actual size ({})",
                declared, consumed
            ),
            ErrorKind::TruncatedInput { needed, remaining } => write!(
                f,
                "unexpected end of input, needed {} bytes but {} remain",
                needed, remaining
            ),
            ErrorKind::TrailingBytes(count) => {
                write!(f, "{} trailing bytes after the document", count)
            }
            ErrorKind::InvalidStringTerminator(byte) => {
                write!(f, "expected string null terminator, found 0x{:02x}", byte)
            }
            ErrorKind::InvalidBooleanByte(byte) => {
                write!(f, "unexpected boolean value 0x{:02x}", byte)
            }
            ErrorKind::InvalidLength(length) => write!(f, "invalid length prefix {}", length),
            ErrorKind::InvalidUtf8 => f.write_str("invalid utf-8"),
            ErrorKind::DateTimeOutOfRange(millis) => {
                write!(f, "datetime {}ms is out of range", millis)
            }
            ErrorKind::NonStringMapKey(ty) => {
                write!(f, "only string keyed maps are supported, found {} keys", ty)
            }
            ErrorKind::ArrayAtTopLevel => {
                f.write_str("at the top-level, only maps and structs are supported")
            }
            ErrorKind::UnsupportedTopLevelType(what) => write!(
                f,
                "at the top-level, only maps and structs are supported, found {}",
                what
            ),
            ErrorKind::UnknownVariant(variant) => write!(f, "unknown variant {:?}", variant),
            ErrorKind::DepthLimitExceeded(limit) => {
                write!(f, "documents nested deeper than {} levels", limit)
            }
            ErrorKind::Message(msg) => f.write_str(msg),
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        for name in &self.path {
            write!(formatter, "field {{{}}}: ", name)?;
        }
        Display::fmt(&self.kind, formatter)
    }
}

impl std::error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}
