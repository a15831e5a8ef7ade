use std::borrow::Cow;
use std::ops::{Deref, DerefMut};

use crate::de::{Deserialize, Visitor};
use crate::error::Result;
use crate::ser::{Fragment, Serialize};
use crate::Place;

/// Raw byte sequence, (de)serialized as a binary element with the generic
/// subtype.
///
/// `Vec<u8>` is a sequence of `u8` and is rejected, wrap it in `Bytes` to get
/// a binary element instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Bytes(Vec::new())
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Bytes(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Bytes(v.to_vec())
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(b: Bytes) -> Self {
        b.0
    }
}

impl Serialize for Bytes {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::Bin(Cow::Borrowed(&self.0)))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<Bytes> {
            fn expecting(&self) -> &'static str {
                "Bytes"
            }

            fn binary(&mut self, b: &'de [u8]) -> Result<()> {
                self.out = Some(Bytes(b.to_vec()));
                Ok(())
            }
        }
        Place::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bson::ElementType;
    use crate::ser::classify;

    #[test]
    fn classified_as_binary() {
        let b = Bytes::from(&[1u8, 2, 3][..]);
        assert_eq!(classify(&b).unwrap(), ElementType::Binary);
        assert_eq!(
            classify(&b.clone().into_inner()).unwrap(),
            ElementType::Array
        );
        assert_eq!(b.len(), 3);
    }
}
