use std::iter::FromIterator;
use std::ops::{Deref, DerefMut};

use crate::de::{Deserialize, Seq, Shape, Visitor};
use crate::error::Result;
use crate::ser::{Fragment, Serialize};
use crate::value::Value;
use crate::Place;

/// Ordered sequence of [`Value`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Array {
    inner: Vec<Value>,
}

impl Array {
    pub fn new() -> Self {
        Array { inner: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<Value> {
        self.inner
    }
}

impl Deref for Array {
    type Target = Vec<Value>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<Vec<Value>> for Array {
    fn from(inner: Vec<Value>) -> Self {
        Array { inner }
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Array {
            inner: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl Serialize for Array {
    fn begin(&self) -> Result<Fragment> {
        self.inner.begin()
    }
}

impl<'de> Deserialize<'de> for Array {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<Array> {
            fn expecting(&self) -> &'static str {
                "Array"
            }

            fn array(&mut self, s: &mut dyn Seq<'de>) -> Result<()> {
                let mut array = Array::new();
                let mut element = None;
                while s.visit(<Value as Deserialize>::begin(&mut element))? {
                    if let Some(e) = element.take() {
                        array.push(e);
                    }
                }
                self.out = Some(array);
                Ok(())
            }
        }
        Place::new(out)
    }

    fn shape() -> Shape {
        Shape::Seq
    }
}
