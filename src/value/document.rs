use std::borrow::Cow;
use std::iter::FromIterator;
use std::ops::{Deref, DerefMut};

use indexmap::{map, IndexMap};

use crate::de::{Deserialize, Map, Shape, Visitor};
use crate::error::Result;
use crate::ser::{self, Fragment, Serialize};
use crate::value::Value;
use crate::Place;

/// String keyed map of [`Value`], keeps elements in insertion order.
///
/// Decoding preserves the order elements appear on the wire, encoding writes
/// them sorted by key like any other map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    inner: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Document {
            inner: IndexMap::new(),
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Document {
            inner: IndexMap::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.inner
    }
}

impl Deref for Document {
    type Target = IndexMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl From<IndexMap<String, Value>> for Document {
    fn from(inner: IndexMap<String, Value>) -> Self {
        Document { inner }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl Serialize for Document {
    fn begin(&self) -> Result<Fragment> {
        struct DocumentStream<'a>(map::Iter<'a, String, Value>);

        impl<'a> ser::Map<'a> for DocumentStream<'a> {
            fn next(&mut self) -> Result<Option<(Cow<'a, str>, &'a dyn Serialize)>> {
                Ok(self
                    .0
                    .next()
                    .map(|(k, v)| (Cow::Borrowed(k.as_str()), v as &dyn Serialize)))
            }
        }

        Ok(Fragment::Map(Box::new(DocumentStream(self.inner.iter()))))
    }
}

impl<'de> Deserialize<'de> for Document {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<Document> {
            fn expecting(&self) -> &'static str {
                "Document"
            }

            fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
                let mut doc = Document::new();
                let mut element = None;
                while let Some(k) = m.next()? {
                    m.visit(<Value as Deserialize>::begin(&mut element))?;
                    if let Some(e) = element.take() {
                        // Repeated keys keep their first position
                        doc.insert(k.to_owned(), e);
                    }
                }
                self.out = Some(doc);
                Ok(())
            }
        }
        Place::new(out)
    }

    fn shape() -> Shape {
        Shape::Map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order() {
        let doc: Document = vec![("b", 1i32), ("a", 2i32)].into_iter().collect();
        let keys = doc.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(doc["a"], Value::Int32(2));
    }
}
