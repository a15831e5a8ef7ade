use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use chrono::{DateTime, Utc};

use crate::de::{Deserialize, Map, Seq, Shape, Visitor};
use crate::error::Result;
use crate::Place;

impl<'de> Deserialize<'de> for bool {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<bool> {
            fn expecting(&self) -> &'static str {
                "bool"
            }

            fn boolean(&mut self, b: bool) -> Result<()> {
                self.out = Some(b);
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'de> Deserialize<'de> for String {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<String> {
            fn expecting(&self) -> &'static str {
                "String"
            }

            fn string(&mut self, s: &str) -> Result<()> {
                self.out = Some(s.to_owned());
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'a, 'de: 'a> Deserialize<'de> for &'a str {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'a, 'de: 'a> Visitor<'de> for Place<&'a str> {
            fn expecting(&self) -> &'static str {
                "&str"
            }

            fn string(&mut self, s: &'de str) -> Result<()> {
                self.out = Some(s);
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'a, 'de: 'a> Deserialize<'de> for Cow<'a, str> {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'a, 'de: 'a> Visitor<'de> for Place<Cow<'a, str>> {
            fn expecting(&self) -> &'static str {
                "Cow<str>"
            }

            fn string(&mut self, s: &'de str) -> Result<()> {
                self.out = Some(Cow::Borrowed(s));
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'de> Deserialize<'de> for f64 {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<f64> {
            fn expecting(&self) -> &'static str {
                "f64"
            }

            fn double(&mut self, n: f64) -> Result<()> {
                self.out = Some(n);
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'de> Deserialize<'de> for i32 {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<i32> {
            fn expecting(&self) -> &'static str {
                "i32"
            }

            fn int32(&mut self, n: i32) -> Result<()> {
                self.out = Some(n);
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'de> Deserialize<'de> for i64 {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<i64> {
            fn expecting(&self) -> &'static str {
                "i64"
            }

            fn int64(&mut self, n: i64) -> Result<()> {
                self.out = Some(n);
                Ok(())
            }
        }
        Place::new(out)
    }
}

impl<'de> Deserialize<'de> for DateTime<Utc> {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de> Visitor<'de> for Place<DateTime<Utc>> {
            fn expecting(&self) -> &'static str {
                "DateTime<Utc>"
            }

            fn datetime(&mut self, dt: DateTime<Utc>) -> Result<()> {
                self.out = Some(dt);
                Ok(())
            }
        }
        Place::new(out)
    }
}

// Decodes through `T` then wraps the result
fn forward<'de, T, U, F>(out: &mut Option<U>, wrap: fn(T) -> U, f: F) -> Result<()>
where
    T: Deserialize<'de>,
    F: FnOnce(&mut dyn Visitor<'de>) -> Result<()>,
{
    let mut inner = None;
    f(T::begin(&mut inner))?;
    *out = inner.map(wrap);
    Ok(())
}

macro_rules! forward_visitor {
    ($de:lifetime, $wrap:expr) => {
        fn double(&mut self, n: f64) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.double(n))
        }

        fn string(&mut self, s: &$de str) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.string(s))
        }

        fn binary(&mut self, b: &$de [u8]) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.binary(b))
        }

        fn boolean(&mut self, b: bool) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.boolean(b))
        }

        fn datetime(&mut self, dt: DateTime<Utc>) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.datetime(dt))
        }

        fn int32(&mut self, n: i32) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.int32(n))
        }

        fn int64(&mut self, n: i64) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.int64(n))
        }

        fn document(&mut self, m: &mut dyn Map<$de>) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.document(m))
        }

        fn array(&mut self, s: &mut dyn Seq<$de>) -> Result<()> {
            forward(&mut self.out, $wrap, |v| v.array(s))
        }
    };
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Box<T> {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de, T: Deserialize<'de>> Visitor<'de> for Place<Box<T>> {
            forward_visitor!('de, Box::new);
        }
        Place::new(out)
    }

    fn shape() -> Shape {
        T::shape()
    }
}

// BSON null is never read, a present element is always `Some`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Option<T> {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de, T: Deserialize<'de>> Visitor<'de> for Place<Option<T>> {
            forward_visitor!('de, Some);
        }
        Place::new(out)
    }

    fn shape() -> Shape {
        T::shape()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Vec<T> {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de, T: Deserialize<'de>> Visitor<'de> for Place<Vec<T>> {
            fn expecting(&self) -> &'static str {
                "Vec"
            }

            fn array(&mut self, s: &mut dyn Seq<'de>) -> Result<()> {
                let mut vec = vec![];
                let mut element = None;
                while s.visit(Deserialize::begin(&mut element))? {
                    if let Some(e) = element.take() {
                        vec.push(e);
                    }
                }
                self.out = Some(vec);
                Ok(())
            }
        }

        Place::new(out)
    }

    fn shape() -> Shape {
        Shape::Seq
    }
}

impl<'de, V, H> Deserialize<'de> for HashMap<String, V, H>
where
    V: Deserialize<'de>,
    H: BuildHasher + Default,
{
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de, V, H> Visitor<'de> for Place<HashMap<String, V, H>>
        where
            V: Deserialize<'de>,
            H: BuildHasher + Default,
        {
            fn expecting(&self) -> &'static str {
                "HashMap"
            }

            fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
                let mut hashmap = HashMap::with_hasher(H::default());
                let mut element = None;
                while let Some(k) = m.next()? {
                    m.visit(Deserialize::begin(&mut element))?;
                    if let Some(e) = element.take() {
                        hashmap.insert(k.to_owned(), e);
                    }
                }
                self.out = Some(hashmap);
                Ok(())
            }
        }

        Place::new(out)
    }

    fn shape() -> Shape {
        Shape::Map
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for BTreeMap<String, V> {
    fn begin(out: &mut Option<Self>) -> &mut dyn Visitor<'de> {
        impl<'de, V: Deserialize<'de>> Visitor<'de> for Place<BTreeMap<String, V>> {
            fn expecting(&self) -> &'static str {
                "BTreeMap"
            }

            fn document(&mut self, m: &mut dyn Map<'de>) -> Result<()> {
                let mut btree = BTreeMap::new();
                let mut element = None;
                while let Some(k) = m.next()? {
                    m.visit(Deserialize::begin(&mut element))?;
                    if let Some(e) = element.take() {
                        btree.insert(k.to_owned(), e);
                    }
                }
                self.out = Some(btree);
                Ok(())
            }
        }

        Place::new(out)
    }

    fn shape() -> Shape {
        Shape::Map
    }
}
