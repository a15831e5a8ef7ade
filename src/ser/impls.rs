use std::borrow::Cow;
use std::collections::{btree_map, hash_map, BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use std::slice;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::ser::{Fragment, Map, Seq, Serialize};

impl Serialize for bool {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::Bool(*self))
    }
}

impl Serialize for str {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::Str(Cow::Borrowed(self)))
    }
}

impl Serialize for String {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::Str(Cow::Borrowed(self)))
    }
}

impl Serialize for f64 {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::Double(*self))
    }
}

impl Serialize for i32 {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::I32(*self))
    }
}

impl Serialize for i64 {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::I64(*self))
    }
}

impl Serialize for DateTime<Utc> {
    fn begin(&self) -> Result<Fragment> {
        Ok(Fragment::DateTime(*self))
    }
}

// No fixed wire type, rejected instead of silently widened or narrowed.
macro_rules! unsupported {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn begin(&self) -> Result<Fragment> {
                    Err(Error::unsupported_type(stringify!($ty)))
                }
            }
        )*
    };
}
unsupported!(u8, u16, u32, u64, u128, usize, i8, i16, i128, isize, f32, char, ());

impl<'a, T: ?Sized + Serialize> Serialize for &'a T {
    fn begin(&self) -> Result<Fragment> {
        (**self).begin()
    }
}

impl<'a, T: ?Sized + Serialize> Serialize for &'a mut T {
    fn begin(&self) -> Result<Fragment> {
        (**self).begin()
    }
}

impl<T: ?Sized + Serialize> Serialize for Box<T> {
    fn begin(&self) -> Result<Fragment> {
        (**self).begin()
    }
}

impl<T: ?Sized + Serialize> Serialize for Rc<T> {
    fn begin(&self) -> Result<Fragment> {
        (**self).begin()
    }
}

impl<T: ?Sized + Serialize> Serialize for Arc<T> {
    fn begin(&self) -> Result<Fragment> {
        (**self).begin()
    }
}

impl<T: Serialize> Serialize for Option<T> {
    fn begin(&self) -> Result<Fragment> {
        match self {
            Some(some) => some.begin(),
            None => Err(Error::null_value()),
        }
    }
}

impl<'a, T: ?Sized + ToOwned + Serialize> Serialize for Cow<'a, T> {
    fn begin(&self) -> Result<Fragment> {
        (**self).begin()
    }
}

impl<T: Serialize> Serialize for [T] {
    fn begin(&self) -> Result<Fragment> {
        Ok(stream_slice(self))
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    fn begin(&self) -> Result<Fragment> {
        Ok(stream_slice(self))
    }
}

/// Map keys, only string-like keys have a document representation.
pub trait Key {
    /// Rejects key types without a string representation. Called once per
    /// map, before any entry is read.
    fn check() -> Result<()> {
        Ok(())
    }

    fn to_key(&self) -> Result<Cow<str>>;
}

impl Key for str {
    fn to_key(&self) -> Result<Cow<str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl Key for String {
    fn to_key(&self) -> Result<Cow<str>> {
        Ok(Cow::Borrowed(self))
    }
}

impl<'a, T: ?Sized + Key> Key for &'a T {
    fn check() -> Result<()> {
        T::check()
    }

    fn to_key(&self) -> Result<Cow<str>> {
        (**self).to_key()
    }
}

impl<'a> Key for Cow<'a, str> {
    fn to_key(&self) -> Result<Cow<str>> {
        Ok(Cow::Borrowed(self))
    }
}

macro_rules! non_string_key {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                fn check() -> Result<()> {
                    Err(Error::non_string_map_key(stringify!($ty)))
                }

                fn to_key(&self) -> Result<Cow<str>> {
                    Err(Error::non_string_map_key(stringify!($ty)))
                }
            }
        )*
    };
}
non_string_key!(bool, char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl<K, V, H> Serialize for HashMap<K, V, H>
where
    K: Key + Hash + Eq,
    V: Serialize,
    H: BuildHasher,
{
    fn begin(&self) -> Result<Fragment> {
        struct HashMapStream<'a, K: 'a, V: 'a>(hash_map::Iter<'a, K, V>);

        impl<'a, K: Key, V: Serialize> Map<'a> for HashMapStream<'a, K, V> {
            fn next(&mut self) -> Result<Option<(Cow<'a, str>, &'a dyn Serialize)>> {
                match self.0.next() {
                    Some((k, v)) => Ok(Some((k.to_key()?, v as &dyn Serialize))),
                    None => Ok(None),
                }
            }
        }

        K::check()?;
        Ok(Fragment::Map(Box::new(HashMapStream(self.iter()))))
    }
}

impl<K: Key + Ord, V: Serialize> Serialize for BTreeMap<K, V> {
    fn begin(&self) -> Result<Fragment> {
        struct BTreeMapStream<'a, K: 'a, V: 'a>(btree_map::Iter<'a, K, V>);

        impl<'a, K: Key, V: Serialize> Map<'a> for BTreeMapStream<'a, K, V> {
            fn next(&mut self) -> Result<Option<(Cow<'a, str>, &'a dyn Serialize)>> {
                match self.0.next() {
                    Some((k, v)) => Ok(Some((k.to_key()?, v as &dyn Serialize))),
                    None => Ok(None),
                }
            }
        }

        K::check()?;
        Ok(Fragment::Map(Box::new(BTreeMapStream(self.iter()))))
    }
}

pub(crate) fn stream_slice<T: Serialize>(slice: &[T]) -> Fragment {
    struct SliceStream<'a, T: 'a>(slice::Iter<'a, T>);

    impl<'a, T: Serialize> Seq<'a> for SliceStream<'a, T> {
        fn next(&mut self) -> Option<&'a dyn Serialize> {
            let element = self.0.next()?;
            Some(element)
        }
    }

    Fragment::Seq(Box::new(SliceStream(slice.iter())))
}
