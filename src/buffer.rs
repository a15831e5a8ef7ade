use paste::paste;

/// Growable byte buffer writing little endian primitives.
///
/// Documents are written front to back, their length prefix is reserved
/// first and filled in with [`Buffer::patch_i32`] once the body is known.
#[derive(Default)]
pub struct Buffer {
    inner: Vec<u8>,
}

impl Buffer {
    pub fn new() -> Self {
        Buffer { inner: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Buffer {
            inner: Vec::with_capacity(cap),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    pub fn extend_from_slice(&mut self, slice: &[u8]) {
        self.inner.extend_from_slice(slice);
    }

    /// Writes `s` followed by a `\0`, the caller must ensure `s` has no
    /// interior null byte.
    pub fn write_cstring(&mut self, s: &str) {
        self.inner.extend_from_slice(s.as_bytes());
        self.inner.push(0x00);
    }

    /// Overwrites 4 bytes starting at `index` with `value`.
    ///
    /// Panics if `index + 4` is past the end of the buffer.
    pub fn patch_i32(&mut self, index: usize, value: i32) {
        self.inner[index..index + 4].copy_from_slice(&value.to_le_bytes());
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.inner
    }
}

macro_rules! write_impl {
    ($($t:ident),*) => {
        impl Buffer {
            $(paste! {
                pub fn [<write_ $t>] (&mut self, value: $t) {
                    self.extend_from_slice(&value.to_le_bytes()[..]);
                }
            })*
        }
    };
}

write_impl!(u8, i32, i64, f64);
