/// Declares a place type, the `out` slot a `Visitor` writes into.
///
/// Refer to the [`de`](crate::de) module documentation.
#[macro_export]
macro_rules! make_place {
    ($name:ident) => {
        #[repr(C)]
        struct $name<__T> {
            out: $crate::export::Option<__T>,
        }

        impl<__T> $name<__T> {
            fn new(out: &mut $crate::export::Option<__T>) -> &mut Self {
                // Same layout as the single `out` field.
                unsafe { &mut *(out as *mut $crate::export::Option<__T> as *mut $name<__T>) }
            }
        }
    };
}
