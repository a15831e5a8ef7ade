pub use std::borrow::Cow;
pub use std::boxed::Box;
pub use std::default::Default;
pub use std::option::Option::{self, None, Some};
pub use std::result::Result::{Err, Ok};
pub use std::string::String;
pub use std::vec::Vec;

pub use self::help::Str as str;

mod help {
    pub type Str = str;
}
