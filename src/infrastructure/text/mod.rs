pub mod string_utils;

pub use string_utils::{
    escape_newlines, join, lstrip, rstrip, split, strip, unescape_newlines, WHITESPACE,
};
