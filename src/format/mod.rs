//! Formatter profiles.
//!
//! - [`clang`]: C/C++ sources, and the invocation wrappers every profile uses
//! - [`proto`]: Protocol Buffer sources
//!
//! [`Profile`] maps a file extension to the profile that handles it.

pub mod clang;
pub mod proto;

use std::fmt;

pub use clang::{is_cpp_extension, CPP_EXTENSIONS};
pub use proto::PROTO_EXTENSION;

/// Which formatter profile handles an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Proto,
    Cpp,
}

impl Profile {
    /// Profile for an extension with leading dot, `None` if unsupported
    #[must_use]
    pub fn for_extension(extension: &str) -> Option<Self> {
        if extension == PROTO_EXTENSION {
            Some(Profile::Proto)
        } else if is_cpp_extension(extension) {
            Some(Profile::Cpp)
        } else {
            None
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profile::Proto => f.write_str("proto"),
            Profile::Cpp => f.write_str("cpp"),
        }
    }
}
