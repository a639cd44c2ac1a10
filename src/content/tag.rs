//! Open string tags.
//!
//! Kinds and identifiers are plain strings on the wire and any consumer may
//! introduce new ones, so they are modeled as newtypes over a `Cow` rather
//! than closed enums. Well-known values are `const`s next to the type that
//! gives them meaning.

macro_rules! string_tag {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(std::borrow::Cow<'static, str>);

        impl $name {
            pub fn new(raw: impl Into<String>) -> Self {
                $name(std::borrow::Cow::Owned(raw.into()))
            }
            pub const fn from_static(raw: &'static str) -> Self {
                $name(std::borrow::Cow::Borrowed(raw))
            }
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::new(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
