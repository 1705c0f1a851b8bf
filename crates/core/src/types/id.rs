//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing catalog identifiers with free-form strings such as
//! product titles.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use go_marketplace_core::define_id;
/// define_id!(ProductId);
/// define_id!(CategoryId);
///
/// let product_id = ProductId::new("p-1");
/// let category_id = CategoryId::new("p-1");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = category_id;
/// # let _ = (product_id, category_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything convertible into a `String`.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(LineItemId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_value() {
        let id = LineItemId::new("sku-42");
        assert_eq!(id.to_string(), "sku-42");
        assert_eq!(id.as_str(), "sku-42");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = LineItemId::from("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");

        let parsed: LineItemId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_conversions() {
        let id: LineItemId = String::from("x").into();
        let raw: String = id.clone().into();
        assert_eq!(raw, "x");
        assert_eq!(id.into_inner(), "x");
    }
}
