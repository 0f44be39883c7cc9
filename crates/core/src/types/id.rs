//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i64` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_i64()`
/// - `From<i64>` and `Into<i64>` implementations
///
/// # Example
///
/// ```rust
/// # use dgency_core::define_id;
/// define_id!(ProductId);
/// define_id!(OrderId);
///
/// let product_id = ProductId::new(1);
/// let order_id = OrderId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = order_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(CategoryId);
define_id!(OrderId);
define_id!(CustomerId);
define_id!(MenuItemId);
define_id!(ShippingZoneId);

impl ProductId {
    /// Parse a stored product identifier, tolerating the legacy `p` prefix.
    ///
    /// Identifiers persisted by the retired static catalog were namespaced
    /// with a single leading `p` (`"p42"`). A single prefix character is
    /// stripped before parsing; the result is accepted only if it is a
    /// strictly positive base-10 integer.
    ///
    /// ```rust
    /// # use dgency_core::ProductId;
    /// assert_eq!(ProductId::parse_legacy("42"), Some(ProductId::new(42)));
    /// assert_eq!(ProductId::parse_legacy("p42"), Some(ProductId::new(42)));
    /// assert_eq!(ProductId::parse_legacy("pABC"), None);
    /// ```
    #[must_use]
    pub fn parse_legacy(raw: &str) -> Option<Self> {
        let stripped = raw.strip_prefix('p').unwrap_or(raw);
        let id = stripped.parse::<i64>().ok()?;
        (id > 0).then_some(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_numeric_form() {
        assert_eq!(ProductId::new(42).to_string(), "42");
    }

    #[test]
    fn test_parse_legacy_plain_numeric() {
        assert_eq!(ProductId::parse_legacy("123"), Some(ProductId::new(123)));
    }

    #[test]
    fn test_parse_legacy_strips_single_prefix() {
        assert_eq!(ProductId::parse_legacy("p123"), Some(ProductId::new(123)));
        // Only one prefix character is stripped
        assert_eq!(ProductId::parse_legacy("pp123"), None);
    }

    #[test]
    fn test_parse_legacy_rejects_non_numeric() {
        assert_eq!(ProductId::parse_legacy("pABC"), None);
        assert_eq!(ProductId::parse_legacy("abc"), None);
        assert_eq!(ProductId::parse_legacy(""), None);
        assert_eq!(ProductId::parse_legacy("p"), None);
    }

    #[test]
    fn test_parse_legacy_rejects_non_positive() {
        assert_eq!(ProductId::parse_legacy("0"), None);
        assert_eq!(ProductId::parse_legacy("-5"), None);
        assert_eq!(ProductId::parse_legacy("p0"), None);
    }
}
