//! Structured fields attached to errors.

use std::collections::BTreeMap;

use serde_json::Value;

/// Key/value pairs attached to an error, ordered by key.
pub type Fields = BTreeMap<String, Value>;

/// Build a [`Fields`] map.
///
/// ```rust
/// let fields = errstack::fields! { "user" => "alice", "attempt" => 3 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(::std::string::String::from($key), $crate::Value::from($value));
        )*
        fields
    }};
}
