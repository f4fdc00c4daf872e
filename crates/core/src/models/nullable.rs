//! Serde helpers for API fields that may arrive as JSON `null`.

use serde::{Deserialize, Deserializer};

/// Deserialize a field whose value may be `null`, falling back to
/// `T::default()`. Pair with `#[serde(default)]` so a missing key behaves
/// the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
