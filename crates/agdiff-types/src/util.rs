use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as a missing field.
///
/// Executors sometimes emit `"tool_calls": null` for runs that never called a
/// tool; those load as an empty sequence.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
