//! Three-state merge-patch field.
//!
//! A JSON merge-patch body must distinguish a field that was omitted (keep
//! the stored value) from one explicitly set to `null` (clear the stored
//! value). A plain `Option` conflates the two, so patch payloads wrap every
//! field in [`PatchField`].

use serde::{Deserialize, Deserializer};

/// One field of a merge-patch payload.
///
/// Deserialisation maps an omitted field to [`PatchField::Absent`] (requires
/// `#[serde(default)]` on the field), an explicit `null` to
/// [`PatchField::Clear`], and any other value to [`PatchField::Value`].
///
/// # Examples
/// ```
/// use asset_registry::domain::PatchField;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Patch {
///     #[serde(default)]
///     comments: PatchField<String>,
/// }
///
/// let omitted: Patch = serde_json::from_str("{}").unwrap();
/// assert!(omitted.comments.is_absent());
///
/// let cleared: Patch = serde_json::from_str(r#"{"comments":null}"#).unwrap();
/// assert_eq!(cleared.comments, PatchField::Clear);
///
/// let set: Patch = serde_json::from_str(r#"{"comments":"ok"}"#).unwrap();
/// assert_eq!(set.comments, PatchField::Value("ok".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatchField<T> {
    /// The field was not present in the patch; keep the stored value.
    #[default]
    Absent,
    /// The field was explicitly `null`; clear the stored value.
    Clear,
    /// The field carries a replacement value.
    Value(T),
}

impl<T> PatchField<T> {
    /// True when the patch does not mention this field.
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Fold the patch into an existing optional value.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Clear => *slot = None,
            Self::Value(value) => *slot = Some(value),
        }
    }

}

impl<T> From<Option<T>> for PatchField<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Value)
    }
}

impl<'de, T> Deserialize<'de> for PatchField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the field is present; `null` maps to `Clear`.
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
