//! Optional-field conventions for request and response models.
//!
//! Plain optional fields are `Option<T>` annotated with
//! `#[serde(default, skip_serializing_if = "Option::is_none")]`, so an absent
//! value never reaches the wire. Fields the API lets clients clear explicitly
//! use [`Nullable`], which can also serialize as `null`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that is absent, explicitly `null`, or set.
///
/// Use with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nullable<T> {
    /// Not present on the wire
    Absent,
    /// Present as JSON `null`
    Null,
    /// Present with a value
    Value(T),
}

impl<T> Nullable<T> {
    /// Returns true if the field is absent.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns true if the field is explicitly `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the value, if set.
    #[must_use]
    pub const fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Convert into an `Option`, collapsing `Absent` and `Null`.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Default> Nullable<T> {
    /// The value, or `T::default()` when absent or null.
    #[must_use]
    pub fn value_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Nullable<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    /// `None` maps to `Null`: a caller passing an `Option` wants it sent.
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => v.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    // Only called when the key is present; `#[serde(default)]` covers absence.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| v.map_or(Self::Null, Self::Value))
    }
}

/// The string, or `""` when absent.
#[must_use]
pub fn string_value(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// The value, or `T::default()` when absent.
#[must_use]
pub fn value_or_default<T: Copy + Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}
