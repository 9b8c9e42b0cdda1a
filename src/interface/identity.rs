use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker stored against every method name in a canonical interface.
///
/// Only callables are described today, so the single variant serializes as
/// the literal `"function"`, the same tag `Value::type_of` reports for a
/// callable property.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MemberKind {
    Function,
}

/// The `"function"` marker, for callers composing declarations by hand.
pub const FUNCTION: &str = MemberKind::Function.as_str();

impl MemberKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MemberKind::Function => "function",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "function" => Some(MemberKind::Function),
            _ => None,
        }
    }

    /// Whether a runtime type tag satisfies this kind.
    pub fn matches(&self, type_tag: &str) -> bool {
        self.as_str() == type_tag
    }
}

impl Serialize for MemberKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MemberKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown member kind '{value}'")))
    }
}
