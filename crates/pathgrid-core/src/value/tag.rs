use crate::value::Value;

///
/// ValueTag
///
/// Stable value-kind tag used by ordering and diagnostics.
///
/// IMPORTANT:
/// Tag order is the cross-kind sort order and must remain fixed.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Number = 3,
    Text = 4,
    Array = 5,
    Object = 6,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool => "Bool",
            Self::Number => "Number",
            Self::Text => "Text",
            Self::Array => "Array",
            Self::Object => "Object",
        }
    }
}

#[must_use]
pub(crate) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Number(_) => ValueTag::Number,
        Value::Text(_) => ValueTag::Text,
        Value::Array(_) => ValueTag::Array,
        Value::Object(_) => ValueTag::Object,
    }
}
