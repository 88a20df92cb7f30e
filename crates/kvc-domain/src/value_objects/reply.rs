//! Untyped store replies for the scripted and raw escape hatches

/// Reply from a server-side script or a raw command
///
/// The regular cache surface is string-typed; these replies only come back
/// from `script_eval` and `raw_operate`, where the shape depends on what the
/// caller asked the store to do.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reply {
    /// No value
    #[default]
    Nil,
    /// Integer reply
    Int(i64),
    /// Bulk (possibly binary) data
    Data(Vec<u8>),
    /// Status line other than `OK`
    Status(String),
    /// The `OK` status
    Okay,
    /// Floating point reply
    Double(f64),
    /// Boolean reply
    Bool(bool),
    /// Ordered collection of replies
    Array(Vec<Reply>),
    /// Key/value pairs in server order
    Map(Vec<(Reply, Reply)>),
}

impl Reply {
    /// True for [`Reply::Nil`]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Render scalar replies as text; collections and nil yield `None`
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Data(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            Self::Status(status) => Some(status.clone()),
            Self::Okay => Some("OK".to_string()),
            Self::Int(value) => Some(value.to_string()),
            Self::Double(value) => Some(value.to_string()),
            Self::Bool(value) => Some(value.to_string()),
            Self::Nil | Self::Array(_) | Self::Map(_) => None,
        }
    }

    /// Integer value, parsing textual data the way the store does
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Data(bytes) => std::str::from_utf8(bytes).ok()?.trim().parse().ok(),
            Self::Status(status) => status.trim().parse().ok(),
            Self::Bool(value) => Some(i64::from(*value)),
            _ => None,
        }
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Self::Data(value.as_bytes().to_vec())
    }
}

impl From<i64> for Reply {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}
