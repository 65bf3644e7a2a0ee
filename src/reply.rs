//! Raw reply model
//!
//! This module defines the Reply enum representing the untyped values the
//! network client hands to the parsers: plain text, integers, doubles, and
//! arbitrarily nested sequences of those.

use std::fmt;

/// Raw reply value for a diagnostic command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Simple or bulk string payload: INFO text, client records, argument words
    Text(String),

    /// 64-bit integer: slow log ids, timestamps, durations
    Integer(i64),

    /// Double-precision value (RESP3 double)
    Float(f64),

    /// Ordered sequence of replies, possibly nested: slow log entries, FT.INFO pairs
    Sequence(Vec<Reply>),
}

impl Reply {
    /// Create a text reply
    #[inline]
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    /// Create an integer reply
    #[inline]
    pub fn integer(n: i64) -> Self {
        Reply::Integer(n)
    }

    /// Create a float reply
    #[inline]
    pub fn float(f: f64) -> Self {
        Reply::Float(f)
    }

    /// Create a sequence reply
    #[inline]
    pub fn sequence(items: Vec<Reply>) -> Self {
        Reply::Sequence(items)
    }

    /// Get the string value if this is a Text reply
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Reply::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer value if this is an Integer reply
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Reply::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the float value if this is a Float reply
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Reply::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the elements if this is a Sequence reply
    pub fn as_sequence(&self) -> Option<&[Reply]> {
        match self {
            Reply::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Convert to owned elements if this is a Sequence reply
    pub fn into_sequence(self) -> Option<Vec<Reply>> {
        match self {
            Reply::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Convert to an owned string if this is a Text reply
    pub fn into_text(self) -> Option<String> {
        match self {
            Reply::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of this reply's variant, for error and log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Reply::Text(_) => "text",
            Reply::Integer(_) => "integer",
            Reply::Float(_) => "float",
            Reply::Sequence(_) => "sequence",
        }
    }
}

impl fmt::Display for Reply {
    /// Renders nested sequences in a bracketed single-line form, used when a
    /// sub-group is carried through into a table cell unflattened.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Text(s) => f.write_str(s),
            Reply::Integer(n) => write!(f, "{n}"),
            Reply::Float(v) => write!(f, "{v}"),
            Reply::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Reply {
    fn from(s: &str) -> Self {
        Reply::text(s)
    }
}

impl From<String> for Reply {
    fn from(s: String) -> Self {
        Reply::Text(s)
    }
}

impl From<i64> for Reply {
    fn from(n: i64) -> Self {
        Reply::Integer(n)
    }
}

impl From<f64> for Reply {
    fn from(f: f64) -> Self {
        Reply::Float(f)
    }
}

impl From<Vec<Reply>> for Reply {
    fn from(items: Vec<Reply>) -> Self {
        Reply::Sequence(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_constructors() {
        assert_eq!(Reply::text("OK"), Reply::Text("OK".to_string()));
        assert_eq!(Reply::integer(42), Reply::Integer(42));
        assert_eq!(Reply::float(1.5), Reply::Float(1.5));
        assert_eq!(
            Reply::sequence(vec![Reply::integer(1)]),
            Reply::Sequence(vec![Reply::Integer(1)])
        );
    }

    #[test]
    fn test_reply_accessors() {
        assert_eq!(Reply::text("hello").as_str(), Some("hello"));
        assert_eq!(Reply::integer(42).as_str(), None);
        assert_eq!(Reply::integer(42).as_integer(), Some(42));
        assert_eq!(Reply::float(0.5).as_float(), Some(0.5));
        assert_eq!(
            Reply::sequence(vec![Reply::integer(1)]).as_sequence(),
            Some(&[Reply::Integer(1)][..])
        );
        assert_eq!(Reply::text("x").as_sequence(), None);
    }

    #[test]
    fn test_reply_conversions() {
        let reply: Reply = "hello".into();
        assert_eq!(reply.as_str(), Some("hello"));

        let reply: Reply = 42i64.into();
        assert_eq!(reply.as_integer(), Some(42));

        let reply: Reply = vec![Reply::text("a")].into();
        assert_eq!(reply.as_sequence().map(<[Reply]>::len), Some(1));
    }

    #[test]
    fn test_reply_display_nested() {
        let reply = Reply::sequence(vec![
            Reply::text("key_type"),
            Reply::text("HASH"),
            Reply::sequence(vec![Reply::text("thing"), Reply::integer(7)]),
        ]);
        assert_eq!(reply.to_string(), "[key_type HASH [thing 7]]");
    }

    #[test]
    fn test_reply_kind() {
        assert_eq!(Reply::text("x").kind(), "text");
        assert_eq!(Reply::integer(1).kind(), "integer");
        assert_eq!(Reply::float(1.0).kind(), "float");
        assert_eq!(Reply::sequence(vec![]).kind(), "sequence");
    }
}
