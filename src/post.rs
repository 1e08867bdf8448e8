//! Long-format post record.
//!
//! One post is one utterance (a question or a response) extracted from a
//! wide forum row. Opaque fields are carried through as raw JSON scalars
//! since the source schema is not enforced.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Side of a wide record a post was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Question,
    Response,
}

impl Role {
    /// Both sides, in extraction order (question first).
    pub const SIDES: [Role; 2] = [Role::Question, Role::Response];

    /// Identifier prefix disambiguating the merged question/response id space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::Question => "q:",
            Role::Response => "r:",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Question => "question",
            Role::Response => "response",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// `q:`/`r:`-prefixed source identifier, unique within a run.
    pub id: String,
    /// Thread linkage, may be null.
    pub thread_id: Value,
    /// Timestamp passthrough, may be null.
    pub created_at: Value,
    /// Author passthrough, may be null.
    pub author: Value,
    /// Raw dataset-specific language label, resolved during normalization.
    pub lang_hint: Value,
    /// Raw post text, never empty.
    pub text: String,
    pub role: Role,
}

impl Post {
    pub fn new(role: Role, raw_id: &str, text: String) -> Self {
        Self {
            id: format!("{}{}", role.prefix(), raw_id),
            thread_id: Value::Null,
            created_at: Value::Null,
            author: Value::Null,
            lang_hint: Value::Null,
            text,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_prefix() {
        let q = Post::new(Role::Question, "42", "hello".to_string());
        let r = Post::new(Role::Response, "42", "hi".to_string());
        assert_eq!(q.id, "q:42");
        assert_eq!(r.id, "r:42");
        assert_ne!(q.id, r.id);
    }

    #[test]
    fn test_role_serialization() {
        let q = Post::new(Role::Question, "1", "x".to_string());
        let v = serde_json::to_value(&q).unwrap();
        assert_eq!(v["role"], "question");
        assert_eq!(v["thread_id"], Value::Null);
    }
}
