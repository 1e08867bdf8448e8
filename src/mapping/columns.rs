//! Wide→long column mapping.
//!
//! Tells the reshaper which source columns hold each side's content,
//! identifier, timestamp, author and language label, plus the shared thread
//! identifier. Any missing key is a configuration error and aborts the run.
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::Error;
use crate::post::Role;

/// Column names for one side of a wide record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideColumns {
    pub content: String,
    pub id: String,
    pub created_at: String,
    pub user_id: String,
    pub language: String,
}

impl SideColumns {
    fn from_value(side: &str, value: &Value) -> Result<Self, Error> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::ColumnMapMissingKey(side.to_string()))?;
        Ok(Self {
            content: required_key(obj, side, "content")?,
            id: required_key(obj, side, "id")?,
            created_at: required_key(obj, side, "created_at")?,
            user_id: required_key(obj, side, "user_id")?,
            language: required_key(obj, side, "language")?,
        })
    }
}

/// The full map: one [SideColumns] per side plus the shared thread column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub question: SideColumns,
    pub response: SideColumns,
    pub thread_id: String,
}

impl ColumnMap {
    /// Load and validate a column map from a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let file = File::open(path)?;
        let root: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::from_value(&root)
    }

    pub fn from_value(root: &Value) -> Result<Self, Error> {
        let obj = root
            .as_object()
            .ok_or_else(|| Error::Custom("column map is not a JSON object".to_string()))?;
        let question = side_value(obj, Role::Question)?;
        let response = side_value(obj, Role::Response)?;
        Ok(Self {
            question: SideColumns::from_value(Role::Question.name(), question)?,
            response: SideColumns::from_value(Role::Response.name(), response)?,
            thread_id: required_key(obj, "", "thread_id")?,
        })
    }

    /// Column names for the requested side.
    pub fn side(&self, role: Role) -> &SideColumns {
        match role {
            Role::Question => &self.question,
            Role::Response => &self.response,
        }
    }
}

fn side_value<'a>(obj: &'a Map<String, Value>, role: Role) -> Result<&'a Value, Error> {
    obj.get(role.name())
        .ok_or_else(|| Error::ColumnMapMissingKey(role.name().to_string()))
}

fn required_key(obj: &Map<String, Value>, scope: &str, key: &str) -> Result<String, Error> {
    let qualified = || {
        if scope.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", scope, key)
        }
    };
    obj.get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| Error::ColumnMapMissingKey(qualified()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_map() -> Value {
        json!({
            "question": {
                "content": "q_text", "id": "q_id", "created_at": "q_ts",
                "user_id": "q_user", "language": "q_lang"
            },
            "response": {
                "content": "r_text", "id": "r_id", "created_at": "r_ts",
                "user_id": "r_user", "language": "r_lang"
            },
            "thread_id": "thread"
        })
    }

    #[test]
    fn test_load() {
        let m = ColumnMap::from_value(&full_map()).unwrap();
        assert_eq!(m.side(Role::Question).content, "q_text");
        assert_eq!(m.side(Role::Response).id, "r_id");
        assert_eq!(m.thread_id, "thread");
    }

    #[test]
    fn test_missing_side_key() {
        let mut v = full_map();
        v["response"].as_object_mut().unwrap().remove("language");
        match ColumnMap::from_value(&v) {
            Err(Error::ColumnMapMissingKey(k)) => assert_eq!(k, "response.language"),
            other => panic!("expected ColumnMapMissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_thread_id() {
        let mut v = full_map();
        v.as_object_mut().unwrap().remove("thread_id");
        assert!(matches!(
            ColumnMap::from_value(&v),
            Err(Error::ColumnMapMissingKey(k)) if k == "thread_id"
        ));
    }
}
