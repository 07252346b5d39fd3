use super::{same_identity, Entity, ListingMode};
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A Demo: title and level, listed page by page.
#[derive(Clone, Debug, Default, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct Demo {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub level: Option<i32>,
}

impl Demo {
    pub fn new(title: impl Into<String>, level: i32) -> Self {
        Demo {
            id: None,
            title: Some(title.into()),
            level: Some(level),
        }
    }
}

impl Entity for Demo {
    const NAME: &'static str = "demo";
    const LABEL: &'static str = "Demo";
    const TABLE: &'static str = "demo";
    const PATH: &'static str = "/demos";
    const COLUMNS: &'static [&'static str] = &["title", "level"];
    const LISTING: ListingMode = ListingMode::Paged;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn with_id(self, id: i64) -> Self {
        Demo { id: Some(id), ..self }
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::Text(self.title.clone()),
            SqlValue::Int(self.level),
        ]
    }
}

impl PartialEq for Demo {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id, other.id)
    }
}

impl Hash for Demo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(demo: &Demo) -> u64 {
        let mut hasher = DefaultHasher::new();
        demo.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_follows_identifier() {
        let a = Demo::new("AAAAA", 1).with_id(7);
        let b = Demo::new("BBBBB", 2).with_id(7);
        let c = Demo::new("AAAAA", 1).with_id(8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn unpersisted_records_are_never_equal() {
        let a = Demo::new("AAAAA", 1);
        assert_ne!(a, a.clone());
        assert_ne!(a, Demo::new("AAAAA", 1).with_id(1));
    }

    #[test]
    fn hash_depends_on_id_only() {
        let a = Demo::new("AAAAA", 1).with_id(1);
        let b = Demo::new("BBBBB", 2).with_id(1);
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(hash_of(&a), hash_of(&Demo::new("AAAAA", 1).with_id(2)));
    }

    #[test]
    fn missing_json_fields_are_null() {
        let demo: Demo = serde_json::from_str(r#"{"title":"AAAAA"}"#).unwrap();
        assert_eq!(demo.id, None);
        assert_eq!(demo.title.as_deref(), Some("AAAAA"));
        assert_eq!(demo.level, None);
    }

    #[test]
    fn sort_value_by_property() {
        let demo = Demo::new("AAAAA", 3).with_id(2);
        assert_eq!(demo.sort_value("id"), Some(SqlValue::BigInt(Some(2))));
        assert_eq!(demo.sort_value("level"), Some(SqlValue::Int(Some(3))));
        assert_eq!(demo.sort_value("name"), None);
        assert!(Demo::is_sortable("title"));
        assert!(!Demo::is_sortable("name"));
    }
}
