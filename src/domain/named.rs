//! Demo1, Demo2 and Demo3: a single nullable `name` each, independent tables.

use super::{same_identity, Entity, ListingMode};
use crate::sql::SqlValue;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

macro_rules! named_entity {
    ($ty:ident, $name:literal, $table:literal, $path:literal, $listing:expr) => {
        #[derive(Clone, Debug, Default, Serialize, Deserialize, sqlx::FromRow)]
        #[serde(default)]
        pub struct $ty {
            pub id: Option<i64>,
            pub name: Option<String>,
        }

        impl $ty {
            pub fn new(name: impl Into<String>) -> Self {
                $ty {
                    id: None,
                    name: Some(name.into()),
                }
            }
        }

        impl Entity for $ty {
            const NAME: &'static str = $name;
            const LABEL: &'static str = stringify!($ty);
            const TABLE: &'static str = $table;
            const PATH: &'static str = $path;
            const COLUMNS: &'static [&'static str] = &["name"];
            const LISTING: ListingMode = $listing;

            fn id(&self) -> Option<i64> {
                self.id
            }

            fn with_id(self, id: i64) -> Self {
                $ty { id: Some(id), ..self }
            }

            fn values(&self) -> Vec<SqlValue> {
                vec![SqlValue::Text(self.name.clone())]
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                same_identity(self.id, other.id)
            }
        }

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

named_entity!(Demo1, "demo1", "demo_1", "/demo-1-s", ListingMode::Paged);
named_entity!(Demo2, "demo2", "demo_2", "/demo-2-s", ListingMode::Unpaged);
named_entity!(Demo3, "demo3", "demo_3", "/demo-3-s", ListingMode::Unpaged);
