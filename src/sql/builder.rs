//! Builds parameterized INSERT, SELECT, UPDATE, DELETE for an entity type.

use crate::domain::{Entity, ID_COLUMN};
use crate::page::PageRequest;
use crate::sql::SqlValue;

/// Quote identifier for PostgreSQL (safe: only from entity definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// `"id", "col1", ...` in the order the row decoder expects.
fn select_column_list<E: Entity>() -> String {
    std::iter::once(ID_COLUMN)
        .chain(E::COLUMNS.iter().copied())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT by primary key. Caller binds the id as `$1`.
pub fn select_by_id<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        select_column_list::<E>(),
        quoted(E::TABLE),
        quoted(ID_COLUMN)
    )
}

/// SELECT every row ordered by id.
pub fn select_all<E: Entity>() -> String {
    format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list::<E>(),
        quoted(E::TABLE),
        quoted(ID_COLUMN)
    )
}

/// SELECT one page. Sort properties must already be checked against the entity.
pub fn select_page<E: Entity>(request: &PageRequest) -> String {
    let order = request
        .effective_sort()
        .iter()
        .map(|o| format!("{} {}", quoted(&o.property), o.direction.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "SELECT {} FROM {} ORDER BY {} LIMIT {} OFFSET {}",
        select_column_list::<E>(),
        quoted(E::TABLE),
        order,
        request.size,
        request.offset()
    )
}

pub fn count<E: Entity>() -> String {
    format!("SELECT COUNT(*) FROM {}", quoted(E::TABLE))
}

/// INSERT every column; the id comes from the table's sequence.
pub fn insert<E: Entity>(record: &E) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, value) in E::COLUMNS.iter().zip(record.values()) {
        let n = q.push_param(value);
        cols.push(quoted(name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(E::TABLE),
        cols.join(", "),
        placeholders.join(", "),
        select_column_list::<E>()
    );
    q
}

/// UPDATE by id overwriting every column.
pub fn update<E: Entity>(record: &E, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, value) in E::COLUMNS.iter().zip(record.values()) {
        let n = q.push_param(value);
        sets.push(format!("{} = ${}", quoted(name), n));
    }
    let id_param = q.push_param(SqlValue::BigInt(Some(id)));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${} RETURNING {}",
        quoted(E::TABLE),
        sets.join(", "),
        quoted(ID_COLUMN),
        id_param,
        select_column_list::<E>()
    );
    q
}

/// DELETE by id. Caller binds the id as `$1`.
pub fn delete<E: Entity>() -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        quoted(E::TABLE),
        quoted(ID_COLUMN)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Demo, Demo2};
    use crate::page::Direction;

    #[test]
    fn insert_binds_columns_in_order() {
        let q = insert(&Demo::new("AAAAA", 1));
        assert_eq!(
            q.sql,
            r#"INSERT INTO "demo" ("title", "level") VALUES ($1, $2) RETURNING "id", "title", "level""#
        );
        assert_eq!(
            q.params,
            vec![SqlValue::Text(Some("AAAAA".into())), SqlValue::Int(Some(1))]
        );
    }

    #[test]
    fn update_overwrites_all_columns() {
        let q = update(&Demo2 { id: Some(3), name: None }, 3);
        assert_eq!(
            q.sql,
            r#"UPDATE "demo_2" SET "name" = $1 WHERE "id" = $2 RETURNING "id", "name""#
        );
        assert_eq!(q.params, vec![SqlValue::Text(None), SqlValue::BigInt(Some(3))]);
    }

    #[test]
    fn page_query_orders_with_tiebreaker() {
        let req = PageRequest::new(2, 10).sorted_by("level", Direction::Desc);
        assert_eq!(
            select_page::<Demo>(&req),
            r#"SELECT "id", "title", "level" FROM "demo" ORDER BY "level" DESC, "id" ASC LIMIT 10 OFFSET 20"#
        );
    }

    #[test]
    fn lookups_by_id() {
        assert_eq!(
            select_by_id::<Demo2>(),
            r#"SELECT "id", "name" FROM "demo_2" WHERE "id" = $1"#
        );
        assert_eq!(delete::<Demo2>(), r#"DELETE FROM "demo_2" WHERE "id" = $1"#);
        assert_eq!(count::<Demo>(), r#"SELECT COUNT(*) FROM "demo""#);
    }
}
