use sqlx::{Executor, MySql};

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    I64(i64),
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::String(v.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::I64(v)
    }
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug, PartialEq)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
///
/// Only the columns that carry a value end up in the SET clause.
/// Returns `None` when there is nothing to update.
pub fn build_update_sql(
    table: &str,
    columns: Vec<(&str, Option<SqlValue>)>,
    id_column: &str,
    id_value: i64,
) -> Option<SqlUpdate> {
    let (names, mut values): (Vec<&str>, Vec<SqlValue>) = columns
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .unzip();

    if names.is_empty() {
        return None;
    }

    let set_clause = names
        .iter()
        .map(|k| format!("`{}` = ?", k))
        .collect::<Vec<_>>()
        .join(", ");

    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        table, set_clause, id_column
    );

    // WHERE id = ?
    values.push(SqlValue::I64(id_value));

    Some(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update<'c, E>(executor: E, update: SqlUpdate) -> Result<u64, sqlx::Error>
where
    E: Executor<'c, Database = MySql>,
{
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::I64(v) => query.bind(v),
        };
    }

    let result = query.execute(executor).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_set_clause_from_present_columns_only() {
        let update = build_update_sql(
            "employees",
            vec![
                ("name", Some("Ann".into())),
                ("surname", None),
                ("company_id", Some(9i64.into())),
            ],
            "id",
            4,
        )
        .unwrap();

        assert_eq!(
            update.sql,
            "UPDATE employees SET `name` = ?, `company_id` = ? WHERE id = ?"
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::String("Ann".into()),
                SqlValue::I64(9),
                SqlValue::I64(4),
            ]
        );
    }

    #[test]
    fn nothing_to_update_yields_none() {
        let update = build_update_sql("passport", vec![("type", None), ("number", None)], "id", 1);
        assert!(update.is_none());
    }
}
