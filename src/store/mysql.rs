use async_trait::async_trait;
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use super::{EmployeeStore, StoreError, StoreResult};
use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};
use crate::model::passport::Passport;
use crate::utils::db_utils::{SqlValue, build_update_sql, execute_update};

#[derive(FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    surname: String,
    phone: String,
    company_id: i64,
    passport_id: i64,
    passport_type: String,
    passport_number: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            surname: row.surname,
            phone: row.phone,
            company_id: row.company_id,
            passport: Passport {
                id: row.passport_id,
                kind: row.passport_type,
                number: row.passport_number,
            },
        }
    }
}

#[derive(Clone)]
pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn list_by_company(&self, company_id: i64) -> StoreResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            r#"
            SELECT
                e.id,
                e.name,
                e.surname,
                e.phone,
                e.company_id,
                p.id AS passport_id,
                p.type AS passport_type,
                p.number AS passport_number
            FROM employees e
            INNER JOIN passport p ON e.passport_id = p.id
            WHERE e.company_id = ?
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(company_id, count = rows.len(), "Fetched employees of company");

        Ok(rows.into_iter().map(Employee::from).collect())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    async fn insert(&self, employee: CreateEmployee) -> StoreResult<i64> {
        let mut tx = self.pool.begin().await?;

        let passport_id = sqlx::query("INSERT INTO passport (type, number) VALUES (?, ?)")
            .bind(&employee.passport.kind)
            .bind(&employee.passport.number)
            .execute(&mut *tx)
            .await?
            .last_insert_id();

        let employee_id = sqlx::query(
            r#"
            INSERT INTO employees (name, surname, phone, company_id, passport_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.surname)
        .bind(&employee.phone)
        .bind(employee.company_id)
        .bind(passport_id)
        .execute(&mut *tx)
        .await?
        .last_insert_id();

        tx.commit().await?;

        debug!(employee_id, passport_id, "Inserted employee");

        // AUTO_INCREMENT ids of a signed BIGINT column always fit in i64
        Ok(employee_id as i64)
    }

    async fn update(&self, id: i64, changes: UpdateEmployee) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        if count == 0 {
            return Err(StoreError::NotFound(id));
        }

        if changes.touches_passport() {
            let passport_id = sqlx::query_scalar::<_, i64>(
                "SELECT passport_id FROM employees WHERE id = ? LIMIT 1",
            )
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

            let passport_update = build_update_sql(
                "passport",
                vec![
                    ("type", changes.passport_kind().map(SqlValue::from)),
                    ("number", changes.passport_number().map(SqlValue::from)),
                ],
                "id",
                passport_id,
            );

            if let Some(update) = passport_update {
                debug!(sql = %update.sql, passport_id, "Updating passport");
                execute_update(&mut *tx, update).await?;
            }
        }

        let employee_update = build_update_sql(
            "employees",
            vec![
                ("name", changes.name().map(SqlValue::from)),
                ("surname", changes.surname().map(SqlValue::from)),
                ("phone", changes.phone().map(SqlValue::from)),
                ("company_id", changes.company_id().map(SqlValue::from)),
            ],
            "id",
            id,
        );

        if let Some(update) = employee_update {
            debug!(sql = %update.sql, employee_id = id, "Updating employee");
            execute_update(&mut *tx, update).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_row_becomes_employee_with_nested_passport() {
        let row = EmployeeRow {
            id: 12,
            name: "Ann".into(),
            surname: "Lee".into(),
            phone: "123".into(),
            company_id: 5,
            passport_id: 30,
            passport_type: "ID".into(),
            passport_number: "X1".into(),
        };

        let employee = Employee::from(row);

        assert_eq!(employee.id, 12);
        assert_eq!(employee.name, "Ann");
        assert_eq!(employee.surname, "Lee");
        assert_eq!(employee.phone, "123");
        assert_eq!(employee.company_id, 5);
        assert_eq!(
            employee.passport,
            Passport {
                id: 30,
                kind: "ID".into(),
                number: "X1".into(),
            }
        );
    }

    #[test]
    fn update_statements_touch_only_supplied_columns() {
        let changes: UpdateEmployee = serde_json::from_value(serde_json::json!({
            "surname": "Smith",
            "phone": "",
            "passport": { "number": "N2" }
        }))
        .unwrap();

        let passport = build_update_sql(
            "passport",
            vec![
                ("type", changes.passport_kind().map(SqlValue::from)),
                ("number", changes.passport_number().map(SqlValue::from)),
            ],
            "id",
            30,
        )
        .unwrap();
        assert_eq!(passport.sql, "UPDATE passport SET `number` = ? WHERE id = ?");

        let employee = build_update_sql(
            "employees",
            vec![
                ("name", changes.name().map(SqlValue::from)),
                ("surname", changes.surname().map(SqlValue::from)),
                ("phone", changes.phone().map(SqlValue::from)),
                ("company_id", changes.company_id().map(SqlValue::from)),
            ],
            "id",
            12,
        )
        .unwrap();
        assert_eq!(employee.sql, "UPDATE employees SET `surname` = ? WHERE id = ?");
        assert_eq!(
            employee.values,
            vec![SqlValue::String("Smith".into()), SqlValue::I64(12)]
        );
    }
}
