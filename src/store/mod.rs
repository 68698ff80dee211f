//! Employee persistence.
//!
//! Handlers talk to an [`EmployeeStore`]; the MySQL backend is used in
//! production and the in-memory backend for tests and local demo runs.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryEmployeeStore;
pub use mysql::MySqlEmployeeStore;

use async_trait::async_trait;
use derive_more::Display;

use crate::model::employee::{CreateEmployee, Employee, UpdateEmployee};

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "employee {} not found", _0)]
    NotFound(i64),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::NotFound(_) => None,
            StoreError::Database(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// All employees of a company, each with its passport. Order is store-defined.
    async fn list_by_company(&self, company_id: i64) -> StoreResult<Vec<Employee>>;

    /// Whether an employee row with this id exists.
    async fn exists(&self, id: i64) -> StoreResult<bool>;

    /// Creates the passport and then the employee; returns the new employee id.
    async fn insert(&self, employee: CreateEmployee) -> StoreResult<i64>;

    /// Applies the non-empty fields of `changes`. Fails with
    /// [`StoreError::NotFound`] when the employee does not exist.
    async fn update(&self, id: i64, changes: UpdateEmployee) -> StoreResult<()>;

    /// Removes the employee row. The passport row is kept, and deleting an
    /// unknown id is not an error.
    async fn delete(&self, id: i64) -> StoreResult<()>;
}
