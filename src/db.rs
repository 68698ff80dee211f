use anyhow::{Context, Result};
use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::info;

const CREATE_PASSPORT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS passport
(
    id     BIGINT AUTO_INCREMENT PRIMARY KEY,
    type   VARCHAR(255) NOT NULL DEFAULT '',
    number VARCHAR(255) NOT NULL DEFAULT ''
)
"#;

const CREATE_EMPLOYEES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees
(
    id          BIGINT AUTO_INCREMENT PRIMARY KEY,
    name        VARCHAR(255) NOT NULL DEFAULT '',
    surname     VARCHAR(255) NOT NULL DEFAULT '',
    phone       VARCHAR(255) NOT NULL DEFAULT '',
    company_id  BIGINT NOT NULL DEFAULT 0,
    passport_id BIGINT NOT NULL,
    INDEX idx_employees_company (company_id),
    FOREIGN KEY (passport_id) REFERENCES passport (id)
)
"#;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Creates the `passport` and `employees` tables when they are missing.
pub async fn init_schema(pool: &MySqlPool) -> Result<()> {
    // passport first: employees references it
    for statement in [CREATE_PASSPORT_TABLE, CREATE_EMPLOYEES_TABLE] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to bootstrap database schema")?;
    }

    info!("Database schema ready");
    Ok(())
}
