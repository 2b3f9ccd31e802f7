//! Employee Repository (store-scoped)

use super::RepoResult;
use shared::models::{Employee, EmployeeCreate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, store, first_name, last_name, position, branch, salary_type, salary";

pub async fn find_all(pool: &SqlitePool, store: &str) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE store = ? ORDER BY last_name, first_name, id"
    ))
    .bind(store)
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

pub async fn find_by_id(pool: &SqlitePool, store: &str, id: i64) -> RepoResult<Option<Employee>> {
    let employee = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employees WHERE store = ? AND id = ?"
    ))
    .bind(store)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(employee)
}

/// Insert; the salary type is derived from the position
pub async fn create(pool: &SqlitePool, store: &str, data: EmployeeCreate) -> RepoResult<Employee> {
    let employee = Employee {
        id: snowflake_id(),
        store: store.to_string(),
        salary_type: data.salary_type(),
        first_name: data.first_name.trim().to_string(),
        last_name: data.last_name.trim().to_string(),
        position: data.position,
        branch: data.branch,
        salary: data.salary,
    };
    sqlx::query(&format!(
        "INSERT INTO employees ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)"
    ))
    .bind(employee.id)
    .bind(&employee.store)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(&employee.position)
    .bind(&employee.branch)
    .bind(employee.salary_type)
    .bind(employee.salary)
    .execute(pool)
    .await?;
    Ok(employee)
}

pub async fn delete(pool: &SqlitePool, store: &str, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employees WHERE store = ? AND id = ?")
        .bind(store)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
