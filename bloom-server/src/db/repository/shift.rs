//! Shift Repository (store-scoped)

use super::RepoResult;
use shared::models::{Shift, ShiftCreate};
use shared::util::snowflake_id;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, store, staff_id, staff_name, date, start_time, end_time";

/// Shifts of a store ordered by date and start time
pub async fn find_all(pool: &SqlitePool, store: &str) -> RepoResult<Vec<Shift>> {
    let shifts = sqlx::query_as::<_, Shift>(&format!(
        "SELECT {COLUMNS} FROM shifts WHERE store = ? ORDER BY date, start_time, id"
    ))
    .bind(store)
    .fetch_all(pool)
    .await?;
    Ok(shifts)
}

/// Insert a validated shift. `staff_name` comes from the employee record.
pub async fn create(
    pool: &SqlitePool,
    store: &str,
    staff_name: &str,
    data: ShiftCreate,
) -> RepoResult<Shift> {
    let shift = Shift {
        id: snowflake_id(),
        store: store.to_string(),
        staff_id: data.staff_id,
        staff_name: staff_name.to_string(),
        date: data.date,
        start_time: data.start_time,
        end_time: data.end_time,
    };
    sqlx::query(&format!("INSERT INTO shifts ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)"))
        .bind(shift.id)
        .bind(&shift.store)
        .bind(shift.staff_id)
        .bind(&shift.staff_name)
        .bind(&shift.date)
        .bind(&shift.start_time)
        .bind(&shift.end_time)
        .execute(pool)
        .await?;
    Ok(shift)
}

pub async fn delete(pool: &SqlitePool, store: &str, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM shifts WHERE store = ? AND id = ?")
        .bind(store)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn payload(date: &str, start: &str, end: &str) -> ShiftCreate {
        ShiftCreate {
            staff_id: 7,
            date: date.into(),
            start_time: start.into(),
            end_time: end.into(),
        }
    }

    #[tokio::test]
    async fn test_ordering_and_scope() {
        let pool = DbService::in_memory().await.unwrap().pool;
        create(&pool, "Mitte", "Lena Weber", payload("2025-03-02", "08:00", "12:00"))
            .await
            .unwrap();
        let early = create(&pool, "Mitte", "Lena Weber", payload("2025-03-01", "14:00", "18:30"))
            .await
            .unwrap();
        create(&pool, "Kreuzberg", "Max Weber", payload("2025-03-01", "06:00", "10:00"))
            .await
            .unwrap();

        let shifts = find_all(&pool, "Mitte").await.unwrap();
        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0], early);
        assert_eq!(shifts[0].hours(), 4.5);

        assert!(!delete(&pool, "Kreuzberg", early.id).await.unwrap());
        assert!(delete(&pool, "Mitte", early.id).await.unwrap());
    }
}
