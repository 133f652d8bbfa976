//! Car persistence contract and its SQLite implementation.
//!
//! Absence is reported as `None` / `false`, never as an error; only storage failures
//! come back as `Err`. Every call works on its own pooled connection or transaction,
//! released when the call returns.

use crate::model::{Car, CarId, CarPatch, NewCar};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub type RepoResult<T> = Result<T, sqlx::Error>;

const CAR_COLUMNS: &str = "id, brand, color, model, model_year, factory_year, description";

/// Offset/limit window for listing. Bounds are enforced by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            offset: 0,
            limit: 100,
        }
    }
}

#[async_trait]
pub trait CarRepository: Send + Sync {
    async fn create(&self, car: &NewCar) -> RepoResult<Car>;
    /// Rows in id order.
    async fn list(&self, page: Page) -> RepoResult<Vec<Car>>;
    async fn get_by_id(&self, id: CarId) -> RepoResult<Option<Car>>;
    /// Overwrite every field. `None` if no row matches.
    async fn update(&self, id: CarId, car: &NewCar) -> RepoResult<Option<Car>>;
    /// Overwrite only the supplied fields. `None` if no row matches.
    async fn partial_update(&self, id: CarId, patch: CarPatch) -> RepoResult<Option<Car>>;
    /// `false` if no row matches.
    async fn delete(&self, id: CarId) -> RepoResult<bool>;
}

#[derive(Clone)]
pub struct SqliteCarRepository {
    pool: SqlitePool,
}

impl SqliteCarRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCarRepository { pool }
    }
}

#[async_trait]
impl CarRepository for SqliteCarRepository {
    async fn create(&self, car: &NewCar) -> RepoResult<Car> {
        let sql = format!(
            "INSERT INTO cars (brand, color, model, model_year, factory_year, description) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {CAR_COLUMNS}"
        );
        tracing::debug!(sql = %sql, "query");
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Car>(&sql)
            .bind(&car.brand)
            .bind(&car.color)
            .bind(&car.model)
            .bind(car.model_year)
            .bind(car.factory_year)
            .bind(&car.description)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn list(&self, page: Page) -> RepoResult<Vec<Car>> {
        let sql = format!("SELECT {CAR_COLUMNS} FROM cars ORDER BY id LIMIT ? OFFSET ?");
        tracing::debug!(sql = %sql, offset = page.offset, limit = page.limit, "query");
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, Car>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: CarId) -> RepoResult<Option<Car>> {
        let sql = format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?");
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Car>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: CarId, car: &NewCar) -> RepoResult<Option<Car>> {
        let sql = format!(
            "UPDATE cars SET brand = ?, color = ?, model = ?, model_year = ?, \
             factory_year = ?, description = ? WHERE id = ? RETURNING {CAR_COLUMNS}"
        );
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.pool.acquire().await?;
        let row = sqlx::query_as::<_, Car>(&sql)
            .bind(&car.brand)
            .bind(&car.color)
            .bind(&car.model)
            .bind(car.model_year)
            .bind(car.factory_year)
            .bind(&car.description)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    async fn partial_update(&self, id: CarId, patch: CarPatch) -> RepoResult<Option<Car>> {
        // Read, merge and write on one transaction; dropping `tx` early rolls back.
        // IMMEDIATE takes the write lock before the read so concurrent patches queue on
        // the busy timeout instead of failing the lock upgrade.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let select = format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?");
        tracing::debug!(sql = %select, id, "query (tx)");
        let Some(mut car) = sqlx::query_as::<_, Car>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(car));
        }
        patch.apply(&mut car);

        let update = "UPDATE cars SET brand = ?, color = ?, model = ?, model_year = ?, \
                      factory_year = ?, description = ? WHERE id = ?";
        tracing::debug!(sql = %update, id, "query (tx)");
        sqlx::query(update)
            .bind(&car.brand)
            .bind(&car.color)
            .bind(&car.model)
            .bind(car.model_year)
            .bind(car.factory_year)
            .bind(&car.description)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(car))
    }

    async fn delete(&self, id: CarId) -> RepoResult<bool> {
        let sql = "DELETE FROM cars WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let mut conn = self.pool.acquire().await?;
        let result = sqlx::query(sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }
}
