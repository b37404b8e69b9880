//! PostgreSQL 通用仓储
//!
//! 一个实现服务所有 [`Entity`]：SQL 由表名、列名和列值拼出，
//! 值一律通过参数绑定传入。

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgRow},
    FromRow, Postgres, QueryBuilder,
};
use std::marker::PhantomData;
use tracing::{debug, info};

use crate::core::repository::{Entity, Repository, RepositoryError, Value};

pub struct PgRepository<T> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    fn checked_values(entity: &T) -> Result<Vec<Value>, RepositoryError> {
        let values = entity.values();
        if values.len() != T::COLUMNS.len() {
            return Err(RepositoryError::ColumnMismatch {
                table: T::TABLE,
                expected: T::COLUMNS.len(),
                found: values.len(),
            });
        }
        Ok(values)
    }
}

#[async_trait]
impl<T> Repository<T> for PgRepository<T>
where
    T: Entity + for<'r> FromRow<'r, PgRow>,
{
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        let sql = format!("SELECT * FROM {} ORDER BY id", T::TABLE);
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, RepositoryError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, entity: T) -> Result<T, RepositoryError> {
        let values = Self::checked_values(&entity)?;

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            T::TABLE,
            T::COLUMNS.join(", ")
        ));
        {
            let mut separated = builder.separated(", ");
            for value in values {
                match value {
                    Value::Text(text) => separated.push_bind(text),
                    Value::Float(number) => separated.push_bind(number),
                    Value::Int(number) => separated.push_bind(number),
                };
            }
        }
        builder.push(") RETURNING *");

        let created = builder.build_query_as::<T>().fetch_one(&self.pool).await?;
        info!(table = T::TABLE, id = created.id(), "entity created");

        Ok(created)
    }

    async fn update(&self, entity: &T) -> Result<(), RepositoryError> {
        let values = Self::checked_values(entity)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("UPDATE {} SET ", T::TABLE));
        {
            let mut separated = builder.separated(", ");
            for (column, value) in T::COLUMNS.iter().zip(values) {
                separated.push(format!("{} = ", column));
                match value {
                    Value::Text(text) => separated.push_bind_unseparated(text),
                    Value::Float(number) => separated.push_bind_unseparated(number),
                    Value::Int(number) => separated.push_bind_unseparated(number),
                };
            }
        }
        builder.push(" WHERE id = ");
        builder.push_bind(entity.id());

        let result = builder.build().execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            debug!(table = T::TABLE, id = entity.id(), "update matched no row");
        } else {
            info!(table = T::TABLE, id = entity.id(), "entity updated");
        }

        Ok(())
    }

    async fn delete(&self, entity: &T) -> Result<(), RepositoryError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(entity.id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!(table = T::TABLE, id = entity.id(), "entity deleted");
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
