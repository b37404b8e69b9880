//! 通用仓储层
//!
//! 控制器只依赖这里的 [`Repository`] trait，具体存储（PostgreSQL、内存）
//! 在 `infrastructure` 中实现，并在启动时注入。

use async_trait::async_trait;

/// 实体列值
///
/// 通用仓储实现按 [`Entity::COLUMNS`] 的顺序绑定这些值。
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(Option<String>),
    Float(f64),
    Int(i64),
}

/// 可被通用仓储存储的实体
pub trait Entity: Clone + Send + Sync + Unpin + 'static {
    /// 表名
    const TABLE: &'static str;
    /// 除 `id` 以外的列，顺序与 [`Entity::values`] 一致
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    /// 返回分配了新 id 的实体
    fn with_id(self, id: i32) -> Self;

    fn values(&self) -> Vec<Value>;
}

/// 仓储错误类型
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("repository lock poisoned")]
    LockPoisoned,
    #[error("table {table} expects {expected} values, entity produced {found}")]
    ColumnMismatch {
        table: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("table {table} has no ids left to assign")]
    IdsExhausted { table: &'static str },
}

/// 通用仓储 trait
///
/// 每个写操作都是独立提交的工作单元，返回前已经持久化。
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// 所有实体；存储为空时返回空列表
    async fn get_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// 按 id 查找；不存在时返回 `None`
    async fn get_by_id(&self, id: i32) -> Result<Option<T>, RepositoryError>;

    /// 插入新实体，忽略传入的 id，返回带新 id 的实体
    async fn create(&self, entity: T) -> Result<T, RepositoryError>;

    /// 用 `entity` 替换同 id 记录的全部字段；记录不存在时不做任何事
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    async fn delete(&self, entity: &T) -> Result<(), RepositoryError>;

    /// 存储连通性检查
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
