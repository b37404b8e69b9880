//! 基础设施：日志、数据库连接和仓储实现

pub mod logger;
pub mod memory_repository;

#[cfg(feature = "database")]
pub mod database;
#[cfg(feature = "database")]
pub mod pg_repository;
