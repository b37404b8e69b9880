//! 核心模块：错误、中间件、仓储抽象

pub mod error;
pub mod middleware;
pub mod repository;
