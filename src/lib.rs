//! # 商品目录
//!
//! 同一张商品表上的两套接口：
//! - HTML 页面（列表、详情、新建、编辑、删除）
//! - JSON API（`/products`）
//!
//! 两个控制器都只依赖通用仓储 trait [`core::repository::Repository`]，
//! 存储实现（PostgreSQL 或内存）在启动时注入。

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;
