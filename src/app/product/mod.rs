//! 商品模块：模型、Web 控制器、JSON API 控制器和视图

pub mod api;
pub mod controller;
pub mod handler;
pub mod model;
pub mod views;

use tracing::info;

use crate::core::repository::{Repository, RepositoryError};
use model::{sample_products, Product};

/// 存储为空时写入示例商品，返回写入数量
pub async fn seed_sample_data(
    repository: &dyn Repository<Product>,
) -> Result<usize, RepositoryError> {
    if !repository.get_all().await?.is_empty() {
        info!("Store already contains products, skipping seed");
        return Ok(0);
    }

    let samples = sample_products();
    let count = samples.len();
    for product in samples {
        repository.create(product).await?;
    }

    info!("Seeded {} sample products", count);
    Ok(count)
}
