//! 商品 JSON API 控制器

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::model::Product;
use crate::core::error::CoreError;
use crate::core::repository::Repository;

/// 创建成功后 `Location` 指向的动作
pub const GET_PRODUCT_ACTION: &str = "get_product";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult<T> {
    Ok(T),
    CreatedAtAction {
        action: &'static str,
        location: String,
        value: T,
    },
    NoContent,
    BadRequest,
    NotFound,
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        match self {
            ApiResult::Ok(value) => (StatusCode::OK, Json(value)).into_response(),
            ApiResult::CreatedAtAction {
                location, value, ..
            } => (
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(value),
            )
                .into_response(),
            ApiResult::NoContent => StatusCode::NO_CONTENT.into_response(),
            ApiResult::BadRequest => StatusCode::BAD_REQUEST.into_response(),
            ApiResult::NotFound => StatusCode::NOT_FOUND.into_response(),
        }
    }
}

pub struct ProductsController {
    repository: Arc<dyn Repository<Product>>,
}

impl ProductsController {
    pub fn new(repository: Arc<dyn Repository<Product>>) -> Self {
        Self { repository }
    }

    /// GET: products
    pub async fn get_products(&self) -> Result<ApiResult<Vec<Product>>, CoreError> {
        let products = self.repository.get_all().await?;
        Ok(ApiResult::Ok(products))
    }

    /// GET: products/5
    pub async fn get_product(&self, id: i32) -> Result<ApiResult<Product>, CoreError> {
        Ok(match self.repository.get_by_id(id).await? {
            Some(product) => ApiResult::Ok(product),
            None => ApiResult::NotFound,
        })
    }

    /// PUT: products/5
    ///
    /// 不检查商品是否存在，也不做字段验证。
    pub async fn put_product(
        &self,
        id: i32,
        product: Product,
    ) -> Result<ApiResult<Product>, CoreError> {
        if id != product.id {
            debug!(route_id = id, body_id = product.id, "put id mismatch");
            return Ok(ApiResult::BadRequest);
        }

        self.repository.update(&product).await?;
        Ok(ApiResult::NoContent)
    }

    /// POST: products
    pub async fn post_product(&self, product: Product) -> Result<ApiResult<Product>, CoreError> {
        let created = self.repository.create(product).await?;

        Ok(ApiResult::CreatedAtAction {
            action: GET_PRODUCT_ACTION,
            location: format!("/products/{}", created.id),
            value: created,
        })
    }

    /// DELETE: products/5
    pub async fn delete_product(&self, id: i32) -> Result<ApiResult<Product>, CoreError> {
        let Some(product) = self.repository.get_by_id(id).await? else {
            return Ok(ApiResult::NotFound);
        };

        self.repository.delete(&product).await?;
        Ok(ApiResult::NoContent)
    }
}
