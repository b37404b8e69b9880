//! 应用路由组装

pub mod product;

use axum::{extract::State, middleware, response::Json, routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpConfig;
use crate::core::error::CoreError;
use crate::core::middleware::request_logging_middleware;
use crate::core::repository::Repository;
use product::{api::ProductsController, controller::ProductController, handler, model::Product};

/// 组装完整的应用路由
///
/// 控制器由调用方构造并注入；`repository` 只用于健康检查。
pub fn router(
    web: ProductController,
    api: ProductsController,
    repository: Arc<dyn Repository<Product>>,
    http: &HttpConfig,
) -> Router {
    Router::new()
        .merge(handler::web_routes(Arc::new(web)))
        .merge(handler::api_routes(Arc::new(api)))
        .merge(
            Router::new()
                .route("/health", get(health_check))
                .with_state(repository),
        )
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(http.timeout_seconds)))
}

/// 健康检查
async fn health_check(
    State(repository): State<Arc<dyn Repository<Product>>>,
) -> Result<Json<serde_json::Value>, CoreError> {
    repository.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
