//! 商品路由与处理器
//!
//! 处理器只做请求提取，然后把工作交给控制器。

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    routing::get,
    Form, Json, Router,
};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use super::api::{ApiResult, ProductsController};
use super::controller::{ActionResult, ProductController};
use super::model::{Product, ProductForm};
use crate::core::error::CoreError;

type WebState = State<Arc<ProductController>>;
type ApiState = State<Arc<ProductsController>>;

/// HTML 路由里的 `{id}` 段
///
/// 无法解析为整数时按 0 处理，由控制器按“不存在”返回 404（删除确认则重定向）。
/// JSON API 仍使用 `Path<i32>`，非法 id 直接 400。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteId(pub i32);

impl RouteId {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse() {
            Ok(id) => RouteId(id),
            Err(_) => {
                debug!(raw, "route id is not a number, using 0");
                RouteId(0)
            }
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RouteId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => RouteId::parse(&raw),
            Err(_) => RouteId(0),
        })
    }
}

/// `{controller}/{action}/{id?}` 形式的 HTML 路由
pub fn web_routes(controller: Arc<ProductController>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/Product", get(index))
        .route("/Product/Index", get(index))
        .route("/Product/Details/:id", get(details))
        .route("/Product/Create", get(create).post(create_post))
        .route("/Product/Edit/:id", get(edit).post(edit_post))
        .route("/Product/Delete/:id", get(delete).post(delete_confirmed))
        .with_state(controller)
}

/// JSON API 路由
pub fn api_routes(controller: Arc<ProductsController>) -> Router {
    Router::new()
        .route("/products", get(get_products).post(post_product))
        .route(
            "/products/:id",
            get(get_product).put(put_product).delete(delete_product),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(controller)
}

async fn index(State(controller): WebState) -> Result<ActionResult, CoreError> {
    controller.index().await
}

async fn details(
    State(controller): WebState,
    RouteId(id): RouteId,
) -> Result<ActionResult, CoreError> {
    controller.details(id).await
}

async fn create(State(controller): WebState) -> ActionResult {
    controller.create()
}

async fn create_post(
    State(controller): WebState,
    Form(form): Form<ProductForm>,
) -> Result<ActionResult, CoreError> {
    let (product, model_state) = form.bind();
    controller.create_post(product, model_state).await
}

async fn edit(
    State(controller): WebState,
    RouteId(id): RouteId,
) -> Result<ActionResult, CoreError> {
    controller.edit(id).await
}

async fn edit_post(
    State(controller): WebState,
    RouteId(id): RouteId,
    Form(form): Form<ProductForm>,
) -> Result<ActionResult, CoreError> {
    let (product, model_state) = form.bind();
    controller.edit_post(id, product, model_state).await
}

async fn delete(
    State(controller): WebState,
    RouteId(id): RouteId,
) -> Result<ActionResult, CoreError> {
    controller.delete(id).await
}

async fn delete_confirmed(
    State(controller): WebState,
    RouteId(id): RouteId,
) -> Result<ActionResult, CoreError> {
    controller.delete_confirmed(id).await
}

async fn get_products(State(controller): ApiState) -> Result<ApiResult<Vec<Product>>, CoreError> {
    controller.get_products().await
}

async fn get_product(
    State(controller): ApiState,
    Path(id): Path<i32>,
) -> Result<ApiResult<Product>, CoreError> {
    controller.get_product(id).await
}

async fn post_product(
    State(controller): ApiState,
    Json(product): Json<Product>,
) -> Result<ApiResult<Product>, CoreError> {
    controller.post_product(product).await
}

async fn put_product(
    State(controller): ApiState,
    Path(id): Path<i32>,
    Json(product): Json<Product>,
) -> Result<ApiResult<Product>, CoreError> {
    controller.put_product(id, product).await
}

async fn delete_product(
    State(controller): ApiState,
    Path(id): Path<i32>,
) -> Result<ApiResult<Product>, CoreError> {
    controller.delete_product(id).await
}
