//! 商品 Web 控制器
//!
//! 每个动作返回 [`ActionResult`]：渲染视图、404 或重定向。
//! 渲染在 `views` 中完成，控制器只决定结果。

use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use super::model::{ModelState, Product};
use crate::core::error::CoreError;
use crate::core::repository::Repository;

/// 控制器选择的视图及其模型
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Index(Vec<Product>),
    Details(Product),
    Create {
        product: Option<Product>,
        model_state: ModelState,
    },
    Edit {
        product: Product,
        model_state: ModelState,
    },
    Delete(Product),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    View(View),
    NotFound,
    RedirectToAction(&'static str),
}

pub const INDEX_ACTION: &str = "Index";

pub struct ProductController {
    repository: Arc<dyn Repository<Product>>,
}

impl ProductController {
    pub fn new(repository: Arc<dyn Repository<Product>>) -> Self {
        Self { repository }
    }

    /// GET: Product
    pub async fn index(&self) -> Result<ActionResult, CoreError> {
        let products = self.repository.get_all().await?;
        Ok(ActionResult::View(View::Index(products)))
    }

    /// GET: Product/Details/5
    pub async fn details(&self, id: i32) -> Result<ActionResult, CoreError> {
        Ok(match self.repository.get_by_id(id).await? {
            Some(product) => ActionResult::View(View::Details(product)),
            None => not_found(id),
        })
    }

    /// GET: Product/Create
    pub fn create(&self) -> ActionResult {
        ActionResult::View(View::Create {
            product: None,
            model_state: ModelState::new(),
        })
    }

    /// POST: Product/Create
    ///
    /// `model_state` 携带表单绑定阶段的错误，这里再合并字段验证结果。
    pub async fn create_post(
        &self,
        product: Product,
        mut model_state: ModelState,
    ) -> Result<ActionResult, CoreError> {
        model_state.merge(product.validate());

        if !model_state.is_valid() {
            return Ok(ActionResult::View(View::Create {
                product: Some(product),
                model_state,
            }));
        }

        self.repository.create(product).await?;
        Ok(ActionResult::RedirectToAction(INDEX_ACTION))
    }

    /// GET: Product/Edit/5
    pub async fn edit(&self, id: i32) -> Result<ActionResult, CoreError> {
        Ok(match self.repository.get_by_id(id).await? {
            Some(product) => ActionResult::View(View::Edit {
                product,
                model_state: ModelState::new(),
            }),
            None => not_found(id),
        })
    }

    /// POST: Product/Edit/5
    ///
    /// 路由 id 与表单 id 不一致时返回 404（JSON API 对同一情况返回 400）。
    pub async fn edit_post(
        &self,
        id: i32,
        product: Product,
        mut model_state: ModelState,
    ) -> Result<ActionResult, CoreError> {
        if id != product.id {
            debug!(route_id = id, body_id = product.id, "edit id mismatch");
            return Ok(ActionResult::NotFound);
        }

        model_state.merge(product.validate());

        if !model_state.is_valid() {
            return Ok(ActionResult::View(View::Edit {
                product,
                model_state,
            }));
        }

        self.repository.update(&product).await?;
        Ok(ActionResult::RedirectToAction(INDEX_ACTION))
    }

    /// GET: Product/Delete/5
    pub async fn delete(&self, id: i32) -> Result<ActionResult, CoreError> {
        Ok(match self.repository.get_by_id(id).await? {
            Some(product) => ActionResult::View(View::Delete(product)),
            None => not_found(id),
        })
    }

    /// POST: Product/Delete/5
    ///
    /// 商品不存在时静默忽略，始终重定向到列表。
    pub async fn delete_confirmed(&self, id: i32) -> Result<ActionResult, CoreError> {
        if let Some(product) = self.repository.get_by_id(id).await? {
            self.repository.delete(&product).await?;
        }

        Ok(ActionResult::RedirectToAction(INDEX_ACTION))
    }
}

fn not_found(id: i32) -> ActionResult {
    debug!(id, "product not found");
    ActionResult::NotFound
}
