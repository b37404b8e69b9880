//! 商品数据模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

use crate::core::repository::{Entity, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    #[validate(length(min = 1, message = "The Name field is required."))]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub price: f64,
}

impl Product {
    pub fn new(id: i32, name: &str, color: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            color: Some(color.to_string()),
            price,
        }
    }
}

impl Entity for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["name", "color", "price"];

    fn id(&self) -> i32 {
        self.id
    }

    fn with_id(self, id: i32) -> Self {
        Self { id, ..self }
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(Some(self.name.clone())),
            Value::Text(self.color.clone()),
            Value::Float(self.price),
        ]
    }
}

/// 示例商品
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(1, "Kalem", "Kırmızı", 10.0),
        Product::new(2, "Silgi", "Beyaz", 5.0),
        Product::new(3, "Defter", "Mavi", 20.0),
    ]
}

/// 字段级错误集合
///
/// 绑定错误和验证错误都记录在这里，表单视图按字段展示。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors_for(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 合并 `validator` 的字段错误，字段名转成表单字段名（首字母大写）
    pub fn merge(&mut self, result: Result<(), ValidationErrors>) {
        let Err(errors) = result else {
            return;
        };

        for (field, field_errors) in errors.field_errors() {
            let field = form_field_name(&field.to_string());
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid.", field));
                self.add_model_error(field.clone(), message);
            }
        }
    }
}

fn form_field_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// HTML 表单提交的原始字段
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(rename = "Id", default)]
    pub id: Option<String>,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Color", default)]
    pub color: Option<String>,
    #[serde(rename = "Price", default)]
    pub price: Option<String>,
}

impl ProductForm {
    /// 把表单转换成 [`Product`]，无法转换的字段记入 [`ModelState`]
    ///
    /// 空字符串按缺失处理：`Name` 变成空串（由验证规则拒绝），`Color` 变成 `None`。
    pub fn bind(self) -> (Product, ModelState) {
        let mut model_state = ModelState::new();

        let id = match non_empty(self.id) {
            None => 0,
            Some(raw) => raw.parse::<i32>().unwrap_or_else(|_| {
                model_state.add_model_error("Id", format!("The value '{}' is not valid for Id.", raw));
                0
            }),
        };

        let price = match non_empty(self.price) {
            None => {
                model_state.add_model_error("Price", "The Price field is required.");
                0.0
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(price) if price.is_finite() => price,
                _ => {
                    model_state
                        .add_model_error("Price", format!("The value '{}' is not valid for Price.", raw));
                    0.0
                }
            },
        };

        let product = Product {
            id,
            name: non_empty(self.name).unwrap_or_default(),
            color: non_empty(self.color),
            price,
        };

        (product, model_state)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(id: &str, name: &str, color: &str, price: &str) -> ProductForm {
        ProductForm {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            color: Some(color.to_string()),
            price: Some(price.to_string()),
        }
    }

    #[test]
    fn test_bind_valid_form() {
        let (product, model_state) = form("2", "Silgi", "Beyaz", "5").bind();
        assert!(model_state.is_valid());
        assert_eq!(product, Product::new(2, "Silgi", "Beyaz", 5.0));
    }

    #[test]
    fn test_bind_missing_id_defaults_to_zero() {
        let (product, model_state) = ProductForm {
            name: Some("Kalem".to_string()),
            price: Some("10.5".to_string()),
            ..Default::default()
        }
        .bind();

        assert!(model_state.is_valid());
        assert_eq!(product.id, 0);
        assert_eq!(product.color, None);
        assert_eq!(product.price, 10.5);
    }

    #[test]
    fn test_bind_invalid_price() {
        let (_, model_state) = form("1", "Kalem", "", "ten").bind();
        assert!(!model_state.is_valid());
        assert_eq!(
            model_state.errors_for("Price"),
            ["The value 'ten' is not valid for Price.".to_string()]
        );
    }

    #[test]
    fn test_bind_missing_price() {
        let (_, model_state) = form("1", "Kalem", "", " ").bind();
        assert_eq!(model_state.errors_for("Price").len(), 1);
    }

    #[test]
    fn test_name_required() {
        let (product, mut model_state) = form("1", "   ", "Mavi", "3").bind();
        assert!(model_state.is_valid());

        model_state.merge(product.validate());
        assert!(!model_state.is_valid());
        assert_eq!(
            model_state.errors_for("Name"),
            ["The Name field is required.".to_string()]
        );
        assert!(model_state.errors_for("Color").is_empty());
    }

    #[test]
    fn test_entity_values_follow_columns() {
        let product = Product::new(7, "Defter", "Mavi", 20.0);
        let values = product.values();

        assert_eq!(values.len(), Product::COLUMNS.len());
        assert_eq!(values[0], Value::Text(Some("Defter".to_string())));
        assert_eq!(values[2], Value::Float(20.0));
        assert_eq!(product.with_id(9).id, 9);
    }
}
