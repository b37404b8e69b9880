//! 商品 HTML 视图

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use std::fmt::Write;

use super::controller::{ActionResult, View, INDEX_ACTION};
use super::model::{ModelState, Product};

const CONTROLLER_PATH: &str = "/Product";

impl IntoResponse for ActionResult {
    fn into_response(self) -> Response {
        match self {
            ActionResult::View(view) => Html(render(&view)).into_response(),
            ActionResult::NotFound => StatusCode::NOT_FOUND.into_response(),
            ActionResult::RedirectToAction(action) => {
                Redirect::to(&action_path(action)).into_response()
            }
        }
    }
}

pub fn action_path(action: &str) -> String {
    format!("{}/{}", CONTROLLER_PATH, action)
}

pub fn render(view: &View) -> String {
    let (title, body) = match view {
        View::Index(products) => ("Products", index(products)),
        View::Details(product) => ("Details", details(product)),
        View::Create {
            product,
            model_state,
        } => (
            "Create",
            form(&action_path("Create"), product.as_ref(), model_state, false),
        ),
        View::Edit {
            product,
            model_state,
        } => (
            "Edit",
            form(
                &format!("{}/Edit/{}", CONTROLLER_PATH, product.id),
                Some(product),
                model_state,
                true,
            ),
        ),
        View::Delete(product) => ("Delete", delete(product)),
    };

    layout(title, &body)
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title} - Product Catalog</title></head>\n<body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        body = body
    )
}

fn index(products: &[Product]) -> String {
    let mut html = format!(
        "<p><a href=\"{}\">Create New</a></p>\n<table>\n<tr><th>Name</th><th>Color</th><th>Price</th><th></th></tr>\n",
        action_path("Create")
    );

    for product in products {
        let _ = writeln!(
            html,
            "<tr><td>{name}</td><td>{color}</td><td>{price}</td><td><a href=\"{base}/Edit/{id}\">Edit</a> | <a href=\"{base}/Details/{id}\">Details</a> | <a href=\"{base}/Delete/{id}\">Delete</a></td></tr>",
            name = escape(&product.name),
            color = escape(product.color.as_deref().unwrap_or("")),
            price = product.price,
            base = CONTROLLER_PATH,
            id = product.id,
        );
    }

    html.push_str("</table>");
    html
}

fn fields(product: &Product) -> String {
    format!(
        "<dl>\n<dt>Name</dt><dd>{}</dd>\n<dt>Color</dt><dd>{}</dd>\n<dt>Price</dt><dd>{}</dd>\n</dl>",
        escape(&product.name),
        escape(product.color.as_deref().unwrap_or("")),
        product.price
    )
}

fn details(product: &Product) -> String {
    format!(
        "{}\n<p><a href=\"{base}/Edit/{id}\">Edit</a> | <a href=\"{base}/Index\">Back to List</a></p>",
        fields(product),
        base = CONTROLLER_PATH,
        id = product.id
    )
}

fn delete(product: &Product) -> String {
    format!(
        "<h3>Are you sure you want to delete this?</h3>\n{}\n<form method=\"post\" action=\"{base}/Delete/{id}\">\n<input type=\"hidden\" name=\"Id\" value=\"{id}\">\n<button type=\"submit\">Delete</button> | <a href=\"{base}/Index\">Back to List</a>\n</form>",
        fields(product),
        base = CONTROLLER_PATH,
        id = product.id
    )
}

fn form(action: &str, product: Option<&Product>, model_state: &ModelState, with_id: bool) -> String {
    let name = product.map(|p| p.name.as_str()).unwrap_or("");
    let color = product.and_then(|p| p.color.as_deref()).unwrap_or("");
    let price = product.map(|p| p.price.to_string()).unwrap_or_default();

    let mut html = format!("<form method=\"post\" action=\"{}\">\n", escape(action));
    if let (true, Some(product)) = (with_id, product) {
        let _ = writeln!(html, "<input type=\"hidden\" name=\"Id\" value=\"{}\">", product.id);
    }
    html.push_str(&input("Name", name, model_state));
    html.push_str(&input("Color", color, model_state));
    html.push_str(&input("Price", &price, model_state));
    let _ = write!(
        html,
        "<button type=\"submit\">Save</button>\n</form>\n<p><a href=\"{}\">Back to List</a></p>",
        action_path(INDEX_ACTION)
    );
    html
}

fn input(field: &str, value: &str, model_state: &ModelState) -> String {
    let mut html = format!(
        "<div>\n<label for=\"{field}\">{field}</label>\n<input id=\"{field}\" name=\"{field}\" value=\"{value}\">\n",
        field = field,
        value = escape(value)
    );
    for error in model_state.errors_for(field) {
        let _ = writeln!(html, "<span class=\"field-validation-error\">{}</span>", escape(error));
    }
    html.push_str("</div>\n");
    html
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"Kalem\" & 'Silgi'</b>"),
            "&lt;b&gt;&quot;Kalem&quot; &amp; &#39;Silgi&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_index_lists_every_product() {
        let html = render(&View::Index(vec![
            Product::new(1, "Kalem", "Kırmızı", 10.0),
            Product::new(2, "Silgi", "Beyaz", 5.0),
        ]));

        assert!(html.contains("Kalem"));
        assert!(html.contains("Kırmızı"));
        assert!(html.contains("/Product/Details/2"));
    }

    #[test]
    fn test_form_shows_validation_errors() {
        let mut model_state = ModelState::new();
        model_state.add_model_error("Name", "The Name field is required.");

        let html = render(&View::Create {
            product: Some(Product::new(0, "", "Mavi", 3.0)),
            model_state,
        });

        assert!(html.contains("The Name field is required."));
        assert!(html.contains("value=\"Mavi\""));
        assert!(!html.contains("name=\"Id\""));
    }

    #[test]
    fn test_edit_form_posts_to_route_id() {
        let html = render(&View::Edit {
            product: Product::new(2, "Silgi", "Beyaz", 5.0),
            model_state: ModelState::new(),
        });

        assert!(html.contains("action=\"/Product/Edit/2\""));
        assert!(html.contains("name=\"Id\" value=\"2\""));
    }

    #[test]
    fn test_redirect_response() {
        let response = ActionResult::RedirectToAction("Index").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/Product/Index");
    }
}
