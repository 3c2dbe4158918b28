//! Basket route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::services::BasketLine;
use crate::state::AppState;

/// Basket line display data for templates.
#[derive(Clone)]
pub struct BasketLineView {
    pub product_id: String,
    pub name: String,
    pub color: String,
    pub size: String,
    pub preview: String,
    pub price: String,
    pub quantity: u32,
}

impl From<&BasketLine> for BasketLineView {
    fn from(line: &BasketLine) -> Self {
        Self {
            product_id: line.product_id.to_string(),
            name: line.name.clone(),
            color: line.color.clone(),
            size: line.size.clone(),
            preview: line.preview.clone(),
            price: line.price.display(),
            quantity: line.quantity,
        }
    }
}

/// Basket page template.
#[derive(Template, WebTemplate)]
#[template(path = "basket/show.html")]
pub struct BasketShowTemplate {
    pub lines: Vec<BasketLineView>,
    pub item_count: u32,
}

/// Display the basket page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let lines: Vec<BasketLineView> = state
        .basket()
        .lines()
        .await
        .iter()
        .map(BasketLineView::from)
        .collect();
    let item_count = lines.iter().map(|line| line.quantity).sum();

    BasketShowTemplate { lines, item_count }
}
