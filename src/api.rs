//! HTTP surface: health, categories and product search.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::catalog::repository::{search_products, PaginatedResponse, ProductRow, DEFAULT_PER_PAGE};
use crate::catalog::{ProductFilter, ProductSearchParams};
use crate::domain::category::{Category, CategoryCatalog};
use crate::StorefrontError;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Loaded once at startup.
    pub categories: Arc<CategoryCatalog>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy", "service": "worldoftoys"})) }))
        .route("/api/v1/categories", get(list_categories))
        .route("/api/v1/products", get(list_products))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCategory { .. } | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::InvalidConfig(_) | Self::Mail(_) | Self::Serialization(_) => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

async fn list_categories(State(s): State<AppState>) -> Json<Vec<Category>> {
    Json(s.categories.all().to_vec())
}

async fn list_products(
    State(s): State<AppState>,
    Query(p): Query<ProductSearchParams>,
) -> Result<Json<PaginatedResponse<ProductRow>>, StorefrontError> {
    let filter = ProductFilter::resolve(&p, &s.categories)?;
    let page = search_products(&s.db, &filter, p.page.unwrap_or(1), p.per_page.unwrap_or(DEFAULT_PER_PAGE)).await?;
    Ok(Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::CategoryType;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    fn app() -> Router {
        // Never connects: every request below is answered before the database is touched.
        let db = PgPoolOptions::new().connect_lazy("postgres://localhost/worldoftoys_test").unwrap();
        let categories = CategoryCatalog::new([
            Category::new(CategoryType::Brand, "Brand A"),
            Category::new(CategoryType::Age, "3-5 years"),
        ]);
        router(AppState { db, categories: Arc::new(categories) })
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_categories() {
        let (status, body) = get("/api/v1/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["kind"], "age");
        assert_eq!(body[1]["slug"], "brand-a");
    }

    #[tokio::test]
    async fn test_unknown_category_is_bad_request() {
        let (status, body) = get("/api/v1/products?brand=brand-z").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid brand category: brand-z");
    }

    #[tokio::test]
    async fn test_invalid_paging_is_bad_request() {
        let (status, _) = get("/api/v1/products?per_page=500").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
