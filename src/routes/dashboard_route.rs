use actix_web::{get, web, HttpResponse};
use askama::Template;

use crate::{domain::section::StoredRow, services::Store};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    rows: Vec<StoredRow>,
}

#[get("/")]
pub async fn dashboard(store: web::Data<Store>) -> HttpResponse {
    let rows = store.query_all().await.unwrap_or_else(|e| {
        log::error!("Failed to read crawled data for dashboard: {}", e);
        vec![]
    });

    match (DashboardTemplate { rows }).render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render dashboard: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
