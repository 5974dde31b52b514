use actix_web::{get, web, HttpResponse};

use crate::{domain::section::SectionRecord, services::Store};

#[get("/crawled_data")]
pub async fn crawled_data(store: web::Data<Store>) -> HttpResponse {
    let rows = store.query_all().await.unwrap_or_else(|e| {
        log::error!("Failed to read crawled data: {}", e);
        vec![]
    });

    let records: Vec<SectionRecord> = rows.into_iter().map(SectionRecord::from).collect();
    HttpResponse::Ok().json(records)
}
