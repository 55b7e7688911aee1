use actix_web::{get, web, HttpResponse};
use skillcompass_common::SkillCompassError;
use std::sync::Arc;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::types::{DomainQuestionsResponse, DomainsResponse};

/// Distinct question domains
#[get("/search/domains")]
pub async fn list_domains(state: web::Data<Arc<AppState>>) -> ApiResult<HttpResponse> {
    let index = state.index.get()?;

    Ok(HttpResponse::Ok().json(DomainsResponse {
        success: true,
        data: index.domains(),
    }))
}

/// Questions belonging to one domain
#[get("/search/domains/{domain}/questions")]
pub async fn domain_questions(
    path: web::Path<String>,
    state: web::Data<Arc<AppState>>,
) -> ApiResult<HttpResponse> {
    let domain = path.into_inner();
    let index = state.index.get()?;
    let data: Vec<_> = index
        .questions_in_domain(&domain)
        .into_iter()
        .cloned()
        .collect();

    if data.is_empty() {
        return Err(SkillCompassError::not_found(format!("domain '{}'", domain)).into());
    }

    Ok(HttpResponse::Ok().json(DomainQuestionsResponse {
        success: true,
        domain,
        data,
    }))
}
