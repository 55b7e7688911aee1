use actix_web::web;

pub mod domains;
pub mod search;
pub mod system;

/// Register all API routes under the caller's scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(search::search_questions)
        .service(search::search_stats)
        .service(domains::list_domains)
        .service(domains::domain_questions)
        .service(system::health);
}
