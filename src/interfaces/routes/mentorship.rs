use actix_web::web;

use crate::handlers::mentorship;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/mentorship")
            .service(mentorship::request_mentorship)
            .service(mentorship::list_mentorship_requests)
            .service(mentorship::accept_mentorship)
            .service(mentorship::decline_mentorship),
    );
}
