use actix_web::web;

use crate::handlers::{system, uploads};

mod auth;
mod blog;
mod mentorship;
mod messages;
mod projects;
mod users;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(system::health_check)
            .configure(auth::config_routes)
            .configure(users::config_routes)
            .configure(projects::config_routes)
            .configure(mentorship::config_routes)
            .configure(blog::config_routes)
            .configure(messages::config_routes),
    );

    cfg.service(uploads::serve_upload);
}
