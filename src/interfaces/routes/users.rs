use actix_web::web;

use crate::handlers::{profile, uploads};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(profile::get_profile)
        .service(profile::update_profile)
        .service(profile::set_availability)
        .service(profile::get_user)
        .service(profile::list_alumni)
        .service(uploads::upload_avatar)
        .service(uploads::upload_cv);
}
