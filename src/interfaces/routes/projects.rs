use actix_web::web;

use crate::handlers::{applications, projects, uploads};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    // Named sub-routes must register before the `{id}` catch-alls.
    cfg.service(projects::recommended_projects)
        .service(projects::my_projects)
        .service(projects::list_projects)
        .service(projects::create_project)
        .service(projects::project_detail)
        .service(projects::update_project)
        .service(projects::apply_to_project)
        .service(projects::withdraw_application)
        .service(uploads::upload_project_image)
        .service(uploads::upload_project_document)
        .service(applications::list_applications)
        .service(applications::accept_application)
        .service(applications::decline_application)
        .service(applications::complete_application);
}
