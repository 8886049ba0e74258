use actix_web::web;

use crate::handlers::{blog, uploads};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(blog::create_blog_post)
        .service(blog::list_blog_posts)
        .service(blog::get_blog_post)
        .service(blog::update_blog_post)
        .service(blog::delete_blog_post)
        .service(blog::toggle_like)
        .service(uploads::upload_blog_image)
        .service(uploads::upload_blog_pdf);
}
