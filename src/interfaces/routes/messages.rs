use actix_web::web;

use crate::handlers::messages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(messages::open_conversation)
        .service(messages::list_conversations)
        .service(messages::fetch_messages)
        .service(messages::send_message);
}
