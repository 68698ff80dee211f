use crate::{api::employee, error::ApiError};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    // decode failures become JSON 400s; content type is not enforced
    let json_config = web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| ApiError::InvalidBody(err.to_string()).into());

    cfg.service(
        web::scope(&format!("{}/employee", api_prefix))
            .app_data(json_config)
            // /employee
            .service(
                web::resource("")
                    .route(web::post().to(employee::create_employee))
                    .default_service(web::to(employee::collection_fallback)),
            )
            // /employee/{id}, the whole remainder is the id
            .service(
                web::resource("/{id:.*}")
                    .route(web::get().to(employee::list_employees))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee))
                    .default_service(web::to(employee::method_not_allowed)),
            ),
    );
}
