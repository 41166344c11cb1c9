//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod labels;
pub mod recipes;
pub mod recipes_dto;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api/v1` handler plus the extractor error handlers.
///
/// Mount inside a scope, e.g. `web::scope("/api/v1").configure(api_services)`.
pub fn api_services(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(users::register)
        .service(users::login)
        .service(users::logout)
        .service(users::current_user)
        .service(recipes::list_recipes)
        .service(recipes::create_recipe)
        .service(recipes::get_recipe)
        .service(recipes::partial_update_recipe)
        .service(recipes::update_recipe)
        .service(recipes::delete_recipe)
        .service(labels::list_tags)
        .service(labels::rename_tag)
        .service(labels::replace_tag)
        .service(labels::delete_tag)
        .service(labels::list_ingredients)
        .service(labels::rename_ingredient)
        .service(labels::replace_ingredient)
        .service(labels::delete_ingredient);
}
