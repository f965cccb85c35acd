pub mod orders;

use actix_web::web;

use crate::errors::AppError;

/// JSON extractor settings: malformed bodies get the `ErrorResponse` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Path extractor settings: an id that does not parse names no order, so it
/// is answered with the same 404 body as an unknown id.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        log::debug!("Unparsable path parameter: {}", err);
        AppError::NotFound.into()
    })
}
