//! JSON body extractor with JSON error bodies.
//!
//! Wraps `axum::Json<Value>` so rejections come back as `{"detail": ...}`
//! instead of axum's plain-text messages. Field checks happen later in the
//! schema layer, so any well-formed JSON value is accepted here. A request
//! without a `Content-Type` carries no data and reads as `{}`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde_json::{Map, Value};

use crate::http::error::AppError;

/// Parsed request body.
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Some(content_type) = req.headers().get(CONTENT_TYPE) else {
            // No media type means no data, same as an empty object.
            return Ok(JsonBody(Value::Object(Map::new())));
        };
        let content_type = content_type.to_str().unwrap_or("").to_string();

        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(AppError::UnsupportedMediaType(format!(
                    "Unsupported media type \"{content_type}\" in request."
                )))
            }
            Err(rejection) => Err(AppError::BadRequest(format!(
                "JSON parse error - {}",
                rejection.body_text()
            ))),
        }
    }
}
