//! `Json<T>` plus `validator` rules. Either failure is a 400 `ApiError`.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiError;

pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::bad_request(format!("Malformed JSON body: {}", rejection.body_text()))
            })?;
        body.validate()
            .map_err(|errors| ApiError::bad_request(describe(&errors)))?;
        Ok(ValidatedJson(body))
    }
}

/// `field: message` pairs, sorted by field so the text is stable.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let parts: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: {}", field, e.code),
            })
        })
        .collect();

    if parts.is_empty() {
        "Request body is invalid".to_string()
    } else {
        parts.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use crate::interfaces::http::modules::auth::LoginRequest;

    async fn login_echo(ValidatedJson(req): ValidatedJson<LoginRequest>) -> String {
        req.email
    }

    async fn post_login(body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/login", post(login_echo));
        let request = axum::http::Request::post("/login")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn passes_a_valid_body_through() {
        let (status, body) =
            post_login(r#"{"email":"clerk@pvz.ru","password":"secret-pass"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "clerk@pvz.ru");
    }

    #[tokio::test]
    async fn broken_json_is_bad_request() {
        let (status, body) = post_login("{\"email\":").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Malformed JSON body"), "{}", body);
    }

    #[tokio::test]
    async fn rule_violations_are_listed_by_field() {
        let (status, body) = post_login(r#"{"email":"","password":""}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json["message"],
            "email: email is required; password: password is required"
        );
    }
}
