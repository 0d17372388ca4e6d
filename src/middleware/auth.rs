use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

/// Identity issued by the external auth collaborator. `sub` carries the
/// user id; `role` distinguishes learners from staff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> crate::error::Result<Uuid> {
        self.sub
            .parse()
            .map_err(|_| crate::error::Error::Unauthorized("Invalid subject claim".to_string()))
    }

    pub fn is_staff(&self) -> bool {
        let role = self.role.as_deref().unwrap_or_default();
        ["coach", "admin"].iter().any(|r| r.eq_ignore_ascii_case(role))
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn decode_bearer(req: &Request) -> Result<Claims, Response> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err(unauthorized("missing_authorization"));
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err(unauthorized("bad_authorization"));
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return Err(unauthorized("unsupported_scheme"));
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| unauthorized("invalid_token"))
}

/// Any authenticated user. Rejection happens before any handler logic
/// runs.
pub async fn require_auth(mut req: Request, next: Next) -> Response {
    match decode_bearer(&req) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(rejection) => rejection,
    }
}

/// Coach or admin only.
pub async fn require_staff(mut req: Request, next: Next) -> Response {
    match decode_bearer(&req) {
        Ok(claims) => {
            if !claims.is_staff() {
                return (StatusCode::FORBIDDEN, Json(json!({ "error": "forbidden" })))
                    .into_response();
            }
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(rejection) => rejection,
    }
}
