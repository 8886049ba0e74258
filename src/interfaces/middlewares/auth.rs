use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Bearer-token middleware. A valid token's claims are stashed in request
/// extensions on every route; routes outside the public table additionally
/// require one.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let path = req.path().to_string();
            let method = req.method().as_str().to_string();
            let public = is_public_route(&path, &method);

            let claims = match decode_claims(&req) {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::error!("auth middleware misconfigured: {}", e);
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::InternalServerError().json(serde_json::json!({
                            "error": "Internal server error"
                        })),
                    ));
                }
            };

            match claims {
                Some(claims) => {
                    req.extensions_mut().insert(claims);
                }
                // Anonymous callers pass through on public routes only.
                None if !public => {
                    tracing::warn!(path = %path, "missing or invalid credentials");
                    return Ok(custom_error_response(
                        req,
                        HttpResponse::Unauthorized().json(serde_json::json!({
                            "error": "Missing or invalid credentials"
                        })),
                    ));
                }
                None => {}
            }

            service.call(req).await.map(|res| res.map_into_boxed_body())
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    if method == "GET" && path.starts_with("/uploads/") {
        return true;
    }

    if method == "GET" {
        match path {
            "/" | "/api/health" | "/api/projects" | "/api/blog" | "/api/alumni" => return true,
            _ => {}
        }
        // Numeric detail routes are browsable anonymously; named
        // sub-resources (mine, recommended, messages, ...) are not.
        for prefix in ["/api/projects/", "/api/blog/", "/api/users/"] {
            if let Some(rest) = path.strip_prefix(prefix) {
                if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                    return true;
                }
            }
        }
    }

    matches!(
        (path, method),
        ("/api/auth/register", "POST") | ("/api/auth/login", "POST")
    )
}

/// Decodes the bearer token when one is present. An unusable token on a
/// public route is simply ignored; protected routes turn `None` into 401.
fn decode_claims(req: &ServiceRequest) -> Result<Option<Claims>, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let Some(token) = extract_token(req) else {
        return Ok(None);
    };

    match state.auth.token_service.decode_token(&token) {
        Ok(decoded) => Ok(Some(decoded.claims)),
        Err(e) => {
            tracing::debug!("token rejected: {}", e);
            Ok(None)
        }
    }
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::is_public_route;

    #[test]
    fn anonymous_browsing_routes_are_public() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/api/projects", "GET"));
        assert!(is_public_route("/api/projects/42", "GET"));
        assert!(is_public_route("/api/blog/7", "GET"));
        assert!(is_public_route("/api/users/3", "GET"));
        assert!(is_public_route("/api/alumni", "GET"));
        assert!(is_public_route("/uploads/projects/1/images/x.png", "GET"));
        assert!(is_public_route("/api/auth/login", "POST"));
    }

    #[test]
    fn named_subresources_stay_protected() {
        assert!(!is_public_route("/api/projects/recommended", "GET"));
        assert!(!is_public_route("/api/projects/mine", "GET"));
        assert!(!is_public_route("/api/profile", "GET"));
        assert!(!is_public_route("/api/projects", "POST"));
        assert!(!is_public_route("/api/conversations", "GET"));
        assert!(!is_public_route("/api/blog/7", "PUT"));
    }
}
