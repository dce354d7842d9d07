use std::{future::Future, pin::Pin, rc::Rc};

use actix_web::{
    Error, HttpMessage, HttpResponse,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::jwt;
use futures::future::{Ready, ok};

pub struct AuthMiddleware {
    jwt_secret: Rc<String>,
}

impl AuthMiddleware {
    pub fn new(jwt_secret: String) -> Self {
        AuthMiddleware {
            jwt_secret: Rc::new(jwt_secret),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
            jwt_secret: self.jwt_secret.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    jwt_secret: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token_value = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| {
                header
                    .strip_prefix("Bearer ")
                    .map(|token| token.to_string())
            });

        let srv = Rc::clone(&self.service);
        let secret = Rc::clone(&self.jwt_secret);

        Box::pin(async move {
            if let Some(token) = token_value {
                // validate token and insert claims to request object for future usage
                match jwt::validate_jwt(&token, &secret) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                        srv.call(req).await.map(|res| res.map_into_boxed_body())
                    }
                    Err(_) => {
                        let response = HttpResponse::Unauthorized()
                            .json(serde_json::json!({ "msg": "Invalid token" }))
                            .map_into_boxed_body();
                        Ok(req.into_response(response))
                    }
                }
            } else {
                // no token passed - 401
                let response = HttpResponse::Unauthorized()
                    .json(serde_json::json!({ "msg": "No authorization token provided" }))
                    .map_into_boxed_body();
                Ok(req.into_response(response))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, Responder, get, http::StatusCode, test, web};
    use common::{
        env_config::JwtConfig,
        jwt::{JwtClaims, generate_jwt},
    };
    use uuid::Uuid;

    const SECRET: &str = "middleware-test-secret";

    #[get("/whoami")]
    async fn whoami(claims: web::ReqData<JwtClaims>) -> impl Responder {
        claims.user_id.to_string()
    }

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 1,
        }
    }

    #[actix_web::test]
    async fn rejects_requests_without_a_token() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(SECRET.to_string()))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn rejects_garbage_tokens() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(SECRET.to_string()))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn injects_claims_for_valid_tokens() {
        let user_id = Uuid::new_v4();
        let token = generate_jwt(user_id, &test_jwt_config()).expect("token generated");

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(SECRET.to_string()))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = test::read_body(res).await;
        assert_eq!(body, user_id.to_string().as_bytes());
    }

    #[actix_web::test]
    async fn rejects_tokens_signed_with_another_secret() {
        let other_config = JwtConfig {
            secret: "some-other-secret".to_string(),
            expiration_hours: 1,
        };
        let token = generate_jwt(Uuid::new_v4(), &other_config).expect("token generated");

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(SECRET.to_string()))
                .service(whoami),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
