/*!
 * # Authentication
 *
 * Password hashing (argon2, PHC strings), HS256 JWT issuance and
 * validation, the bearer-token middleware guarding the accounting and
 * user routes, and the `/auth/register` and `/auth/login` endpoints.
 */

use crate::{
    config::AppConfig,
    errors::{ApiError, ErrorResponse, ServiceError},
    handlers::common::{created_response, ValidatedJson},
    models::user,
    services::users::{NewUser, UserService},
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Claim structure for JWT tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // user id
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Authenticated caller, inserted into request extensions by [`auth_middleware`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub token_id: String,
}

/// Authentication configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiration: Duration,
}

impl AuthConfig {
    pub fn new(jwt_secret: String, token_expiration: Duration) -> Self {
        Self {
            jwt_secret,
            token_expiration,
        }
    }
}

impl From<&AppConfig> for AuthConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self::new(
            cfg.jwt_secret.clone(),
            Duration::from_secs(cfg.jwt_expiration as u64),
        )
    }
}

/// Hashes a password into an argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::HashError(e.to_string()))
}

/// Checks a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            false
        }
    }
}

/// Login credentials
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginCredentials {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: user::Model,
}

/// Authentication service that handles token issuance and validation
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    users: UserService,
}

impl AuthService {
    pub fn new(config: AuthConfig, users: UserService) -> Self {
        Self { config, users }
    }

    pub async fn register(&self, input: NewUser) -> Result<user::Model, ServiceError> {
        let created = self.users.create(input).await?;
        info!(user_id = created.id, "user registered");
        Ok(created)
    }

    /// Verifies credentials and issues a token. Unknown email, wrong
    /// password and disabled accounts all fail the same way.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, AuthError> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(AuthError::Service)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.enabled || !verify_password(&credentials.password, &user.password_hash) {
            debug!(user_id = user.id, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.generate_token(&user)?;
        info!(user_id = user.id, "user logged in");
        Ok(LoginResponse { token, user })
    }

    /// Generate a JWT token for a user
    pub fn generate_token(&self, user: &user::Model) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now
            + ChronoDuration::from_std(self.config.token_expiration)
                .map_err(|_| AuthError::TokenCreation("Invalid token duration".to_string()))?;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }

    /// Validate a JWT token and extract the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingAuth)?;
        let token = value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingAuth)?;

        let claims = self.validate_token(token)?;
        let user_id = claims.sub.parse().map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthUser {
            user_id,
            email: claims.email,
            token_id: claims.jti,
        })
    }
}

/// Authentication error types
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingAuth,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token creation failed: {0}")]
    TokenCreation(String),

    #[error(transparent)]
    Service(ServiceError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::Service(err) => err.into_response(),
            Self::TokenCreation(msg) => {
                tracing::error!(error = %msg, "token creation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Internal server error")),
                )
                    .into_response()
            }
            other => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(other.to_string())),
            )
                .into_response(),
        }
    }
}

/// Rejects requests without a valid bearer token and records the caller
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Response {
    match auth_service.authenticate(request.headers()) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Register handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = NewUser,
    responses(
        (status = 201, description = "User registered", body = user::Model),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register_handler(
    State(auth_service): State<Arc<AuthService>>,
    ValidatedJson(input): ValidatedJson<NewUser>,
) -> Result<Response, ApiError> {
    let created = auth_service.register(input).await?;
    Ok(created_response(created))
}

/// Login handler
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginCredentials,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(auth_service): State<Arc<AuthService>>,
    ValidatedJson(credentials): ValidatedJson<LoginCredentials>,
) -> Result<Json<LoginResponse>, AuthError> {
    auth_service.login(&credentials).await.map(Json)
}

/// Authentication routes
pub fn auth_routes() -> Router<Arc<AuthService>> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Extension methods for Router to add auth middleware
pub trait AuthRouterExt {
    fn with_auth(self, auth_service: Arc<AuthService>) -> Self;
}

impl<S> AuthRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self, auth_service: Arc<AuthService>) -> Self {
        self.layer(axum::middleware::from_fn_with_state(
            auth_service,
            auth_middleware,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_and_salts_differ() {
        let first = hash_password("correct horse battery").unwrap();
        let second = hash_password("correct horse battery").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));
        assert!(verify_password("correct horse battery", &first));
        assert!(!verify_password("wrong", &first));
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    fn service(secret: &str, lifetime: Duration) -> AuthService {
        let db = Arc::new(sea_orm::DatabaseConnection::Disconnected);
        AuthService::new(
            AuthConfig::new(secret.to_string(), lifetime),
            UserService::new(db),
        )
    }

    fn sample_user() -> user::Model {
        let now = Utc::now();
        user::Model {
            id: 42,
            first_name: "Sari".into(),
            last_name: "Wijaya".into(),
            email: "sari@example.com".into(),
            password_hash: String::new(),
            phone: String::new(),
            enabled: true,
            role: "user".into(),
            company_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_round_trip_carries_identity() {
        let svc = service(&"s".repeat(40), Duration::from_secs(3600));
        let token = svc.generate_token(&sample_user()).unwrap();
        let claims = svc.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "sari@example.com");
        assert!(claims.exp > claims.iat);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            format!("Bearer {}", token).parse().unwrap(),
        );
        let user = svc.authenticate(&headers).unwrap();
        assert_eq!(user.user_id, 42);
    }

    #[test]
    fn foreign_signature_is_rejected() {
        let issuer = service(&"a".repeat(40), Duration::from_secs(3600));
        let verifier = service(&"b".repeat(40), Duration::from_secs(3600));
        let token = issuer.generate_token(&sample_user()).unwrap();
        assert!(matches!(
            verifier.validate_token(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn missing_or_malformed_header_is_missing_auth() {
        let svc = service(&"s".repeat(40), Duration::from_secs(3600));
        assert!(matches!(
            svc.authenticate(&HeaderMap::new()),
            Err(AuthError::MissingAuth)
        ));

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert!(matches!(
            svc.authenticate(&headers),
            Err(AuthError::MissingAuth)
        ));
    }
}
