//! # Authentication Module
//!
//! Administrator accounts, login and role-based access.
//!
//! ## Features
//! - Administrator creation with Argon2id password hashing
//! - Login by email and password, answered with a signed JWT (HS256, 24h)
//! - `AuthenticatedAdmin` extractor that validates `Authorization: Bearer <jwt>`
//! - Role gates on top of the extractor (`Adm` for the administrator listing)

use crate::api::AppState;
use crate::db::{Page, Store};
use crate::error::{ApiError, ApiResult, Validation};
use crate::models::{Administrator, Role};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Path, Query, State},
    http::{header::LOCATION, request::Parts, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation as JwtValidation};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// Configuration Constants
// ============================================================================

/// Lifetime of an issued token
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Minimum signing secret length (HS256 key size)
pub const MIN_SECRET_LENGTH: usize = 32;

// ============================================================================
// Passwords
// ============================================================================

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> ApiResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Runs Argon2 work on the blocking pool so it does not stall the async workers.
async fn run_blocking<T, F>(f: F) -> ApiResult<T>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password task failed: {}", e)))?
}

/// Emails are stored and looked up without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

// ============================================================================
// Tokens
// ============================================================================

/// JWT Claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (administrator ID)
    pub sub: i64,
    pub email: String,
    pub perfil: Role,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Issues and validates HS256 tokens with a single shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8]) -> ApiResult<Self> {
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ApiError::Internal(anyhow::anyhow!(
                "JWT secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        })
    }

    /// Generate a token for `admin`, valid for 24 hours from now
    pub fn issue(&self, admin: &Administrator) -> ApiResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin.id,
            email: admin.email.clone(),
            perfil: admin.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> ApiResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("JWT encoding failed: {}", e)))
    }

    /// Checks signature and expiry; issuer and audience are not checked.
    pub fn validate(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = JwtValidation::new(Algorithm::HS256);
        validation.validate_aud = false;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))
    }
}

// ============================================================================
// Auth Middleware Extractor
// ============================================================================

/// The caller identified by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedAdmin {
    pub fn require_role(&self, role: Role) -> ApiResult<()> {
        if self.role == role {
            Ok(())
        } else {
            warn!(email = %self.email, role = %self.role, required = %role, "Role check failed");
            Err(ApiError::forbidden(format!("Requires role {}", role)))
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    TokenService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Missing or malformed bearer token"))?;

        let claims = TokenService::from_ref(state).validate(bearer.token())?;

        Ok(AuthenticatedAdmin {
            id: claims.sub,
            email: claims.email,
            role: claims.perfil,
        })
    }
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    #[serde(rename = "senha", alias = "password")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub email: String,
    pub perfil: Role,
    pub token: String,
}

/// Body for creating an administrator. Missing fields are reported as validation messages.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AdministratorRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "senha", alias = "password")]
    pub password: Option<String>,
    /// `Adm` or `Editor`
    #[serde(default, rename = "perfil", alias = "role")]
    pub role: Option<String>,
}

/// An administrator as exposed over HTTP: no password material.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdministratorView {
    pub id: i64,
    pub email: String,
    pub perfil: Role,
}

impl From<Administrator> for AdministratorView {
    fn from(admin: Administrator) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            perfil: admin.role,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based page number (10 per page)
    pub pagina: Option<u32>,
}

/// A validated administrator creation request
#[derive(Debug)]
pub struct NewAdministrator {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl AdministratorRequest {
    /// Collects every problem with the request, or returns the typed request.
    pub fn validate(self) -> ApiResult<NewAdministrator> {
        let email = self.email.unwrap_or_default();
        let password = self.password.unwrap_or_default();

        let mut validation = Validation::new();
        validation
            .check(email.trim().is_empty(), "Email não pode ser vazio")
            .check(password.is_empty(), "Senha não pode ser vazia");

        let role = match self.role.as_deref().map(str::trim) {
            None | Some("") => {
                validation.push("Perfil não pode ser vazio");
                None
            }
            Some(value) => match value.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    validation.push("Perfil inválido: use Adm ou Editor");
                    None
                }
            },
        };

        validation.finish()?;

        let role = role.ok_or_else(|| ApiError::Validation(vec!["Perfil não pode ser vazio".into()]))?;
        Ok(NewAdministrator {
            email: normalize_email(&email),
            password,
            role,
        })
    }
}

// ============================================================================
// AdministratorService Implementation
// ============================================================================

#[derive(Clone)]
pub struct AdministratorService {
    store: Arc<Store>,
}

impl AdministratorService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Returns the administrator whose email and password both match.
    /// Unknown email and wrong password are both `None`.
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<Option<Administrator>> {
        let Some(admin) = self.find_by_email(&req.email).await? else {
            return Ok(None);
        };

        let password = req.password.clone();
        let hash = admin.password_hash.clone();
        if run_blocking(move || verify_password(&password, &hash)).await? {
            Ok(Some(admin))
        } else {
            Ok(None)
        }
    }

    pub async fn list(&self, page: Option<u32>) -> ApiResult<Vec<Administrator>> {
        let Page { limit, offset } = Page::new(page);

        self.store
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, email, password_hash, role FROM administrators
                     ORDER BY id LIMIT ?1 OFFSET ?2",
                )?;
                let admins = stmt
                    .query_map(params![limit, offset], Administrator::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(admins)
            })
            .await
    }

    pub async fn find_by_id(&self, id: i64) -> ApiResult<Option<Administrator>> {
        self.store
            .call(move |conn| {
                conn.query_row(
                    "SELECT id, email, password_hash, role FROM administrators WHERE id = ?1",
                    params![id],
                    Administrator::from_row,
                )
                .optional()
            })
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> ApiResult<Option<Administrator>> {
        let email = normalize_email(email);
        self.store
            .call(move |conn| {
                conn.query_row(
                    "SELECT id, email, password_hash, role FROM administrators WHERE email = ?1",
                    params![email],
                    Administrator::from_row,
                )
                .optional()
            })
            .await
    }

    /// Register a new administrator. A taken email is a conflict, whether the
    /// lookup sees it or a concurrent insert wins the UNIQUE constraint.
    pub async fn create(&self, new: NewAdministrator) -> ApiResult<Administrator> {
        let NewAdministrator {
            email,
            password,
            role,
        } = new;
        let email = normalize_email(&email);

        if self.find_by_email(&email).await?.is_some() {
            return Err(ApiError::conflict("Administrator already exists"));
        }

        let password_hash = run_blocking(move || hash_password(&password)).await?;

        let admin = self
            .store
            .call(move |conn| {
                let inserted = conn.execute(
                    "INSERT INTO administrators (email, password_hash, role) VALUES (?1, ?2, ?3)",
                    params![email, password_hash, role.as_str()],
                );
                match inserted {
                    Ok(_) => Ok(Some(Administrator {
                        id: conn.last_insert_rowid(),
                        email,
                        password_hash,
                        role,
                    })),
                    Err(rusqlite::Error::SqliteFailure(e, _))
                        if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                    {
                        Ok(None)
                    }
                    Err(e) => Err(e),
                }
            })
            .await?
            .ok_or_else(|| ApiError::conflict("Administrator already exists"))?;

        info!(id = admin.id, email = %admin.email, role = %admin.role, "Administrator created");
        Ok(admin)
    }

    /// Creates an `Adm` account for `email` unless one with that email exists.
    /// Returns true when an account was created.
    pub async fn seed(&self, email: &str, password: &str) -> ApiResult<bool> {
        if self.find_by_email(email).await?.is_some() {
            debug!(email, "Seed administrator already present");
            return Ok(false);
        }

        self.create(NewAdministrator {
            email: normalize_email(email),
            password: password.to_string(),
            role: Role::Adm,
        })
        .await?;
        Ok(true)
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// Exchanges email and password for a token
#[utoipa::path(
    post,
    path = "/administradores/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Email or password do not match"),
    ),
    tag = "Administradores"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let Some(admin) = state.administrators.login(&req).await? else {
        warn!(email = %req.email, "Login rejected");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    let token = state.tokens.issue(&admin)?;
    info!(email = %admin.email, "Administrator logged in");

    Ok(Json(LoginResponse {
        email: admin.email,
        perfil: admin.role,
        token,
    }))
}

/// Lists administrators (role `Adm` only)
#[utoipa::path(
    get,
    path = "/administradores",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of administrators", body = [AdministratorView]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token role is not Adm"),
    ),
    security(("bearer" = [])),
    tag = "Administradores"
)]
pub async fn list_administrators(
    caller: AuthenticatedAdmin,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Vec<AdministratorView>>> {
    caller.require_role(Role::Adm)?;

    let admins = state.administrators.list(query.pagina).await?;
    Ok(Json(admins.into_iter().map(AdministratorView::from).collect()))
}

/// Fetches an administrator by id (role `Adm` only)
#[utoipa::path(
    get,
    path = "/administradores/{id}",
    params(("id" = i64, Path, description = "Administrator id")),
    responses(
        (status = 200, description = "The administrator", body = AdministratorView),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Token role is not Adm"),
        (status = 404, description = "No administrator with this id"),
    ),
    security(("bearer" = [])),
    tag = "Administradores"
)]
pub async fn get_administrator(
    caller: AuthenticatedAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<AdministratorView>> {
    caller.require_role(Role::Adm)?;

    let admin = state
        .administrators
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Administrator {} not found", id)))?;
    Ok(Json(admin.into()))
}

/// Creates an administrator
#[utoipa::path(
    post,
    path = "/administradores",
    request_body = AdministratorRequest,
    responses(
        (status = 201, description = "Administrator created", body = AdministratorView),
        (status = 400, description = "Invalid fields", body = crate::error::ValidationErrorBody),
        (status = 409, description = "Email already registered"),
    ),
    tag = "Administradores"
)]
pub async fn create_administrator(
    State(state): State<AppState>,
    Json(req): Json<AdministratorRequest>,
) -> ApiResult<impl IntoResponse> {
    let new = req.validate()?;
    let admin = state.administrators.create(new).await?;
    let location = format!("/administradores/{}", admin.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(AdministratorView::from(admin)),
    ))
}

// ============================================================================
// Router
// ============================================================================

pub fn administrator_routes() -> Router<AppState> {
    Router::new()
        .route("/administradores/login", post(login))
        .route("/login", post(login))
        .route(
            "/administradores",
            get(list_administrators).post(create_administrator),
        )
        .route("/administradores/:id", get(get_administrator))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-that-is-at-least-32-bytes-long";

    async fn create_test_service() -> AdministratorService {
        let store = Arc::new(Store::in_memory().await.unwrap());
        AdministratorService::new(store)
    }

    fn new_admin(email: &str, password: &str, role: Role) -> NewAdministrator {
        NewAdministrator {
            email: email.to_string(),
            password: password.to_string(),
            role,
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_password_hashing() {
        let password = "supersecret123";

        let hash = hash_password(password).unwrap();
        assert_ne!(hash, password);
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(TokenService::new(b"short").is_err());
        assert!(TokenService::new(SECRET).is_ok());
    }

    #[test]
    fn test_token_round_trip() {
        let tokens = TokenService::new(SECRET).unwrap();
        let admin = Administrator {
            id: 3,
            email: "editor@teste.com".into(),
            password_hash: String::new(),
            role: Role::Editor,
        };

        let claims = tokens.validate(&tokens.issue(&admin).unwrap()).unwrap();
        assert_eq!(claims.sub, 3);
        assert_eq!(claims.email, "editor@teste.com");
        assert_eq!(claims.perfil, Role::Editor);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_HOURS * 3600);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = TokenService::new(SECRET).unwrap();
        let issued = Utc::now() - Duration::hours(25);
        let token = tokens
            .encode(&Claims {
                sub: 1,
                email: "old@teste.com".into(),
                perfil: Role::Adm,
                iat: issued.timestamp(),
                exp: (issued + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
            })
            .unwrap();

        assert!(matches!(tokens.validate(&token), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let ours = TokenService::new(SECRET).unwrap();
        let theirs = TokenService::new(b"another-secret-that-is-also-32-bytes!!").unwrap();
        let admin = Administrator {
            id: 1,
            email: "adm@teste.com".into(),
            password_hash: String::new(),
            role: Role::Adm,
        };

        let token = theirs.issue(&admin).unwrap();
        assert!(ours.validate(&token).is_err());
        assert!(ours.validate("not-a-jwt").is_err());
    }

    #[test]
    fn test_require_role() {
        let caller = AuthenticatedAdmin {
            id: 1,
            email: "editor@teste.com".into(),
            role: Role::Editor,
        };
        assert!(caller.require_role(Role::Editor).is_ok());
        assert!(matches!(
            caller.require_role(Role::Adm),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn test_request_validation_messages() {
        let err = AdministratorRequest::default().validate().unwrap_err();
        match err {
            ApiError::Validation(msgs) => assert_eq!(
                msgs,
                [
                    "Email não pode ser vazio",
                    "Senha não pode ser vazia",
                    "Perfil não pode ser vazio"
                ]
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_role_has_no_default() {
        let req = AdministratorRequest {
            email: Some("a@b.com".into()),
            password: Some("123456".into()),
            role: None,
        };
        assert!(matches!(req.validate(), Err(ApiError::Validation(m)) if m == ["Perfil não pode ser vazio"]));
    }

    #[test]
    fn test_unknown_role_rejected() {
        let req = AdministratorRequest {
            email: Some("a@b.com".into()),
            password: Some("123456".into()),
            role: Some("Root".into()),
        };
        assert!(matches!(req.validate(), Err(ApiError::Validation(m)) if m == ["Perfil inválido: use Adm ou Editor"]));
    }

    #[test]
    fn test_valid_request() {
        let req: AdministratorRequest =
            serde_json::from_str(r#"{"email": "adm@teste.com", "senha": "123456", "perfil": "Adm"}"#)
                .unwrap();
        let new = req.validate().unwrap();
        assert_eq!(new.email, "adm@teste.com");
        assert_eq!(new.role, Role::Adm);
    }

    #[tokio::test]
    async fn test_create_and_login() {
        let service = create_test_service().await;

        let admin = service
            .create(new_admin("editor@teste.com", "123456", Role::Editor))
            .await
            .unwrap();
        assert_ne!(admin.password_hash, "123456");

        let found = service
            .login(&login_request("editor@teste.com", "123456"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, admin.id);
        assert_eq!(found.role, Role::Editor);

        assert!(service
            .login(&login_request("editor@teste.com", "wrong"))
            .await
            .unwrap()
            .is_none());
        assert!(service
            .login(&login_request("nobody@teste.com", "123456"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let service = create_test_service().await;
        service
            .create(new_admin("adm@teste.com", "123456", Role::Adm))
            .await
            .unwrap();

        let result = service
            .create(new_admin("adm@teste.com", "other", Role::Editor))
            .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_duplicate_create_conflicts() {
        let service = create_test_service().await;
        let other = service.clone();

        let (a, b) = tokio::join!(
            service.create(new_admin("adm@teste.com", "123456", Role::Adm)),
            other.create(new_admin("adm@teste.com", "654321", Role::Editor)),
        );

        let conflicts = [&a, &b]
            .iter()
            .filter(|r| matches!(r, Err(ApiError::Conflict(_))))
            .count();
        assert_eq!(conflicts, 1, "a={:?} b={:?}", a.is_ok(), b.is_ok());
        assert!(a.is_ok() || b.is_ok());
        assert_eq!(service.list(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_email_is_normalized_everywhere() {
        let service = create_test_service().await;

        let req: AdministratorRequest = serde_json::from_str(
            r#"{"email": " adm@teste.com ", "senha": "123456", "perfil": "Adm"}"#,
        )
        .unwrap();
        let admin = service.create(req.validate().unwrap()).await.unwrap();
        assert_eq!(admin.email, "adm@teste.com");

        for email in [" adm@teste.com ", "adm@teste.com", "\tadm@teste.com"] {
            let found = service
                .login(&login_request(email, "123456"))
                .await
                .unwrap();
            assert_eq!(found.map(|a| a.id), Some(admin.id), "login as {:?}", email);
        }

        assert!(!service.seed("  adm@teste.com", "other").await.unwrap());
        let result = service
            .create(new_admin("adm@teste.com  ", "other", Role::Editor))
            .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_and_find() {
        let service = create_test_service().await;
        service
            .store
            .call(|conn| {
                for i in 0..12 {
                    conn.execute(
                        "INSERT INTO administrators (email, password_hash, role) VALUES (?1, 'x', 'Editor')",
                        params![format!("adm{}@teste.com", i)],
                    )?;
                }
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(service.list(None).await.unwrap().len(), 10);
        let second = service.list(Some(2)).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].email, "adm10@teste.com");

        let first = service.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(first.email, "adm0@teste.com");
        assert!(service.find_by_id(100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let service = create_test_service().await;

        assert!(service.seed("administrador@teste.com", "123456").await.unwrap());
        assert!(!service.seed("administrador@teste.com", "other").await.unwrap());

        let admin = service
            .login(&login_request("administrador@teste.com", "123456"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Adm);
    }
}
