//! Middleware de autenticación JWT
//!
//! Verifica el token Bearer, inyecta el usuario autenticado en las
//! extensions de la request y restringe el acceso por rol.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::user::UserRole,
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token, JwtClaims},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub driver_id: Option<Uuid>,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &JwtClaims) -> Result<Self, AppError> {
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("ID de usuario inválido".to_string()))?;

        let role: UserRole = claims
            .role
            .parse()
            .map_err(|_| AppError::Unauthorized("Rol inválido en el token".to_string()))?;

        let driver_id = claims
            .driver_id
            .as_deref()
            .map(Uuid::parse_str)
            .transpose()
            .map_err(|_| AppError::Unauthorized("ID de chauffeur inválido".to_string()))?;

        if role == UserRole::Driver && driver_id.is_none() {
            return Err(AppError::Unauthorized(
                "Token de chauffeur sin chauffeur asociado".to_string(),
            ));
        }

        Ok(Self {
            user_id,
            role,
            driver_id,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Chauffeur al que están limitadas las operaciones del tablero
    pub fn require_driver_id(&self) -> Result<Uuid, AppError> {
        self.driver_id
            .ok_or_else(|| AppError::Forbidden("Se requiere una cuenta de chauffeur".to_string()))
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, &state.jwt)?;
    let user = AuthenticatedUser::from_claims(&claims)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn authenticated(request: &Request) -> Result<&AuthenticatedUser, AppError> {
    request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Unauthorized("Autenticación requerida".to_string()))
}

/// Middleware para verificar permisos de admin
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    if !authenticated(&request)?.is_admin() {
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Middleware para el tablero de chauffeur
pub async fn require_driver(request: Request, next: Next) -> Result<Response, AppError> {
    let user = authenticated(&request)?;
    if user.role != UserRole::Driver {
        return Err(AppError::Forbidden("Reservado a los chauffeurs".to_string()));
    }
    user.require_driver_id()?;

    Ok(next.run(request).await)
}
