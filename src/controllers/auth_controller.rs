use crate::dto::auth_dto::{AccountResponse, ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserRole;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};
use sqlx::PgPool;
use tracing::{info, warn};
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Email o contraseña incorrectos";

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = match self.repository.find_by_email(&request.email).await? {
            Some(user) => user,
            None => {
                warn!("🔐 Login fallido: cuenta desconocida {}", request.email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(&request.password, &user.password_hash).await? {
            warn!("🔐 Login fallido: contraseña incorrecta para {}", user.email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let role = user.role().map_err(AppError::Internal)?;
        let token = generate_token(user.id, role.as_str(), user.driver_id, &self.jwt)?;

        info!("✅ Login {} ({})", user.email, role);

        Ok(LoginResponse {
            success: true,
            token,
            expires_in: self.jwt.expiration,
            user: AccountResponse::from(user),
        })
    }

    pub async fn me(&self, auth: &AuthenticatedUser) -> Result<ApiResponse<AccountResponse>, AppError> {
        let user = self
            .repository
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("La cuenta ya no existe".to_string()))?;

        Ok(ApiResponse::success(AccountResponse::from(user)))
    }

    pub async fn change_password(
        &self,
        auth: &AuthenticatedUser,
        request: ChangePasswordRequest,
    ) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;

        let user = self
            .repository
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("La cuenta ya no existe".to_string()))?;

        if !verify_password(&request.current_password, &user.password_hash).await? {
            return Err(AppError::BadRequest("La contraseña actual no es correcta".to_string()));
        }

        let hash = hash_password(&request.new_password).await?;
        self.repository.update_password(user.id, &hash).await?;

        info!("🔑 Contraseña cambiada para {}", user.email);
        Ok(ApiResponse::message("Contraseña actualizada"))
    }

    /// Crear el primer administrador si todavía no hay ninguno
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.repository.admin_exists().await? {
            return Ok(false);
        }

        let hash = hash_password(password).await?;
        let admin = self.repository.create(email, &hash, UserRole::Admin, None).await?;
        info!("👤 Administrador inicial creado: {}", admin.email);
        Ok(true)
    }
}

/// bcrypt es CPU-bound: se ejecuta fuera de los workers de tokio
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Tarea de hash abortada: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Tarea de hash abortada: {}", e)))?
        .map_err(|e| AppError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn password_hash_round_trip() {
        // coste mínimo para no ralentizar los tests
        let hash = bcrypt::hash("s3cret-pass", 4).unwrap();
        assert!(verify_password("s3cret-pass", &hash).await.unwrap());
        assert!(!verify_password("wrong-pass", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        assert!(matches!(verify_password("x", "not-a-hash").await, Err(AppError::Hash(_))));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn hashing_does_not_block_the_runtime() {
        // con un solo worker, el runtime sigue libre mientras bcrypt calcula
        let hashing = tokio::spawn(hash_password("s3cret-pass"));

        let start = std::time::Instant::now();
        tokio::task::yield_now().await;
        assert!(start.elapsed() < std::time::Duration::from_millis(50));

        let hash = hashing.await.unwrap().unwrap();
        assert!(hash.starts_with("$2"));
    }
}
