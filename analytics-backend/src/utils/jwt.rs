// analytics-backend/src/utils/jwt.rs

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// JWT関連のエラー
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("JWT token has expired")]
    TokenExpired,

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("Missing JWT secret key")]
    MissingSecretKey,

    #[error("Invalid JWT configuration: {0}")]
    ConfigurationError(String),
}

/// 認証サービスが発行するトークンのClaims
///
/// 発行側は `id` クレームにユーザーIDを入れて署名する。`exp` は任意。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CallerClaims {
    /// User ID
    pub id: String,
    /// Expiration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issued at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

/// JWT設定
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// 発行側と共有する秘密鍵
    pub secret_key: String,
    /// 有効期限判定の猶予（秒）
    pub leeway_seconds: u64,
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), JwtError> {
        if self.secret_key.is_empty() {
            return Err(JwtError::MissingSecretKey);
        }

        if self.leeway_seconds > 300 {
            return Err(JwtError::ConfigurationError(
                "JWT leeway must not exceed 300 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// HS256 トークンの検証器（署名の発行は行わない）
pub struct JwtManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Result<Self, JwtError> {
        config.validate()?;

        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // exp は存在する場合のみ検証する
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = config.leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// トークンを検証・デコード
    pub fn verify_token(&self, token: &str) -> Result<CallerClaims, JwtError> {
        let token_data = decode::<CallerClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }
}
