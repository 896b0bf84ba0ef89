use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
    pub token_type: String,
}

impl Claims {
    pub fn new(sub: String, role: String, exp: usize, iat: usize, token_type: String) -> Self {
        Claims {
            sub,
            role,
            exp,
            iat,
            token_type,
        }
    }
}

#[derive(Clone)]
pub struct JwtConfig {
    pub jwt_secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(
        &self,
        subject: &str,
        role: &str,
        token_type: &str,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let iat = now.timestamp() as usize;
        let exp = match token_type {
            "access" => (now + Duration::minutes(60)).timestamp() as usize,
            "refresh" => (now + Duration::days(7)).timestamp() as usize,
            _ => return Err(ServiceError::InvalidTokenType),
        };

        let claims = Claims::new(
            subject.to_string(),
            role.to_string(),
            exp,
            iat,
            token_type.to_string(),
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify_token(&self, token: &str, expected_type: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                _ => ServiceError::Jwt(e),
            })?;

        let current_time = Utc::now().timestamp() as usize;

        if token_data.claims.exp < current_time {
            return Err(ServiceError::TokenExpired);
        }

        if token_data.claims.token_type != expected_type {
            return Err(ServiceError::InvalidTokenType);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_token_round_trips_claims() {
        let jwt = JwtConfig::new("test-secret");
        let token = jwt.generate_token("user-1", "admin", "access").unwrap();
        let claims = jwt.verify_token(&token, "access").unwrap();

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn rejects_wrong_token_type() {
        let jwt = JwtConfig::new("test-secret");
        let refresh = jwt.generate_token("user-1", "user", "refresh").unwrap();

        assert!(matches!(
            jwt.verify_token(&refresh, "access"),
            Err(ServiceError::InvalidTokenType)
        ));
        assert!(matches!(
            jwt.generate_token("user-1", "user", "session"),
            Err(ServiceError::InvalidTokenType)
        ));
    }

    #[test]
    fn rejects_foreign_signature() {
        let issuer = JwtConfig::new("secret-a");
        let verifier = JwtConfig::new("secret-b");
        let token = issuer.generate_token("user-1", "user", "access").unwrap();

        assert!(matches!(
            verifier.verify_token(&token, "access"),
            Err(ServiceError::Jwt(_))
        ));
    }
}
