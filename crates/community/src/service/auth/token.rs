use crate::{domain::response::TokenResponse, model::Role};
use shared::{abstract_trait::DynJwtService, errors::ServiceError};

#[derive(Clone)]
pub struct TokenService {
    jwt: DynJwtService,
}

impl TokenService {
    pub fn new(jwt: DynJwtService) -> Self {
        Self { jwt }
    }

    pub fn issue(&self, subject: &str, role: Role) -> Result<TokenResponse, ServiceError> {
        let access_token = self.jwt.generate_token(subject, role.as_str(), "access")?;
        let refresh_token = self.jwt.generate_token(subject, role.as_str(), "refresh")?;

        Ok(TokenResponse {
            access_token,
            refresh_token,
        })
    }
}
