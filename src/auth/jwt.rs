use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use crate::{config::JwtConfig, state::AppState};

/// Session tokens always live for one hour.
pub const ACCESS_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: ACCESS_TTL,
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, subject: &str) -> anyhow::Result<String> {
        self.sign_issued_at(subject, OffsetDateTime::now_utc())
    }

    pub(crate) fn sign_issued_at(
        &self,
        subject: &str,
        issued_at: OffsetDateTime,
    ) -> anyhow::Result<String> {
        let exp = issued_at + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.unix_timestamp().max(0) as usize,
            exp: exp.unix_timestamp().max(0) as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(subject = %subject, "jwt signed");
        Ok(token)
    }

    /// Checks signature, expiry, issuer and audience in one pass.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(subject = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}
