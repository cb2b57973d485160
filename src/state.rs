use crate::config::AppConfig;
use crate::store::{self, SiswaStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SiswaStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let store = store::connect(&config).await?;
        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn SiswaStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    #[cfg(test)]
    pub fn for_tests(list_requires_auth: bool) -> Self {
        Self::for_tests_with_store(Arc::new(store::MemoryStore::default()), list_requires_auth)
    }

    #[cfg(test)]
    pub fn for_tests_with_store(store: Arc<dyn SiswaStore>, list_requires_auth: bool) -> Self {
        use crate::config::JwtConfig;

        let config = Arc::new(AppConfig {
            database_url: "memory://".into(),
            db_max_connections: 1,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
            },
            host: "127.0.0.1".into(),
            port: 0,
            list_requires_auth,
        });
        Self::from_parts(store, config)
    }
}
