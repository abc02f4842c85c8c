use axum::extract::FromRef;
use teval_config::{CorsConfig, JwtConfig};
use teval_db::Store;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Store,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Store, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
        }
    }

    /// State with JWT and CORS settings read from the environment.
    pub fn from_env(store: Store) -> Self {
        Self::new(store, JwtConfig::from_env(), CorsConfig::from_env())
    }
}

/// Handlers take `State<Store>`: a handle cloned for the request and dropped with it.
impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}
