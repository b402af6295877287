use turnstile_core::{PasswordHasher, TokenService, UserStore};

/// Shared application state, available to all route handlers via `State<Arc<AppState<S>>>`.
pub struct AppState<S: UserStore> {
    pub store: S,
    pub hasher: PasswordHasher,
    pub tokens: TokenService,
}
