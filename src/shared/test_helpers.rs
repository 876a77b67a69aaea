#[cfg(test)]
use crate::core::config::SupabaseConfig;
#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;
#[cfg(test)]
use crate::modules::supabase::SupabaseClient;
#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};
#[cfg(test)]
use std::sync::Arc;

/// Backend client with no URL, so every remote call fails fast
#[cfg(test)]
pub fn unconfigured_backend() -> Arc<SupabaseClient> {
    Arc::new(SupabaseClient::new(SupabaseConfig::disabled()).expect("http client"))
}

#[cfg(test)]
pub fn test_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id: "9f1c2d7e-0000-4000-8000-000000000001".to_string(),
        email: Some("dispatcher@najm.sa".to_string()),
        access_token: "test-access-token".to_string(),
    }
}

#[cfg(test)]
async fn inject_test_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(test_user());
    next.run(request).await
}

/// Wraps a router so its handlers see `test_user()` as the caller
#[cfg(test)]
pub fn with_test_user(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_test_user_middleware))
}
