use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Caller resolved from a bearer token by `auth_middleware`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
    /// Token the caller presented, forwarded on user-scoped backend calls
    #[serde(skip)]
    pub access_token: String,
}
