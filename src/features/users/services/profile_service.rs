use chrono::Utc;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{ProfileResponseDto, UpdateProfileDto};
use crate::features::users::models::Profile;
use crate::modules::supabase::{SelectQuery, SupabaseClient};

/// Reads and writes profile rows in the backend
pub struct ProfileService {
    backend: Arc<SupabaseClient>,
}

impl ProfileService {
    pub fn new(backend: Arc<SupabaseClient>) -> Self {
        Self { backend }
    }

    fn table(&self) -> &str {
        &self.backend.config().profiles_table
    }

    pub async fn get_profile(&self, user: &AuthenticatedUser) -> Result<ProfileResponseDto> {
        let query = SelectQuery::new().eq("id", &user.id).limit(1);
        let rows: Vec<Profile> = self.backend.select(self.table(), &query).await?;

        rows.into_iter()
            .next()
            .map(ProfileResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
    }

    pub async fn update_profile(
        &self,
        user: &AuthenticatedUser,
        dto: UpdateProfileDto,
    ) -> Result<ProfileResponseDto> {
        let profile = Profile {
            id: user.id.clone(),
            full_name: Some(dto.full_name),
            email: user.email.clone(),
            phone: dto.phone,
            avatar_url: dto.avatar_url,
            updated_at: Some(Utc::now()),
        };

        let stored = self.upsert(&profile).await?;
        tracing::info!("Profile updated for user: {}", user.id);
        Ok(stored.into())
    }

    /// Seeds the profile row right after sign-up
    pub async fn create_initial_profile(
        &self,
        user_id: &str,
        email: &str,
        full_name: &str,
    ) -> Result<()> {
        let profile = Profile {
            id: user_id.to_string(),
            full_name: Some(full_name.to_string()),
            email: Some(email.to_string()),
            phone: None,
            avatar_url: None,
            updated_at: Some(Utc::now()),
        };

        self.upsert(&profile).await.map(|_| ())
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile> {
        let rows: Vec<Profile> = self.backend.upsert(self.table(), profile, "id").await?;

        // PostgREST echoes the row with return=representation; fall back to what we sent
        Ok(rows.into_iter().next().unwrap_or_else(|| profile.clone()))
    }
}
