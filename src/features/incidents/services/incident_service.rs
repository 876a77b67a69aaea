use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::incidents::demo::demo_incidents;
use crate::features::incidents::dtos::IncidentQuery;
use crate::features::incidents::models::Incident;
use crate::modules::supabase::{SelectQuery, SupabaseClient};

pub struct IncidentService {
    backend: Arc<SupabaseClient>,
}

impl IncidentService {
    pub fn new(backend: Arc<SupabaseClient>) -> Self {
        Self { backend }
    }

    fn table(&self) -> &str {
        &self.backend.config().incidents_table
    }

    /// All incidents, newest first
    pub async fn all(&self) -> Result<Vec<Incident>> {
        if !self.backend.is_configured() {
            return Ok(demo_incidents());
        }

        let query = SelectQuery::new().order_by("created_at", false);
        self.backend.select(self.table(), &query).await
    }

    pub async fn list(&self, query: &IncidentQuery) -> Result<Vec<Incident>> {
        let incidents = self.all().await?;
        Ok(incidents.into_iter().filter(|i| query.matches(i)).collect())
    }

    pub async fn get(&self, display_id: &str) -> Result<Incident> {
        let found = if self.backend.is_configured() {
            let query = SelectQuery::new().eq("display_id", display_id).limit(1);
            let rows: Vec<Incident> = self.backend.select(self.table(), &query).await?;
            rows.into_iter().next()
        } else {
            demo_incidents()
                .into_iter()
                .find(|i| i.display_id == display_id)
        };

        found.ok_or_else(|| AppError::NotFound(format!("Incident {} not found", display_id)))
    }
}
