use std::sync::Arc;

use chrono::Utc;
use poem_openapi::{ApiResponse, Object, OpenApi, payload::Json};
use serde::{Deserialize, Serialize};

use business::domain::recipe::source::{CatalogHealth, SourceHealthReport};
use business::domain::recipe::use_cases::health_check::CheckRecipeSourcesHealthUseCase;

use crate::api::tags::ApiTags;

/// Health of one recipe source
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct SourceHealthResponse {
    pub id: String,
    pub name: String,
    pub priority: u32,
    pub enabled: bool,
    pub healthy: bool,
    pub message: String,
}

impl From<SourceHealthReport> for SourceHealthResponse {
    fn from(report: SourceHealthReport) -> Self {
        Self {
            id: report.metadata.id,
            name: report.metadata.name,
            priority: report.metadata.priority,
            enabled: report.metadata.enabled,
            healthy: report.health.healthy,
            message: report.health.message,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct HealthCheckResponse {
    /// "healthy" when every source is healthy, otherwise "degraded"
    pub status: String,
    /// Current server timestamp
    pub timestamp: String,
    /// Service version
    pub version: String,
    /// Per-source detail, disabled sources included
    pub sources: Vec<SourceHealthResponse>,
}

impl From<CatalogHealth> for HealthCheckResponse {
    fn from(health: CatalogHealth) -> Self {
        Self {
            status: if health.healthy { "healthy" } else { "degraded" }.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sources: health.sources.into_iter().map(|s| s.into()).collect(),
        }
    }
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200)]
    Healthy(Json<HealthCheckResponse>),
    #[oai(status = 503)]
    Degraded(Json<HealthCheckResponse>),
}

/// Health API for monitoring and infrastructure checks
pub struct Api {
    health_use_case: Arc<dyn CheckRecipeSourcesHealthUseCase>,
}

impl Api {
    pub fn new(health_use_case: Arc<dyn CheckRecipeSourcesHealthUseCase>) -> Self {
        Self { health_use_case }
    }
}

#[OpenApi]
impl Api {
    /// Health check endpoint
    ///
    /// Checks every recipe source. Responds 503 when any of them is
    /// unhealthy, with the per-source detail in the body either way.
    #[oai(path = "/health", method = "get", tag = "ApiTags::Health")]
    async fn health_check(&self) -> HealthResponse {
        let health = self.health_use_case.execute().await;
        let healthy = health.healthy;
        let body = Json(health.into());
        if healthy {
            HealthResponse::Healthy(body)
        } else {
            HealthResponse::Degraded(body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use business::domain::recipe::source::{SourceHealth, SourceMetadata};
    use mockall::mock;
    use poem::Route;
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;

    mock! {
        pub HealthCheck {}
        #[async_trait]
        impl CheckRecipeSourcesHealthUseCase for HealthCheck {
            async fn execute(&self) -> CatalogHealth;
        }
    }

    fn report(id: &str, healthy: bool) -> SourceHealthReport {
        SourceHealthReport {
            metadata: SourceMetadata {
                id: id.to_string(),
                name: id.to_string(),
                priority: 1,
                enabled: true,
            },
            health: SourceHealth {
                healthy,
                message: "ok".to_string(),
            },
        }
    }

    fn client(health: CatalogHealth) -> TestClient<Route> {
        let mut use_case = MockHealthCheck::new();
        use_case.expect_execute().return_const(health);
        let api = Api::new(Arc::new(use_case));
        TestClient::new(Route::new().nest("/", OpenApiService::new(api, "Health", "test")))
    }

    #[tokio::test]
    async fn should_answer_ok_when_all_sources_are_healthy() {
        let cli = client(CatalogHealth {
            healthy: true,
            sources: vec![report("database", true)],
        });

        let response = cli.get("/health").send().await;

        response.assert_status_is_ok();
    }

    #[tokio::test]
    async fn should_answer_service_unavailable_when_degraded() {
        let cli = client(CatalogHealth {
            healthy: false,
            sources: vec![report("database", true), report("spoonacular", false)],
        });

        let response = cli.get("/health").send().await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn should_flatten_source_reports() {
        let response: HealthCheckResponse = CatalogHealth {
            healthy: false,
            sources: vec![report("spoonacular", false)],
        }
        .into();

        assert_eq!(response.status, "degraded");
        assert_eq!(response.sources[0].id, "spoonacular");
        assert!(!response.sources[0].healthy);
    }
}
