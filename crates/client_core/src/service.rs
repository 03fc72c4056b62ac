use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::protocol::{AnalysisResult, AnalyzeRequest, StatsSnapshot, ANALYZE_PATH, STATS_PATH};
use tracing::{debug, info, warn};

use crate::{
    config::ClientConfig,
    error::{ClientError, ServiceOperation},
};

/// The remote analysis service as seen by the workflow.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ClientError>;
    async fn fetch_stats(&self) -> Result<StatsSnapshot, ClientError>;
}

pub struct HttpAnalysisService {
    http: Client,
    config: ClientConfig,
}

impl HttpAnalysisService {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| ClientError::Transport {
                operation: ServiceOperation::Analyze,
                message: format!("failed to build http client: {err}"),
            })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        operation: ServiceOperation,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                operation,
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::from_reqwest(operation, err, self.config.request_timeout))?;
        serde_json::from_slice(&bytes).map_err(|err| ClientError::Decode {
            operation,
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ClientError> {
        let operation = ServiceOperation::Analyze;
        let url = self.config.endpoint(ANALYZE_PATH);
        debug!(%url, transcript_len = request.transcript.len(), "posting transcript for analysis");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| ClientError::from_reqwest(operation, err, self.config.request_timeout));
        let result = match response {
            Ok(response) => self.read_json::<AnalysisResult>(operation, response).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(body) => info!(
                conversation_id = %body.conversation_id,
                entities = body.entities.len(),
                code_proposals = body.code_proposals.len(),
                "analysis completed"
            ),
            Err(err) => warn!("analysis request failed: {err}"),
        }
        result
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ClientError> {
        let operation = ServiceOperation::Stats;
        let url = self.config.endpoint(STATS_PATH);
        debug!(%url, "fetching usage stats");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| ClientError::from_reqwest(operation, err, self.config.request_timeout))?;
        let stats = self.read_json::<StatsSnapshot>(operation, response).await?;
        info!(
            total_conversations = stats.total_conversations,
            top_codes = stats.top_codes.len(),
            "stats refreshed"
        );
        Ok(stats)
    }
}
