use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::warn;

use survey_core::SurveyStep;
use survey_core::model::{StatChart, StatMetric, decode_stat};

use crate::api::SurveyApi;
use crate::api_config::ApiConfig;
use crate::error::{ApiError, StatsError};
use crate::flow::FlowGate;

/// One rendered metric, in result page order.
#[derive(Debug, Clone, PartialEq)]
pub struct StatPanel {
    pub metric: StatMetric,
    pub chart: StatChart,
}

/// Loads every aggregate metric for the result page.
#[derive(Clone)]
pub struct StatsService {
    gate: FlowGate,
    api: Arc<dyn SurveyApi>,
    metrics: Vec<StatMetric>,
}

impl StatsService {
    #[must_use]
    pub fn new(gate: FlowGate, api: Arc<dyn SurveyApi>) -> Self {
        Self {
            gate,
            api,
            metrics: StatMetric::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Vec<StatMetric>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Fetch all metrics concurrently. The first failure aborts the rest and
    /// fails the whole load; there is no partial result.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Gate` without an API URL, `StatsError::Api` if any
    /// request fails or any payload is malformed.
    pub async fn load_all(&self) -> Result<Vec<StatPanel>, StatsError> {
        let admission = self.gate.admit(SurveyStep::Result).await?;
        let config = admission.require_config()?.clone();

        let mut tasks = JoinSet::new();
        for (index, metric) in self.metrics.iter().copied().enumerate() {
            let api = Arc::clone(&self.api);
            let config = config.clone();
            tasks.spawn(async move {
                let chart = fetch_panel(api.as_ref(), &config, metric).await;
                (index, metric, chart)
            });
        }

        let mut panels: Vec<Option<StatPanel>> = vec![None; self.metrics.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, metric, chart) = joined.map_err(|err| StatsError::Task(err.to_string()))?;
            match chart {
                Ok(chart) => panels[index] = Some(StatPanel { metric, chart }),
                Err(err) => {
                    warn!(%metric, error = %err, "statistics load failed");
                    return Err(err.into());
                }
            }
        }

        Ok(panels.into_iter().flatten().collect())
    }
}

async fn fetch_panel(
    api: &dyn SurveyApi,
    config: &ApiConfig,
    metric: StatMetric,
) -> Result<StatChart, ApiError> {
    let payload = api.fetch_stat(config, metric).await?;
    Ok(decode_stat(metric, &payload)?)
}
