use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// One reported annual statement: the period end date plus the raw line-item
/// figures keyed by the source's display labels ("Total Assets", ...).
#[derive(Debug, Deserialize)]
pub struct AnnualStatement {
    pub end_date: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl AnnualStatement {
    /// Reporting year parsed from the leading `YYYY` of the end date.
    pub fn year(&self) -> Option<i32> {
        self.end_date.get(..4)?.parse().ok()
    }
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    #[serde(default)]
    balance_sheet: Vec<AnnualStatement>,
}

/// Client for the third-party market-data source. Fetches a ticker's full
/// balance-sheet time series; year selection and field mapping happen in the
/// import service.
pub struct MarketDataClient<'a> {
    http: &'a reqwest::Client,
    base_url: &'a str,
}

impl<'a> MarketDataClient<'a> {
    pub fn new(http: &'a reqwest::Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    pub async fn balance_sheet_series(
        &self,
        ticker: &str,
    ) -> Result<Vec<AnnualStatement>, ApiError> {
        let url = format!(
            "{}/balance-sheet/{}",
            self.base_url.trim_end_matches('/'),
            ticker
        );
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::not_found(
                "No balance sheet data found for the given ticker",
            ));
        }
        if !status.is_success() {
            tracing::warn!(%status, ticker, "Market data source returned an error");
            return Err(ApiError::bad_gateway(format!(
                "Market data source error: {}",
                status
            )));
        }

        let series: SeriesResponse = response
            .json()
            .await
            .map_err(|_| ApiError::bad_gateway("Malformed market data response"))?;

        Ok(series.balance_sheet)
    }
}
