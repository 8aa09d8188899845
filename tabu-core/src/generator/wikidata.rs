//! Wikidata SPARQL backend

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::source::{FetchOutcome, FetchRequest, KnowledgeSource, RawRow};
use crate::catalog::DEFAULT_SOURCE_NAME;
use crate::config::FetchConfig;
use crate::error::{PipelineError, Result};

/// SPARQL JSON results envelope
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    #[serde(default)]
    results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<Binding>,
}

#[derive(Debug, Deserialize)]
struct Binding {
    item: Option<BoundValue>,
    #[serde(rename = "itemLabel")]
    item_label: Option<BoundValue>,
    #[serde(rename = "itemDescription")]
    item_description: Option<BoundValue>,
}

#[derive(Debug, Deserialize)]
struct BoundValue {
    #[serde(default)]
    value: String,
}

fn bound(value: Option<BoundValue>) -> String {
    value.map(|v| v.value).unwrap_or_default()
}

/// Build the paged label/description query for a union of clauses
pub fn build_query(clauses: &[String], languages: &str, limit: usize, offset: usize) -> String {
    let unions: Vec<String> = clauses
        .iter()
        .map(|clause| {
            let clause = clause.trim();
            if clause.starts_with('{') {
                clause.to_string()
            } else {
                format!("{{ {clause} }}")
            }
        })
        .collect();

    format!(
        "SELECT DISTINCT ?item ?itemLabel ?itemDescription WHERE {{\n  {}\n  SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{languages}\". }}\n}}\nLIMIT {limit}\nOFFSET {offset}\n",
        unions.join("\n  UNION\n  ")
    )
}

/// Decode a SPARQL JSON body into rows, skipping rows without an item
pub fn parse_rows(body: &str) -> serde_json::Result<Vec<RawRow>> {
    let response: SparqlResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .bindings
        .into_iter()
        .map(|b| RawRow {
            id: bound(b.item),
            label: bound(b.item_label),
            description: bound(b.item_description),
        })
        .filter(|row| !row.id.is_empty())
        .collect())
}

pub struct WikidataSource {
    client: reqwest::Client,
    endpoint: String,
    languages: String,
}

impl WikidataSource {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| PipelineError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            languages: config.languages.clone(),
        })
    }
}

#[async_trait]
impl KnowledgeSource for WikidataSource {
    async fn fetch_batch(&self, request: &FetchRequest<'_>) -> FetchOutcome {
        let query = build_query(request.clauses, &self.languages, request.limit, request.offset);
        debug!(
            "Querying {} for '{}' (offset {}, limit {})",
            self.endpoint, request.category, request.offset, request.limit
        );

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("query", query.as_str())])
            .header(reqwest::header::ACCEPT, "application/sparql-results+json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Retryable(format!("request failed: {e}")),
        };

        let status = response.status();
        if !status.is_success() {
            let message = format!("HTTP {status} from {}", self.endpoint);
            return if status.as_u16() == 429 || status.is_server_error() {
                FetchOutcome::Retryable(message)
            } else {
                FetchOutcome::Fatal(message)
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return FetchOutcome::Retryable(format!("failed to read body: {e}")),
        };

        match parse_rows(&body) {
            Ok(rows) => FetchOutcome::Success(rows),
            Err(e) => FetchOutcome::Retryable(format!("invalid SPARQL JSON: {e}")),
        }
    }

    fn name(&self) -> &str {
        DEFAULT_SOURCE_NAME
    }
}
