//! Tracker API client implementing the core `TrackerGateway` port.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use meritsync_core::sync::ports::{
    DocumentHandle, FieldValue, FieldValuePatch, ItemContent, ItemSnapshot, NewDocument,
    TrackerGateway,
};
use meritsync_core::sync::registry::EXPECTED_FIELD_NAMES;
use meritsync_domain::{
    FieldDescriptor, FieldKind, MeritSyncError, Result, SelectOption, TrackerConfig,
};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};

use super::queries;
use crate::http::HttpClient;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DOCUMENT_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Client for both tracker API surfaces.
///
/// All calls are authenticated with the configured bearer token and are
/// issued exactly once; failures surface to the caller unrecovered.
pub struct TrackerClient {
    http_client: HttpClient,
    config: TrackerConfig,
}

impl TrackerClient {
    /// Create a new tracker client.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let http_client =
            HttpClient::builder().timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS)).build()?;
        Ok(Self { http_client, config })
    }

    /// Execute a GraphQL query or mutation against the typed-field surface.
    ///
    /// # Errors
    /// `Network` for a non-success HTTP status, `Api` carrying the first
    /// message of the response's error array, `Internal` when the envelope
    /// cannot be parsed or carries no data.
    async fn execute_graphql<T: for<'de> Deserialize<'de>>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let request_body = serde_json::json!({
            "query": query,
            "variables": variables,
        });

        let request_builder = self
            .http_client
            .request(Method::POST, &self.config.graphql_url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json")
            .json(&request_body);

        let response = self.http_client.send(request_builder).await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received tracker GraphQL response");

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MeritSyncError::Network(format!(
                "tracker API error (HTTP {status}): {error_text}"
            )));
        }

        let envelope: GraphQlResponse<T> = response.json().await.map_err(|e| {
            MeritSyncError::Internal(format!("failed to parse GraphQL response: {e}"))
        })?;

        if let Some(first) = envelope.errors.unwrap_or_default().into_iter().next() {
            return Err(MeritSyncError::Api(first.message));
        }

        envelope
            .data
            .ok_or_else(|| MeritSyncError::Internal("GraphQL response missing data field".into()))
    }
}

#[async_trait]
impl TrackerGateway for TrackerClient {
    async fn create_document(&self, document: &NewDocument) -> Result<DocumentHandle> {
        let url = format!(
            "{}/repos/{}/{}/issues",
            self.config.api_base, self.config.owner, self.config.repo
        );

        let request_builder = self
            .http_client
            .request(Method::POST, &url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Accept", DOCUMENT_ACCEPT_HEADER)
            .header("Content-Type", "application/json")
            .json(document);

        let response = self.http_client.send(request_builder).await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(MeritSyncError::Network(format!(
                "document creation failed (HTTP {status}): {error_text}"
            )));
        }

        let created: CreatedDocumentResponse = response.json().await.map_err(|e| {
            MeritSyncError::Internal(format!("failed to parse document response: {e}"))
        })?;

        info!(number = created.number, "created tracker document");
        Ok(DocumentHandle {
            node_id: created.node_id,
            number: created.number,
            url: created.html_url,
        })
    }

    async fn add_item(&self, document_node_id: &str) -> Result<String> {
        let variables = serde_json::json!({
            "projectId": self.config.project_id,
            "contentId": document_node_id,
        });

        let data: AddItemResponse = self.execute_graphql(queries::ADD_ITEM, variables).await?;
        Ok(data.add_project_v2_item_by_id.item.id)
    }

    async fn update_field_value(
        &self,
        item_id: &str,
        field_id: &str,
        patch: &FieldValuePatch,
    ) -> Result<()> {
        // Each declared field kind takes a structurally different mutation
        // payload; the tracker rejects a mismatched shape.
        let (query, variables) = match patch {
            FieldValuePatch::SingleSelect { option_id } => (
                queries::UPDATE_SINGLE_SELECT_FIELD,
                serde_json::json!({
                    "projectId": self.config.project_id,
                    "itemId": item_id,
                    "fieldId": field_id,
                    "optionId": option_id,
                }),
            ),
            FieldValuePatch::Number(number) => (
                queries::UPDATE_NUMBER_FIELD,
                serde_json::json!({
                    "projectId": self.config.project_id,
                    "itemId": item_id,
                    "fieldId": field_id,
                    "number": number,
                }),
            ),
            FieldValuePatch::Text(text) => (
                queries::UPDATE_TEXT_FIELD,
                serde_json::json!({
                    "projectId": self.config.project_id,
                    "itemId": item_id,
                    "fieldId": field_id,
                    "text": text,
                }),
            ),
            FieldValuePatch::Date(date) => (
                queries::UPDATE_DATE_FIELD,
                serde_json::json!({
                    "projectId": self.config.project_id,
                    "itemId": item_id,
                    "fieldId": field_id,
                    "date": date.format("%Y-%m-%d").to_string(),
                }),
            ),
        };

        let _: UpdateFieldResponse = self.execute_graphql(query, variables).await?;
        Ok(())
    }

    async fn fetch_fields(&self, limit: usize) -> Result<Vec<FieldDescriptor>> {
        let variables = serde_json::json!({
            "projectId": self.config.project_id,
            "first": limit,
        });

        let data: ProjectFieldsResponse =
            self.execute_graphql(queries::PROJECT_FIELDS, variables).await?;

        let nodes = data
            .node
            .ok_or_else(|| MeritSyncError::NotFound("project not found on tracker".into()))?
            .fields
            .nodes;

        let mut fields = Vec::new();
        for raw in nodes {
            if let Some(field) = map_field(raw)? {
                fields.push(field);
            }
        }
        Ok(fields)
    }

    async fn fetch_items(&self, limit: usize) -> Result<Vec<ItemSnapshot>> {
        let variables = serde_json::json!({
            "projectId": self.config.project_id,
            "first": limit,
        });

        let data: ProjectItemsResponse =
            self.execute_graphql(queries::PROJECT_ITEMS, variables).await?;

        let nodes = data
            .node
            .ok_or_else(|| MeritSyncError::NotFound("project not found on tracker".into()))?
            .items
            .nodes;

        Ok(nodes.into_iter().map(map_item).collect())
    }
}

/// Map one raw field node into a descriptor.
///
/// Nodes matching none of the query fragments come back empty and are
/// dropped. A field outside the managed name set with an unmapped data type
/// is ignored; a managed field with an unmapped data type is an explicit
/// error, because a mutation against it could never be shaped correctly.
fn map_field(raw: RawField) -> Result<Option<FieldDescriptor>> {
    let (Some(id), Some(name), Some(data_type)) = (raw.id, raw.name, raw.data_type) else {
        return Ok(None);
    };

    let kind = match data_type.as_str() {
        "TEXT" => FieldKind::Text,
        "NUMBER" => FieldKind::Number,
        "DATE" => FieldKind::Date,
        "SINGLE_SELECT" => FieldKind::SingleSelect {
            options: raw
                .options
                .unwrap_or_default()
                .into_iter()
                .map(|option| SelectOption { id: option.id, name: option.name })
                .collect(),
        },
        other => {
            if EXPECTED_FIELD_NAMES.contains(&name.as_str()) {
                return Err(MeritSyncError::InvalidInput(format!(
                    "field {name:?} has unsupported data type {other:?}"
                )));
            }
            debug!(field = %name, data_type = %other, "ignoring field with unmanaged data type");
            return Ok(None);
        }
    };

    Ok(Some(FieldDescriptor { id, name, kind }))
}

fn map_item(raw: RawItem) -> ItemSnapshot {
    let content = raw.content.and_then(|content| {
        // Items whose content is not a document (e.g. draft items) come back
        // as empty fragments; they carry nothing to decode.
        let (Some(node_id), Some(number)) = (content.id, content.number) else {
            return None;
        };
        Some(ItemContent {
            node_id,
            number,
            title: content.title,
            body: content.body,
            state: content.state,
            created_at: content.created_at,
            updated_at: content.updated_at,
            url: content.url,
        })
    });

    let field_values =
        raw.field_values.nodes.into_iter().filter_map(map_field_value).collect();

    ItemSnapshot { item_id: raw.id, content, field_values }
}

fn map_field_value(raw: RawFieldValue) -> Option<FieldValue> {
    let field_name = raw.field?.name;

    if let Some(text) = raw.text {
        return Some(FieldValue::Text { field_name, text });
    }
    if let Some(number) = raw.number {
        return Some(FieldValue::Number { field_name, number });
    }
    if let Some(date) = raw.date {
        return Some(FieldValue::Date { field_name, date });
    }
    if let Some(option_name) = raw.name {
        return Some(FieldValue::SingleSelect { field_name, option_name });
    }
    None
}

/* -------------------------------------------------------------------------- */
/* Wire types */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CreatedDocumentResponse {
    node_id: String,
    number: i64,
    html_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemResponse {
    add_project_v2_item_by_id: AddedItem,
}

#[derive(Debug, Deserialize)]
struct AddedItem {
    item: NodeId,
}

#[derive(Debug, Deserialize)]
struct NodeId {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFieldResponse {
    #[allow(dead_code)]
    update_project_v2_item_field_value: UpdatedItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedItem {
    #[allow(dead_code)]
    project_v2_item: NodeId,
}

#[derive(Debug, Deserialize)]
struct ProjectFieldsResponse {
    node: Option<FieldsNode>,
}

#[derive(Debug, Deserialize)]
struct FieldsNode {
    fields: FieldsConnection,
}

#[derive(Debug, Deserialize)]
struct FieldsConnection {
    nodes: Vec<RawField>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    id: Option<String>,
    name: Option<String>,
    data_type: Option<String>,
    options: Option<Vec<RawOption>>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ProjectItemsResponse {
    node: Option<ItemsNode>,
}

#[derive(Debug, Deserialize)]
struct ItemsNode {
    items: ItemsConnection,
}

#[derive(Debug, Deserialize)]
struct ItemsConnection {
    nodes: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItem {
    id: String,
    content: Option<RawContent>,
    field_values: RawFieldValues,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    id: Option<String>,
    number: Option<i64>,
    title: Option<String>,
    body: Option<String>,
    state: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFieldValues {
    nodes: Vec<RawFieldValue>,
}

#[derive(Debug, Deserialize)]
struct RawFieldValue {
    field: Option<RawFieldRef>,
    text: Option<String>,
    number: Option<f64>,
    name: Option<String>,
    date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
struct RawFieldRef {
    name: String,
}
