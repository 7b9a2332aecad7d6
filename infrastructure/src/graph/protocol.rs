//! Microsoft Graph `/search/query` wire types.

use serde::{Deserialize, Serialize};

/// Graph name for files in OneDrive and SharePoint libraries.
pub(super) const DRIVE_ITEM: &str = "driveItem";

#[derive(Debug, Serialize)]
pub(super) struct SearchQueryBody<'a> {
    pub requests: [SearchRequest<'a>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchRequest<'a> {
    pub entity_types: [&'static str; 1],
    pub query: QueryString<'a>,
    pub from: u32,
    pub size: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct QueryString<'a> {
    pub query_string: &'a str,
}

impl<'a> SearchQueryBody<'a> {
    pub fn drive_items(query: &'a str, size: u32) -> Self {
        Self {
            requests: [SearchRequest {
                entity_types: [DRIVE_ITEM],
                query: QueryString {
                    query_string: query,
                },
                from: 0,
                size,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    pub value: Option<Vec<ResponseValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ResponseValue {
    pub hits_containers: Option<Vec<HitsContainer>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HitsContainer {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Hit {
    #[serde(default)]
    pub summary: Option<String>,
    pub resource: Resource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Resource {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_modified_date_time: Option<String>,
}
