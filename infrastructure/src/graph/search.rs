//! Document search over the Microsoft Graph search API.

use super::protocol::{Hit, SearchQueryBody, SearchResponse};
use crate::http::{build_client, join_url, snippet};
use assistant_application::{DocumentSearch, SearchError};
use assistant_domain::{AccessToken, Document};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub struct GraphDocumentSearch {
    client: Client,
    endpoint: String,
    page_size: u32,
}

impl GraphDocumentSearch {
    pub fn new(graph_base_url: &str, page_size: u32, timeout: Duration) -> Result<Self, SearchError> {
        let client = build_client(timeout).map_err(|e| SearchError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: join_url(graph_base_url, "search/query"),
            page_size,
        })
    }
}

#[async_trait]
impl DocumentSearch for GraphDocumentSearch {
    async fn search(
        &self,
        query: &str,
        token: &AccessToken,
    ) -> Result<Vec<Document>, SearchError> {
        let body = SearchQueryBody::drive_items(query, self.page_size);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token.secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Graph search returned an error");
            return Err(SearchError::Status {
                status: status.as_u16(),
                snippet: snippet(&text),
            });
        }

        let documents = parse_hits(&text)?;
        debug!(hits = documents.len(), "Graph search completed");
        Ok(documents)
    }
}

/// Extract the first container's hits, preserving index order.
fn parse_hits(text: &str) -> Result<Vec<Document>, SearchError> {
    let parsed: SearchResponse = serde_json::from_str(text)
        .map_err(|e| SearchError::Malformed(format!("{}: {}", e, snippet(text))))?;

    let container = parsed
        .value
        .and_then(|values| values.into_iter().next())
        .ok_or_else(|| SearchError::Malformed("response has no value entry".into()))?
        .hits_containers
        .and_then(|containers| containers.into_iter().next())
        .ok_or_else(|| SearchError::Malformed("response has no hitsContainers entry".into()))?;

    Ok(container.hits.into_iter().map(to_document).collect())
}

fn to_document(hit: Hit) -> Document {
    let document = Document::new(
        hit.resource.id,
        hit.resource.name,
        hit.summary.unwrap_or_default(),
    );
    match hit
        .resource
        .last_modified_date_time
        .as_deref()
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    {
        Some(at) => document.with_last_modified(at.with_timezone(&Utc)),
        None => document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::canned_server;
    use chrono::TimeZone;

    const RESPONSE: &str = r##"{
        "value": [{
            "searchTerms": ["vacation"],
            "hitsContainers": [{
                "total": 2,
                "moreResultsAvailable": false,
                "hits": [
                    {
                        "hitId": "01A",
                        "rank": 1,
                        "summary": "Employees get <c0>20</c0> days",
                        "resource": {
                            "@odata.type": "#microsoft.graph.driveItem",
                            "id": "01A",
                            "name": "HR.pdf",
                            "lastModifiedDateTime": "2024-03-01T10:00:00Z"
                        }
                    },
                    {
                        "hitId": "01B",
                        "rank": 2,
                        "resource": {
                            "id": "01B",
                            "name": "Travel.docx",
                            "lastModifiedDateTime": "yesterday"
                        }
                    }
                ]
            }]
        }]
    }"##;

    #[test]
    fn test_request_body_shape() {
        let body = SearchQueryBody::drive_items("vacation policy", 5);
        let json = serde_json::to_value(&body).unwrap();
        let request = &json["requests"][0];
        assert_eq!(request["entityTypes"][0], "driveItem");
        assert_eq!(request["query"]["queryString"], "vacation policy");
        assert_eq!(request["from"], 0);
        assert_eq!(request["size"], 5);
    }

    #[test]
    fn test_parse_hits_in_order() {
        let docs = parse_hits(RESPONSE).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "01A");
        assert_eq!(docs[0].name, "HR.pdf");
        assert_eq!(docs[0].content, "Employees get <c0>20</c0> days");
        assert_eq!(
            docs[0].last_modified,
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(docs[1].name, "Travel.docx");
    }

    #[test]
    fn test_missing_summary_is_empty_content() {
        let docs = parse_hits(RESPONSE).unwrap();
        assert_eq!(docs[1].content, "");
    }

    #[test]
    fn test_unparseable_timestamp_is_absent() {
        let docs = parse_hits(RESPONSE).unwrap();
        assert!(docs[1].last_modified.is_none());
    }

    #[test]
    fn test_container_without_hits_is_empty() {
        let docs = parse_hits(r#"{"value":[{"hitsContainers":[{"total":0}]}]}"#).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_missing_value_is_malformed() {
        assert!(matches!(parse_hits("{}"), Err(SearchError::Malformed(_))));
        assert!(matches!(
            parse_hits(r#"{"value":[]}"#),
            Err(SearchError::Malformed(_))
        ));
    }

    #[test]
    fn test_missing_hits_containers_is_malformed() {
        assert!(matches!(
            parse_hits(r#"{"value":[{"searchTerms":[]}]}"#),
            Err(SearchError::Malformed(_))
        ));
    }

    #[test]
    fn test_non_json_is_malformed() {
        assert!(matches!(
            parse_hits("<html>"),
            Err(SearchError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_search_sends_bearer_token_and_keeps_hit_order() {
        let (base, seen) = canned_server(vec![(200, RESPONSE)]).await;
        let search =
            GraphDocumentSearch::new(&format!("{}/v1.0", base), 5, Duration::from_secs(5)).unwrap();

        let docs = search
            .search("vacation", &AccessToken::new("graph-token"))
            .await
            .unwrap();

        let names: Vec<&str> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["HR.pdf", "Travel.docx"]);

        let requests = seen.lock().unwrap();
        assert_eq!(requests[0].line, "POST /v1.0/search/query HTTP/1.1");
        assert_eq!(
            requests[0].header("authorization"),
            Some("Bearer graph-token")
        );
        let body = requests[0].json();
        assert_eq!(body["requests"][0]["query"]["queryString"], "vacation");
        assert_eq!(body["requests"][0]["size"], 5);
    }

    #[tokio::test]
    async fn test_forbidden_is_status_error() {
        let (base, _) = canned_server(vec![(
            403,
            r#"{"error":{"code":"Forbidden","message":"Access denied"}}"#,
        )])
        .await;
        let search =
            GraphDocumentSearch::new(&format!("{}/v1.0", base), 5, Duration::from_secs(5)).unwrap();

        let result = search.search("q", &AccessToken::new("t")).await;

        match result {
            Err(SearchError::Status { status, snippet }) => {
                assert_eq!(status, 403);
                assert!(snippet.contains("Access denied"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_index_is_transport_error() {
        let search =
            GraphDocumentSearch::new("http://127.0.0.1:1/v1.0", 5, Duration::from_secs(2)).unwrap();
        let result = search.search("q", &AccessToken::new("t")).await;
        assert!(matches!(result, Err(SearchError::Transport(_))));
    }
}
