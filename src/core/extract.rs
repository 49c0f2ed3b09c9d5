use crate::domain::model::{value_kind, Record, Table};
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Fetches `endpoint` once and converts the JSON array it returns into a [`Table`].
pub async fn extract(client: &Client, endpoint: &str, timeout: Duration) -> Result<Table> {
    tracing::debug!("Making API request to: {} (timeout {:?})", endpoint, timeout);

    let network_error = |source| EtlError::NetworkError {
        url: endpoint.to_string(),
        source,
    };

    let response = client
        .get(endpoint)
        .timeout(timeout)
        .send()
        .await
        .map_err(network_error)?;

    let status = response.status();
    tracing::debug!("API response status: {}", status);

    if !status.is_success() {
        return Err(EtlError::HttpStatusError {
            url: endpoint.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(network_error)?;
    tracing::debug!("Received {} bytes", body.len());

    let records = parse_records(&body)?;
    Ok(Table::from_records(records))
}

/// Parses a response body that must be a JSON array of objects.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| EtlError::decode(format!("response body is not valid JSON: {}", e)))?;

    let items = match json {
        Value::Array(items) => items,
        other => {
            return Err(EtlError::decode(format!(
                "expected a JSON array of objects, got {}",
                value_kind(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(data) => Ok(Record::new(data)),
            other => Err(EtlError::decode(format!(
                "element {} is {}, expected an object",
                index,
                value_kind(&other)
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_records_keeps_order_and_key_order() {
        let body = br#"[{"id": 2, "body": "b"}, {"id": 1, "zeta": 0, "alpha": 1}]"#;
        let records = parse_records(body).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data["id"], json!(2));
        let keys: Vec<&String> = records[1].data.keys().collect();
        assert_eq!(keys, ["id", "zeta", "alpha"]);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        let err = parse_records(br#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, EtlError::DecodeError { .. }));
    }

    #[test]
    fn test_parse_records_rejects_scalar_elements() {
        let err = parse_records(br#"[{"id": 1}, 2]"#).unwrap_err();
        assert!(matches!(err, EtlError::DecodeError { .. }));
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn test_parse_records_rejects_invalid_json() {
        let err = parse_records(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, EtlError::DecodeError { .. }));
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_records(b"[]").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_successful_api_response() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!([
                        {"id": 1, "title": "First", "body": "one two", "userId": 1},
                        {"id": 2, "title": "Second", "body": "three", "userId": 1},
                        {"id": 3, "title": "Third", "userId": 2}
                    ]));
            })
            .await;

        let table = extract(&Client::new(), &server.url("/posts"), Duration::from_secs(5))
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.columns(), ["id", "title", "body", "userId"]);
        assert_eq!(table.cell(0, "id"), Some(&json!(1)));
        assert_eq!(table.cell(2, "id"), Some(&json!(3)));
        assert_eq!(table.cell(2, "body"), Some(&Value::Null));
    }

    #[tokio::test]
    async fn test_extract_http_error_status() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(500);
            })
            .await;

        let err = extract(&Client::new(), &server.url("/posts"), Duration::from_secs(5))
            .await
            .unwrap_err();

        api_mock.assert_async().await;
        match err {
            EtlError::HttpStatusError { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_not_found_is_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let err = extract(&Client::new(), &server.url("/missing"), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::HttpStatusError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_extract_invalid_body_is_decode_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/posts");
                then.status(200).body("definitely not json");
            })
            .await;

        let err = extract(&Client::new(), &server.url("/posts"), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, EtlError::DecodeError { .. }));
    }

    #[tokio::test]
    async fn test_extract_connection_refused_is_network_error() {
        // 連接埠 1 上不會有服務
        let err = extract(
            &Client::new(),
            "http://127.0.0.1:1/posts",
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EtlError::NetworkError { .. }));
    }

    #[tokio::test]
    async fn test_extract_timeout_is_network_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .delay(Duration::from_millis(1500))
                    .json_body(json!([]));
            })
            .await;

        let err = extract(
            &Client::new(),
            &server.url("/slow"),
            Duration::from_millis(200),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, EtlError::NetworkError { .. }));
    }
}
