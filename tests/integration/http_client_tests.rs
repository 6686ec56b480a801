//! HTTP client tests against a local mock server

#[cfg(test)]
mod tests {
    use serde_json::json;
    use std::time::Duration;
    use taskgate::config::ApiConfig;
    use taskgate::core::remote::{HttpTaskApi, TaskApi};
    use taskgate::core::resolver::SearchScope;
    use taskgate::{Config, ErrorKind, GateError, ServiceContext};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_config(server: &MockServer) -> ApiConfig {
        ApiConfig {
            base_url: server.uri(),
            token: Some("secret-token".to_string()),
            workspace_id: "1200".to_string(),
            timeout_secs: 5,
            ..ApiConfig::default()
        }
    }

    fn items_body() -> serde_json::Value {
        json!({
            "data": [
                {"id": "5001", "name": "Launch Plan", "updated_at": "2024-05-01T09:00:00Z"},
                {"id": "5002", "name": "🚀 Kickoff"},
                {"id": "5003"}
            ]
        })
    }

    #[tokio::test]
    async fn test_list_items_parses_envelope_and_quota() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/containers/77/items"))
            .and(header("authorization", "Bearer secret-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(items_body())
                    .insert_header("x-ratelimit-limit", "150")
                    .insert_header("x-ratelimit-remaining", "149")
                    .insert_header("x-ratelimit-reset", "1700000060"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = HttpTaskApi::new(&api_config(&server)).unwrap();
        let response = api.list_items("77").await.unwrap();

        assert_eq!(response.value.len(), 3);
        assert_eq!(response.value[0].name, "Launch Plan");
        assert!(response.value[0].updated_at.is_some());
        assert_eq!(response.value[2].name, "");

        let quota = response.quota.unwrap();
        assert_eq!(quota.limit, 150);
        assert_eq!(quota.remaining, 149);
        assert_eq!(quota.reset_epoch_secs, Some(1_700_000_060));
    }

    #[tokio::test]
    async fn test_rate_limit_carries_details() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/workspaces/1200/containers"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "2")
                    .insert_header("x-ratelimit-limit", "150")
                    .insert_header("x-ratelimit-remaining", "0")
                    .set_body_json(json!({"errors": [{"message": "Rate limit exceeded"}]})),
            )
            .mount(&server)
            .await;

        let api = HttpTaskApi::new(&api_config(&server)).unwrap();
        let err = api.list_containers("1200").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RateLimit);
        match err {
            GateError::RateLimit { message, details } => {
                assert_eq!(message, "Rate limit exceeded");
                assert_eq!(details.retry_after, Some(Duration::from_secs(2)));
                assert_eq!(details.quota.unwrap().remaining, 0);
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_status_classification() {
        let server = MockServer::start().await;
        let cases: [(u16, ErrorKind); 6] = [
            (401, ErrorKind::Unauthorized),
            (403, ErrorKind::Unauthorized),
            (404, ErrorKind::NotFound),
            (422, ErrorKind::Validation),
            (500, ErrorKind::ServerError),
            (503, ErrorKind::ServerError),
        ];
        for (status, _) in cases.iter() {
            Mock::given(method("GET"))
                .and(path(format!("/containers/{}/items", status)))
                .respond_with(ResponseTemplate::new(*status))
                .mount(&server)
                .await;
        }

        let api = HttpTaskApi::new(&api_config(&server)).unwrap();
        for (status, kind) in cases.iter() {
            let err = api.list_items(&status.to_string()).await.unwrap_err();
            assert_eq!(err.kind(), *kind, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..ApiConfig::default()
        };
        let api = HttpTaskApi::new(&config).unwrap();

        let err = api.list_items("1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NetworkError);
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_context_retries_once_after_429() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/containers/77/items"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "0"))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/containers/77/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(items_body()))
            .with_priority(2)
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.api = api_config(&server);
        let context = ServiceContext::connect(config).unwrap();

        let resolution = context
            .resolve("kickoff", &SearchScope::Container("77".to_string()))
            .await
            .unwrap();
        assert_eq!(resolution.id, "5002");
        assert_eq!(context.serializer().rate_state().rate_limited_count, 1);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
    }
}
