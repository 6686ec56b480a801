//! Configuration files flowing into a service context

#[cfg(test)]
mod tests {
    use crate::common::WorkspaceFactory;
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use taskgate::config::AmbiguityPolicy;
    use taskgate::{Config, GateError, ServiceContext};

    const FULL_CONFIG: &str = r#"
api:
  base_url: "https://tasks.example.com/api/1.0"
  token: "pat-123"
  workspace_id: "1200"
  timeout_secs: 10
serializer:
  default_spacing_ms: 250
  max_proactive_spacing_ms: 4000
  max_reactive_spacing_ms: 8000
batch:
  batch_size: 20
  concurrency: 4
  continue_on_error: false
  retry_count: 1
resolver:
  cache_ttl_secs: 60
  ambiguity: reject
logging:
  level: "taskgate=debug"
  json: true
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_full_file_configures_every_component() {
        let file = write_config(FULL_CONFIG);
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.api.token.as_deref(), Some("pat-123"));
        assert_eq!(config.resolver.ambiguity, AmbiguityPolicy::Reject);
        assert!(config.logging.json);

        let context =
            ServiceContext::new(config, Arc::new(WorkspaceFactory::standard())).unwrap();

        assert_eq!(
            context.serializer().rate_state().current_spacing,
            Duration::from_millis(250)
        );
        assert_eq!(context.cache().ttl(), Duration::from_secs(60));

        let options = context.batch_options();
        assert_eq!(options.batch_size, 20);
        assert_eq!(options.concurrency, 4);
        assert!(!options.continue_on_error);
        assert_eq!(options.retry_count, 1);
        assert_eq!(options.retry_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let file = write_config("{}\n");
        let config = tokio_test::block_on(Config::from_file(file.path())).unwrap();

        assert_eq!(config.serializer.default_spacing_ms, 100);
        assert_eq!(config.batch.batch_size, 10);
        assert_eq!(config.resolver.cache_ttl_secs, 300);
        assert_eq!(config.resolver.id_pattern, r"^\d+$");
    }

    #[tokio::test]
    async fn test_invalid_values_rejected_with_section() {
        let cases = [
            ("api:\n  base_url: \"ftp://example.com\"\n", "[api]"),
            ("serializer:\n  max_reactive_spacing_ms: 10\n", "[serializer]"),
            ("batch:\n  concurrency: 0\n", "[batch]"),
            ("resolver:\n  id_pattern: \"([\"\n", "[resolver]"),
        ];

        for (yaml, section) in cases {
            let file = write_config(yaml);
            let err = Config::from_file(file.path()).await.unwrap_err();
            assert!(matches!(err, GateError::Config(_)), "{}", yaml);
            assert!(err.to_string().contains(section), "{}: {}", section, err);
        }
    }

    #[test]
    fn test_unknown_ambiguity_policy_fails_to_parse() {
        let err = Config::from_yaml_str("resolver:\n  ambiguity: coin_flip\n").unwrap_err();
        assert!(matches!(err, GateError::Config(_)));
    }
}
