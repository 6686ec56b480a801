//! Name resolution through a full service context

#[cfg(test)]
mod tests {
    use crate::common::{FakeTaskApi, WorkspaceFactory};
    use crate::{assert_err, assert_ok};
    use std::sync::Arc;
    use std::time::Duration;
    use taskgate::config::AmbiguityPolicy;
    use taskgate::core::resolver::{MatchReason, SearchScope};
    use taskgate::{ErrorKind, GateError, ServiceContext};

    fn context(api: FakeTaskApi) -> (Arc<FakeTaskApi>, ServiceContext) {
        let api = Arc::new(api);
        let context = ServiceContext::new(WorkspaceFactory::config(), api.clone()).unwrap();
        (api, context)
    }

    #[tokio::test(start_paused = true)]
    async fn test_exact_beats_case_insensitive() {
        let (_, context) = context(WorkspaceFactory::standard());

        let resolution = assert_ok!(
            context
                .resolve("Launch Plan", &SearchScope::Container("1301".to_string()))
                .await
        );

        assert_eq!(resolution.id, "5001");
        let result = resolution.match_result.unwrap();
        assert_eq!(result.score, 100);
        assert!(result.exact_match);
    }

    #[tokio::test(start_paused = true)]
    async fn test_container_given_by_decorated_name() {
        let (api, context) = context(WorkspaceFactory::standard());

        let resolution = assert_ok!(
            context
                .resolve(
                    "press release",
                    &SearchScope::Container("product launch".to_string())
                )
                .await
        );

        assert_eq!(resolution.id, "5003");
        assert_eq!(resolution.container_id.as_deref(), Some("1301"));
        assert_eq!(
            resolution.match_result.unwrap().reason,
            MatchReason::StrippedCaseInsensitive
        );
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_workspace_tie_broken_by_recency() {
        let (_, context) = context(WorkspaceFactory::standard());

        let resolution = assert_ok!(context.resolve("Retro notes", &SearchScope::Workspace).await);

        assert_eq!(resolution.id, "6001");
        assert_eq!(resolution.container_id.as_deref(), Some("1302"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cached_until_ttl_expires() {
        let (api, context) = context(WorkspaceFactory::standard());
        let scope = SearchScope::Workspace;

        assert_ok!(context.resolve("Migrate billing", &scope).await);
        let after_first = api.call_count();

        tokio::time::advance(Duration::from_secs(4 * 60 + 59)).await;
        let cached = assert_ok!(context.resolve("Migrate billing", &scope).await);
        assert!(cached.from_cache);
        assert_eq!(api.call_count(), after_first);

        tokio::time::advance(Duration::from_secs(2)).await;
        let fresh = assert_ok!(context.resolve("Migrate billing", &scope).await);
        assert!(!fresh.from_cache);
        assert_eq!(fresh.id, cached.id);
        assert!(api.call_count() > after_first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_failing_container_is_skipped() {
        let (_, context) = context(WorkspaceFactory::standard().with_failing_container("1301"));

        let resolution = assert_ok!(context.resolve("Retro notes", &SearchScope::Workspace).await);
        assert_eq!(resolution.id, "6001");
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_container_failing_is_network_error() {
        let (_, context) = context(
            WorkspaceFactory::standard()
                .with_failing_container("1301")
                .with_failing_container("1302"),
        );

        let err = assert_err!(context.resolve("Retro notes", &SearchScope::Workspace).await);
        assert_eq!(err.kind(), ErrorKind::NetworkError);
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_found_mentions_scope() {
        let (_, context) = context(WorkspaceFactory::standard());

        let err = assert_err!(
            context
                .resolve("Hiring plan", &SearchScope::Container("1302".to_string()))
                .await
        );

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("Hiring plan"));
        assert!(err.to_string().contains("1302"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reject_policy_surfaces_ambiguity() {
        let api = Arc::new(WorkspaceFactory::standard());
        let mut config = WorkspaceFactory::config();
        config.resolver.ambiguity = AmbiguityPolicy::Reject;
        let context = ServiceContext::new(config, api).unwrap();

        // "Launch Plan" and "launch plan" both contain "plan"
        let err = assert_err!(
            context
                .resolve("plan", &SearchScope::Container("1301".to_string()))
                .await
        );
        match err {
            GateError::Ambiguous { candidates, .. } => assert_eq!(candidates.len(), 2),
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }
}
