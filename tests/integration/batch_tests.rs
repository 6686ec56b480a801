//! Batch processor integration tests

#[cfg(test)]
mod tests {
    use crate::common::WorkspaceFactory;
    use crate::common::assertions::BatchResultAssertions;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;
    use taskgate::core::batch::{BatchOptions, BatchProcessor};
    use taskgate::core::resolver::SearchScope;
    use taskgate::{ErrorKind, GateError, ServiceContext};

    fn options() -> BatchOptions {
        BatchOptions::new()
            .with_batch_size(10)
            .with_concurrency(3)
            .with_retry_delay(Duration::from_millis(10))
            .with_max_retry_delay(Duration::from_millis(50))
    }

    /// 25 items, two of which always fail
    #[tokio::test(start_paused = true)]
    async fn test_twenty_five_items_two_failures() {
        let processor = BatchProcessor::new(options());
        let items: Vec<usize> = (0..25).collect();

        let result = processor
            .process(items, |n| async move {
                if n == 7 || n == 19 {
                    Err(GateError::Server {
                        status: 500,
                        message: format!("item {} is cursed", n),
                    })
                } else {
                    Ok(format!("ok-{}", n))
                }
            })
            .await
            .unwrap();

        result.assert_accounted(25);
        assert_eq!(result.totals.total, 25);
        assert_eq!(result.totals.success, 23);
        assert_eq!(result.totals.failure, 2);

        let failed: HashSet<usize> = result.failed.iter().map(|f| f.index).collect();
        assert_eq!(failed, HashSet::from([7, 19]));
        for failure in &result.failed {
            assert_eq!(failure.item, failure.index);
            assert_eq!(failure.attempts, 4);
        }
        for success in &result.successful {
            assert_eq!(success.value, format!("ok-{}", success.index));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_on_error_marks_unstarted_items_aborted() {
        let processor =
            BatchProcessor::new(options().with_continue_on_error(false).with_retry_count(0));

        let result = processor
            .process((0..25).collect::<Vec<usize>>(), |n| async move {
                if n == 3 {
                    Err(GateError::Validation("rejected".to_string()))
                } else {
                    Ok(n)
                }
            })
            .await
            .unwrap();

        result.assert_accounted(25);
        assert_eq!(result.totals.success, 9);
        let aborted = result
            .failed
            .iter()
            .filter(|f| matches!(f.error, GateError::Aborted(_)))
            .count();
        assert_eq!(aborted, 15);
        assert!(
            result
                .failed
                .iter()
                .filter(|f| matches!(f.error, GateError::Aborted(_)))
                .all(|f| f.index >= 10 && f.attempts == 0)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_many_reports_each_name() {
        let api = Arc::new(WorkspaceFactory::numbered(25));
        let context = ServiceContext::new(WorkspaceFactory::config(), api).unwrap();

        let mut names: Vec<String> = (0..23).map(|n| format!("Task {}", n)).collect();
        names.insert(4, "Nonexistent A".to_string());
        names.push("Nonexistent B".to_string());

        let options = context.batch_options().with_retry_count(1);
        let result = context
            .resolve_many(names.clone(), &SearchScope::Workspace, options)
            .await
            .unwrap();

        result.assert_accounted(25);
        assert_eq!(result.totals.success, 23);
        assert_eq!(result.totals.failure, 2);

        let mut failed: Vec<(usize, &str)> = result
            .failed
            .iter()
            .map(|f| (f.index, f.item.as_str()))
            .collect();
        failed.sort_unstable();
        assert_eq!(failed, vec![(4, "Nonexistent A"), (24, "Nonexistent B")]);
        assert!(result.failed.iter().all(|f| f.error.kind() == ErrorKind::NotFound));

        for success in &result.successful {
            assert_eq!(success.value.name, names[success.index]);
        }
    }

    #[tokio::test]
    async fn test_invalid_options_is_the_only_error() {
        let processor = BatchProcessor::new(options().with_concurrency(0));
        let err = processor
            .process(vec![1, 2, 3], |n: i32| async move { Ok(n) })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
