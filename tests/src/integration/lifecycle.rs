//! # Lifecycle Tests
//!
//! Handle validity, removal semantics, and waiter cancellation.

#[cfg(test)]
mod tests {
    use crate::integration::{quiet_registry, CHAIN_SPEC};
    use chain_session::{
        ChainRegistry, MockChainEngine, NextResponse, SessionConfig, SessionError,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_create_returns_usable_handle() {
        let registry = quiet_registry();
        let handle = registry.add_chain(CHAIN_SPEC).await.unwrap();

        // Usable immediately in submission and delivery operations.
        registry
            .submit_request(handle, r#"{"id":1,"jsonrpc":"2.0","method":"system_version"}"#)
            .unwrap();
        let delivered = timeout(Duration::from_secs(1), registry.wait_next_response(handle))
            .await
            .unwrap()
            .unwrap();
        assert!(!delivered.is_closed());
    }

    #[tokio::test]
    async fn test_malformed_spec_is_rejected_without_residue() {
        let registry = quiet_registry();

        let result = registry.add_chain("definitely not json").await;
        assert!(matches!(result, Err(SessionError::InvalidSpec(_))));
        assert_eq!(registry.chain_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_immediately_after_remove() {
        let registry = quiet_registry();
        let handle = registry.add_chain(CHAIN_SPEC).await.unwrap();
        registry.remove_chain(handle).await.unwrap();

        let result = registry.submit_request(handle, r#"{"id":1,"method":"system_chain"}"#);
        assert!(matches!(result, Err(SessionError::UnknownHandle(_))));
    }

    #[tokio::test]
    async fn test_every_operation_on_removed_handle_fails_cleanly() {
        let registry = quiet_registry();
        let handle = registry.add_chain(CHAIN_SPEC).await.unwrap();
        registry.remove_chain(handle).await.unwrap();

        assert!(matches!(
            registry.wait_next_response(handle).await,
            Err(SessionError::UnknownHandle(_))
        ));
        assert!(matches!(
            registry.remove_chain(handle).await,
            Err(SessionError::UnknownHandle(_))
        ));
    }

    #[tokio::test]
    async fn test_outstanding_waiter_unblocks_on_removal() {
        let registry = Arc::new(quiet_registry());
        let handle = registry.add_chain(CHAIN_SPEC).await.unwrap();

        // No responses pending: the waiter genuinely suspends.
        let waiter = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move { registry.wait_next_response(handle).await })
        };
        tokio::time::sleep(Duration::from_millis(30)).await;

        registry.remove_chain(handle).await.unwrap();

        let outcome = timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter must return within bounded time")
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, NextResponse::Closed));
    }

    #[tokio::test]
    async fn test_independent_registries_in_one_process() {
        let first = quiet_registry();
        let second = quiet_registry();

        let in_first = first.add_chain(CHAIN_SPEC).await.unwrap();
        // A handle is only meaningful to the registry that minted it. Both
        // registries start from slot 0, so the foreign lookup must fail on
        // liveness, not accidentally hit the other registry's chain.
        second.remove_chain(in_first).await.unwrap_err();
        assert_eq!(second.chain_count(), 0);
        assert_eq!(first.chain_count(), 1);
    }

    #[tokio::test]
    async fn test_one_chain_failure_does_not_affect_others() {
        let registry = quiet_registry();
        let healthy = registry.add_chain(CHAIN_SPEC).await.unwrap();
        let doomed = registry.add_chain(CHAIN_SPEC).await.unwrap();

        registry.remove_chain(doomed).await.unwrap();

        registry
            .submit_request(healthy, r#"{"id":9,"jsonrpc":"2.0","method":"system_chain"}"#)
            .unwrap();
        let delivered = timeout(
            Duration::from_secs(1),
            registry.wait_next_response(healthy),
        )
        .await
        .unwrap()
        .unwrap();
        let NextResponse::Response(envelope) = delivered else {
            panic!("healthy chain must keep delivering");
        };
        assert_eq!(envelope.chain(), healthy);
    }

    #[tokio::test]
    async fn test_chain_table_exhaustion_recovers_after_removal() {
        let registry = ChainRegistry::new(
            SessionConfig {
                max_chains: 2,
                ..SessionConfig::for_testing()
            },
            Arc::new(MockChainEngine::with_head_interval(Duration::from_secs(
                3600,
            ))),
        );

        let a = registry.add_chain(CHAIN_SPEC).await.unwrap();
        let _b = registry.add_chain(CHAIN_SPEC).await.unwrap();
        assert!(matches!(
            registry.add_chain(CHAIN_SPEC).await,
            Err(SessionError::ResourceExhausted(_))
        ));

        registry.remove_chain(a).await.unwrap();
        registry.add_chain(CHAIN_SPEC).await.unwrap();
    }
}
