//! # Ordering Tests
//!
//! Responses for one chain arrive in the order the engine produced them.

#[cfg(test)]
mod tests {
    use crate::integration::{quiet_registry, CHAIN_SPEC};
    use chain_session::NextResponse;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_responses_are_fifo_per_chain() {
        let registry = quiet_registry();
        let handle = registry.add_chain(CHAIN_SPEC).await.unwrap();

        for id in 1..=5u64 {
            let request = format!(
                r#"{{"id":{id},"jsonrpc":"2.0","method":"system_version","params":[]}}"#
            );
            registry.submit_request(handle, &request).unwrap();
        }

        for expected_id in 1..=5u64 {
            let delivered =
                timeout(Duration::from_secs(1), registry.wait_next_response(handle))
                    .await
                    .unwrap()
                    .unwrap();
            let NextResponse::Response(envelope) = delivered else {
                panic!("expected response {expected_id}");
            };
            let reply: Value = serde_json::from_str(envelope.as_str()).unwrap();
            assert_eq!(reply["id"], expected_id, "FIFO order violated");
        }
    }

    #[tokio::test]
    async fn test_error_replies_keep_their_slot_in_the_order() {
        let registry = quiet_registry();
        let handle = registry.add_chain(CHAIN_SPEC).await.unwrap();

        // Request 2 targets a method the engine does not recognize. Its
        // rejection surfaces as an ordinary JSON-RPC error payload in
        // sequence, not as a submission-time failure.
        registry
            .submit_request(handle, r#"{"id":1,"jsonrpc":"2.0","method":"system_chain"}"#)
            .unwrap();
        registry
            .submit_request(handle, r#"{"id":2,"jsonrpc":"2.0","method":"no_such_method"}"#)
            .unwrap();
        registry
            .submit_request(handle, r#"{"id":3,"jsonrpc":"2.0","method":"system_chain"}"#)
            .unwrap();

        let mut ids = Vec::new();
        let mut error_ids = Vec::new();
        for _ in 0..3 {
            let delivered =
                timeout(Duration::from_secs(1), registry.wait_next_response(handle))
                    .await
                    .unwrap()
                    .unwrap();
            let NextResponse::Response(envelope) = delivered else {
                panic!("expected three responses");
            };
            let reply: Value = serde_json::from_str(envelope.as_str()).unwrap();
            ids.push(reply["id"].as_u64().unwrap());
            if reply.get("error").is_some() {
                error_ids.push(reply["id"].as_u64().unwrap());
            }
        }

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(error_ids, vec![2]);
    }
}
