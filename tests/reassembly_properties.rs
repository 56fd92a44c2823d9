//! Property-based tests for chunk reassembly
//!
//! Verifies the central reassembly property: for any consistent chunk
//! sequence delivered in any arrival order, the decoded result equals the
//! original document.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use game_bridge::bridge::inbox::{ChunkInbox, IngestOutcome};
use game_bridge::bridge::payload;
use game_bridge::bridge::types::{Base64Fragment, ChunkIndex, ChunkTotal, IntegrityTag, MessageId};
use proptest::prelude::*;
use serde_json::json;

/// Generate a document, its base64 fragments, and a shuffled delivery order.
fn doc_chunks_and_order(
) -> impl Strategy<Value = (serde_json::Value, Vec<String>, Vec<usize>)> {
    (0i64..1_000_000, "[a-z]{1,12}", 1usize..=6).prop_flat_map(|(score, player, want_chunks)| {
        let doc = json!({ "score": score, "player": player });
        let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&doc).unwrap());

        // Split into up to `want_chunks` non-empty fragments.
        let chunk_len = encoded.len().div_ceil(want_chunks);
        let fragments: Vec<String> = encoded
            .as_bytes()
            .chunks(chunk_len)
            .map(|c| String::from_utf8(c.to_vec()).unwrap())
            .collect();

        let order: Vec<usize> = (0..fragments.len()).collect();
        (Just(doc), Just(fragments), Just(order).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn arrival_order_does_not_affect_published_document(
        (doc, fragments, order) in doc_chunks_and_order()
    ) {
        let inbox = ChunkInbox::new();
        let id = MessageId::try_new("g1".to_string()).unwrap();
        let tag = IntegrityTag::try_new("abc".to_string()).unwrap();
        let total = ChunkTotal::try_new(fragments.len() as u32).unwrap();

        let mut assembled = None;
        for (delivered, &index) in order.iter().enumerate() {
            let outcome = inbox.ingest(
                &id,
                &tag,
                ChunkIndex::from(index as u32),
                total,
                Base64Fragment::try_new(fragments[index].clone()).unwrap(),
            );
            if delivered + 1 == order.len() {
                match outcome {
                    IngestOutcome::Complete(b64) => assembled = Some(b64),
                    other => prop_assert!(false, "expected completion, got {other:?}"),
                }
            } else {
                prop_assert_eq!(outcome, IngestOutcome::Stored);
            }
        }

        let decoded = payload::decode_document(&assembled.unwrap()).unwrap();
        prop_assert_eq!(decoded, doc);
    }

    #[test]
    fn duplicate_deliveries_do_not_change_the_result(
        (doc, fragments, order) in doc_chunks_and_order()
    ) {
        let inbox = ChunkInbox::new();
        let id = MessageId::try_new("g1".to_string()).unwrap();
        let tag = IntegrityTag::try_new("abc".to_string()).unwrap();
        let total = ChunkTotal::try_new(fragments.len() as u32).unwrap();

        // Deliver every chunk except the highest-ordered one twice; the
        // message must complete exactly once, on the last new index.
        let mut last = IngestOutcome::Stored;
        for &index in &order {
            let fragment = Base64Fragment::try_new(fragments[index].clone()).unwrap();
            last = inbox.ingest(&id, &tag, ChunkIndex::from(index as u32), total, fragment.clone());
            if !matches!(last, IngestOutcome::Complete(_)) {
                last = inbox.ingest(&id, &tag, ChunkIndex::from(index as u32), total, fragment);
            }
        }

        match last {
            IngestOutcome::Complete(b64) => {
                let decoded = payload::decode_document(&b64).unwrap();
                prop_assert_eq!(decoded, doc);
            }
            other => prop_assert!(false, "expected completion, got {other:?}"),
        }
    }
}
