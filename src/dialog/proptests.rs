//! Property-based tests for the dialog
//!
//! These tests verify the session lifecycle invariants hold for any stored
//! flow and any input history.

use super::*;
use crate::analysis::TextAnalyzer;
use crate::catalog::Catalog;
use crate::session::{InMemorySessionStore, Session, SessionStore};
use crate::sms::SmsNotifier;
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_flow() -> impl Strategy<Value = Flow> {
    proptest::sample::select(Flow::ALL.to_vec())
}

fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u8..10).prop_map(|d| d.to_string()),
        Just(String::new()),
        Just("   ".to_string()),
        "[a-z ]{1,12}",
        "[0-9]{2,3}",
    ]
}

fn arb_history() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_token(), 0..5).prop_map(|tokens| tokens.join("*"))
}

fn offline_engine(store: Arc<InMemorySessionStore>) -> DialogEngine {
    DialogEngine::new(
        store,
        TextAnalyzer::new(None, Duration::from_secs(1)),
        SmsNotifier::new(None, "", Duration::from_secs(1)),
        Arc::new(Catalog::sample()),
    )
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
        .block_on(future)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn end_deletes_and_con_keeps_session(flow in arb_flow(), text in arb_history()) {
        let (reply, stored, expected) = run(async {
            let store = Arc::new(InMemorySessionStore::new(Duration::from_secs(60)));
            store.set("k", Session { flow, ..Session::default() }).await.unwrap();
            let expected = transition(flow, last_input(&text), &Catalog::sample());

            let engine = offline_engine(store.clone());
            let request = DialogRequest {
                session_id: "k".to_string(),
                phone_number: "+244923456789".to_string(),
                text,
                ..DialogRequest::default()
            };
            let reply = engine.handle(&request).await;
            let stored = store.get("k").await.unwrap();
            (reply, stored, expected)
        });

        match expected {
            Step::Prompt { next, .. } => {
                prop_assert!(!reply.is_end());
                prop_assert_eq!(stored.map(|s| s.flow), Some(next));
            }
            _ => {
                prop_assert!(reply.is_end());
                prop_assert!(stored.is_none());
            }
        }
    }

    #[test]
    fn prompts_never_park_at_initial_or_unknown(flow in arb_flow(), token in arb_token()) {
        if let Step::Prompt { next, .. } = transition(flow, &token, &Catalog::sample()) {
            prop_assert!(next != Flow::Initial && next != Flow::Unknown);
        }
    }

    #[test]
    fn empty_input_outside_menu_recovers(flow in arb_flow(), prefix in arb_history()) {
        let text = if prefix.is_empty() { prefix } else { format!("{prefix}*") };
        let step = transition(flow, last_input(&text), &Catalog::sample());
        prop_assert_eq!(step, Step::main_menu());
    }

    #[test]
    fn only_last_token_matters(flow in arb_flow(), history in arb_history(), token in arb_token()) {
        let catalog = Catalog::sample();
        let joined = if history.is_empty() { token.clone() } else { format!("{history}*{token}") };
        prop_assert_eq!(
            transition(flow, last_input(&joined), &catalog),
            transition(flow, &token, &catalog)
        );
    }

    #[test]
    fn replies_always_have_body(flow in arb_flow(), token in arb_token()) {
        let step = transition(flow, &token, &Catalog::sample());
        let non_empty = match &step {
            Step::Prompt { text, .. } | Step::End { text } | Step::EndWithSms { text, .. } => !text.is_empty(),
            Step::EndWithAnalysis { description, .. } => !description.trim().is_empty(),
        };
        prop_assert!(non_empty);
    }
}
