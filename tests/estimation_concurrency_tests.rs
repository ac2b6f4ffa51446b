//! Tests for live re-estimation: stale results and input coalescing
//!
//! Runs with paused time; mock provider delays decide completion order.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::*;
use relayswap::quote::SwapAmount;
use relayswap::{
    Debouncer, EstimationCoordinator, EstimationOutcome, EstimationState, IntentAmount, QuoteError,
    SwapEstimate, SwapIntent, SwapOrchestrator, SwapRequest,
};

fn orchestrator(provider: MockQuoteProvider) -> (SwapOrchestrator, Arc<MockQuoteProvider>) {
    let provider = Arc::new(provider);
    let orchestrator = SwapOrchestrator::new(
        &bsc_config(),
        provider.clone(),
        provider.clone(),
        Arc::new(MockChainClient::new()),
    );
    (orchestrator, provider)
}

fn request(amount: &str) -> SwapRequest {
    SwapRequest::new(SwapIntent::new(
        BSC,
        USDT,
        BUSD,
        IntentAmount::sell(amount).unwrap(),
        WALLET,
    ))
}

#[tokio::test(start_paused = true)]
async fn test_later_request_wins_over_slow_earlier_one() {
    init_tracing();
    let (orchestrator, _) = orchestrator(MockQuoteProvider::new().with_delays(vec![
        Duration::from_millis(200),
        Duration::from_millis(10),
    ]));
    let coordinator = EstimationCoordinator::<SwapEstimate>::new();

    let a = request("100");
    let b = request("50");
    let (outcome_a, outcome_b) = tokio::join!(
        coordinator.run("k", || orchestrator.estimate(&a)),
        coordinator.run("k", || orchestrator.estimate(&b)),
    );

    assert!(matches!(outcome_a, EstimationOutcome::Superseded));
    assert!(matches!(outcome_b, EstimationOutcome::Applied(_)));

    let state = coordinator.current();
    let estimate = state.value().expect("B should be published");
    assert_eq!(estimate.main_amount, SwapAmount::Sell(ether("50")));
}

#[tokio::test(start_paused = true)]
async fn test_slow_run_for_previous_amount_is_discarded() {
    let (orchestrator, _) = orchestrator(MockQuoteProvider::new().with_delays(vec![
        Duration::from_millis(200),
        Duration::from_millis(10),
    ]));
    let coordinator = EstimationCoordinator::<SwapEstimate>::new();

    // Editing the amount changes the request key
    let before = request("100");
    let after = request("200");
    let before_key = before.intent.estimation_key();
    let after_key = after.intent.estimation_key();
    assert_ne!(before_key, after_key);

    let (outcome_before, outcome_after) = tokio::join!(
        coordinator.run(&before_key, || orchestrator.estimate(&before)),
        coordinator.run(&after_key, || orchestrator.estimate(&after)),
    );

    assert!(matches!(outcome_before, EstimationOutcome::Superseded));
    assert!(matches!(outcome_after, EstimationOutcome::Applied(_)));
    let state = coordinator.current();
    let estimate = state.value().expect("the newer amount should be published");
    assert_eq!(estimate.main_amount, SwapAmount::Sell(ether("200")));
}

#[tokio::test(start_paused = true)]
async fn test_stale_success_does_not_hide_newer_failure() {
    let (slow, _) = orchestrator(
        MockQuoteProvider::new().with_delays(vec![Duration::from_millis(200)]),
    );
    let (failing, _) = orchestrator(MockQuoteProvider::new().failing(
        QuoteError::InsufficientLiquidity {
            provider: "mock",
            message: "no route".to_string(),
        },
    ));
    let coordinator = EstimationCoordinator::<SwapEstimate>::new();

    let a = request("100");
    let b = request("100");
    let (outcome_a, outcome_b) = tokio::join!(
        coordinator.run("k", || slow.estimate(&a)),
        coordinator.run("k", || failing.estimate(&b)),
    );

    assert!(matches!(outcome_a, EstimationOutcome::Superseded));
    assert!(matches!(outcome_b, EstimationOutcome::Failed(_)));
    assert!(coordinator.current().value().is_none());
    assert!(coordinator.current().error().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_failure_replaces_previous_value() {
    let (working, _) = orchestrator(MockQuoteProvider::new());
    let (failing, _) = orchestrator(MockQuoteProvider::new().failing(
        QuoteError::RequestFailed {
            provider: "mock",
            message: "Request failed with status code 502".to_string(),
            status: Some(502),
        },
    ));
    let coordinator = EstimationCoordinator::<SwapEstimate>::new();
    let request = request("100");

    coordinator
        .run("k", || working.estimate(&request))
        .await;
    assert!(coordinator.current().value().is_some());

    coordinator
        .run("k", || failing.estimate(&request))
        .await;
    assert!(matches!(coordinator.current(), EstimationState::Failed(_)));
}

#[tokio::test(start_paused = true)]
async fn test_debounced_edits_estimate_once() {
    let (orchestrator, provider) = orchestrator(MockQuoteProvider::new());
    let coordinator = Arc::new(EstimationCoordinator::<SwapEstimate>::new());
    let mut state = coordinator.subscribe();

    let (debouncer, _task) = Debouncer::spawn(Duration::from_millis(500), None, {
        let coordinator = coordinator.clone();
        move |request: SwapRequest| {
            let coordinator = coordinator.clone();
            let orchestrator = orchestrator.clone();
            async move {
                let key = request.intent.estimation_key();
                coordinator
                    .run(&key, || orchestrator.estimate(&request))
                    .await;
            }
        }
    });

    // A user typing "1", "12", "125"
    for amount in ["1", "12", "125"] {
        assert!(debouncer.push(request(amount)));
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let published = state
        .wait_for(|s| s.value().is_some())
        .await
        .unwrap()
        .clone();
    let estimate = published.value().unwrap();
    assert_eq!(estimate.main_amount, SwapAmount::Sell(ether("125")));
    assert_eq!(provider.price_calls(), 1);
}
