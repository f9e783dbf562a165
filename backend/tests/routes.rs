mod common;

use axum::body::to_bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use common::*;
use credit_backend::error::ApiError;
use credit_backend::models::{
    AmountRequest, EstimateQuery, PaymentIntentRequest, PreAuthRequest, ScannedText,
};
use credit_backend::routes::{account, lending, tx, AppState};
use serde_json::Value;

fn state(chain: MockChain) -> AppState<MockChain> {
    AppState::new(config(), chain)
}

async fn body_of(err: ApiError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn account_rejects_malformed_owner() {
    let err = account::get_account(State(state(MockChain::new())), Path("0x123".to_string()))
        .await
        .unwrap_err();
    let (status, body) = body_of(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid address: 0x123");
}

#[tokio::test]
async fn missing_credit_line_is_not_found() {
    let err = account::get_credit(State(state(MockChain::new())), Path(addr('a')))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let chain = MockChain::new().with_credit(10_000_000, 4_000_000, true);
    let Json(credit) = account::get_credit(State(state(chain)), Path(addr('a')))
        .await
        .unwrap();
    assert_eq!(credit.available_credit, 6_000_000);
}

#[tokio::test]
async fn node_outage_is_a_bad_gateway_not_a_missing_record() {
    for status in [503, 429] {
        let chain = MockChain::new().with_status("credit_manager", "get_credit_info", status);
        let err = account::get_credit(State(state(chain)), Path(addr('a')))
            .await
            .unwrap_err();
        let (code, body) = body_of(err).await;
        assert_eq!(code, StatusCode::BAD_GATEWAY);
        assert_ne!(body["error"], "no credit line for this account");
    }

    let chain = MockChain::new().with_abort("credit_manager", "get_credit_info", "ENOT_FOUND");
    let err = account::get_credit(State(state(chain)), Path(addr('a')))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn pay_intent_reports_the_rejection_reason() {
    let chain = MockChain::new()
        .with_liquidity(1_000_000)
        .with_credit(100_000_000, 0, true);
    let req = PaymentIntentRequest {
        sender: addr('a'),
        recipient: addr('b'),
        amount: 5.0,
    };

    let err = tx::tx_pay(State(state(chain)), Json(req)).await.unwrap_err();
    let (status, body) = body_of(err).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Not enough liquidity in the pool. Try a smaller amount."
    );
}

#[tokio::test]
async fn pay_intent_returns_the_payload() {
    let chain = MockChain::new()
        .with_liquidity(100_000_000)
        .with_credit(100_000_000, 0, true);
    let req = PaymentIntentRequest {
        sender: addr('a'),
        recipient: addr('b'),
        amount: 5.0,
    };

    let Json(intent) = tx::tx_pay(State(state(chain)), Json(req)).await.unwrap();
    assert!(intent.payload.function.ends_with("::credit_manager::borrow_and_pay"));
    assert_eq!(intent.payload.arguments[2], "5000000");
}

#[tokio::test]
async fn amount_intents_validate_input() {
    let st = state(MockChain::new());

    let err = tx::tx_deposit(
        State(st.clone()),
        Json(AmountRequest { owner: addr('a'), amount: 0.0 }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let Json(intent) = tx::tx_repay(
        State(st),
        Json(AmountRequest { owner: addr('a'), amount: 12.5 }),
    )
    .await
    .unwrap();
    assert!(intent.payload.function.ends_with("::credit_manager::repay"));
    assert_eq!(intent.payload.arguments[1], "12500000");
}

#[tokio::test]
async fn estimate_requires_a_known_lock_period() {
    let err = lending::get_estimate(Query(EstimateQuery {
        amount: 1000.0,
        months: 2,
        base_apy: None,
    }))
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let Json(estimate) = lending::get_estimate(Query(EstimateQuery {
        amount: 1000.0,
        months: 12,
        base_apy: None,
    }))
    .await
    .unwrap();
    assert_eq!(estimate.effective_apy, 25.0);
    assert_eq!(estimate.period, "12 months");
}

#[tokio::test]
async fn scanned_text_is_parsed() {
    let Json(request) = tx::parse_payment_request(Json(ScannedText {
        text: format!("{}:19.99:Kiosk", addr('c')),
    }))
    .await
    .unwrap();
    assert_eq!(request.amount_usdc(), Some(19.99));

    let err = tx::parse_payment_request(Json(ScannedText { text: "nope".into() }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn preauth_intent_requires_a_duration() {
    let req = PreAuthRequest {
        owner: addr('a'),
        total_limit: 100.0,
        per_tx_limit: 10.0,
        duration_secs: 0,
    };
    let err = tx::tx_preauth(State(state(MockChain::new())), Json(req))
        .await
        .unwrap_err();
    let (status, body) = body_of(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "duration must be positive");
}
