//! Scenario tests driving the full decode → lookup → score pipeline.

use std::sync::Arc;

use ticketcheck::config::{AppConfig, EngineConfig};
use ticketcheck::draws::StaticResults;
use ticketcheck::engine::{BatchEvaluator, BatchReport};
use ticketcheck::normalize::decode_payload;
use ticketcheck::types::{GameType, STATUS_NO_WIN, STATUS_UNSUPPORTED};

use crate::mock_lookup::MockLookup;

async fn run(lookup: Arc<MockLookup>, config: EngineConfig, payload: &str) -> BatchReport {
    let tickets = decode_payload(payload).expect("payload should decode");
    BatchEvaluator::new(lookup, config).evaluate(tickets).await
}

#[tokio::test]
async fn test_scenario_double_color_jackpot() {
    let payload = r#"```json
[{"type":"双色球","issue":"2025107","tickets":[{"red":[2,11,15,21,28,33],"blue":[7]}]}]
```"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.game, GameType::DoubleColor);
    assert_eq!(result.details[0].rank, 1);
    assert_eq!(result.total_payout, 5_000_000);
}

#[tokio::test]
async fn test_scenario_double_color_blue_miss() {
    let payload = r#"[{"type":"双色球","issue":"2025107","tickets":[{"red":["02","11","15","21","28","33"],"blue":["06"]}]}]"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.details[0].rank, 2);
    assert_eq!(result.total_payout, 100_000);
}

#[tokio::test]
async fn test_scenario_lotto_jackpot() {
    let payload = r#"{"type":"大乐透","issue":"25001","tickets":[{"red":[1,2,3,4,5],"blue":[1,2]}]}"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.game, GameType::Lotto);
    assert_eq!(result.details[0].rank, 1);
    assert_eq!(result.total_payout, 10_000_000);
}

#[tokio::test]
async fn test_scenario_permutation5_order_matters() {
    let payload = r#"[{"type":"排列5","issue":"25250","tickets":[
        {"red":["1","2","3","4","5"]},
        {"red":["5","4","3","2","1"]}
    ]}]"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.details[0].payout, 100_000);
    assert_eq!(result.details[1].payout, 0);
    assert_eq!(result.details[1].status, STATUS_NO_WIN);
    assert_eq!(result.total_payout, 100_000);
}

#[tokio::test]
async fn test_scenario_unsupported_game() {
    let lookup = Arc::new(MockLookup::new());
    let payload = r#"[{"type":"Scratch-off","issue":"1","tickets":[{"red":["01"]}]}]"#;
    let report = run(lookup.clone(), EngineConfig::default(), payload).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.game, GameType::Unsupported);
    assert_eq!(result.total_payout, 0);
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].row_index, 0);
    assert_eq!(result.details[0].status, STATUS_UNSUPPORTED);
    assert_eq!(lookup.calls(), 0);
}

#[tokio::test]
async fn test_scenario_seven_red_expansion() {
    // Six of the seven reds hit. Of the 7 six-number combinations, one
    // matches all six and six match five. With blue 07 hit and blue 16
    // missed: 5,000,000 + 6 * 3,000 + 100,000 + 6 * 200.
    let payload = r#"[{"type":"双色球","issue":"2025107","tickets":[
        {"red":["02","11","15","21","28","33","01"],"blue":["07","16"]}
    ]}]"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.details[0].rank, 1);
    assert_eq!(result.total_payout, 5_000_000 + 18_000 + 100_000 + 1_200);
}

#[tokio::test]
async fn test_mixed_batch_keeps_order_and_isolates_failures() {
    let config = EngineConfig {
        max_red_tokens: 8,
        ..EngineConfig::default()
    };
    let payload = r#"[
        {"type":"双色球","issue":"2025107","tickets":[{"red":[1,2,3,4,5,6,8,9,10],"blue":[7]}]},
        {"type":"大乐透","issue":"25001","tickets":[{"red":[1,2,3,4,5],"blue":[1,2],"multiplier":3}]},
        {"type":"排列5","issue":"25250","tickets":[{"red":["1","2","3","4","5"]}]}
    ]"#;
    let report = run(Arc::new(MockLookup::new()), config, payload).await;
    assert_eq!(report.tickets.len(), 3);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert!(report.tickets[0].error.as_deref().unwrap().contains("exceeds limit of 8"));
    assert_eq!(report.tickets[1].total_payout(), 30_000_000);
    assert_eq!(report.tickets[2].total_payout(), 100_000);
    assert_eq!(report.total_payout, Some(30_100_000));
}

#[tokio::test]
async fn test_unknown_issue_falls_back_to_placeholder() {
    let payload = r#"[{"type":"大乐透","issue":"99999","tickets":[{"red":[1,2,3,4,5],"blue":[1,2]}]}]"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    assert_eq!(report.failed, 0);
    assert_eq!(report.tickets[0].total_payout(), 0);
}

#[tokio::test]
async fn test_unknown_issue_fails_without_fallback() {
    let config = EngineConfig {
        fallback_to_placeholder: false,
        ..EngineConfig::default()
    };
    let payload = r#"[{"type":"大乐透","issue":"99999","tickets":[{"red":[1,2,3,4,5],"blue":[1,2]}]}]"#;
    let report = run(Arc::new(MockLookup::new()), config, payload).await;
    assert_eq!(report.failed, 1);
    assert_eq!(
        report.tickets[0].error.as_deref(),
        Some("No winning numbers for Lotto issue 99999")
    );
}

#[tokio::test]
async fn test_lookup_outage_fails_every_supported_ticket() {
    let lookup = Arc::new(MockLookup::new());
    lookup.set_error("results service unavailable");
    let payload = r#"[
        {"type":"双色球","issue":"2025107","tickets":[{"red":[2,11,15,21,28,33],"blue":[7]}]},
        {"type":"Keno","issue":"1","tickets":[]}
    ]"#;
    let report = run(lookup.clone(), EngineConfig::default(), payload).await;
    assert_eq!(lookup.calls(), 1);
    assert_eq!(report.failed, 1);
    assert!(report.tickets[0].error.as_deref().unwrap().contains("results service unavailable"));
    assert!(report.tickets[1].is_ok());
}

#[tokio::test]
async fn test_strict_config_rejects_short_row() {
    let cfg = AppConfig::parse("[engine]\nstrict_validation = true\n").unwrap();
    let payload = r#"[{"type":"排列5","issue":"25250","tickets":[{"red":["1","2","3"]}]}]"#;
    let report = run(Arc::new(MockLookup::new()), cfg.engine, payload).await;
    assert_eq!(report.failed, 1);
    assert!(report.tickets[0].error.as_deref().unwrap().starts_with("Invalid row 1"));
}

#[tokio::test]
async fn test_configured_draws_drive_static_lookup() {
    let cfg = AppConfig::parse(
        r#"
        [[draws]]
        game = "Lotto"
        issue = "25002"
        red = ["03", "09", "14", "22", "35"]
        blue = ["04", "11"]
        drawn_on = "2025-01-04"
        "#,
    )
    .unwrap();
    let lookup = StaticResults::from_config(&cfg.draws).unwrap();
    let tickets = decode_payload(
        r#"[{"type":"大乐透","issue":"25002","tickets":[{"red":[3,9,14,22,35],"blue":[4,12]}]}]"#,
    )
    .unwrap();

    let report = BatchEvaluator::new(Arc::new(lookup), cfg.engine).evaluate(tickets).await;
    let result = report.tickets[0].result.as_ref().unwrap();
    assert_eq!(result.details[0].rank, 2);
}

#[tokio::test]
async fn test_null_blue_permutation5_scores() {
    let payload = r#"[{"type":"排列5","issue":"25250","tickets":[{"red":["1","2","3","4","5"],"blue":null}]}]"#;
    let report = run(Arc::new(MockLookup::new()), EngineConfig::default(), payload).await;
    assert_eq!(report.failed, 0);
    assert_eq!(report.total_payout, Some(100_000));
}
