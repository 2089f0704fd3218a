//! Player action tests — protection tokens, allocation, contribution,
//! inflation bonus and read-only queries.

use forge_core::{
    allocation::AllocationProfile, config::ForgeConfig, model::projected_corpus, ForgeEngine,
    ForgeError,
};

fn build(session: &str) -> ForgeEngine {
    ForgeEngine::new(session.to_string(), 0xF0_F0, ForgeConfig::default()).expect("build engine")
}

#[test]
fn token_extends_streak() {
    let mut engine = build("token-streak");
    engine.run_turns(2).unwrap();

    let view = engine.use_protection_token().unwrap();
    assert_eq!(view.protection_tokens, 1);
    assert_eq!(view.streak_count, 3);
    assert_eq!(view.month, 2, "tokens do not advance time");
}

#[test]
fn exhausted_tokens_leave_state_unchanged() {
    let mut engine = build("token-exhaust");
    engine.use_protection_token().unwrap();
    engine.use_protection_token().unwrap();

    let before = engine.view();
    let journal_len = engine.journal().len();

    let err = engine.use_protection_token().unwrap_err();
    assert!(matches!(err, ForgeError::NoTokensAvailable));
    assert_eq!(engine.view(), before);
    assert_eq!(engine.journal().len(), journal_len);
}

#[test]
fn tokens_are_never_replenished() {
    let mut engine = build("token-refill");
    engine.use_protection_token().unwrap();
    engine.use_protection_token().unwrap();

    engine.run_turns(30).unwrap();
    assert_eq!(engine.view().protection_tokens, 0);
}

#[test]
fn valid_allocation_updates_expected_return() {
    let mut engine = build("alloc-ok");
    let view = engine.set_allocation(40, 30, 30).unwrap();

    assert_eq!(view.allocation, AllocationProfile::new(40, 30, 30));
    assert!((view.expected_return - 0.0975).abs() < 1e-12, "{}", view.expected_return);
    assert!((view.dashboard.expected_return - 0.0975).abs() < 1e-12);
}

#[test]
fn allocation_must_sum_to_hundred() {
    let mut engine = build("alloc-sum");
    let before = engine.view();

    let err = engine.set_allocation(40, 30, 29).unwrap_err();
    assert!(
        matches!(err, ForgeError::InvalidAllocation { equity: 40, corporate: 30, govt: 29, .. }),
        "{err}"
    );
    assert_eq!(engine.view(), before);
}

#[test]
fn allocation_sleeves_bounded() {
    let mut engine = build("alloc-bounds");
    assert!(engine.set_allocation(90, 5, 5).is_err());
    assert!(engine.set_allocation(4, 48, 48).is_err());
    assert!(engine.set_allocation(85, 10, 5).is_ok());
}

#[test]
fn presets_apply_by_name() {
    let mut engine = build("presets");

    let view = engine.apply_preset("aggressive").unwrap();
    assert_eq!(view.allocation, AllocationProfile::new(75, 15, 10));

    let err = engine.apply_preset("yolo").unwrap_err();
    assert!(matches!(err, ForgeError::InvalidArgument { what: "preset", .. }));
}

#[test]
fn contribution_must_be_positive() {
    let mut engine = build("contribution");
    for bad in [0.0, -100.0, f64::NAN] {
        assert!(engine.set_monthly_contribution(bad).is_err(), "{bad} accepted");
    }
    assert_eq!(engine.view().monthly_contribution, 5_000.0);

    let view = engine.set_monthly_contribution(12_500.0).unwrap();
    assert_eq!(view.monthly_contribution, 12_500.0);
    assert_eq!(view.dashboard.monthly_contribution, 12_500.0);
}

#[test]
fn inflation_bonus_is_superseded_next_turn() {
    let mut engine = build("inflation");
    engine.run_turns(2).unwrap();

    let corpus = engine.view().total_corpus;
    let view = engine.claim_inflation_bonus(12).unwrap();
    assert_eq!(view.total_corpus, corpus + 12_000.0);
    assert_eq!(view.minigame_score, 12);

    let next = engine.advance_turn().unwrap();
    assert_eq!(next.snapshot.total_corpus, projected_corpus(5_000.0, 3).unwrap());
    assert_eq!(next.snapshot.minigame_score, 12);
}

#[test]
fn queries_do_not_mutate_state() {
    let mut engine = build("queries");
    engine.run_turns(4).unwrap();
    let before = engine.view();

    let projection = engine.projection(8_000.0, 120).unwrap();
    assert_eq!(projection, projected_corpus(8_000.0, 120).unwrap());
    assert_eq!(engine.retirement_age(5_000.0).unwrap(), 60);
    assert!(engine.retirement_age(20_000.0).unwrap() < 60);
    assert!(engine.projection(-1.0, 12).is_err());

    assert_eq!(engine.view(), before);
}

#[test]
fn dashboard_splits_tiers_and_tax() {
    let mut engine = build("dashboard");
    engine.run_turns(10).unwrap();

    let view = engine.view();
    let d = &view.dashboard;
    assert!((d.tier1 - view.total_corpus * 0.8).abs() < 1e-9);
    assert!((d.tier1 + d.tier2 - view.total_corpus).abs() < 1e-6);
    assert!((d.tax_saved - 50_000.0 * 0.3).abs() < 1e-9);
    assert_eq!(d.projected_at_retirement, projected_corpus(5_000.0, 360).unwrap());
    assert_eq!(view.projected_retirement_age, 60);
}
