//! Life shock tests — protection cap, shadow amplification, floors,
//! and deterministic selection through an injected random source.

use forge_core::{
    config::ForgeConfig,
    model::projected_corpus,
    rng::ScriptedRng,
    shock::{LifeShock, ShockCatalog, ShockRules},
    ForgeEngine,
};

fn shock(id: &str, damage: f64) -> LifeShock {
    LifeShock {
        id:          id.into(),
        icon:        "⚡".into(),
        label:       id.replace('_', " "),
        description: format!("{id} description"),
        insight:     format!("{id} insight"),
        damage,
    }
}

fn pinned_engine(session: &str, damage: f64) -> ForgeEngine {
    let catalog = ShockCatalog::new(vec![shock("pinned", damage)]).expect("catalog");
    ForgeEngine::with_source(
        session.to_string(),
        ForgeConfig::with_shocks(catalog),
        Box::new(ScriptedRng::constant(0)),
    )
    .expect("build engine")
}

#[test]
fn empty_corpus_takes_full_damage() {
    let rules = ShockRules::default();
    let out = rules.resolve(&shock("flat", 20.0), 0.0, 100.0, 100.0);

    assert_eq!(out.corpus_protection, 0.0);
    assert_eq!(out.future_damage, 20.0);
    assert_eq!(out.shadow_damage, 30.0);
    assert_eq!(out.resilience, 80.0);
    assert_eq!(out.shadow_resilience, 70.0);
}

#[test]
fn protection_caps_at_ninety_percent() {
    let rules = ShockRules::default();
    for corpus in [1_000_000.0, 2_500_000.0, 50_000_000.0] {
        assert_eq!(rules.corpus_protection(corpus), 0.9, "corpus {corpus}");
    }
    assert_eq!(rules.corpus_protection(250_000.0), 0.25);

    let out = rules.resolve(&shock("capped", 40.0), 10_000_000.0, 100.0, 100.0);
    assert!((out.future_damage - 4.0).abs() < 1e-12, "{}", out.future_damage);
    assert_eq!(out.shadow_damage, 60.0);
}

#[test]
fn scripted_source_selects_the_shock() {
    // Index 1 of the built-in catalog is the job loss shock.
    let mut engine = ForgeEngine::with_source(
        "scripted".into(),
        ForgeConfig::default(),
        Box::new(ScriptedRng::constant(1)),
    )
    .unwrap();

    let results = engine.run_turns(3).unwrap();
    let outcome = results[2].shock().expect("shock at month 3");

    assert_eq!(outcome.shock.id, "job_loss");
    assert_eq!(results[2].snapshot.last_shock.as_ref().map(|s| s.id.as_str()), Some("job_loss"));

    let corpus = projected_corpus(5_000.0, 3).unwrap();
    let protection = corpus / 1_000_000.0;
    let expected = 100.0 - 30.0 * (1.0 - protection);
    assert!((outcome.corpus_protection - protection).abs() < 1e-15);
    assert!((results[2].snapshot.resilience - expected).abs() < 1e-9);
    assert_eq!(results[2].snapshot.shadow_resilience, 100.0 - 45.0);
}

#[test]
fn shadow_falls_faster_than_future_self() {
    let mut engine = pinned_engine("shadow-gap", 10.0);
    let results = engine.run_turns(9).unwrap();

    let last = &results[8].snapshot;
    assert_eq!(last.shadow_resilience, 100.0 - 3.0 * 15.0);
    assert!(last.resilience > last.shadow_resilience);
    assert!(last.divergence_score > 0);
}

#[test]
fn resilience_never_drops_below_floors() {
    let mut engine = pinned_engine("floors", 40.0);

    for result in engine.run_turns(60).unwrap() {
        assert!(result.snapshot.resilience >= 5.0, "{}", result.snapshot.resilience);
        assert!(result.snapshot.shadow_resilience >= 0.0);
    }

    let view = engine.view();
    assert_eq!(view.shadow_resilience, 0.0);
    assert!(view.resilience >= 5.0);
}

#[test]
fn shocks_without_recovery_keep_last_shock() {
    let mut engine = pinned_engine("last-shock", 5.0);
    engine.run_turns(4).unwrap();

    let view = engine.view();
    assert_eq!(view.last_shock.as_ref().map(|s| s.id.as_str()), Some("pinned"));
    // Month 4 has no shock, and nothing heals month 3's damage.
    assert!(view.resilience < 100.0);
}
