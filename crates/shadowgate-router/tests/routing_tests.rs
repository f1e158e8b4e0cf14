// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for bucketing and routing.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use shadowgate_router::{
    canonical_rows, compute_bucket, decide_routing, decide_routing_str, Alias, Mode, Row,
};

fn rows(value: Value) -> Vec<Row> {
    serde_json::from_value(value).expect("rows fixture")
}

/// Request body used by the service smoke test.
fn smoke_rows() -> Vec<Row> {
    let body: Value = serde_json::from_str(
        r#"{"rows": [{
            "mean radius": 14.0, "mean texture": 20.0, "mean perimeter": 90.0,
            "mean area": 600.0, "mean smoothness": 0.10, "mean compactness": 0.13,
            "mean concavity": 0.10, "mean concave points": 0.05, "mean symmetry": 0.18,
            "mean fractal dimension": 0.06, "radius error": 0.30, "texture error": 1.10,
            "perimeter error": 2.50, "area error": 30.0, "smoothness error": 0.006,
            "compactness error": 0.020, "concavity error": 0.030,
            "concave points error": 0.010, "symmetry error": 0.020,
            "fractal dimension error": 0.003, "worst radius": 16.0, "worst texture": 26.0,
            "worst perimeter": 105.0, "worst area": 800.0, "worst smoothness": 0.14,
            "worst compactness": 0.30, "worst concavity": 0.35, "worst concave points": 0.12,
            "worst symmetry": 0.28, "worst fractal dimension": 0.08
        }]}"#,
    )
    .expect("smoke payload parses");
    rows(body["rows"].clone())
}

// ---- Bucketing ----

#[test]
fn smoke_payload_bucket_matches_reference_encoder() {
    assert_eq!(compute_bucket(&smoke_rows()).get(), 38);
}

#[test]
fn smoke_payload_canonical_form() {
    let canonical = canonical_rows(&smoke_rows());
    assert!(canonical.starts_with(r#"[{"area error":30.0,"compactness error":0.02,"#));
    assert!(canonical.contains(r#""mean smoothness":0.1,"#));
    assert!(canonical.contains(r#""smoothness error":0.006,"#));
    assert!(canonical.ends_with(r#""worst texture":26.0}]"#));
}

#[test]
fn mixed_row_canonical_snapshot() {
    let r = rows(json!([
        {"zeta": "Ω", "alpha": -3, "beta": 2.0},
        {},
        {"gamma": [1, 2.5, null], "delta": {"y": true, "x": 1e-7}}
    ]));
    insta::assert_snapshot!(
        canonical_rows(&r),
        @r#"[{"alpha":-3,"beta":2.0,"zeta":"\u03a9"},{},{"delta":{"x":1e-07,"y":true},"gamma":[1,2.5,null]}]"#
    );
}

#[test]
fn parsing_order_does_not_change_bucket() {
    let a: Vec<Row> = serde_json::from_str(r#"[{"x": 1.5, "y": "a", "z": 3}]"#).unwrap();
    let b: Vec<Row> = serde_json::from_str(r#"[{"z": 3, "x": 1.5, "y": "a"}]"#).unwrap();
    assert_eq!(compute_bucket(&a), compute_bucket(&b));
}

#[test]
fn row_order_matters() {
    let a = rows(json!([{"x": 1}, {"x": 2}]));
    let b = rows(json!([{"x": 2}, {"x": 1}]));
    assert_ne!(canonical_rows(&a), canonical_rows(&b));
}

#[test]
fn buckets_spread_across_the_range() {
    let mut seen = [false; 100];
    for i in 0..2_000 {
        let r = rows(json!([{ "request": i }]));
        seen[usize::from(compute_bucket(&r).get())] = true;
    }
    let covered = seen.iter().filter(|s| **s).count();
    assert!(covered > 90, "only {covered} buckets hit");
}

// ---- Routing scenarios ----

#[test]
fn concrete_scenarios() {
    let cases = [
        ("prod", 10, 0, Alias::Prod, false),
        ("canary", 10, 9, Alias::Candidate, true),
        ("canary", 10, 10, Alias::Prod, true),
        ("canary", 100, 99, Alias::Candidate, true),
        ("canary", 0, 0, Alias::Prod, true),
        ("shadow", 0, 50, Alias::Prod, true),
    ];
    for (mode, pct, bucket, chosen, run_shadow) in cases {
        let d = decide_routing_str(mode, pct, bucket).unwrap();
        assert_eq!(d.chosen, chosen, "{mode} pct={pct} bucket={bucket}");
        assert_eq!(d.run_shadow, run_shadow, "{mode} pct={pct} bucket={bucket}");
    }
}

#[test]
fn invalid_buckets_fail() {
    assert!(decide_routing(Mode::Canary, 10, -1).unwrap_err().is_invalid_argument());
    assert!(decide_routing(Mode::Canary, 10, 100).unwrap_err().is_invalid_argument());
}

#[test]
fn bucketed_request_routes_end_to_end() {
    let bucket = i64::from(compute_bucket(&smoke_rows()).get());
    assert_eq!(decide_routing(Mode::Canary, 38, bucket).unwrap().chosen, Alias::Prod);
    assert_eq!(decide_routing(Mode::Canary, 39, bucket).unwrap().chosen, Alias::Candidate);
}

#[test]
fn decisions_are_identical_across_threads() {
    let expected = decide_routing(Mode::Canary, 50, 42).unwrap();
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| decide_routing(Mode::Canary, 50, 42).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ---- Properties ----

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        (-1e12f64..1e12).prop_map(Value::from),
        "[a-zA-Z0-9 _éΩ]{0,12}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn row_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map("[a-z ]{1,10}", scalar(), 0..8)
        .prop_map(|m| m.into_iter().collect())
}

fn build_row(entries: &[(String, Value)]) -> Row {
    let mut row = Map::new();
    for (k, v) in entries {
        row.insert(k.clone(), v.clone());
    }
    row
}

proptest! {
    #[test]
    fn bucket_is_deterministic_and_in_range(
        entries in prop::collection::vec(row_entries(), 0..4)
    ) {
        let rows: Vec<Row> = entries.iter().map(|e| build_row(e)).collect();
        let first = compute_bucket(&rows);
        prop_assert_eq!(first, compute_bucket(&rows));
        prop_assert!(first.get() <= 99);
    }

    #[test]
    fn bucket_ignores_insertion_order(entries in row_entries()) {
        let forward = build_row(&entries);
        let reversed: Vec<_> = entries.iter().rev().cloned().collect();
        let backward = build_row(&reversed);
        prop_assert_eq!(compute_bucket(&[forward]), compute_bucket(&[backward]));
    }

    #[test]
    fn canonical_form_reparses_to_same_content(entries in row_entries()) {
        let row = build_row(&entries);
        let canonical = canonical_rows(std::slice::from_ref(&row));
        let reparsed: Vec<Row> = serde_json::from_str(&canonical).unwrap();
        prop_assert_eq!(reparsed, vec![row]);
    }

    #[test]
    fn pinned_modes_ignore_pct_and_bucket(pct in any::<i64>(), bucket in 0i64..100) {
        let prod = decide_routing(Mode::Prod, pct, bucket).unwrap();
        prop_assert_eq!((prod.chosen, prod.run_shadow), (Alias::Prod, false));

        let candidate = decide_routing(Mode::Candidate, pct, bucket).unwrap();
        prop_assert_eq!((candidate.chosen, candidate.run_shadow), (Alias::Candidate, false));

        let shadow = decide_routing(Mode::Shadow, pct, bucket).unwrap();
        prop_assert_eq!((shadow.chosen, shadow.run_shadow), (Alias::Prod, true));
    }

    #[test]
    fn canary_law(pct in -500i64..500, bucket in 0i64..100) {
        let d = decide_routing(Mode::Canary, pct, bucket).unwrap();
        let expected = if bucket < pct.clamp(0, 100) { Alias::Candidate } else { Alias::Prod };
        prop_assert_eq!(d.chosen, expected);
        prop_assert!(d.run_shadow);
    }

    #[test]
    fn raising_pct_never_moves_candidate_traffic_back(
        low in 0i64..=100, delta in 0i64..=100, bucket in 0i64..100
    ) {
        let high = (low + delta).min(100);
        let before = decide_routing(Mode::Canary, low, bucket).unwrap();
        let after = decide_routing(Mode::Canary, high, bucket).unwrap();
        if before.chosen == Alias::Candidate {
            prop_assert_eq!(after.chosen, Alias::Candidate);
        }
    }

    #[test]
    fn out_of_range_buckets_always_fail(
        bucket in prop_oneof![i64::MIN..0i64, 100i64..i64::MAX],
        pct in any::<i64>()
    ) {
        for mode in Mode::ALL {
            prop_assert!(decide_routing(mode, pct, bucket).unwrap_err().is_invalid_argument());
        }
    }
}
