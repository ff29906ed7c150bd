use super::*;
use crate::model::{Identifier, Measurement};

fn validated(ms: Vec<Measurement>) -> Validated {
    Validated::new(ms)
}

fn m(data: &[Option<f64>], gene: &str, gene_type: &str, id: &str) -> Measurement {
    Measurement::new(data.to_vec(), Some(gene), Some(gene_type), Some(Identifier::from(id)))
}

#[test]
fn test_norms_are_housekeeping_means_per_sample() {
    let v = validated(vec![
        m(&[Some(18.0), Some(18.0), Some(18.0)], "ACTB", "HK", "1"),
        m(&[Some(17.0), Some(18.0), Some(19.0)], "ACTB", "HK", "2"),
        m(&[Some(20.0), Some(21.0), Some(22.0)], "HOXB", "target", "1"),
    ]);
    let norms = compute_housekeeping_norms(&v, &AssayProfile::default_v1()).unwrap();
    assert_eq!(norms.get("1"), Some(18.0));
    assert_eq!(norms.get("2"), Some(18.0));
    assert_eq!(norms.get("water"), Some(0.0));
    assert_eq!(norms.len(), 3);
}

#[test]
fn test_blank_norm_is_pinned_to_zero() {
    let v = validated(vec![m(&[Some(35.0), Some(36.0)], "ACTB", "HK", "water")]);
    let norms = compute_housekeeping_norms(&v, &AssayProfile::default_v1()).unwrap();
    assert_eq!(norms.get("water"), Some(0.0));
}

#[test]
fn test_elementwise_subtraction_keeps_absent() {
    let v = validated(vec![
        m(&[Some(18.0), None, Some(19.0)], "ACTB", "HK", "1"),
        m(&[Some(20.0), None, Some(22.0)], "HOXB", "target", "1"),
    ]);
    let out = run_stage3(&v, &AssayProfile::default_v1()).unwrap();
    assert_eq!(out.norms.get("1"), Some(18.5));

    let hoxb = &out.delta.measurements()[1];
    let old = &v.measurements()[1];
    for (new, old) in hoxb.data.iter().zip(&old.data) {
        match (new, old) {
            (Some(n), Some(o)) => assert_eq!(*n, o - 18.5),
            (None, None) => {}
            other => panic!("presence changed: {other:?}"),
        }
    }
    assert_eq!(hoxb.data, vec![Some(1.5), None, Some(3.5)]);
}

#[test]
fn test_wells_without_identifier_dropped() {
    let v = validated(vec![
        m(&[Some(18.0)], "ACTB", "HK", "1"),
        Measurement::new(vec![Some(30.0)], Some("HOXB"), Some("target"), None),
        m(&[Some(30.0)], "HOXB", "target", ""),
    ]);
    let out = run_stage3(&v, &AssayProfile::default_v1()).unwrap();
    assert_eq!(out.delta.measurements().len(), 1);
}

#[test]
fn test_missing_housekeeping_norm_is_fatal() {
    let v = validated(vec![
        m(&[Some(18.0)], "ACTB", "HK", "1"),
        m(&[Some(20.0)], "HOXB", "target", "3"),
    ]);
    match run_stage3(&v, &AssayProfile::default_v1()) {
        Err(QpcrError::MissingHousekeepingNorm { identifier }) => assert_eq!(identifier, "3"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_fully_excluded_housekeeping_group_is_fatal() {
    let v = validated(vec![m(&[None, None], "ACTB", "HK", "1")]);
    match compute_housekeeping_norms(&v, &AssayProfile::default_v1()) {
        Err(QpcrError::NoValidReplicates { stage, key }) => {
            assert_eq!(stage, "housekeeping");
            assert_eq!(key, "1");
        }
        other => panic!("unexpected {other:?}"),
    }
}
