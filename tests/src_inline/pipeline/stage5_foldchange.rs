use super::*;
use crate::model::Measurement;

fn m(data: &[Option<f64>], gene: &str, id: &str) -> Measurement {
    Measurement::new(data.to_vec(), Some(gene), Some("target"), Some(Identifier::from(id)))
}

#[test]
fn test_fold_change_values() {
    assert_eq!(fold_change(Some(0.0)), Some(1.0));
    assert_eq!(fold_change(Some(1.0)), Some(0.5));
    assert_eq!(fold_change(Some(-2.0)), Some(4.0));
    assert_eq!(fold_change(None), None);
    assert_eq!(fold_changes(&[Some(0.0), None]), vec![Some(1.0), None]);
}

#[test]
fn test_result_rows_ordered_with_reference_first() {
    let rows = vec![
        m(&[Some(1.0)], "HOXB", "10"),
        m(&[Some(0.0)], "HOXB", "2"),
        m(&[Some(2.0)], "HOXB", "pluri"),
    ];
    let delta = Delta::new(rows.clone());
    let dd = DeltaDelta::new(rows);
    let table = assemble_results(&delta, &dd, &AssayProfile::default_v1()).unwrap();

    let order: Vec<String> = table.rows().map(|r| r.identifier_key()).collect();
    assert_eq!(order, vec!["pluri", "2", "10"]);

    let keys: Vec<String> = order
        .iter()
        .map(|id| result_sort_key(id, &AssayProfile::default_v1()))
        .collect();
    assert_eq!(keys, vec!["", "00002", "00010"]);
}

#[test]
fn test_rows_join_both_generations() {
    let delta = Delta::new(vec![
        m(&[Some(2.0), None, Some(4.0)], "HOXB", "1"),
        m(&[Some(1.0)], "ACTB", "1"),
    ]);
    let dd = DeltaDelta::new(vec![
        m(&[Some(1.0), None, Some(0.0)], "HOXB", "1"),
        m(&[Some(0.0)], "ACTB", "1"),
    ]);
    let table = assemble_results(&delta, &dd, &AssayProfile::default_v1()).unwrap();
    assert_eq!(table.genes.len(), 2);
    assert_eq!(table.genes[0].gene_name.as_deref(), Some("HOXB"));

    let hoxb = &table.genes[0].rows[0];
    assert_eq!(hoxb.delta, vec![Some(0.25), None, Some(0.0625)]);
    assert_eq!(hoxb.delta_delta, vec![Some(0.5), None, Some(1.0)]);
    assert_eq!(table.max_replicates(), 3);
}

#[test]
fn test_inconsistent_generations_are_fatal() {
    let delta = Delta::new(vec![m(&[Some(1.0)], "HOXB", "1")]);
    let dd = DeltaDelta::new(vec![m(&[Some(1.0)], "HOXB", "2")]);
    match assemble_results(&delta, &dd, &AssayProfile::default_v1()) {
        Err(QpcrError::InconsistentSnapshots { gene, identifier }) => {
            assert_eq!(gene, "HOXB");
            assert_eq!(identifier, "2");
        }
        other => panic!("unexpected {other:?}"),
    }

    let missing_dd = DeltaDelta::new(vec![]);
    assert!(matches!(
        assemble_results(&delta, &missing_dd, &AssayProfile::default_v1()),
        Err(QpcrError::InconsistentSnapshots { .. })
    ));

    let other_gene = DeltaDelta::new(vec![m(&[Some(1.0)], "SOX2", "1")]);
    assert!(matches!(
        assemble_results(&delta, &other_gene, &AssayProfile::default_v1()),
        Err(QpcrError::InconsistentSnapshots { .. })
    ));
}

#[test]
fn test_gene_order_applied() {
    let rows = vec![
        m(&[Some(0.0)], "ACTB", "1"),
        m(&[Some(0.0)], "SOX2", "1"),
        m(&[Some(0.0)], "HOXB", "1"),
    ];
    let table = assemble_results(
        &Delta::new(rows.clone()),
        &DeltaDelta::new(rows),
        &AssayProfile::default_v1(),
    )
    .unwrap();

    let mut diag = Diagnostics::new();
    let ordered = apply_gene_order(table, &["HOXB".to_string(), "ACTB".to_string()], &mut diag);
    let names: Vec<&str> = ordered
        .genes
        .iter()
        .map(|g| g.gene_name.as_deref().unwrap())
        .collect();
    assert_eq!(names, vec!["HOXB", "ACTB", "SOX2"]);
    assert_eq!(
        diag.warnings(),
        &[Warning::UngroupedGene {
            gene: "SOX2".to_string()
        }]
    );
}

#[test]
fn test_replicate_stats() {
    let stats = replicate_stats(&[Some(1.0), None, Some(3.0)]);
    assert_eq!(stats.n, 2);
    assert_eq!(stats.mean, Some(2.0));
    assert_eq!(stats.std_dev, Some(1.0));
    assert_eq!(stats.lower(), Some(1.0));
    assert_eq!(stats.upper(), Some(3.0));

    let empty = replicate_stats(&[None, None]);
    assert_eq!(empty.n, 0);
    assert_eq!(empty.mean, None);
    assert_eq!(empty.std_dev, None);
    assert_eq!(empty.upper(), None);
}

#[test]
fn test_summaries_follow_table_rows() {
    let delta = Delta::new(vec![m(&[Some(0.0), Some(1.0)], "HOXB", "1")]);
    let dd = DeltaDelta::new(vec![m(&[None, None], "HOXB", "1")]);
    let table = assemble_results(&delta, &dd, &AssayProfile::default_v1()).unwrap();
    let summaries = summarize(&table);
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].sample, "1");
    assert_eq!(summaries[0].delta.mean, Some(0.75));
    assert_eq!(summaries[0].delta.std_dev, Some(0.25));
    assert_eq!(summaries[0].delta_delta.mean, None);
}
