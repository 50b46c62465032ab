use errview_engine::{
    GroupKey, StepTable, TableMode, dense_step_table, global_pivot, global_view, group_errors,
    leaf_entries, sparse_step_table, step_table, workflow_ids, workflow_view, workflows_matching,
};
use errview_index::{ErrorStore, RecordFilter};
use errview_sources::{ErrorCounts, Explanations};
use errview_types::{Dimension, SiteReadinessMap};

const WORKED_EXAMPLE: &str = r#"{
    "/A/Step1": {"8020": {"T2_US_X": 5}},
    "/A/Step2": {"8020": {"T2_US_X": 3}}
}"#;

const MIXED: &str = r#"{
    "/A/Step1": {"8020": {"T2_US_X": 5, "T1_DE_Y": 0}, "134": {"T1_DE_Y": 2}},
    "/A/Step2": {"8020": {"T2_US_X": 3}, "Unknown": {"T3_FR_Z": 1}},
    "/B/Merge": {"134": {"T1_DE_Y": 4, "T2_US_X": 6}, "50664": {"T3_FR_Z": 9}}
}"#;

fn store_from(json: &str) -> ErrorStore {
    let counts = ErrorCounts::from_slice("test", json.as_bytes()).unwrap();
    let mut store = ErrorStore::open_in_memory().unwrap();
    store.insert_all(&counts.records()).unwrap();
    store.rebuild_indexes().unwrap();
    store
}

#[test]
fn test_worked_example() {
    let store = store_from(WORKED_EXAMPLE);

    assert_eq!(workflow_ids(&store.values().steps), vec!["A"]);

    let table = dense_step_table(&store, "/A/Step1", None).unwrap();
    assert_eq!(table.errorcodes, vec!["8020"]);
    assert_eq!(table.sites, vec!["T2_US_X"]);
    assert_eq!(table.rows, vec![vec![5]]);

    let pivot = global_pivot(&store, Dimension::ErrorCode).unwrap();
    assert_eq!(pivot.cell("/A/Step1", "T2_US_X"), Some(&[5][..]));
}

#[test]
fn test_dense_table_sums_to_step_records() {
    let store = store_from(MIXED);

    for step in &store.values().steps {
        let table = dense_step_table(&store, step, None).unwrap();
        let expected: u64 = store.step_records(step).unwrap().iter().map(|r| r.count).sum();
        assert_eq!(table.total(), expected, "step {}", step);
        assert_eq!(table.rows.len(), store.values().errorcodes.len());
        assert!(table.rows.iter().all(|row| row.len() == store.values().sites.len()));
    }
}

#[test]
fn test_dense_and_sparse_agree_on_non_zero_cells() {
    let store = store_from(MIXED);

    for step in &store.values().steps {
        let dense = dense_step_table(&store, step, None).unwrap();
        let sparse = sparse_step_table(&store, step, None).unwrap();
        assert_eq!(dense.non_zero(), sparse.cells, "step {}", step);
    }
}

#[test]
fn test_pivot_totals_match_grand_total() {
    let store = store_from(MIXED);
    let grand = store.total_errors().unwrap();

    for split in Dimension::ALL {
        let pivot = global_pivot(&store, split).unwrap();
        assert_eq!(pivot.row_totals.iter().sum::<u64>(), grand, "split {}", split);
        assert_eq!(pivot.col_totals.iter().sum::<u64>(), grand, "split {}", split);
        assert!(pivot.cells.iter().flatten().flatten().all(|count| *count > 0));
    }
}

#[test]
fn test_pivot_slices_follow_split_order() {
    let store = store_from(MIXED);

    let by_step = global_pivot(&store, Dimension::Step).unwrap();
    assert_eq!(by_step.rows, vec!["134", "8020", "50664", "Unknown"]);
    assert_eq!(by_step.cell("134", "T1_DE_Y"), Some(&[2, 4][..]));

    let by_site = global_pivot(&store, Dimension::Site).unwrap();
    assert_eq!(by_site.cell("/B/Merge", "134"), Some(&[4, 6][..]));
    assert_eq!(
        by_site.title("/B/Merge", "134"),
        Some("Total Errors: 10\ncode: 134\nsite T1_DE_Y: 4\nsite T2_US_X: 6")
    );
}

#[test]
fn test_sparse_mode_through_step_table() {
    let store = store_from(MIXED);
    let table = step_table(&store, "/A/Step1", TableMode::Sparse, None).unwrap();

    let StepTable::Sparse(sparse) = table else {
        panic!("expected a sparse table");
    };
    assert_eq!(sparse.cells.len(), 2);
    assert!(!sparse.cells["8020"].contains_key("T1_DE_Y"));
}

#[test]
fn test_readiness_restricts_site_axis() {
    let mut store = store_from(MIXED);
    let mut readiness = SiteReadinessMap::new();
    readiness.insert("T2_US_X".to_string(), "green".to_string());
    readiness.insert("T1_DE_Y".to_string(), "yellow".to_string());
    readiness.insert("T3_FR_Z".to_string(), "red".to_string());
    store.set_readiness(&readiness).unwrap();

    let classes = vec!["green".to_string(), "yellow".to_string()];
    let table = dense_step_table(&store, "/B/Merge", Some(&classes)).unwrap();
    assert_eq!(table.sites, vec!["T1_DE_Y", "T2_US_X"]);
    assert_eq!(table.total(), 10);

    let sparse = sparse_step_table(&store, "/B/Merge", Some(&classes)).unwrap();
    assert_eq!(table.non_zero(), sparse.cells);
}

#[test]
fn test_grouping_by_workflow_matches_store_totals() {
    let store = store_from(MIXED);
    let leaves = leaf_entries(&store, Dimension::Step).unwrap();
    let groups = group_errors(&leaves, |name| GroupKey::Workflow.apply(name), &[]);

    let expected_a: u64 = store
        .records(&RecordFilter::all())
        .unwrap()
        .iter()
        .filter(|r| r.step.starts_with("/A/"))
        .map(|r| r.count)
        .sum();
    assert_eq!(groups["A"].total, expected_a);
    assert_eq!(groups["B"].errors["134"]["T2_US_X"], 6);
    assert_eq!(
        groups.values().map(|g| g.total).sum::<u64>(),
        store.total_errors().unwrap()
    );
}

#[test]
fn test_grouping_composes() {
    let store = store_from(MIXED);
    let leaves = leaf_entries(&store, Dimension::Site).unwrap();
    let everything = |_: &str| "all".to_string();

    let twice = group_errors(
        &group_errors(&leaves, |name| GroupKey::Tier.apply(name), &[]),
        everything,
        &[],
    );
    let once = group_errors(&leaves, |name| everything(&GroupKey::Tier.apply(name)), &[]);

    assert_eq!(twice["all"].errors, once["all"].errors);
    assert_eq!(twice["all"].total, once["all"].total);
}

#[test]
fn test_workflow_view() {
    let store = store_from(MIXED);

    let view = workflow_view(&store, "A").unwrap().unwrap();
    assert_eq!(view.steps.len(), 2);
    assert_eq!(view.total(), 11);
    assert!(workflow_view(&store, "missing").unwrap().is_none());
}

#[test]
fn test_global_view_headers() {
    let store = store_from(WORKED_EXAMPLE);
    let mut explanations = Explanations::default();
    explanations.insert("8020", vec!["Fatal Exception".to_string()]);

    let view = global_view(&store, Dimension::Site, &explanations).unwrap();
    insta::assert_json_snapshot!(view.columns, @r#"
    [
      {
        "name": "8020",
        "display": "8020",
        "title": "Total errors: 8\nFatal Exception"
      }
    ]
    "#);
    assert_eq!(view.rows[0].display, "A\nStep1");
}

#[test]
fn test_workflows_matching_cell() {
    let store = store_from(MIXED);

    let matches = workflows_matching(&store, "134", "T1_DE_Y").unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].workflow, "A");
    assert_eq!(matches[0].count, 2);
    assert_eq!(matches[1].steps, vec!["/B/Merge"]);

    assert!(workflows_matching(&store, "8020", "T1_DE_Y").unwrap().is_empty());
}
