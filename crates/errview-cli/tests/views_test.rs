use errview_testing::fixtures::{EXPLANATIONS, MULTI_WORKFLOW, READINESS, WORKED_EXAMPLE};
use errview_testing::{TestWorld, assertions};

fn multi_world() -> TestWorld {
    TestWorld::new().with_source("all_errors.json", MULTI_WORKFLOW)
}

#[test]
fn test_workflows_lists_each_workflow_once() {
    let world = multi_world();

    let json = world.run_json(&["workflows"]).unwrap();
    assertions::assert_workflows(&json, &["A", "B", "C_ACDC0"]).unwrap();
}

#[test]
fn test_global_totals_agree_for_every_split() {
    let world = multi_world();

    for split in ["errorcode", "site", "step"] {
        let json = world.run_json(&["global", "--split", split]).unwrap();
        assertions::assert_grand_total(&json, 29).unwrap();
        assert_eq!(json["content"]["pivot"]["grand_total"], 29);
    }
}

#[test]
fn test_unknown_split_pivots_by_error_code() {
    let world = multi_world();

    let json = world.run_json(&["global", "--split", "bogus"]).unwrap();
    assert_eq!(json["content"]["split"], "code");
    assert_eq!(json["content"]["pivot"]["row_dimension"], "step");
    assert_eq!(json["content"]["pivot"]["col_dimension"], "site");
    assertions::assert_grand_total(&json, 29).unwrap();
}

#[test]
fn test_global_cell_titles_list_split_values() {
    let world = TestWorld::new().with_source("all_errors.json", WORKED_EXAMPLE);

    let json = world.run_json(&["global", "--split", "step"]).unwrap();
    let cell = &json["content"]["pivot"]["cells"][0][0];
    assert_eq!(cell["total"], 8);
    assert_eq!(cell["slices"], serde_json::json!([5, 3]));
    assert_eq!(
        cell["title"],
        "Total Errors: 8\ncode: 8020\nsite: T2_US_X\nstep A: 5\nstep A: 3"
    );
}

#[test]
fn test_dense_table_sums_to_step_total() {
    let world = multi_world();

    let json = world.run_json(&["table", "/A/Step1"]).unwrap();
    assert_eq!(json["content"]["mode"], "dense");
    assert_eq!(json["content"]["total"], 8);
    assert_eq!(
        json["content"]["errorcodes"],
        serde_json::json!(["-1", "134", "8020"])
    );
    assertions::assert_dense_cell(&json, "8020", "T2_US_X", 5).unwrap();
    assertions::assert_dense_cell(&json, "8020", "T1_DE_Y", 2).unwrap();
    assertions::assert_dense_cell(&json, "-1", "T2_CH_Z", 0).unwrap();
}

#[test]
fn test_sparse_table_lists_non_zero_cells() {
    let world = multi_world();

    let json = world.run_json(&["table", "/C_ACDC0/Step1", "--sparse"]).unwrap();
    assert_eq!(json["content"]["mode"], "sparse");
    assert_eq!(
        json["content"]["cells"],
        serde_json::json!([{"errorcode": "134", "site": "T2_US_X", "count": 8}])
    );
}

#[test]
fn test_table_readiness_restricts_sites() {
    let world = multi_world();
    let readiness = world.write_file("readiness.json", READINESS);
    let world = world.with_config(&format!("readiness = '{}'\n", readiness.display()));

    let json = world
        .run_json(&["table", "/A/Step1", "--readiness", "green"])
        .unwrap();
    assert_eq!(json["content"]["sites"], serde_json::json!(["T2_US_X"]));
    assert_eq!(json["content"]["total"], 6);

    let sparse = world
        .run_json(&["table", "/A/Step1", "--sparse", "--readiness", "green"])
        .unwrap();
    assert_eq!(sparse["content"]["mode"], "sparse");
    assert_eq!(sparse["content"]["total"], 6);
    assert_eq!(
        sparse["content"]["cells"],
        serde_json::json!([
            {"errorcode": "134", "site": "T2_US_X", "count": 1},
            {"errorcode": "8020", "site": "T2_US_X", "count": 5}
        ])
    );
}

#[test]
fn test_workflow_view_has_a_table_per_step() {
    let world = multi_world();

    let json = world.run_json(&["workflow", "A"]).unwrap();
    let steps: Vec<&str> = json["content"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["step"].as_str().unwrap())
        .collect();
    assert_eq!(steps, vec!["/A/Step1", "/A/Step2"]);
    assert_eq!(json["content"]["total"], 11);
}

#[test]
fn test_list_drills_down_to_workflows() {
    let world = multi_world();

    let json = world
        .run_json(&["list", "--errorcode", "134", "--site", "T2_US_X"])
        .unwrap();
    let content = &json["content"];
    assert_eq!(content["total"], 9);
    assert_eq!(content["workflows"][0]["workflow"], "C_ACDC0");
    assert_eq!(content["workflows"][0]["count"], 8);
    assert_eq!(content["workflows"][1]["workflow"], "A");
    assert_eq!(
        content["workflows"][1]["steps"],
        serde_json::json!(["/A/Step1"])
    );
}

#[test]
fn test_list_skips_zero_counts() {
    let world = multi_world();

    let json = world
        .run_json(&["list", "--errorcode", "8020", "--site", "T2_CH_Z"])
        .unwrap();
    assert_eq!(json["content"]["workflows"], serde_json::json!([]));
    assert!(!json["suggestions"].as_array().unwrap().is_empty());
}

#[test]
fn test_list_accepts_negative_error_codes() {
    let world = multi_world();

    let json = world
        .run_json(&["list", "--errorcode", "-1", "--site", "T2_CH_Z"])
        .unwrap();
    assert_eq!(json["content"]["total"], 6);
}

#[test]
fn test_groups_fold_steps_into_workflows() {
    let world = multi_world();

    let json = world
        .run_json(&["groups", "--by", "step", "--key", "workflow"])
        .unwrap();
    let groups = json["content"]["groups"].as_array().unwrap();
    let totals: Vec<(&str, u64)> = groups
        .iter()
        .map(|g| (g["name"].as_str().unwrap(), g["total"].as_u64().unwrap()))
        .collect();
    assert_eq!(totals, vec![("A", 11), ("B", 10), ("C_ACDC0", 8)]);
    assert_eq!(groups[0]["members"].as_array().unwrap().len(), 2);
    assert_eq!(json["content"]["total"], 29);
}

#[test]
fn test_groups_fold_sites_into_tiers() {
    let world = multi_world();

    let json = world
        .run_json(&["groups", "--by", "site", "--key", "tier"])
        .unwrap();
    let groups = json["content"]["groups"].as_array().unwrap();
    assert_eq!(groups[0]["name"], "T1");
    assert_eq!(groups[0]["total"], 6);
    assert_eq!(groups[1]["name"], "T2");
    assert_eq!(groups[1]["total"], 23);
}

#[test]
fn test_explain_known_and_unknown_codes() {
    let world = multi_world();
    let explanations = world.write_file("explanations.json", EXPLANATIONS);
    let world = world.with_config(&format!("explanations = '{}'\n", explanations.display()));

    let json = world.run_json(&["explain", "8020"]).unwrap();
    assert_eq!(
        json["content"]["explanations"],
        serde_json::json!(["Fatal Exception: FileOpenError", "Unable to open file"])
    );

    let json = world.run_json(&["explain", "999"]).unwrap();
    assert_eq!(
        json["content"]["explanations"],
        serde_json::json!(["No info for this error code"])
    );
}

#[test]
fn test_refresh_summarizes_snapshot() {
    let world = multi_world();

    let json = world.run_json(&["refresh"]).unwrap();
    assert_eq!(json["badge"]["level"], "success");
    assert_eq!(json["content"]["total_errors"], 29);
    assert_eq!(json["content"]["workflows"], 3);
    assert_eq!(json["content"]["steps"], 4);
    assert!(json["content"]["created_at"].is_string());
}

#[test]
fn test_session_key_reads_its_own_snapshot() {
    let world = multi_world();

    let json = world.run_json(&["--session", "s1", "refresh"]).unwrap();
    assert_eq!(json["content"]["key"], "session:s1");
}

#[test]
fn test_describe_reads_metadata_template() {
    let world = multi_world();
    world.write_file(
        "meta/A.json",
        r#"{"prep_id": "prep-1", "related": ["A_ACDC0", "A_clone"], "parameters": {"priority": 90000}}"#,
    );
    let template = world.sources_dir().join("meta").join("{workflow}.json");
    let world = world.with_config(&format!("metadata = '{}'\n", template.display()));

    let json = world.run_json(&["describe", "A"]).unwrap();
    let content = &json["content"];
    assert_eq!(content["found"], true);
    assert_eq!(content["workflow"], "A");
    assert_eq!(content["prep_id"], "prep-1");
    assert_eq!(content["acdc"], serde_json::json!(["A_ACDC0"]));

    let json = world.run_json(&["describe", "B"]).unwrap();
    assert_eq!(json["content"]["found"], false);
}
