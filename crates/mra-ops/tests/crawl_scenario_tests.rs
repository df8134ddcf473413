//! Multi-stage crawl scenario integration tests

use mra_core::test_utils::{ads_table, region, rs};
use mra_core::{
    create_relation_tuple, Aggregation, EngineConfig, FeatureMap, RelationSchema, RelationSpace,
    RelationTuple, Value,
};
use mra_ops::{
    Crawl, CreateRelationSpaceByCube, DrillDown, MraOperator, OperatorError, Pipeline,
    RatioTransformation, SliceTransformation, SupportTransformation, SUPPORT_COLUMN,
};
use std::sync::Arc;

fn dims() -> RelationSchema {
    rs(&["Device", "Browser"])
}

fn ads_space() -> RelationSpace {
    CreateRelationSpaceByCube::new(
        ["Device", "Browser"],
        vec![Aggregation::sum("Cost"), Aggregation::sum("Clicks")],
    )
    .apply(&ads_table())
    .unwrap()
}

fn min_support(threshold: f64) -> impl Fn(&RelationTuple, &FeatureMap) -> bool + Send + Sync {
    move |_: &RelationTuple, features: &FeatureMap| {
        features
            .get(&rs(&[SUPPORT_COLUMN]))
            .and_then(|t| t.value(0, SUPPORT_COLUMN))
            .and_then(|v| v.as_f64())
            .is_some_and(|s| s > threshold)
    }
}

/// Regions stored in `space`, read back from each relation's dimension columns
fn regions_of(space: &RelationSpace) -> Vec<RelationTuple> {
    let mut regions = Vec::new();
    for (schema, table) in space.relations() {
        for row in 0..table.num_rows() {
            let pairs = schema
                .iter()
                .map(|attr| (attr.to_string(), table.value(row, attr).unwrap()));
            regions.push(create_relation_tuple(pairs));
        }
    }
    regions
}

// ── Level-by-level drill-down ───────────────────────────────────────────

#[test]
fn test_two_level_drill_down() {
    let space = ads_space();
    let support: Arc<dyn SliceTransformation> = Arc::new(SupportTransformation::new("Cost"));

    let level_one = Crawl::builder(vec![rs(&["Device"]), rs(&["Browser"])], dims())
        .transformation(Arc::clone(&support))
        .predicate(min_support(0.3))
        .build()
        .unwrap()
        .apply(space.clone())
        .unwrap();
    let mut survivors = regions_of(&level_one);
    survivors.sort();
    assert_eq!(
        survivors,
        vec![region(&[("Browser", "Chrome")]), region(&[("Device", "iPhone")])]
    );

    let level_two = Crawl::builder(vec![rs(&["Device", "Browser"])], dims())
        .feature_schemas(vec![rs(&["Cost"])])
        .drill_down(DrillDown::breadth_first(survivors, &dims(), 1))
        .build()
        .unwrap()
        .apply(space)
        .unwrap();
    assert_eq!(
        regions_of(&level_two),
        vec![region(&[("Device", "iPhone"), ("Browser", "Chrome")])]
    );
    let table = level_two.get_relation(&dims()).unwrap();
    assert_eq!(table.value(0, "Cost"), Some(Value::Int(40)));
}

#[test]
fn test_shared_transformation_across_crawls() {
    let support: Arc<dyn SliceTransformation> = Arc::new(SupportTransformation::new("Cost"));
    let by_device = Crawl::builder(vec![rs(&["Device"])], dims())
        .transformation(Arc::clone(&support))
        .build()
        .unwrap();
    let by_browser = Crawl::builder(vec![rs(&["Browser"])], dims())
        .transformation(support)
        .build()
        .unwrap();

    let space = ads_space();
    let devices = by_device.apply(space.clone()).unwrap();
    let browsers = by_browser.apply(space).unwrap();
    assert_eq!(devices.get_relation(&rs(&["Device"])).unwrap().num_rows(), 3);
    assert_eq!(browsers.get_relation(&rs(&["Browser"])).unwrap().num_rows(), 4);
}

// ── Pipelines ───────────────────────────────────────────────────────────

#[test]
fn test_cube_then_crawl_pipeline() {
    let crawl = Crawl::builder(vec![rs(&["Device"])], dims())
        .transformation(Arc::new(RatioTransformation::new("Cost", "Clicks", "cpc")))
        .build()
        .unwrap();
    let pipeline = Pipeline::start(CreateRelationSpaceByCube::new(
        ["Device", "Browser"],
        vec![Aggregation::sum("Cost"), Aggregation::sum("Clicks")],
    ))
    .then(crawl)
    .unwrap();

    let space = pipeline
        .execute(ads_table().into())
        .unwrap()
        .into_space()
        .unwrap();
    let by_device = space.get_relation(&rs(&["Device"])).unwrap();
    assert_eq!(by_device.columns(), &["Device", "Clicks", "Cost", "cpc"]);
    // Pixel: 18 / 150
    assert_eq!(by_device.value(0, "cpc"), Some(Value::Float(18.0 / 150.0)));
}

#[test]
fn test_crawl_rejects_table_input() {
    let crawl = Crawl::builder(vec![rs(&["Device"])], dims()).build().unwrap();
    let err = crawl.execute(ads_table().into()).unwrap_err();
    assert!(matches!(err, OperatorError::TypeMismatch { .. }));
}

// ── Configuration ───────────────────────────────────────────────────────

#[test]
fn test_config_from_project_dir_limits_cube() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("mra.yml"),
        "cube:\n  max_grouping_keys: 1\nselect:\n  retain_global_region: false\n",
    )
    .unwrap();
    let config = EngineConfig::load_from_dir(dir.path()).unwrap();

    let err = CreateRelationSpaceByCube::new(["Device", "Browser"], vec![Aggregation::sum("Cost")])
        .with_config(&config)
        .apply(&ads_table())
        .unwrap_err();
    assert!(matches!(err, OperatorError::CubeTooLarge { keys: 2, max: 1 }));
}
