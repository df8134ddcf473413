//! Crawl: the five-stage slice analysis as one operator

use crate::data::{DataKind, MraData};
use crate::drill_down::DrillDown;
use crate::error::OperatorResult;
use crate::flatten::Flatten;
use crate::operator::MraOperator;
use crate::pipeline::Pipeline;
use crate::project::SliceProject;
use crate::represent::Represent;
use crate::select::{SlicePredicate, SliceSelect};
use crate::transform::SliceTransform;
use crate::transformation::SliceTransformation;
use mra_core::{EngineConfig, FeatureMap, RelationSchema, RelationSpace, RelationTuple};
use std::sync::Arc;

/// `RelationSpace → RelationSpace`: the five-stage analysis pipeline as one
/// operator.
///
/// Built with [`Crawl::builder`]. When any transformation needs reference
/// data, the empty region schema is added to the Represent stage so the
/// global slice exists; SliceProject keeps only the caller's region schemas.
#[derive(Debug)]
pub struct Crawl {
    pipeline: Pipeline,
}

impl Crawl {
    /// Start building a crawl over `region_schemas`, flattening into a space
    /// over `dimensions`
    pub fn builder(region_schemas: Vec<RelationSchema>, dimensions: RelationSchema) -> CrawlBuilder {
        CrawlBuilder {
            region_schemas,
            dimensions,
            feature_schemas: None,
            transformations: Vec::new(),
            predicate: Arc::new(|_: &RelationTuple, _: &FeatureMap| true),
            drill_down: None,
            config: EngineConfig::default(),
        }
    }

    /// Stage names in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.pipeline.stage_names()
    }

    /// Run the crawl over `space`
    pub fn apply(&self, space: RelationSpace) -> OperatorResult<RelationSpace> {
        self.pipeline
            .execute(space.into())?
            .expect_space(self.name())
    }
}

impl MraOperator for Crawl {
    fn name(&self) -> &'static str {
        "Crawl"
    }

    fn input_kind(&self) -> DataKind {
        DataKind::RelationSpace
    }

    fn output_kind(&self) -> DataKind {
        DataKind::RelationSpace
    }

    fn execute(&self, data: MraData) -> OperatorResult<MraData> {
        let space = data.expect_space(self.name())?;
        Ok(self.apply(space)?.into())
    }
}

/// Builder for [`Crawl`]
pub struct CrawlBuilder {
    region_schemas: Vec<RelationSchema>,
    dimensions: RelationSchema,
    feature_schemas: Option<Vec<RelationSchema>>,
    transformations: Vec<Arc<dyn SliceTransformation>>,
    predicate: Arc<dyn SlicePredicate>,
    drill_down: Option<DrillDown>,
    config: EngineConfig,
}

impl CrawlBuilder {
    /// Add one transformation
    pub fn transformation(mut self, transformation: Arc<dyn SliceTransformation>) -> Self {
        self.transformations.push(transformation);
        self
    }

    /// Add several transformations
    pub fn transformations(
        mut self,
        transformations: impl IntoIterator<Item = Arc<dyn SliceTransformation>>,
    ) -> Self {
        self.transformations.extend(transformations);
        self
    }

    /// Explicit feature schemas for the Represent stage.
    ///
    /// Defaults to the feature schemas the transformations consume.
    pub fn feature_schemas(mut self, feature_schemas: Vec<RelationSchema>) -> Self {
        self.feature_schemas = Some(feature_schemas);
        self
    }

    /// Selection predicate (defaults to keeping every region)
    pub fn predicate<F>(self, predicate: F) -> Self
    where
        F: Fn(&RelationTuple, &FeatureMap) -> bool + Send + Sync + 'static,
    {
        self.shared_predicate(Arc::new(predicate))
    }

    /// Selection predicate shared with other pipelines
    pub fn shared_predicate(mut self, predicate: Arc<dyn SlicePredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    /// Prune regions that do not descend from `drill_down`
    pub fn drill_down(mut self, drill_down: DrillDown) -> Self {
        self.drill_down = Some(drill_down);
        self
    }

    /// Engine configuration for the select stage
    pub fn config(mut self, config: &EngineConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Validate and assemble the pipeline
    pub fn build(self) -> OperatorResult<Crawl> {
        let feature_schemas = match self.feature_schemas {
            Some(schemas) => schemas,
            None => {
                let mut schemas: Vec<RelationSchema> = Vec::new();
                for t in &self.transformations {
                    if !schemas.contains(t.feature_schema()) {
                        schemas.push(t.feature_schema().clone());
                    }
                }
                schemas
            }
        };

        let mut transform = SliceTransform::new(self.transformations, self.dimensions.clone())?;
        if let Some(drill_down) = self.drill_down {
            transform = transform.with_drill_down(drill_down);
        }

        let mut represent_regions = self.region_schemas.clone();
        if transform.requires_reference_data() && !represent_regions.iter().any(|r| r.is_empty()) {
            log::debug!("Adding the global region schema to Represent for reference data");
            represent_regions.push(RelationSchema::empty());
        }

        let pipeline = Pipeline::start(Represent::new(represent_regions, feature_schemas))
            .then(transform)?
            .then(SliceSelect::from_predicate(self.predicate).with_config(&self.config))?
            .then(SliceProject::new(self.region_schemas))?
            .then(Flatten::new(self.dimensions))?;
        Ok(Crawl { pipeline })
    }
}

impl std::fmt::Debug for CrawlBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrawlBuilder")
            .field("region_schemas", &self.region_schemas)
            .field("dimensions", &self.dimensions)
            .field("feature_schemas", &self.feature_schemas)
            .field("transformations", &self.transformations.len())
            .field("drill_down", &self.drill_down)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "crawl_test.rs"]
mod tests;
