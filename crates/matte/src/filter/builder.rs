use crate::{
    algorithms::{classifier_for, StrategyKind},
    error::Result,
    filter::BackgroundMatteFilter,
    traits::{BackgroundClassifier, ExecutionStrategy},
    types::{ColorPolicy, Predicate, ThresholdConfig},
};

/// Builder for creating matte filters with a fluent API
pub struct FilterBuilder {
    threshold: ThresholdConfig,
    predicate: Predicate,
    policy: ColorPolicy,
    classifier: Option<Box<dyn BackgroundClassifier>>,
    strategy: Option<Box<dyn ExecutionStrategy>>,
}

impl FilterBuilder {
    /// Create a new filter builder
    pub fn new() -> Self {
        Self {
            threshold: ThresholdConfig::default(),
            predicate: Predicate::default(),
            policy: ColorPolicy::default(),
            classifier: None,
            strategy: None,
        }
    }

    /// Set both bounds at once
    pub fn threshold(mut self, threshold: ThresholdConfig) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn lower(mut self, lower: [u8; 3]) -> Self {
        self.threshold.lower = lower;
        self
    }

    pub fn upper(mut self, upper: [u8; 3]) -> Self {
        self.threshold.upper = upper;
        self
    }

    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn color_policy(mut self, policy: ColorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use one of the built-in traversal strategies
    pub fn strategy(mut self, kind: StrategyKind) -> Self {
        self.strategy = Some(kind.build());
        self
    }

    /// Set a custom traversal strategy (replaces any existing one)
    pub fn set_strategy<S>(mut self, strategy: S) -> Self
    where
        S: ExecutionStrategy + 'static,
    {
        self.strategy = Some(Box::new(strategy));
        self
    }

    /// Set a custom classifier. Threshold and predicate are then unused and
    /// left out of `info()` and `Debug` output.
    pub fn set_classifier<C>(mut self, classifier: C) -> Self
    where
        C: BackgroundClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Validate the threshold and build the filter
    pub fn build(self) -> Result<BackgroundMatteFilter> {
        self.threshold.validate()?;

        let custom_classifier = self.classifier.is_some();
        let classifier = self
            .classifier
            .unwrap_or_else(|| classifier_for(self.predicate, self.threshold));
        let strategy = self
            .strategy
            .unwrap_or_else(|| StrategyKind::default().build());

        Ok(BackgroundMatteFilter::from_parts(
            self.threshold,
            self.predicate,
            self.policy,
            classifier,
            custom_classifier,
            strategy,
        ))
    }

    /// Build the default filter: 240..=255 on every channel, inclusive,
    /// RGB preserved
    pub fn build_default() -> BackgroundMatteFilter {
        let threshold = ThresholdConfig::default();
        BackgroundMatteFilter::from_parts(
            threshold,
            Predicate::Inclusive,
            ColorPolicy::Preserve,
            classifier_for(Predicate::Inclusive, threshold),
            false,
            StrategyKind::default().build(),
        )
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
