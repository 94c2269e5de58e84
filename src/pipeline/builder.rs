use crate::config::OllamaConfig;
use crate::pipeline::ollama::OllamaClassifier;
use crate::pipeline::runtime::ProsodyEvaluator;
use crate::pipeline::traits::Classifier;

pub struct ProsodyEvaluatorBuilder {
    config: OllamaConfig,
    classifier: Option<Box<dyn Classifier>>,
}

impl ProsodyEvaluatorBuilder {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            config,
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn build(self) -> ProsodyEvaluator {
        let Self { config, classifier } = self;
        let classifier = classifier.unwrap_or_else(|| Box::new(OllamaClassifier::new(config)));
        ProsodyEvaluator::from_classifier(classifier)
    }
}
