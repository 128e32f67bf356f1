//! Maps an agent's free-text problem description onto a flowchart step.
//!
//! The resolver never trusts the external classifier: whatever it answers is
//! normalized and looked up in the `GraphStore`, and only an identifier the
//! store knows is ever returned. A classifier that cannot be reached is a
//! `ResolutionError`; a classifier that answers with something unknown is a
//! `Resolution::NoMatch`.

use crate::error::ResolutionError;
use crate::flowchart::StepId;
use crate::graph::GraphStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

mod classifier;
mod gemini;
pub mod prompt;

pub use classifier::TextClassifier;
pub use gemini::{GeminiClassifier, parse_generate_response};
pub use prompt::{WorkedExample, build_prompt, default_examples, normalize_candidate};

/// Maximum number of body characters per step sent to the classifier.
pub const DEFAULT_MAX_BODY_CHARS: usize = 200;
/// Upper bound on a single classifier round trip.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(15);

/// The outcome of a successful resolver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The classifier named a step that exists in the graph.
    Matched(StepId),
    /// The classifier answered, but not with a known step.
    NoMatch,
}

impl Resolution {
    pub fn step_id(&self) -> Option<&str> {
        match self {
            Resolution::Matched(id) => Some(id),
            Resolution::NoMatch => None,
        }
    }

    pub fn into_option(self) -> Option<StepId> {
        match self {
            Resolution::Matched(id) => Some(id),
            Resolution::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolverOptions {
    pub max_body_chars: usize,
    pub timeout: Duration,
    pub examples: Vec<WorkedExample>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            max_body_chars: DEFAULT_MAX_BODY_CHARS,
            timeout: DEFAULT_RESOLVE_TIMEOUT,
            examples: default_examples(),
        }
    }
}

impl ResolverOptions {
    pub fn with_max_body_chars(mut self, max_body_chars: usize) -> Self {
        self.max_body_chars = max_body_chars;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_examples(mut self, examples: Vec<WorkedExample>) -> Self {
        self.examples = examples;
        self
    }
}

pub struct StepResolver<C> {
    graph: Arc<GraphStore>,
    classifier: C,
    options: ResolverOptions,
}

impl<C: TextClassifier> StepResolver<C> {
    pub fn new(graph: Arc<GraphStore>, classifier: C) -> Self {
        Self::with_options(graph, classifier, ResolverOptions::default())
    }

    pub fn with_options(graph: Arc<GraphStore>, classifier: C, options: ResolverOptions) -> Self {
        Self {
            graph,
            classifier,
            options,
        }
    }

    /// The store answers are validated against.
    pub fn graph(&self) -> &Arc<GraphStore> {
        &self.graph
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// The exact prompt `resolve` sends for `query`.
    pub fn prompt_for(&self, query: &str) -> String {
        let projection = self.graph.projection(self.options.max_body_chars);
        build_prompt(query, &projection, &self.options.examples)
    }

    /// Asks the classifier which step best matches `query`.
    ///
    /// # Returns
    ///
    /// * `Ok(Resolution::Matched(id))`: the answer named a step present in the graph.
    /// * `Ok(Resolution::NoMatch)`: the query was blank, or the answer was empty or unknown.
    /// * `Err(ResolutionError)`: the classifier failed or did not answer in time.
    pub async fn resolve(&self, query: &str) -> Result<Resolution, ResolutionError> {
        if query.trim().is_empty() {
            debug!("blank query, skipping classifier");
            return Ok(Resolution::NoMatch);
        }

        let prompt = self.prompt_for(query);
        debug!(
            model = self.classifier.model_name(),
            prompt_chars = prompt.chars().count(),
            "resolving query"
        );

        let raw = tokio::time::timeout(self.options.timeout, self.classifier.classify(&prompt))
            .await
            .map_err(|_| ResolutionError::Timeout(self.options.timeout))??;

        Ok(self.validate(query, &raw))
    }

    /// Normalizes a raw answer and vetoes anything the graph does not define.
    fn validate(&self, query: &str, raw: &str) -> Resolution {
        let candidate = normalize_candidate(raw);
        if candidate.is_empty() {
            info!(query, "classifier returned an empty answer");
            return Resolution::NoMatch;
        }

        match self.graph.get(candidate) {
            Some(step) => {
                info!(query, step = %step.id, "query resolved");
                Resolution::Matched(step.id.clone())
            }
            None => {
                warn!(query, candidate, "classifier answer is not a flowchart step");
                Resolution::NoMatch
            }
        }
    }
}
