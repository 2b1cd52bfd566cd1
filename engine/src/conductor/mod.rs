//! Batch Conductor
//!
//! Splits the inventory into contiguous batches, asks the classifier about
//! each batch in turn, and pairs every record with a classification.
//!
//! Alignment is positional: entry *j* of the classifier's reply belongs to
//! record *j* of the batch. There is no name cross-check, so a reply that
//! drops or reorders a middle entry shifts the remaining classifications
//! onto the wrong projects. Records past the end of a short (or missing)
//! reply get [`Classification::fallback_for`].

use crate::llm::{Classifier, ClassifierOutcome};
use crate::summary::ProjectSummary;
use organizer_sdk::types::{AnalyzedProject, Classification, ProjectRecord};
use tracing::{info, warn};

/// Runs the classifier over the whole inventory, one batch at a time
pub struct BatchConductor {
    classifier: Box<dyn Classifier>,
    batch_size: usize,
}

impl BatchConductor {
    /// `batch_size` of zero is treated as one.
    pub fn new(classifier: Box<dyn Classifier>, batch_size: usize) -> Self {
        Self {
            classifier,
            batch_size: batch_size.max(1),
        }
    }

    /// Classify every project, preserving input order.
    ///
    /// Never fails: a batch whose call is unavailable simply gets fallback
    /// classifications for all of its members.
    pub async fn run(&self, projects: Vec<ProjectRecord>) -> Vec<AnalyzedProject> {
        let total = projects.len();
        let total_batches = total.div_ceil(self.batch_size);

        info!(
            "Analyzing {} projects with {} ({} per call)",
            total,
            self.classifier.name(),
            self.batch_size
        );

        let mut results = Vec::with_capacity(total);
        let mut remaining = projects.into_iter().peekable();
        let mut batch_num = 0;

        while remaining.peek().is_some() {
            batch_num += 1;
            let batch: Vec<ProjectRecord> = remaining.by_ref().take(self.batch_size).collect();

            info!("Processing batch {}/{}...", batch_num, total_batches);

            let summaries: Vec<ProjectSummary> =
                batch.iter().map(ProjectSummary::from_record).collect();

            let classifications = match self.classifier.classify(&summaries).await {
                ClassifierOutcome::Parsed(list) => {
                    if list.len() != batch.len() {
                        warn!(
                            "Batch {} returned {} classifications for {} projects; aligning by position",
                            batch_num,
                            list.len(),
                            batch.len()
                        );
                    }
                    list
                }
                ClassifierOutcome::Unavailable(reason) => {
                    warn!(
                        "Batch {} unavailable ({}); using fallback classifications",
                        batch_num, reason
                    );
                    Vec::new()
                }
            };

            results.extend(merge_batch(batch, classifications));
        }

        results
    }
}

/// Pair each record with the classification at the same position, or a
/// fallback when the list runs out. Extra classifications are dropped.
pub fn merge_batch(
    batch: Vec<ProjectRecord>,
    classifications: Vec<Classification>,
) -> Vec<AnalyzedProject> {
    let mut classifications = classifications.into_iter();

    batch
        .into_iter()
        .map(|record| match classifications.next() {
            Some(analysis) => AnalyzedProject::remote(record, analysis),
            None => AnalyzedProject::fallback(record),
        })
        .collect()
}
