//! The currently displayed exam.
//!
//! A session owns nothing but the configuration and an `Arc` to the model on
//! screen. Switching exams builds the new model completely before the swap,
//! so a consumer never sees a partially parsed exam, and a failed load leaves
//! the previous model in place.

use crate::catalog::{CatalogEntry, ExamDocument};
use crate::config::ExtractionConfig;
use crate::error::ExamError;
use crate::extract::{build_exam_model, load_exam};
use crate::output::ExamModel;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default)]
pub struct ExamSession {
    config: ExtractionConfig,
    current: Option<Arc<ExamModel>>,
}

impl ExamSession {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// The model on screen, if any exam has loaded.
    pub fn current(&self) -> Option<Arc<ExamModel>> {
        self.current.clone()
    }

    /// Load `entry` and make it current.
    ///
    /// On error the previous model (or empty state) stays current.
    pub async fn switch_to(&mut self, entry: &CatalogEntry) -> Result<Arc<ExamModel>, ExamError> {
        match load_exam(entry, &self.config).await {
            Ok(model) => Ok(self.replace(model)),
            Err(e) => {
                warn!("Keeping previous exam; failed to load '{}': {}", entry.id, e);
                Err(e)
            }
        }
    }

    /// Extract an already loaded document and make it current.
    pub fn show(&mut self, document: &ExamDocument) -> Arc<ExamModel> {
        let model = build_exam_model(document, &self.config);
        self.replace(model)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    fn replace(&mut self, model: ExamModel) -> Arc<ExamModel> {
        let model = Arc::new(model);
        self.current = Some(Arc::clone(&model));
        model
    }
}
