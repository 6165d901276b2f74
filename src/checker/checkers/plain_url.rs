//! Checker for plain URLs
//!
//! Applies to items whose checker data has `"type": "url"` and to items
//! without any checker type, in which case the pinned URL is checked.

use std::sync::Arc;

use tracing::debug;

use crate::checker::checkers::resolve_available;
use crate::checker::error::CheckError;
use crate::checker::traits::Checker;
use crate::checker::types::CheckerKind;
use crate::data::{CheckOutcome, ExternalData, reconcile};
use crate::retrieval::Retriever;

pub struct UrlChecker {
    retriever: Arc<dyn Retriever>,
}

impl UrlChecker {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait::async_trait]
impl Checker for UrlChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::Url
    }

    async fn discover(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError> {
        let url = data
            .checker_data
            .optional_str("url")?
            .unwrap_or(data.current_version.url.as_str());

        debug!("Checking {}", url);

        match resolve_available(self.retriever.as_ref(), url).await? {
            Some(candidate) => Ok(reconcile(&data.current_version, candidate, url)),
            None => Ok(CheckOutcome::broken()),
        }
    }
}
