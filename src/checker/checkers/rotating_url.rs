//! Checker for URLs that always point at the latest release
//!
//! The configured URL is a stable pointer (usually a redirect) whose target
//! changes with every release. An optional `pattern` constrains where the
//! pointer may lead.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::checker::checkers::{compile_pattern, matches_at_start, resolve_available};
use crate::checker::error::CheckError;
use crate::checker::traits::Checker;
use crate::checker::types::CheckerKind;
use crate::data::{CheckOutcome, ExternalData, reconcile};
use crate::retrieval::Retriever;

pub struct RotatingUrlChecker {
    retriever: Arc<dyn Retriever>,
}

impl RotatingUrlChecker {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait::async_trait]
impl Checker for RotatingUrlChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::RotatingUrl
    }

    async fn discover(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError> {
        let url = data.checker_data.require_str("url")?;
        let pattern = data.checker_data.optional_str("pattern")?;
        let expr = pattern.map(compile_pattern).transpose()?;

        debug!("Resolving rotating URL {}", url);

        let Some(candidate) = resolve_available(self.retriever.as_ref(), url).await? else {
            return Ok(CheckOutcome::broken());
        };

        if let Some(expr) = &expr
            && !matches_at_start(expr, &candidate.url)
        {
            warn!(
                "{} resolved to {}, which does not match {}",
                url,
                candidate.url,
                expr.as_str()
            );
            return Ok(CheckOutcome::broken());
        }

        let discovered = candidate.url.clone();
        Ok(reconcile(&data.current_version, candidate, &discovered))
    }
}
