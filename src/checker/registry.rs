//! Ordered collection of all checker variants

use std::sync::Arc;

use tracing::debug;

use crate::checker::checkers::{DebianRepoChecker, RotatingUrlChecker, ScrapeChecker, UrlChecker};
use crate::checker::error::CheckError;
use crate::checker::traits::Checker;
use crate::config::Settings;
use crate::data::{CheckOutcome, ExternalData};
use crate::retrieval::Retriever;

/// Checkers consulted, in order, for every item
///
/// Built once at startup and read-only afterwards.
pub struct CheckerRegistry {
    checkers: Vec<Box<dyn Checker>>,
}

impl CheckerRegistry {
    pub fn new(checkers: Vec<Box<dyn Checker>>) -> Self {
        Self { checkers }
    }

    pub fn checkers(&self) -> &[Box<dyn Checker>] {
        &self.checkers
    }

    /// Checkers that apply to `data`, in registry order
    pub fn checkers_for<'a>(
        &'a self,
        data: &'a ExternalData,
    ) -> impl Iterator<Item = &'a dyn Checker> + 'a {
        self.checkers
            .iter()
            .map(|checker| checker.as_ref())
            .filter(move |checker| checker.applies(data))
    }

    /// Check `data` with the first applicable checker
    ///
    /// At most one discovery runs per item. Items no checker claims get an
    /// unchanged outcome.
    pub async fn check(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError> {
        let Some(checker) = self.checkers_for(data).next() else {
            debug!(
                "No checker applies to {}/{} (type {:?})",
                data.module,
                data.filename,
                data.checker_data.kind()
            );
            return Ok(CheckOutcome::unchanged());
        };

        debug!(
            "Checking {}/{} with {} checker",
            data.module,
            data.filename,
            checker.kind().as_str()
        );
        checker.check(data).await
    }
}

/// Create the default registry over the given retriever
pub fn create_default_registry(retriever: Arc<dyn Retriever>, settings: &Settings) -> CheckerRegistry {
    CheckerRegistry::new(vec![
        Box::new(DebianRepoChecker::new(
            retriever.clone(),
            &settings.debian.default_arch,
        )),
        Box::new(RotatingUrlChecker::new(retriever.clone())),
        Box::new(ScrapeChecker::new(retriever.clone())),
        Box::new(UrlChecker::new(retriever)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::types::CheckerKind;
    use crate::data::{CheckerData, SourceKind, VersionInfo};
    use crate::retrieval::retriever::MockRetriever;
    use serde_json::json;

    fn external_data(checker_data: serde_json::Value) -> ExternalData {
        ExternalData::new(
            "app",
            "app.tar.gz",
            SourceKind::ExtraData,
            CheckerData::from(checker_data),
            VersionInfo::new("https://x/v1.tar.gz", Some("abc".to_string()), Some(100)),
        )
    }

    fn registry(retriever: MockRetriever) -> CheckerRegistry {
        create_default_registry(Arc::new(retriever), &Settings::default())
    }

    #[test]
    fn default_registry_keeps_fixed_order() {
        let registry = registry(MockRetriever::new());

        let kinds: Vec<_> = registry.checkers().iter().map(|c| c.kind()).collect();

        assert_eq!(
            kinds,
            vec![
                CheckerKind::DebianRepo,
                CheckerKind::RotatingUrl,
                CheckerKind::Scrape,
                CheckerKind::Url,
            ]
        );
    }

    #[test]
    fn checkers_for_selects_single_variant() {
        let registry = registry(MockRetriever::new());
        let data = external_data(json!({ "type": "scrape", "url": "https://x", "pattern": "x" }));

        let kinds: Vec<_> = registry.checkers_for(&data).map(|c| c.kind()).collect();

        assert_eq!(kinds, vec![CheckerKind::Scrape]);
    }

    #[tokio::test]
    async fn check_leaves_unrecognized_type_untouched() {
        let mut retriever = MockRetriever::new();
        retriever.expect_fetch_text().never();
        retriever.expect_fetch_bytes().never();
        retriever.expect_resolve().never();
        let registry = registry(retriever);
        let data = external_data(json!({ "type": "anitya", "project-id": 1 }));

        assert_eq!(registry.checkers_for(&data).count(), 0);
        let outcome = registry.check(&data).await.unwrap();

        assert_eq!(outcome, CheckOutcome::unchanged());
    }

    #[tokio::test]
    async fn check_is_idempotent_for_identical_responses() {
        let mut retriever = MockRetriever::new();
        retriever
            .expect_resolve()
            .times(2)
            .returning(|url| Ok(VersionInfo::new(url, Some("def".to_string()), Some(200))));
        let registry = registry(retriever);
        let data = external_data(json!({}));

        let first = registry.check(&data).await.unwrap();
        let second = registry.check(&data).await.unwrap();

        assert_eq!(first, second);
    }
}
