//! Checker for download links published on a web page
//!
//! Checker data:
//!
//! ```json
//! {
//!     "type": "scrape",
//!     "url": "https://example.com/downloads.html",
//!     "pattern": "https://dl.example.com/app-(\\d+)/app.x86_64.tar.gz"
//! }
//! ```

use std::sync::{Arc, LazyLock};

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

use crate::checker::checkers::{compile_pattern, matches_at_start, resolve_available};
use crate::checker::error::{CheckError, ConfigError};
use crate::checker::traits::Checker;
use crate::checker::types::CheckerKind;
use crate::data::{CheckOutcome, ExternalData, reconcile};
use crate::retrieval::Retriever;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Finds the first link on a page whose href matches a pattern from its start
pub struct ScrapeChecker {
    retriever: Arc<dyn Retriever>,
}

impl ScrapeChecker {
    pub fn new(retriever: Arc<dyn Retriever>) -> Self {
        Self { retriever }
    }
}

#[async_trait::async_trait]
impl Checker for ScrapeChecker {
    fn kind(&self) -> CheckerKind {
        CheckerKind::Scrape
    }

    async fn discover(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError> {
        let url = data.checker_data.require_str("url")?;
        let pattern = data.checker_data.require_str("pattern")?;
        let expr = compile_pattern(pattern)?;
        let page_url = Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!("Searching for {} on {}", pattern, url);

        let contents = match self.retriever.fetch_text(url).await {
            Ok(contents) => contents,
            Err(e) if e.is_unavailable() => {
                warn!("Could not fetch {}: {}", url, e);
                return Ok(CheckOutcome::broken());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(href) = find_first_link(&contents, &expr) else {
            warn!("No link matching {} found on {}", pattern, url);
            return Ok(CheckOutcome::broken());
        };

        let absolute = page_url
            .join(&href)
            .map(String::from)
            .unwrap_or_else(|_| href.clone());

        let Some(candidate) = resolve_available(self.retriever.as_ref(), &absolute).await? else {
            return Ok(CheckOutcome::broken());
        };

        let discovered = if href == data.current_version.url {
            &href
        } else {
            &absolute
        };
        Ok(reconcile(&data.current_version, candidate, discovered))
    }
}

/// Returns the href of the first anchor, in document order, matching `expr`
fn find_first_link(html: &str, expr: &Regex) -> Option<String> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .find(|href| matches_at_start(expr, href))
        .map(str::to_string)
}
