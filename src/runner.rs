//! Check pass over all items of a manifest

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::checker::CheckerRegistry;
use crate::data::{ExternalData, State};

/// Result of checking one item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    #[serde(flatten)]
    pub item: ExternalData,
    /// Fault raised while checking, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.item.state != State::Broken
    }
}

/// Counts over a set of reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub valid: usize,
    pub broken: usize,
    pub unknown: usize,
    pub updates: usize,
    pub errors: usize,
}

impl Summary {
    pub fn from_reports(reports: &[CheckReport]) -> Self {
        reports.iter().fold(Self::default(), |mut summary, report| {
            summary.total += 1;
            match report.item.state {
                State::Valid => summary.valid += 1,
                State::Broken => summary.broken += 1,
                State::Unknown => summary.unknown += 1,
            }
            if report.item.has_update() {
                summary.updates += 1;
            }
            if report.error.is_some() {
                summary.errors += 1;
            }
            summary
        })
    }

    pub fn has_failures(&self) -> bool {
        self.broken > 0 || self.errors > 0
    }
}

/// Check one item and merge the outcome into it
///
/// Faults are logged and recorded in the report instead of propagating.
async fn check_item(registry: &CheckerRegistry, mut item: ExternalData) -> CheckReport {
    match registry.check(&item).await {
        Ok(outcome) => {
            item.apply(outcome);
            match (&item.state, &item.new_version) {
                (State::Broken, _) => warn!("{}/{} is broken", item.module, item.filename),
                (_, Some(new)) => info!(
                    "{}/{} has a new version at {}",
                    item.module, item.filename, new.url
                ),
                _ => {}
            }
            CheckReport { item, error: None }
        }
        Err(e) => {
            error!("Failed to check {}/{}: {}", item.module, item.filename, e);
            CheckReport {
                item,
                error: Some(e.to_string()),
            }
        }
    }
}

/// Check every item, at most `jobs` at a time
///
/// Reports come back in item order. A failing item never stops the others.
pub async fn check_all(
    registry: &CheckerRegistry,
    items: Vec<ExternalData>,
    jobs: usize,
) -> Vec<CheckReport> {
    let reports: Vec<CheckReport> = stream::iter(items)
        .map(|item| check_item(registry, item))
        .buffered(jobs.max(1))
        .collect()
        .await;

    let summary = Summary::from_reports(&reports);
    info!(
        "Checked {} item(s): {} valid, {} broken, {} unknown, {} update(s), {} error(s)",
        summary.total,
        summary.valid,
        summary.broken,
        summary.unknown,
        summary.updates,
        summary.errors
    );

    reports
}
