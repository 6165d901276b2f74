//! Checker trait definition

use crate::checker::error::CheckError;
use crate::checker::types::CheckerKind;
use crate::data::{CheckOutcome, ExternalData};

/// Strategy discovering the current truth for one kind of external source
#[async_trait::async_trait]
pub trait Checker: Send + Sync {
    /// Returns the kind of source this checker handles
    fn kind(&self) -> CheckerKind;

    /// Whether this checker should handle the item
    fn applies(&self, data: &ExternalData) -> bool {
        CheckerKind::of(&data.checker_data) == Some(self.kind())
    }

    /// Performs source-specific discovery for an item this checker applies to
    ///
    /// # Returns
    /// * `Ok(CheckOutcome)` - The new state, broken when nothing was found
    /// * `Err(CheckError)` - Invalid checker data or a transport failure
    async fn discover(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError>;

    /// Checks the item, returning an unchanged outcome when this checker does not apply
    async fn check(&self, data: &ExternalData) -> Result<CheckOutcome, CheckError> {
        if !self.applies(data) {
            return Ok(CheckOutcome::unchanged());
        }
        self.discover(data).await
    }
}
