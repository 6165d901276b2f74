//! Data model for pinned external artifacts
//!
//! # Lifecycle
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Manifest   │────▶│ ExternalData │◀────│  Runner     │
//! │  (load)     │     │ state=Unknown│     │ (apply)     │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │                    ▲
//!                            ▼                    │
//!                     ┌──────────────┐     ┌─────────────┐
//!                     │   Checker    │────▶│CheckOutcome │
//!                     │ (discovery)  │     │state,new_ver│
//!                     └──────────────┘     └─────────────┘
//! ```
//!
//! - [`version_info`]: the `(url, checksum, size)` triple and its matching predicate
//! - [`external_data`]: the checked record, its state, and check outcomes

pub mod external_data;
pub mod version_info;

pub use external_data::{
    CheckOutcome, CheckerData, ExternalData, SourceKind, State, reconcile,
};
pub use version_info::VersionInfo;
