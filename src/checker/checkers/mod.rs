//! Checker implementations for each source kind

mod debian_repo;
mod plain_url;
mod rotating_url;
mod scrape;

pub use debian_repo::DebianRepoChecker;
pub use plain_url::UrlChecker;
pub use rotating_url::RotatingUrlChecker;
pub use scrape::ScrapeChecker;

use regex::Regex;
use tracing::warn;

use crate::checker::error::{CheckError, ConfigError};
use crate::data::VersionInfo;
use crate::retrieval::Retriever;

/// Compile a user-supplied pattern, reporting failures as configuration errors
pub(crate) fn compile_pattern(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Whether `expr` matches `text` starting at its first character
pub(crate) fn matches_at_start(expr: &Regex, text: &str) -> bool {
    expr.find(text).is_some_and(|m| m.start() == 0)
}

/// Resolve `url`, mapping a definitive refusal from the server to `None`
///
/// Transport failures, rate limiting and server errors still propagate.
pub(crate) async fn resolve_available(
    retriever: &dyn Retriever,
    url: &str,
) -> Result<Option<VersionInfo>, CheckError> {
    match retriever.resolve(url).await {
        Ok(info) => Ok(Some(info)),
        Err(e) if e.is_unavailable() => {
            warn!("{} is unavailable: {}", url, e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
pub(crate) mod log_capture {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::subscriber::DefaultGuard;

    /// Warnings logged on the current thread while the guard is alive
    #[derive(Clone, Default)]
    pub(crate) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub(crate) fn install() -> (Self, DefaultGuard) {
            let logs = Self::default();
            let writer = logs.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || writer.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::WARN)
                .finish();
            (logs, tracing::subscriber::set_default(subscriber))
        }

        pub(crate) fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r"https://x/app-(\d+)\.tar\.gz", "https://x/app-12.tar.gz", true)]
    #[case(r"https://x/app-(\d+)\.tar\.gz", "https://x/app-12.tar.gz.sig", true)]
    #[case(r"https://x/app-(\d+)\.tar\.gz", "mirror:https://x/app-12.tar.gz", false)]
    #[case(r"app", "https://x/app", false)]
    #[case(r"a|https", "https://x/a", true)]
    fn matches_at_start_requires_match_at_position_zero(
        #[case] pattern: &str,
        #[case] text: &str,
        #[case] expected: bool,
    ) {
        let expr = compile_pattern(pattern).unwrap();
        assert_eq!(matches_at_start(&expr, text), expected);
    }

    #[test]
    fn compile_pattern_rejects_invalid_expression() {
        let result = compile_pattern(r"https://x/(\d+");

        assert!(matches!(result, Err(ConfigError::InvalidPattern { .. })));
    }
}
