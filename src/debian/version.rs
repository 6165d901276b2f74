//! Debian package version ordering
//!
//! Versions have the form `[epoch:]upstream[-revision]`. Comparison follows
//! dpkg: epochs numerically, then upstream and revision with the mixed
//! lexical/numeric algorithm where `~` sorts before anything, even the end
//! of the string.

use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebianVersion {
    epoch: u64,
    upstream: String,
    revision: String,
}

impl DebianVersion {
    /// Parse a version string, returning None for an empty upstream part or a non-numeric epoch
    ///
    /// Examples:
    /// - "1.2.3" -> epoch 0, upstream "1.2.3", revision ""
    /// - "2:1.0-3ubuntu1" -> epoch 2, upstream "1.0", revision "3ubuntu1"
    pub fn parse(version: &str) -> Option<Self> {
        let version = version.trim();
        let (epoch, rest) = match version.split_once(':') {
            Some((epoch, rest)) => (epoch.parse().ok()?, rest),
            None => (0, version),
        };
        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) => (upstream, revision),
            None => (rest, ""),
        };

        if upstream.is_empty() {
            return None;
        }

        Some(Self {
            epoch,
            upstream: upstream.to_string(),
            revision: revision.to_string(),
        })
    }
}

impl Ord for DebianVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| compare_part(&self.upstream, &other.upstream))
            .then_with(|| compare_part(&self.revision, &other.revision))
    }
}

impl PartialOrd for DebianVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two version strings, treating unparseable ones as lowest
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (DebianVersion::parse(a), DebianVersion::parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Sort weight of a non-digit character; `None` is the end of the string
fn weight(c: Option<u8>) -> i32 {
    match c {
        None => 0,
        Some(c) if c.is_ascii_digit() => 0,
        Some(c) if c.is_ascii_alphabetic() => c as i32,
        Some(b'~') => -1,
        Some(c) => c as i32 + 256,
    }
}

fn compare_part(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0, 0);
    let is_digit = |s: &[u8], k: usize| s.get(k).is_some_and(u8::is_ascii_digit);

    while i < a.len() || j < b.len() {
        // non-digit prefix
        while (i < a.len() && !is_digit(a, i)) || (j < b.len() && !is_digit(b, j)) {
            let ac = weight(a.get(i).copied());
            let bc = weight(b.get(j).copied());
            if ac != bc {
                return ac.cmp(&bc);
            }
            i += 1;
            j += 1;
        }

        while a.get(i) == Some(&b'0') {
            i += 1;
        }
        while b.get(j) == Some(&b'0') {
            j += 1;
        }

        // numeric run: longer wins, otherwise the first differing digit
        let mut first_diff = Ordering::Equal;
        while is_digit(a, i) && is_digit(b, j) {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if is_digit(a, i) {
            return Ordering::Greater;
        }
        if is_digit(b, j) {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }

    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.0", "1.0", Ordering::Equal)]
    #[case("1.0", "1.1", Ordering::Less)]
    #[case("1.10", "1.9", Ordering::Greater)]
    #[case("1.01", "1.1", Ordering::Equal)]
    #[case("1.0~rc1", "1.0", Ordering::Less)]
    #[case("1.0~rc1", "1.0~rc2", Ordering::Less)]
    #[case("1.0~~", "1.0~", Ordering::Less)]
    #[case("1.0a", "1.0", Ordering::Greater)]
    #[case("1.0a", "1.0+", Ordering::Less)]
    #[case("1:0.9", "2.0", Ordering::Greater)]
    #[case("2.0-1", "2.0-2", Ordering::Less)]
    #[case("2.0-10", "2.0-9", Ordering::Greater)]
    #[case("2.0-1ubuntu1", "2.0-1", Ordering::Greater)]
    #[case("1.2-3-4", "1.2-3", Ordering::Greater)]
    fn compare_versions_follows_dpkg_ordering(
        #[case] a: &str,
        #[case] b: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(compare_versions(a, b), expected);
        assert_eq!(compare_versions(b, a), expected.reverse());
    }

    #[test]
    fn parse_splits_epoch_upstream_and_revision() {
        let version = DebianVersion::parse("2:1.0-3ubuntu1").unwrap();

        assert_eq!(
            version,
            DebianVersion {
                epoch: 2,
                upstream: "1.0".to_string(),
                revision: "3ubuntu1".to_string(),
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("x:1.0")]
    #[case(":1.0")]
    #[case("-1")]
    fn parse_rejects_malformed_versions(#[case] version: &str) {
        assert_eq!(DebianVersion::parse(version), None);
    }

    #[test]
    fn compare_versions_ranks_unparseable_lowest() {
        assert_eq!(compare_versions("x:1", "0.1"), Ordering::Less);
    }
}
