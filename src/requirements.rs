// src/requirements.rs

//! Requirement normalization for legacy installers
//!
//! Metadata declares requirements in the `Requires-Dist` style
//! (`Name (constraint); marker`). Legacy `setup.py` installers expect
//! pip-style specifiers (`Name>=1.0`) grouped into `install_requires` and
//! `extras_require`, where an environment marker becomes part of the
//! extras key (`extra:marker`).

use std::collections::BTreeMap;

/// Extra name used for requirements that belong to no optional feature
pub const NO_EXTRA: &str = ".none";

/// Requirements regrouped for a legacy installer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    /// Unconditional requirements (no extra, no environment marker)
    pub install_requires: Vec<String>,
    /// Keyed by extra name, suffixed with `:marker` when conditional
    pub extras_require: BTreeMap<String, Vec<String>>,
}

impl Requirements {
    pub fn is_empty(&self) -> bool {
        self.install_requires.is_empty() && self.extras_require.is_empty()
    }
}

/// Parse one `Name (constraint); marker` requirement
///
/// Returns the pip-style requirement and the trimmed environment marker,
/// if any. A bare version in parentheses means an exact match:
///
/// ```
/// use sdistkit::requirements::parse_requirement;
///
/// assert_eq!(parse_requirement("foo (1.2)"), ("foo==1.2".to_string(), None));
/// assert_eq!(
///     parse_requirement("bar (<2.0); os_name == 'nt'"),
///     ("bar<2.0".to_string(), Some("os_name == 'nt'".to_string()))
/// );
/// ```
pub fn parse_requirement(requires_dist: &str) -> (String, Option<String>) {
    let (name_version, env_mark) = match requires_dist.split_once(';') {
        Some((name_version, mark)) => (name_version, Some(mark.trim().to_string())),
        None => (requires_dist, None),
    };

    let Some((name, version)) = name_version.split_once('(') else {
        return (name_version.to_string(), env_mark);
    };

    let name = name.trim();
    let version = version.replace(')', "");
    let version = version.trim();
    let version = if version.contains(['=', '<', '>']) {
        version.to_string()
    } else {
        format!("=={}", version)
    };

    (format!("{}{}", name, version), env_mark)
}

/// Regroup requirements by extra and environment marker
///
/// `reqs_by_extra` maps an extra name ([`NO_EXTRA`] for none) to its raw
/// requirement strings. Order within each resulting group follows the order
/// of first appearance; nothing is deduplicated.
pub fn convert_requires<'a, I, R>(reqs_by_extra: I) -> Requirements
where
    I: IntoIterator<Item = (&'a str, R)>,
    R: IntoIterator<Item = &'a str>,
{
    let mut grouping: BTreeMap<(&str, Option<String>), Vec<String>> = BTreeMap::new();
    for (extra, reqs) in reqs_by_extra {
        for req in reqs {
            let (name_version, env_mark) = parse_requirement(req);
            grouping.entry((extra, env_mark)).or_default().push(name_version);
        }
    }

    let install_requires = grouping.remove(&(NO_EXTRA, None)).unwrap_or_default();

    let mut extras_require: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for ((extra, env_mark), reqs) in grouping {
        let extra = if extra == NO_EXTRA { "" } else { extra };
        let key = match env_mark {
            Some(mark) => format!("{}:{}", extra, mark),
            None => extra.to_string(),
        };
        extras_require.entry(key).or_default().extend(reqs);
    }

    Requirements {
        install_requires,
        extras_require,
    }
}
