//! Masking of known volatile fields before comparison
//!
//! Template files carry a few project-specific values that every target
//! repository is expected to change (the program name in the release
//! workflow, for instance). Comparing or diffing those fields verbatim would
//! flag every repository as divergent, so recognized files have the value
//! portion of those lines rewritten to a fixed placeholder first.
//!
//! The rule set is data: a [`NormalizeRule`] pairs a path matcher with the
//! keys whose values get masked. The release-automation manifest is the sole
//! built-in rule.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::Path;

use regex::Regex;

/// Replacement text for masked values
pub const PLACEHOLDER: &str = "\"<ignored>\"";

/// Matches a file by name, optionally requiring a directory component
#[derive(Debug, Clone)]
pub struct PathMatcher {
    /// Exact file name to match (e.g. "tag-release.yml")
    pub file_name: String,
    /// If set, some path component must equal this directory name
    pub under_dir: Option<String>,
}

impl PathMatcher {
    pub fn matches(&self, path: &Path) -> bool {
        if path.file_name() != Some(OsStr::new(self.file_name.as_str())) {
            return false;
        }
        match &self.under_dir {
            Some(dir) => path
                .components()
                .any(|c| c.as_os_str() == OsStr::new(dir.as_str())),
            None => true,
        }
    }
}

/// One recognized file type plus the key lines to mask
#[derive(Debug, Clone)]
pub struct NormalizeRule {
    matcher: PathMatcher,
    /// Each pattern captures the "key: " prefix to keep; the rest of the
    /// line is replaced with the placeholder.
    patterns: Vec<Regex>,
    placeholder: String,
}

impl NormalizeRule {
    /// Build a rule masking `key: value` lines for the given keys.
    ///
    /// Keys are anchored at line start, tolerant of leading whitespace and
    /// whitespace around the colon.
    pub fn for_keys(matcher: PathMatcher, keys: &[&str], placeholder: &str) -> Self {
        let patterns = keys
            .iter()
            .map(|key| {
                let pattern = format!(r"^(\s*{}\s*:\s*).*$", regex::escape(key));
                Regex::new(&pattern).expect("key pattern is valid")
            })
            .collect();
        Self {
            matcher,
            patterns,
            placeholder: placeholder.to_string(),
        }
    }

    fn rewrite_line(&self, line: &str) -> Option<String> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(line) {
                return Some(format!("{}{}", &caps[1], self.placeholder));
            }
        }
        None
    }
}

/// Applies the first matching rule's rewrites to a file's text
#[derive(Debug, Clone)]
pub struct Normalizer {
    rules: Vec<NormalizeRule>,
}

impl Normalizer {
    /// Normalizer with no rules; every file passes through unchanged
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Normalizer with the built-in rule set.
    ///
    /// Currently one rule: the release-automation manifest
    /// (`tag-release.yml` anywhere under a `workflows` directory) has the
    /// values of `PROGRAM_NAME`, `PROGRAM_SRC` and `PROGRAM_DIR` masked.
    pub fn with_builtins() -> Self {
        let release_manifest = NormalizeRule::for_keys(
            PathMatcher {
                file_name: "tag-release.yml".to_string(),
                under_dir: Some("workflows".to_string()),
            },
            &["PROGRAM_NAME", "PROGRAM_SRC", "PROGRAM_DIR"],
            PLACEHOLDER,
        );
        Self {
            rules: vec![release_manifest],
        }
    }

    /// Register an additional rule
    pub fn push_rule(&mut self, rule: NormalizeRule) {
        self.rules.push(rule);
    }

    /// Does any rule apply to this path?
    pub fn recognizes(&self, path: &Path) -> bool {
        self.rules.iter().any(|r| r.matcher.matches(path))
    }

    /// Rewrite recognized volatile lines; unrecognized files are returned
    /// borrowed and untouched.
    ///
    /// Masked lines always end in a single `\n`; all other lines keep their
    /// original endings. Idempotent: normalizing normalized text is a no-op.
    pub fn normalize<'t>(&self, path: &Path, text: &'t str) -> Cow<'t, str> {
        let Some(rule) = self.rules.iter().find(|r| r.matcher.matches(path)) else {
            return Cow::Borrowed(text);
        };

        let mut out = String::with_capacity(text.len());
        for segment in text.split_inclusive('\n') {
            let line = segment
                .strip_suffix('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .unwrap_or(segment);
            match rule.rewrite_line(line) {
                Some(masked) => {
                    out.push_str(&masked);
                    out.push('\n');
                }
                None => out.push_str(segment),
            }
        }
        Cow::Owned(out)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::with_builtins()
    }
}
