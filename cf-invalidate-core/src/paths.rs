//! Mapping of changed object keys to CloudFront invalidation paths.

use cf_invalidate_config::{Config, TranslationPolicy};
use tracing::{debug, info};

use crate::event::ChangeRecord;

const INDEX_FILE: &str = "index.html";

/// Literals driving the filtered policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRules {
    /// Key whose change invalidates the whole tag namespace.
    pub wildcard_trigger: String,
    /// Keys under this prefix are not invalidated individually.
    pub ignore_prefix: String,
    pub wildcard_path: String,
}

impl Default for TranslationRules {
    fn default() -> Self {
        TranslationRules {
            wildcard_trigger: "tag/book-notes/index.html".to_string(),
            ignore_prefix: "tag/".to_string(),
            wildcard_path: "/tag/*".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathTranslator {
    policy: TranslationPolicy,
    rules: TranslationRules,
}

impl PathTranslator {
    pub fn new(policy: TranslationPolicy, rules: TranslationRules) -> Self {
        PathTranslator { policy, rules }
    }

    pub fn from_config(config: &Config) -> Self {
        PathTranslator::new(
            config.policy,
            TranslationRules {
                wildcard_trigger: config.wildcard_trigger.clone(),
                ignore_prefix: config.ignore_prefix.clone(),
                wildcard_path: config.wildcard_path.clone(),
            },
        )
    }

    pub fn policy(&self) -> TranslationPolicy {
        self.policy
    }

    /// Paths for a whole batch, in input order. Duplicates are kept.
    pub fn translate(&self, records: &[ChangeRecord]) -> Vec<String> {
        let mut paths = Vec::with_capacity(records.len() * 2);
        for record in records {
            paths.extend(self.translate_key(&record.key));
        }
        info!(
            policy = %self.policy,
            records = records.len(),
            paths = paths.len(),
            "translated change records"
        );
        paths
    }

    /// Zero, one or two paths for a single key.
    pub fn translate_key(&self, key: &str) -> Vec<String> {
        debug!(key, "translating key");
        match self.policy {
            TranslationPolicy::Filtered => self.filtered(key),
            TranslationPolicy::Unfiltered => object_paths(key),
        }
    }

    fn filtered(&self, key: &str) -> Vec<String> {
        if key == self.rules.wildcard_trigger {
            vec![self.rules.wildcard_path.clone()]
        } else if key.starts_with(&self.rules.ignore_prefix) {
            debug!(key, prefix = %self.rules.ignore_prefix, "skipping ignored key");
            Vec::new()
        } else {
            object_paths(key)
        }
    }
}

/// `/<key>`, preceded by the directory path when the key is an index file.
fn object_paths(key: &str) -> Vec<String> {
    match key.strip_suffix(INDEX_FILE) {
        // The directory keeps its trailing slash: "foo/index.html" -> "/foo/".
        Some(dir) => vec![format!("/{dir}"), format!("/{key}")],
        None => vec![format!("/{key}")],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(keys: &[&str]) -> Vec<ChangeRecord> {
        keys.iter().map(|k| ChangeRecord::new(*k)).collect()
    }

    fn filtered() -> PathTranslator {
        PathTranslator::new(TranslationPolicy::Filtered, TranslationRules::default())
    }

    fn unfiltered() -> PathTranslator {
        PathTranslator::new(TranslationPolicy::Unfiltered, TranslationRules::default())
    }

    #[test]
    fn plain_key_becomes_single_path() {
        for translator in [filtered(), unfiltered()] {
            assert_eq!(translator.translate_key("post1.html"), vec!["/post1.html"]);
            assert_eq!(
                translator.translate_key("2024/05/notes.xml"),
                vec!["/2024/05/notes.xml"]
            );
        }
    }

    #[test]
    fn index_key_invalidates_directory_then_file() {
        assert_eq!(
            filtered().translate_key("foo/index.html"),
            vec!["/foo/", "/foo/index.html"]
        );
        assert_eq!(
            filtered().translate_key("a/b/c/index.html"),
            vec!["/a/b/c/", "/a/b/c/index.html"]
        );
    }

    #[test]
    fn root_index_invalidates_root() {
        assert_eq!(
            filtered().translate_key("index.html"),
            vec!["/", "/index.html"]
        );
    }

    #[test]
    fn wildcard_trigger_emits_only_wildcard() {
        assert_eq!(
            filtered().translate_key("tag/book-notes/index.html"),
            vec!["/tag/*"]
        );
    }

    #[test]
    fn other_tag_keys_are_skipped() {
        let translator = filtered();
        assert!(translator.translate_key("tag/other/index.html").is_empty());
        assert!(translator.translate_key("tag/rust.html").is_empty());
        assert!(translator.translate_key("tag/book-notes/feed.xml").is_empty());
    }

    #[test]
    fn only_tag_keys_translate_to_nothing() {
        let paths = filtered().translate(&records(&["tag/a/index.html", "tag/b/index.html"]));
        assert!(paths.is_empty());
    }

    #[test]
    fn filtered_batch_example() {
        let paths = filtered().translate(&records(&[
            "post1.html",
            "blog/index.html",
            "tag/other/index.html",
            "tag/book-notes/index.html",
        ]));

        assert_eq!(
            paths,
            vec!["/post1.html", "/blog/", "/blog/index.html", "/tag/*"]
        );
    }

    #[test]
    fn unfiltered_batch_example() {
        let paths = unfiltered().translate(&records(&["blog/index.html"]));
        assert_eq!(paths, vec!["/blog/", "/blog/index.html"]);
    }

    #[test]
    fn unfiltered_has_no_tag_special_cases() {
        let translator = unfiltered();
        assert_eq!(
            translator.translate_key("tag/book-notes/index.html"),
            vec!["/tag/book-notes/", "/tag/book-notes/index.html"]
        );
        assert_eq!(translator.translate_key("tag/rust.html"), vec!["/tag/rust.html"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let paths = filtered().translate(&records(&[
            "tag/book-notes/index.html",
            "a.html",
            "tag/book-notes/index.html",
            "a.html",
        ]));
        assert_eq!(paths, vec!["/tag/*", "/a.html", "/tag/*", "/a.html"]);
    }

    #[test]
    fn every_path_is_absolute() {
        let keys = [
            "index.html",
            "x",
            "deep/er/index.html",
            "tag/book-notes/index.html",
            "myindex.html",
        ];
        for translator in [filtered(), unfiltered()] {
            for path in translator.translate(&records(&keys)) {
                assert!(path.starts_with('/'), "{path} is not absolute");
            }
        }
    }

    #[test]
    fn custom_rules_are_honoured() {
        let translator = PathTranslator::new(
            TranslationPolicy::Filtered,
            TranslationRules {
                wildcard_trigger: "category/all/index.html".to_string(),
                ignore_prefix: "category/".to_string(),
                wildcard_path: "/category/*".to_string(),
            },
        );

        assert_eq!(
            translator.translate_key("category/all/index.html"),
            vec!["/category/*"]
        );
        assert!(translator.translate_key("category/x.html").is_empty());
        assert_eq!(
            translator.translate_key("tag/x/index.html"),
            vec!["/tag/x/", "/tag/x/index.html"]
        );
    }
}
