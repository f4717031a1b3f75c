//! Link classification for RakshaMitra.
//!
//! A URL passes through an ordered pipeline:
//! - Presence check: missing or empty input is rejected outright
//! - Unsafe rules: suspicious TLDs, bait keywords, phishing patterns, shorteners
//! - Scheme check: anything not on `https://` is flagged

mod rules;
mod verdict;

pub use rules::*;
pub use verdict::*;

use crate::config::ClassifierConfig;
use crate::error::RakshaResult;

const HTTPS_SCHEME: &str = "https://";

/// Stateless URL risk classifier.
///
/// Safe to share across requests; classification reads only the
/// compiled rule set.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    rules: RuleSet,
}

impl UrlClassifier {
    /// Create a classifier over an already compiled rule set.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Compile the configured rule set.
    pub fn from_config(config: &ClassifierConfig) -> RakshaResult<Self> {
        Ok(Self::new(RuleSet::compile(&config.unsafe_patterns)?))
    }

    /// Classifier with the built-in rule set.
    #[cfg(test)]
    pub fn with_defaults() -> Self {
        Self::from_config(&ClassifierConfig::default())
            .expect("built-in patterns compile")
    }

    /// The rules this classifier applies, in evaluation order.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Judge a candidate URL.
    ///
    /// Order:
    /// 1. Missing or empty input
    /// 2. Any unsafe rule (takes precedence over the scheme)
    /// 3. Scheme other than `https://`
    /// 4. Clean
    pub fn classify(&self, url: Option<&str>) -> Verdict {
        let url = match url {
            Some(url) if !url.is_empty() => url,
            _ => return Verdict::unsafe_because(VerdictReason::NoUrl),
        };

        if let Some(rule) = self.rules.first_match(url) {
            tracing::warn!(url = %url, rule = %rule.name(), "Suspicious link detected");
            return Verdict::unsafe_because(VerdictReason::SuspiciousPattern);
        }

        if !url.starts_with(HTTPS_SCHEME) {
            return Verdict::unsafe_because(VerdictReason::NotHttps);
        }

        Verdict::safe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternConfig;
    use tokio_test::{assert_err, assert_ok};

    fn classifier() -> UrlClassifier {
        crate::logging::init_test();
        UrlClassifier::with_defaults()
    }

    fn assert_verdict(url: Option<&str>, safe: bool, reason: VerdictReason) {
        let verdict = classifier().classify(url);
        assert_eq!(verdict.safe, safe, "safe flag for {url:?}");
        assert_eq!(verdict.reason, reason, "reason for {url:?}");
    }

    #[test]
    fn test_missing_or_empty_url() {
        assert_verdict(None, false, VerdictReason::NoUrl);
        assert_verdict(Some(""), false, VerdictReason::NoUrl);
    }

    #[test]
    fn test_documented_scenarios() {
        assert_verdict(
            Some("http://free-gift-claim.xyz"),
            false,
            VerdictReason::SuspiciousPattern,
        );
        assert_verdict(Some("http://example.com"), false, VerdictReason::NotHttps);
        assert_verdict(Some("https://example.com"), true, VerdictReason::Clean);
        assert_verdict(
            Some("https://bit.ly/abc123"),
            false,
            VerdictReason::SuspiciousPattern,
        );
    }

    #[test]
    fn test_suspicious_tlds() {
        for url in [
            "https://example.ru",
            "https://shop.xyz/cart",
            "https://files.zip",
            "https://trailer.mov?x=1",
        ] {
            assert_verdict(Some(url), false, VerdictReason::SuspiciousPattern);
        }
    }

    #[test]
    fn test_tld_must_end_at_word_boundary() {
        // ".rust" continues the word, ".ru" alone does not
        assert_verdict(Some("https://docs.rust-lang.org"), true, VerdictReason::Clean);
        assert_verdict(Some("https://example.xyzzy.com"), true, VerdictReason::Clean);
    }

    #[test]
    fn test_tld_rules_are_case_sensitive() {
        assert_verdict(Some("https://EXAMPLE.RU"), true, VerdictReason::Clean);
    }

    #[test]
    fn test_bait_keywords_ignore_case() {
        assert_verdict(
            Some("https://example.com/FREE-stuff"),
            false,
            VerdictReason::SuspiciousPattern,
        );
        assert_verdict(
            Some("https://example.com/Bonus"),
            false,
            VerdictReason::SuspiciousPattern,
        );
    }

    #[test]
    fn test_phishing_keyword_followed_by_digit() {
        assert_verdict(
            Some("https://example.com/login-2"),
            false,
            VerdictReason::SuspiciousPattern,
        );
        assert_verdict(
            Some("https://example.com/VERIFY_/9"),
            false,
            VerdictReason::SuspiciousPattern,
        );
        // letters between keyword and digit break the pattern
        assert_verdict(Some("https://example.com/login/page2"), true, VerdictReason::Clean);
        assert_verdict(Some("https://example.com/login"), true, VerdictReason::Clean);
    }

    #[test]
    fn test_tld_boundary_is_ascii() {
        // a non-ASCII letter ends the ASCII word, so ".ru" still counts as a TLD
        assert_verdict(
            Some("https://example.ru\u{f1}/"),
            false,
            VerdictReason::SuspiciousPattern,
        );
    }

    #[test]
    fn test_phishing_digit_is_ascii() {
        // Arabic-Indic three is not a digit for this rule
        assert_verdict(
            Some("https://example.com/login-\u{663}"),
            true,
            VerdictReason::Clean,
        );
    }

    #[test]
    fn test_keyword_case_folding_is_ascii() {
        // long s must not fold to "s"
        assert_verdict(
            Some("https://example.com/bonu\u{17f}"),
            true,
            VerdictReason::Clean,
        );
    }

    #[test]
    fn test_suspicious_link_is_logged_with_rule() {
        let classifier = UrlClassifier::with_defaults();

        let output = crate::logging::capture_logs(tracing::Level::WARN, || {
            classifier.classify(Some("https://bit.ly/abc123"));
        });
        assert!(output.contains("Suspicious link detected"), "{output}");
        assert!(output.contains("https://bit.ly/abc123"), "{output}");
        assert!(output.contains("url-shortener"), "{output}");
    }

    #[test]
    fn test_clean_and_plain_http_links_are_not_logged() {
        let classifier = UrlClassifier::with_defaults();

        let output = crate::logging::capture_logs(tracing::Level::WARN, || {
            classifier.classify(Some("https://example.com"));
            classifier.classify(Some("http://example.com"));
            classifier.classify(None);
        });
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn test_shorteners() {
        for url in ["https://tinyurl.com/x", "https://BIT.LY/y", "https://shorturl.at/z"] {
            assert_verdict(Some(url), false, VerdictReason::SuspiciousPattern);
        }
    }

    #[test]
    fn test_unsafe_pattern_takes_precedence_over_scheme() {
        assert_verdict(
            Some("ftp://claim-your-prize.com"),
            false,
            VerdictReason::SuspiciousPattern,
        );
    }

    #[test]
    fn test_scheme_check_is_literal_prefix() {
        assert_verdict(Some("HTTPS://example.com"), false, VerdictReason::NotHttps);
        assert_verdict(Some("example.com"), false, VerdictReason::NotHttps);
        assert_verdict(Some(" https://example.com"), false, VerdictReason::NotHttps);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = classifier();
        for url in ["", "http://example.com", "https://bit.ly/a", "https://example.com"] {
            assert_eq!(classifier.classify(Some(url)), classifier.classify(Some(url)));
        }
    }

    #[test]
    fn test_substituted_rule_set() {
        let config = ClassifierConfig {
            unsafe_patterns: vec![PatternConfig {
                name: "onion".to_string(),
                pattern: r"\.onion\b".to_string(),
            }],
        };
        let classifier = assert_ok!(UrlClassifier::from_config(&config));

        assert_eq!(
            classifier.classify(Some("https://hidden.onion")).reason,
            VerdictReason::SuspiciousPattern
        );
        // default rules no longer apply
        assert!(classifier.classify(Some("https://bit.ly/abc123")).safe);
    }

    #[test]
    fn test_empty_rule_set_only_checks_scheme() {
        let classifier = assert_ok!(UrlClassifier::from_config(&ClassifierConfig {
            unsafe_patterns: Vec::new(),
        }));
        assert!(classifier.classify(Some("https://free.ru")).safe);
        assert_eq!(
            classifier.classify(Some("http://free.ru")).reason,
            VerdictReason::NotHttps
        );
    }

    #[test]
    fn test_invalid_pattern_fails_to_compile() {
        let config = ClassifierConfig {
            unsafe_patterns: vec![PatternConfig {
                name: "broken".to_string(),
                pattern: "(unclosed".to_string(),
            }],
        };
        assert_err!(UrlClassifier::from_config(&config));
    }
}
