//! Unsafe-pattern rules.
//!
//! Rules are data: each one pairs a reason code with a compiled
//! regular expression, and the set is evaluated in configuration order.

use regex::Regex;

use crate::config::PatternConfig;
use crate::error::{RakshaError, RakshaResult};

/// A named unsafe pattern.
#[derive(Debug, Clone)]
pub struct UnsafeRule {
    name: String,
    regex: Regex,
}

impl UnsafeRule {
    /// Compile a rule from its configured form.
    pub fn compile(config: &PatternConfig) -> RakshaResult<Self> {
        let regex = Regex::new(&config.pattern).map_err(|source| RakshaError::Pattern {
            name: config.name.clone(),
            source,
        })?;

        Ok(Self {
            name: config.name.clone(),
            regex,
        })
    }

    /// Reason code reported when this rule fires.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }
}

/// Ordered collection of unsafe rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<UnsafeRule>,
}

impl RuleSet {
    /// Compile every configured pattern, failing on the first invalid one.
    pub fn compile(patterns: &[PatternConfig]) -> RakshaResult<Self> {
        let rules = patterns
            .iter()
            .map(UnsafeRule::compile)
            .collect::<RakshaResult<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// First rule, in order, that matches the URL.
    pub fn first_match(&self, url: &str) -> Option<&UnsafeRule> {
        self.rules.iter().find(|rule| rule.is_match(url))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(UnsafeRule::name)
    }
}
