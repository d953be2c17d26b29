// geckolog - core/whitelist.rs
//
// Known-false-positive whitelist: an immutable ordered list of match rules
// excluding error-like lines that are known noise (browser bugs, long-lived
// extension warnings) rather than regressions.
// Core layer: accepts TOML strings, never touches the filesystem.

use crate::util::constants;
use crate::util::error::WhitelistError;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Rules
// =============================================================================

/// A single whitelist rule. Rules are evaluated in declaration order and
/// the first match excludes the line.
#[derive(Debug, Clone)]
pub enum WhitelistRule {
    /// Matches when the line starts with this exact string.
    LiteralPrefix(String),

    /// Matches when the pattern matches from the start of the line.
    /// The stored regex is anchored at construction.
    Pattern(Regex),
}

impl WhitelistRule {
    /// Build a pattern rule, anchoring the pattern at the line start.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{pattern})")).map(Self::Pattern)
    }

    fn matches(&self, line: &str) -> bool {
        match self {
            Self::LiteralPrefix(prefix) => line.starts_with(prefix.as_str()),
            Self::Pattern(re) => re.is_match(line),
        }
    }
}

// =============================================================================
// Whitelist
// =============================================================================

/// Ordered rule list. Built-in rules come first; user rules loaded from a
/// TOML file are appended after them.
#[derive(Debug)]
pub struct Whitelist {
    rules: Vec<WhitelistRule>,
}

/// Firefox CSS warning against the extension's own skin files. Since Fx 49
/// (mercurial changeset 0af3c129a366) the quotation marks around the value
/// are U+2019/U+201A instead of <'>, so both variants must match.
const FONT_FAMILY_WARNING_PATTERN: &str = r#"\[JavaScript Warning: "Expected end of value but found ['’]10['‚]\.  Error in parsing value for ['’]font-family['‚]\.  Declaration dropped\." \{file: "chrome://rpcontinued/skin/"#;

/// Long-standing strict warning from the ruleset module.
const RULESET_STRICT_WARNING: &str = "JavaScript strict warning: \
chrome://rpcontinued/content/lib/ruleset.jsm, line 151: \
ReferenceError: reference to undefined property entryPart.s";

/// The extension's own non-fatal warnings are reported elsewhere; they are
/// not test failures.
const EXTENSION_WARNING_PREFIX: &str = "[RequestPolicy] Warning:";

impl Whitelist {
    /// The built-in rule set covering known browser and extension noise.
    ///
    /// The patterns here are static and covered by the unit tests below, so
    /// a compile failure shows up as a failing test rather than a runtime
    /// panic.
    pub fn builtin() -> Self {
        let rules = vec![
            WhitelistRule::pattern(FONT_FAMILY_WARNING_PATTERN)
                .expect("builtin whitelist: invalid regex"),
            WhitelistRule::LiteralPrefix(RULESET_STRICT_WARNING.to_string()),
            WhitelistRule::LiteralPrefix(EXTENSION_WARNING_PREFIX.to_string()),
        ];
        Self { rules }
    }

    /// An empty whitelist (test hook: makes every error-like line visible).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// True when any rule matches the line. First match wins; remaining
    /// rules are not consulted.
    pub fn matches(&self, line: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(line))
    }

    /// Append user rules after the built-in rules, preserving declaration
    /// order.
    pub fn extend(&mut self, rules: Vec<WhitelistRule>) {
        self.rules.extend(rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// =============================================================================
// TOML rule loading
// =============================================================================

/// Raw TOML rule file as deserialised. Each `[[rule]]` entry carries exactly
/// one of `prefix` / `pattern`; violations are load errors, not warnings.
#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    rule: Vec<RuleDef>,
}

#[derive(Debug, Deserialize)]
struct RuleDef {
    prefix: Option<String>,
    pattern: Option<String>,
}

/// Parse a TOML string into compiled whitelist rules.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_rules_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<Vec<WhitelistRule>, WhitelistError> {
    let file: RuleFile = toml::from_str(toml_content).map_err(|e| WhitelistError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    let mut rules = Vec::with_capacity(file.rule.len());
    for (index, def) in file.rule.into_iter().enumerate() {
        let rule = match (def.prefix, def.pattern) {
            (Some(prefix), None) => WhitelistRule::LiteralPrefix(prefix),
            (None, Some(pattern)) => {
                if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
                    return Err(WhitelistError::RegexTooLong {
                        path: source_path.to_path_buf(),
                        index,
                        length: pattern.len(),
                        max_length: constants::MAX_REGEX_PATTERN_LENGTH,
                    });
                }
                WhitelistRule::pattern(&pattern).map_err(|e| WhitelistError::InvalidRegex {
                    path: source_path.to_path_buf(),
                    index,
                    pattern: pattern.clone(),
                    source: e,
                })?
            }
            (None, None) => {
                return Err(WhitelistError::MissingMatcher {
                    path: source_path.to_path_buf(),
                    index,
                })
            }
            (Some(_), Some(_)) => {
                return Err(WhitelistError::ConflictingMatchers {
                    path: source_path.to_path_buf(),
                    index,
                })
            }
        };
        rules.push(rule);
    }

    tracing::debug!(
        source = %source_path.display(),
        count = rules.len(),
        "User whitelist rules compiled"
    );

    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_rules_compile() {
        let wl = Whitelist::builtin();
        assert_eq!(wl.len(), 3);
    }

    #[test]
    fn test_extension_warning_prefix_matches() {
        let wl = Whitelist::builtin();
        assert!(wl.matches("[RequestPolicy] Warning: foo"));
        // Prefix rules never match mid-line.
        assert!(!wl.matches("prefix [RequestPolicy] Warning: foo"));
    }

    #[test]
    fn test_font_family_warning_both_quote_variants() {
        let wl = Whitelist::builtin();
        let straight = "[JavaScript Warning: \"Expected end of value but found '10'.  \
                        Error in parsing value for 'font-family'.  Declaration dropped.\" \
                        {file: \"chrome://rpcontinued/skin/common.css\" line: 1}]";
        let curly = "[JavaScript Warning: \"Expected end of value but found \u{2019}10\u{201A}.  \
                     Error in parsing value for \u{2019}font-family\u{201A}.  Declaration dropped.\" \
                     {file: \"chrome://rpcontinued/skin/common.css\" line: 1}]";
        assert!(wl.matches(straight));
        assert!(wl.matches(curly));
    }

    #[test]
    fn test_ruleset_strict_warning_matches() {
        let wl = Whitelist::builtin();
        assert!(wl.matches(
            "JavaScript strict warning: chrome://rpcontinued/content/lib/ruleset.jsm, \
             line 151: ReferenceError: reference to undefined property entryPart.s"
        ));
    }

    #[test]
    fn test_parse_rules_toml_prefix_and_pattern() {
        let toml = r#"
[[rule]]
prefix = "[RequestPolicy] known noise:"

[[rule]]
pattern = "JavaScript strict warning: .*ruleset\\.jsm"
"#;
        let rules = parse_rules_toml(toml, &PathBuf::from("rules.toml")).unwrap();
        assert_eq!(rules.len(), 2);

        let mut wl = Whitelist::empty();
        wl.extend(rules);
        assert!(wl.matches("[RequestPolicy] known noise: something"));
        assert!(wl.matches("JavaScript strict warning: chrome://x/ruleset.jsm, line 9"));
        // Pattern rules match from line start only.
        assert!(!wl.matches("note: JavaScript strict warning: chrome://x/ruleset.jsm"));
    }

    #[test]
    fn test_parse_rules_toml_rejects_invalid_regex() {
        let toml = r#"
[[rule]]
pattern = "[unclosed"
"#;
        let err = parse_rules_toml(toml, &PathBuf::from("rules.toml")).unwrap_err();
        assert!(matches!(err, WhitelistError::InvalidRegex { index: 0, .. }));
    }

    #[test]
    fn test_parse_rules_toml_rejects_missing_matcher() {
        let toml = "[[rule]]\n";
        let err = parse_rules_toml(toml, &PathBuf::from("rules.toml")).unwrap_err();
        assert!(matches!(err, WhitelistError::MissingMatcher { index: 0, .. }));
    }

    #[test]
    fn test_parse_rules_toml_rejects_conflicting_matchers() {
        let toml = r#"
[[rule]]
prefix = "a"
pattern = "b"
"#;
        let err = parse_rules_toml(toml, &PathBuf::from("rules.toml")).unwrap_err();
        assert!(matches!(err, WhitelistError::ConflictingMatchers { index: 0, .. }));
    }

    #[test]
    fn test_parse_rules_toml_rejects_oversized_pattern() {
        let toml = format!(
            "[[rule]]\npattern = \"{}\"\n",
            "a".repeat(constants::MAX_REGEX_PATTERN_LENGTH + 1)
        );
        let err = parse_rules_toml(&toml, &PathBuf::from("rules.toml")).unwrap_err();
        assert!(matches!(err, WhitelistError::RegexTooLong { index: 0, .. }));
    }

    #[test]
    fn test_empty_rule_file_yields_no_rules() {
        let rules = parse_rules_toml("", &PathBuf::from("rules.toml")).unwrap();
        assert!(rules.is_empty());
    }
}
