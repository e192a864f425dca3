//! Syntactic admission of names, namespace IDs and subdomains.
//!
//! All predicates are pure. A [`Grammar`] holds the length limits and the
//! compiled patterns of one [`ConsensusConfig`]; it is built once and shared.

use regex::Regex;

use crate::alphabet::is_b40;
use crate::config::ConsensusConfig;
use crate::identifiers::{Name, NamespaceId, Subdomain};
use crate::validation::{ConfigError, ValidationError};

/// Compiles `pattern` so that it matches from the start of the input only.
///
/// The end of the input is anchored only if the pattern anchors it itself. A
/// `$` outside a character class also admits one trailing `\n`.
pub fn compile_prefix(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(&format!("^(?:{})", end_before_final_newline(pattern)))
        .map_err(|source| ConfigError::Pattern { field, source })
}

/// Rewrites each unescaped `$` outside a character class to `(?:\n?\z)`.
fn end_before_final_newline(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
            }
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                // A `]` right after `[` or `[^` is a literal member.
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '$' if !in_class => out.push_str(r"(?:\n?\z)"),
            _ => out.push(c),
        }
    }

    out
}

/// Name grammar bound to one configuration.
#[derive(Debug, Clone)]
pub struct Grammar {
    max_name_length: usize,
    max_namespace_id_length: usize,
    subdomain: Regex,
    address: Regex,
    token_type: Regex,
}

impl Grammar {
    /// Compiles the configured patterns.
    pub fn new(config: &ConsensusConfig) -> Result<Self, ConfigError> {
        let patterns = &config.patterns;
        let token_type = format!(
            "^{}$|{}",
            regex::escape(&patterns.native_token),
            patterns.namespace
        );
        Ok(Self {
            max_name_length: config.lengths.max_name_length,
            max_namespace_id_length: config.lengths.max_namespace_id_length,
            subdomain: compile_prefix("subdomain", &patterns.subdomain)?,
            address: compile_prefix("address", &patterns.address)?,
            token_type: compile_prefix("token_type", &token_type)?,
        })
    }

    /// Maximum length of a fully-qualified name.
    pub fn max_name_length(&self) -> usize {
        self.max_name_length
    }

    /// Maximum length of a namespace ID.
    pub fn max_namespace_id_length(&self) -> usize {
        self.max_namespace_id_length
    }

    /// Admits a fully-qualified `<name>.<namespace_id>`.
    pub fn parse_name(&self, fqn: &str) -> Result<Name, ValidationError> {
        if fqn.matches('.').count() != 1 {
            return Err(ValidationError::Separators {
                field: "name",
                value: fqn.to_string(),
                expected: 1,
            });
        }
        let (name, namespace_id) = fqn.split_once('.').unwrap_or((fqn, ""));

        if name.is_empty() || namespace_id.is_empty() {
            return Err(ValidationError::OutOfBounds {
                field: if name.is_empty() { "name" } else { "namespace_id" },
                value: 0,
            });
        }

        if !is_b40(name) || name.contains('+') || name.contains('.') {
            return Err(ValidationError::PatternMismatch {
                field: "name",
                value: name.to_string(),
            });
        }

        self.parse_namespace(namespace_id)?;

        if fqn.chars().count() > self.max_name_length {
            return Err(ValidationError::OutOfBounds {
                field: "name",
                value: fqn.chars().count(),
            });
        }

        Ok(Name::new(fqn))
    }

    /// Whether `fqn` is an admissible fully-qualified name.
    pub fn name_is_valid(&self, fqn: &str) -> bool {
        self.parse_name(fqn).is_ok()
    }

    /// Admits a namespace ID.
    pub fn parse_namespace(&self, namespace_id: &str) -> Result<NamespaceId, ValidationError> {
        if !is_b40(namespace_id) || namespace_id.contains('+') || namespace_id.contains('.') {
            return Err(ValidationError::PatternMismatch {
                field: "namespace_id",
                value: namespace_id.to_string(),
            });
        }

        let len = namespace_id.chars().count();
        if len == 0 || len > self.max_namespace_id_length {
            return Err(ValidationError::OutOfBounds {
                field: "namespace_id",
                value: len,
            });
        }

        Ok(NamespaceId::new(namespace_id))
    }

    /// Whether `namespace_id` is an admissible namespace ID.
    pub fn namespace_is_valid(&self, namespace_id: &str) -> bool {
        self.parse_namespace(namespace_id).is_ok()
    }

    /// Splits a fully-qualified subdomain address into `(subdomain_name, domain)`.
    ///
    /// Returns `None` unless `fqa` has exactly two `.` and matches the
    /// subdomain pattern. The separator count is checked before the pattern
    /// runs.
    pub fn address_is_subdomain(&self, fqa: &str) -> Option<Subdomain> {
        if fqa.matches('.').count() != 2 {
            return None;
        }

        let caps = self.subdomain.captures(fqa)?;
        let subdomain_name = caps.get(1)?.as_str().to_string();
        let domain = caps.get(2)?.as_str().to_string();
        Some(Subdomain {
            subdomain_name,
            domain,
        })
    }

    /// Like [`Grammar::address_is_subdomain`], with a reason on rejection.
    pub fn parse_subdomain(&self, fqa: &str) -> Result<Subdomain, ValidationError> {
        if fqa.matches('.').count() != 2 {
            return Err(ValidationError::Separators {
                field: "subdomain",
                value: fqa.to_string(),
                expected: 2,
            });
        }
        self.address_is_subdomain(fqa)
            .ok_or_else(|| ValidationError::PatternMismatch {
                field: "subdomain",
                value: fqa.to_string(),
            })
    }

    /// Whether `fqn` is a fully-qualified subdomain.
    pub fn is_subdomain(&self, fqn: &str) -> bool {
        self.address_is_subdomain(fqn).is_some()
    }

    pub(crate) fn address_pattern(&self) -> &Regex {
        &self.address
    }

    pub(crate) fn token_type_pattern(&self) -> &Regex {
        &self.token_type
    }
}

/// The characters after the last `.`; the empty (null) namespace if there is none.
pub fn namespace_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => "",
    }
}

/// The characters before the first `.`; `None` if the name is malformed.
pub fn name_part_of(fqn: &str) -> Option<&str> {
    fqn.split_once('.').map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grammar() -> Grammar {
        Grammar::new(&ConsensusConfig::default()).unwrap()
    }

    #[test]
    fn test_valid_names() {
        let g = grammar();
        assert!(g.name_is_valid("alice.id"));
        assert!(g.name_is_valid("a.b"));
        assert!(g.name_is_valid("bob_123-x.btc"));
    }

    #[test]
    fn test_separator_count() {
        let g = grammar();
        assert!(!g.name_is_valid("alice"));
        assert!(!g.name_is_valid("bob.alice.id"));
        assert!(matches!(
            g.parse_name("alice"),
            Err(ValidationError::Separators { expected: 1, .. })
        ));
    }

    #[test]
    fn test_empty_halves() {
        let g = grammar();
        assert!(!g.name_is_valid(".id"));
        assert!(!g.name_is_valid("alice."));
        assert!(!g.name_is_valid("."));
    }

    #[test]
    fn test_name_alphabet() {
        let g = grammar();
        assert!(!g.name_is_valid("Alice.id"));
        assert!(!g.name_is_valid("al+ice.id"));
        assert!(!g.name_is_valid("al ice.id"));
        assert!(!g.name_is_valid("alice.i+d"));
        assert!(!g.name_is_valid("alice.ID"));
    }

    #[test]
    fn test_name_length_limit() {
        let g = grammar();
        // 37 characters total, separator included.
        let ok = format!("{}.id", "a".repeat(34));
        assert_eq!(ok.len(), 37);
        assert!(g.name_is_valid(&ok));
        let too_long = format!("{}.id", "a".repeat(35));
        assert!(!g.name_is_valid(&too_long));
    }

    #[test]
    fn test_namespace_rules() {
        let g = grammar();
        assert!(g.namespace_is_valid("id"));
        assert!(g.namespace_is_valid(&"x".repeat(19)));
        assert!(!g.namespace_is_valid(&"x".repeat(20)));
        assert!(!g.namespace_is_valid(""));
        assert!(!g.namespace_is_valid("a.b"));
        assert!(!g.namespace_is_valid("a+b"));
        assert!(!g.namespace_is_valid("ID"));
    }

    #[test]
    fn test_namespace_of_uses_last_dot() {
        assert_eq!(namespace_of("alice.id"), "id");
        assert_eq!(namespace_of("bob.alice.id"), "id");
        assert_eq!(namespace_of("alice"), "");
        assert_eq!(namespace_of("alice."), "");
    }

    #[test]
    fn test_name_part_uses_first_dot() {
        assert_eq!(name_part_of("alice.id"), Some("alice"));
        assert_eq!(name_part_of("bob.alice.id"), Some("bob"));
        assert_eq!(name_part_of("alice"), None);
        assert_eq!(name_part_of(".id"), Some(""));
    }

    #[test]
    fn test_subdomain_split() {
        let g = grammar();
        let sub = g.address_is_subdomain("bob.alice.id").unwrap();
        assert_eq!(sub.subdomain_name, "bob");
        assert_eq!(sub.domain, "alice.id");
        assert!(g.is_subdomain("bob.alice.id"));
    }

    #[test]
    fn test_subdomain_rejections() {
        let g = grammar();
        assert!(g.address_is_subdomain("alice.id").is_none());
        assert!(g.address_is_subdomain("a.b.c.d").is_none());
        // Domain shorter than the pattern's three-character minimum.
        assert!(g.address_is_subdomain("bob.a.").is_none());
        assert!(g.address_is_subdomain("BOB.alice.id").is_none());
        assert!(matches!(
            g.parse_subdomain("a.b.c.d"),
            Err(ValidationError::Separators { expected: 2, .. })
        ));
    }

    #[test]
    fn test_name_projections() {
        let g = grammar();
        let name = g.parse_name("alice.id").unwrap();
        assert_eq!(name.name_part(), "alice");
        assert_eq!(name.namespace_id().as_str(), "id");
        assert_eq!(name.to_string(), "alice.id");
    }

    #[test]
    fn test_end_anchor_admits_one_trailing_newline() {
        let g = grammar();
        assert!(g.is_subdomain("bob.alice.id\n"));
        let sub = g.address_is_subdomain("bob.alice.id\n").unwrap();
        assert_eq!(sub.domain, "alice.id");
        assert!(!g.is_subdomain("bob.alice.id\n\n"));
        assert!(!g.is_subdomain("bob.alice.id\nx"));

        let re = compile_prefix("test", "[a-z]+$").unwrap();
        assert!(re.is_match("abc\n"));
        assert!(!re.is_match("abc\n\n"));
    }

    #[test]
    fn test_dollar_rewrite_leaves_escapes_and_classes() {
        assert_eq!(end_before_final_newline("^a$"), r"^a(?:\n?\z)");
        assert_eq!(end_before_final_newline(r"a\$"), r"a\$");
        assert_eq!(end_before_final_newline("[$]"), "[$]");
        assert_eq!(end_before_final_newline("[]$]$"), r"[]$](?:\n?\z)");
        assert_eq!(end_before_final_newline("[^]$]"), "[^]$]");

        let literal = compile_prefix("test", r"a\$").unwrap();
        assert!(literal.is_match("a$"));
        assert!(!literal.is_match("a"));
    }

    #[test]
    fn test_prefix_match() {
        let re = compile_prefix("test", "ab").unwrap();
        assert!(re.is_match("abc"));
        assert!(!re.is_match("cab"));
        let anchored = compile_prefix("test", "ab$").unwrap();
        assert!(!anchored.is_match("abc"));
    }
}
