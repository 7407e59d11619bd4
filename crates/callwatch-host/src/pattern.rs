use regex::Regex;

use crate::config::MonitorConfig;
use crate::error::ActivateError;

/// One compiled name pattern: wildcard matching by default, full regex
/// behind the config flag.
#[derive(Clone, Debug)]
pub enum NameMatcher {
    Wildcard(String),
    Pattern(Regex),
}

impl NameMatcher {
    fn compile(pattern: &str, regex: bool) -> Result<Self, ActivateError> {
        if regex {
            let compiled = Regex::new(pattern).map_err(|source| ActivateError::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })?;
            Ok(NameMatcher::Pattern(compiled))
        } else {
            Ok(NameMatcher::Wildcard(pattern.to_string()))
        }
    }

    pub fn matches(&self, input: &str) -> bool {
        match self {
            NameMatcher::Wildcard(pattern) => wildcard_match(pattern, input),
            NameMatcher::Pattern(regex) => regex.is_match(input),
        }
    }
}

/// Class and method patterns compiled together at activation; handed to the
/// instrumentation engine through the probe spec.
#[derive(Clone, Debug)]
pub struct CompiledPattern {
    class: NameMatcher,
    method: NameMatcher,
}

impl CompiledPattern {
    pub fn compile(config: &MonitorConfig) -> Result<Self, ActivateError> {
        Ok(Self {
            class: NameMatcher::compile(&config.class_pattern, config.regex)?,
            method: NameMatcher::compile(&config.method_pattern, config.regex)?,
        })
    }

    pub fn matches_class(&self, name: &str) -> bool {
        self.class.matches(name)
    }

    pub fn matches_method(&self, name: &str) -> bool {
        self.method.matches(name)
    }
}

/// `*` matches any run of characters, `?` exactly one; a pattern without
/// wildcards must match the whole input.
fn wildcard_match(pattern: &str, input: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let input: Vec<char> = input.chars().collect();
    let mut p = 0;
    let mut i = 0;
    let mut star: Option<(usize, usize)> = None;

    while i < input.len() {
        if p < pattern.len() && (pattern[p] == '?' || pattern[p] == input[i]) {
            p += 1;
            i += 1;
        } else if p < pattern.len() && pattern[p] == '*' {
            star = Some((p, i));
            p += 1;
        } else if let Some((star_p, star_i)) = star {
            // Backtrack: let the last star swallow one more character.
            p = star_p + 1;
            i = star_i + 1;
            star = Some((star_p, star_i + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == '*' {
        p += 1;
    }
    p == pattern.len()
}
