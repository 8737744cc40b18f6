//! Name filters for the listing commands.

use regex::{Regex, RegexBuilder};

/// A case-insensitive regular expression matched against dataset or codelist
/// names.
#[derive(Debug, Clone)]
pub struct NameFilter {
    regex: Regex,
}

impl NameFilter {
    /// Compiles `pattern`, first dropping one pair of surrounding quotes so
    /// `--filter="'^(ae|dm)$'"` behaves like `--filter='^(ae|dm)$'`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(strip_quotes(pattern))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

fn strip_quotes(pattern: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = pattern
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    pattern
}
