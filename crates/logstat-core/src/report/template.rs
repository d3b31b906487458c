use crate::{Error, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

lazy_static! {
    // `$$`, `$name` or `${name}`
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\$(?:(\$)|([_a-zA-Z][_a-zA-Z0-9]*)|\{([_a-zA-Z][_a-zA-Z0-9]*)\})").unwrap();
}

/// Text with `$name` placeholders
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a template from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading report template: {}", path.display());

        let source = fs::read_to_string(path).map_err(|source| Error::Template {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(source))
    }

    /// Substitute known placeholders, leaving everything else untouched.
    ///
    /// `$name` and `${name}` are replaced verbatim by their value when `name` is in `values`.
    /// `$$` is an escaped `$`. Unknown names and stray `$` signs stay as they are.
    pub fn safe_substitute(&self, values: &HashMap<&str, &str>) -> String {
        PLACEHOLDER
            .replace_all(&self.source, |caps: &Captures| {
                if caps.get(1).is_some() {
                    return "$".to_string();
                }

                let name = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .map(|m| m.as_str())
                    .unwrap_or_default();

                match values.get(name) {
                    Some(value) => (*value).to_string(),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }
}
