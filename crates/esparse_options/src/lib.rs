//! esparse_options: parser configuration.
//!
//! [`ParserOptions`] is the whole configuration surface of a parse. It can be
//! built in code or loaded from a JSON file whose keys are the camelCase
//! field names, e.g. `{"ecmaVersion": "es2017", "strict": true}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The ECMAScript edition whose syntax the parser accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcmaVersion {
    Es5,
    Es2015,
    Es2016,
    Es2017,
    Es2018,
    Es2019,
    Es2020,
    Es2021,
    Es2022,
    Latest,
}

impl EcmaVersion {
    pub const ALL: [EcmaVersion; 10] = [
        EcmaVersion::Es5,
        EcmaVersion::Es2015,
        EcmaVersion::Es2016,
        EcmaVersion::Es2017,
        EcmaVersion::Es2018,
        EcmaVersion::Es2019,
        EcmaVersion::Es2020,
        EcmaVersion::Es2021,
        EcmaVersion::Es2022,
        EcmaVersion::Latest,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EcmaVersion::Es5 => "es5",
            EcmaVersion::Es2015 => "es2015",
            EcmaVersion::Es2016 => "es2016",
            EcmaVersion::Es2017 => "es2017",
            EcmaVersion::Es2018 => "es2018",
            EcmaVersion::Es2019 => "es2019",
            EcmaVersion::Es2020 => "es2020",
            EcmaVersion::Es2021 => "es2021",
            EcmaVersion::Es2022 => "es2022",
            EcmaVersion::Latest => "latest",
        }
    }

    /// The edition as it is named in diagnostics ("ES2015").
    pub fn display_name(self) -> &'static str {
        match self {
            EcmaVersion::Es5 => "ES5",
            EcmaVersion::Es2015 => "ES2015",
            EcmaVersion::Es2016 => "ES2016",
            EcmaVersion::Es2017 => "ES2017",
            EcmaVersion::Es2018 => "ES2018",
            EcmaVersion::Es2019 => "ES2019",
            EcmaVersion::Es2020 => "ES2020",
            EcmaVersion::Es2021 => "ES2021",
            EcmaVersion::Es2022 => "ES2022",
            EcmaVersion::Latest => "ESNext",
        }
    }
}

impl Default for EcmaVersion {
    fn default() -> Self {
        EcmaVersion::Latest
    }
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcmaVersion {
    type Err = OptionsError;

    /// Accepts `es5`, `es2015`..`es2022`, `latest`, and the edition numbers
    /// `5`, `6`..`13` and `2015`..`2022`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let name = lower.strip_prefix("es").unwrap_or(&lower);
        let version = match name {
            "5" => EcmaVersion::Es5,
            "6" | "2015" => EcmaVersion::Es2015,
            "7" | "2016" => EcmaVersion::Es2016,
            "8" | "2017" => EcmaVersion::Es2017,
            "9" | "2018" => EcmaVersion::Es2018,
            "10" | "2019" => EcmaVersion::Es2019,
            "11" | "2020" => EcmaVersion::Es2020,
            "12" | "2021" => EcmaVersion::Es2021,
            "13" | "2022" => EcmaVersion::Es2022,
            "latest" | "next" => EcmaVersion::Latest,
            _ => return Err(OptionsError::UnknownEcmaVersion(s.to_string())),
        };
        Ok(version)
    }
}

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    /// Highest edition whose syntax is accepted.
    pub ecma_version: EcmaVersion,
    /// Parse scripts as strict mode code from the start.
    pub strict: bool,
    /// Non-standard syntax: concise function bodies and `for each`.
    pub syntax_extensions: bool,
    /// Scripting mode: `#` starts a line comment.
    pub scripting: bool,
    /// Parse `const` declarations as `var`.
    pub const_as_var: bool,
    /// Accept `for (var i = init in obj)` in sloppy mode.
    pub legacy_for_in_initializer: bool,
    /// Skip a `#!` line at the start of the source.
    pub shebang: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ecma_version: EcmaVersion::Latest,
            strict: false,
            syntax_extensions: false,
            scripting: false,
            const_as_var: false,
            legacy_for_in_initializer: true,
            shebang: true,
        }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ecma_version(mut self, version: EcmaVersion) -> Self {
        self.ecma_version = version;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_syntax_extensions(mut self, enabled: bool) -> Self {
        self.syntax_extensions = enabled;
        self
    }

    pub fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting = enabled;
        self
    }

    pub fn with_const_as_var(mut self, enabled: bool) -> Self {
        self.const_as_var = enabled;
        self
    }

    pub fn with_legacy_for_in_initializer(mut self, enabled: bool) -> Self {
        self.legacy_for_in_initializer = enabled;
        self
    }

    /// Whether syntax introduced in `version` is accepted.
    #[inline]
    pub fn supports(&self, version: EcmaVersion) -> bool {
        self.ecma_version >= version
    }

    #[inline]
    pub fn es6(&self) -> bool {
        self.supports(EcmaVersion::Es2015)
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

/// Errors raised while loading options.
#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("cannot read options file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown ECMAScript version '{0}'")]
    UnknownEcmaVersion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParserOptions::default();
        assert_eq!(options.ecma_version, EcmaVersion::Latest);
        assert!(!options.strict);
        assert!(options.legacy_for_in_initializer);
        assert!(options.shebang);
    }

    #[test]
    fn test_from_json_partial() {
        let options =
            ParserOptions::from_json_str(r#"{"ecmaVersion": "es2017", "constAsVar": true}"#).unwrap();
        assert_eq!(options.ecma_version, EcmaVersion::Es2017);
        assert!(options.const_as_var);
        assert!(!options.scripting);
        assert!(options.supports(EcmaVersion::Es2016));
        assert!(!options.supports(EcmaVersion::Es2018));
    }

    #[test]
    fn test_from_json_rejects_unknown_version() {
        let err = ParserOptions::from_json_str(r#"{"ecmaVersion": "es3"}"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
    }

    #[test]
    fn test_version_from_str() {
        assert_eq!("ES6".parse::<EcmaVersion>().unwrap(), EcmaVersion::Es2015);
        assert_eq!("2020".parse::<EcmaVersion>().unwrap(), EcmaVersion::Es2020);
        assert_eq!("latest".parse::<EcmaVersion>().unwrap(), EcmaVersion::Latest);
        assert!("es4".parse::<EcmaVersion>().is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ParserOptions::from_json_file("/nonexistent/esparse.json").unwrap_err();
        assert!(err.to_string().contains("cannot read options file"));
    }
}
