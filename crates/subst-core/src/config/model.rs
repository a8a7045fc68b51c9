use serde::{Deserialize, Serialize};

/// `[substitute]` table schema
///
/// ```toml
/// [substitute]
/// occurrences = "first"   # or "all"
/// on_error = "empty"      # or "keep-token"
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstituteOptions {
    #[serde(default)]
    pub occurrences: Occurrences,
    #[serde(default)]
    pub on_error: ErrorFallback,
}

/// How many occurrences of the same `{name}` are replaced within one string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occurrences {
    /// Only the first `{name}` per string leaf
    #[default]
    First,
    /// Every `{name}` in the string leaf
    All,
}

/// What a failed resolver leaves behind in the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorFallback {
    /// Replace the token with the empty string
    #[default]
    Empty,
    /// Leave `{name}` untouched
    KeepToken,
}

/// File wrapper so options can live next to other tables
#[derive(Debug, Default, Serialize, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    substitute: SubstituteOptions,
}

impl SubstituteOptions {
    /// Parse the `[substitute]` table out of a TOML document.
    ///
    /// A document without the table yields the defaults. Other tables are
    /// ignored.
    pub fn from_toml_str(content: &str) -> crate::error::Result<Self> {
        let file: OptionsFile = toml::from_str(content)?;
        Ok(file.substitute)
    }

    /// Read options from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::SubstError::ConfigReadError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        Self::from_toml_str(&content)
    }

    /// Render as a `[substitute]` table
    pub fn to_toml_string(&self) -> crate::error::Result<String> {
        let file = OptionsFile {
            substitute: *self,
        };
        Ok(toml::to_string_pretty(&file)?)
    }

    /// Write options to a TOML file
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> crate::error::Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }
}
