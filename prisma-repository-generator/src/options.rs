//! Generator options
//!
//! The payload the host compiler sends with a `generate` request: this
//! generator's own configuration block, its sibling generators, the raw
//! schema, and the parsed DMMF.

use crate::dmmf::Document;
use crate::error::GeneratorError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Provider of the upstream client generator this plugin depends on
pub const CLIENT_PROVIDER: &str = "prisma-client-js";

/// Options for one generation run
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    /// This generator's configuration block
    pub generator: GeneratorConfig,

    /// Every other generator declared in the schema
    #[serde(default)]
    pub other_generators: Vec<GeneratorConfig>,

    /// Path of the schema file
    #[serde(default)]
    pub schema_path: Option<String>,

    /// Raw schema text
    #[serde(default)]
    pub datamodel: String,

    /// Parsed data model, kept raw until extraction
    #[serde(default)]
    pub dmmf: Option<serde_json::Value>,

    /// Host compiler version
    #[serde(default)]
    pub version: Option<String>,
}

/// A `generator` block from the schema
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Block name (`generator <name> { .. }`)
    pub name: String,

    /// `provider = ..`
    pub provider: EnvValue,

    /// `output = ..`, filled with the manifest default when omitted
    #[serde(default)]
    pub output: Option<EnvValue>,

    /// Any other key/value pairs in the block
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,

    /// `previewFeatures = [..]`
    #[serde(default)]
    pub preview_features: Vec<String>,

    /// `binaryTargets = [..]`
    #[serde(default)]
    pub binary_targets: Vec<serde_json::Value>,
}

/// A value that is either literal or read from an environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawEnvValue")]
pub struct EnvValue {
    /// Literal value
    pub value: Option<String>,

    /// Name of the variable to read when `value` is unset
    pub from_env_var: Option<String>,
}

/// Wire shapes of an [`EnvValue`]; older hosts send a bare string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEnvValue {
    Literal(String),
    #[serde(rename_all = "camelCase")]
    Object {
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        from_env_var: Option<String>,
    },
}

impl From<RawEnvValue> for EnvValue {
    fn from(raw: RawEnvValue) -> Self {
        match raw {
            RawEnvValue::Literal(value) => EnvValue::literal(value),
            RawEnvValue::Object {
                value,
                from_env_var,
            } => EnvValue {
                value,
                from_env_var,
            },
        }
    }
}

impl EnvValue {
    /// A literal value
    pub fn literal(value: impl Into<String>) -> Self {
        EnvValue {
            value: Some(value.into()),
            from_env_var: None,
        }
    }

    /// Resolve to a concrete string, reading the environment if needed
    pub fn resolve(&self) -> Result<String, GeneratorError> {
        if let Some(value) = &self.value {
            return Ok(value.clone());
        }

        match &self.from_env_var {
            Some(var) => std::env::var(var).map_err(|_| {
                GeneratorError::Options(format!("environment variable not found: {}", var))
            }),
            None => Err(GeneratorError::Options(
                "value has neither a literal nor an environment variable".to_string(),
            )),
        }
    }
}

impl GeneratorOptions {
    /// Resolved output directory
    pub fn output_dir(&self) -> Result<PathBuf, GeneratorError> {
        let output = self.generator.output.as_ref().ok_or_else(|| {
            GeneratorError::Options(format!(
                "generator `{}` has no output directory",
                self.generator.name
            ))
        })?;
        Ok(PathBuf::from(output.resolve()?))
    }

    /// The sibling generator that produces the client the repositories call
    pub fn client_generator(&self) -> Option<&GeneratorConfig> {
        self.other_generators
            .iter()
            .find(|g| g.provider.resolve().is_ok_and(|p| p == CLIENT_PROVIDER))
    }

    /// Extract the parsed data model
    pub fn document(&self) -> Result<Document, GeneratorError> {
        let dmmf = self.dmmf.clone().ok_or_else(|| {
            GeneratorError::SchemaExtraction("request carries no DMMF document".to_string())
        })?;
        Document::from_json(dmmf)
    }
}
