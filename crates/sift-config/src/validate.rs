//! Configuration validation.
//!
//! Reports settings that load fine but are unlikely to be what was meant.

use std::fmt;

use crate::Config;

/// A non-fatal problem with the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigWarning {
    /// No fields are configured and unknown fields are rejected, so every
    /// query parses to nothing.
    NoFieldsDefined,
    /// A default field is missing from `fields`.
    DefaultFieldNotListed {
        /// The default field.
        field: String,
    },
    /// A tokenized field is missing from `fields`.
    TokenizedFieldNotListed {
        /// The tokenized field.
        field: String,
    },
    /// An analyzer is configured for a field that is missing from `fields`.
    AnalyzerFieldNotListed {
        /// The field.
        field: String,
    },
    /// The fuzzy similarity is outside `[0, 1)`.
    FuzzySimilarityOutOfRange {
        /// The configured value.
        value: f32,
    },
    /// `max_clauses` is zero, so multi-field queries always come out empty.
    ZeroMaxClauses,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFieldsDefined => write!(f, "no fields are defined in configuration"),
            Self::DefaultFieldNotListed { field } => {
                write!(f, "default field '{field}' is not listed in fields")
            }
            Self::TokenizedFieldNotListed { field } => {
                write!(f, "tokenized field '{field}' is not listed in fields")
            }
            Self::AnalyzerFieldNotListed { field } => {
                write!(f, "analyzer configured for unknown field '{field}'")
            }
            Self::FuzzySimilarityOutOfRange { value } => {
                write!(f, "fuzzy_min_similarity {value} is outside [0, 1)")
            }
            Self::ZeroMaxClauses => write!(f, "max_clauses is 0"),
        }
    }
}

/// Validates `config`, returning warnings in a stable order.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let parser = &config.parser;
    let mut warnings = Vec::new();

    if parser.fields.is_empty() && parser.default_fields.is_empty() && !parser.allow_any_fields {
        warnings.push(ConfigWarning::NoFieldsDefined);
    }

    // With no `fields` list every name below is unchecked.
    if !parser.fields.is_empty() {
        let listed = &parser.fields;

        for field in parser.default_fields.iter().filter(|f| !listed.contains(f)) {
            warnings.push(ConfigWarning::DefaultFieldNotListed {
                field: field.clone(),
            });
        }
        for field in parser.tokenized_fields.iter().flatten().filter(|f| !listed.contains(f)) {
            warnings.push(ConfigWarning::TokenizedFieldNotListed {
                field: field.clone(),
            });
        }
        for field in config.analysis.fields.keys() {
            if !listed.contains(field) && !parser.default_fields.contains(field) {
                warnings.push(ConfigWarning::AnalyzerFieldNotListed {
                    field: field.clone(),
                });
            }
        }
    }

    if !(0.0..1.0).contains(&parser.fuzzy_min_similarity) {
        warnings.push(ConfigWarning::FuzzySimilarityOutOfRange {
            value: parser.fuzzy_min_similarity,
        });
    }

    if parser.max_clauses == 0 {
        warnings.push(ConfigWarning::ZeroMaxClauses);
    }

    warnings
}
