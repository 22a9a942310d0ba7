//! Field rule table and the field value map.
//!
//! Each category owns a fixed, ordered list of [`FieldRule`]s. Email format
//! checks are an explicit tag on the rule rather than inferred from the field
//! name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::ServiceCategory;

// =============================================================================
// Rules
// =============================================================================

/// Validation rule for a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    pub id: &'static str,
    pub required: bool,
    pub requires_email_format: bool,
}

impl FieldRule {
    const fn required(id: &'static str) -> Self {
        Self {
            id,
            required: true,
            requires_email_format: false,
        }
    }

    const fn required_email(id: &'static str) -> Self {
        Self {
            id,
            required: true,
            requires_email_format: true,
        }
    }

    const fn optional_email(id: &'static str) -> Self {
        Self {
            id,
            required: false,
            requires_email_format: true,
        }
    }
}

/// Ordered rules for one category.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldRequirement {
    pub category: ServiceCategory,
    pub rules: &'static [FieldRule],
}

impl FieldRequirement {
    pub fn required(self) -> impl Iterator<Item = &'static FieldRule> {
        self.rules.iter().filter(|r| r.required)
    }

    pub fn optional(self) -> impl Iterator<Item = &'static FieldRule> {
        self.rules.iter().filter(|r| !r.required)
    }

    pub fn rule(self, id: &str) -> Option<&'static FieldRule> {
        self.rules.iter().find(|r| r.id == id)
    }
}

static DIVORCE: [FieldRule; 6] = [
    FieldRule::required("solicitante_nome"),
    FieldRule::required("solicitante_telefone"),
    FieldRule::required_email("solicitante_email"),
    FieldRule::required("solicitado_nome"),
    FieldRule::required("solicitado_telefone"),
    FieldRule::optional_email("solicitado_email"),
];

static CIVIL_UNION_DISSOLUTION: [FieldRule; 6] = [
    FieldRule::required("srp_solicitante_nome"),
    FieldRule::required("srp_solicitante_telefone"),
    FieldRule::required_email("srp_solicitante_email"),
    FieldRule::required("srp_solicitado_nome"),
    FieldRule::required("srp_solicitado_telefone"),
    FieldRule::optional_email("srp_solicitado_email"),
];

static MARRIAGE_REGISTRATION: [FieldRule; 10] = [
    FieldRule::required("casamento_solicitante1_nome"),
    FieldRule::required("casamento_solicitante1_telefone"),
    FieldRule::required_email("casamento_solicitante1_email"),
    FieldRule::required("casamento_solicitante2_nome"),
    FieldRule::required("casamento_solicitante2_telefone"),
    FieldRule::required_email("casamento_solicitante2_email"),
    FieldRule::required("casamento_testemunha1_nome"),
    FieldRule::required("casamento_testemunha1_telefone"),
    FieldRule::required("casamento_testemunha2_nome"),
    FieldRule::required("casamento_testemunha2_telefone"),
];

static CHILD_SUPPORT: [FieldRule; 6] = [
    FieldRule::required("pensao_solicitante_nome"),
    FieldRule::required("pensao_solicitante_telefone"),
    FieldRule::required_email("pensao_solicitante_email"),
    FieldRule::required("pensao_solicitado_nome"),
    FieldRule::required("pensao_solicitado_telefone"),
    FieldRule::optional_email("pensao_solicitado_email"),
];

impl ServiceCategory {
    /// Fixed rule table for this category.
    pub fn requirement(self) -> FieldRequirement {
        let rules: &'static [FieldRule] = match self {
            ServiceCategory::Divorce => &DIVORCE,
            ServiceCategory::CivilUnionDissolution => &CIVIL_UNION_DISSOLUTION,
            ServiceCategory::MarriageRegistration => &MARRIAGE_REGISTRATION,
            ServiceCategory::ChildSupport => &CHILD_SUPPORT,
        };
        FieldRequirement {
            category: self,
            rules,
        }
    }
}

// =============================================================================
// Field values
// =============================================================================

/// Current string value of each form field, keyed by field identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(BTreeMap<String, String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.0.remove(id)
    }

    /// Raw value as entered.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Trimmed value, `None` when absent or blank.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.get(id).map(str::trim).filter(|v| !v.is_empty())
    }

    /// All entries with surrounding whitespace removed.
    pub fn trimmed(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
