//! Service categories offered by the intake form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::Error;

/// Which sub-form the requester picked. Serialized with the tag submitted as
/// `tipoServico`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceCategory {
    #[serde(rename = "divorcio")]
    Divorce,
    #[serde(rename = "srp")]
    CivilUnionDissolution,
    #[serde(rename = "casamento")]
    MarriageRegistration,
    #[serde(rename = "pensao")]
    ChildSupport,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 4] = [
        ServiceCategory::Divorce,
        ServiceCategory::CivilUnionDissolution,
        ServiceCategory::MarriageRegistration,
        ServiceCategory::ChildSupport,
    ];

    /// Wire tag, e.g. `divorcio`.
    pub fn tag(self) -> &'static str {
        match self {
            ServiceCategory::Divorce => "divorcio",
            ServiceCategory::CivilUnionDissolution => "srp",
            ServiceCategory::MarriageRegistration => "casamento",
            ServiceCategory::ChildSupport => "pensao",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::Divorce => "Divórcio",
            ServiceCategory::CivilUnionDissolution => "Dissolução de união estável",
            ServiceCategory::MarriageRegistration => "Habilitação de casamento",
            ServiceCategory::ChildSupport => "Pensão alimentícia",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ServiceCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        ServiceCategory::ALL
            .into_iter()
            .find(|c| c.tag().eq_ignore_ascii_case(tag))
            .ok_or_else(|| Error::unknown_category(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trips_through_from_str() {
        for category in ServiceCategory::ALL {
            assert_eq!(category.tag().parse::<ServiceCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_from_str_is_lenient_on_case_and_whitespace() {
        assert_eq!(
            " SRP ".parse::<ServiceCategory>().unwrap(),
            ServiceCategory::CivilUnionDissolution
        );
    }

    #[test]
    fn test_unknown_tag() {
        let err = "inventario".parse::<ServiceCategory>().unwrap_err();
        assert!(matches!(err, Error::UnknownCategory(tag) if tag == "inventario"));
    }

    #[test]
    fn test_serde_uses_wire_tag() {
        let json = serde_json::to_string(&ServiceCategory::ChildSupport).unwrap();
        assert_eq!(json, "\"pensao\"");
        let back: ServiceCategory = serde_json::from_str("\"casamento\"").unwrap();
        assert_eq!(back, ServiceCategory::MarriageRegistration);
    }
}
