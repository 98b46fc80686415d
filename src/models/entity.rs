//! Entity kinds served by the console
//!
//! Each kind gets its own cache store, remote endpoint and URL slug.

use std::fmt;

use serde::{Serialize, Serializer};

/// The record families listed in the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    PersonalLoan,
    VehicleLoan,
    BusinessLoan,
    GoldLoan,
    HomeLoan,
    Insurance,
    EducationLoan,
    Contact,
    Career,
    Agent,
    BankAggregator,
}

impl EntityKind {
    /// Every kind, in console menu order.
    pub const ALL: [EntityKind; 11] = [
        EntityKind::PersonalLoan,
        EntityKind::VehicleLoan,
        EntityKind::BusinessLoan,
        EntityKind::GoldLoan,
        EntityKind::HomeLoan,
        EntityKind::Insurance,
        EntityKind::EducationLoan,
        EntityKind::Contact,
        EntityKind::Career,
        EntityKind::Agent,
        EntityKind::BankAggregator,
    ];

    /// URL segment used by the local HTTP surface.
    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::PersonalLoan => "personal-loans",
            EntityKind::VehicleLoan => "vehicle-loans",
            EntityKind::BusinessLoan => "business-loans",
            EntityKind::GoldLoan => "gold-loans",
            EntityKind::HomeLoan => "home-loans",
            EntityKind::Insurance => "insurance",
            EntityKind::EducationLoan => "education-loans",
            EntityKind::Contact => "contacts",
            EntityKind::Career => "careers",
            EntityKind::Agent => "agents",
            EntityKind::BankAggregator => "bank-aggregators",
        }
    }

    pub fn from_slug(slug: &str) -> Option<EntityKind> {
        EntityKind::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Remote REST path (relative to the API base URL) for list queries.
    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::PersonalLoan => "personal-loan/applications",
            EntityKind::VehicleLoan => "vehicle-loan/applications",
            EntityKind::BusinessLoan => "business-loan/applications",
            EntityKind::GoldLoan => "gold-loan/applications",
            EntityKind::HomeLoan => "home-loan/applications",
            EntityKind::Insurance => "insurance/applications",
            EntityKind::EducationLoan => "education-loan/applications",
            EntityKind::Contact => "contacts",
            EntityKind::Career => "careers",
            EntityKind::Agent => "agents",
            EntityKind::BankAggregator => "bank-aggregators",
        }
    }

    /// Server field aliases for the one-line summary shown next to a record.
    pub fn headline_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::PersonalLoan => &["purpose", "loanPurpose", "employmentType"],
            EntityKind::VehicleLoan => &["vehicleModel", "vehicleType", "vehicleMake"],
            EntityKind::BusinessLoan => &["businessName", "companyName", "businessType"],
            EntityKind::GoldLoan => &["goldWeight", "goldPurity", "ornamentType"],
            EntityKind::HomeLoan => &["propertyLocation", "propertyType", "propertyValue"],
            EntityKind::Insurance => &["policyType", "insuranceType", "planName"],
            EntityKind::EducationLoan => &["courseName", "institution", "university"],
            EntityKind::Contact => &["subject", "message", "query"],
            EntityKind::Career => &["position", "jobTitle", "role"],
            EntityKind::Agent => &["agentCode", "agencyName", "region"],
            EntityKind::BankAggregator => &["bankName", "aggregatorName", "branch"],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl Serialize for EntityKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_slug_round_trip_for_every_kind() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_slug(kind.slug()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(EntityKind::from_slug("boat-loans"), None);
        assert_eq!(EntityKind::from_slug(""), None);
    }

    #[test]
    fn test_slugs_and_endpoints_are_unique() {
        let slugs: HashSet<_> = EntityKind::ALL.iter().map(|k| k.slug()).collect();
        let endpoints: HashSet<_> = EntityKind::ALL.iter().map(|k| k.endpoint()).collect();
        assert_eq!(slugs.len(), EntityKind::ALL.len());
        assert_eq!(endpoints.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_serializes_as_slug() {
        let json = serde_json::to_string(&EntityKind::BankAggregator).unwrap();
        assert_eq!(json, "\"bank-aggregators\"");
    }
}
