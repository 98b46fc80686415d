//! Record normalization
//!
//! The remote API is inconsistent about field names across products (and
//! sometimes across releases of the same product). Every record is mapped
//! onto one shape here, using ordered alias lists. The first alias of each
//! list is the name the field is serialized under, so a normalized record fed
//! back through `normalize` comes out unchanged.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::models::EntityKind;

const ID_FIELDS: &[&str] = &["id", "_id", "applicationId", "loanId", "uuid"];
const NAME_FIELDS: &[&str] = &["name", "fullName", "applicantName", "customerName"];
const EMAIL_FIELDS: &[&str] = &["email", "emailId", "mail"];
const PHONE_FIELDS: &[&str] = &["phone", "mobile", "phoneNumber", "contactNumber"];
const AMOUNT_FIELDS: &[&str] = &[
    "amount",
    "loanAmount",
    "requestedAmount",
    "sumAssured",
    "coverageAmount",
];
const STATUS_FIELDS: &[&str] = &["status", "applicationStatus", "loanStatus"];
const CREATED_FIELDS: &[&str] = &["createdAt", "created_at", "submittedAt", "appliedOn", "date"];
const HEADLINE_FIELD: &str = "headline";

// == Application Status ==
/// Review state of an application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ApplicationStatus {
    #[default]
    Pending,
    UnderReview,
    Approved,
    Rejected,
    Disbursed,
    /// Anything the console has no dedicated badge for, lowercased with `_` separators
    Other(String),
}

impl ApplicationStatus {
    /// Parses a server status, tolerating case, spaces, hyphens and common synonyms.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");

        match normalized.as_str() {
            "" | "pending" | "new" | "submitted" | "open" => ApplicationStatus::Pending,
            "under_review" | "in_review" | "review" | "in_progress" | "processing" => {
                ApplicationStatus::UnderReview
            }
            "approved" | "accepted" | "sanctioned" => ApplicationStatus::Approved,
            "rejected" | "declined" | "denied" => ApplicationStatus::Rejected,
            "disbursed" | "completed" | "closed" => ApplicationStatus::Disbursed,
            _ => ApplicationStatus::Other(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Disbursed => "disbursed",
            ApplicationStatus::Other(other) => other,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// == Record ==
/// A console row in normalized form.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub status: ApplicationStatus,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    /// Server fields without a normalized counterpart, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Maps one server record onto the normalized shape.
///
/// Non-object values yield an empty record.
pub fn normalize(kind: EntityKind, raw: &Value) -> Record {
    let Some(object) = raw.as_object() else {
        return Record::default();
    };
    let mut rest = object.clone();

    let id = take_text(&mut rest, ID_FIELDS).unwrap_or_default();
    let name = take_text(&mut rest, NAME_FIELDS).or_else(|| take_split_name(&mut rest));
    let email = take_text(&mut rest, EMAIL_FIELDS);
    let phone = take_text(&mut rest, PHONE_FIELDS);
    let amount = take_field(&mut rest, AMOUNT_FIELDS, as_amount);
    let status = take_text(&mut rest, STATUS_FIELDS)
        .map(|raw| ApplicationStatus::parse(&raw))
        .unwrap_or_default();
    let created_at = take_text(&mut rest, CREATED_FIELDS);

    let mut headline_fields = Vec::with_capacity(kind.headline_fields().len() + 1);
    headline_fields.push(HEADLINE_FIELD);
    headline_fields.extend_from_slice(kind.headline_fields());
    let headline = take_text(&mut rest, &headline_fields);

    Record {
        id,
        name,
        email,
        phone,
        amount,
        status,
        created_at,
        headline,
        extra: rest,
    }
}

/// Finds the first alias carrying a usable value.
///
/// The canonical key is always removed from `rest` so it cannot collide with
/// the normalized field on output; the alias that supplied the value is removed
/// too. Other aliases stay as pass-through fields.
fn take_field<T>(
    rest: &mut Map<String, Value>,
    aliases: &[&str],
    extract: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let found = aliases
        .iter()
        .find_map(|alias| rest.get(*alias).and_then(&extract).map(|v| (*alias, v)));

    if let Some(canonical) = aliases.first() {
        rest.remove(*canonical);
    }

    found.map(|(alias, value)| {
        rest.remove(alias);
        value
    })
}

fn take_text(rest: &mut Map<String, Value>, aliases: &[&str]) -> Option<String> {
    take_field(rest, aliases, as_text)
}

fn take_split_name(rest: &mut Map<String, Value>) -> Option<String> {
    let first = rest.get("firstName").and_then(as_text);
    let last = rest.get("lastName").and_then(as_text);
    if first.is_none() && last.is_none() {
        return None;
    }
    rest.remove("firstName");
    rest.remove("lastName");
    let joined = [first, last].into_iter().flatten().collect::<Vec<_>>().join(" ");
    Some(joined)
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_start_matches(['₹', '$'])
            .replace(',', "")
            .trim()
            .parse::<f64>()
            .ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parse_synonyms() {
        assert_eq!(ApplicationStatus::parse("Approved"), ApplicationStatus::Approved);
        assert_eq!(ApplicationStatus::parse("In Review"), ApplicationStatus::UnderReview);
        assert_eq!(ApplicationStatus::parse("under-review"), ApplicationStatus::UnderReview);
        assert_eq!(ApplicationStatus::parse(" DECLINED "), ApplicationStatus::Rejected);
        assert_eq!(ApplicationStatus::parse(""), ApplicationStatus::Pending);
        assert_eq!(
            ApplicationStatus::parse("On Hold"),
            ApplicationStatus::Other("on_hold".to_string())
        );
    }

    #[test]
    fn test_normalize_uses_fallback_aliases() {
        let raw = json!({
            "_id": "64af",
            "fullName": "Asha Rao",
            "mobile": 9876543210u64,
            "loanAmount": "2,50,000",
            "applicationStatus": "Approved",
            "submittedAt": "2024-02-01T10:00:00Z",
            "employmentType": "salaried",
            "city": "Pune"
        });

        let record = normalize(EntityKind::PersonalLoan, &raw);
        assert_eq!(record.id, "64af");
        assert_eq!(record.name.as_deref(), Some("Asha Rao"));
        assert_eq!(record.phone.as_deref(), Some("9876543210"));
        assert_eq!(record.amount, Some(250000.0));
        assert_eq!(record.status, ApplicationStatus::Approved);
        assert_eq!(record.created_at.as_deref(), Some("2024-02-01T10:00:00Z"));
        assert_eq!(record.headline.as_deref(), Some("salaried"));
        assert_eq!(record.extra.get("city"), Some(&json!("Pune")));
        assert!(!record.extra.contains_key("fullName"));
    }

    #[test]
    fn test_normalize_joins_split_name() {
        let raw = json!({"id": 7, "firstName": "Ravi", "lastName": "Kumar"});
        let record = normalize(EntityKind::VehicleLoan, &raw);
        assert_eq!(record.id, "7");
        assert_eq!(record.name.as_deref(), Some("Ravi Kumar"));
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_normalize_skips_empty_canonical_value() {
        let raw = json!({"name": null, "applicantName": "  Meera  ", "status": null});
        let record = normalize(EntityKind::HomeLoan, &raw);
        assert_eq!(record.name.as_deref(), Some("Meera"));
        assert_eq!(record.status, ApplicationStatus::Pending);
        assert!(!record.extra.contains_key("name"));
    }

    #[test]
    fn test_entity_specific_headline() {
        let raw = json!({"id": "g1", "goldWeight": 24.5});
        let record = normalize(EntityKind::GoldLoan, &raw);
        assert_eq!(record.headline.as_deref(), Some("24.5"));

        let raw = json!({"id": "c1", "position": "Loan Officer"});
        let record = normalize(EntityKind::Career, &raw);
        assert_eq!(record.headline.as_deref(), Some("Loan Officer"));
    }

    #[test]
    fn test_non_object_normalizes_to_empty() {
        assert_eq!(normalize(EntityKind::Agent, &json!("oops")), Record::default());
        assert_eq!(normalize(EntityKind::Agent, &Value::Null), Record::default());
    }

    #[test]
    fn test_normalize_is_idempotent_on_example() {
        let raw = json!({
            "loanId": 99,
            "name": "Primary",
            "fullName": "Shadowed",
            "amount": "abc",
            "sumAssured": 500000,
            "status": "On Hold",
            "policyType": "term",
            "nested": {"a": 1}
        });

        let once = normalize(EntityKind::Insurance, &raw);
        let twice = normalize(EntityKind::Insurance, &serde_json::to_value(&once).unwrap());
        assert_eq!(once, twice);
        assert_eq!(once.amount, Some(500000.0));
    }
}
