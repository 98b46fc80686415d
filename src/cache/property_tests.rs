//! Property-Based Tests for Cache Module
//!
//! Uses proptest for the key and normalization properties the stores rely on.

use proptest::prelude::*;
use serde_json::{Map, Number, Value};

use crate::cache::ListQuery;
use crate::models::{normalize, EntityKind, RecordPage};

// == Strategies ==
/// Field names drawn mostly from the server aliases the normalizer knows.
fn field_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "id", "_id", "loanId", "name", "fullName", "applicantName", "firstName",
            "lastName", "email", "mobile", "phone", "amount", "loanAmount", "sumAssured",
            "status", "applicationStatus", "createdAt", "submittedAt", "headline",
            "vehicleModel", "businessName", "goldWeight", "policyType", "courseName",
            "position", "bankName",
        ])
        .prop_map(str::to_string),
        "[a-z]{1,8}",
    ]
}

fn field_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        (-1.0e9f64..1.0e9).prop_map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
        "[ a-zA-Z0-9,_-]{0,12}".prop_map(Value::String),
    ]
}

fn raw_record_strategy() -> impl Strategy<Value = Value> {
    prop::collection::vec((field_name_strategy(), field_value_strategy()), 0..12).prop_map(
        |fields| {
            let object: Map<String, Value> = fields.into_iter().collect();
            Value::Object(object)
        },
    )
}

fn kind_strategy() -> impl Strategy<Value = EntityKind> {
    prop::sample::select(EntityKind::ALL.to_vec())
}

fn query_strategy() -> impl Strategy<Value = ListQuery> {
    (
        1u32..50,
        1u32..100,
        prop::option::of("[ a-z&=+%_]{0,10}"),
        prop::option::of("[ a-zA-Z&=_]{0,10}"),
    )
        .prop_map(|(page, limit, search, status)| ListQuery::new(page, limit, search, status))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Mapping an already-normalized record through the same mapping
    // yields the same record.
    #[test]
    fn prop_normalize_is_idempotent(kind in kind_strategy(), raw in raw_record_strategy()) {
        let once = normalize(kind, &raw);
        let serialized = serde_json::to_value(&once).unwrap();
        let twice = normalize(kind, &serialized);
        prop_assert_eq!(once, twice);
    }

    // Page decoding normalizes every record the same way `normalize` does.
    #[test]
    fn prop_page_records_match_normalize(
        kind in kind_strategy(),
        raws in prop::collection::vec(raw_record_strategy(), 0..6)
    ) {
        let body = Value::Array(raws.clone());
        let page = RecordPage::from_response(kind, &body, &ListQuery::default()).unwrap();
        prop_assert_eq!(page.records.len(), raws.len());
        for (record, raw) in page.records.iter().zip(&raws) {
            prop_assert_eq!(record, &normalize(kind, raw));
        }
        prop_assert!(page.total_pages >= 1);
    }

    // Distinct normalized queries never share a composite key,
    // equal queries always do.
    #[test]
    fn prop_cache_key_is_injective(a in query_strategy(), b in query_strategy()) {
        prop_assert_eq!(a == b, a.cache_key() == b.cache_key());
    }

    // Normalizing an already-normalized query changes nothing.
    #[test]
    fn prop_query_normalization_is_stable(q in query_strategy()) {
        let again = ListQuery::new(q.page, q.limit, q.search.clone(), q.status.clone());
        prop_assert_eq!(&again, &q);
        prop_assert_eq!(again.cache_key(), q.cache_key());
    }
}
