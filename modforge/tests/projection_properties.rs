//! Property tests for the field projection engine

use chrono::{TimeZone, Utc};
use modforge::scaffold::projection::{self, DocOptions};
use modforge::scaffold::{field_type, COMMON_FIELDS};
use modforge::schema::RawColumn;
use modforge::FieldDescriptor;
use proptest::prelude::*;

const RAW_TYPES: &[&str] = &[
    "varchar(60)",
    "char(2)",
    "text",
    "int",
    "bigint(20) unsigned",
    "decimal(10,2)",
    "double",
    "tinyint(1)",
    "boolean",
    "timestamp",
    "date",
];

fn column() -> impl Strategy<Value = RawColumn> {
    (
        prop_oneof![
            "[a-z][a-z_]{0,11}",
            prop::sample::select(COMMON_FIELDS.to_vec()).prop_map(str::to_string),
        ],
        prop::sample::select(RAW_TYPES.to_vec()),
        any::<bool>(),
    )
        .prop_map(|(name, type_string, nullable)| RawColumn::new(name, type_string, nullable))
}

fn field_list() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    prop::collection::vec(column(), 1..12)
        .prop_map(|columns| field_type::normalize(&columns).unwrap())
}

fn options(include_common_fields: bool) -> DocOptions {
    DocOptions {
        include_common_fields,
        include_validation_metadata: true,
        example_timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// Every line but the last ends with the separator
fn assert_separators(fragment: &str, expected_lines: usize) {
    if expected_lines == 0 {
        assert!(fragment.is_empty());
        return;
    }
    let lines: Vec<_> = fragment.lines().collect();
    assert_eq!(lines.len(), expected_lines);
    let (last, rest) = lines.split_last().unwrap();
    assert!(rest.iter().all(|line| line.ends_with(',')));
    assert!(!last.ends_with(','));
}

fn mutable_count(fields: &[FieldDescriptor]) -> usize {
    fields.iter().filter(|f| !f.is_common()).count()
}

proptest! {
    #[test]
    fn mutable_listing_matches_filtered_count(fields in field_list()) {
        let fragment = projection::mutable_fields(&fields);
        assert_separators(&fragment, mutable_count(&fields));
        for common in COMMON_FIELDS {
            let quoted = format!("'{common}'");
            prop_assert!(!fragment.contains(&quoted));
        }
    }

    #[test]
    fn validation_rules_match_filtered_count(fields in field_list()) {
        let fragment = projection::validation_rules(&fields);
        assert_separators(&fragment, mutable_count(&fields));
        for common in COMMON_FIELDS {
            let rule_key = format!("'{common}' =>");
            prop_assert!(!fragment.contains(&rule_key));
        }
    }

    #[test]
    fn constructor_views_stay_aligned(fields in field_list()) {
        let views = projection::constructor(&fields);
        assert_separators(&views.properties, fields.len());
        assert_separators(&views.params, fields.len());
        assert_separators(&views.array_fields, fields.len());

        let names = views.params.lines().zip(views.array_fields.lines());
        for ((param, mapping), field) in names.zip(&fields) {
            let param_prefix = format!("{}:", field.name);
            let mapping_prefix = format!("'{}' =>", field.name);
            prop_assert!(param.trim_start().starts_with(&param_prefix));
            prop_assert!(mapping.trim_start().starts_with(&mapping_prefix));
        }
    }

    #[test]
    fn documentation_respects_common_flag(fields in field_list()) {
        let with_common = projection::documentation(&fields, &options(true));
        assert_separators(&with_common.properties, fields.len());

        let without_common = projection::documentation(&fields, &options(false));
        assert_separators(&without_common.properties, mutable_count(&fields));
        for field in fields.iter().filter(|f| f.is_common()) {
            let property = format!("property=\"{}\"", field.name);
            prop_assert!(with_common.properties.contains(&property));
            prop_assert!(!without_common.properties.contains(&property));
        }
    }
}
