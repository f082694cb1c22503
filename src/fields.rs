//! Display-field resolution for loosely-named spreadsheet columns.
//!
//! The upstream parser tolerates varied spreadsheet headers and does not
//! canonicalize them, so a record may carry its confirmation number under
//! `confirmation_number`, `booking_id`, or another common variation. Each
//! display column therefore consults an ordered alias list and takes the
//! first non-empty hit.

use serde_json::Value;

use crate::types::VoucherRecord;

/// Sentinel shown when no alias resolves to a usable value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Aliases for the booking confirmation number column.
pub const CONFIRMATION_ALIASES: &[&str] = &[
    "confirmation_number",
    "booking_id",
    "confirmation_id",
    "booking_number",
];

/// Aliases for the lead guest name column.
pub const GUEST_NAME_ALIASES: &[&str] =
    &["lead_passenger_name", "guest_name", "primary_guest", "name"];

/// Aliases for the hotel name column.
pub const HOTEL_ALIASES: &[&str] = &["hotel_name", "hotel", "property_name"];

/// Aliases for the check-in date column.
pub const CHECK_IN_ALIASES: &[&str] =
    &["check_in_date", "checkin_date", "arrival_date", "check_in"];

/// Resolve a display value from the first alias present in `record.data`
/// with a non-empty value. Missing keys are not an error; exhausting the
/// alias list yields [`NOT_AVAILABLE`].
pub fn resolve(record: &VoucherRecord, aliases: &[&str]) -> String {
    aliases
        .iter()
        .filter_map(|alias| record.data.get(*alias))
        .find_map(display_value)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// A value renders in the review table if it carries visible content.
/// Whitespace-only strings and nulls do not.
fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(data: Value) -> VoucherRecord {
        VoucherRecord {
            row_number: 1,
            data: data.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_first_alias_wins() {
        let record = record_with(json!({
            "confirmation_number": "ABC1",
            "booking_id": "SHOULD-NOT-SHOW"
        }));
        assert_eq!(resolve(&record, CONFIRMATION_ALIASES), "ABC1");
    }

    #[test]
    fn test_falls_through_empty_values() {
        let record = record_with(json!({
            "lead_passenger_name": "   ",
            "guest_name": "Jane Doe"
        }));
        assert_eq!(resolve(&record, GUEST_NAME_ALIASES), "Jane Doe");
    }

    #[test]
    fn test_missing_aliases_yield_sentinel() {
        let record = record_with(json!({ "unrelated_column": "value" }));
        assert_eq!(resolve(&record, HOTEL_ALIASES), NOT_AVAILABLE);

        let empty = record_with(json!({}));
        assert_eq!(resolve(&empty, CHECK_IN_ALIASES), NOT_AVAILABLE);
    }

    #[test]
    fn test_sentinel_iff_no_non_empty_alias() {
        let record = record_with(json!({
            "hotel_name": "",
            "hotel": null,
            "property_name": "Lagoon Inn"
        }));
        assert_eq!(resolve(&record, HOTEL_ALIASES), "Lagoon Inn");

        let exhausted = record_with(json!({ "hotel_name": "", "hotel": null }));
        assert_eq!(resolve(&exhausted, HOTEL_ALIASES), NOT_AVAILABLE);
    }

    #[test]
    fn test_numeric_values_render() {
        let record = record_with(json!({ "confirmation_number": 48213 }));
        assert_eq!(resolve(&record, CONFIRMATION_ALIASES), "48213");
    }

    #[test]
    fn test_sample_row_resolves_all_columns() {
        let record = record_with(json!({
            "confirmation_number": "ABC1",
            "guest_name": "Jane Doe",
            "hotel_name": "Lagoon Inn",
            "check_in_date": "2024-05-01"
        }));

        assert_eq!(record.row_number, 1);
        assert_eq!(resolve(&record, CONFIRMATION_ALIASES), "ABC1");
        assert_eq!(resolve(&record, GUEST_NAME_ALIASES), "Jane Doe");
        assert_eq!(resolve(&record, HOTEL_ALIASES), "Lagoon Inn");
        assert_eq!(resolve(&record, CHECK_IN_ALIASES), "2024-05-01");
    }
}
