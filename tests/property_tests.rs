//! Property-based tests for result codes, values and entities using proptest

use photo_disk_system::core::RowExt;
use photo_disk_system::prelude::*;
use photo_disk_system::DatabaseRow;
use proptest::prelude::*;

fn any_return_value() -> impl Strategy<Value = ReturnValue> {
    prop_oneof![
        Just(ReturnValue::Ok),
        Just(ReturnValue::Error),
        Just(ReturnValue::BadParams),
        Just(ReturnValue::AlreadyExists),
        Just(ReturnValue::NotExists),
    ]
}

// ============================================================================
// Error Classification Tests
// ============================================================================

proptest! {
    /// Codes outside SQLSTATE class 23 are never treated as violations
    #[test]
    fn test_non_integrity_codes_not_violations(code in "[0-9A-Z]{5}") {
        prop_assume!(!code.starts_with("23"));
        prop_assert_eq!(Violation::from_code(&code), None);
    }

    /// Classification never panics on arbitrary input
    #[test]
    fn test_from_code_never_panics(code in ".*") {
        let _ = Violation::from_code(&code);
    }

    /// Non-violation errors always collapse to ERROR
    #[test]
    fn test_plain_errors_map_to_error(message in ".*") {
        for err in [
            DatabaseError::query(message.clone()),
            DatabaseError::connection(message.clone()),
            DatabaseError::transaction(message.clone()),
        ] {
            prop_assert_eq!(ReturnValue::from_error(&err), ReturnValue::Error);
            prop_assert_eq!(ReturnValue::from_reference_error(&err), ReturnValue::Error);
        }
    }

    /// Only foreign key failures differ between the two mappings
    #[test]
    fn test_reference_mapping_only_changes_foreign_keys(
        violation in prop_oneof![
            Just(Violation::NotNull),
            Just(Violation::Check),
            Just(Violation::Unique),
            Just(Violation::ForeignKey),
        ],
        message in "[a-z ]{0,40}",
    ) {
        let err = DatabaseError::violation(violation, message);
        let plain = ReturnValue::from_error(&err);
        let reference = ReturnValue::from_reference_error(&err);
        if violation == Violation::ForeignKey {
            prop_assert_eq!(reference, ReturnValue::NotExists);
        } else {
            prop_assert_eq!(reference, plain);
        }
        prop_assert_ne!(plain, ReturnValue::Ok);
    }
}

// ============================================================================
// Result Code Text Tests
// ============================================================================

proptest! {
    /// Parsing is case-insensitive
    #[test]
    fn test_return_value_parse_ignores_case(code in any_return_value(), upper in any::<bool>()) {
        let text = if upper {
            code.to_string()
        } else {
            code.to_string().to_lowercase()
        };
        prop_assert_eq!(text.parse::<ReturnValue>(), Ok(code));
    }

    /// Arbitrary lowercase words are rejected instead of guessed
    #[test]
    fn test_return_value_rejects_unknown(word in "[a-z]{1,12}") {
        let known = ["ok", "error", "bad_params", "already_exists", "not_exists"];
        prop_assume!(!known.contains(&word.as_str()));
        prop_assert!(word.parse::<ReturnValue>().is_err());
    }
}

// ============================================================================
// Connection Settings Tests
// ============================================================================

proptest! {
    /// Every configured field reaches the connection string
    #[test]
    fn test_connection_string_carries_settings(
        host in "[a-z][a-z0-9.]{0,20}",
        port in 1u16..,
        database in "[a-z_]{1,16}",
        user in "[a-z_]{1,16}",
    ) {
        let conn = ConnectionBuilder::new()
            .host(host.clone())
            .port(port)
            .database(database.clone())
            .username(user.clone())
            .build_connection_string();

        let host_part = format!("host={}", host);
        let port_part = format!("port={}", port);
        let db_part = format!("dbname={}", database);
        let user_part = format!("user={}", user);
        prop_assert!(conn.contains(&host_part));
        prop_assert!(conn.contains(&port_part));
        prop_assert!(conn.contains(&db_part));
        prop_assert!(conn.contains(&user_part));
    }

    /// A full URL is passed through untouched
    #[test]
    fn test_url_overrides_fields(url in "postgres://[a-z]{1,8}@[a-z]{1,8}/[a-z]{1,8}", host in "[a-z]{1,8}") {
        let conn = ConnectionBuilder::new()
            .host(host)
            .url(url.clone())
            .build_connection_string();
        prop_assert_eq!(conn, url);
    }
}

// ============================================================================
// Row Decoding Tests
// ============================================================================

proptest! {
    /// Integer columns widen to long and double without loss
    #[test]
    fn test_int_column_widens(value in any::<i32>()) {
        let mut row = DatabaseRow::new();
        row.insert("n".to_string(), DatabaseValue::from(value));
        prop_assert_eq!(row.int("n").ok(), Some(value));
        prop_assert_eq!(row.long("n").ok(), Some(value as i64));
        prop_assert_eq!(row.double("n").ok(), Some(value as f64));
    }

    /// Long columns narrow only when the value fits
    #[test]
    fn test_long_column_narrows_when_fits(value in any::<i64>()) {
        let mut row = DatabaseRow::new();
        row.insert("n".to_string(), DatabaseValue::from(value));
        prop_assert_eq!(row.int("n").ok(), i32::try_from(value).ok());
    }

    /// NULL never decodes into a typed value
    #[test]
    fn test_null_column_is_error(name in "[a-z_]{1,12}") {
        let mut row = DatabaseRow::new();
        row.insert(name.clone(), DatabaseValue::Null);
        prop_assert!(row.int(&name).is_err());
        prop_assert!(row.text(&name).is_err());
        prop_assert!(row.boolean(&name).is_err());
    }

    /// A selected photo row decodes into the same photo
    #[test]
    fn test_photo_from_row(id in 1i32.., description in ".{0,50}", size in 0i32..) {
        let mut row = DatabaseRow::new();
        row.insert("photo_id".to_string(), DatabaseValue::from(id));
        row.insert("description".to_string(), DatabaseValue::from(description.clone()));
        row.insert("size".to_string(), DatabaseValue::from(size));

        let photo = Photo::from_row(&row).expect("row should decode");
        prop_assert_eq!(photo, Photo::new(id, description, size));
    }

    /// A row missing any disk column is rejected
    #[test]
    fn test_disk_row_missing_column(missing in 0usize..5) {
        let columns = ["disk_id", "company", "speed", "free_space", "cost"];
        let mut row = DatabaseRow::new();
        for (i, column) in columns.iter().enumerate() {
            if i == missing {
                continue;
            }
            let value = if *column == "company" {
                DatabaseValue::from("DELL")
            } else {
                DatabaseValue::from(1)
            };
            row.insert(column.to_string(), value);
        }
        prop_assert!(Disk::from_row(&row).is_err());
    }
}
