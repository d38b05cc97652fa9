//! End-to-end checks: stored records in, decorated records out.

use hotel_cd_core::{
    attach_cooldown_info, format_display_date, CooldownCalculator, CooldownError, FixedClock,
    HotelEntry, HotelStore, NewHotelEntry, INVALID_DATE,
};

fn clock(y: i32, m: u32, d: u32) -> FixedClock {
    FixedClock::ymd(y, m, d).unwrap()
}

/// Records as a hash-per-record store returns them: every value a string,
/// cleared overrides as empty strings, one record missing its check-in date.
const STORED: &str = r#"[
    {
        "id": "1", "userId": "u1", "hotelName": "Hilton Shanghai",
        "checkInDate": "2025-01-01", "customCD": "", "defaultCD": "30",
        "createdAt": "2025-01-01T08:00:00.000Z", "updatedAt": "2025-01-01T08:00:00.000Z"
    },
    {
        "id": "2", "userId": "u1", "hotelName": "Park Hyatt",
        "customCD": null, "defaultCD": "30",
        "createdAt": "2025-01-02T08:00:00.000Z", "updatedAt": "2025-01-02T08:00:00.000Z"
    },
    {
        "id": "3", "userId": "u1", "hotelName": "Conrad",
        "checkInDate": "2025-01-15", "customCD": "0", "defaultCD": 30,
        "createdAt": "2025-01-15T08:00:00.000Z", "updatedAt": "2025-01-15T08:00:00.000Z"
    }
]"#;

#[test]
fn batch_with_one_broken_record() {
    let entries: Vec<HotelEntry> = serde_json::from_str(STORED).unwrap();
    let out = attach_cooldown_info(entries, clock(2025, 1, 20));

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].entry.id, "1");
    assert_eq!(out[1].entry.id, "2");
    assert_eq!(out[2].entry.id, "3");

    let first = &out[0].cd_info;
    assert!(first.error.is_none());
    assert_eq!(first.cooldown_end_date, "01月31日");
    assert_eq!(first.days_remaining, 11);
    assert!(first.is_active);
    assert_eq!(first.effective_period_days, 30);

    let second = &out[1].cd_info;
    assert_eq!(second.error, Some(CooldownError::MissingCooldownFields));
    assert_eq!(second.cooldown_end_date, INVALID_DATE);
    assert_eq!(out[1].formatted_check_in_date, INVALID_DATE);

    let third = &out[2].cd_info;
    assert!(third.error.is_none());
    assert_eq!(third.effective_period_days, 0);
    assert!(!third.is_active);
    assert_eq!(third.days_remaining, 0);
}

#[test]
fn decorated_json_keeps_passthrough_fields() {
    let entries: Vec<HotelEntry> = serde_json::from_str(STORED).unwrap();
    let out = attach_cooldown_info(entries, clock(2025, 1, 20));
    let json = serde_json::to_value(&out).unwrap();

    assert_eq!(json[0]["userId"], "u1");
    assert_eq!(json[0]["hotelName"], "Hilton Shanghai");
    assert_eq!(json[0]["formattedCheckInDate"], "01月01日");
    assert_eq!(json[0]["cdInfo"]["cdEndDate"], "01月31日");
    assert_eq!(json[1]["cdInfo"]["error"], "missing_cooldown_fields");
}

#[test]
fn same_inputs_expire_on_end_date() {
    let entries: Vec<HotelEntry> = serde_json::from_str(STORED).unwrap();
    let calc = CooldownCalculator::with_clock(clock(2025, 1, 31), 30);
    let first = calc.attach(entries.into_iter().next());
    let info = first.unwrap().cd_info;
    assert_eq!(info.days_remaining, 0);
    assert!(!info.is_active);
}

#[test]
fn store_round_trip_then_decorate() {
    let tmp = tempfile::tempdir().unwrap();
    let store = HotelStore::new(tmp.path().join("hotels.json"), 30);
    store
        .add(&NewHotelEntry {
            hotel_name: "Hilton".into(),
            check_in_date: "2025-01-01".into(),
            custom_cd: Some(60),
        })
        .unwrap();

    let out = attach_cooldown_info(store.list().unwrap(), clock(2025, 1, 20));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].cd_info.effective_period_days, 60);
    assert_eq!(out[0].cd_info.cooldown_end_date, "03月02日");
    assert_eq!(out[0].cd_info.days_remaining, 41);
}

#[test]
fn stored_record_with_blank_default_uses_store_default() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("hotels.json");
    std::fs::write(
        &path,
        r#"[{"id": "1", "hotelName": "Hilton", "checkInDate": "2025-01-01", "defaultCD": ""}]"#,
    )
    .unwrap();
    let store = HotelStore::new(&path, 30);

    let out = attach_cooldown_info(store.list().unwrap(), clock(2025, 1, 20));
    let info = &out[0].cd_info;
    assert!(info.error.is_none());
    assert!(info.is_active);
    assert_eq!(info.days_remaining, 11);
    assert_eq!(info.cooldown_end_date, "01月31日");
}

#[test]
fn formatter_is_usable_standalone() {
    assert_eq!(format_display_date("2025-07-03"), "07月03日");
    assert_eq!(format_display_date("nope"), INVALID_DATE);
}
