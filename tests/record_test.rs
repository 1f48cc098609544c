use chrono::{Duration, Local, NaiveDate, TimeZone, Utc};
use spotshelf::types::{Collection, TokenRecord, TokenState};

fn record() -> TokenRecord {
    TokenRecord {
        access_token: "A1".to_string(),
        refresh_token: "R1".to_string(),
        expires_at: Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap()
            + Duration::nanoseconds(123_456_789),
    }
}

#[test]
fn test_encode_is_versioned_json() {
    let encoded = record().encode().unwrap();
    let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

    assert_eq!(value["version"], 1);
    assert_eq!(value["access_token"], "A1");
    assert_eq!(value["refresh_token"], "R1");
    assert!(value["expires_at"].as_str().unwrap().starts_with("2024-03-01T13:00:00"));
}

#[test]
fn test_decode_restores_encoded_record() {
    let original = record();
    let decoded = TokenRecord::decode(&original.encode().unwrap()).unwrap();

    // sub-second precision survives
    assert_eq!(decoded, original);
}

#[test]
fn test_decode_rejects_unknown_version() {
    let raw = concat!(
        r#"{"version":2,"access_token":"A","refresh_token":"R","#,
        r#""expires_at":"2024-03-01T13:00:00Z"}"#
    );
    assert_eq!(TokenRecord::decode(raw), None);
}

#[test]
fn test_decode_rejects_broken_json() {
    assert_eq!(TokenRecord::decode("{\"version\":1,"), None);
}

#[test]
fn test_decode_legacy_requires_three_lines() {
    assert_eq!(TokenRecord::decode(""), None);
    assert_eq!(TokenRecord::decode("A1"), None);
    assert_eq!(TokenRecord::decode("A1\nR1"), None);
    assert_eq!(
        TokenRecord::decode("A1\nR1\n2024-03-01T13:00:00+00:00\nextra"),
        None
    );
}

#[test]
fn test_decode_legacy_with_offset() {
    let token = TokenRecord::decode("A1\nR1\n2024-03-01T14:00:00+01:00").unwrap();

    assert_eq!(token.access_token, "A1");
    assert_eq!(token.refresh_token, "R1");
    assert_eq!(
        token.expires_at,
        Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap()
    );
}

#[test]
fn test_decode_legacy_naive_timestamp_is_local_time() {
    let token = TokenRecord::decode("A1\r\nR1\r\n2024-03-01T13:00:00.250000\r\n").unwrap();

    let naive = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_milli_opt(13, 0, 0, 250)
        .unwrap();
    let expected = Local
        .from_local_datetime(&naive)
        .earliest()
        .unwrap()
        .with_timezone(&Utc);

    assert_eq!(token.refresh_token, "R1");
    assert_eq!(token.expires_at, expected);
}

#[test]
fn test_decode_legacy_rejects_bad_timestamp() {
    assert_eq!(TokenRecord::decode("A1\nR1\nyesterday"), None);
}

#[test]
fn test_token_state() {
    let token = record();
    let expires_at = token.expires_at;

    assert_eq!(TokenState::of(None, expires_at), TokenState::Missing);
    assert_eq!(
        token.state_at(expires_at - Duration::minutes(10)),
        TokenState::Valid
    );
    assert_eq!(
        token.state_at(expires_at - Duration::minutes(5)),
        TokenState::Expiring
    );
    assert_eq!(token.state_at(expires_at + Duration::days(1)), TokenState::Expiring);

    // no refresh window fits before the earliest representable instant
    let ancient = TokenRecord {
        expires_at: chrono::DateTime::<Utc>::MIN_UTC,
        ..token.clone()
    };
    assert_eq!(
        ancient.state_at(chrono::DateTime::<Utc>::MIN_UTC),
        TokenState::Expiring
    );

    let empty = TokenRecord {
        access_token: String::new(),
        ..token
    };
    assert_eq!(
        empty.state_at(expires_at - Duration::hours(1)),
        TokenState::Missing
    );
}

#[test]
fn test_collection_endpoints() {
    let endpoints: Vec<&str> = Collection::ALL.iter().map(|c| c.endpoint()).collect();
    assert_eq!(endpoints, vec!["me/albums", "me/tracks", "me/playlists"]);
    assert_eq!(Collection::LikedTracks.to_string(), "liked songs");
}
