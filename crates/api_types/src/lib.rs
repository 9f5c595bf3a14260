use serde::{Deserialize, Serialize};

/// A hypermedia link attached to a resource view.
///
/// Every successful response decorates its payload with a `self` link
/// pointing back at the resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    pub fn self_to(href: String) -> Self {
        Self {
            rel: "self".to_string(),
            href,
        }
    }
}

pub mod datetime {
    use chrono::NaiveDateTime;

    /// Fixed wire pattern for timestamps.
    ///
    /// The trailing `Z` is a literal: values are local wall-clock times,
    /// not UTC, and are never converted across zones.
    pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

    const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

    pub fn to_wire(value: &NaiveDateTime) -> String {
        value.format(WIRE_FORMAT).to_string()
    }

    /// Parses the wire pattern.
    ///
    /// A numeric offset suffix (`.SSS±hhmm`) is tolerated on input; the
    /// clock fields are taken as written and the offset discarded.
    pub fn from_wire(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(value, WIRE_FORMAT).or_else(|err| {
            chrono::DateTime::parse_from_str(value, OFFSET_FORMAT)
                .map(|dt| dt.naive_local())
                .map_err(|_| err)
        })
    }

    /// Serde adapter for required timestamp fields.
    pub mod wire {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&super::to_wire(value))
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = String::deserialize(deserializer)?;
            super::from_wire(&raw).map_err(D::Error::custom)
        }
    }

    /// Serde adapter for nullable timestamp fields.
    pub mod wire_opt {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(value) => serializer.serialize_some(&super::to_wire(value)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::from_wire(&raw).map(Some).map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }
}

pub mod guest {
    use super::*;

    /// Request body for registering a guest.
    ///
    /// `total_spent_minor` is never client-supplied: it is owned by the
    /// expense recompute pass.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GuestNew {
        pub name: String,
        pub document: String,
        pub phone: String,
    }

    /// Request body for updating a guest.
    ///
    /// The id, when present, must match the id addressed in the path.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct GuestUpdate {
        pub id: Option<i64>,
        pub name: String,
        pub document: String,
        pub phone: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GuestView {
        pub id: Option<i64>,
        pub name: String,
        pub document: String,
        pub phone: String,
        /// Accumulated stay cost in minor currency units.
        pub total_spent_minor: i64,
        #[serde(default)]
        pub links: Vec<Link>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GuestDeleted {
        pub message: String,
    }
}

pub mod checkin {
    use super::*;
    use chrono::NaiveDateTime;

    /// Request body for recording a stay.
    ///
    /// All four fields are required; timestamps use the fixed wire pattern
    /// (see [`crate::datetime`]).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CheckinNew {
        pub guest_id: i64,
        #[serde(with = "crate::datetime::wire")]
        pub entry_time: NaiveDateTime,
        #[serde(with = "crate::datetime::wire")]
        pub exit_time: NaiveDateTime,
        pub vehicle_surcharge: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CheckinView {
        pub id: Option<i64>,
        pub guest: guest::GuestView,
        #[serde(with = "crate::datetime::wire")]
        pub entry_time: NaiveDateTime,
        #[serde(with = "crate::datetime::wire_opt")]
        pub exit_time: Option<NaiveDateTime>,
        pub vehicle_surcharge: bool,
        #[serde(default)]
        pub links: Vec<Link>,
    }
}

#[cfg(test)]
mod tests {
    use super::datetime;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn wire_pattern_round_trips() {
        let value = NaiveDate::from_ymd_opt(2024, 6, 7)
            .unwrap()
            .and_hms_milli_opt(14, 0, 0, 0)
            .unwrap();
        let raw = datetime::to_wire(&value);
        assert_eq!(raw, "2024-06-07T14:00:00.000Z");
        assert_eq!(datetime::from_wire(&raw).unwrap(), value);
    }

    #[test]
    fn offset_suffix_keeps_clock_fields() {
        let parsed = datetime::from_wire("2024-06-07T14:00:00.000-0300").unwrap();
        assert_eq!(parsed.hour(), 14);
        assert_eq!(parsed.minute(), 0);
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(datetime::from_wire("07/06/2024 14:00").is_err());
        assert!(datetime::from_wire("2024-06-07T14:00:00").is_err());
    }

    #[test]
    fn checkin_new_requires_all_four_fields() {
        let missing_exit = serde_json::from_str::<crate::checkin::CheckinNew>(
            r#"{"guest_id":1,"entry_time":"2024-06-07T14:00:00.000Z","vehicle_surcharge":false}"#,
        );
        assert!(missing_exit.is_err());
    }

    #[test]
    fn checkin_new_parses_wire_timestamps() {
        let parsed = serde_json::from_str::<crate::checkin::CheckinNew>(
            r#"{
                "guest_id": 1,
                "entry_time": "2024-06-07T14:00:00.000-0300",
                "exit_time": "2024-06-09T17:00:00.000Z",
                "vehicle_surcharge": true
            }"#,
        )
        .unwrap();

        assert_eq!(parsed.entry_time.hour(), 14);
        assert_eq!(
            parsed.exit_time.date(),
            NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()
        );
        assert!(parsed.vehicle_surcharge);
    }
}
