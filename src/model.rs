use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Transport mode tag from the directory listing's `data-mode` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportMode {
    Bus,
    Rail,
    Tram,
    Other(String),
}

impl TransportMode {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("bus") => Self::Bus,
            Some("rail") => Self::Rail,
            Some("tram") => Self::Tram,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other("unknown".to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Bus => "bus",
            Self::Rail => "rail",
            Self::Tram => "tram",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TransportMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Identity data from one directory list item, before the detail page is fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationStub {
    pub name: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub mode: TransportMode,
    pub url: String,
}

impl fmt::Display for LocationStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}; Latitude: {}; Longitude: {}; Mode: {}; URL: {}",
            self.name,
            opt(&self.latitude),
            opt(&self.longitude),
            self.mode,
            self.url,
        )
    }
}

/// One row of the opening-times table. Days may legitimately repeat when the
/// source lists split hours (e.g. morning and evening ranges).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningHours {
    pub day: String,
    pub hours: String,
}

/// Fields extracted from a detail page. `None` / empty means the section was
/// absent (lenient policy) or yielded nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enrichment {
    pub address: Option<String>,
    pub opening_times: Vec<OpeningHours>,
    pub capacity: BTreeMap<String, u32>,
    pub cost: Option<String>,
    pub overnight_parking: Option<bool>,
}

/// A stub promoted with its detail-page fields. Built in one shot so no
/// half-enriched record is ever observable.
#[derive(Debug, Clone, Serialize)]
pub struct LocationRecord {
    pub name: String,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub mode: TransportMode,
    pub url: String,
    pub address: Option<String>,
    pub opening_times: Vec<OpeningHours>,
    pub capacity: BTreeMap<String, u32>,
    pub cost: Option<String>,
    pub overnight_parking: Option<bool>,
}

impl LocationRecord {
    pub fn new(stub: LocationStub, details: Enrichment) -> Self {
        Self {
            name: stub.name,
            latitude: stub.latitude,
            longitude: stub.longitude,
            mode: stub.mode,
            url: stub.url,
            address: details.address,
            opening_times: details.opening_times,
            capacity: details.capacity,
            cost: details.cost,
            overnight_parking: details.overnight_parking,
        }
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let times: Vec<String> = self
            .opening_times
            .iter()
            .map(|t| format!("{} {}", t.day, t.hours))
            .collect();
        let capacity: Vec<String> = self
            .capacity
            .iter()
            .map(|(category, count)| format!("{}={}", category, count))
            .collect();
        write!(
            f,
            "Name: {}; Latitude: {}; Longitude: {}; Mode: {}; URL: {}; Address: {}; \
             Opening Times: {}; Capacity: {}; Cost: {}; Overnight Parking: {}",
            self.name,
            opt(&self.latitude),
            opt(&self.longitude),
            self.mode,
            self.url,
            opt(&self.address),
            if times.is_empty() { "-".to_string() } else { times.join(", ") },
            if capacity.is_empty() { "-".to_string() } else { capacity.join(", ") },
            opt(&self.cost),
            match self.overnight_parking {
                Some(true) => "yes",
                Some(false) => "no",
                None => "-",
            },
        )
    }
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Sort ascending by the "spaces" capacity count. Records without a "spaces"
/// entry sort before all keyed records; the sort is stable so ties and
/// missing-key records keep their arrival order.
pub fn sort_by_spaces(records: &mut [LocationRecord]) {
    records.sort_by_key(|r| r.capacity.get("spaces").map(|&n| i64::from(n)).unwrap_or(-1));
}

// ── Tests ──
