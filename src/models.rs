use crate::normalize::{capitalize_first, title_case};
use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrinkType {
    Coffee,
    Matcha,
    Boba,
    Tea,
    EnergyDrink,
    #[serde(other)]
    Other,
}

impl DrinkType {
    /// Display order of the per-type stat cards.
    pub const ALL: [DrinkType; 6] = [
        DrinkType::Boba,
        DrinkType::Coffee,
        DrinkType::Matcha,
        DrinkType::Tea,
        DrinkType::EnergyDrink,
        DrinkType::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DrinkType::Coffee => "coffee",
            DrinkType::Matcha => "matcha",
            DrinkType::Boba => "boba",
            DrinkType::Tea => "tea",
            DrinkType::EnergyDrink => "energy-drink",
            DrinkType::Other => "other",
        }
    }

    pub fn label(self) -> String {
        match self {
            DrinkType::EnergyDrink => "Energy Drink".to_string(),
            other => capitalize_first(other.as_str()),
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            DrinkType::Coffee => "☕",
            DrinkType::Matcha => "🍵",
            DrinkType::Boba => "🧋",
            DrinkType::Tea => "🫖",
            DrinkType::EnergyDrink => "⚡️",
            DrinkType::Other => "🍹",
        }
    }

    pub fn is_energy_drink(self) -> bool {
        self == DrinkType::EnergyDrink
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind-specific half of a record. Energy drinks carry a brand, every
/// other kind carries a place; rows written before either existed only
/// have the old `size` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrinkDetails {
    Venue { place: String, item: String },
    Brand { brand: String, flavor: String },
    Legacy { size: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredDrink", into = "StoredDrink")]
pub struct DrinkRecord {
    pub id: i64,
    pub kind: DrinkType,
    pub timestamp: DateTime<Utc>,
    pub details: DrinkDetails,
}

impl DrinkRecord {
    pub fn place(&self) -> Option<&str> {
        match &self.details {
            DrinkDetails::Venue { place, .. } if !self.kind.is_energy_drink() => Some(place.as_str()),
            _ => None,
        }
    }

    pub fn item(&self) -> Option<&str> {
        match &self.details {
            DrinkDetails::Venue { item, .. } => Some(item.as_str()),
            _ => None,
        }
    }

    pub fn brand(&self) -> Option<&str> {
        match &self.details {
            DrinkDetails::Brand { brand, .. } => Some(brand.as_str()),
            _ => None,
        }
    }

    pub fn flavor(&self) -> Option<&str> {
        match &self.details {
            DrinkDetails::Brand { flavor, .. } => Some(flavor.as_str()),
            _ => None,
        }
    }

    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.timestamp.with_timezone(tz).date_naive()
    }

    pub fn year<Tz: TimeZone>(&self, tz: &Tz) -> i32 {
        self.local_date(tz).year()
    }

    pub fn month_key<Tz: TimeZone>(&self, tz: &Tz) -> MonthKey {
        MonthKey::from_date(self.local_date(tz))
    }
}

/// Flat on-disk layout, identical to what the browser page kept in
/// `localStorage["drinks"]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredDrink {
    #[serde(default)]
    id: i64,
    #[serde(rename = "type")]
    kind: DrinkType,
    #[serde(serialize_with = "serialize_millis")]
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    flavor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<String>,
}

impl From<StoredDrink> for DrinkRecord {
    fn from(stored: StoredDrink) -> Self {
        let details = if stored.kind.is_energy_drink() {
            match stored.brand {
                Some(brand) => DrinkDetails::Brand {
                    brand,
                    flavor: stored.flavor.unwrap_or_default(),
                },
                None => DrinkDetails::Legacy { size: stored.size },
            }
        } else {
            match stored.place {
                Some(place) => DrinkDetails::Venue {
                    place,
                    item: stored.item.unwrap_or_default(),
                },
                None => DrinkDetails::Legacy { size: stored.size },
            }
        };

        Self {
            id: stored.id,
            kind: stored.kind,
            timestamp: stored.timestamp,
            details,
        }
    }
}

impl From<DrinkRecord> for StoredDrink {
    fn from(record: DrinkRecord) -> Self {
        let mut stored = StoredDrink {
            id: record.id,
            kind: record.kind,
            timestamp: record.timestamp,
            place: None,
            item: None,
            brand: None,
            flavor: None,
            size: None,
        };
        match record.details {
            DrinkDetails::Venue { place, item } => {
                stored.place = Some(place);
                stored.item = non_empty(item);
            }
            DrinkDetails::Brand { brand, flavor } => {
                stored.brand = Some(brand);
                stored.flavor = non_empty(flavor);
            }
            DrinkDetails::Legacy { size } => stored.size = size,
        }
        stored
    }
}

/// Writes instants the way `Date.prototype.toISOString` does, always with
/// three fractional digits.
fn serialize_millis<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

/// Body of the log form, shared by the JSON API and the plain HTML form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDrink {
    #[serde(rename = "type")]
    pub kind: DrinkType,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub flavor: Option<String>,
}

impl NewDrink {
    /// Checks the fields the form requires for this kind and normalizes
    /// them the way they are stored.
    pub fn into_details(self) -> Result<DrinkDetails, &'static str> {
        if self.kind.is_energy_drink() {
            let brand = required(self.brand).ok_or("brand is required for energy drinks")?;
            let flavor = required(self.flavor).ok_or("flavor is required for energy drinks")?;
            Ok(DrinkDetails::Brand { brand, flavor })
        } else {
            let place = required(self.place).ok_or("place is required")?;
            let item = required(self.item).ok_or("item is required")?;
            Ok(DrinkDetails::Venue {
                place: title_case(&place),
                item,
            })
        }
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Calendar month in local time. Orders chronologically and prints as
/// `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// "Jan 2024"
    pub fn short_label(&self) -> String {
        self.format_label("%b %Y")
    }

    /// "January 2024"
    pub fn long_label(&self) -> String {
        self.format_label("%B %Y")
    }

    fn format_label(&self, pattern: &str) -> String {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(date) => date.format(pattern).to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    pub label: String,
    pub count: usize,
    pub types: std::collections::BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceVisits {
    pub place: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: DrinkType,
    pub emoji: &'static str,
    pub type_label: String,
    pub headline: Option<String>,
    pub detail: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HistoryMonth {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub drinks: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub months: Vec<HistoryMonth>,
}

#[derive(Debug, Serialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub kind: DrinkType,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TypeShare {
    pub label: String,
    pub count: usize,
    pub percent: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MonthPoint {
    pub key: String,
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct MonthBreakdown {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub types: Vec<TypeShare>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub year: Option<i32>,
    pub total: usize,
    pub type_cards: Vec<TypeCount>,
    pub by_type: Vec<TypeShare>,
    pub most_visited: Option<PlaceVisits>,
    pub top_places: Vec<PlaceVisits>,
    pub boba_monthly: Vec<MonthPoint>,
    pub monthly_breakdown: Vec<MonthBreakdown>,
}

#[derive(Debug, Serialize)]
pub struct YearsResponse {
    pub years: Vec<i32>,
    pub default_year: Option<i32>,
}

#[derive(Debug, Default, Serialize)]
pub struct Suggestions {
    pub places: Vec<String>,
    pub items: Vec<String>,
    pub brands: Vec<String>,
    pub flavors: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(default)]
    pub year: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_browser_layout_for_each_shape() {
        let raw = r#"[
            {"id": 3, "type": "energy-drink", "timestamp": "2024-05-02T10:00:00.000Z", "brand": "Celsius", "flavor": "Peach"},
            {"id": 2, "type": "boba", "timestamp": "2024-05-01T10:00:00.000Z", "place": "Boba Guys", "item": "Taro"},
            {"id": 1, "type": "coffee", "timestamp": "2023-01-01T08:00:00.000Z", "size": "large"}
        ]"#;
        let records: Vec<DrinkRecord> = serde_json::from_str(raw).unwrap();

        assert_eq!(records[0].brand(), Some("Celsius"));
        assert_eq!(records[0].place(), None);
        assert_eq!(records[1].place(), Some("Boba Guys"));
        assert_eq!(records[1].item(), Some("Taro"));
        assert_eq!(
            records[2].details,
            DrinkDetails::Legacy {
                size: Some("large".to_string())
            }
        );
    }

    #[test]
    fn energy_drink_ignores_stray_place() {
        let raw = r#"{"id": 1, "type": "energy-drink", "timestamp": "2024-05-02T10:00:00Z",
                      "brand": "Monster", "flavor": "Ultra", "place": "gas station"}"#;
        let record: DrinkRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.place(), None);

        let written = serde_json::to_value(&record).unwrap();
        assert!(written.get("place").is_none());
        assert_eq!(written["type"], "energy-drink");
    }

    #[test]
    fn unknown_type_reads_and_writes_as_other() {
        let raw = r#"{"id": 1, "type": "smoothie", "timestamp": "2024-05-02T10:00:00Z", "place": "Jamba", "item": "Razz"}"#;
        let record: DrinkRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.kind, DrinkType::Other);
        assert_eq!(serde_json::to_value(&record).unwrap()["type"], "other");
    }

    #[test]
    fn timestamps_keep_millisecond_layout() {
        let raw = r#"{"id": 1, "type": "boba", "timestamp": "2024-05-01T10:00:00.000Z", "place": "Boba Guys", "item": "Taro"}"#;
        let record: DrinkRecord = serde_json::from_str(raw).unwrap();
        let written = serde_json::to_string(&record).unwrap();
        assert!(written.contains(r#""timestamp":"2024-05-01T10:00:00.000Z""#));
    }

    #[test]
    fn missing_id_still_reads() {
        let raw = r#"{"type": "boba", "timestamp": "2024-05-01T10:00:00.000Z", "place": "Boba Guys", "item": "Taro"}"#;
        let record: DrinkRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.id, 0);
        assert_eq!(record.place(), Some("Boba Guys"));
    }

    #[test]
    fn new_drink_requires_fields_for_its_kind() {
        let energy = NewDrink {
            kind: DrinkType::EnergyDrink,
            place: Some("somewhere".into()),
            item: Some("thing".into()),
            brand: Some("  ".into()),
            flavor: Some("Original".into()),
        };
        assert!(energy.into_details().is_err());

        let boba = NewDrink {
            kind: DrinkType::Boba,
            place: Some("  boba GUYS ".into()),
            item: Some(" Taro Milk Tea ".into()),
            brand: None,
            flavor: None,
        };
        assert_eq!(
            boba.into_details().unwrap(),
            DrinkDetails::Venue {
                place: "Boba Guys".into(),
                item: "Taro Milk Tea".into()
            }
        );
    }

    #[test]
    fn month_key_orders_chronologically() {
        let earlier = MonthKey { year: 2023, month: 12 };
        let later = MonthKey { year: 2024, month: 2 };
        assert!(earlier < later);
        assert_eq!(later.to_string(), "2024-02");
        assert_eq!(later.short_label(), "Feb 2024");
        assert_eq!(later.long_label(), "February 2024");
    }

    #[test]
    fn type_labels() {
        assert_eq!(DrinkType::EnergyDrink.label(), "Energy Drink");
        assert_eq!(DrinkType::Coffee.label(), "Coffee");
    }
}
