//! Pure derivations over a drink sequence. Nothing here touches storage or
//! keeps state between calls; every view is rebuilt from the slice it is
//! handed.

use crate::models::{DrinkRecord, DrinkType, MonthGroup, MonthKey, PlaceVisits};
use crate::normalize::title_case;
use chrono::TimeZone;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_TOP_PLACES: usize = 5;

pub fn group_by_type(records: &[DrinkRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.kind.label()).or_insert(0) += 1;
    }
    counts
}

/// Monthly totals over every record.
pub fn group_by_month<Tz: TimeZone>(
    records: &[DrinkRecord],
    tz: &Tz,
) -> BTreeMap<MonthKey, MonthGroup> {
    group_months(records.iter(), tz)
}

/// Monthly totals over boba records only, used by the boba chart.
pub fn group_boba_by_month<Tz: TimeZone>(
    records: &[DrinkRecord],
    tz: &Tz,
) -> BTreeMap<MonthKey, MonthGroup> {
    group_months(
        records.iter().filter(|record| record.kind == DrinkType::Boba),
        tz,
    )
}

fn group_months<'a, Tz: TimeZone>(
    records: impl Iterator<Item = &'a DrinkRecord>,
    tz: &Tz,
) -> BTreeMap<MonthKey, MonthGroup> {
    let mut months: BTreeMap<MonthKey, MonthGroup> = BTreeMap::new();
    for record in records {
        let key = record.month_key(tz);
        let group = months.entry(key).or_insert_with(|| MonthGroup {
            label: key.short_label(),
            count: 0,
            types: BTreeMap::new(),
        });
        group.count += 1;
        *group.types.entry(record.kind.label()).or_insert(0) += 1;
    }
    months
}

/// Visit counts per place. Places are keyed by their title-cased form so
/// spelling variants of one shop land together; energy drinks never count.
pub fn group_by_place(records: &[DrinkRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for place in records.iter().filter_map(DrinkRecord::place) {
        let key = title_case(place.trim());
        if key.is_empty() {
            continue;
        }
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// The place with the highest visit count. Ties go to the place that sorts
/// first.
pub fn most_visited_place(records: &[DrinkRecord]) -> Option<PlaceVisits> {
    top_places(records, 1).into_iter().next()
}

pub fn top_places(records: &[DrinkRecord], limit: usize) -> Vec<PlaceVisits> {
    let mut places: Vec<PlaceVisits> = group_by_place(records)
        .into_iter()
        .map(|(place, count)| PlaceVisits { place, count })
        .collect();
    // stable: equal counts keep the map's lexicographic order
    places.sort_by(|a, b| b.count.cmp(&a.count));
    places.truncate(limit);
    places
}

pub fn available_years<Tz: TimeZone>(records: &[DrinkRecord], tz: &Tz) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().map(|record| record.year(tz)).collect();
    years.into_iter().rev().collect()
}

pub fn filter_by_year<Tz: TimeZone>(
    records: &[DrinkRecord],
    year: Option<i32>,
    tz: &Tz,
) -> Vec<DrinkRecord> {
    match year {
        None => records.to_vec(),
        Some(year) => records
            .iter()
            .filter(|record| record.year(tz) == year)
            .cloned()
            .collect(),
    }
}

pub fn unique_places(records: &[DrinkRecord]) -> Vec<String> {
    unique_values(records.iter().filter_map(DrinkRecord::place).map(title_case))
}

pub fn unique_items(records: &[DrinkRecord]) -> Vec<String> {
    unique_values(records.iter().filter_map(DrinkRecord::item).map(str::to_string))
}

pub fn unique_brands(records: &[DrinkRecord]) -> Vec<String> {
    unique_values(records.iter().filter_map(DrinkRecord::brand).map(str::to_string))
}

pub fn unique_flavors(records: &[DrinkRecord]) -> Vec<String> {
    unique_values(records.iter().filter_map(DrinkRecord::flavor).map(str::to_string))
}

fn unique_values(values: impl Iterator<Item = String>) -> Vec<String> {
    values
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `value / total` as a percentage with one decimal, or `None` for an empty
/// total.
pub fn share_percent(value: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((value as f64 / total as f64 * 1000.0).round() / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DrinkDetails;
    use chrono::{DateTime, FixedOffset, Utc};

    fn at(timestamp: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(timestamp)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn venue(id: i64, kind: DrinkType, timestamp: &str, place: &str, item: &str) -> DrinkRecord {
        DrinkRecord {
            id,
            kind,
            timestamp: at(timestamp),
            details: DrinkDetails::Venue {
                place: place.to_string(),
                item: item.to_string(),
            },
        }
    }

    fn energy(id: i64, timestamp: &str, brand: &str, flavor: &str) -> DrinkRecord {
        DrinkRecord {
            id,
            kind: DrinkType::EnergyDrink,
            timestamp: at(timestamp),
            details: DrinkDetails::Brand {
                brand: brand.to_string(),
                flavor: flavor.to_string(),
            },
        }
    }

    fn legacy(id: i64, timestamp: &str, size: &str) -> DrinkRecord {
        DrinkRecord {
            id,
            kind: DrinkType::Coffee,
            timestamp: at(timestamp),
            details: DrinkDetails::Legacy {
                size: Some(size.to_string()),
            },
        }
    }

    fn sample() -> Vec<DrinkRecord> {
        vec![
            energy(7, "2024-06-03T09:00:00Z", "Celsius", " Peach "),
            venue(6, DrinkType::Boba, "2024-06-02T18:00:00Z", "boba guys", "Taro"),
            venue(5, DrinkType::Boba, "2024-05-20T18:00:00Z", "Boba Guys", "Taro"),
            venue(4, DrinkType::Coffee, "2024-05-10T08:00:00Z", "blue bottle", "Latte"),
            venue(3, DrinkType::Tea, "2024-01-10T08:00:00Z", "Tea House", "Oolong"),
            venue(2, DrinkType::Matcha, "2023-12-31T08:00:00Z", "Cha Cha", "Latte"),
            legacy(1, "2023-03-01T08:00:00Z", "large"),
        ]
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let records: Vec<DrinkRecord> = Vec::new();
        assert!(group_by_type(&records).is_empty());
        assert!(group_by_month(&records, &Utc).is_empty());
        assert!(group_boba_by_month(&records, &Utc).is_empty());
        assert!(group_by_place(&records).is_empty());
        assert_eq!(most_visited_place(&records), None);
        assert!(top_places(&records, DEFAULT_TOP_PLACES).is_empty());
        assert!(available_years(&records, &Utc).is_empty());
        assert!(filter_by_year(&records, Some(2024), &Utc).is_empty());
        assert!(unique_places(&records).is_empty());
    }

    #[test]
    fn type_counts_cover_every_record() {
        let records = sample();
        let counts = group_by_type(&records);
        assert_eq!(counts.values().sum::<usize>(), records.len());
        assert_eq!(counts["Boba"], 2);
        assert_eq!(counts["Coffee"], 2);
        assert_eq!(counts["Energy Drink"], 1);
    }

    #[test]
    fn place_grouping_ignores_case_and_padding() {
        let records = vec![
            venue(1, DrinkType::Coffee, "2024-01-01T08:00:00Z", "blue bottle", "Latte"),
            venue(2, DrinkType::Coffee, "2024-01-02T08:00:00Z", "Blue Bottle", "Latte"),
            venue(3, DrinkType::Coffee, "2024-01-03T08:00:00Z", " blue Bottle ", "Latte"),
        ];
        let places = group_by_place(&records);
        assert_eq!(places.len(), 1);
        assert_eq!(places["Blue Bottle"], 3);
    }

    #[test]
    fn energy_drinks_never_rank_as_places() {
        let mut records = sample();
        // a venue-shaped energy drink can only come from hand-edited data
        records.push(venue(
            8,
            DrinkType::EnergyDrink,
            "2024-06-04T09:00:00Z",
            "Gas Station",
            "Monster",
        ));
        assert!(!group_by_place(&records).contains_key("Gas Station"));
        assert!(
            top_places(&records, 10)
                .iter()
                .all(|visits| visits.place != "Gas Station")
        );
        assert!(!unique_places(&records).contains(&"Gas Station".to_string()));
    }

    #[test]
    fn top_places_break_ties_lexicographically() {
        let mut records = Vec::new();
        let mut id = 0;
        for (place, visits) in [("C", 1), ("B", 3), ("A", 3)] {
            for _ in 0..visits {
                id += 1;
                records.push(venue(id, DrinkType::Coffee, "2024-01-01T08:00:00Z", place, "x"));
            }
        }

        let top = top_places(&records, 2);
        assert_eq!(
            top,
            vec![
                PlaceVisits { place: "A".into(), count: 3 },
                PlaceVisits { place: "B".into(), count: 3 },
            ]
        );
        assert_eq!(
            most_visited_place(&records),
            Some(PlaceVisits { place: "A".into(), count: 3 })
        );
    }

    #[test]
    fn most_visited_picks_highest_count() {
        let records = sample();
        assert_eq!(
            most_visited_place(&records),
            Some(PlaceVisits { place: "Boba Guys".into(), count: 2 })
        );
        assert_eq!(top_places(&records, DEFAULT_TOP_PLACES).len(), 4);
    }

    #[test]
    fn months_key_by_year_and_month() {
        let records = sample();
        let months = group_by_month(&records, &Utc);
        let keys: Vec<String> = months.keys().map(ToString::to_string).collect();
        assert_eq!(
            keys,
            vec!["2023-03", "2023-12", "2024-01", "2024-05", "2024-06"]
        );

        let june = &months[&MonthKey { year: 2024, month: 6 }];
        assert_eq!(june.label, "Jun 2024");
        assert_eq!(june.count, 2);
        assert_eq!(june.types["Boba"], 1);
        assert_eq!(june.types["Energy Drink"], 1);

        let boba = group_boba_by_month(&records, &Utc);
        assert_eq!(boba.len(), 2);
        assert!(boba.values().all(|group| group.types.keys().eq(["Boba"])));
    }

    #[test]
    fn months_follow_the_given_time_zone() {
        let records = vec![venue(1, DrinkType::Boba, "2024-01-01T03:00:00Z", "A", "x")];
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();

        let utc_keys: Vec<MonthKey> = group_by_month(&records, &Utc).into_keys().collect();
        let local_keys: Vec<MonthKey> = group_by_month(&records, &pacific).into_keys().collect();
        assert_eq!(utc_keys, vec![MonthKey { year: 2024, month: 1 }]);
        assert_eq!(local_keys, vec![MonthKey { year: 2023, month: 12 }]);
        assert_eq!(available_years(&records, &pacific), vec![2023]);
    }

    #[test]
    fn years_are_distinct_and_descending() {
        let records = sample();
        assert_eq!(available_years(&records, &Utc), vec![2024, 2023]);
    }

    #[test]
    fn filter_without_year_is_identity() {
        let records = sample();
        assert_eq!(filter_by_year(&records, None, &Utc), records);

        let only_2023 = filter_by_year(&records, Some(2023), &Utc);
        let ids: Vec<i64> = only_2023.iter().map(|record| record.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn unique_values_are_trimmed_and_sorted() {
        let records = sample();
        assert_eq!(
            unique_places(&records),
            vec!["Blue Bottle", "Boba Guys", "Cha Cha", "Tea House"]
        );
        assert_eq!(unique_items(&records), vec!["Latte", "Oolong", "Taro"]);
        assert_eq!(unique_brands(&records), vec!["Celsius"]);
        assert_eq!(unique_flavors(&records), vec!["Peach"]);
    }

    #[test]
    fn legacy_records_only_count_by_type_and_date() {
        let records = vec![legacy(1, "2023-03-01T08:00:00Z", "small")];
        assert_eq!(group_by_type(&records)["Coffee"], 1);
        assert_eq!(group_by_month(&records, &Utc).len(), 1);
        assert!(group_by_place(&records).is_empty());
        assert!(unique_items(&records).is_empty());
    }

    #[test]
    fn aggregates_are_repeatable() {
        let records = sample();
        assert_eq!(group_by_type(&records), group_by_type(&records));
        assert_eq!(group_by_month(&records, &Utc), group_by_month(&records, &Utc));
        assert_eq!(top_places(&records, 3), top_places(&records, 3));
        assert_eq!(available_years(&records, &Utc), available_years(&records, &Utc));
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        assert_eq!(share_percent(1, 3), Some(33.3));
        assert_eq!(share_percent(2, 3), Some(66.7));
        assert_eq!(share_percent(3, 3), Some(100.0));
        assert_eq!(share_percent(0, 0), None);
    }
}
