use crate::aggregate::{
    DEFAULT_TOP_PLACES, available_years, filter_by_year, group_boba_by_month, group_by_month,
    group_by_type, most_visited_place, share_percent, top_places, unique_brands, unique_flavors,
    unique_items, unique_places,
};
use crate::models::{
    DrinkDetails, DrinkRecord, DrinkType, HistoryEntry, HistoryMonth, HistoryResponse,
    MonthBreakdown, MonthKey, MonthPoint, StatsResponse, Suggestions, TypeCount, TypeShare,
    YearsResponse,
};
use crate::normalize::title_case;
use chrono::{Datelike, Local, TimeZone};
use std::collections::BTreeMap;

const CHART_MONTHS: usize = 12;

/// History tab: newest month first, entries inside a month in stored order.
pub fn build_history<Tz: TimeZone>(drinks: &[DrinkRecord], tz: &Tz) -> HistoryResponse {
    let mut months: BTreeMap<MonthKey, Vec<HistoryEntry>> = BTreeMap::new();
    for drink in drinks {
        months
            .entry(drink.month_key(tz))
            .or_default()
            .push(history_entry(drink));
    }

    HistoryResponse {
        total: drinks.len(),
        months: months
            .into_iter()
            .rev()
            .map(|(key, drinks)| HistoryMonth {
                key: key.to_string(),
                label: key.long_label(),
                count: drinks.len(),
                drinks,
            })
            .collect(),
    }
}

fn history_entry(drink: &DrinkRecord) -> HistoryEntry {
    let (headline, detail) = match &drink.details {
        DrinkDetails::Venue { place, item } => (display(place), display(item)),
        DrinkDetails::Brand { brand, flavor } => (display(brand), display(flavor)),
        DrinkDetails::Legacy { size } => (None, size.as_ref().map(|size| format!("Size: {size}"))),
    };

    HistoryEntry {
        id: drink.id,
        kind: drink.kind,
        emoji: drink.kind.emoji(),
        type_label: drink.kind.label(),
        headline,
        detail,
        timestamp: drink.timestamp,
    }
}

fn display(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(title_case(value))
    }
}

/// Stats tab for one year, or for everything when `year` is `None`.
pub fn build_stats<Tz: TimeZone>(
    drinks: &[DrinkRecord],
    year: Option<i32>,
    tz: &Tz,
) -> StatsResponse {
    let drinks = filter_by_year(drinks, year, tz);
    let total = drinks.len();
    let by_type = group_by_type(&drinks);

    let type_cards = DrinkType::ALL
        .into_iter()
        .map(|kind| {
            let label = kind.label();
            let count = by_type.get(&label).copied().unwrap_or(0);
            TypeCount { kind, label, count }
        })
        .collect();

    let boba_months = group_boba_by_month(&drinks, tz);
    let skip = boba_months.len().saturating_sub(CHART_MONTHS);
    let boba_monthly = boba_months
        .into_iter()
        .skip(skip)
        .map(|(key, group)| MonthPoint {
            key: key.to_string(),
            label: group.label,
            count: group.count,
        })
        .collect();

    let monthly_breakdown = group_by_month(&drinks, tz)
        .into_iter()
        .rev()
        .map(|(key, group)| MonthBreakdown {
            key: key.to_string(),
            types: shares(&group.types, group.count),
            label: group.label,
            count: group.count,
        })
        .collect();

    StatsResponse {
        year,
        total,
        type_cards,
        by_type: shares(&by_type, total),
        most_visited: most_visited_place(&drinks),
        top_places: top_places(&drinks, DEFAULT_TOP_PLACES),
        boba_monthly,
        monthly_breakdown,
    }
}

fn shares(counts: &BTreeMap<String, usize>, total: usize) -> Vec<TypeShare> {
    counts
        .iter()
        .map(|(label, &count)| TypeShare {
            label: label.clone(),
            count,
            percent: share_percent(count, total),
        })
        .collect()
}

pub fn build_years(drinks: &[DrinkRecord]) -> YearsResponse {
    build_years_at(Local::now().year(), drinks, &Local)
}

/// Years with data, newest first. The current year is preselected when it
/// has drinks; otherwise the selector starts on "all".
pub fn build_years_at<Tz: TimeZone>(
    current_year: i32,
    drinks: &[DrinkRecord],
    tz: &Tz,
) -> YearsResponse {
    let years = available_years(drinks, tz);
    let default_year = years.contains(&current_year).then_some(current_year);
    YearsResponse {
        years,
        default_year,
    }
}

pub fn build_suggestions(drinks: &[DrinkRecord]) -> Suggestions {
    Suggestions {
        places: unique_places(drinks),
        items: unique_items(drinks),
        brands: unique_brands(drinks),
        flavors: unique_flavors(drinks),
    }
}

/// Parses the `year` query value. Blank means every year.
pub fn parse_year(raw: Option<&str>) -> Result<Option<i32>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| format!("invalid year: {value}")),
    }
}
