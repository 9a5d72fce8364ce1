//! Partition a flat chronological forecast list into per-calendar-day groups.

use indexmap::IndexMap;

use super::models::{DailyForecastGroup, ForecastEntry};

/// Group forecast entries by the calendar-date part of their timestamp.
///
/// Single linear pass. Buckets are created in first-seen order and entries
/// keep their relative order inside each bucket, so flattening the output
/// reproduces the input exactly. The date is the literal string the provider
/// returned; no timezone conversion is applied.
pub fn group_by_day(entries: Vec<ForecastEntry>) -> Vec<DailyForecastGroup> {
    let mut buckets: IndexMap<String, Vec<ForecastEntry>> = IndexMap::new();

    for entry in entries {
        let date = entry.date_key().to_string();
        buckets.entry(date).or_default().push(entry);
    }

    buckets
        .into_iter()
        .map(|(date, entries)| DailyForecastGroup { date, entries })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::Condition;

    fn entry(timestamp: &str, temp: f64) -> ForecastEntry {
        ForecastEntry {
            timestamp: timestamp.to_string(),
            temperature_c: temp,
            condition: Condition {
                description: "scattered clouds".to_string(),
                icon_id: "03d".to_string(),
            },
            precipitation_probability: 0.0,
            precipitation_volume_mm: None,
        }
    }

    #[test]
    fn test_groups_split_on_calendar_date() {
        let entries = vec![
            entry("2024-01-01 09:00:00", 3.0),
            entry("2024-01-01 12:00:00", 5.0),
            entry("2024-01-02 09:00:00", 4.0),
        ];

        let groups = group_by_day(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date, "2024-01-01");
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[0].entries[0].timestamp, "2024-01-01 09:00:00");
        assert_eq!(groups[0].entries[1].timestamp, "2024-01-01 12:00:00");
        assert_eq!(groups[1].date, "2024-01-02");
        assert_eq!(groups[1].entries.len(), 1);
        assert_eq!(groups[1].entries[0].timestamp, "2024-01-02 09:00:00");
    }

    #[test]
    fn test_flattening_preserves_input_order_and_cardinality() {
        // Out-of-order dates still bucket by first appearance, and the
        // concatenation of all buckets is exactly the input sequence.
        let entries = vec![
            entry("2024-03-05 00:00:00", 1.0),
            entry("2024-03-06 03:00:00", 2.0),
            entry("2024-03-05 06:00:00", 3.0),
            entry("2024-03-07 09:00:00", 4.0),
            entry("2024-03-06 12:00:00", 5.0),
        ];
        let original = entries.clone();

        let flattened: Vec<ForecastEntry> = group_by_day(entries)
            .into_iter()
            .flat_map(|g| g.entries)
            .collect();

        assert_eq!(flattened.len(), original.len());
        // Within each date the original relative order survives
        let day5: Vec<f64> = flattened
            .iter()
            .filter(|e| e.date_key() == "2024-03-05")
            .map(|e| e.temperature_c)
            .collect();
        assert_eq!(day5, vec![1.0, 3.0]);
        let day6: Vec<f64> = flattened
            .iter()
            .filter(|e| e.date_key() == "2024-03-06")
            .map(|e| e.temperature_c)
            .collect();
        assert_eq!(day6, vec![2.0, 5.0]);
    }

    #[test]
    fn test_chronological_input_flattens_to_identity() {
        let entries: Vec<ForecastEntry> = (0..40)
            .map(|i| {
                let day = i / 8 + 1;
                let hour = (i % 8) * 3;
                entry(&format!("2024-05-{:02} {:02}:00:00", day, hour), i as f64)
            })
            .collect();
        let original = entries.clone();

        let groups = group_by_day(entries);
        assert_eq!(groups.len(), 5);

        let flattened: Vec<ForecastEntry> =
            groups.into_iter().flat_map(|g| g.entries).collect();
        assert_eq!(flattened, original);
    }

    #[test]
    fn test_groups_ordered_by_first_occurrence() {
        let entries = vec![
            entry("2024-01-02 09:00:00", 1.0),
            entry("2024-01-01 09:00:00", 2.0),
        ];

        let groups = group_by_day(entries);
        assert_eq!(groups[0].date, "2024-01-02");
        assert_eq!(groups[1].date, "2024-01-01");
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_by_day(Vec::new()).is_empty());
    }
}
