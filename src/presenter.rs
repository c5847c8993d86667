//! Pure transformations from project records to display values.

use chrono::{DateTime, Utc};

use crate::models::{CardSummary, ProjectRecord, ProjectStatus, Stats, StatusStyle};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
/// Progress at or above this counts towards the success rate.
const SUCCESS_THRESHOLD: u8 = 75;

const DEFAULT_STATUS_LABEL: &str = "Nuevo";
const DEFAULT_PROGRESS_LABEL: &str = "Progreso";
const DEFAULT_BADGE: &str = "SaaS";
const DEFAULT_DESCRIPTION: &str = "Proyecto de Discovery y Estrategia";
const UNKNOWN_DATE_LABEL: &str = "Sin fecha";

/// Build the card for a single record as of `now`.
pub fn summarize(record: &ProjectRecord, now: DateTime<Utc>) -> CardSummary {
    let status = record.project_status();

    CardSummary {
        id: record.id.clone(),
        name: record.name.clone(),
        badge: non_empty_or(&record.model_type, DEFAULT_BADGE),
        description: non_empty_or(&record.main_concerns, DEFAULT_DESCRIPTION),
        status_label: record
            .status
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_STATUS_LABEL)
            .to_string(),
        status_style: status_style(status),
        progress_label: progress_label(status).to_string(),
        progress_percent: record.progress.min(100),
        relative_date_label: match record.created {
            Some(created) => relative_date_label(created, now),
            None => UNKNOWN_DATE_LABEL.to_string(),
        },
    }
}

/// Compute the counters shown above the project grid.
///
/// An empty list yields a success rate of 0.
pub fn aggregate(records: &[ProjectRecord]) -> Stats {
    let total = records.len();
    let count = |status: ProjectStatus| {
        records
            .iter()
            .filter(|r| r.project_status() == Some(status))
            .count()
    };
    let successful = records
        .iter()
        .filter(|r| r.progress >= SUCCESS_THRESHOLD)
        .count();

    let success_rate_percent = if total == 0 {
        0
    } else {
        // round(100 * successful / total), halves rounding up
        ((200 * successful + total) / (2 * total)) as u8
    };

    Stats {
        total,
        discovery_count: count(ProjectStatus::Discovery),
        strategy_count: count(ProjectStatus::Strategy),
        success_rate_percent,
    }
}

pub fn status_style(status: Option<ProjectStatus>) -> StatusStyle {
    match status {
        Some(ProjectStatus::Discovery) => StatusStyle::Blue,
        Some(ProjectStatus::Strategy) => StatusStyle::Green,
        Some(ProjectStatus::Exploration) => StatusStyle::Purple,
        None => StatusStyle::Gray,
    }
}

fn progress_label(status: Option<ProjectStatus>) -> &'static str {
    match status {
        Some(ProjectStatus::Discovery) => "Discovery",
        Some(ProjectStatus::Strategy) => "Estrategia",
        Some(ProjectStatus::Exploration) => "Exploración",
        None => DEFAULT_PROGRESS_LABEL,
    }
}

/// Human label for how long ago `created` was.
///
/// The day count is the absolute difference rounded up to whole days, so a
/// timestamp in the future reads the same as one equally far in the past.
/// Older dates are shown as `d/m/yyyy` on the UTC calendar, not the host's
/// local one, so the label is the same wherever it is rendered.
pub fn relative_date_label(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff_ms = (now - created).num_milliseconds().abs();
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;

    match days {
        0 => "Hoy".to_string(),
        1 => "Ayer".to_string(),
        2..=7 => format!("Hace {} días", days),
        _ => created.format("%-d/%-m/%Y").to_string(),
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn record(status: Option<&str>, progress: u8) -> ProjectRecord {
        ProjectRecord {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Acme Corp".to_string(),
            status: status.map(str::to_string),
            progress,
            created: Some(Utc::now()),
            ..Default::default()
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_relative_date_today() {
        assert_eq!(relative_date_label(now(), now()), "Hoy");
    }

    #[test]
    fn test_relative_date_partial_day_rounds_up() {
        let created = now() - Duration::hours(3);
        assert_eq!(relative_date_label(created, now()), "Ayer");
    }

    #[test]
    fn test_relative_date_days_ago() {
        let created = now() - Duration::days(2);
        assert_eq!(relative_date_label(created, now()), "Hace 2 días");

        let created = now() - Duration::days(7);
        assert_eq!(relative_date_label(created, now()), "Hace 7 días");
    }

    #[test]
    fn test_relative_date_future_is_symmetric() {
        let created = now() + Duration::days(3);
        assert_eq!(relative_date_label(created, now()), "Hace 3 días");
    }

    #[test]
    fn test_relative_date_older_than_a_week_uses_calendar_date() {
        let created = Utc.with_ymd_and_hms(2025, 11, 2, 9, 0, 0).unwrap();
        assert_eq!(relative_date_label(created, now()), "2/11/2025");
    }

    #[test]
    fn test_calendar_date_follows_utc_near_midnight() {
        let late = Utc.with_ymd_and_hms(2025, 11, 2, 23, 30, 0).unwrap();
        assert_eq!(relative_date_label(late, now()), "2/11/2025");

        let early = Utc.with_ymd_and_hms(2025, 11, 3, 0, 15, 0).unwrap();
        assert_eq!(relative_date_label(early, now()), "3/11/2025");
    }

    #[test]
    fn test_status_styles() {
        let cases = [
            (Some("En Discovery"), StatusStyle::Blue),
            (Some("En Estrategia"), StatusStyle::Green),
            (Some("Exploración"), StatusStyle::Purple),
            (Some("Archivado"), StatusStyle::Gray),
            (None, StatusStyle::Gray),
        ];
        for (status, expected) in cases {
            assert_eq!(summarize(&record(status, 0), now()).status_style, expected);
        }
    }

    #[test]
    fn test_summarize_defaults_for_sparse_record() {
        let sparse = ProjectRecord {
            id: "9".to_string(),
            name: "Sparse".to_string(),
            ..Default::default()
        };
        let card = summarize(&sparse, now());

        assert_eq!(card.status_label, "Nuevo");
        assert_eq!(card.progress_label, "Progreso");
        assert_eq!(card.badge, "SaaS");
        assert_eq!(card.description, "Proyecto de Discovery y Estrategia");
        assert_eq!(card.relative_date_label, "Sin fecha");
        assert_eq!(card.progress_percent, 0);
    }

    #[test]
    fn test_summarize_clamps_progress() {
        let card = summarize(&record(None, 140), now());
        assert_eq!(card.progress_percent, 100);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(
            aggregate(&[]),
            Stats {
                total: 0,
                discovery_count: 0,
                strategy_count: 0,
                success_rate_percent: 0,
            }
        );
    }

    #[test]
    fn test_aggregate_success_rate() {
        let records: Vec<_> = [80, 60, 75, 90]
            .into_iter()
            .map(|p| record(Some("En Discovery"), p))
            .collect();
        let stats = aggregate(&records);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.discovery_count, 4);
        assert_eq!(stats.success_rate_percent, 75);
    }

    #[test]
    fn test_aggregate_counts_by_status_and_rounds() {
        let records = vec![
            record(Some("En Discovery"), 80),
            record(Some("En Estrategia"), 10),
            record(None, 0),
        ];
        let stats = aggregate(&records);
        assert_eq!(stats.discovery_count, 1);
        assert_eq!(stats.strategy_count, 1);
        // 1 of 3 = 33.3%
        assert_eq!(stats.success_rate_percent, 33);
    }

    #[test]
    fn test_aggregate_rounds_half_up() {
        let records = vec![
            record(None, 100),
            record(None, 100),
            record(None, 100),
            record(None, 0),
            record(None, 0),
            record(None, 0),
            record(None, 0),
            record(None, 0),
        ];
        // 3 of 8 = 37.5%
        assert_eq!(aggregate(&records).success_rate_percent, 38);
    }
}
