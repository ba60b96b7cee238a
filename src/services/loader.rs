use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::models::{Aggregation, GoalEvent, MatchStatRow, Stat, StatLine, TeamStatRecord};

const MATCH_ID_COLUMN: &str = "MatchID";
const TEAM_NAME_COLUMN: &str = "TeamName";
const MINUTE_COLUMN: &str = "Minute";

// ── CSV readers ──────────────────────────────────────────────────────────────

/// Locate each required header, failing on the first one that is absent.
fn column_indices(headers: &csv::StringRecord, required: &[&str]) -> Result<Vec<usize>> {
    required
        .iter()
        .map(|name| {
            headers
                .iter()
                .position(|h| h.trim() == *name)
                .ok_or_else(|| DashboardError::integrity(format!("missing required column '{}'", name)))
        })
        .collect()
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn text_cell(record: &csv::StringRecord, index: usize, column: &str) -> Result<String> {
    let value = record.get(index).unwrap_or("").trim();
    if value.is_empty() {
        return Err(DashboardError::integrity(format!(
            "empty '{}' on line {}",
            column,
            line_of(record)
        )));
    }
    Ok(value.to_string())
}

fn numeric_cell(record: &csv::StringRecord, index: usize, column: &str) -> Result<f64> {
    let raw = record.get(index).unwrap_or("").trim();
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(DashboardError::integrity(format!(
            "invalid value '{}' for '{}' on line {}",
            raw,
            column,
            line_of(record)
        ))),
    }
}

/// Parse per-team, per-match statistic rows.
pub fn read_match_stats<R: Read>(rdr: R, source: &str) -> Result<Vec<MatchStatRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let csv_err = |e| DashboardError::Csv {
        path: source.to_string(),
        source: e,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    let mut required = vec![MATCH_ID_COLUMN, TEAM_NAME_COLUMN];
    required.extend(Stat::ALL.iter().map(|s| s.column()));
    let indices = column_indices(&headers, &required)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let match_id = text_cell(&record, indices[0], MATCH_ID_COLUMN)?;
        let team_name = text_cell(&record, indices[1], TEAM_NAME_COLUMN)?;

        let mut stats = StatLine::default();
        for (stat, &index) in Stat::ALL.iter().zip(&indices[2..]) {
            *stats.get_mut(*stat) = numeric_cell(&record, index, stat.column())?;
        }

        rows.push(MatchStatRow {
            match_id,
            team_name,
            stats,
        });
    }

    Ok(rows)
}

/// Parse the goal-timing event log.
pub fn read_goal_events<R: Read>(rdr: R, source: &str) -> Result<Vec<GoalEvent>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let csv_err = |e| DashboardError::Csv {
        path: source.to_string(),
        source: e,
    };

    let headers = reader.headers().map_err(csv_err)?.clone();
    let indices = column_indices(&headers, &[MATCH_ID_COLUMN, TEAM_NAME_COLUMN, MINUTE_COLUMN])?;

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        events.push(GoalEvent {
            match_id: text_cell(&record, indices[0], MATCH_ID_COLUMN)?,
            team_name: text_cell(&record, indices[1], TEAM_NAME_COLUMN)?,
            minute: text_cell(&record, indices[2], MINUTE_COLUMN)?,
        });
    }

    Ok(events)
}

pub fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| DashboardError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

// ── Aggregation ──────────────────────────────────────────────────────────────

#[derive(Default)]
struct TeamAccumulator {
    match_ids: HashSet<String>,
    totals: StatLine,
}

/// Fold raw per-match rows into one record per team, ordered by team name.
///
/// Counting statistics are summed; percentage statistics are averaged over
/// the team's matches (see [`Stat::aggregation`]).
pub fn aggregate_team_stats(raw_rows: &[MatchStatRow]) -> Result<Vec<TeamStatRecord>> {
    if raw_rows.is_empty() {
        return Err(DashboardError::integrity("no match statistics rows"));
    }

    let mut by_team: BTreeMap<&str, TeamAccumulator> = BTreeMap::new();
    for row in raw_rows {
        let team = row.team_name.trim();
        if team.is_empty() {
            return Err(DashboardError::integrity(format!(
                "row for match {} has a blank team name",
                row.match_id
            )));
        }

        let acc = by_team.entry(team).or_default();
        if !acc.match_ids.insert(row.match_id.clone()) {
            return Err(DashboardError::integrity(format!(
                "duplicate row for {} in match {}",
                team, row.match_id
            )));
        }
        for stat in Stat::ALL {
            *acc.totals.get_mut(stat) += row.stats.get(stat);
        }
    }

    by_team
        .into_iter()
        .map(|(team, acc)| {
            let matches = acc.match_ids.len();
            // Accumulators only exist once a row was seen; kept so a zero-match
            // team can never reach the division below.
            if matches == 0 {
                return Err(DashboardError::integrity(format!("team {} has no matches", team)));
            }

            let stats = StatLine::from_fn(|stat| match stat.aggregation() {
                Aggregation::Sum => acc.totals.get(stat),
                Aggregation::MatchMean => acc.totals.get(stat) / matches as f64,
            });
            if let Some(stat) = Stat::ALL.into_iter().find(|s| !stats.get(*s).is_finite()) {
                return Err(DashboardError::integrity(format!(
                    "'{}' total for {} is not a finite number",
                    stat.column(),
                    team
                )));
            }

            Ok(TeamStatRecord {
                team_name: team.to_string(),
                matches_played: matches as u32,
                stats,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn stats_header() -> String {
        let mut columns = vec![MATCH_ID_COLUMN.to_string(), TEAM_NAME_COLUMN.to_string()];
        columns.extend(Stat::ALL.iter().map(|s| s.column().to_string()));
        columns.join(",")
    }

    pub(crate) fn row(match_id: &str, team: &str, f: impl Fn(Stat) -> f64) -> MatchStatRow {
        MatchStatRow {
            match_id: match_id.to_string(),
            team_name: team.to_string(),
            stats: StatLine::from_fn(f),
        }
    }

    #[test]
    fn test_read_match_stats_parses_every_column() {
        let values: Vec<String> = (0..Stat::ALL.len()).map(|i| i.to_string()).collect();
        let data = format!("{}\n1, Italy ,{}\n", stats_header(), values.join(","));

        let rows = read_match_stats(data.as_bytes(), "inline").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team_name, "Italy");
        assert_eq!(rows[0].stats.get(Stat::Goals), 0.0);
        assert_eq!(rows[0].stats.get(Stat::Saves), 12.0);
    }

    #[test]
    fn test_read_match_stats_reports_missing_column() {
        let header = stats_header().replace(",Saves", "");
        let err = read_match_stats(format!("{}\n", header).as_bytes(), "inline").unwrap_err();
        match err {
            DashboardError::DataIntegrity(msg) => assert!(msg.contains("'Saves'"), "{}", msg),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_match_stats_rejects_non_numeric_cell() {
        let mut values: Vec<String> = (0..Stat::ALL.len()).map(|_| "1".to_string()).collect();
        values[0] = "two".to_string();
        let data = format!("{}\n1,Italy,{}\n", stats_header(), values.join(","));

        let err = read_match_stats(data.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, DashboardError::DataIntegrity(ref m) if m.contains("'Goals'")));
    }

    #[test]
    fn test_read_match_stats_rejects_negative_cell() {
        let mut values: Vec<String> = (0..Stat::ALL.len()).map(|_| "1".to_string()).collect();
        values[12] = "-2".to_string();
        let data = format!("{}\n1,Italy,{}\n", stats_header(), values.join(","));

        let err = read_match_stats(data.as_bytes(), "inline").unwrap_err();
        assert!(matches!(err, DashboardError::DataIntegrity(ref m) if m.contains("'Saves'")));
    }

    #[test]
    fn test_read_goal_events_reports_missing_column() {
        let data = "MatchID,TeamName\n1,Italy\n";
        let err = read_goal_events(data.as_bytes(), "inline").unwrap_err();
        match err {
            DashboardError::DataIntegrity(msg) => assert!(msg.contains("'Minute'"), "{}", msg),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_goal_events() {
        let data = "MatchID,TeamName,Minute\n1,Italy,45+2\n1,Turkey,53\n";
        let events = read_goal_events(data.as_bytes(), "inline").unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].minute, "45+2");
        assert_eq!(events[1].team_name, "Turkey");
    }

    #[test]
    fn test_aggregate_sums_counts_and_averages_percentages() {
        let rows = vec![
            row("1", "Italy", |s| match s {
                Stat::Goals => 3.0,
                Stat::BallPossession => 60.0,
                _ => 1.0,
            }),
            row("2", "Italy", |s| match s {
                Stat::Goals => 3.0,
                Stat::BallPossession => 50.0,
                _ => 1.0,
            }),
            row("1", "Turkey", |s| match s {
                Stat::BallPossession => 40.0,
                _ => 0.0,
            }),
        ];

        let teams = aggregate_team_stats(&rows).unwrap();
        assert_eq!(teams.len(), 2);

        let italy = &teams[0];
        assert_eq!(italy.team_name, "Italy");
        assert_eq!(italy.matches_played, 2);
        assert_eq!(italy.stats.goals, 6.0);
        assert_eq!(italy.stats.ball_possession, 55.0);
        assert_eq!(italy.stats.tackles, 2.0);
        assert_eq!(teams[1].stats.ball_possession, 40.0);
    }

    #[test]
    fn test_aggregate_rejects_empty_and_duplicate_input() {
        assert!(matches!(aggregate_team_stats(&[]), Err(DashboardError::DataIntegrity(_))));

        let rows = vec![row("1", "Italy", |_| 1.0), row("1", "Italy", |_| 1.0)];
        assert!(matches!(aggregate_team_stats(&rows), Err(DashboardError::DataIntegrity(_))));

        let rows = vec![row("1", "  ", |_| 1.0)];
        assert!(matches!(aggregate_team_stats(&rows), Err(DashboardError::DataIntegrity(_))));
    }

    #[test]
    fn test_aggregate_rejects_overflowing_totals() {
        let values: Vec<String> = (0..Stat::ALL.len())
            .map(|i| if i == 0 { "1e308".to_string() } else { "1".to_string() })
            .collect();
        let zeros: Vec<String> = (0..Stat::ALL.len()).map(|_| "0".to_string()).collect();
        let data = format!(
            "{}\n1,A,{}\n2,A,{}\n1,B,{}\n",
            stats_header(),
            values.join(","),
            values.join(","),
            zeros.join(",")
        );

        let rows = read_match_stats(data.as_bytes(), "inline").unwrap();
        match aggregate_team_stats(&rows) {
            Err(DashboardError::DataIntegrity(msg)) => {
                assert!(msg.contains("'Goals'") && msg.contains("for A"), "{}", msg)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
