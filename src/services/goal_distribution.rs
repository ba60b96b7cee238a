use std::collections::{BTreeMap, HashSet};

use crate::error::{DashboardError, Result};
use crate::models::{GoalDistributionRecord, GoalEvent, MatchStatRow, Period};

/// Map a printed minute (`"23"`, `"45+2"`, `"120+1"`) to its period bucket.
///
/// Stoppage time belongs to the half it was played in, so `45+2` falls in
/// `31-45+` rather than `46-60`.
pub fn period_for_minute(minute: &str) -> Result<Period> {
    let invalid = || DashboardError::integrity(format!("unparseable goal minute '{}'", minute));

    let (base, added) = match minute.trim().split_once('+') {
        Some((base, added)) => (base.trim(), Some(added.trim())),
        None => (minute.trim(), None),
    };
    let base: u32 = base.parse().map_err(|_| invalid())?;
    if let Some(added) = added {
        added.parse::<u32>().map_err(|_| invalid())?;
    }

    let period = match base {
        0..=15 => Period::Opening,
        16..=30 => Period::FirstHalfMiddle,
        31..=45 => Period::FirstHalfEnd,
        46..=60 => Period::SecondHalfOpening,
        61..=75 => Period::SecondHalfMiddle,
        76..=90 => Period::SecondHalfEnd,
        91..=120 => Period::ExtraTime,
        _ => return Err(invalid()),
    };
    Ok(period)
}

/// Bucket every goal by team and period, and count matches per team.
///
/// Match counts come from `raw_rows` (distinct match ids per team), so a
/// team that never scored still gets a record with all-zero buckets.
pub fn aggregate_goal_distribution(
    raw_rows: &[MatchStatRow],
    goal_events: &[GoalEvent],
) -> Result<Vec<GoalDistributionRecord>> {
    let mut matches: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for row in raw_rows {
        matches
            .entry(row.team_name.trim())
            .or_default()
            .insert(row.match_id.as_str());
    }

    let mut buckets: BTreeMap<&str, [u32; 7]> =
        matches.keys().map(|team| (*team, [0u32; 7])).collect();

    for event in goal_events {
        let team = event.team_name.trim();
        let played = matches.get(team).ok_or_else(|| {
            DashboardError::integrity(format!(
                "goal event in match {} for {} which has no match statistics",
                event.match_id, team
            ))
        })?;
        if !played.contains(event.match_id.as_str()) {
            return Err(DashboardError::integrity(format!(
                "goal event for {} in match {} which it did not play",
                team, event.match_id
            )));
        }

        let period = period_for_minute(&event.minute)?;
        if let Some(counts) = buckets.get_mut(team) {
            counts[period.index()] += 1;
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(team, goals_by_period)| GoalDistributionRecord {
            team_name: team.to_string(),
            match_count: matches.get(team).map_or(0, |m| m.len() as u32),
            goals_by_period,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::loader::tests::row;

    fn goal(match_id: &str, team: &str, minute: &str) -> GoalEvent {
        GoalEvent {
            match_id: match_id.to_string(),
            team_name: team.to_string(),
            minute: minute.to_string(),
        }
    }

    #[test]
    fn test_period_boundaries_and_stoppage_time() {
        assert_eq!(period_for_minute("1").unwrap(), Period::Opening);
        assert_eq!(period_for_minute("15").unwrap(), Period::Opening);
        assert_eq!(period_for_minute("16").unwrap(), Period::FirstHalfMiddle);
        assert_eq!(period_for_minute("45+2").unwrap(), Period::FirstHalfEnd);
        assert_eq!(period_for_minute("46").unwrap(), Period::SecondHalfOpening);
        assert_eq!(period_for_minute("90+4").unwrap(), Period::SecondHalfEnd);
        assert_eq!(period_for_minute("105+1").unwrap(), Period::ExtraTime);
        assert_eq!(period_for_minute(" 120 ").unwrap(), Period::ExtraTime);
    }

    #[test]
    fn test_period_rejects_garbage() {
        assert!(period_for_minute("abc").is_err());
        assert!(period_for_minute("45+x").is_err());
        assert!(period_for_minute("130").is_err());
    }

    #[test]
    fn test_buckets_sum_to_total_goals() {
        let rows = vec![
            row("1", "Italy", |_| 0.0),
            row("1", "Turkey", |_| 0.0),
            row("2", "Italy", |_| 0.0),
            row("2", "Wales", |_| 0.0),
        ];
        let goals = vec![
            goal("1", "Italy", "53"),
            goal("1", "Italy", "66"),
            goal("1", "Italy", "79"),
            goal("2", "Italy", "39"),
            goal("2", "Italy", "45+1"),
        ];

        let dist = aggregate_goal_distribution(&rows, &goals).unwrap();
        assert_eq!(dist.len(), 3);

        let italy = dist.iter().find(|d| d.team_name == "Italy").unwrap();
        assert_eq!(italy.match_count, 2);
        assert_eq!(italy.total_goals(), 5);
        assert_eq!(italy.goals_in(Period::FirstHalfEnd), 2);
        assert_eq!(italy.goals_in(Period::SecondHalfEnd), 1);

        let wales = dist.iter().find(|d| d.team_name == "Wales").unwrap();
        assert_eq!(wales.match_count, 1);
        assert_eq!(wales.total_goals(), 0);
    }

    #[test]
    fn test_goal_for_unknown_team_or_match_is_rejected() {
        let rows = vec![row("1", "Italy", |_| 0.0)];

        let err = aggregate_goal_distribution(&rows, &[goal("1", "Spain", "10")]).unwrap_err();
        assert!(matches!(err, DashboardError::DataIntegrity(_)));

        let err = aggregate_goal_distribution(&rows, &[goal("9", "Italy", "10")]).unwrap_err();
        assert!(matches!(err, DashboardError::DataIntegrity(_)));
    }
}
