use crate::error::{DashboardError, Result};
use crate::models::{NormalizedStatRecord, Stat, StatBounds, StatLine, TeamStatRecord};

/// Value assigned to every team when a statistic has zero range.
pub const DEGENERATE_NORM: f64 = 0.0;

/// Largest `f64` below 1.0; only the column maximum may normalize to 1.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Min-max rescale `value` into `[0, 1]`.
///
/// When `max == min` there is nothing to rescale and [`DEGENERATE_NORM`]
/// is returned. Non-finite inputs also yield [`DEGENERATE_NORM`].
pub fn normalize_value(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if !value.is_finite() || !range.is_finite() || range <= 0.0 {
        return DEGENERATE_NORM;
    }
    if value >= max {
        return 1.0;
    }
    ((value - min) / range).clamp(0.0, BELOW_ONE)
}

pub fn compute_bounds(team_stats: &[TeamStatRecord]) -> Result<StatBounds> {
    let first = team_stats
        .first()
        .ok_or_else(|| DashboardError::integrity("cannot normalize an empty team table"))?;

    let mut min = first.stats;
    let mut max = first.stats;
    for record in &team_stats[1..] {
        for stat in Stat::ALL {
            let value = record.stats.get(stat);
            let lo = min.get_mut(stat);
            *lo = lo.min(value);
            let hi = max.get_mut(stat);
            *hi = hi.max(value);
        }
    }

    Ok(StatBounds { min, max })
}

/// Attach an `S_norm` companion to every statistic of every team.
pub fn normalize(team_stats: &[TeamStatRecord]) -> Result<(StatBounds, Vec<NormalizedStatRecord>)> {
    let bounds = compute_bounds(team_stats)?;

    for stat in Stat::ALL {
        let (min, max) = bounds.range(stat);
        if min == max {
            tracing::debug!("'{}' is constant ({}) across teams; normalizing to {}", stat.column(), min, DEGENERATE_NORM);
        }
    }

    let records = team_stats
        .iter()
        .map(|record| NormalizedStatRecord {
            team_name: record.team_name.clone(),
            matches_played: record.matches_played,
            stats: record.stats,
            normalized: StatLine::from_fn(|stat| {
                let (min, max) = bounds.range(stat);
                normalize_value(record.stats.get(stat), min, max)
            }),
        })
        .collect();

    Ok((bounds, records))
}
