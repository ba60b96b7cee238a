use std::collections::HashMap;

use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::models::{
    GoalDistributionRecord, GoalEvent, MatchStatRow, NormalizedStatRecord, StatBounds, TeamStatRecord,
};
use crate::services::goal_distribution::aggregate_goal_distribution;
use crate::services::loader::{aggregate_team_stats, open_source, read_goal_events, read_match_stats};
use crate::services::normalizer::normalize;

/// Minimum similarity for a known team to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// All derived tables, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Dashboard {
    team_stats: Vec<TeamStatRecord>,
    bounds: StatBounds,
    normalized: Vec<NormalizedStatRecord>,
    goal_distribution: Vec<GoalDistributionRecord>,
    index: HashMap<String, usize>,
}

impl Dashboard {
    pub fn build(raw_rows: &[MatchStatRow], goal_events: &[GoalEvent]) -> Result<Self> {
        let team_stats = aggregate_team_stats(raw_rows)?;
        let (bounds, normalized) = normalize(&team_stats)?;
        let goal_distribution = aggregate_goal_distribution(raw_rows, goal_events)?;

        // Both tables are keyed off the same trimmed team names and sorted, so
        // a shared index is valid for both.
        debug_assert!(team_stats
            .iter()
            .zip(&goal_distribution)
            .all(|(t, g)| t.team_name == g.team_name));

        let index = team_stats
            .iter()
            .enumerate()
            .map(|(i, t)| (t.team_name.clone(), i))
            .collect();

        Ok(Self {
            team_stats,
            bounds,
            normalized,
            goal_distribution,
            index,
        })
    }

    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.team_stats.iter().map(|t| t.team_name.as_str())
    }

    pub fn team_stats(&self) -> &[TeamStatRecord] {
        &self.team_stats
    }

    pub fn bounds(&self) -> &StatBounds {
        &self.bounds
    }

    pub fn normalized(&self) -> &[NormalizedStatRecord] {
        &self.normalized
    }

    pub fn goal_distribution(&self) -> &[GoalDistributionRecord] {
        &self.goal_distribution
    }

    fn position(&self, name: &str) -> Result<usize> {
        let name = name.trim();
        self.index.get(name).copied().ok_or_else(|| DashboardError::UnknownTeam {
            name: name.to_string(),
            suggestion: self.closest_team(name),
        })
    }

    fn closest_team(&self, name: &str) -> Option<String> {
        let lowered = name.to_lowercase();
        self.team_names()
            .map(|team| (team, strsim::jaro_winkler(&lowered, &team.to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(team, _)| team.to_string())
    }

    pub fn team(&self, name: &str) -> Result<&NormalizedStatRecord> {
        self.position(name).map(|i| &self.normalized[i])
    }

    pub fn goal_distribution_for(&self, name: &str) -> Result<&GoalDistributionRecord> {
        self.position(name).map(|i| &self.goal_distribution[i])
    }
}

/// Read both sources from disk and derive every table.
pub fn load_dashboard(config: &Config) -> Result<Dashboard> {
    let stats_source = config.match_stats_path.display().to_string();
    let raw_rows = read_match_stats(open_source(&config.match_stats_path)?, &stats_source)?;

    let events_source = config.goal_events_path.display().to_string();
    let goal_events = read_goal_events(open_source(&config.goal_events_path)?, &events_source)?;

    let dashboard = Dashboard::build(&raw_rows, &goal_events)?;
    tracing::info!(
        "Loaded {} match rows and {} goal events into {} teams",
        raw_rows.len(),
        goal_events.len(),
        dashboard.team_stats().len()
    );

    Ok(dashboard)
}
