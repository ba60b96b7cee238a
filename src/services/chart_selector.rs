//! Chart selection: filters the loaded tables by team and chart kind and
//! returns a [`ChartSpec`] for the plotting front-end to draw.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{NormalizedStatRecord, Period, Stat};
use crate::services::dashboard::Dashboard;

const TOURNAMENT: &str = "UEFA Euro 2020";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Offensive,
    Defensive,
    ParallelCoordinates,
    Radar,
    GoalDistribution,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Offensive,
        ChartKind::Defensive,
        ChartKind::ParallelCoordinates,
        ChartKind::Radar,
        ChartKind::GoalDistribution,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::Offensive => "offensive",
            ChartKind::Defensive => "defensive",
            ChartKind::ParallelCoordinates => "parallel-coordinates",
            ChartKind::Radar => "radar",
            ChartKind::GoalDistribution => "goal-distribution",
        }
    }

    /// Dashboard tab value for this chart.
    pub fn tab(self) -> &'static str {
        match self {
            ChartKind::Offensive => "tab-1",
            ChartKind::Defensive => "tab-2",
            ChartKind::ParallelCoordinates => "tab-3",
            ChartKind::Radar => "tab-4",
            ChartKind::GoalDistribution => "tab-5",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s || kind.tab() == s)
            .ok_or(DashboardError::UnknownChartKind(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub stat: Stat,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub team: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub stat: Stat,
    pub label: &'static str,
    pub range: [f64; 2],
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarTrace {
    pub team: String,
    pub color: &'static str,
    /// Normalized values, one per axis.
    pub r: Vec<f64>,
    pub actual: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBar {
    pub period: Period,
    pub goals: u32,
    pub average_per_game: f64,
}

/// Structured description of one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Scatter3d {
        title: String,
        axes: [Axis; 3],
        points: Vec<ScatterPoint>,
    },
    ParallelCoordinates {
        title: String,
        teams: Vec<String>,
        highlighted: Vec<bool>,
        dimensions: Vec<Dimension>,
    },
    Radar {
        title: String,
        axes: Vec<Axis>,
        radial_range: [f64; 2],
        traces: Vec<RadarTrace>,
    },
    GoalDistribution {
        title: String,
        team: String,
        match_count: u32,
        bars: Vec<PeriodBar>,
    },
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Scatter3d { title, .. }
            | ChartSpec::ParallelCoordinates { title, .. }
            | ChartSpec::Radar { title, .. }
            | ChartSpec::GoalDistribution { title, .. } => title,
        }
    }
}

const OFFENSIVE_AXES: [(Stat, &str); 3] = [
    (Stat::Goals, "Goals Scored"),
    (Stat::BallPossession, "Ball Possession (%)"),
    (Stat::AttemptsOnTarget, "Attempts on target"),
];

const DEFENSIVE_AXES: [(Stat, &str); 3] = [
    (Stat::FoulsCommitted, "Fouls Committed"),
    (Stat::Tackles, "Tackles Won"),
    (Stat::Saves, "Saves"),
];

const PARALLEL_DIMENSIONS: [(Stat, &str); 8] = [
    (Stat::BallPossession, "Ball Possession (%)"),
    (Stat::TotalAttempts, "Total Attempts"),
    (Stat::Goals, "Goals"),
    (Stat::PassesCompleted, "Passes Completed"),
    (Stat::PassesAccuracy, "Passes Accuracy (%)"),
    (Stat::Tackles, "Tackles"),
    (Stat::AttemptsBlocked, "Shots blocked"),
    (Stat::FoulsCommitted, "Fouls Committed"),
];

const RADAR_AXES: [(Stat, &str); 6] = [
    (Stat::Goals, "Goals scored"),
    (Stat::BallPossession, "Ball Possession %"),
    (Stat::AttemptsBlocked, "Attempts blocked"),
    (Stat::GoalsConceded, "Goals conceded"),
    (Stat::AttemptsOnTargetConceded, "Attempts on target conceded"),
    (Stat::AttemptsOnTarget, "Attempts on target taken"),
];

fn axis((stat, label): (Stat, &'static str)) -> Axis {
    Axis { stat, label }
}

/// Build the chart for `kind` centred on `team`.
///
/// `compare_team` only affects the radar chart. Every named team must exist;
/// an unknown name fails the whole request.
pub fn select(
    dashboard: &Dashboard,
    kind: ChartKind,
    team: &str,
    compare_team: Option<&str>,
) -> Result<ChartSpec> {
    let selected = dashboard.team(team)?;
    let compare = compare_team
        .filter(|name| !name.trim().is_empty())
        .map(|name| dashboard.team(name))
        .transpose()?;

    tracing::debug!("Selecting {} chart for {}", kind, selected.team_name);

    let spec = match kind {
        ChartKind::Offensive => scatter(
            dashboard,
            selected,
            OFFENSIVE_AXES,
            format!("{} Team Offensive Performance in 3D", TOURNAMENT),
        ),
        ChartKind::Defensive => scatter(
            dashboard,
            selected,
            DEFENSIVE_AXES,
            format!("{} Team Defensive Performance in 3D", TOURNAMENT),
        ),
        ChartKind::ParallelCoordinates => parallel_coordinates(dashboard, selected),
        ChartKind::Radar => radar(selected, compare),
        ChartKind::GoalDistribution => goal_distribution(dashboard, &selected.team_name)?,
    };

    Ok(spec)
}

fn scatter(
    dashboard: &Dashboard,
    selected: &NormalizedStatRecord,
    axes: [(Stat, &'static str); 3],
    title: String,
) -> ChartSpec {
    let [x, y, z] = axes.map(|(stat, _)| stat);
    let points = dashboard
        .normalized()
        .iter()
        .map(|record| ScatterPoint {
            team: record.team_name.clone(),
            x: record.stats.get(x),
            y: record.stats.get(y),
            z: record.stats.get(z),
            highlighted: record.team_name == selected.team_name,
        })
        .collect();

    ChartSpec::Scatter3d {
        title,
        axes: axes.map(axis),
        points,
    }
}

fn parallel_coordinates(dashboard: &Dashboard, selected: &NormalizedStatRecord) -> ChartSpec {
    let records = dashboard.normalized();
    let bounds = dashboard.bounds();

    let dimensions = PARALLEL_DIMENSIONS
        .iter()
        .map(|&(stat, label)| {
            let (min, max) = bounds.range(stat);
            Dimension {
                stat,
                label,
                range: [min, max],
                values: records.iter().map(|r| r.stats.get(stat)).collect(),
            }
        })
        .collect();

    ChartSpec::ParallelCoordinates {
        title: format!("{} Team Performance: Parallel Coordinates", TOURNAMENT),
        teams: records.iter().map(|r| r.team_name.clone()).collect(),
        highlighted: records.iter().map(|r| r.team_name == selected.team_name).collect(),
        dimensions,
    }
}

fn radar_trace(record: &NormalizedStatRecord, color: &'static str) -> RadarTrace {
    RadarTrace {
        team: record.team_name.clone(),
        color,
        r: RADAR_AXES.iter().map(|(stat, _)| record.normalized.get(*stat)).collect(),
        actual: RADAR_AXES.iter().map(|(stat, _)| record.stats.get(*stat)).collect(),
    }
}

fn radar(selected: &NormalizedStatRecord, compare: Option<&NormalizedStatRecord>) -> ChartSpec {
    let mut traces = vec![radar_trace(selected, "blue")];
    let title = match compare {
        Some(other) => {
            traces.push(radar_trace(other, "red"));
            format!("{} vs {} Performance Radar Chart", selected.team_name, other.team_name)
        }
        None => format!("{} Performance Radar Chart", selected.team_name),
    };

    ChartSpec::Radar {
        title,
        axes: RADAR_AXES.into_iter().map(axis).collect(),
        radial_range: [0.0, 1.0],
        traces,
    }
}

fn goal_distribution(dashboard: &Dashboard, team: &str) -> Result<ChartSpec> {
    let record = dashboard.goal_distribution_for(team)?;
    let bars = Period::ALL
        .iter()
        .map(|&period| {
            let goals = record.goals_in(period);
            let average_per_game = if record.match_count == 0 {
                0.0
            } else {
                goals as f64 / record.match_count as f64
            };
            PeriodBar {
                period,
                goals,
                average_per_game,
            }
        })
        .collect();

    Ok(ChartSpec::GoalDistribution {
        title: format!("{}: Goal distribution throughout a match during Euro 2020", record.team_name),
        team: record.team_name.clone(),
        match_count: record.match_count,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::tests::sample_dashboard;

    #[test]
    fn test_chart_kind_parses_ids_and_tab_aliases() {
        assert_eq!("radar".parse::<ChartKind>().unwrap(), ChartKind::Radar);
        assert_eq!("Goal-Distribution".parse::<ChartKind>().unwrap(), ChartKind::GoalDistribution);
        assert_eq!("tab-3".parse::<ChartKind>().unwrap(), ChartKind::ParallelCoordinates);
        assert!(matches!(
            "pie".parse::<ChartKind>(),
            Err(DashboardError::UnknownChartKind(_))
        ));
    }

    #[test]
    fn test_goal_distribution_averages_per_game() {
        let dashboard = sample_dashboard();
        let spec = select(&dashboard, ChartKind::GoalDistribution, "Italy", None).unwrap();

        let ChartSpec::GoalDistribution { match_count, bars, team, .. } = spec else {
            panic!("expected goal distribution chart");
        };
        assert_eq!(team, "Italy");
        assert_eq!(match_count, 2);
        assert_eq!(bars.len(), Period::ALL.len());

        let record = dashboard.goal_distribution_for("Italy").unwrap();
        for bar in &bars {
            assert_eq!(bar.goals, record.goals_in(bar.period));
            assert_eq!(bar.average_per_game, bar.goals as f64 / 2.0);
        }
        let second_half_end = bars.iter().find(|b| b.period == Period::SecondHalfEnd).unwrap();
        assert_eq!(second_half_end.goals, 2);
        assert_eq!(second_half_end.average_per_game, 1.0);
    }

    #[test]
    fn test_unknown_team_fails_every_chart_kind() {
        let dashboard = sample_dashboard();
        for kind in ChartKind::ALL {
            let result = select(&dashboard, kind, "Atlantis", None);
            assert!(matches!(result, Err(DashboardError::UnknownTeam { .. })), "{kind}");
        }

        let result = select(&dashboard, ChartKind::Radar, "Italy", Some("Atlantis"));
        assert!(matches!(result, Err(DashboardError::UnknownTeam { .. })));
    }

    #[test]
    fn test_scatter_highlights_selected_team() {
        let dashboard = sample_dashboard();
        let spec = select(&dashboard, ChartKind::Offensive, "Turkey", None).unwrap();

        let ChartSpec::Scatter3d { axes, points, .. } = spec else {
            panic!("expected scatter chart");
        };
        assert_eq!(axes[0].stat, Stat::Goals);
        assert_eq!(points.len(), 3);
        let highlighted: Vec<_> = points.iter().filter(|p| p.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].team, "Turkey");
        assert_eq!(highlighted[0].x, 1.0);
        assert_eq!(highlighted[0].y, 45.0);
    }

    #[test]
    fn test_defensive_scatter_uses_defensive_axes() {
        let dashboard = sample_dashboard();
        let spec = select(&dashboard, ChartKind::Defensive, "Italy", None).unwrap();
        let ChartSpec::Scatter3d { axes, .. } = spec else {
            panic!("expected scatter chart");
        };
        let stats: Vec<_> = axes.iter().map(|a| a.stat).collect();
        assert_eq!(stats, vec![Stat::FoulsCommitted, Stat::Tackles, Stat::Saves]);
    }

    #[test]
    fn test_parallel_coordinates_ranges_match_bounds() {
        let dashboard = sample_dashboard();
        let spec = select(&dashboard, ChartKind::ParallelCoordinates, "Switzerland", None).unwrap();

        let ChartSpec::ParallelCoordinates { teams, highlighted, dimensions, .. } = spec else {
            panic!("expected parallel coordinates chart");
        };
        assert_eq!(dimensions.len(), 8);
        assert_eq!(highlighted, vec![false, true, false]);
        assert_eq!(teams[1], "Switzerland");

        let goals = dimensions.iter().find(|d| d.stat == Stat::Goals).unwrap();
        assert_eq!(goals.range, [1.0, 6.0]);
        assert_eq!(goals.values, vec![6.0, 3.0, 1.0]);
    }

    #[test]
    fn test_radar_with_and_without_comparison() {
        let dashboard = sample_dashboard();

        let spec = select(&dashboard, ChartKind::Radar, "Italy", None).unwrap();
        assert_eq!(spec.title(), "Italy Performance Radar Chart");

        let spec = select(&dashboard, ChartKind::Radar, "Italy", Some("Turkey")).unwrap();
        assert_eq!(spec.title(), "Italy vs Turkey Performance Radar Chart");
        let ChartSpec::Radar { traces, radial_range, axes, .. } = spec else {
            panic!("expected radar chart");
        };
        assert_eq!(radial_range, [0.0, 1.0]);
        assert_eq!(axes.len(), 6);
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].r[0], 1.0);
        assert_eq!(traces[1].r[0], 0.0);
        assert_eq!(traces[1].actual[0], 1.0);
        assert!(traces.iter().flat_map(|t| &t.r).all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn test_blank_comparison_is_ignored() {
        let dashboard = sample_dashboard();
        let spec = select(&dashboard, ChartKind::Radar, "Italy", Some("  ")).unwrap();
        assert_eq!(spec.title(), "Italy Performance Radar Chart");
    }
}
