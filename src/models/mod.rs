use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every numeric statistic tracked per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Goals,
    GoalsConceded,
    BallPossession,
    TotalAttempts,
    AttemptsOnTarget,
    AttemptsOffTarget,
    AttemptsBlocked,
    AttemptsOnTargetConceded,
    PassesCompleted,
    PassesAccuracy,
    Tackles,
    FoulsCommitted,
    Saves,
}

/// How per-match values are folded into a tournament figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    /// Unweighted mean over the team's matches.
    MatchMean,
}

impl Stat {
    pub const ALL: [Stat; 13] = [
        Stat::Goals,
        Stat::GoalsConceded,
        Stat::BallPossession,
        Stat::TotalAttempts,
        Stat::AttemptsOnTarget,
        Stat::AttemptsOffTarget,
        Stat::AttemptsBlocked,
        Stat::AttemptsOnTargetConceded,
        Stat::PassesCompleted,
        Stat::PassesAccuracy,
        Stat::Tackles,
        Stat::FoulsCommitted,
        Stat::Saves,
    ];

    /// Header of the source column holding this statistic.
    pub fn column(self) -> &'static str {
        match self {
            Stat::Goals => "Goals",
            Stat::GoalsConceded => "Goals conceded",
            Stat::BallPossession => "Ball Possession",
            Stat::TotalAttempts => "Total Attempts",
            Stat::AttemptsOnTarget => "Attempts on target",
            Stat::AttemptsOffTarget => "Attempts off target",
            Stat::AttemptsBlocked => "Attempts blocked",
            Stat::AttemptsOnTargetConceded => "Attempts on target conceded",
            Stat::PassesCompleted => "Passes completed",
            Stat::PassesAccuracy => "Passes accuracy",
            Stat::Tackles => "Tackles",
            Stat::FoulsCommitted => "Fouls committed",
            Stat::Saves => "Saves",
        }
    }

    pub fn aggregation(self) -> Aggregation {
        match self {
            Stat::BallPossession | Stat::PassesAccuracy => Aggregation::MatchMean,
            _ => Aggregation::Sum,
        }
    }
}

/// One value per [`Stat`], stored as named fields so a typo is a compile error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatLine {
    pub goals: f64,
    pub goals_conceded: f64,
    pub ball_possession: f64,
    pub total_attempts: f64,
    pub attempts_on_target: f64,
    pub attempts_off_target: f64,
    pub attempts_blocked: f64,
    pub attempts_on_target_conceded: f64,
    pub passes_completed: f64,
    pub passes_accuracy: f64,
    pub tackles: f64,
    pub fouls_committed: f64,
    pub saves: f64,
}

impl StatLine {
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Goals => self.goals,
            Stat::GoalsConceded => self.goals_conceded,
            Stat::BallPossession => self.ball_possession,
            Stat::TotalAttempts => self.total_attempts,
            Stat::AttemptsOnTarget => self.attempts_on_target,
            Stat::AttemptsOffTarget => self.attempts_off_target,
            Stat::AttemptsBlocked => self.attempts_blocked,
            Stat::AttemptsOnTargetConceded => self.attempts_on_target_conceded,
            Stat::PassesCompleted => self.passes_completed,
            Stat::PassesAccuracy => self.passes_accuracy,
            Stat::Tackles => self.tackles,
            Stat::FoulsCommitted => self.fouls_committed,
            Stat::Saves => self.saves,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Goals => &mut self.goals,
            Stat::GoalsConceded => &mut self.goals_conceded,
            Stat::BallPossession => &mut self.ball_possession,
            Stat::TotalAttempts => &mut self.total_attempts,
            Stat::AttemptsOnTarget => &mut self.attempts_on_target,
            Stat::AttemptsOffTarget => &mut self.attempts_off_target,
            Stat::AttemptsBlocked => &mut self.attempts_blocked,
            Stat::AttemptsOnTargetConceded => &mut self.attempts_on_target_conceded,
            Stat::PassesCompleted => &mut self.passes_completed,
            Stat::PassesAccuracy => &mut self.passes_accuracy,
            Stat::Tackles => &mut self.tackles,
            Stat::FoulsCommitted => &mut self.fouls_committed,
            Stat::Saves => &mut self.saves,
        }
    }

    /// Build a line by computing each statistic independently.
    pub fn from_fn(mut f: impl FnMut(Stat) -> f64) -> Self {
        let mut line = StatLine::default();
        for stat in Stat::ALL {
            *line.get_mut(stat) = f(stat);
        }
        line
    }
}

/// One raw source row: a team's statistics for a single match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatRow {
    pub match_id: String,
    pub team_name: String,
    pub stats: StatLine,
}

/// One goal, as recorded in the match event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEvent {
    pub match_id: String,
    pub team_name: String,
    /// Minute as printed in the source, e.g. `"23"` or `"45+2"`.
    pub minute: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStatRecord {
    pub team_name: String,
    pub matches_played: u32,
    pub stats: StatLine,
}

/// Column-wise bounds used for min-max normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatBounds {
    pub min: StatLine,
    pub max: StatLine,
}

impl StatBounds {
    pub fn range(&self, stat: Stat) -> (f64, f64) {
        (self.min.get(stat), self.max.get(stat))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedStatRecord {
    pub team_name: String,
    pub matches_played: u32,
    pub stats: StatLine,
    /// `S_norm` for every statistic, each in `[0, 1]`.
    pub normalized: StatLine,
}

/// Fixed match-time buckets used for the goal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Period {
    #[serde(rename = "0-15")]
    Opening,
    #[serde(rename = "16-30")]
    FirstHalfMiddle,
    #[serde(rename = "31-45+")]
    FirstHalfEnd,
    #[serde(rename = "46-60")]
    SecondHalfOpening,
    #[serde(rename = "61-75")]
    SecondHalfMiddle,
    #[serde(rename = "76-90+")]
    SecondHalfEnd,
    #[serde(rename = "Extra time")]
    ExtraTime,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::Opening,
        Period::FirstHalfMiddle,
        Period::FirstHalfEnd,
        Period::SecondHalfOpening,
        Period::SecondHalfMiddle,
        Period::SecondHalfEnd,
        Period::ExtraTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Period::Opening => "0-15",
            Period::FirstHalfMiddle => "16-30",
            Period::FirstHalfEnd => "31-45+",
            Period::SecondHalfOpening => "46-60",
            Period::SecondHalfMiddle => "61-75",
            Period::SecondHalfEnd => "76-90+",
            Period::ExtraTime => "Extra time",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalDistributionRecord {
    pub team_name: String,
    pub match_count: u32,
    /// Goals per bucket, indexed by [`Period::index`].
    pub goals_by_period: [u32; 7],
}

impl GoalDistributionRecord {
    pub fn goals_in(&self, period: Period) -> u32 {
        self.goals_by_period[period.index()]
    }

    pub fn total_goals(&self) -> u32 {
        self.goals_by_period.iter().sum()
    }
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}
