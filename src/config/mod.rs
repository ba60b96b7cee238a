use std::env;
use std::path::PathBuf;

/// Runtime settings, read from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub match_stats_path: PathBuf,
    pub goal_events_path: PathBuf,
    pub default_team: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let match_stats_path = lookup("MATCH_STATS_PATH")
            .unwrap_or_else(|| "data/match_stats.csv".to_string());
        let goal_events_path = lookup("GOAL_EVENTS_PATH")
            .unwrap_or_else(|| "data/goal_events.csv".to_string());
        let default_team = lookup("DEFAULT_TEAM").unwrap_or_else(|| "Italy".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring invalid PORT value '{}', using 3000", raw);
                3000
            }),
            None => 3000,
        };

        Self {
            match_stats_path: PathBuf::from(match_stats_path),
            goal_events_path: PathBuf::from(goal_events_path),
            default_team,
            port,
        }
    }
}
