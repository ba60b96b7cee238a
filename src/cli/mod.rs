use anyhow::Result;

use crate::models::Stat;
use crate::services::{select, ChartKind, Dashboard};
use crate::utils::{format_stat, unit_bar};

pub fn list_teams(dashboard: &Dashboard) -> Result<()> {
    let teams: Vec<&str> = dashboard.team_names().collect();
    println!("🏆 {} teams loaded:\n", teams.len());
    for team in teams {
        println!("   • {}", team);
    }
    println!("\n💡 Use 'euro-dashboard chart --kind <kind> --team <team>' to build a chart");
    Ok(())
}

pub fn print_chart(dashboard: &Dashboard, kind: &str, team: &str, compare: Option<&str>) -> Result<()> {
    let kind: ChartKind = kind.parse()?;
    let spec = select(dashboard, kind, team, compare)?;
    tracing::info!("Built '{}'", spec.title());
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

pub fn team_summary(dashboard: &Dashboard, team_name: &str) -> Result<()> {
    let record = dashboard.team(team_name)?;
    let distribution = dashboard.goal_distribution_for(team_name)?;

    println!("📊 {} ({} matches)\n", record.team_name, record.matches_played);
    println!("   {:<30} {:>10} {:>8}", "Statistic", "Value", "Norm");
    for stat in Stat::ALL {
        println!(
            "   {:<30} {:>10} {:>8.2} {}",
            stat.column(),
            format_stat(stat, record.stats.get(stat)),
            record.normalized.get(stat),
            unit_bar(record.normalized.get(stat), 10)
        );
    }

    println!("\n⚽ Goals by period ({} total):", distribution.total_goals());
    for period in crate::models::Period::ALL {
        let goals = distribution.goals_in(period);
        println!("   {:<12} {:>3}", period.label(), goals);
    }

    Ok(())
}
