//! Command-line front end for the beach tournament engine.
//!
//! Builds brackets, plans multi-phase progressions and partitions pools,
//! printing plain text or JSON.

mod config;

use anyhow::{Error, bail};
use beach_tourney::{
    bracket::{Bracket, build_bracket, random_draw},
    matches::{Entrant, Slot},
    pool::PoolFormat,
    progression::{
        Configuration, Planner, distribute, distribute_qualifiers, schedule, total_matches,
    },
};
use chrono::{DateTime, Utc};
use config::AppConfig;
use log::{info, warn};
use pico_args::Arguments;
use rand::SeedableRng;
use rand::rngs::StdRng;

const HELP: &str = "\
Plan and build beach volleyball tournaments

USAGE:
  bt_cli <COMMAND> [OPTIONS]

COMMANDS:
  bracket      Build a single-elimination bracket
  plan         List candidate multi-phase plans
  distribute   Split teams (and qualifiers) across pools

BRACKET OPTIONS:
  --teams      N           Number of seeded teams
  --draw       SEED        Shuffle seeds with a reproducible random draw

PLAN OPTIONS:
  --players    N           Number of players
  --start      TIME        RFC 3339 start time for a phase schedule

DISTRIBUTE OPTIONS:
  --teams      N           Number of teams
  --pools      N           Number of pools
  --format     FORMAT      kob or round-robin, adds match counts
  --qualified  N           Players to qualify across the pools
  --players-per-team N     Players per team  [default: 1]

GLOBAL OPTIONS:
  --fields     N           Fields available  [default: env BT_FIELDS or 4]
  --json                   Print JSON instead of text

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  BT_SETS_TO_WIN, BT_POINTS_PER_SET, BT_TIE_BREAK, BT_TIE_BREAK_POINTS,
  BT_THIRD_PLACE, BT_MINUTES_PER_SET, BT_SET_BREAK_MINUTES,
  BT_MATCH_BREAK_MINUTES, BT_SETUP_MINUTES, BT_FIELDS, BT_SETS_PER_MATCH,
  BT_TEAMS_PER_POOL
  RUST_LOG                 Log level (e.g., debug)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    env_logger::builder().format_target(false).init();

    let command = pargs.subcommand()?;
    let json = pargs.contains("--json");
    let fields: Option<usize> = pargs.opt_value_from_str("--fields")?;

    let config = AppConfig::from_env(fields)?;
    config.validate()?;

    match command.as_deref() {
        Some("bracket") => run_bracket(pargs, &config, json),
        Some("plan") => run_plan(pargs, &config, json),
        Some("distribute") => run_distribute(pargs, json),
        Some(other) => bail!("Unknown command: {other}\n\n{HELP}"),
        None => {
            print!("{HELP}");
            Ok(())
        }
    }
}

fn run_bracket(mut pargs: Arguments, config: &AppConfig, json: bool) -> Result<(), Error> {
    let teams: usize = pargs.value_from_str("--teams")?;
    let draw: Option<u64> = pargs.opt_value_from_str("--draw")?;
    finish(pargs)?;

    let mut entrants: Vec<Entrant> = (1..=teams)
        .map(|i| Entrant::new(i as i64, format!("Team {i}"), i as u32))
        .collect();
    if let Some(seed) = draw {
        entrants = random_draw(&entrants, &mut StdRng::seed_from_u64(seed));
    }

    let bracket = build_bracket(&entrants, &config.bracket_config())?;
    info!(
        "Built bracket: {} entrants, {} byes, {} matches",
        teams,
        bracket.byes,
        bracket.matches.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&bracket)?);
    } else {
        print_bracket(&bracket);
    }
    Ok(())
}

fn run_plan(mut pargs: Arguments, config: &AppConfig, json: bool) -> Result<(), Error> {
    let players: usize = pargs.value_from_str("--players")?;
    let start: Option<DateTime<Utc>> = pargs.opt_value_from_fn("--start", parse_start)?;
    finish(pargs)?;

    let planner = Planner::new(config.planner)?;
    let plans = planner.plan(players, config.fields)?;
    if plans.is_empty() {
        warn!("No plan fits {players} players");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plans)?);
    } else {
        for plan in &plans {
            print_plan(plan, start);
        }
    }
    Ok(())
}

fn run_distribute(mut pargs: Arguments, json: bool) -> Result<(), Error> {
    let teams: usize = pargs.value_from_str("--teams")?;
    let pools: usize = pargs.value_from_str("--pools")?;
    let format: Option<PoolFormat> = pargs.opt_value_from_fn("--format", parse_format)?;
    let qualified: Option<usize> = pargs.opt_value_from_str("--qualified")?;
    let per_team: usize = pargs
        .opt_value_from_str("--players-per-team")?
        .unwrap_or(1);
    finish(pargs)?;

    if per_team == 0 {
        bail!("--players-per-team must be at least 1");
    }

    let sizes = distribute(teams, pools)?;
    let matches = format.map(|format| total_matches(format, &sizes));
    let allocation = qualified.map(|qualified| {
        let players: Vec<usize> = sizes.iter().map(|&size| size * per_team).collect();
        distribute_qualifiers(qualified, &players, per_team)
    });

    if json {
        let output = serde_json::json!({
            "teams_per_pool": sizes,
            "total_matches": matches,
            "qualifiers_per_pool": allocation,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Teams per pool: {sizes:?}");
    if let (Some(format), Some(matches)) = (format, matches) {
        println!("Matches ({format}): {matches}");
    }
    if let Some(allocation) = allocation {
        println!("Qualifiers per pool: {allocation:?}");
    }
    Ok(())
}

fn finish(pargs: Arguments) -> Result<(), Error> {
    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }
    Ok(())
}

fn parse_start(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|time| time.with_timezone(&Utc))
}

fn parse_format(value: &str) -> Result<PoolFormat, String> {
    match value.to_lowercase().as_str() {
        "kob" | "king" => Ok(PoolFormat::KingOfTheBeach),
        "round-robin" | "rr" => Ok(PoolFormat::RoundRobin),
        other => Err(format!("unknown pool format {other:?}")),
    }
}

fn describe_slot(bracket: &Bracket, slot: &Slot) -> String {
    match slot {
        Slot::Resolved(id) => bracket
            .entrant(*id)
            .map(|entrant| format!("{} [{}]", entrant.name, entrant.seed))
            .unwrap_or_else(|| id.to_string()),
        Slot::Placeholder { source, role } => format!("{role} of #{source}"),
    }
}

fn print_bracket(bracket: &Bracket) {
    println!(
        "{} entrants, {} slots, {} byes",
        bracket.entrants.len(),
        bracket.total_slots,
        bracket.byes
    );
    for round in &bracket.rounds {
        println!("\n{}", round.name);
        for &id in &round.matches {
            let m = &bracket.matches[id];
            println!(
                "  #{id:<3} {} vs {}",
                describe_slot(bracket, &m.slots[0]),
                describe_slot(bracket, &m.slots[1])
            );
        }
    }
}

fn print_plan(plan: &Configuration, start: Option<DateTime<Utc>>) {
    let chain: Vec<String> = plan.chain().iter().map(usize::to_string).collect();
    println!(
        "{} ({}): {} matches, about {}h{:02}",
        plan.name,
        chain.join(" > "),
        plan.total_matches,
        plan.estimated_minutes / 60,
        plan.estimated_minutes % 60
    );

    for phase in &plan.phases {
        println!(
            "  Phase {}: {} players, teams of {}, {} pools {:?}, qualifiers {:?}, {} matches, {} min",
            phase.phase_number,
            phase.total_players,
            phase.players_per_team,
            phase.format,
            phase.pool_distribution(),
            phase.qualifier_distribution(),
            phase.total_matches,
            phase.estimated_minutes
        );
    }
    for issue in &plan.issues {
        println!("  ! {issue}");
    }

    if let Some(start) = start {
        for window in schedule(&plan.phases, start) {
            println!(
                "  Phase {} runs {} to {}",
                window.phase_number,
                window.start.format("%Y-%m-%d %H:%M"),
                window.end.format("%H:%M")
            );
        }
    }
    println!();
}
