use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use paddock_core::{
    simulate_race, sync_calendar, sync_to_clock, GameContent, PlayerId, TeamState,
};
use paddock_store::{load_content, GameStore};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Calendar mode of the daemon whose store is being inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClockMode {
    #[value(name = "realtime")]
    RealTime,
    Manual,
}

#[derive(Parser)]
#[command(name = "paddock_cli", about = "Paddock store inspection and maintenance")]
struct Cli {
    /// SQLite file holding every team.
    #[arg(long, env = "PADDOCK_DB", default_value = "data/paddock.db", global = true)]
    db: PathBuf,
    /// Game content JSON. Built-in content when omitted.
    #[arg(long, env = "PADDOCK_CONTENT", global = true)]
    content: Option<PathBuf>,
    /// Must match the daemon's `--clock` for previews to agree with it.
    #[arg(
        long,
        env = "PADDOCK_CLOCK",
        value_enum,
        default_value_t = ClockMode::RealTime,
        global = true
    )]
    clock: ClockMode,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every player, oldest first.
    Players,
    /// Print one team as stored, in JSON.
    Show {
        #[arg(long)]
        player: String,
    },
    /// Score a race for a team on its current day without paying out or saving.
    RacePreview {
        #[arg(long)]
        player: String,
    },
    /// Delete every team from the store.
    Reset {
        /// Required confirmation.
        #[arg(long)]
        yes: bool,
    },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn load_existing(store: &GameStore, player: &str) -> Result<TeamState> {
    let id = PlayerId(player.to_string());
    store
        .load_team(&id)?
        .with_context(|| format!("no player with id {id}"))
}

fn players_report(store: &GameStore) -> Result<String> {
    let players = store.list_players()?;
    if players.is_empty() {
        return Ok("no players\n".to_string());
    }
    let mut out = String::new();
    for p in players {
        let project = p.project.as_ref().map_or_else(
            || "-".to_string(),
            |r| format!("{} (day {})", r.component, r.completes_on_day),
        );
        out.push_str(&format!(
            "{}  {:<20} day {:>4}  money {:>9}  research {}\n",
            p.id,
            p.director.as_deref().unwrap_or("?"),
            p.day,
            p.money,
            project
        ));
    }
    Ok(out)
}

fn show_report(store: &GameStore, player: &str) -> Result<String> {
    let team = load_existing(store, player)?;
    let mut json = serde_json::to_string_pretty(&team).context("serializing team")?;
    json.push('\n');
    Ok(json)
}

fn race_preview_report(
    store: &GameStore,
    player: &str,
    content: &GameContent,
    clock: ClockMode,
    now_unix_s: i64,
) -> Result<String> {
    let mut team = load_existing(store, player)?;
    match clock {
        ClockMode::RealTime => {
            sync_to_clock(&mut team, now_unix_s, content);
        }
        ClockMode::Manual => {
            let day = team.player.day;
            sync_calendar(&mut team, day);
        }
    }
    let result = simulate_race(&team.components, &content.constants)?;
    Ok(format!(
        "day {}: position {}, average performance {:.2}, payout {}\n",
        team.player.day, result.position, result.average_performance, result.payout
    ))
}

fn reset_report(store: &GameStore, confirmed: bool) -> Result<String> {
    if !confirmed {
        bail!("refusing to delete every team without --yes");
    }
    let removed = store.reset()?;
    Ok(format!("removed {removed} players\n"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = GameStore::open_existing(&cli.db)?;
    let report = match cli.command {
        Commands::Players => players_report(&store)?,
        Commands::Show { player } => show_report(&store, &player)?,
        Commands::RacePreview { player } => {
            let content = match &cli.content {
                Some(path) => load_content(path)?,
                None => GameContent::default(),
            };
            let now = chrono::Utc::now().timestamp();
            race_preview_report(&store, &player, &content, cli.clock, now)?
        }
        Commands::Reset { yes } => reset_report(&store, yes)?,
    };
    print!("{report}");
    Ok(())
}
