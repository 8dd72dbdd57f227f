//! Command-line arguments.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use relic_core::constants::DEFAULT_PLAYER_NAME;
use relic_core::types::Position;

/// Ticks run headless when neither `--ticks` nor `--realtime-secs` is given.
pub const DEFAULT_TICKS: u64 = 3000;

/// Run a relic-guard session without a UI
#[derive(Parser, Debug)]
#[command(name = "relic-guard", version, about)]
pub struct Args {
    /// Game configuration JSON (defaults to the built-in campaign)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// RNG seed; the same seed replays the same session
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Player name
    #[arg(short, long, default_value = DEFAULT_PLAYER_NAME)]
    pub player: String,

    /// Run this many ticks as fast as possible
    #[arg(long, value_name = "N", conflicts_with = "realtime_secs")]
    pub ticks: Option<u64>,

    /// Run on the 10 Hz runner for this many wall-clock seconds
    #[arg(long, value_name = "SECS")]
    pub realtime_secs: Option<u64>,

    /// Defense to place at each level start, e.g. `turret@11,12` (repeatable)
    #[arg(short, long = "defense", value_name = "TEMPLATE@X,Y")]
    pub defenses: Vec<DefenseSpec>,

    /// Move on to the next level whenever one is completed
    #[arg(long)]
    pub auto_advance: bool,

    /// Node-expansion cap for path searches (unbounded if omitted)
    #[arg(long, value_name = "NODES")]
    pub path_budget: Option<usize>,

    /// Directory holding save slots
    #[arg(long, value_name = "DIR", default_value = "saves")]
    pub save_dir: PathBuf,

    /// Save the session to this slot when the run ends
    #[arg(long, value_name = "SLOT")]
    pub save_slot: Option<String>,

    /// Resume the session stored in this slot
    #[arg(long, value_name = "SLOT")]
    pub load_slot: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    pub dump_config: bool,
}

/// A `template@x,y` placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefenseSpec {
    pub template_id: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefenseSpecError(String);

impl fmt::Display for DefenseSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected TEMPLATE@X,Y, got `{}`", self.0)
    }
}

impl std::error::Error for DefenseSpecError {}

impl FromStr for DefenseSpec {
    type Err = DefenseSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || DefenseSpecError(s.to_string());
        let (template, coords) = s.split_once('@').ok_or_else(err)?;
        let (x, y) = coords.split_once(',').ok_or_else(err)?;
        let template = template.trim();
        if template.is_empty() {
            return Err(err());
        }
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self {
            template_id: template.to_string(),
            position: Position::new(x, y),
        })
    }
}
