use clap::Args;
use mindmend_core::{AnalyticsEngine, JsonFileEntryStore, StreakTier};
use serde::Serialize;

use super::{CmdResult, EntrySource};

#[derive(Args)]
pub struct StreakArgs {
    #[command(flatten)]
    source: EntrySource,
}

#[derive(Serialize)]
struct StreakOutput {
    streak: u32,
    tier: StreakTier,
    message: &'static str,
}

pub fn run(args: StreakArgs) -> CmdResult {
    let engine = AnalyticsEngine::new();
    let entries = engine.snapshot(&JsonFileEntryStore::new(&args.source.entries));
    let streak = engine.streak(&entries, &args.source.clock());
    let tier = StreakTier::for_streak(streak);

    let output = StreakOutput {
        streak,
        tier,
        message: tier.message(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
