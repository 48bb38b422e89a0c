use clap::Args;
use mindmend_core::{AnalyticsEngine, Config, JsonFileEntryStore};

use super::{CmdResult, EntrySource};

#[derive(Args)]
pub struct InsightsArgs {
    #[command(flatten)]
    source: EntrySource,
}

pub fn run(args: InsightsArgs) -> CmdResult {
    let engine = AnalyticsEngine::from_config(&Config::load_or_default());
    let entries = engine.snapshot(&JsonFileEntryStore::new(&args.source.entries));
    let insights = engine.insights(&entries, &args.source.clock());
    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}
