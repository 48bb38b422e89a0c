use clap::Args;
use mindmend_core::{
    AnalyticsEngine, Config, JsonFileEntryStore, MemoryKvStore, NotificationGate, SqliteKvStore,
};

use super::{CmdResult, EntrySource};

#[derive(Args)]
pub struct BadgeArgs {
    #[command(flatten)]
    source: EntrySource,
    /// Keep badge state in memory instead of the local state database
    #[arg(long)]
    memory: bool,
}

pub fn run(args: BadgeArgs) -> CmdResult {
    let config = Config::load_or_default();
    let engine = AnalyticsEngine::from_config(&config);
    let store = JsonFileEntryStore::new(&args.source.entries);
    let clock = args.source.clock();

    let payload = if args.memory {
        let mut gate = NotificationGate::new(MemoryKvStore::new());
        engine.evaluate(&store, &mut gate, &clock)
    } else {
        let mut gate = NotificationGate::new(SqliteKvStore::open(config.state_db_path()?)?);
        engine.evaluate(&store, &mut gate, &clock)
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
