//! Cache inspection and clearing

use crate::{cli::types::UserId, cli::CacheCmd, core::CacheLayer, Result};

use super::common::print_json;

/// Handle the cache subcommands
pub fn handle_cache(cache: &CacheLayer, user: &UserId, cmd: CacheCmd) -> Result<()> {
    match cmd {
        CacheCmd::Stats { json } => {
            let stats = cache.stats();
            if json {
                return print_json(&stats);
            }
            println!("Cache entries: {}", stats.total);
            for (class, count) in &stats.by_class {
                println!("  {:<14} {}", class.to_string(), count);
            }
        }
        CacheCmd::Clear { all } => {
            let removed = if all {
                cache.clear_all()
            } else {
                cache.clear_user(user)
            };
            println!("✓ Removed {} cache entries", removed);
        }
    }
    Ok(())
}
