//! Drop/add and IR command implementations

use crate::{
    league::LeagueClient,
    store::DocumentStore,
    transaction::{TransactionCoordinator, TransactionReceipt, TransactionRequest},
    Result,
};

use super::common::print_json;

/// Run one transaction to completion.
pub async fn submit_transaction<S: DocumentStore>(
    client: &LeagueClient<S>,
    ir_window_end: u16,
    request: TransactionRequest,
) -> Result<TransactionReceipt> {
    let mut coordinator = TransactionCoordinator::new(client).with_ir_window_end(ir_window_end);
    coordinator.submit(request).await
}

/// Handle the drop-add, ir-place and ir-remove commands
pub async fn handle_transaction<S: DocumentStore>(
    client: &LeagueClient<S>,
    ir_window_end: u16,
    request: TransactionRequest,
    as_json: bool,
) -> Result<()> {
    let receipt = submit_transaction(client, ir_window_end, request).await?;

    if as_json {
        return print_json(&receipt);
    }

    println!("✓ {} completed for {}: {}", receipt.workflow.name(), receipt.team, receipt.workflow);
    println!("  Waivers remaining: {}", receipt.waivers);
    println!("  Roster: {}", join_ids(&receipt.roster));
    if !receipt.ir_list.is_empty() {
        println!("  IR: {}", join_ids(&receipt.ir_list));
    }
    Ok(())
}

fn join_ids(ids: &[crate::PlayerId]) -> String {
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}
