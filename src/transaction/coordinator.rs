use serde_json::Map;
use tracing::{debug, info, warn};

use super::{
    TransactionReceipt, TransactionRequest, TransactionState, Workflow, DEFAULT_IR_WINDOW_END,
    IR_REMOVAL_MIN_WAIVERS, WAIVER_COST,
};
use crate::cli::types::PlayerId;
use crate::core::CacheChange;
use crate::error::{ConflictKind, LeagueError, Result, ValidationFailure};
use crate::league::{FantasyTeam, LeagueClient, OwnershipIndex};
use crate::store::{paths, DocumentStore};

/// Runs roster transactions for the client's user, one at a time.
pub struct TransactionCoordinator<'a, S> {
    client: &'a LeagueClient<S>,
    ir_window_end: u16,
    state: TransactionState,
}

impl<'a, S: DocumentStore> TransactionCoordinator<'a, S> {
    pub fn new(client: &'a LeagueClient<S>) -> Self {
        Self {
            client,
            ir_window_end: DEFAULT_IR_WINDOW_END,
            state: TransactionState::Idle,
        }
    }

    /// Last week (inclusive) in which players may be placed on IR.
    pub fn with_ir_window_end(mut self, week: u16) -> Self {
        self.ir_window_end = week;
        self
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Run one transaction to `Done` or `Rejected`.
    ///
    /// Nothing is retried. A `Conflict` error means the store changed under
    /// the caller; the user's cache has already been cleared.
    pub async fn submit(&mut self, request: TransactionRequest) -> Result<TransactionReceipt> {
        self.state = TransactionState::Idle;
        info!(team = %request.team, workflow = %request.workflow, "transaction submitted");

        if let Err(e) = self.preflight(&request).await {
            return Err(self.reject(&request, e));
        }

        self.transition(TransactionState::Validating);
        let (team, others) = match self.validate(&request).await {
            Ok(fresh) => fresh,
            Err(e) => return Err(self.reject(&request, e)),
        };

        self.transition(TransactionState::Committing);
        let receipt = match self.commit(&request, team).await {
            Ok(receipt) => receipt,
            Err(e) => {
                // the write may or may not have landed
                self.client
                    .cache()
                    .invalidate_on_change(self.client.user(), request.workflow.cache_change());
                self.client.forget_ownership();
                return Err(self.reject(&request, e));
            }
        };

        self.client
            .cache()
            .invalidate_on_change(self.client.user(), request.workflow.cache_change());
        let updated = updated_team(&receipt);
        self.client.replace_ownership(OwnershipIndex::build(
            others.iter().chain(std::iter::once(&updated)),
        ));
        self.transition(TransactionState::Done);
        info!(
            team = %receipt.team,
            waivers = receipt.waivers,
            "transaction committed"
        );
        Ok(receipt)
    }

    fn transition(&mut self, next: TransactionState) {
        debug!(from = %self.state, to = %next, "transaction state");
        self.state = next;
    }

    fn reject(&mut self, request: &TransactionRequest, error: LeagueError) -> LeagueError {
        if error.is_conflict() {
            self.client
                .cache()
                .invalidate_on_change(self.client.user(), CacheChange::Conflict);
            self.client.forget_ownership();
        }
        warn!(
            team = %request.team,
            workflow = request.workflow.name(),
            from = %self.state,
            error = %error,
            "transaction rejected"
        );
        self.state = TransactionState::Rejected;
        error
    }

    /// Checks against cached data; failures are validation errors.
    async fn preflight(&self, request: &TransactionRequest) -> Result<()> {
        let team = self.client.team(&request.team).await?;

        if let Workflow::PlaceOnIr { .. } = request.workflow {
            let week = self.client.current_date().await?.week.as_u16();
            if week < 1 || week > self.ir_window_end {
                return Err(ValidationFailure::IrWindowClosed {
                    week,
                    last_week: self.ir_window_end,
                }
                .into());
            }
        }

        check_rules(&team, &request.workflow).map_err(LeagueError::from)?;

        if let Some(add) = request.workflow.free_agent() {
            if let Some(owner) = self.client.ownership().await?.owner_of(add) {
                return Err(ValidationFailure::PlayerNotFree {
                    player: add.clone(),
                    owner: owner.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Re-read authoritative state. Returns the acting team and every other team.
    async fn validate(
        &self,
        request: &TransactionRequest,
    ) -> Result<(FantasyTeam, Vec<FantasyTeam>)> {
        let cached = self.client.team(&request.team).await?;
        let team = self
            .client
            .fetch_team(&request.team)
            .await?
            .ok_or_else(|| ValidationFailure::TeamNotFound {
                team: request.team.clone(),
            })?;
        let all = self.client.fetch_teams().await?;

        if let Err(failure) = check_rules(&team, &request.workflow) {
            return Err(drift(&cached, &team, failure));
        }

        if let Some(add) = request.workflow.free_agent() {
            if self.client.fetch_player(add).await?.is_none() {
                return Err(ValidationFailure::PlayerNotFound {
                    player: add.clone(),
                }
                .into());
            }
            if let Some(owner) = OwnershipIndex::build(&all).owner_of(add) {
                return Err(ConflictKind::FreeAgentClaimed {
                    player: add.clone(),
                    owner: owner.clone(),
                }
                .into());
            }
        }

        let others = all.into_iter().filter(|t| t.name != team.name).collect();
        Ok((team, others))
    }

    async fn commit(
        &self,
        request: &TransactionRequest,
        mut team: FantasyTeam,
    ) -> Result<TransactionReceipt> {
        let workflow = &request.workflow;
        replace_on_roster(&mut team.roster, workflow.outgoing(), workflow.incoming());
        match workflow {
            Workflow::DropAdd { .. } => {}
            Workflow::PlaceOnIr { injured, .. } => team.ir_list = vec![injured.clone()],
            Workflow::RemoveFromIr { injured, .. } => team.ir_list.retain(|id| id != injured),
        }
        let waivers = team.waivers.saturating_sub(WAIVER_COST);

        let mut fields = Map::new();
        fields.insert("roster".to_string(), serde_json::to_value(&team.roster)?);
        fields.insert("irList".to_string(), serde_json::to_value(&team.ir_list)?);
        fields.insert("waivers".to_string(), waivers.into());
        self.client
            .store()
            .update_fields(&paths::fantasy_team(&team.name), fields)
            .await?;

        Ok(TransactionReceipt {
            team: team.name,
            workflow: workflow.clone(),
            roster: team.roster,
            ir_list: team.ir_list,
            waivers,
        })
    }
}

/// Roster, IR, and waiver rules for a workflow against one team snapshot.
fn check_rules(team: &FantasyTeam, workflow: &Workflow) -> std::result::Result<(), ValidationFailure> {
    let not_on_roster = |player: &PlayerId| ValidationFailure::PlayerNotOnRoster {
        team: team.name.clone(),
        player: player.clone(),
    };

    match workflow {
        Workflow::DropAdd { drop, .. } => {
            if !team.has_on_roster(drop) {
                return Err(not_on_roster(drop));
            }
            require_waivers(team.waivers, WAIVER_COST)?;
            if team.ir_occupied() && team.waivers <= 1 {
                return Err(ValidationFailure::WaiverReservedForIr {
                    waivers: team.waivers,
                });
            }
        }
        Workflow::PlaceOnIr { injured, .. } => {
            if !team.has_on_roster(injured) {
                return Err(not_on_roster(injured));
            }
            if team.ir_occupied() {
                return Err(ValidationFailure::IrListFull {
                    team: team.name.clone(),
                });
            }
            require_waivers(team.waivers, WAIVER_COST)?;
        }
        Workflow::RemoveFromIr { injured, drop } => {
            if !team.has_on_ir(injured) {
                return Err(ValidationFailure::PlayerNotOnIr {
                    team: team.name.clone(),
                    player: injured.clone(),
                });
            }
            if !team.has_on_roster(drop) {
                return Err(not_on_roster(drop));
            }
            require_waivers(team.waivers, IR_REMOVAL_MIN_WAIVERS)?;
        }
    }
    Ok(())
}

fn require_waivers(waivers: u32, required: u32) -> std::result::Result<(), ValidationFailure> {
    if waivers < required {
        return Err(ValidationFailure::InsufficientWaivers { waivers, required });
    }
    Ok(())
}

/// Map a rule that failed on fresh state to the drift that caused it.
fn drift(cached: &FantasyTeam, fresh: &FantasyTeam, failure: ValidationFailure) -> LeagueError {
    let kind = match failure {
        ValidationFailure::PlayerNotOnRoster { team, player } => {
            ConflictKind::PlayerNoLongerOwned { team, player }
        }
        ValidationFailure::PlayerNotOnIr { team, player } => {
            ConflictKind::PlayerNoLongerOnIr { team, player }
        }
        ValidationFailure::IrListFull { team } => ConflictKind::IrListChanged { team },
        // waivers unchanged means the IR list filled up
        ValidationFailure::WaiverReservedForIr { waivers } if cached.waivers == waivers => {
            ConflictKind::IrListChanged {
                team: fresh.name.clone(),
            }
        }
        ValidationFailure::InsufficientWaivers { waivers, .. }
        | ValidationFailure::WaiverReservedForIr { waivers } => {
            ConflictKind::WaiversChanged { waivers }
        }
        other => return other.into(),
    };
    kind.into()
}

/// The incoming player takes the outgoing player's roster index.
fn replace_on_roster(roster: &mut Vec<PlayerId>, outgoing: &PlayerId, incoming: &PlayerId) {
    match roster.iter().position(|id| id == outgoing) {
        Some(index) => roster[index] = incoming.clone(),
        None => roster.push(incoming.clone()),
    }
}

fn updated_team(receipt: &TransactionReceipt) -> FantasyTeam {
    FantasyTeam {
        name: receipt.team.clone(),
        roster: receipt.roster.clone(),
        ir_list: receipt.ir_list.clone(),
        waivers: receipt.waivers,
        division: String::new(),
    }
}
