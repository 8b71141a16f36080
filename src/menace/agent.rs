//! MENACE agent: a state table plus the random source used to draw beads.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{
    builder::MenaceAgentBuilder,
    classic::{Outcome, ReinforcementValues},
    state_table::{StateTable, TableStats, legal_positions},
    trace::GameTrace,
};
use crate::{Result, ports::Learner, tictactoe::Board};

/// MENACE learning agent
pub struct MenaceAgent {
    pub(crate) table: StateTable,
    pub(crate) rng: StdRng,
    pub(crate) reinforcement: ReinforcementValues,
    pub(crate) games_trained: usize,
}

impl std::fmt::Debug for MenaceAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenaceAgent")
            .field("states", &self.table.len())
            .field("initial_beads", &self.table.initial_beads())
            .field("reinforcement", &self.reinforcement)
            .field("games_trained", &self.games_trained)
            .finish()
    }
}

impl MenaceAgent {
    /// Create a new builder for constructing a MENACE agent.
    ///
    /// # Example
    /// ```
    /// use menace::menace::MenaceAgent;
    ///
    /// let agent = MenaceAgent::builder()
    ///     .seed(42)
    ///     .initial_beads(3)
    ///     .build()?;
    /// assert_eq!(agent.table().initial_beads(), 3);
    /// # Ok::<(), menace::Error>(())
    /// ```
    pub fn builder() -> MenaceAgentBuilder {
        MenaceAgentBuilder::new()
    }

    /// Create an agent with four initial beads and the 3/1/-1 schedule.
    ///
    /// # Errors
    /// Never fails with the default configuration; the signature matches
    /// [`MenaceAgentBuilder::build`].
    pub fn new(seed: Option<u64>) -> Result<Self> {
        let mut builder = Self::builder();
        if let Some(s) = seed {
            builder = builder.seed(s);
        }
        builder.build()
    }

    /// Set or reset the agent's RNG seed
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = rng_from_seed(seed);
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut StateTable {
        &mut self.table
    }

    pub fn into_table(self) -> StateTable {
        self.table
    }

    pub fn reinforcement_values(&self) -> ReinforcementValues {
        self.reinforcement
    }

    pub fn set_reinforcement_values(&mut self, values: ReinforcementValues) {
        self.reinforcement = values;
    }

    /// Number of games this agent has been reinforced on
    pub fn games_trained(&self) -> usize {
        self.games_trained
    }

    /// Draw a move for `board`, recording the decision in `trace`.
    ///
    /// `None` means the board has no empty cell.
    pub fn select_move(&mut self, board: &Board, trace: &mut GameTrace) -> Option<usize> {
        self.table.select_move(board, &mut self.rng, trace)
    }

    /// Apply the configured reward for `outcome` to every step of `trace`.
    pub fn reinforce(&mut self, trace: &mut GameTrace, outcome: Outcome) -> usize {
        let adjusted = self
            .table
            .reinforce(trace, outcome, &self.reinforcement);
        self.games_trained += 1;
        adjusted
    }

    /// Current draw probabilities for `board`, in the board's own frame.
    ///
    /// Empty when the board is full or the state has never been visited.
    /// A visited state whose beads have all run out reports the uniform
    /// distribution it would be restocked to.
    pub fn move_distribution(&self, board: &Board) -> Vec<(usize, f64)> {
        let ctx = board.canonical_context();
        let Some(matchbox) = self.table.get(&ctx.key) else {
            return Vec::new();
        };
        let legal = legal_positions(&ctx.key);
        let total = matchbox.total_beads(&legal);

        let mut distribution: Vec<(usize, f64)> = legal
            .iter()
            .map(|&pos| {
                let probability = if total == 0 {
                    1.0 / legal.len() as f64
                } else {
                    f64::from(matchbox.bead_count(pos)) / total as f64
                };
                (ctx.to_original(pos), probability)
            })
            .collect();
        distribution.sort_by_key(|&(pos, _)| pos);
        distribution
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> AgentStats {
        AgentStats {
            games_trained: self.games_trained,
            table: self.table.stats(),
        }
    }
}

impl Learner for MenaceAgent {
    fn select_move(&mut self, board: &Board, trace: &mut GameTrace) -> Result<Option<usize>> {
        Ok(MenaceAgent::select_move(self, board, trace))
    }

    fn reinforce(&mut self, trace: &mut GameTrace, outcome: Outcome) -> Result<()> {
        MenaceAgent::reinforce(self, trace, outcome);
        Ok(())
    }

    fn name(&self) -> &str {
        "menace"
    }
}

/// Statistics about a MENACE agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub games_trained: usize,
    pub table: TableStats,
}

pub(crate) fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(value) => StdRng::seed_from_u64(value),
        None => StdRng::from_os_rng(),
    }
}
