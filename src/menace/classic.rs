//! Classic MENACE reinforcement
//!
//! After each game every bead drawn is rewarded or confiscated by a fixed
//! amount depending on the result.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{state_table::StateTable, trace::GameTrace};
use crate::tictactoe::{GameOutcome, Player};

/// Result of a game from the learner's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Translate a board-level outcome for the side playing `player`.
    pub fn for_player(outcome: GameOutcome, player: Player) -> Self {
        match outcome {
            GameOutcome::Win(winner) if winner == player => Outcome::Win,
            GameOutcome::Win(_) => Outcome::Loss,
            GameOutcome::Draw => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Loss => "loss",
        };
        f.write_str(name)
    }
}

/// MENACE reinforcement values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    pub win: i16,
    pub draw: i16,
    pub loss: i16,
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        ReinforcementValues {
            win: 3,
            draw: 1,
            loss: -1,
        }
    }
}

impl ReinforcementValues {
    pub fn delta(&self, outcome: Outcome) -> i16 {
        match outcome {
            Outcome::Win => self.win,
            Outcome::Draw => self.draw,
            Outcome::Loss => self.loss,
        }
    }
}

impl FromStr for ReinforcementValues {
    type Err = crate::Error;

    /// Accepts `3,1,-1` or `win=3,draw=1,loss=-1` (any order, missing keys keep defaults).
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| crate::Error::ParseReward {
            input: input.to_string(),
            reason,
        };
        let parse_value = |raw: &str| {
            raw.trim()
                .parse::<i16>()
                .map_err(|e| err(format!("'{}' is not an integer: {e}", raw.trim())))
        };

        let parts: Vec<&str> = input.split(',').map(str::trim).collect();
        let mut values = ReinforcementValues::default();

        if parts.iter().all(|part| !part.contains('=')) {
            if parts.len() != 3 {
                return Err(err(format!("expected 3 values, got {}", parts.len())));
            }
            values.win = parse_value(parts[0])?;
            values.draw = parse_value(parts[1])?;
            values.loss = parse_value(parts[2])?;
            return Ok(values);
        }

        for part in parts {
            let (name, raw) = part
                .split_once('=')
                .ok_or_else(|| err(format!("'{part}' is not of the form name=value")))?;
            match name.trim().to_ascii_lowercase().as_str() {
                "win" => values.win = parse_value(raw)?,
                "draw" => values.draw = parse_value(raw)?,
                "loss" => values.loss = parse_value(raw)?,
                other => return Err(err(format!("unknown outcome '{other}'"))),
            }
        }
        Ok(values)
    }
}

impl StateTable {
    /// Apply the reward for `outcome` to every decision in `trace`.
    ///
    /// Counts saturate at zero. The trace is always left empty, and an empty
    /// trace changes nothing. Returns the number of bead slots adjusted.
    pub fn reinforce(
        &mut self,
        trace: &mut GameTrace,
        outcome: Outcome,
        values: &ReinforcementValues,
    ) -> usize {
        let delta = values.delta(outcome);
        let mut adjusted = 0;
        for step in trace.drain() {
            self.get_or_insert(&step.key).reinforce(step.position, delta);
            adjusted += 1;
        }
        adjusted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateKey;

    #[test]
    fn outcome_is_relative_to_player() {
        let x_wins = GameOutcome::Win(Player::X);
        assert_eq!(Outcome::for_player(x_wins, Player::X), Outcome::Win);
        assert_eq!(Outcome::for_player(x_wins, Player::O), Outcome::Loss);
        assert_eq!(
            Outcome::for_player(GameOutcome::Draw, Player::O),
            Outcome::Draw
        );
    }

    #[test]
    fn parse_reward_schedules() {
        let positional: ReinforcementValues = "3,1,-1".parse().unwrap();
        assert_eq!(positional, ReinforcementValues::default());

        let named: ReinforcementValues = "loss=-2, win=5".parse().unwrap();
        assert_eq!(named.win, 5);
        assert_eq!(named.draw, 1);
        assert_eq!(named.loss, -2);

        assert!("3,1".parse::<ReinforcementValues>().is_err());
        assert!("win=x".parse::<ReinforcementValues>().is_err());
        assert!("tie=1".parse::<ReinforcementValues>().is_err());
    }

    #[test]
    fn reinforce_applies_delta_to_each_step_and_drains() {
        let mut table = StateTable::new(4).unwrap();
        let first = StateKey::parse("000000000").unwrap();
        let second = StateKey::parse("100020000").unwrap();

        let mut trace = GameTrace::new();
        trace.record(first.clone(), 0);
        trace.record(second.clone(), 2);

        let adjusted = table.reinforce(&mut trace, Outcome::Win, &ReinforcementValues::default());
        assert_eq!(adjusted, 2);
        assert!(trace.is_empty());
        assert_eq!(table.get(&first).unwrap().bead_count(0), 7);
        assert_eq!(table.get(&first).unwrap().bead_count(1), 4);
        assert_eq!(table.get(&second).unwrap().bead_count(2), 7);
    }

    #[test]
    fn empty_trace_is_a_no_op() {
        let mut table = StateTable::new(4).unwrap();
        let mut trace = GameTrace::new();
        let adjusted = table.reinforce(&mut trace, Outcome::Loss, &ReinforcementValues::default());
        assert_eq!(adjusted, 0);
        assert!(table.is_empty());
        assert!(trace.is_empty());
    }

    #[test]
    fn losses_floor_at_zero() {
        let mut table = StateTable::new(1).unwrap();
        let key = StateKey::parse("000000000").unwrap();
        for _ in 0..3 {
            let mut trace = GameTrace::new();
            trace.record(key.clone(), 4);
            table.reinforce(&mut trace, Outcome::Loss, &ReinforcementValues::default());
        }
        assert_eq!(table.get(&key).unwrap().bead_count(4), 0);
    }
}
