//! Policy-backed pursuit.
//!
//! Wraps an external decision source (typically a pre-trained model
//! exported behind [`DecisionSource`]). The observation it sees is
//! positions only, with no obstacle information, matching the behavior
//! the policy was trained against; the returned direction is therefore
//! validated here exactly like a player step before it moves anything.

use crate::engine::movement::step_target;
use crate::env::{DecisionSource, OracleError};
use crate::input::Direction;
use crate::state::RoundContext;

/// Why a policy decision could not be applied this tick.
///
/// All of these degrade the adversary to holding position; none of
/// them ends the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("decision source failed to produce directions")]
    SourceFailed,

    #[error("decision source returned {got} directions for {expected} adversaries")]
    WrongArity { expected: usize, got: usize },

    #[error("direction code {code} is not in 0..=3")]
    BadCode { code: u8 },
}

/// Fixed-shape observation vector: each adversary's `(x, y)` in roster
/// order, then the player's `(x, y)`.
pub fn build_observation(ctx: &RoundContext) -> Vec<i32> {
    let mut observation = Vec::with_capacity(2 * (ctx.adversaries.len() + 1));
    for adversary in &ctx.adversaries {
        observation.push(adversary.position.x);
        observation.push(adversary.position.y);
    }
    observation.push(ctx.player.position.x);
    observation.push(ctx.player.position.y);
    observation
}

/// Asks the decision source for this adversary's step.
///
/// `Ok(None)` is a legal hold: the source pointed into a wall or off
/// the board, and the grid wins. `Err` means the source itself is
/// unusable this tick.
pub fn next_step(
    ctx: &RoundContext,
    decisions: Result<&dyn DecisionSource, OracleError>,
    adversary: usize,
) -> Result<Option<crate::state::Position>, PolicyError> {
    let decisions = decisions?;
    let observation = build_observation(ctx);
    let codes = decisions
        .direction_codes(&observation)
        .ok_or(PolicyError::SourceFailed)?;

    if codes.len() != ctx.adversaries.len() {
        return Err(PolicyError::WrongArity {
            expected: ctx.adversaries.len(),
            got: codes.len(),
        });
    }

    let code = codes[adversary];
    let direction = Direction::from_code(code).ok_or(PolicyError::BadCode { code })?;

    Ok(step_target(
        &ctx.field,
        ctx.adversaries[adversary].position,
        direction,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoundConfig;
    use crate::state::{
        AdversaryRoster, AdversaryState, Field, PlayerState, Position, RoundContext,
    };
    use crate::strategy::StrategyKind;

    struct Fixed(Vec<u8>);

    impl DecisionSource for Fixed {
        fn direction_codes(&self, _observation: &[i32]) -> Option<Vec<u8>> {
            Some(self.0.clone())
        }
    }

    struct Broken;

    impl DecisionSource for Broken {
        fn direction_codes(&self, _observation: &[i32]) -> Option<Vec<u8>> {
            None
        }
    }

    fn context() -> RoundContext {
        let mut adversaries = AdversaryRoster::new();
        adversaries.push(AdversaryState::new(
            Position::new(7, 2),
            400,
            StrategyKind::Policy,
        ));
        adversaries.push(AdversaryState::new(
            Position::new(0, 9),
            400,
            StrategyKind::Policy,
        ));
        RoundContext::new(
            RoundConfig::default(),
            0,
            Field::new(10, 10),
            PlayerState::new(Position::new(3, 3)),
            adversaries,
        )
    }

    #[test]
    fn observation_is_adversaries_then_player() {
        let ctx = context();
        assert_eq!(build_observation(&ctx), vec![7, 2, 0, 9, 3, 3]);
    }

    #[test]
    fn applies_own_code_from_the_reply() {
        let ctx = context();
        let source = Fixed(vec![2, 0]); // left, up
        let step = next_step(&ctx, Ok(&source), 0).unwrap();
        assert_eq!(step, Some(Position::new(6, 2)));
    }

    #[test]
    fn wall_and_boundary_codes_turn_into_holds() {
        let mut ctx = context();
        ctx.field.set_blocked(Position::new(7, 1));
        let source = Fixed(vec![0, 2]); // up into rock, left off the board
        assert_eq!(next_step(&ctx, Ok(&source), 0).unwrap(), None);
        assert_eq!(next_step(&ctx, Ok(&source), 1).unwrap(), None);
    }

    #[test]
    fn malformed_replies_are_reported() {
        let ctx = context();
        assert_eq!(
            next_step(&ctx, Ok(&Fixed(vec![0])), 0),
            Err(PolicyError::WrongArity {
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            next_step(&ctx, Ok(&Fixed(vec![9, 0])), 0),
            Err(PolicyError::BadCode { code: 9 })
        );
        assert_eq!(next_step(&ctx, Ok(&Broken), 0), Err(PolicyError::SourceFailed));
        assert_eq!(
            next_step(&ctx, Err(OracleError::DecisionsNotAvailable), 0),
            Err(PolicyError::Oracle(OracleError::DecisionsNotAvailable))
        );
    }
}
