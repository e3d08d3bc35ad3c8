//! Duck contacts and the two reactions to them.

use super::spawner::PipePairSpec;
use super::types::{FrameOutcome, RoundState};
use crate::audio::SoundEffect;
use crate::core::config::GameConfig;
use tracing::{debug, info};

/// A contact, keyed by the kind of entity the duck touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    DuckPipe { pair: u64 },
    DuckTrigger { trigger: u64 },
}

/// What the scene must do after a contact is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactResponse {
    Continue,
    RestartRound,
}

/// Every current contact. Pipe contacts come first so a crash wins over a
/// point scored on the same step.
pub fn detect_contacts(round: &RoundState) -> Vec<Contact> {
    let duck = &round.duck.body;
    let mut contacts: Vec<Contact> = round
        .pipes
        .iter()
        .filter(|pair| duck.overlaps(&pair.top) || duck.overlaps(&pair.bottom))
        .map(|pair| Contact::DuckPipe { pair: pair.id })
        .collect();

    contacts.extend(
        round
            .triggers
            .iter()
            .filter(|trigger| duck.overlaps(&trigger.body))
            .map(|trigger| Contact::DuckTrigger {
                trigger: trigger.id,
            }),
    );
    contacts
}

/// React to one contact.
///
/// A pipe hit queues the quack and asks for a restart. A trigger crossing
/// spawns the next pair from `pipes`, removes the trigger and bumps the score.
pub fn handle_contact<I>(
    round: &mut RoundState,
    contact: Contact,
    pipes: &mut I,
    config: &GameConfig,
    outcome: &mut FrameOutcome,
) -> ContactResponse
where
    I: Iterator<Item = PipePairSpec>,
{
    match contact {
        Contact::DuckPipe { pair } => {
            info!(pair, score = round.score, "Duck hit a pipe");
            outcome.sounds.push(SoundEffect::Quack);
            ContactResponse::RestartRound
        }
        Contact::DuckTrigger { trigger } => {
            let Some(index) = round.triggers.iter().position(|t| t.id == trigger) else {
                return ContactResponse::Continue;
            };

            if let Some(spec) = pipes.next() {
                let id = round.add_pipe_pair(&spec, config);
                outcome.pipes_spawned += 1;
                debug!(id, offset = spec.offset, "Spawned pipe pair");
            }

            round.triggers.remove(index);
            round.set_score(round.score + 1);
            outcome.points_scored += 1;
            debug!(score = round.score, "Scored");
            ContactResponse::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flappy::spawner::{PipeGeometry, PipeSpawner};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn spawner(config: &GameConfig) -> PipeSpawner<ChaCha8Rng> {
        PipeSpawner::new(
            PipeGeometry {
                canvas_height: config.height(),
                spawn_x: config.pipe_spawn_x(),
                pipe_width: config.pipe_width,
                pipe_height: config.pipe_height,
                gap: config.pipe_gap,
            },
            ChaCha8Rng::seed_from_u64(5),
        )
        .unwrap()
    }

    /// Round with one pair moved onto the duck's column.
    fn round_with_pair_at_duck(offset: i64) -> (GameConfig, RoundState, PipeSpawner<ChaCha8Rng>) {
        let config = GameConfig::default();
        let spawner = spawner(&config);
        let mut round = RoundState::new(&config, 0);
        let spec = spawner.layout(0, offset);
        round.add_pipe_pair(&spec, &config);
        let duck_x = round.duck.body.x;
        round.pipes[0].top.x = duck_x;
        round.pipes[0].bottom.x = duck_x;
        (config, round, spawner)
    }

    #[test]
    fn test_no_contacts_at_spawn() {
        let config = GameConfig::default();
        let mut spawner = spawner(&config);
        let mut round = RoundState::new(&config, 0);
        let spec = spawner.next().unwrap();
        round.add_pipe_pair(&spec, &config);
        assert!(detect_contacts(&round).is_empty());
    }

    #[test]
    fn test_duck_in_gap_touches_nothing() {
        // Gap spans [offset + 160, offset + 310]; duck center 250, half size 16
        let (_, round, _) = round_with_pair_at_duck(20);
        assert!(detect_contacts(&round).is_empty());
    }

    #[test]
    fn test_duck_hits_top_pipe() {
        let (_, round, _) = round_with_pair_at_duck(160);
        assert_eq!(detect_contacts(&round), vec![Contact::DuckPipe { pair: 0 }]);
    }

    #[test]
    fn test_pipe_contact_listed_before_trigger() {
        let (_, mut round, _) = round_with_pair_at_duck(160);
        round.triggers[0].body.x = round.duck.body.x;
        let contacts = detect_contacts(&round);
        assert_eq!(
            contacts,
            vec![Contact::DuckPipe { pair: 0 }, Contact::DuckTrigger { trigger: 0 }]
        );
    }

    #[test]
    fn test_pipe_contact_requests_restart_with_quack() {
        let (config, mut round, mut spawner) = round_with_pair_at_duck(160);
        let mut outcome = FrameOutcome::default();
        let response = handle_contact(
            &mut round,
            Contact::DuckPipe { pair: 0 },
            &mut spawner,
            &config,
            &mut outcome,
        );
        assert_eq!(response, ContactResponse::RestartRound);
        assert_eq!(outcome.sounds, vec![SoundEffect::Quack]);
    }

    #[test]
    fn test_trigger_scores_and_spawns_next_pair() {
        let (config, mut round, mut spawner) = round_with_pair_at_duck(20);
        let mut outcome = FrameOutcome::default();
        let response = handle_contact(
            &mut round,
            Contact::DuckTrigger { trigger: 0 },
            &mut spawner,
            &config,
            &mut outcome,
        );
        assert_eq!(response, ContactResponse::Continue);
        assert_eq!(round.score, 1);
        assert_eq!(round.score_text, "1");
        assert_eq!(round.pipes.len(), 2);
        assert_eq!(round.triggers.len(), 1);
        assert_eq!(round.triggers[0].id, 1);
        assert_eq!(round.pipes[1].top.x, config.pipe_spawn_x());
        assert_eq!(outcome.points_scored, 1);
        assert_eq!(outcome.pipes_spawned, 1);
        assert!(outcome.sounds.is_empty());
    }

    #[test]
    fn test_stale_trigger_is_ignored() {
        let (config, mut round, mut spawner) = round_with_pair_at_duck(20);
        let mut outcome = FrameOutcome::default();
        handle_contact(
            &mut round,
            Contact::DuckTrigger { trigger: 99 },
            &mut spawner,
            &config,
            &mut outcome,
        );
        assert_eq!(round.score, 0);
        assert_eq!(outcome, FrameOutcome::default());
    }
}
