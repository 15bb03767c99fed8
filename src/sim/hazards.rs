//! Hazard field
//!
//! Moves live hazards down and settles the two terminal bands:
//! - capture band: a hazard over a pad is either collected (matching penalty
//!   class) or ends the game (neutral)
//! - lower boundary: the hazard is gone; penalty classes count as a miss

use super::state::{GameEvent, GameState, HazardClass, HazardOutcome, PadSide};

/// Advance every live hazard by one motion tick (if `moved`) and settle
/// capture/boundary outcomes.
pub fn advance_hazards(state: &mut GameState, moved: bool) {
    let GameState {
        config,
        hazards,
        pads,
        score,
        stats,
        events,
        ..
    } = state;
    let field = &config.field;
    let fall = field.fall_rate * score.speed;
    let pad_xs = PadSide::BOTH.map(|side| (side, pads.x(side, &config.pads)));

    for hazard in hazards.iter_mut().filter(|h| !h.consumed) {
        if moved {
            hazard.y -= fall;
        }

        let in_band = hazard.y > field.capture_low && hazard.y < field.capture_high;
        if in_band {
            for &(side, pad_x) in &pad_xs {
                if (pad_x - hazard.x).abs() >= field.capture_tolerance {
                    continue;
                }
                match hazard.class {
                    HazardClass::Neutral => {
                        events.push(GameEvent::NeutralReachedPad {
                            slot: hazard.slot,
                            pad: side,
                        });
                    }
                    class if class == side.collects() => {
                        if hazard.consume(HazardOutcome::Captured(side)) {
                            score.apply(config.scoring.capture);
                            stats.captures += 1;
                            events.push(GameEvent::Captured {
                                slot: hazard.slot,
                                pad: side,
                            });
                            log::debug!("Hazard #{} captured by {side:?} pad", hazard.slot);
                        }
                    }
                    // Wrong pad for this penalty class: it passes through
                    _ => {}
                }
            }
        }

        if hazard.y <= field.lower_boundary && hazard.consume(HazardOutcome::Missed) {
            stats.misses += 1;
            if hazard.class.is_penalty() {
                score.record_miss(hazard.class);
                score.apply(config.scoring.miss_penalty);
                events.push(GameEvent::Missed {
                    slot: hazard.slot,
                    class: hazard.class,
                });
                log::debug!(
                    "Missed {:?} hazard #{} (A: {}, B: {})",
                    hazard.class,
                    hazard.slot,
                    score.misses_a,
                    score.misses_b
                );
            }
        }
    }
}
