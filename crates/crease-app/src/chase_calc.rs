// Chase calculator: win chance of the chasing side for a given target.

use crease_cricket::features::ChaseFeatures;

use crate::context::{ServingContext, ViewError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseVerdict {
    Achievable,
    Defendable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChaseOutlook {
    pub chasing: String,
    pub defending: String,
    pub venue: String,
    pub target: u32,
    /// Chasing side's win chance, as a percentage.
    pub win_chance: f64,
    pub verdict: ChaseVerdict,
}

pub fn chase_outlook(
    ctx: &ServingContext,
    chasing: &str,
    defending: &str,
    venue: &str,
    target: u32,
) -> Result<ChaseOutlook, ViewError> {
    let serving = ctx.serving();
    if !(serving.chase_target_min..=serving.chase_target_max).contains(&target) {
        return Err(ViewError::TargetOutOfRange {
            target,
            min: serving.chase_target_min,
            max: serving.chase_target_max,
        });
    }
    if chasing == defending {
        return Err(ViewError::SameTeam(chasing.to_string()));
    }

    let set = ctx.artifacts();
    let row = ChaseFeatures::encode(&set.encoders, chasing, defending, venue, target)?.to_row();
    let [_, p] = set.chase_model.predict_proba(&row)?;
    let win_chance = p * 100.0;

    Ok(ChaseOutlook {
        chasing: chasing.to_string(),
        defending: defending.to_string(),
        venue: venue.to_string(),
        target,
        win_chance,
        verdict: if win_chance > 50.0 {
            ChaseVerdict::Achievable
        } else {
            ChaseVerdict::Defendable
        },
    })
}
