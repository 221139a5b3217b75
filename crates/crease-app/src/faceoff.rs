// Player face-off: head-to-head impact rating of two players.
//
// Rating = batting average + 20 per wicket. Ties go to the second player.

use crease_cricket::players::PlayerStat;

use crate::context::ServingContext;

const WICKET_POINTS: f64 = 20.0;
const BATTING_EDGE: f64 = 10.0;
const WICKET_EDGE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceOffReason {
    AllRound,
    SuperiorBatting,
    LeadingWicketTaker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FaceOff {
    pub player1: (String, PlayerStat),
    pub player2: (String, PlayerStat),
    pub winner: String,
    /// Rating difference, truncated.
    pub margin: i64,
    pub reason: FaceOffReason,
}

pub fn impact_rating(stat: &PlayerStat) -> f64 {
    stat.bat_avg + f64::from(stat.total_wickets) * WICKET_POINTS
}

fn reason(winner: &PlayerStat, loser: &PlayerStat) -> FaceOffReason {
    if winner.total_wickets > loser.total_wickets + WICKET_EDGE {
        FaceOffReason::LeadingWicketTaker
    } else if winner.bat_avg > loser.bat_avg + BATTING_EDGE {
        FaceOffReason::SuperiorBatting
    } else {
        FaceOffReason::AllRound
    }
}

/// Compare two players. Unknown names rate as all-zero players.
pub fn face_off(ctx: &ServingContext, player1: &str, player2: &str) -> FaceOff {
    let s1 = ctx.player_card(player1);
    let s2 = ctx.player_card(player2);
    let r1 = impact_rating(&s1);
    let r2 = impact_rating(&s2);

    let (winner, margin, reason) = if r1 > r2 {
        (player1, r1 - r2, reason(&s1, &s2))
    } else {
        (player2, r2 - r1, reason(&s2, &s1))
    };

    FaceOff {
        player1: (player1.to_string(), s1),
        player2: (player2.to_string(), s2),
        winner: winner.to_string(),
        margin: margin.trunc() as i64,
        reason,
    }
}
