// Plain-text rendering of view results for the terminal.

use std::fmt::Write;

use crease_app::chase_calc::{ChaseOutlook, ChaseVerdict};
use crease_app::dream_team::{DreamPick, Role};
use crease_app::faceoff::{FaceOff, FaceOffReason};
use crease_app::simulator::{MatchPrediction, Reason};
use crease_app::venue_scout::VenueReport;
use crease_cricket::pipeline::TrainingReport;
use crease_cricket::players::PlayerStat;

/// Stat values the way they are stored: whole numbers keep one decimal.
fn num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

pub fn training(report: &TrainingReport) -> String {
    let m = &report.manifest;
    let mut out = String::new();
    let _ = writeln!(out, "Trained on {} ({} ball rows)", m.source, m.ball_rows);
    let _ = writeln!(out, "  chase records:       {}", m.chase_records);
    let _ = writeln!(out, "  pre-match matches:   {}", m.prematch_rows);
    let _ = writeln!(out, "  teams / venues:      {} / {}", m.teams, m.venues);
    let _ = writeln!(out, "  players:             {}", m.players);
    let _ = writeln!(out, "  predictable winners: {}", m.pre_match_classes);
    let _ = writeln!(out, "Artifacts written to {}:", report.artifacts_dir.display());
    for path in &report.written {
        let _ = writeln!(out, "  - {}", path.display());
    }
    out
}

pub fn prediction(p: &MatchPrediction) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} vs {} at {}", p.team1, p.team2, p.venue);
    let _ = writeln!(out, "Predicted winner: {} ({:.1}%)", p.winner, p.confidence);
    let _ = writeln!(
        out,
        "Squad rating: {} {} / {} {}",
        p.team1, p.squad1_power, p.team2, p.squad2_power
    );
    let _ = writeln!(out, "\nTactical reasoning:");
    for reason in &p.reasons {
        let line = match reason {
            Reason::SquadStrength { team, margin } => format!(
                "Squad Strength: the selected XI for {team} has a higher cumulative rating (+{margin} pts)."
            ),
            Reason::TeamChemistry { team, venue } => format!(
                "Team Chemistry: although the opposition has individual stars, {team} performs better as a unit at {venue}."
            ),
            Reason::VenueMastery { venue } => {
                format!("Venue Mastery: historical data at {venue} strongly supports this outcome.")
            }
        };
        let _ = writeln!(out, "  - {line}");
    }
    out
}

pub fn chase(o: &ChaseOutlook) -> String {
    let verdict = match o.verdict {
        ChaseVerdict::Achievable => "Target is Achievable!",
        ChaseVerdict::Defendable => "Target is Defendable!",
    };
    format!(
        "{} chasing {} against {} at {}\n{} win chance: {:.1}%\n{}\n",
        o.chasing, o.target, o.defending, o.venue, o.chasing, o.win_chance, verdict
    )
}

pub fn player_card(name: &str, s: &PlayerStat) -> String {
    format!(
        "{name}\n  batting avg: {}\n  strike rate: {}\n  wickets:     {}\n  matches:     {}\n",
        num(s.bat_avg),
        num(s.strike_rate),
        s.total_wickets,
        s.matches
    )
}

pub fn faceoff(f: &FaceOff) -> String {
    let (n1, s1) = &f.player1;
    let (n2, s2) = &f.player2;
    let reason = match f.reason {
        FaceOffReason::AllRound => "Better All-Round Stats",
        FaceOffReason::SuperiorBatting => "Significantly Superior Batting",
        FaceOffReason::LeadingWicketTaker => "Leading Wicket Taker",
    };
    let mut out = String::new();
    let _ = writeln!(out, "{n1}: avg {}, {} wkts", num(s1.bat_avg), s1.total_wickets);
    let _ = writeln!(out, "{n2}: avg {}, {} wkts", num(s2.bat_avg), s2.total_wickets);
    let _ = writeln!(out, "\nWINNER: {}", f.winner);
    let _ = writeln!(
        out,
        "Reason: {reason}. {} has a higher overall impact rating (+{} pts).",
        f.winner, f.margin
    );
    out
}

pub fn venue(r: &VenueReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", r.venue);
    match &r.chase {
        Some(stat) => {
            let _ = writeln!(out, "  avg 1st innings: {}", stat.avg_first_inn);
            let _ = writeln!(out, "  chase win %:     {}%", num(stat.chase_success_rate));
        }
        None => {
            let _ = writeln!(out, "  avg 1st innings: N/A");
            let _ = writeln!(out, "  chase win %:     0%");
        }
    }
    if !r.top_performers.is_empty() {
        let _ = writeln!(out, "Top performers:");
        for (player, runs) in &r.top_performers {
            let _ = writeln!(out, "  {player:<24} {}", num(*runs));
        }
    }
    out
}

pub fn dream_xi(team: &[DreamPick]) -> String {
    if team.is_empty() {
        return "No players available.\n".to_string();
    }
    let mut out = String::new();
    for pick in team {
        let role = match pick.role {
            Role::AllRounder => "All-Rounder",
            Role::Bowler => "Bowler",
            Role::Batter => "Batter",
        };
        let _ = writeln!(
            out,
            "{} ({role}) - Avg: {} | Wkts: {}",
            pick.name,
            num(pick.stat.bat_avg),
            pick.stat.total_wickets
        );
    }
    out
}

/// One name per line.
pub fn names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for name in names {
        out.push_str(name);
        out.push('\n');
    }
    out
}
