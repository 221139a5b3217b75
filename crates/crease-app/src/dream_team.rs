// Dream XI: two all-rounders, four bowlers, five batters, no player twice.

use std::collections::HashSet;

use crease_cricket::players::PlayerStat;

use crate::context::ServingContext;

const ALL_ROUNDERS: usize = 2;
const BOWLERS: usize = 4;
const BATTERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    AllRounder,
    Bowler,
    Batter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DreamPick {
    pub name: String,
    pub role: Role,
    pub stat: PlayerStat,
}

fn is_all_rounder(s: &PlayerStat) -> bool {
    s.bat_avg > 20.0 && s.total_wickets > 10
}

fn is_strike_bowler(s: &PlayerStat) -> bool {
    s.total_wickets > 15
}

/// Pick the XI in role order. Ties keep name order. Fewer than eleven
/// picks come back when the pool runs dry.
pub fn dream_xi<'a>(ctx: &'a ServingContext) -> Vec<DreamPick> {
    let pool: Vec<(&'a str, PlayerStat)> = ctx
        .artifacts()
        .player_stats
        .iter()
        .map(|(name, stat)| (name, *stat))
        .collect();
    let mut used: HashSet<&'a str> = HashSet::new();
    let mut team = Vec::with_capacity(ALL_ROUNDERS + BOWLERS + BATTERS);

    let mut take = |candidates: Vec<(&'a str, PlayerStat)>, count: usize, role: Role| {
        let picked: Vec<(&'a str, PlayerStat)> = candidates
            .into_iter()
            .filter(|(name, _)| !used.contains(name))
            .take(count)
            .collect();
        for (name, stat) in picked {
            used.insert(name);
            team.push(DreamPick {
                name: name.to_string(),
                role,
                stat,
            });
        }
    };

    let mut all_rounders: Vec<_> = pool.iter().copied().filter(|(_, s)| is_all_rounder(s)).collect();
    all_rounders.sort_by(|a, b| {
        let ka = a.1.bat_avg + f64::from(a.1.total_wickets);
        let kb = b.1.bat_avg + f64::from(b.1.total_wickets);
        kb.total_cmp(&ka)
    });
    take(all_rounders, ALL_ROUNDERS, Role::AllRounder);

    let mut bowlers: Vec<_> = pool.iter().copied().filter(|(_, s)| is_strike_bowler(s)).collect();
    bowlers.sort_by(|a, b| b.1.total_wickets.cmp(&a.1.total_wickets));
    take(bowlers, BOWLERS, Role::Bowler);

    let mut batters = pool;
    batters.sort_by(|a, b| b.1.bat_avg.total_cmp(&a.1.bat_avg));
    take(batters, BATTERS, Role::Batter);

    team
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::with_players;

    fn big_pool() -> ServingContext {
        let mut players: Vec<(String, f64, u32)> = Vec::new();
        // All-rounders.
        players.push(("AR1".into(), 30.0, 20));
        players.push(("AR2".into(), 25.0, 12));
        players.push(("AR3".into(), 21.0, 11));
        // Bowlers; AR1 would also qualify.
        for (i, w) in [30u32, 25, 22, 18, 16].iter().enumerate() {
            players.push((format!("BW{i}"), 5.0, *w));
        }
        // Batters.
        for (i, avg) in [50.0, 45.0, 40.0, 35.0, 30.0, 28.0].iter().enumerate() {
            players.push((format!("BT{i}"), *avg, 0));
        }
        let borrowed: Vec<(&str, f64, u32)> =
            players.iter().map(|(n, a, w)| (n.as_str(), *a, *w)).collect();
        with_players(&borrowed)
    }

    #[test]
    fn eleven_distinct_players_in_role_order() {
        let xi = dream_xi(&big_pool());
        assert_eq!(xi.len(), 11);
        let names: HashSet<&str> = xi.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 11);

        let roles: Vec<Role> = xi.iter().map(|p| p.role).collect();
        assert_eq!(&roles[..2], [Role::AllRounder; 2]);
        assert_eq!(&roles[2..6], [Role::Bowler; 4]);
        assert_eq!(&roles[6..], [Role::Batter; 5]);

        assert_eq!(xi[0].name, "AR1");
        assert_eq!(xi[1].name, "AR2");
        let bowlers: Vec<&str> = xi[2..6].iter().map(|p| p.name.as_str()).collect();
        assert_eq!(bowlers, ["BW0", "BW1", "BW2", "BW3"]);
        let batters: Vec<&str> = xi[6..].iter().map(|p| p.name.as_str()).collect();
        assert_eq!(batters, ["BT0", "BT1", "BT2", "BT3", "BT4"]);
    }

    #[test]
    fn all_rounder_not_reused_as_bowler() {
        let ctx = with_players(&[("Both", 30.0, 40), ("Seamer", 2.0, 20)]);
        let xi = dream_xi(&ctx);
        assert_eq!(xi[0].name, "Both");
        assert_eq!(xi[0].role, Role::AllRounder);
        assert_eq!(xi[1].name, "Seamer");
        assert_eq!(xi[1].role, Role::Bowler);
        assert_eq!(xi.len(), 2);
    }

    #[test]
    fn small_pool_gives_short_team() {
        let ctx = with_players(&[("A", 10.0, 0), ("B", 12.0, 0)]);
        let xi = dream_xi(&ctx);
        assert_eq!(xi.len(), 2);
        assert_eq!(xi[0].name, "B");
        assert!(xi.iter().all(|p| p.role == Role::Batter));
    }
}
