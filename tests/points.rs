//! Integration tests for competition points and the season standings ledger.

use season_bracket::{
    apply_points_to_standings, assign_seeds, bracket_points_table, build_bracket,
    compute_competition_points, qualification_points, set_winner, Bracket, ChampionshipStanding,
    Entrant, EntrantId, Match, MatchId, THIRD_PLACE_MATCH_ID,
};
use std::collections::HashMap;

fn field(n: usize) -> Vec<Entrant> {
    (1..=n as u64)
        .map(|i| Entrant::new(i, format!("E{i}")).with_score(1000 - i as i64))
        .collect()
}

/// Play the whole bracket with the lower seed always winning, third place included.
fn play_favourites(entrants: &[Entrant]) -> (Bracket, Option<Match>) {
    let mut bracket = build_bracket(&assign_seeds(entrants).unwrap());
    let mut third = None;
    for round in 0..bracket.num_rounds() {
        let pending: Vec<(MatchId, EntrantId)> = bracket.rounds()[round]
            .iter()
            .filter(|m| !m.is_decided())
            .map(|m| (m.id, m.participant1.as_ref().unwrap().id))
            .collect();
        for (id, winner) in pending {
            set_winner(&mut bracket, &mut third, id, winner);
        }
    }
    if let Some(winner) = third
        .as_ref()
        .filter(|m| !m.is_decided())
        .and_then(|m| m.participant1.as_ref())
        .map(|e| e.id)
    {
        set_winner(&mut bracket, &mut third, THIRD_PLACE_MATCH_ID, winner);
    }
    (bracket, third)
}

#[test]
fn qualification_points_by_rank() {
    let expected = [
        (1, 12.0),
        (2, 10.0),
        (3, 8.0),
        (4, 6.0),
        (5, 4.0),
        (6, 4.0),
        (7, 3.0),
        (8, 3.0),
        (9, 2.0),
        (12, 2.0),
        (13, 1.0),
        (16, 1.0),
        (17, 0.5),
        (24, 0.5),
        (25, 0.25),
        (32, 0.25),
        (33, 0.0),
        (100, 0.0),
    ];
    for (rank, points) in expected {
        assert_eq!(qualification_points(rank), points, "rank {rank}");
    }
}

#[test]
fn bracket_table_lists_top_four_and_tiers() {
    let table: Vec<(u32, u32, f64)> = bracket_points_table()
        .iter()
        .map(|b| (b.from, b.to, b.points))
        .collect();
    assert_eq!(
        table,
        vec![
            (1, 1, 100.0),
            (2, 2, 88.0),
            (3, 3, 76.0),
            (4, 4, 64.0),
            (5, 8, 48.0),
            (9, 16, 32.0),
            (17, 32, 16.0),
            (33, 64, 10.0),
        ]
    );
}

#[test]
fn eight_entrant_competition_awards() {
    let entrants = field(8);
    let (bracket, third) = play_favourites(&entrants);
    let points = compute_competition_points(&entrants, &bracket, third.as_ref());

    assert_eq!(points[&1], 12.0 + 100.0);
    assert_eq!(points[&2], 10.0 + 88.0);
    assert_eq!(points[&3], 8.0 + 76.0);
    assert_eq!(points[&4], 6.0 + 64.0);
    assert_eq!(points[&5], 4.0 + 48.0);
    assert_eq!(points[&6], 4.0 + 48.0);
    assert_eq!(points[&7], 3.0 + 48.0);
    assert_eq!(points[&8], 3.0 + 48.0);
}

#[test]
fn top_four_not_credited_with_quarterfinal_tier() {
    // Sixteen entrants: quarterfinals are round 1 (4 matches), round 0 is the 16-tier.
    let entrants = field(16);
    let (bracket, third) = play_favourites(&entrants);
    let points = compute_competition_points(&entrants, &bracket, third.as_ref());

    assert_eq!(points[&1], 112.0);
    assert_eq!(points[&4], 70.0);
    // Seeds 5-8 lost quarterfinals, seeds 9-16 lost in round 0.
    assert_eq!(points[&5], 4.0 + 48.0);
    assert_eq!(points[&9], 2.0 + 32.0);
    assert_eq!(points[&16], 1.0 + 32.0);
}

#[test]
fn unqualified_and_bye_entrants() {
    let mut entrants = field(5);
    entrants.push(Entrant::new(6, "No score"));
    entrants.push(Entrant::new(7, "Zero").with_score(0));
    let (bracket, third) = play_favourites(&entrants);
    let points = compute_competition_points(&entrants, &bracket, third.as_ref());

    assert_eq!(points.len(), 7);
    assert_eq!(points[&6], 0.0);
    assert_eq!(points[&7], 0.0);
    // Seed 5 lost to seed 4 in a quarterfinal; byes produce no loser.
    assert_eq!(points[&5], 4.0 + 48.0);
    let total: f64 = points.values().sum();
    assert_eq!(total, 112.0 + 98.0 + 84.0 + 70.0 + 52.0);
}

#[test]
fn undecided_bracket_awards_only_qualification() {
    let entrants = field(4);
    let bracket = build_bracket(&assign_seeds(&entrants).unwrap());
    let points = compute_competition_points(&entrants, &bracket, None);
    assert_eq!(points[&1], 12.0);
    assert_eq!(points[&4], 6.0);
}

#[test]
fn standings_get_one_entry_per_competition_and_are_ranked() {
    let standings = vec![
        ChampionshipStanding {
            id: 1,
            name: "A".into(),
            points_per_competition: vec![0.0],
        },
        ChampionshipStanding {
            id: 2,
            name: "B".into(),
            points_per_competition: vec![5.0],
        },
    ];
    let points = HashMap::from([(1, 12.0), (2, 10.0)]);
    let updated = apply_points_to_standings(&standings, &points);

    assert!(updated.iter().all(|s| s.points_per_competition.len() == 2));
    let order: Vec<(EntrantId, f64)> = updated.iter().map(|s| (s.id, s.total_points())).collect();
    assert_eq!(order, vec![(2, 15.0), (1, 12.0)]);
}

#[test]
fn standings_missing_from_points_get_zero_and_ties_keep_order() {
    let standings: Vec<ChampionshipStanding> = (1..=3)
        .map(|i| ChampionshipStanding::new(i, format!("S{i}"), 0))
        .collect();
    let points = HashMap::from([(3, 4.0)]);
    let updated = apply_points_to_standings(&standings, &points);

    let ids: Vec<EntrantId> = updated.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert_eq!(updated[1].points_per_competition, vec![0.0]);
}
