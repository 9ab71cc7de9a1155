//! Integration tests for seeding and bracket construction.

use proptest::prelude::*;
use season_bracket::{
    assign_seeds, bracket_size, build_bracket, seeding_order, Bracket, Entrant, SeasonError,
    MIN_PARTICIPANTS,
};
use std::collections::HashSet;

/// `n` entrants with ids 1..=n and strictly decreasing scores, so entrant i gets seed i.
fn seeded(n: usize) -> Vec<Entrant> {
    let entrants: Vec<Entrant> = (1..=n as u64)
        .map(|i| Entrant::new(i, format!("E{i}")).with_score(1000 - i as i64))
        .collect();
    assign_seeds(&entrants).unwrap()
}

fn seeds_of_round_zero(bracket: &Bracket) -> Vec<u32> {
    bracket.rounds()[0]
        .iter()
        .flat_map(|m| [m.participant1.as_ref(), m.participant2.as_ref()])
        .flatten()
        .map(|e| e.seed)
        .collect()
}

#[test]
fn assign_seeds_filters_and_ranks_by_score() {
    let entrants = vec![
        Entrant::new(1, "A").with_score(10),
        Entrant::new(2, "B").with_score(30),
        Entrant::new(3, "C").with_score(20),
        Entrant::new(4, "D").with_score(0),
        Entrant::new(5, "E"),
    ];
    let seeded = assign_seeds(&entrants).unwrap();
    let order: Vec<(u64, u32)> = seeded.iter().map(|e| (e.id, e.seed)).collect();
    assert_eq!(order, vec![(2, 1), (3, 2), (1, 3)]);
}

#[test]
fn assign_seeds_breaks_ties_by_input_order() {
    let entrants = vec![
        Entrant::new(7, "A").with_score(50),
        Entrant::new(3, "B").with_score(50),
        Entrant::new(9, "C").with_score(60),
    ];
    let ids: Vec<u64> = assign_seeds(&entrants).unwrap().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![9, 7, 3]);
}

#[test]
fn assign_seeds_requires_two_qualified() {
    let entrants = vec![
        Entrant::new(1, "A").with_score(10),
        Entrant::new(2, "B").with_score(0),
        Entrant::new(3, "C").with_score(-4),
    ];
    assert_eq!(
        assign_seeds(&entrants),
        Err(SeasonError::NotEnoughQualified {
            required: MIN_PARTICIPANTS,
            qualified: 1
        })
    );
}

#[test]
fn seeding_order_matches_standard_brackets() {
    assert_eq!(seeding_order(1), vec![1]);
    assert_eq!(seeding_order(2), vec![1, 2]);
    assert_eq!(seeding_order(4), vec![1, 4, 3, 2]);
    assert_eq!(seeding_order(8), vec![1, 8, 5, 4, 3, 6, 7, 2]);
}

#[test]
fn eight_entrants_pair_up_in_bracket_order() {
    let bracket = build_bracket(&seeded(8));
    let pairs: Vec<(u32, u32)> = bracket.rounds()[0]
        .iter()
        .map(|m| {
            (
                m.participant1.as_ref().unwrap().seed,
                m.participant2.as_ref().unwrap().seed,
            )
        })
        .collect();
    assert_eq!(pairs, vec![(1, 8), (4, 5), (3, 6), (2, 7)]);
}

#[test]
fn three_entrants_get_a_bye_for_the_top_seed() {
    let entrants = vec![
        Entrant::new(1, "Low").with_score(10),
        Entrant::new(2, "High").with_score(30),
        Entrant::new(3, "Mid").with_score(20),
    ];
    let bracket = build_bracket(&assign_seeds(&entrants).unwrap());
    assert_eq!(bracket.size(), 4);
    assert_eq!(bracket.num_rounds(), 2);

    let bye = &bracket.rounds()[0][0];
    assert_eq!(bye.participant1.as_ref().map(|e| e.id), Some(2));
    assert!(bye.participant2.is_none());
    assert_eq!(bye.winner.as_ref().map(|e| e.id), Some(2));

    let pending = &bracket.rounds()[0][1];
    assert_eq!(pending.participant1.as_ref().map(|e| e.seed), Some(2));
    assert_eq!(pending.participant2.as_ref().map(|e| e.seed), Some(3));
    assert!(pending.winner.is_none());

    // The bye winner is already waiting in the final.
    let final_match = bracket.final_match().unwrap();
    assert_eq!(final_match.participant1.as_ref().map(|e| e.id), Some(2));
    assert!(final_match.participant2.is_none());
}

#[test]
fn five_entrants_have_three_byes() {
    let bracket = build_bracket(&seeded(5));
    assert_eq!(bracket.size(), 8);
    let byes: Vec<_> = bracket.rounds()[0]
        .iter()
        .filter(|m| m.participant1.is_some() != m.participant2.is_some())
        .collect();
    assert_eq!(byes.len(), 3);
    for m in byes {
        let present = m.participant1.as_ref().or(m.participant2.as_ref());
        assert_eq!(m.winner.as_ref(), present);
    }
    // Seeds 2 and 3 both came through byes and meet in the second semifinal, lower seed first.
    let semi = &bracket.rounds()[1][1];
    assert_eq!(semi.participant1.as_ref().map(|e| e.seed), Some(2));
    assert_eq!(semi.participant2.as_ref().map(|e| e.seed), Some(3));
}

#[test]
fn next_match_links_follow_the_halving_tree() {
    let bracket = build_bracket(&seeded(8));
    for (r, round) in bracket.rounds().iter().enumerate() {
        for (i, m) in round.iter().enumerate() {
            assert_eq!(m.round_index, r as i32);
            assert_eq!(m.match_index, i as u32);
            match bracket.rounds().get(r + 1) {
                Some(next_round) => assert_eq!(m.next_match_id, Some(next_round[i / 2].id)),
                None => assert_eq!(m.next_match_id, None),
            }
        }
    }
}

#[test]
fn fewer_than_two_entrants_build_nothing() {
    assert!(build_bracket(&[]).is_empty());
    assert!(build_bracket(&seeded(2)[..1]).is_empty());
}

proptest! {
    #[test]
    fn bracket_shape_holds_for_any_field(n in 2usize..=200) {
        let bracket = build_bracket(&seeded(n));
        let size = bracket_size(n);
        prop_assert!(size.is_power_of_two());
        prop_assert!(size >= n && size < 2 * n);
        prop_assert_eq!(bracket.size(), size);
        prop_assert_eq!(bracket.rounds()[0].len(), size / 2);
        prop_assert_eq!(bracket.num_rounds(), size.trailing_zeros() as usize);
        for pair in bracket.rounds().windows(2) {
            prop_assert_eq!(pair[1].len() * 2, pair[0].len());
        }
        prop_assert_eq!(bracket.final_match().map(|m| m.next_match_id), Some(None));
    }

    #[test]
    fn seeds_are_unique_and_in_range(n in 2usize..=200) {
        let bracket = build_bracket(&seeded(n));
        let seeds = seeds_of_round_zero(&bracket);
        let unique: HashSet<u32> = seeds.iter().copied().collect();
        prop_assert_eq!(seeds.len(), n);
        prop_assert_eq!(unique.len(), n);
        prop_assert!(seeds.iter().all(|&s| s >= 1 && s as usize <= bracket.size()));
        let ids: HashSet<u32> = bracket.matches().map(|m| m.id).collect();
        prop_assert_eq!(ids.len(), bracket.matches().count());
    }

    #[test]
    fn top_two_seeds_start_in_opposite_halves(n in 2usize..=200) {
        let bracket = build_bracket(&seeded(n));
        let half = bracket.rounds()[0].len() / 2;
        let position = |seed: u32| {
            bracket.rounds()[0].iter().position(|m| {
                [m.participant1.as_ref(), m.participant2.as_ref()]
                    .into_iter()
                    .flatten()
                    .any(|e| e.seed == seed)
            })
        };
        let one = position(1).unwrap();
        let two = position(2).unwrap();
        if half == 0 {
            prop_assert_eq!(one, two);
        } else {
            prop_assert!(one < half && two >= half);
        }
    }
}
