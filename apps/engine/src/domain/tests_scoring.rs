use crate::domain::scoring::{competition_ranks, score_section, ScoringSystem};

#[test]
fn classic_exact_bid_scores_ten_plus_bid() {
    let s = ScoringSystem::Classic;
    assert_eq!(s.section_points(3, 3), 13);
    assert_eq!(s.section_points(0, 0), 10);
    assert_eq!(s.section_points(3, 2), 0);
    assert_eq!(s.section_points(3, 4), 0);
}

#[test]
fn modern_exact_bid_scores_five_per_trick_plus_one() {
    let s = ScoringSystem::Modern;
    assert_eq!(s.section_points(0, 0), 5);
    assert_eq!(s.section_points(3, 3), 20);
    assert_eq!(s.section_points(2, 1), 0);
}

#[test]
fn score_section_uses_each_seats_tricks() {
    let bids = [(2, 1), (3, 0), (1, 2)];
    let won = [2, 0, 1];
    let scores = score_section(ScoringSystem::Classic, &bids, &won);
    let points: Vec<(u8, u32)> = scores.iter().map(|s| (s.position, s.points)).collect();
    assert_eq!(points, vec![(1, 12), (2, 0), (3, 0)]);
    assert!(scores[0].made_bid());
    assert!(!scores[2].made_bid());
}

#[test]
fn ranks_share_on_ties() {
    assert_eq!(competition_ranks(&[30, 40, 30, 10]), vec![2, 1, 2, 4]);
    assert_eq!(competition_ranks(&[]), Vec::<u8>::new());
}
