use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const DECK_SIZE: usize = 52;
pub const MIN_SEATS: u8 = 3;
pub const MAX_SEATS: u8 = 7;
/// Longest section of the schedule (and the turning point of `up_and_down`).
pub const PEAK_HAND_SIZE: u8 = 10;

/// Section schedule of a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    /// Sections 1..=10, hand size climbing 1 → 10.
    Up,
    /// Sections 1..=20, hand size 1 → 10 then 10 → 1.
    UpAndDown,
}

impl GameType {
    pub const fn total_sections(self) -> u8 {
        match self {
            GameType::Up => PEAK_HAND_SIZE,
            GameType::UpAndDown => PEAK_HAND_SIZE * 2,
        }
    }

    /// Hand size the schedule asks for, before the deck-size cap.
    pub fn scheduled_hand_size(self, section_no: u8) -> Option<u8> {
        if section_no == 0 || section_no > self.total_sections() {
            return None;
        }
        if section_no <= PEAK_HAND_SIZE {
            return Some(section_no);
        }
        // up_and_down descent: 11 → 10, 12 → 9, ..., 20 → 1
        Some(PEAK_HAND_SIZE * 2 + 1 - section_no)
    }
}

/// Largest hand that still leaves a trump card for `seats` players.
pub fn max_hand_size(seats: u8) -> u8 {
    if seats == 0 {
        return 0;
    }
    ((DECK_SIZE - 1) / seats as usize) as u8
}

/// Cards per player in a section, capped so the deal always fits the deck.
pub fn hand_size_for_section(game_type: GameType, section_no: u8, seats: u8) -> Option<u8> {
    let scheduled = game_type.scheduled_hand_size(section_no)?;
    Some(scheduled.min(max_hand_size(seats)))
}

pub fn valid_bid_range(hand_size: u8) -> RangeInclusive<u8> {
    0..=hand_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_schedule_climbs_to_ten() {
        let sizes: Vec<u8> = (1..=10)
            .map(|n| GameType::Up.scheduled_hand_size(n).unwrap())
            .collect();
        assert_eq!(sizes, (1..=10).collect::<Vec<u8>>());
        assert_eq!(GameType::Up.scheduled_hand_size(0), None);
        assert_eq!(GameType::Up.scheduled_hand_size(11), None);
    }

    #[test]
    fn up_and_down_schedule_is_symmetric() {
        let expected: [u8; 20] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1];
        for (i, &hs) in expected.iter().enumerate() {
            assert_eq!(
                GameType::UpAndDown.scheduled_hand_size((i as u8) + 1),
                Some(hs)
            );
        }
        assert_eq!(GameType::UpAndDown.scheduled_hand_size(21), None);
    }

    #[test]
    fn hand_size_is_capped_by_deck() {
        assert_eq!(max_hand_size(5), 10);
        assert_eq!(max_hand_size(6), 8);
        assert_eq!(max_hand_size(7), 7);
        assert_eq!(hand_size_for_section(GameType::Up, 10, 4), Some(10));
        assert_eq!(hand_size_for_section(GameType::Up, 10, 6), Some(8));
        assert_eq!(hand_size_for_section(GameType::Up, 3, 7), Some(3));
        for seats in MIN_SEATS..=MAX_SEATS {
            for n in 1..=GameType::UpAndDown.total_sections() {
                let hs = hand_size_for_section(GameType::UpAndDown, n, seats).unwrap();
                assert!(seats as usize * hs as usize + 1 <= DECK_SIZE);
            }
        }
    }

    #[test]
    fn bid_range_matches_hand_size() {
        for hs in 0..=10u8 {
            let r = valid_bid_range(hs);
            assert_eq!(*r.start(), 0);
            assert_eq!(*r.end(), hs);
        }
    }
}
