//! Easy: counts high cards and trumps, bids a trick low, plays a simple
//! win/avoid toggle. No card memory.

use super::brain::{ensure_legal_bid, ensure_legal_card, Brain};
use super::evaluator::{
    evaluate, highest, losing_cards, lowest, non_trumps, trumps, winning_cards,
};
use super::trait_def::{AiError, AiPlayer};
use crate::domain::{BidRequest, Card, Difficulty, GameContext, PlayRequest, Rank};

const BID_RANDOMNESS: f64 = 0.15;
const PLAY_RANDOMNESS: f64 = 0.20;

pub struct EasyAi {
    brain: Brain,
}

impl EasyAi {
    pub const NAME: &'static str = "Easy";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            brain: Brain::new(seed),
        }
    }

    fn estimate(req: &BidRequest) -> i32 {
        let s = evaluate(&req.hand, req.trump);
        let side_aces = req
            .hand
            .iter()
            .filter(|c| c.suit != req.trump && c.rank == Rank::Ace)
            .count() as f32;
        let side_kings = req
            .hand
            .iter()
            .filter(|c| c.suit != req.trump && c.rank == Rank::King)
            .count() as f32;
        let low_trumps = (s.trump_count - s.high_trumps) as f32;
        let raw = s.high_trumps as f32 + 0.5 * low_trumps + side_aces + 0.5 * side_kings;
        // conservative: one trick under the count
        raw.round() as i32 - 1
    }

    fn choose_card(req: &PlayRequest, legal: &[Card]) -> Option<(Card, &'static str)> {
        let trump = req.trump;
        if req.is_leading() {
            let side = non_trumps(legal, trump);
            return match highest(&side, trump) {
                Some(c) => Some((c, "leading my highest side card")),
                None => lowest(&trumps(legal, trump), trump).map(|c| (c, "only trumps left, leading low")),
            };
        }
        if req.wants_trick() {
            let winners = winning_cards(legal, &req.trick, trump);
            if let Some(c) = lowest(&winners, trump) {
                return Some((c, "winning as cheaply as I can"));
            }
            return lowest(legal, trump).map(|c| (c, "can't win it, playing low"));
        }
        let losers = losing_cards(legal, &req.trick, trump);
        if let Some(c) = highest(&losers, trump) {
            return Some((c, "ducking under the winner"));
        }
        lowest(legal, trump).map(|c| (c, "forced to win, spending my lowest"))
    }
}

impl AiPlayer for EasyAi {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Easy
    }

    fn make_bid(&self, req: &BidRequest, _ctx: Option<&GameContext>) -> Result<u8, AiError> {
        let legal = req.legal_bids();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal bids available".into()));
        }
        if self.brain.roll(BID_RANDOMNESS)? {
            let bid = self.brain.pick(legal)?;
            self.brain.note(format!("Bid {bid} on a hunch"));
            return Ok(bid);
        }
        let target = Self::estimate(req).max(0);
        let bid = req
            .nearest_legal(target)
            .ok_or_else(|| AiError::Internal("No bid near estimate".into()))?;
        self.brain.note(format!(
            "Bid {bid}: {}",
            self.brain.flavor(&["counted my big cards", "playing it safe", "looks like a modest hand"])
        ));
        ensure_legal_bid(bid, legal)
    }

    fn play_card(&self, req: &PlayRequest, _ctx: Option<&GameContext>) -> Result<Card, AiError> {
        let legal = req.legal_plays();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }
        if self.brain.roll(PLAY_RANDOMNESS)? {
            let card = self.brain.pick(&legal)?;
            self.brain.note(format!("Played {card} without much thought"));
            return Ok(card);
        }
        let (card, why) = Self::choose_card(req, &legal)
            .ok_or_else(|| AiError::Internal("No card chosen".into()))?;
        self.brain.note(format!("Played {card}: {why}"));
        ensure_legal_card(card, &legal)
    }

    fn describe_reasoning(&self) -> String {
        self.brain.reasoning()
    }
}
