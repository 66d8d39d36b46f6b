//! Medium: adds seat position and the table's bids to the estimate, tracks
//! played cards, saves trumps and dumps safe high cards when ducking.

use super::brain::{ensure_legal_bid, ensure_legal_card, Brain};
use super::evaluator::{
    evaluate, highest, longest_side_suit, losing_cards, lowest, non_trumps, trumps, winning_cards,
};
use super::trait_def::{AiError, AiPlayer};
use crate::domain::{
    BidRequest, Card, Difficulty, GameContext, PlayRequest, Position, Rank, SectionMemory, Suit,
};

const BID_RANDOMNESS: f64 = 0.10;
const PLAY_RANDOMNESS: f64 = 0.10;

pub struct MediumAi {
    brain: Brain,
}

impl MediumAi {
    pub const NAME: &'static str = "Medium";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            brain: Brain::new(seed),
        }
    }

    fn estimate(req: &BidRequest) -> f32 {
        let s = evaluate(&req.hand, req.trump);
        let mut est = 0.0f32;

        for card in &req.hand {
            let len = s.length(card.suit);
            if card.suit == req.trump {
                est += if card.rank.is_high() { 0.95 } else { 0.45 };
                continue;
            }
            est += match card.rank {
                Rank::Ace => 0.9,
                Rank::King if len >= 2 => 0.6,
                Rank::Queen if len >= 3 => 0.3,
                _ => 0.0,
            };
        }
        if s.trump_count > s.high_trumps {
            est += 0.4 * s.voids as f32 + 0.2 * s.singletons as f32;
        }

        // later seats see more bids; small edge
        let order = req.bid_order() as f32;
        let seats = req.seats.max(2) as f32;
        est += 0.3 * order / (seats - 1.0);

        // table already claims more than its share: expect fewer tricks
        if !req.opponent_bids.is_empty() {
            let avg = req.opponent_bid_total() as f32 / req.opponent_bids.len() as f32;
            let fair = req.max_bid as f32 / seats;
            est -= 0.5 * (avg - fair);
        }
        est
    }

    fn lead(req: &PlayRequest, legal: &[Card], mem: &SectionMemory) -> Option<(Card, &'static str)> {
        let trump = req.trump;
        if req.wants_trick() {
            let boss = non_trumps(legal, trump)
                .into_iter()
                .filter(|c| mem.is_boss(*c, &req.hand))
                .max_by_key(|c| c.rank);
            if let Some(c) = boss {
                return Some((c, "cashing a side card nobody can beat"));
            }
            let my_trumps = trumps(legal, trump);
            if my_trumps.len() * 2 > legal.len() {
                return highest(&my_trumps, trump).map(|c| (c, "trump-heavy, leading top trump"));
            }
        }
        let long = longest_side_suit(legal, trump)
            .map(|s| legal.iter().copied().filter(|c| c.suit == s).collect::<Vec<_>>())
            .unwrap_or_default();
        lowest(&long, trump)
            .or_else(|| lowest(legal, trump))
            .map(|c| (c, "leading low from length"))
    }

    fn follow(req: &PlayRequest, legal: &[Card]) -> Option<(Card, &'static str)> {
        let trump = req.trump;
        if req.wants_trick() {
            let winners = winning_cards(legal, &req.trick, trump);
            // keep trumps for later when a side card does the job
            if let Some(c) = lowest(&non_trumps(&winners, trump), trump) {
                return Some((c, "winning without spending a trump"));
            }
            if let Some(c) = lowest(&winners, trump) {
                return Some((c, "ruffing as low as possible"));
            }
            return lowest(legal, trump).map(|c| (c, "can't win, keeping my good cards"));
        }
        let losers = losing_cards(legal, &req.trick, trump);
        if let Some(c) = highest(&losers, trump) {
            return Some((c, "dumping a high card safely"));
        }
        lowest(legal, trump).map(|c| (c, "forced to win, going low"))
    }

    fn unseen_trumps(mem: &SectionMemory, trump: Suit, hand: &[Card]) -> usize {
        mem.unseen_in_suit(trump, hand).len()
    }
}

impl AiPlayer for MediumAi {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Medium
    }

    fn make_bid(&self, req: &BidRequest, _ctx: Option<&GameContext>) -> Result<u8, AiError> {
        let legal = req.legal_bids();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal bids available".into()));
        }
        if self.brain.roll(BID_RANDOMNESS)? {
            let bid = self.brain.pick(legal)?;
            self.brain.note(format!("Bid {bid}, feeling lucky"));
            return Ok(bid);
        }
        let est = Self::estimate(req);
        let bid = req
            .nearest_legal(est.round() as i32)
            .ok_or_else(|| AiError::Internal("No bid near estimate".into()))?;
        self.brain.note(format!(
            "Bid {bid} (estimate {est:.1}): {}",
            self.brain.flavor(&[
                "adjusted for the table's bids",
                "seat position matters",
                "weighed trumps against the others",
            ])
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
            self.brain.note(format!("Played {card} on impulse"));
            return Ok(card);
        }
        let mem = self.brain.memory()?;
        let choice = if req.is_leading() {
            Self::lead(req, &legal, &mem)
        } else {
            Self::follow(req, &legal)
        };
        let (card, why) = choice.ok_or_else(|| AiError::Internal("No card chosen".into()))?;
        self.brain.note(format!(
            "Played {card}: {why} ({} trumps unseen)",
            Self::unseen_trumps(&mem, req.trump, &req.hand)
        ));
        ensure_legal_card(card, &legal)
    }

    fn describe_reasoning(&self) -> String {
        self.brain.reasoning()
    }

    fn observe_bid(&self, position: Position, bid: u8) {
        self.brain.observe_bid(position, bid);
    }

    fn observe_card(&self, position: Position, card: Card, leading: Option<Suit>) {
        self.brain.observe_card(position, card, leading);
    }

    fn reset_memory(&self) {
        self.brain.reset_memory();
    }
}
