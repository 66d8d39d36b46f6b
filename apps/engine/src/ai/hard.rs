//! Hard: weighted statistical bid model and full card counting in play.
//!
//! Bid terms:
//! - high cards and trumps, scaled by how likely side winners get ruffed
//! - void/singleton ruffing potential limited by spare trumps
//! - defensive potential of long guarded side suits
//! - seat position, table pressure (opponent bid ratio), opponent profiles
//! - section size and trump-length meta adjustments
//!
//! Play sub-strategies: lead, follow, win, avoid, and position-for-future
//! (lead low from length when no sure winner exists, keep bosses for later).
//! Opponents still short of their bid are treated as chasers: the AI holds
//! back in front of them when it wants a trick and dumps high cards under
//! them when it does not. Their profiles say how seriously to take them.

use super::brain::{ensure_legal_bid, ensure_legal_card, Brain};
use super::evaluator::{
    evaluate, highest, losing_cards, lowest, non_trumps, strength_key, trumps, winning_cards,
};
use super::trait_def::{AiError, AiPlayer};
use crate::domain::{
    BidRequest, Card, Difficulty, GameContext, PlayRequest, Position, Rank, SectionMemory, Suit,
};

const BID_RANDOMNESS: f64 = 0.05;
const PLAY_RANDOMNESS: f64 = 0.03;
/// Below this exact-bid rate a seat is too erratic to play around.
const RELIABLE_EXACT_RATE: f32 = 0.4;

pub struct HardAi {
    brain: Brain,
}

/// Breakdown of the bid estimate, kept for the rationale.
#[derive(Debug, Clone, Copy, Default)]
struct BidModel {
    high_cards: f32,
    trumps: f32,
    ruffs: f32,
    defense: f32,
    position: f32,
    threat: f32,
    meta: f32,
}

impl BidModel {
    fn total(&self) -> f32 {
        self.high_cards + self.trumps + self.ruffs + self.defense + self.position + self.threat + self.meta
    }
}

impl HardAi {
    pub const NAME: &'static str = "Hard";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            brain: Brain::new(seed),
        }
    }

    fn model(req: &BidRequest, ctx: Option<&GameContext>) -> BidModel {
        let s = evaluate(&req.hand, req.trump);
        let seats = req.seats.max(2) as f32;
        let hand_size = req.max_bid.max(1) as f32;
        let mut m = BidModel::default();

        // side winners survive less often with more seats and longer hands
        let ruff_risk = (1.0 - 0.06 * (seats - 3.0) - 0.02 * hand_size).clamp(0.5, 1.0);
        for card in req.hand.iter().filter(|c| c.suit != req.trump) {
            let len = s.length(card.suit);
            let p = match card.rank {
                Rank::Ace => 0.9,
                Rank::King if len >= 2 => 0.65,
                Rank::King => 0.25,
                Rank::Queen if len >= 3 => 0.35,
                Rank::Queen => 0.1,
                _ => 0.0,
            };
            m.high_cards += p * ruff_risk;
        }

        for card in req.hand.iter().filter(|c| c.suit == req.trump) {
            m.trumps += if card.rank.is_high() {
                0.95
            } else {
                (0.35 + 0.1 * s.trump_count as f32).min(0.85)
            };
        }

        let spare_trumps = s.trump_count.saturating_sub(s.high_trumps) as f32;
        let ruff_chances = 0.6 * s.voids as f32 + 0.3 * s.singletons as f32;
        m.ruffs = ruff_chances.min(spare_trumps * 0.6);

        for suit in Suit::ALL.into_iter().filter(|&x| x != req.trump) {
            let len = s.length(suit);
            let guarded = req
                .hand
                .iter()
                .any(|c| c.suit == suit && c.rank >= Rank::Queen);
            if len >= 4 && guarded {
                m.defense += 0.2;
            }
        }

        let order = req.bid_order() as f32;
        m.position = 0.25 * order / (seats - 1.0) - 0.1;

        if !req.opponent_bids.is_empty() {
            let expected = hand_size * req.opponent_bids.len() as f32 / seats;
            let ratio = req.opponent_bid_total() as f32 / expected.max(0.5);
            if ratio > 1.0 {
                m.threat -= 0.35 * (ratio - 1.0).min(2.0);
            } else {
                m.threat += 0.2 * (1.0 - ratio);
            }
            if let Some(ctx) = ctx {
                // overbidders tend to fall short, which leaves tricks loose
                let loose: f32 = req
                    .opponent_bids
                    .iter()
                    .filter_map(|&(p, _)| ctx.profile(p))
                    .map(|p| p.bias().max(0.0))
                    .sum();
                m.threat += 0.15 * loose.min(2.0);
            }
            // the dealer sees the whole table
            if req.is_last_to_bid() {
                m.threat *= 1.3;
            }
        }

        let base = m.total();
        if req.max_bid <= 3 {
            m.meta -= 0.15 * base;
        }
        if s.trump_count == 0 {
            m.meta -= 0.1 * base;
        } else if s.trump_count as f32 >= hand_size / 2.0 {
            m.meta += 0.3;
        }
        m
    }

    /// Seats still to play to this trick that are short of their bid and,
    /// going by their profile, tend to make it.
    fn chasers_behind(
        req: &PlayRequest,
        mem: &SectionMemory,
        ctx: Option<&GameContext>,
    ) -> Vec<Position> {
        let seats = req.seats.max(1);
        let behind = (seats as usize).saturating_sub(req.trick.len() + 1);
        (1..=behind as u8)
            .map(|k| (req.seat - 1 + k) % seats + 1)
            .filter(|&p| {
                let bid = mem
                    .bids()
                    .iter()
                    .find(|&&(q, _)| q == p)
                    .map(|&(_, b)| b)
                    .unwrap_or(0);
                bid > req.won_by(p)
            })
            .filter(|&p| {
                ctx.and_then(|c| c.profile(p))
                    .filter(|pr| !pr.is_empty())
                    .map_or(true, |pr| pr.exact_rate() >= RELIABLE_EXACT_RATE)
            })
            .collect()
    }

    fn lead(
        req: &PlayRequest,
        legal: &[Card],
        mem: &SectionMemory,
        ctx: Option<&GameContext>,
    ) -> Option<(Card, &'static str)> {
        let trump = req.trump;
        let opponents_void_in = |suit: Suit| {
            (1..=req.seats)
                .filter(|&p| p != req.seat)
                .any(|p| mem.shown_void(p, suit))
        };
        let trumps_out = mem.unseen_in_suit(trump, &req.hand).len();

        if req.wants_trick() {
            let safe_boss = non_trumps(legal, trump)
                .into_iter()
                .filter(|c| mem.is_boss(*c, &req.hand) && (trumps_out == 0 || !opponents_void_in(c.suit)))
                .max_by_key(|c| c.rank);
            if let Some(c) = safe_boss {
                return Some((c, "lead: cashing a safe boss"));
            }
            let my_trumps = trumps(legal, trump);
            if trumps_out > 0 && req.tricks_needed() as usize >= my_trumps.len() && !my_trumps.is_empty() {
                if let Some(c) = highest(&my_trumps, trump) {
                    if mem.is_boss(c, &req.hand) {
                        return Some((c, "lead: drawing trumps with the top one"));
                    }
                }
            }
        } else {
            // avoid: lead where someone else is sure to be above us, best
            // in a suit every chaser can still follow
            let chasers = Self::chasers_behind(req, mem, ctx);
            let duck = non_trumps(legal, trump)
                .into_iter()
                .filter(|c| mem.higher_unseen(*c, &req.hand) > 0)
                .min_by_key(|c| {
                    (
                        chasers.iter().any(|&p| mem.shown_void(p, c.suit)),
                        std::cmp::Reverse(mem.higher_unseen(*c, &req.hand)),
                        c.rank,
                    )
                });
            if let Some(c) = duck {
                return Some((c, "avoid: leading under plenty of higher cards"));
            }
        }

        // position for future tricks: low from the longest side suit
        let side = non_trumps(legal, trump);
        // ties go to the suit the table has seen least of
        let longest = Suit::ALL
            .into_iter()
            .filter(|&s| s != trump)
            .max_by_key(|&s| {
                (
                    side.iter().filter(|c| c.suit == s).count(),
                    std::cmp::Reverse(mem.played_in_suit(s)),
                )
            })?;
        let from_length: Vec<Card> = side.iter().copied().filter(|c| c.suit == longest).collect();
        lowest(&from_length, trump)
            .or_else(|| lowest(legal, trump))
            .map(|c| (c, "position: leading low from length"))
    }

    fn follow(
        req: &PlayRequest,
        legal: &[Card],
        mem: &SectionMemory,
        ctx: Option<&GameContext>,
    ) -> Option<(Card, &'static str)> {
        let trump = req.trump;
        let winners = winning_cards(legal, &req.trick, trump);
        let losers = losing_cards(legal, &req.trick, trump);
        let chased = !Self::chasers_behind(req, mem, ctx).is_empty();

        if req.wants_trick() {
            if req.is_last_to_play() {
                if let Some(c) = lowest(&winners, trump) {
                    return Some((c, "win: cheapest winner in last seat"));
                }
            }
            // seats still to play: only commit a card nobody can overtake
            let lead = req.leading.unwrap_or(trump);
            let secure: Vec<Card> = winners
                .iter()
                .copied()
                .filter(|c| {
                    if c.suit == trump {
                        mem.is_boss(*c, &req.hand)
                    } else {
                        c.suit == lead && mem.is_boss(*c, &req.hand)
                    }
                })
                .collect();
            if let Some(c) = lowest(&secure, trump) {
                return Some((c, "win: committing a card that can't be topped"));
            }
            let urgent = req.tricks_needed() as u8 >= req.tricks_remaining();
            if urgent {
                if let Some(c) = highest(&winners, trump) {
                    return Some((c, "win: need every trick left"));
                }
            }
            if chased {
                if let Some(c) = lowest(&losers, trump) {
                    return Some((c, "win: holding back, a seat behind still needs tricks"));
                }
            }
            if let Some(c) = lowest(&non_trumps(&winners, trump), trump) {
                return Some((c, "win: taking a shot with a side card"));
            }
            return lowest(&losers, trump)
                .or_else(|| lowest(legal, trump))
                .map(|c| (c, "follow: saving strength"));
        }

        if chased {
            // someone behind wants this trick: let them overtake a big card
            let lead = req.leading.unwrap_or(trump);
            let overtakable: Vec<Card> = non_trumps(&winners, trump)
                .into_iter()
                .filter(|c| c.suit == lead && mem.higher_unseen(*c, &req.hand) >= 2)
                .collect();
            if let Some(c) = highest(&overtakable, trump) {
                return Some((c, "avoid: ducking a high card under a seat that needs tricks"));
            }
        }
        if let Some(c) = highest(&losers, trump) {
            return Some((c, "avoid: shedding the highest safe card"));
        }
        // forced to take it: get rid of the most dangerous card
        legal
            .iter()
            .copied()
            .max_by_key(|&c| strength_key(c, trump))
            .map(|c| (c, "avoid: forced to win, shedding my biggest"))
    }
}

impl AiPlayer for HardAi {
    fn difficulty(&self) -> Difficulty {
        Difficulty::Hard
    }

    fn make_bid(&self, req: &BidRequest, ctx: Option<&GameContext>) -> Result<u8, AiError> {
        let legal = req.legal_bids();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal bids available".into()));
        }
        if self.brain.roll(BID_RANDOMNESS)? {
            let bid = self.brain.pick(legal)?;
            self.brain.note(format!("Bid {bid}: deliberate variation"));
            return Ok(bid);
        }
        let m = Self::model(req, ctx);
        let est = m.total() + self.brain.jitter(0.15)?;
        let bid = req
            .nearest_legal(est.round() as i32)
            .ok_or_else(|| AiError::Internal("No bid near estimate".into()))?;
        self.brain.note(format!(
            "Bid {bid} from {est:.2} = cards {:.2} + trumps {:.2} + ruffs {:.2} + defense {:.2} \
             + position {:.2} + threat {:.2} + meta {:.2}",
            m.high_cards, m.trumps, m.ruffs, m.defense, m.position, m.threat, m.meta
        ));
        ensure_legal_bid(bid, legal)
    }

    fn play_card(&self, req: &PlayRequest, ctx: Option<&GameContext>) -> Result<Card, AiError> {
        let legal = req.legal_plays();
        if legal.is_empty() {
            return Err(AiError::InvalidMove("No legal plays available".into()));
        }
        if self.brain.roll(PLAY_RANDOMNESS)? {
            let card = self.brain.pick(&legal)?;
            self.brain.note(format!("Played {card}: deliberate variation"));
            return Ok(card);
        }
        let mem = self.brain.memory()?;
        let choice = if req.is_leading() {
            Self::lead(req, &legal, &mem, ctx)
        } else {
            Self::follow(req, &legal, &mem, ctx)
        };
        let (card, why) = choice.ok_or_else(|| AiError::Internal("No card chosen".into()))?;
        self.brain.note(format!(
            "Played {card} ({why}); need {} of {} remaining",
            req.tricks_needed(),
            req.tricks_remaining()
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
