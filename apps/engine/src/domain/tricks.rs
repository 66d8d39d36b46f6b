use crate::domain::state::{expected_actor, Position};
use crate::domain::{card_beats, is_legal_play, Card, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

/// Read-only view of the open trick.
#[derive(Debug, Clone, Copy)]
pub struct TrickView<'a> {
    pub seats: u8,
    pub lead_position: Position,
    pub trump: Suit,
    /// Cards already in the trick, in play order.
    pub plays: &'a [(Position, Card)],
}

/// Result of an accepted card play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAdvance {
    /// Trick still open; this seat plays next.
    Next(Position),
    /// Last card of the trick; `winner` takes it and leads next.
    TrickComplete { winner: Position },
}

impl<'a> TrickView<'a> {
    /// Suit of the first card played, if any.
    pub fn leading_suit(&self) -> Option<Suit> {
        self.plays.first().map(|(_, c)| c.suit)
    }

    pub fn next_to_play(&self) -> Option<Position> {
        if self.plays.len() >= self.seats as usize {
            return None;
        }
        Some(expected_actor(
            self.lead_position,
            self.plays.len() as u8,
            self.seats,
        ))
    }

    /// Turn, possession and follow-suit checks for `card` from `who`.
    pub fn validate_play(
        &self,
        who: Position,
        hand: &[Card],
        card: Card,
    ) -> Result<PlayAdvance, DomainError> {
        let Some(expected) = self.next_to_play() else {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "Trick already complete",
            ));
        };
        if expected != who {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Out of turn: seat {expected} plays next, not seat {who}"),
            ));
        }
        if !hand.contains(&card) {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                format!("{card} is not in hand"),
            ));
        }
        let leading = self.leading_suit();
        if !is_legal_play(hand, leading, card) {
            return Err(DomainError::validation(
                ValidationKind::MustFollowSuit,
                format!("Must follow {:?}", leading.unwrap_or(card.suit)),
            ));
        }

        if self.plays.len() + 1 < self.seats as usize {
            return Ok(PlayAdvance::Next(expected_actor(
                self.lead_position,
                self.plays.len() as u8 + 1,
                self.seats,
            )));
        }

        let mut all = self.plays.to_vec();
        all.push((who, card));
        let leading = leading.unwrap_or(card.suit);
        let winner = resolve_trick_winner(&all, self.lead_position, self.trump, leading)
            .ok_or_else(|| {
                DomainError::validation_other("Invariant violated: completed trick has no winner")
            })?;
        Ok(PlayAdvance::TrickComplete { winner })
    }
}

/// Fold the played cards with [`card_beats`], seeded with the leader's card.
///
/// Returns `None` when the leader has not played into `plays`.
pub fn resolve_trick_winner(
    plays: &[(Position, Card)],
    lead_position: Position,
    trump: Suit,
    leading: Suit,
) -> Option<Position> {
    let &(_, lead_card) = plays.iter().find(|(p, _)| *p == lead_position)?;
    let (winner, _) = plays
        .iter()
        .filter(|(p, _)| *p != lead_position)
        .fold((lead_position, lead_card), |(best_pos, best), &(pos, card)| {
            if card_beats(card, best, trump, leading) {
                (pos, card)
            } else {
                (best_pos, best)
            }
        });
    Some(winner)
}
