//! Card parsing from string representations (e.g., "AS", "2C", "10H")

use std::fmt;
use std::str::FromStr;

use super::cards_types::{Card, Rank, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn parse_error(s: &str) -> DomainError {
    DomainError::validation(ValidationKind::ParseCard, format!("Parse card: {s}"))
}

pub(crate) fn rank_char(rank: Rank) -> char {
    match rank {
        Rank::Two => '2',
        Rank::Three => '3',
        Rank::Four => '4',
        Rank::Five => '5',
        Rank::Six => '6',
        Rank::Seven => '7',
        Rank::Eight => '8',
        Rank::Nine => '9',
        Rank::Ten => 'T',
        Rank::Jack => 'J',
        Rank::Queen => 'Q',
        Rank::King => 'K',
        Rank::Ace => 'A',
    }
}

pub(crate) fn suit_char(suit: Suit) -> char {
    match suit {
        Suit::Clubs => 'C',
        Suit::Diamonds => 'D',
        Suit::Hearts => 'H',
        Suit::Spades => 'S',
    }
}

impl FromStr for Card {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        // "10H" is accepted as an alias of "TH"
        let normalized = upper.strip_prefix("10").map(|rest| format!("T{rest}"));
        let token = normalized.as_deref().unwrap_or(&upper);

        let mut chars = token.chars();
        let (Some(rank_ch), Some(suit_ch), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(parse_error(s));
        };

        let rank = match rank_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return Err(parse_error(s)),
        };
        let suit = match suit_ch {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            _ => return Err(parse_error(s)),
        };
        Ok(Card { suit, rank })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", rank_char(self.rank), suit_char(self.suit))
    }
}

/// Non-panicking helper to parse card tokens (e.g., "AS", "2C") into Card instances.
pub fn try_parse_cards<I, S>(tokens: I) -> Result<Vec<Card>, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|s| s.as_ref().parse::<Card>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compact_tokens() {
        assert_eq!("AS".parse::<Card>().unwrap(), Card::new(Suit::Spades, Rank::Ace));
        assert_eq!("2c".parse::<Card>().unwrap(), Card::new(Suit::Clubs, Rank::Two));
        assert_eq!("TH".parse::<Card>().unwrap(), Card::new(Suit::Hearts, Rank::Ten));
        assert_eq!("10H".parse::<Card>().unwrap(), Card::new(Suit::Hearts, Rank::Ten));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "A", "1S", "AX", "ASS", "10"] {
            let err = bad.parse::<Card>().unwrap_err();
            assert!(
                matches!(err, DomainError::Validation(ValidationKind::ParseCard, _)),
                "{bad:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn display_matches_parse() {
        let card = Card::new(Suit::Diamonds, Rank::Queen);
        assert_eq!(card.to_string(), "QD");
        assert_eq!(card.to_string().parse::<Card>().unwrap(), card);
    }

    #[test]
    fn try_parse_cards_stops_at_first_error() {
        assert_eq!(try_parse_cards(["AS", "KD"]).unwrap().len(), 2);
        assert!(try_parse_cards(["AS", "ZZ"]).is_err());
    }
}
