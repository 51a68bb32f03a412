//! Unit tests for identifier and rank types

use super::*;
use std::str::FromStr;

#[cfg(test)]
mod team_id_tests {
    use super::*;

    #[test]
    fn test_team_id_display() {
        let id = TeamId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_team_id_from_str_trims_whitespace() {
        let id = TeamId::from_str(" 7 ").unwrap();
        assert_eq!(id.as_i64(), 7);
    }

    #[test]
    fn test_team_id_from_str_invalid() {
        assert!(TeamId::from_str("bucs").is_err());
    }

    #[test]
    fn test_team_id_serde() {
        let id = TeamId::new(3);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "3");

        let deserialized: TeamId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }
}

#[cfg(test)]
mod player_number_tests {
    use super::*;

    #[test]
    fn test_player_number_display_has_hash() {
        assert_eq!(PlayerNumber::new(12).to_string(), "#12");
    }

    #[test]
    fn test_player_number_accepts_hash_prefix() {
        assert_eq!(PlayerNumber::from_str("#11").unwrap(), PlayerNumber::new(11));
        assert_eq!(PlayerNumber::from_str("2").unwrap(), PlayerNumber::new(2));
    }

    #[test]
    fn test_player_number_rejects_negative() {
        assert!(PlayerNumber::from_str("-1").is_err());
    }
}

#[cfg(test)]
mod rank_tests {
    use super::*;

    #[test]
    fn test_rank_ordering() {
        assert!(Rank::STARTER < Rank::new(1));
        assert_eq!(Rank::default(), Rank::STARTER);
    }

    #[test]
    fn test_rank_next_and_prev() {
        assert_eq!(Rank::new(2).next(), Rank::new(3));
        assert_eq!(Rank::new(2).prev(), Rank::new(1));
        assert_eq!(Rank::STARTER.prev(), Rank::STARTER);
    }

    #[test]
    fn test_rank_from_str() {
        assert_eq!(Rank::from_str("4").unwrap().as_u32(), 4);
        assert!(Rank::from_str("first").is_err());
    }
}
