use serde::Serialize;

use crate::{card::Card, game::GameState};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardView {
    Shown(Card),
    Hidden { hidden: bool },
}

/// Everything the page needs to draw the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub player_cards: Vec<CardView>,
    pub dealer_cards: Vec<CardView>,
    pub player_value: u32,
    pub dealer_value_label: String,
    pub is_player_turn: bool,
    pub is_game_over: bool,
    pub show_actions: bool,
    pub show_play_again: bool,
    pub status: String,
}

impl TableView {
    pub fn from_state(state: &GameState) -> Self {
        let conceal = state.is_player_turn();
        let dealer = state.dealer();

        let dealer_cards = dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| {
                if conceal && index == 0 {
                    CardView::Hidden { hidden: true }
                } else {
                    CardView::Shown(*card)
                }
            })
            .collect();

        let dealer_value_label = if conceal {
            format!("Hidden + {}", dealer.visible_value())
        } else {
            dealer.value().to_string()
        };

        TableView {
            player_cards: state.player().cards().iter().copied().map(CardView::Shown).collect(),
            dealer_cards,
            player_value: state.player().value(),
            dealer_value_label,
            is_player_turn: state.is_player_turn(),
            is_game_over: state.is_game_over(),
            show_actions: state.is_player_turn() && !state.is_game_over(),
            show_play_again: state.is_game_over(),
            status: state
                .outcome()
                .map(|outcome| outcome.label().to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        card::{Rank, Suit},
        draw::Scripted,
        game::{GameRules, Table},
    };

    fn table(ranks: &[Rank]) -> Table<Scripted> {
        let cards = ranks.iter().map(|&rank| Card::new(rank, Suit::Clubs)).collect();
        Table::new(GameRules::default(), Scripted::new(cards))
    }

    #[test]
    fn hole_card_hidden_during_player_turn() {
        let t = table(&[Rank::Ten, Rank::Nine, Rank::Ace, Rank::Six]);
        let view = TableView::from_state(t.state());

        assert_eq!(view.dealer_cards[0], CardView::Hidden { hidden: true });
        assert_eq!(view.dealer_cards[1], CardView::Shown(Card::new(Rank::Six, Suit::Clubs)));
        assert_eq!(view.dealer_value_label, "Hidden + 6");
        assert_eq!(view.player_value, 19);
        assert!(view.show_actions);
        assert!(!view.show_play_again);
        assert_eq!(view.status, "");
    }

    #[test]
    fn hole_card_revealed_once_player_stands() {
        let mut t = table(&[Rank::Ten, Rank::Nine, Rank::Ace, Rank::Six]);
        t.stand();
        let view = TableView::from_state(t.state());

        assert!(view.dealer_cards.iter().all(|c| matches!(c, CardView::Shown(_))));
        assert_eq!(view.dealer_value_label, "17");
        assert!(!view.show_actions);
        assert!(!view.show_play_again);
    }

    #[test]
    fn resolved_round_shows_play_again_and_status() {
        let mut t = table(&[Rank::Ten, Rank::Nine, Rank::Ace, Rank::Six]);
        t.stand();
        t.play_out_dealer();
        let view = TableView::from_state(t.state());

        assert!(view.is_game_over);
        assert!(view.show_play_again);
        assert!(!view.show_actions);
        assert_eq!(view.status, "You Win!");
    }

    #[test]
    fn player_bust_keeps_hole_card_hidden() {
        // player 10+10, dealer K+6, then a King for the player.
        let mut t = table(&[Rank::Ten, Rank::Ten, Rank::King, Rank::Six, Rank::King]);
        assert!(t.hit());
        let view = TableView::from_state(t.state());

        assert_eq!(view.status, "Robot Wins! You Busted.");
        assert!(view.is_player_turn);
        assert!(view.is_game_over);
        assert_eq!(view.dealer_cards[0], CardView::Hidden { hidden: true });
        assert_eq!(view.dealer_value_label, "Hidden + 6");
        assert!(view.show_play_again);
        assert!(!view.show_actions);
    }

    #[test]
    fn serializes_camel_case_with_hidden_marker() {
        let t = table(&[Rank::Ten, Rank::Nine, Rank::Ace, Rank::Six]);
        let json = serde_json::to_value(TableView::from_state(t.state())).unwrap();

        assert_eq!(json["dealerCards"][0], serde_json::json!({ "hidden": true }));
        assert_eq!(json["dealerCards"][1]["name"], "6");
        assert_eq!(json["playerCards"][0]["value"], 10);
        assert_eq!(json["dealerValueLabel"], "Hidden + 6");
        assert_eq!(json["isPlayerTurn"], true);
        assert_eq!(json["showPlayAgain"], false);
    }
}
