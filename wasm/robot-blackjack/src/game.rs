use log::{debug, info};

use crate::{
    config::TableConfig,
    draw::CardSource,
    hand::Hand,
};

#[derive(Clone, Debug)]
pub struct GameRules {
    pub dealer_stands_on: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        GameRules { dealer_stands_on: 17 }
    }
}

impl From<&TableConfig> for GameRules {
    fn from(config: &TableConfig) -> Self {
        GameRules {
            dealer_stands_on: config.dealer_stands_on,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    PlayerWins,
    DealerWins,
    Tie,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::PlayerBust => "Robot Wins! You Busted.",
            Outcome::DealerBust => "You Win! Robot Busted.",
            Outcome::PlayerWins => "You Win!",
            Outcome::DealerWins => "Robot Wins!",
            Outcome::Tie => "It's a Tie!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Hit,
    Stand,
    DealerTick,
    Reset,
}

/// Compares final hands. Player bust is checked first, so a round where
/// both sides are over 21 goes to the dealer.
pub fn resolve(player: &Hand, dealer: &Hand) -> Outcome {
    let player_value = player.value();
    let dealer_value = dealer.value();

    if player.is_bust() {
        Outcome::PlayerBust
    } else if dealer.is_bust() {
        Outcome::DealerBust
    } else if player_value > dealer_value {
        Outcome::PlayerWins
    } else if dealer_value > player_value {
        Outcome::DealerWins
    } else {
        Outcome::Tie
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    player: Hand,
    dealer: Hand,
    phase: Phase,
    // Stays set when the player busts; only standing hands the turn over.
    player_turn: bool,
    outcome: Option<Outcome>,
}

impl GameState {
    pub fn deal<S: CardSource + ?Sized>(source: &mut S) -> Self {
        let mut state = GameState::default();
        for _ in 0..2 {
            state.player.push(source.draw());
        }
        for _ in 0..2 {
            state.dealer.push(source.draw());
        }
        state.phase = Phase::PlayerTurn;
        state.player_turn = true;
        state
    }

    /// Starts a round from hands that are already dealt.
    pub fn from_hands(player: Hand, dealer: Hand) -> Self {
        GameState {
            player,
            dealer,
            phase: Phase::PlayerTurn,
            player_turn: true,
            outcome: None,
        }
    }

    pub fn player(&self) -> &Hand {
        &self.player
    }

    pub fn dealer(&self) -> &Hand {
        &self.dealer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// True from the deal until the player stands. A bust ends the round
    /// without ending the turn, so this and `is_game_over` can both hold.
    pub fn is_player_turn(&self) -> bool {
        self.player_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Resolved
    }

    pub fn accepts(&self, event: Event) -> bool {
        matches!(
            (self.phase, event),
            (_, Event::Reset)
                | (Phase::PlayerTurn, Event::Hit)
                | (Phase::PlayerTurn, Event::Stand)
                | (Phase::DealerTurn, Event::DealerTick)
        )
    }

    /// Advances the round by one event. Events that don't fit the current
    /// phase hand the state back untouched.
    pub fn apply<S: CardSource + ?Sized>(
        mut self,
        event: Event,
        rules: &GameRules,
        source: &mut S,
    ) -> GameState {
        match (self.phase, event) {
            (_, Event::Reset) => GameState::deal(source),
            (Phase::PlayerTurn, Event::Hit) => {
                self.player.push(source.draw());
                if self.player.is_bust() {
                    self.finish();
                }
                self
            }
            (Phase::PlayerTurn, Event::Stand) => {
                self.phase = Phase::DealerTurn;
                self.player_turn = false;
                self
            }
            (Phase::DealerTurn, Event::DealerTick) => {
                if self.dealer.value() < rules.dealer_stands_on {
                    self.dealer.push(source.draw());
                } else {
                    self.finish();
                }
                self
            }
            _ => self,
        }
    }

    fn finish(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(resolve(&self.player, &self.dealer));
            self.phase = Phase::Resolved;
        }
    }
}

/// A round plus the rules and card source that drive it.
pub struct Table<S> {
    rules: GameRules,
    state: GameState,
    source: S,
    rounds: u32,
}

impl<S: CardSource> Table<S> {
    pub fn new(rules: GameRules, mut source: S) -> Self {
        let state = GameState::deal(&mut source);
        debug!(
            "round 1 dealt: player {} / dealer {}",
            state.player.value(),
            state.dealer.value()
        );
        Table {
            rules,
            state,
            source,
            rounds: 1,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Returns false when the event was ignored.
    pub fn apply(&mut self, event: Event) -> bool {
        if !self.state.accepts(event) {
            debug!("ignoring {event:?} during {:?}", self.state.phase);
            return false;
        }

        let state = std::mem::take(&mut self.state);
        self.state = state.apply(event, &self.rules, &mut self.source);

        match event {
            Event::Reset => {
                self.rounds = self.rounds.wrapping_add(1);
                debug!(
                    "round {} dealt: player {} / dealer {}",
                    self.rounds,
                    self.state.player.value(),
                    self.state.dealer.value()
                );
            }
            Event::Hit => debug!("player hits: {}", self.state.player.value()),
            Event::Stand => debug!("player stands on {}", self.state.player.value()),
            Event::DealerTick => debug!("dealer at {}", self.state.dealer.value()),
        }
        if event != Event::Reset {
            if let Some(outcome) = self.state.outcome {
                info!(
                    "round {} over: {} (player {}, dealer {})",
                    self.rounds,
                    outcome.label(),
                    self.state.player.value(),
                    self.state.dealer.value()
                );
            }
        }
        true
    }

    pub fn hit(&mut self) -> bool {
        self.apply(Event::Hit)
    }

    pub fn stand(&mut self) -> bool {
        self.apply(Event::Stand)
    }

    pub fn dealer_tick(&mut self) -> bool {
        self.apply(Event::DealerTick)
    }

    pub fn reset(&mut self) -> bool {
        self.apply(Event::Reset)
    }

    /// Runs dealer ticks back to back until the round is settled.
    pub fn play_out_dealer(&mut self) -> Option<Outcome> {
        while self.state.phase == Phase::DealerTurn {
            self.dealer_tick();
        }
        self.state.outcome
    }
}
