use std::time::Duration;

use js_sys::Function;
use log::warn;
use wasm_bindgen::prelude::*;

pub mod card;
pub mod config;
pub mod draw;
pub mod error;
pub mod game;
pub mod hand;
pub mod logging;
pub mod schedule;
pub mod session;
pub mod view;

pub use card::{Card, Rank, Suit};
pub use config::TableConfig;
pub use draw::{CardSource, RandomDraw, Scripted};
pub use error::TableError;
pub use game::{resolve, Event, GameRules, GameState, Outcome, Phase, Table};
pub use hand::{hand_value, Hand};
pub use schedule::{Cancel, IntervalScheduler, ManualScheduler, Scheduler};
pub use session::Session;
pub use view::{CardView, TableView};

fn parse_config(value: &JsValue) -> Result<TableConfig, TableError> {
    if value.is_undefined() || value.is_null() {
        return Ok(TableConfig::default());
    }
    let config: TableConfig =
        serde_wasm_bindgen::from_value(value.clone()).map_err(TableError::InvalidConfig)?;
    Ok(config.normalized())
}

fn to_js(err: TableError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The browser-facing game: one table, one dealer timer.
#[wasm_bindgen]
pub struct BlackjackTable {
    session: Session<IntervalScheduler, RandomDraw>,
}

#[wasm_bindgen]
impl BlackjackTable {
    #[wasm_bindgen(constructor)]
    pub fn new(config: &JsValue, on_change: Option<Function>) -> Result<BlackjackTable, JsValue> {
        console_error_panic_hook::set_once();
        let config = parse_config(config).map_err(to_js)?;
        logging::init(config.level_filter());

        let scheduler = IntervalScheduler::new().map_err(to_js)?;
        let table = Table::new(GameRules::from(&config), RandomDraw::from_seed(config.seed));
        let period = Duration::from_millis(u64::from(config.dealer_tick_ms));
        let mut session = Session::new(table, scheduler, period);

        if let Some(callback) = on_change {
            session = session.with_listener(move || {
                if let Err(err) = callback.call0(&JsValue::NULL) {
                    warn!("on_change callback failed: {err:?}");
                }
            });
        }

        Ok(BlackjackTable { session })
    }

    pub fn hit(&self) -> bool {
        self.session.hit()
    }

    pub fn stand(&self) -> bool {
        self.session.stand()
    }

    pub fn reset(&self) -> bool {
        self.session.reset()
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.view())
            .map_err(|err| to_js(TableError::Serialization(err)))
    }

    #[wasm_bindgen(getter)]
    pub fn rounds(&self) -> u32 {
        self.session.rounds()
    }
}

/// Value of a hand given rank labels ("A", "K", "7", ...). Unknown labels
/// are rejected.
#[wasm_bindgen(js_name = handValue)]
pub fn hand_value_of(ranks: Vec<String>) -> Result<u32, JsValue> {
    let cards = ranks
        .iter()
        .map(|name| {
            Rank::from_name(name)
                .map(|rank| Card::new(rank, Suit::Spades))
                .ok_or_else(|| JsValue::from_str(&format!("Unknown rank: {name}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(hand_value(&cards))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ranks: &[&str]) -> Vec<String> {
        ranks.iter().map(|rank| rank.to_string()).collect()
    }

    #[test]
    fn hand_value_export_reduces_aces() {
        assert_eq!(hand_value_of(labels(&["A", "A", "9"])).unwrap(), 21);
        assert_eq!(hand_value_of(labels(&["A", "K"])).unwrap(), 21);
        assert_eq!(hand_value_of(labels(&["10", "J", "5"])).unwrap(), 25);
        assert_eq!(hand_value_of(Vec::new()).unwrap(), 0);
    }
}
