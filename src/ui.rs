//! DOM presentation sink
//!
//! The playfield is plain HTML: one car element, six stone elements, two
//! text counters, and two overlay screens. Elements are looked up once at
//! startup; a missing element disables just that capability (with a warning)
//! rather than taking the game down. Visibility is toggled through the
//! `hidden` class, positions through inline percent styles.

use web_sys::{Document, Element};

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Cached references to the page's game elements
pub struct Ui {
    car: Option<Element>,
    stones: Vec<Option<Element>>,
    score_text: Option<Element>,
    high_score_text: Option<Element>,
    start_screen: Option<Element>,
    game_over_screen: Option<Element>,
}

/// Look up an element, warning once if the page doesn't have it
fn lookup(document: &Document, id: &str) -> Option<Element> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        log::warn!("#{} not found; that part of the page won't update", id);
    }
    el
}

fn set_class(el: &Option<Element>, hidden: bool) {
    if let Some(el) = el {
        let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
    }
}

impl Ui {
    pub fn new(document: &Document) -> Self {
        Self {
            car: lookup(document, "car"),
            stones: (0..STONE_COUNT)
                .map(|i| lookup(document, &format!("stone-{i}")))
                .collect(),
            score_text: lookup(document, "score"),
            high_score_text: lookup(document, "high-score"),
            start_screen: lookup(document, "start-screen"),
            game_over_screen: lookup(document, "game-over"),
        }
    }

    /// Mirror the whole game state onto the page; called once per animation
    /// frame
    pub fn sync(&self, state: &GameState) {
        if let Some(car) = &self.car {
            let _ = car.set_attribute("style", &format!("bottom:{:.3}%", state.car_y));
        }

        for (slot, stone) in self.stones.iter().zip(state.stones.iter()) {
            if let Some(el) = slot {
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.3}%;bottom:{}%;width:{}%;height:{}%",
                        stone.left, stone.bottom, stone.width, stone.height
                    ),
                );
            }
        }

        if let Some(el) = &self.score_text {
            el.set_text_content(Some(&format!("Score: {}", state.score)));
        }
        if let Some(el) = &self.high_score_text {
            el.set_text_content(Some(&format!("High Score: {}", state.high_score)));
        }

        set_class(&self.start_screen, state.phase != GamePhase::Idle);
        set_class(&self.game_over_screen, state.phase != GamePhase::GameOver);
    }
}
