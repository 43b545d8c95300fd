use crate::consts;
use ratatui::{layout::Position, style::Style};

/// The three things a snake can swallow
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum FoodKind {
    Mouse,
    BigMouse,
    Poison,
}

impl FoodKind {
    /// Score delta before skin modifiers
    pub(super) fn base_score(self) -> i32 {
        match self {
            FoodKind::Mouse => 1,
            FoodKind::BigMouse => 5,
            FoodKind::Poison => -3,
        }
    }

    /// Growth delta before skin modifiers
    pub(super) fn base_growth(self) -> i32 {
        match self {
            FoodKind::Mouse => 1,
            FoodKind::BigMouse => 3,
            FoodKind::Poison => -2,
        }
    }

    /// Mice count towards the eaten tally; poison does not
    pub(super) fn is_prey(self) -> bool {
        matches!(self, FoodKind::Mouse | FoodKind::BigMouse)
    }

    pub(super) fn symbol(self) -> char {
        match self {
            FoodKind::Mouse => consts::MOUSE_SYMBOL,
            FoodKind::BigMouse => consts::BIG_MOUSE_SYMBOL,
            FoodKind::Poison => consts::POISON_SYMBOL,
        }
    }

    pub(super) fn style(self) -> Style {
        match self {
            FoodKind::Mouse => consts::MOUSE_STYLE,
            FoodKind::BigMouse => consts::BIG_MOUSE_STYLE,
            FoodKind::Poison => consts::POISON_STYLE,
        }
    }
}

/// One item on the ground.  A cell holds at most one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) pos: Position,
    pub(super) kind: FoodKind,
}
