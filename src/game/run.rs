//! One play session: the simulation state advanced a step at a time by the
//! game screen's tick loop.  Nothing in here touches the terminal, so every
//! rule is testable with a seeded RNG and a hand-built board.
use super::direction::Direction;
use super::food::{Food, FoodKind};
use super::snake::Snake;
use crate::consts;
use crate::skins::SkinStats;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Rect, Size};
use std::cmp::Ordering;
use std::time::Duration;

#[derive(Clone, Debug)]
pub(super) struct Run<R = rand::rngs::ThreadRng> {
    rng: R,
    stats: SkinStats,
    pub(super) snake: Snake,
    pub(super) food: Vec<Food>,
    pub(super) score: u32,
    pub(super) interval: Duration,
    pub(super) eaten: u32,
    pub(super) pending: Direction,
    pub(super) alive: bool,
}

impl<R: Rng> Run<R> {
    pub(super) fn new(stats: SkinStats, rng: R) -> Run<R> {
        let start = Position::new(consts::GRID_SIZE / 2, consts::GRID_SIZE / 2);
        let mut run = Run {
            rng,
            stats,
            snake: Snake::new(start, Direction::North, consts::INITIAL_SNAKE_LENGTH),
            food: Vec::new(),
            score: 0,
            interval: initial_interval(stats),
            eaten: 0,
            pending: Direction::North,
            alive: true,
        };
        run.spawn(FoodKind::Mouse);
        run
    }

    /// Buffer a direction change for the next tick.  Reversals are refused
    /// here as well as at commit time, so a pending turn can never point the
    /// snake back down its own throat.
    pub(super) fn steer(&mut self, direction: Direction) {
        if direction != self.snake.direction().reverse() {
            self.pending = direction;
        }
    }

    /// Advance the simulation by exactly one tick
    pub(super) fn step(&mut self) {
        if !self.alive {
            return;
        }
        let _ = self.snake.turn(self.pending);
        let head = self
            .snake
            .direction()
            .advance(self.snake.head(), consts::GRID_SIZE);
        if self.snake.contains(head) {
            // Terminal: the score is left exactly as it was
            self.alive = false;
            return;
        }
        self.snake.push_head(head);
        if let Some(idx) = self.food.iter().position(|f| f.pos == head) {
            let kind = self.food.remove(idx).kind;
            self.eat(kind);
        } else {
            self.snake.drop_tail();
        }
    }

    fn eat(&mut self, kind: FoodKind) {
        let base = kind.base_score();
        let score_delta = if kind == FoodKind::Poison {
            self.stats.poison_resist.apply_ceil(base)
        } else {
            self.stats.score_mod.apply_ceil(base)
        };
        self.score =
            u32::try_from(i64::from(self.score) + i64::from(score_delta)).unwrap_or(0);

        let base = kind.base_growth();
        let growth_delta = if base > 0 {
            self.stats.growth_mod.apply_round(base).max(1)
        } else {
            self.stats.poison_resist.apply_round(base)
        };
        match growth_delta.cmp(&0) {
            Ordering::Greater => {
                // the freshly-pushed head already supplies one unit of growth
                self.snake.grow_tail(usize::try_from(growth_delta - 1).unwrap_or(0));
            }
            Ordering::Less => {
                // one extra cell to cancel out the head push
                let shrink = usize::try_from(-growth_delta).unwrap_or(0) + 1;
                self.snake.shrink_tail(shrink);
            }
            Ordering::Equal => (),
        }

        if kind.is_prey() {
            self.eaten += 1;
            self.spawn(FoodKind::Mouse);
            if self.eaten % consts::BIG_MOUSE_CADENCE == 0 {
                self.spawn(FoodKind::BigMouse);
            }
            // independent of the cadence above; both can fire on one tick
            if self.rng.random_bool(consts::POISON_CHANCE) {
                self.spawn(FoodKind::Poison);
            }
            self.interval = self
                .interval
                .saturating_sub(consts::INTERVAL_STEP)
                .max(consts::MIN_INTERVAL);
        }
    }

    /// Drop an item of `kind` on a uniformly-chosen free cell.  Choosing
    /// from the filtered cell iterator (rather than rejection sampling)
    /// means a nearly-full board degrades to "no spawn" instead of an
    /// endless search.
    fn spawn(&mut self, kind: FoodKind) {
        let snake = &self.snake;
        let food = &self.food;
        let choice = grid_rect()
            .positions()
            .filter(|&p| !snake.contains(p) && !food.iter().any(|f| f.pos == p))
            .choose(&mut self.rng);
        self.food.extend(choice.map(|pos| Food { pos, kind }));
    }
}

fn grid_rect() -> Rect {
    Rect::from((
        Position::ORIGIN,
        Size {
            width: consts::GRID_SIZE,
            height: consts::GRID_SIZE,
        },
    ))
}

/// Starting tick interval for a skin: the base interval minus the skin's
/// speed bonus, never below the global floor
fn initial_interval(stats: SkinStats) -> Duration {
    let base = i64::try_from(consts::INITIAL_INTERVAL.as_millis()).unwrap_or(i64::MAX);
    let ms = base - stats.speed_mod;
    let floor = u64::try_from(consts::MIN_INTERVAL.as_millis()).unwrap_or(u64::MAX);
    Duration::from_millis(u64::try_from(ms).unwrap_or(0).max(floor))
}
