mod direction;
mod food;
mod paused;
mod run;
mod snake;
use self::direction::Direction;
use self::paused::{PauseOpt, Paused};
use self::run::Run;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::gameover::GameOver;
use crate::profile::save_high_score;
use crate::util::{center_rect, error_chain, get_display_area, Globals};
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect, Size},
    style::Style,
    text::Line,
    widgets::Widget,
    Frame,
};
use std::time::Instant;

/// The play screen: drives the tick loop, feeds input to the run, and draws
/// the hunting ground
#[derive(Clone, Debug)]
pub(crate) struct Game {
    run: Run,
    globals: Globals,
    state: GameState,
    /// Deadline of the next simulation step, unset between ticks
    next_tick: Option<Instant>,
    /// Where an in-progress mouse drag (the swipe gesture) started
    drag_origin: Option<(u16, u16)>,
}

impl Game {
    pub(crate) fn new(globals: Globals) -> Game {
        let run = Run::new(globals.active_skin().stats, rand::rng());
        Game {
            run,
            globals,
            state: GameState::Running,
            next_tick: None,
            drag_origin: None,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.state == GameState::Running {
            if self.next_tick.is_none() {
                self.next_tick = Some(Instant::now() + self.run.interval);
            }
            let when = self.next_tick.expect("next_tick should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                // Exactly one step per elapsed interval; a stall slows the
                // game down rather than triggering a catch-up burst
                self.run.step();
                self.next_tick = None;
                if !self.run.alive {
                    return Ok(Some(self.finish()));
                }
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// The run is over: bank the score as coins, update the global high
    /// score, and hand off to the game-over screen
    fn finish(&mut self) -> Screen {
        let score = self.run.score;
        let mut globals = self.globals.clone();
        let mut warnings = Vec::new();
        globals.profile.coins = globals.profile.coins.saturating_add(score);
        if let Err(e) = globals
            .profile
            .save_coins(globals.store.as_ref(), globals.session.namespace())
        {
            warnings.push(error_chain(&e));
        }
        let new_record = score > globals.high_score;
        if new_record {
            globals.high_score = score;
            if let Err(e) = save_high_score(globals.store.as_ref(), score) {
                warnings.push(error_chain(&e));
            }
        }
        Screen::GameOver(GameOver::new(globals, score, new_record, warnings))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else if let Event::Mouse(mev) = event {
                    self.handle_mouse(mev);
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.run.steer(Direction::North),
                        Command::Left => self.run.steer(Direction::West),
                        Command::Down => self.run.steer(Direction::South),
                        Command::Right => self.run.steer(Direction::East),
                        Command::Esc => self.pause(),
                        _ => (),
                    }
                }
            }
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => {
                    self.state = GameState::Running;
                    self.next_tick = None;
                }
                PauseOpt::Restart => return Some(Screen::Game(Game::new(self.globals.clone()))),
                PauseOpt::MainMenu => {
                    return Some(Screen::Main(crate::menu::MainMenu::new(
                        self.globals.clone(),
                    )))
                }
                PauseOpt::Quit => return Some(Screen::Quit),
            },
        }
        None
    }

    /// Swipe gestures: a button-down followed by a button-up displaced by at
    /// least the threshold steers along the dominant axis
    fn handle_mouse(&mut self, mev: MouseEvent) {
        match mev.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_origin = Some((mev.column, mev.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some((x0, y0)) = self.drag_origin.take() {
                    self.swipe(
                        i32::from(mev.column) - i32::from(x0),
                        i32::from(mev.row) - i32::from(y0),
                    );
                }
            }
            _ => (),
        }
    }

    fn swipe(&mut self, dx: i32, dy: i32) {
        let threshold = i32::from(consts::SWIPE_THRESHOLD);
        if dx.abs() > dy.abs() {
            if dx >= threshold {
                self.run.steer(Direction::East);
            } else if dx <= -threshold {
                self.run.steer(Direction::West);
            }
        } else if dy >= threshold {
            self.run.steer(Direction::South);
        } else if dy <= -threshold {
            self.run.steer(Direction::North);
        }
    }

    fn pause(&mut self) {
        self.state = GameState::Paused(Paused::new());
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }
}

/// Cells are drawn two terminal columns wide so the square grid looks square
const CELL_WIDTH: u16 = 2;

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        let skin = self.globals.active_skin();
        Line::styled(
            format!(
                " Score: {}  ·  {}  ·  Best: {}",
                self.run.score, skin.name, self.globals.high_score
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_size = Size {
            width: consts::GRID_SIZE * CELL_WIDTH + 2,
            height: consts::GRID_SIZE + 2,
        };
        let block_area = center_rect(board_area, block_size);
        // The ground is toroidal, so the border is dotted: the world
        // continues on the other side
        DottedBorder.render(block_area, buf);

        let level_area = block_area.inner(ratatui::layout::Margin::new(1, 1));
        let mut level = Canvas {
            area: level_area,
            buf,
        };
        for y in 0..consts::GRID_SIZE {
            for x in 0..consts::GRID_SIZE {
                level.draw_cell(
                    Position::new(x, y),
                    consts::GRID_DOT_SYMBOL,
                    consts::GRID_DOT_STYLE,
                );
            }
        }
        for f in &self.run.food {
            level.draw_cell(f.pos, f.kind.symbol(), f.kind.style());
        }
        let body_style = Style::new().fg(skin.body_color);
        for &p in self.run.snake.cells().iter().skip(1) {
            level.draw_cell(p, consts::SNAKE_BODY_SYMBOL, body_style);
        }
        let head_style = Style::new().fg(skin.head_color);
        if self.run.alive {
            level.draw_cell(self.run.snake.head(), self.run.snake.head_symbol(), head_style);
        } else {
            level.draw_cell(
                self.run.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        }

        if let GameState::Paused(paused) = self.state {
            let pause_area = center_rect(
                display,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            paused.render(pause_area, buf);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    /// Draw a grid cell; grid x-coordinates are scaled by [`CELL_WIDTH`]
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn game() -> Game {
        Game::new(Globals::test())
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn horizontal_swipe_steers_east() {
        let mut game = game();
        assert!(game
            .handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10))
            .is_none());
        assert!(game
            .handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 17, 11))
            .is_none());
        assert_eq!(game.run.pending, Direction::East);
    }

    #[test]
    fn downward_swipe_is_a_rejected_reversal() {
        let mut game = game();
        let _ = game.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        let _ = game.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 15));
        // the snake starts out heading north; south is ignored
        assert_eq!(game.run.pending, Direction::North);
    }

    #[test]
    fn tiny_drag_is_not_a_swipe() {
        let mut game = game();
        let _ = game.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        let _ = game.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 11, 10));
        assert_eq!(game.run.pending, Direction::North);
    }

    #[test]
    fn escape_pauses_and_resumes() {
        let mut game = game();
        assert!(game.handle_event(Event::Key(KeyCode::Esc.into())).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
        assert!(game.handle_event(Event::Key(KeyCode::Esc.into())).is_none());
        assert_eq!(game.state, GameState::Running);
    }

    #[test]
    fn focus_loss_pauses() {
        let mut game = game();
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(matches!(game.state, GameState::Paused(_)));
    }

    #[test]
    fn arrows_steer_the_run() {
        let mut game = game();
        assert!(game
            .handle_event(Event::Key(KeyCode::Left.into()))
            .is_none());
        assert_eq!(game.run.pending, Direction::West);
    }
}
