//! The game-over screen: final score, commentary, and the save-score flow
//! with its make-believe on-chain confirmation.
use crate::app::Screen;
use crate::chain::TxKind;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::leaderboard::{BoardScreen, Entry};
use crate::menu::MainMenu;
use crate::util::{center_rect, error_chain, get_display_area, now_unix, EnumExt, Globals};
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Padding, Widget},
    Frame,
};
use std::time::Instant;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

#[derive(Clone, Debug)]
pub(crate) struct GameOver {
    globals: Globals,
    score: u32,
    new_record: bool,
    commentary: String,
    name: NameInput,
    focus: Focus,
    save: SaveState,
    warnings: Vec<String>,
}

impl GameOver {
    pub(crate) fn new(
        globals: Globals,
        score: u32,
        new_record: bool,
        warnings: Vec<String>,
    ) -> GameOver {
        // The commentary capability may fail for any number of reasons; none
        // of them are allowed to delay or break this screen
        let commentary = globals
            .commentary
            .comment(score)
            .unwrap_or_else(|_| consts::DEFAULT_COMMENTARY.to_owned());
        GameOver {
            globals,
            score,
            new_record,
            commentary,
            name: NameInput::default(),
            focus: Focus::NameField,
            save: SaveState::Idle,
            warnings,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        match self.save {
            SaveState::Idle => Ok(self.handle_event(read()?)),
            SaveState::Minting(started) => {
                let deadline = started + consts::MINT_DELAY;
                if self.wait_or_drain(deadline)? {
                    return Ok(Some(Screen::Quit));
                }
                if Instant::now() >= deadline {
                    self.save = SaveState::Confirmed(Instant::now());
                }
                Ok(None)
            }
            SaveState::Confirmed(started) => {
                let deadline = started + consts::CONFIRM_DELAY;
                if self.wait_or_drain(deadline)? {
                    return Ok(Some(Screen::Quit));
                }
                if Instant::now() >= deadline {
                    return Ok(Some(self.finish_save()));
                }
                Ok(None)
            }
        }
    }

    /// Wait out the fake confirmation delay, discarding input except for an
    /// interrupt.  Returns `true` if the user asked to quit.
    fn wait_or_drain(&self, deadline: Instant) -> std::io::Result<bool> {
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() && poll(wait)? {
            if let Some(ev) = read()?.as_key_press_event() {
                if Command::from_key_event(ev) == Some(Command::Quit) {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let key = event.as_key_press_event()?;
        if Command::from_key_event(key) == Some(Command::Quit) {
            return Some(Screen::Quit);
        }
        if self.focus == Focus::NameField {
            let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
            match key.code {
                KeyCode::Char(c) if normal_modifiers.contains(key.modifiers) => {
                    self.name.push(c);
                    return None;
                }
                KeyCode::Backspace => {
                    self.name.pop();
                    return None;
                }
                _ => (),
            }
        }
        match Command::from_key_event(key)? {
            Command::Enter => return self.activate(),
            Command::Up | Command::Prev => {
                self.focus = self.focus.prev().unwrap_or_else(Focus::max);
            }
            Command::Down | Command::Next => {
                self.focus = self.focus.next().unwrap_or_else(Focus::min);
            }
            Command::R => return Some(Screen::Game(Game::new(self.globals.clone()))),
            Command::M => return Some(Screen::Main(MainMenu::new(self.globals.clone()))),
            Command::Q => return Some(Screen::Quit),
            _ => (),
        }
        None
    }

    fn activate(&mut self) -> Option<Screen> {
        match self.focus {
            Focus::NameField | Focus::SaveButton => {
                if !self.name.is_empty() {
                    self.save = SaveState::Minting(Instant::now());
                }
                None
            }
            Focus::PlayAgain => Some(Screen::Game(Game::new(self.globals.clone()))),
            Focus::MainMenu => Some(Screen::Main(MainMenu::new(self.globals.clone()))),
        }
    }

    /// The fake confirmation dance is over: issue the receipt, record it,
    /// insert the leaderboard entry, and move on to the board
    fn finish_save(&mut self) -> Screen {
        let mut globals = self.globals.clone();
        let mut errors = Vec::new();
        let receipt = globals.ledger.borrow_mut().submit(TxKind::ScoreSync);
        let entry = Entry {
            name: self.name.value().to_owned(),
            address: globals.session.address().map(str::to_owned),
            score: self.score,
            timestamp: now_unix(),
            tx_hash: Some(receipt.hash.clone()),
        };
        let ns = globals.session.namespace().to_owned();
        if let Err(e) = globals.profile.record_tx(globals.store.as_ref(), &ns, receipt) {
            errors.push(error_chain(&e));
        }
        globals.leaderboard.insert(entry);
        if let Err(e) = globals.leaderboard.save(globals.store.as_ref()) {
            errors.push(error_chain(&e));
        }
        if errors.is_empty() {
            Screen::Board(BoardScreen::new(globals))
        } else {
            Screen::Main(MainMenu::with_warnings(globals, errors))
        }
    }
}

impl Widget for &GameOver {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, score_area, record_area, commentary_area, name_area, buttons_area, warn_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Fill(1),
            ])
            .spacing(1)
            .areas(display);

        Line::styled(
            "OUCH!",
            Style::new()
                .fg(Color::Rgb(0xEF, 0x44, 0x44))
                .add_modifier(Modifier::BOLD),
        )
        .centered()
        .render(title_area, buf);

        Line::from(format!("Final Score: {}", self.score))
            .centered()
            .render(score_area, buf);
        if self.new_record {
            Line::styled("★ NEW RECORD ★", consts::RECORD_STYLE)
                .centered()
                .render(record_area, buf);
        }

        Line::styled(
            format!("“{}”", self.commentary),
            Style::new().add_modifier(Modifier::ITALIC),
        )
        .centered()
        .render(commentary_area, buf);

        let [name_area] = Layout::horizontal([NameInput::WIDTH])
            .flex(Flex::Center)
            .areas(name_area);
        self.name.render_field(self.focus == Focus::NameField, name_area, buf);

        let save_style = if self.name.is_empty() {
            Style::new().add_modifier(Modifier::DIM)
        } else if self.focus == Focus::SaveButton {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        let button = |label: &str, focused: bool| {
            let style = if focused {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            Line::styled(label.to_owned(), style).centered()
        };
        for (line, row) in [
            Line::styled("[Save Score]", save_style).centered(),
            button("[Play Again (r)]", self.focus == Focus::PlayAgain),
            button("[Main Menu (m)]", self.focus == Focus::MainMenu),
        ]
        .into_iter()
        .zip(buttons_area.rows().step_by(2))
        {
            line.render(row, buf);
        }

        for (msg, row) in self.warnings.iter().zip(warn_area.rows()) {
            Line::styled(msg.clone(), Style::new().add_modifier(Modifier::DIM)).render(row, buf);
        }

        match self.save {
            SaveState::Idle => (),
            SaveState::Minting(_) => overlay(" WRITING TO CHAIN ", "…", display, buf),
            SaveState::Confirmed(_) => overlay(" SUCCESS! ", "Score hash verified", display, buf),
        }
    }
}

/// Centered pop-up for the simulated confirmation sequence
fn overlay(title: &str, message: &str, display: Rect, buf: &mut Buffer) {
    let area = center_rect(
        display,
        Size {
            width: 30,
            height: 5,
        },
    );
    Clear.render(area, buf);
    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    block.render(area, buf);
    Line::from(message).centered().render(
        Rect {
            y: inner.y + 1,
            height: 1,
            ..inner
        },
        buf,
    );
}

/// Keyboard focus on the game-over screen
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum Focus {
    NameField,
    SaveButton,
    PlayAgain,
    MainMenu,
}

/// The nickname entry field: printable characters only, uppercased, at most
/// [`MAX_NAME_LENGTH`][consts::MAX_NAME_LENGTH] characters
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct NameInput {
    value: String,
}

impl NameInput {
    const WIDTH: u16 = 16;

    fn push(&mut self, c: char) {
        if self.value.graphemes(true).count() >= consts::MAX_NAME_LENGTH {
            return;
        }
        let keep = matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Letter
                | GeneralCategoryGroup::Number
                | GeneralCategoryGroup::Punctuation
                | GeneralCategoryGroup::Symbol
        ) || c == ' ';
        if keep {
            self.value.extend(c.to_uppercase());
        }
    }

    fn pop(&mut self) {
        if let Some((idx, _)) = self.value.grapheme_indices(true).last() {
            self.value.truncate(idx);
        }
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn render_field(&self, focused: bool, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title(" Nickname ").style(if focused {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        });
        let inner = block.inner(area);
        block.render(area, buf);
        let mut line = Line::from(self.value.clone());
        if focused {
            line.push_span(Span::styled("▏", Style::new().add_modifier(Modifier::SLOW_BLINK)));
        }
        line.render(inner, buf);
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SaveState {
    Idle,
    Minting(Instant),
    Confirmed(Instant),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::TxStatus;

    fn game_over(score: u32) -> GameOver {
        GameOver::new(Globals::test(), score, false, Vec::new())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn commentary_never_fails() {
        let over = game_over(12);
        assert!(!over.commentary.is_empty());
    }

    #[test]
    fn typing_uppercases_and_caps_the_name() {
        let mut input = NameInput::default();
        for c in "mousebane supreme".chars() {
            input.push(c);
        }
        assert_eq!(input.value(), "MOUSEBANE ");
        input.pop();
        assert_eq!(input.value(), "MOUSEBANE");
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut input = NameInput::default();
        input.push('\u{7}');
        input.push('\t');
        input.push('A');
        assert_eq!(input.value(), "A");
    }

    #[test]
    fn save_requires_a_name() {
        let mut over = game_over(5);
        assert!(over.handle_event(key(KeyCode::Enter)).is_none());
        assert_eq!(over.save, SaveState::Idle);
        for c in "ABC".chars() {
            assert!(over.handle_event(key(KeyCode::Char(c))).is_none());
        }
        assert!(over.handle_event(key(KeyCode::Enter)).is_none());
        assert!(matches!(over.save, SaveState::Minting(_)));
    }

    #[test]
    fn typed_r_goes_into_the_name_not_restart() {
        let mut over = game_over(5);
        assert!(over.handle_event(key(KeyCode::Char('r'))).is_none());
        assert_eq!(over.name.value(), "R");
    }

    #[test]
    fn restart_hotkey_works_once_focus_leaves_the_field() {
        let mut over = game_over(5);
        assert!(over.handle_event(key(KeyCode::Tab)).is_none());
        let next = over.handle_event(key(KeyCode::Char('r')));
        assert!(matches!(next, Some(Screen::Game(_))));
    }

    #[test]
    fn finish_save_records_everything() {
        let mut over = game_over(31);
        for c in "ACE".chars() {
            let _ = over.handle_event(key(KeyCode::Char(c)));
        }
        let screen = over.finish_save();
        assert!(matches!(screen, Screen::Board(_)));
        let Screen::Board(board) = screen else {
            unreachable!("just matched");
        };
        let globals = board.globals();
        let entries = globals.leaderboard.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "ACE");
        assert_eq!(entries[0].score, 31);
        assert!(entries[0].tx_hash.is_some());
        assert_eq!(globals.profile.txs.len(), 1);
        assert_eq!(globals.profile.txs[0].kind, TxKind::ScoreSync);
        assert_eq!(globals.profile.txs[0].status, TxStatus::Success);
        // and it round-trips through the store
        let reloaded = crate::leaderboard::Leaderboard::load(globals.store.as_ref())
            .expect("load should succeed");
        assert_eq!(reloaded, globals.leaderboard);
    }
}
