//! The global leaderboard: capped, score-ordered, shared across identities.
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::store::{get_value, put_value, KvStore, LoadError, SaveError};
use crate::util::{format_date, get_display_area, short_address, short_hash, Globals};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Padding, Widget},
    Frame,
};
use serde::{Deserialize, Serialize};

/// Store key the leaderboard lives under
const LEADERBOARD_KEY: &str = "leaderboard";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Entry {
    pub(crate) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) address: Option<String>,
    pub(crate) score: u32,
    pub(crate) timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) tx_hash: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Leaderboard(Vec<Entry>);

impl Leaderboard {
    pub(crate) fn load(store: &dyn KvStore) -> Result<Leaderboard, LoadError> {
        Ok(get_value(store, LEADERBOARD_KEY)?.unwrap_or_default())
    }

    pub(crate) fn save(&self, store: &dyn KvStore) -> Result<(), SaveError> {
        put_value(store, LEADERBOARD_KEY, self)
    }

    /// Insert an entry, keeping the board sorted by score (descending) and
    /// capped.  An entry that doesn't make the cut simply falls off the end.
    pub(crate) fn insert(&mut self, entry: Entry) {
        self.0.push(entry);
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::MAX_LEADERBOARD_ENTRIES);
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.0
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The leaderboard screen
#[derive(Clone, Debug)]
pub(crate) struct BoardScreen {
    globals: Globals,
}

impl BoardScreen {
    const TABLE_WIDTH: u16 = 64;

    pub(crate) fn new(globals: Globals) -> BoardScreen {
        BoardScreen { globals }
    }

    #[cfg(test)]
    pub(crate) fn globals(&self) -> &Globals {
        &self.globals
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => Some(Screen::Quit),
            Command::Esc | Command::M | Command::Enter => Some(Screen::Main(
                crate::menu::MainMenu::new(self.globals.clone()),
            )),
            _ => None,
        }
    }
}

impl Widget for &BoardScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, board_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::from("HALL OF LEGENDS").centered().render(title_area, buf);

        let [board_area] = Layout::horizontal([BoardScreen::TABLE_WIDTH])
            .flex(Flex::Center)
            .areas(board_area);
        let block = Block::bordered()
            .title(" Top Hunters ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(board_area);
        block.render(board_area, buf);

        let board = &self.globals.leaderboard;
        if board.is_empty() {
            Line::from("No heroes yet...")
                .centered()
                .render(Rect { height: 1, ..inner }, buf);
        } else {
            for ((rank, entry), row) in board.entries().iter().enumerate().zip(inner.rows()) {
                entry_line(rank, entry).render(row, buf);
            }
        }

        Line::from_iter([
            Span::raw(" Back to Main Menu ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(footer_area, buf);
    }
}

fn entry_line(rank: usize, entry: &Entry) -> Line<'_> {
    let mut line = Line::default();
    line.push_span(format!("{:>2}. ", rank + 1));
    line.push_span(format!("{:<width$} ", entry.name, width = consts::MAX_NAME_LENGTH));
    line.push_span(Span::styled(
        format!("{:>5} ", entry.score),
        consts::SCORE_STYLE,
    ));
    line.push_span(format!(" {} ", format_date(entry.timestamp)));
    if let Some(addr) = &entry.address {
        line.push_span(Span::styled(
            format!(" {} ", short_address(addr)),
            consts::WALLET_STYLE,
        ));
    }
    if let Some(hash) = &entry.tx_hash {
        line.push_span(format!(" {}", short_hash(hash)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn entry(name: &str, score: u32) -> Entry {
        Entry {
            name: name.to_owned(),
            address: None,
            score,
            timestamp: 1_700_000_000,
            tx_hash: None,
        }
    }

    #[test]
    fn insert_keeps_descending_order() {
        let mut board = Leaderboard::default();
        for &score in &[10, 50, 30] {
            board.insert(entry("X", score));
        }
        let scores = board.entries().iter().map(|e| e.score).collect::<Vec<_>>();
        assert_eq!(scores, vec![50, 30, 10]);
    }

    #[test]
    fn eleventh_lowest_entry_is_dropped() {
        let mut board = Leaderboard::default();
        for score in 1..=10 {
            board.insert(entry("X", score * 10));
        }
        board.insert(entry("LOSER", 1));
        assert_eq!(board.entries().len(), consts::MAX_LEADERBOARD_ENTRIES);
        assert!(board.entries().iter().all(|e| e.name != "LOSER"));
        assert_eq!(board.entries().last().map(|e| e.score), Some(10));
    }

    #[test]
    fn eleventh_high_entry_bumps_the_lowest() {
        let mut board = Leaderboard::default();
        for score in 1..=10 {
            board.insert(entry("X", score * 10));
        }
        board.insert(entry("CHAMP", 999));
        assert_eq!(board.entries().len(), consts::MAX_LEADERBOARD_ENTRIES);
        assert_eq!(board.entries().first().map(|e| e.score), Some(999));
        assert_eq!(board.entries().last().map(|e| e.score), Some(20));
    }

    #[test]
    fn roundtrip() {
        let store = MemoryStore::new();
        let mut board = Leaderboard::default();
        board.insert(Entry {
            name: String::from("AAA"),
            address: Some(String::from("0xdeadbeefcafe1234")),
            score: 12,
            timestamp: 1_700_000_000,
            tx_hash: Some(format!("0x{}", "0".repeat(64))),
        });
        board.save(&store).expect("save should succeed");
        let loaded = Leaderboard::load(&store).expect("load should succeed");
        assert_eq!(loaded, board);
    }

    #[test]
    fn missing_board_is_empty() {
        let store = MemoryStore::new();
        let board = Leaderboard::load(&store).expect("load should succeed");
        assert!(board.is_empty());
    }
}
