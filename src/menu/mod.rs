mod widgets;
use self::widgets::{Instructions, Logo, TxPanel};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::leaderboard::BoardScreen;
use crate::shop::Shop;
use crate::util::{get_display_area, EnumExt, Globals};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};

#[derive(Clone, Debug)]
pub(crate) struct MainMenu {
    globals: Globals,
    selection: Selection,
    warning: Option<Warning>,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> MainMenu {
        MainMenu::with_warnings(globals, Vec::new())
    }

    /// A menu that opens with a warning popup describing non-fatal problems
    /// (corrupt saved state, failed writes)
    pub(crate) fn with_warnings(globals: Globals, msgs: Vec<String>) -> MainMenu {
        let warning = (!msgs.is_empty()).then(|| Warning::from_messages(msgs));
        MainMenu {
            globals,
            selection: Selection::default(),
            warning,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(warning) = &mut self.warning {
            match warning.handle_command(cmd)? {
                WarningOutcome::Dismissed => self.warning = None,
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        match (self.selection, cmd) {
            (_, Command::Quit | Command::Q) => return Some(Screen::Quit),
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (_, Command::P) => return Some(self.play()),
            (_, Command::C) => self.toggle_wallet(),
            (_, Command::Up) => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            (_, Command::Down) => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            (_, Command::Prev) => {
                self.selection = self.selection.prev().unwrap_or_else(Selection::max);
            }
            (_, Command::Next) => {
                self.selection = self.selection.next().unwrap_or_else(Selection::min);
            }
            (Selection::Play, Command::Enter) => return Some(self.play()),
            (Selection::Shop, Command::Enter) => {
                return Some(Screen::Shop(Shop::new(self.globals.clone())))
            }
            (Selection::Board, Command::Enter) => {
                return Some(Screen::Board(BoardScreen::new(self.globals.clone())))
            }
            (Selection::Wallet, Command::Enter | Command::Space) => self.toggle_wallet(),
            (Selection::Quit, Command::Enter) => return Some(Screen::Quit),
            _ => (),
        }
        None
    }

    fn play(&self) -> Screen {
        Screen::Game(Game::new(self.globals.clone()))
    }

    /// Connect or disconnect the wallet; either way the profile namespace
    /// changes, so the profile is reloaded
    fn toggle_wallet(&mut self) {
        if self.globals.session.connected() {
            self.globals.session.disconnect();
        } else {
            self.globals.session.connect(rand::rng());
        }
        let warnings = self.globals.reload_profile();
        if !warnings.is_empty() {
            self.warning = Some(Warning::from_messages(warnings));
        }
    }

    #[cfg(test)]
    pub(crate) fn globals(&self) -> &Globals {
        &self.globals
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, status_area, middle_area, items_area] = Layout::vertical([
            Logo::HEIGHT,
            1,
            Instructions::HEIGHT.max(TxPanel::HEIGHT),
            Selection::LENGTH_U16,
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let mut status = Line::default();
        status.push_span(Span::styled(
            format!("Coins: {}", self.globals.profile.coins),
            consts::COIN_STYLE,
        ));
        status.push_span("  ·  ");
        match self.globals.session.display() {
            Some(addr) => status.push_span(Span::styled(addr, consts::WALLET_STYLE)),
            None => status.push_span("no wallet connected"),
        }
        status.centered().render(status_area, buf);

        // Newcomers see the how-to-play card; connected hunters see their
        // recent activity instead
        if self.globals.session.connected() {
            let [panel_area] = Layout::horizontal([TxPanel::WIDTH])
                .flex(Flex::Center)
                .areas(middle_area);
            let panel = TxPanel::new(&self.globals.profile.txs);
            (&panel).render(panel_area, buf);
        } else {
            let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
                .flex(Flex::Center)
                .areas(middle_area);
            Instructions.render(instructions_area, buf);
        }

        for (sel, row) in Selection::iter().zip(items_area.rows()) {
            self.item_line(sel).centered().render(row, buf);
        }

        if let Some(warning) = &self.warning {
            warning.render(display, buf);
        }
    }
}

impl MainMenu {
    fn item_line(&self, sel: Selection) -> Line<'_> {
        let style = if self.selection == sel {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        let key_style = consts::KEY_STYLE.patch(style);
        let mut line = Line::default();
        match sel {
            Selection::Play => {
                line.push_span(Span::styled("[Play (", style));
                line.push_span(Span::styled("p", key_style));
                line.push_span(Span::styled(")]", style));
            }
            Selection::Shop => line.push_span(Span::styled("[Skins Shop]", style)),
            Selection::Board => line.push_span(Span::styled("[Leaderboard]", style)),
            Selection::Wallet => {
                let label = if self.globals.session.connected() {
                    "[Disconnect Wallet ("
                } else {
                    "[Connect Wallet ("
                };
                line.push_span(Span::styled(label, style));
                line.push_span(Span::styled("c", key_style));
                line.push_span(Span::styled(")]", style));
            }
            Selection::Quit => {
                line.push_span(Span::styled("[Quit (", style));
                line.push_span(Span::styled("q", key_style));
                line.push_span(Span::styled(")]", style));
            }
        }
        line
    }
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Selection {
    #[default]
    Play,
    Shop,
    Board,
    Wallet,
    Quit,
}

impl Selection {
    #[allow(clippy::cast_possible_truncation)]
    const LENGTH_U16: u16 = Self::LENGTH as u16;
}
