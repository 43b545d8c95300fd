use crate::chain::Receipt;
use crate::consts;
use crate::util::{format_date, short_hash};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const RAT_WIDTH: u16 = 15;
    const HUNTER_WIDTH: u16 = 38;
    const SNAKE_BODY_LENGTH: u16 = 12;
    const SNAKE_MOUSE_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::RAT_WIDTH + Self::HUNTER_WIDTH;

    #[rustfmt::skip]
    const RAT: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____       _  ",
        r"|  _ \ __ _| |_",
         "| |_) / _` | __",
         "|  _ < (_| | |_",
        r"|_| \_\__,_|\__",
    ];

    #[rustfmt::skip]
    const HUNTER: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " _   _                 _              ",
         "| | | | _   _  _ __  | |_   ___  _ __ ",
        r"| |_| || | | || '_ \ | __| / _ \| '__|",
         "|  _  || |_| || | | || |_ |  __/| |   ",
        r"|_| |_| \__,_||_| |_| \__| \___||_|   ",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [rat_area, hunter_area] = Layout::horizontal([Self::RAT_WIDTH, Self::HUNTER_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::RAT)
            .style(consts::MOUSE_STYLE)
            .render(rat_area, buf);
        Text::from_iter(Self::HUNTER)
            .style(consts::SCORE_STYLE)
            .render(hunter_area, buf);
        let [body_area, head_area, _, mouse_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::SNAKE_MOUSE_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for p in body_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_BODY_SYMBOL);
                cell.set_style(consts::SCORE_STYLE);
            }
        }
        for p in head_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_HEAD_EAST_SYMBOL);
                cell.set_style(consts::SCORE_STYLE);
            }
        }
        for p in mouse_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::MOUSE_SYMBOL);
                cell.set_style(consts::MOUSE_STYLE);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 7;
    pub(super) const WIDTH: u16 = 22;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            Line::from_iter([
                Span::raw("       "),
                Span::styled("←", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↓", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↑", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("→", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("   or: "),
                Span::styled("h", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("j", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("k", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("l", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("   or: "),
                Span::styled("a", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("s", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("w", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("d", consts::KEY_STYLE),
            ]),
            Line::from("   or: mouse swipes"),
            Line::from("Catch mice & big mice,"),
            Line::from("dodge the poison!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

/// The recent-activity panel shown on the menu while a wallet is connected
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct TxPanel<'a> {
    txs: &'a [Receipt],
}

impl<'a> TxPanel<'a> {
    pub(super) const WIDTH: u16 = 44;
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = 2 + consts::MAX_TX_LOG as u16;

    pub(super) fn new(txs: &'a [Receipt]) -> TxPanel<'a> {
        TxPanel { txs }
    }
}

impl Widget for &TxPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Recent Activity ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        if self.txs.is_empty() {
            Line::from("No transactions yet. Start playing!")
                .centered()
                .render(Rect { height: 1, ..inner }, buf);
            return;
        }
        for (tx, row) in self.txs.iter().zip(inner.rows()) {
            Line::from_iter([
                Span::raw(format!("{:<10} ", tx.kind)),
                Span::styled(short_hash(&tx.hash), consts::WALLET_STYLE),
                Span::raw(format!("  {}  Confirmed", format_date(tx.timestamp))),
            ])
            .render(row, buf);
        }
    }
}
