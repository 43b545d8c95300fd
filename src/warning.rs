//! Pop-up for surfacing non-fatal problems (corrupt saved data, failed
//! writes) without leaving the menu.
use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
    scroll_offset: usize,
}

impl Warning {
    const MAX_LINES: u16 = 12;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Build a warning popup from one message per problem, wrapped to the
    /// popup width
    pub(crate) fn from_messages(msgs: Vec<String>) -> Warning {
        let mut lines = Vec::new();
        let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
            .break_words(true)
            .initial_indent("• ")
            .subsequent_indent("  ");
        for msg in &msgs {
            lines.extend(
                textwrap::wrap(msg, opts.clone())
                    .into_iter()
                    .map(Cow::into_owned),
            );
        }
        if lines.is_empty() {
            lines.push(String::from("You should never see this."));
        }
        Warning {
            lines,
            scroll_offset: 0,
        }
    }

    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<WarningOutcome> {
        match (cmd, self.scrolling()) {
            (Command::Enter | Command::Esc, _) => return Some(WarningOutcome::Dismissed),
            (Command::Quit, _) => return Some(WarningOutcome::Quit),
            (Command::Up, true) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
            }
            (Command::Down, true) => {
                let max = self.lines.len().saturating_sub(usize::from(Self::MAX_LINES));
                if self.scroll_offset < max {
                    self.scroll_offset += 1;
                }
            }
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    fn height(&self) -> u16 {
        u16::try_from(self.lines.len())
            .unwrap_or(Self::MAX_LINES)
            .min(Self::MAX_LINES)
            + 3
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl Widget for &Warning {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height: self.height(),
            },
        );
        Clear.render(popup_area, buf);
        let block = Block::bordered()
            .title(" Warning ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);
        let visible = self
            .lines
            .iter()
            .skip(self.scroll_offset)
            .take(usize::from(Warning::MAX_LINES))
            .map(|ln| Line::from(ln.as_str()));
        Text::from_iter(visible).render(
            Rect {
                height: inner.height.saturating_sub(1),
                ..inner
            },
            buf,
        );
        Line::from("Press Enter to dismiss").centered().render(
            Rect {
                y: inner.bottom().saturating_sub(1),
                height: 1,
                ..inner
            },
            buf,
        );
    }
}
