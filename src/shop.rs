//! The skins shop: browse the catalog, buy with coins, pick what to wear.
use crate::app::Screen;
use crate::chain::TxKind;
use crate::command::Command;
use crate::consts;
use crate::skins::{Skin, SkinId};
use crate::util::{error_chain, get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Padding, Widget},
    Frame,
};

#[derive(Clone, Debug)]
pub(crate) struct Shop {
    globals: Globals,
    selection: SkinId,
    /// One-line feedback from the last action ("not enough coins", a failed
    /// save, ...)
    notice: Option<String>,
}

impl Shop {
    const TABLE_WIDTH: u16 = 58;

    pub(crate) fn new(globals: Globals) -> Shop {
        let selection = globals.profile.active;
        Shop {
            globals,
            selection,
            notice: None,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::Esc | Command::M => {
                return Some(Screen::Main(crate::menu::MainMenu::new(
                    self.globals.clone(),
                )))
            }
            Command::Up | Command::Prev => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                    self.notice = None;
                }
            }
            Command::Down | Command::Next => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                    self.notice = None;
                }
            }
            Command::Home => self.selection = SkinId::min(),
            Command::End => self.selection = SkinId::max(),
            Command::Enter | Command::Space => self.activate(),
            _ => (),
        }
        None
    }

    fn activate(&mut self) {
        let id = self.selection;
        if self.globals.profile.owned[id] {
            self.wear(id);
        } else {
            self.purchase(id);
        }
    }

    fn wear(&mut self, id: SkinId) {
        if self.globals.profile.active == id {
            self.notice = Some(String::from("Already equipped."));
            return;
        }
        self.globals.profile.active = id;
        let ns = self.globals.session.namespace().to_owned();
        if let Err(e) = self.globals.profile.save_skins(self.globals.store.as_ref(), &ns) {
            self.notice = Some(error_chain(&e));
        } else {
            self.notice = Some(format!("{} equipped!", id.skin().name));
        }
    }

    fn purchase(&mut self, id: SkinId) {
        let price = id.skin().price;
        if self.globals.profile.coins < price {
            self.notice = Some(String::from("Not enough coins. Go catch some mice!"));
            return;
        }
        let receipt = self.globals.ledger.borrow_mut().submit(TxKind::Purchase);
        self.globals.profile.coins -= price;
        self.globals.profile.owned[id] = true;
        let ns = self.globals.session.namespace().to_owned();
        let mut errors = Vec::new();
        if let Err(e) = self.globals.profile.save_coins(self.globals.store.as_ref(), &ns) {
            errors.push(error_chain(&e));
        }
        if let Err(e) = self.globals.profile.save_skins(self.globals.store.as_ref(), &ns) {
            errors.push(error_chain(&e));
        }
        if let Err(e) = self
            .globals
            .profile
            .record_tx(self.globals.store.as_ref(), &ns, receipt)
        {
            errors.push(error_chain(&e));
        }
        self.notice = if errors.is_empty() {
            Some(format!("{} is yours!", id.skin().name))
        } else {
            Some(errors.join("; "))
        };
    }

    #[cfg(test)]
    pub(crate) fn globals(&self) -> &Globals {
        &self.globals
    }
}

impl Widget for &Shop {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, table_area, blurb_area, notice_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(Shop::skin_rows()),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(display);

        let mut title = Line::default();
        title.push_span("SKINS SHOP  ·  ");
        title.push_span(Span::styled(
            format!("Coins: {}", self.globals.profile.coins),
            consts::COIN_STYLE,
        ));
        title.centered().render(title_area, buf);

        let [table_area] = Layout::horizontal([Shop::TABLE_WIDTH])
            .flex(Flex::Center)
            .areas(table_area);
        let block = Block::bordered().padding(Padding::horizontal(1));
        let inner = block.inner(table_area);
        block.render(table_area, buf);
        for (id, row) in SkinId::iter().zip(inner.rows()) {
            self.skin_line(id.skin()).render(row, buf);
        }

        Line::from(self.selection.skin().blurb)
            .centered()
            .render(blurb_area, buf);
        if let Some(notice) = &self.notice {
            Line::styled(notice.clone(), consts::KEY_STYLE)
                .centered()
                .render(notice_area, buf);
        }

        Line::from_iter([
            Span::raw(" Buy/Wear ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(") — Back to Main Menu ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(footer_area, buf);
    }
}

impl Shop {
    #[allow(clippy::cast_possible_truncation)]
    const fn skin_rows() -> u16 {
        SkinId::LENGTH as u16 + 2
    }

    fn skin_line(&self, skin: &Skin) -> Line<'_> {
        let selected = self.selection == skin.id;
        let style = if selected {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        let mut line = Line::default();
        line.push_span(Span::styled(if selected { "» " } else { "  " }, style));
        line.push_span(Span::styled("██", Style::new().fg(skin.body_color)));
        line.push_span(Span::styled(format!(" {:<11}", skin.name), style));
        if self.globals.profile.active == skin.id {
            line.push_span(Span::styled("ACTIVE  ", consts::SCORE_STYLE));
        } else if self.globals.profile.owned[skin.id] {
            line.push_span(Span::styled("owned   ", style));
        } else {
            line.push_span(Span::styled(
                format!("{:>4} ¢  ", skin.price),
                consts::COIN_STYLE.patch(style),
            ));
        }
        let tag_style = Style::new().add_modifier(Modifier::DIM).patch(style);
        if !skin.stats.score_mod.is_one() {
            line.push_span(Span::styled(
                format!("x{} PTS ", skin.stats.score_mod),
                tag_style,
            ));
        }
        match skin.stats.speed_mod.cmp(&0) {
            std::cmp::Ordering::Greater => line.push_span(Span::styled("FAST ", tag_style)),
            std::cmp::Ordering::Less => line.push_span(Span::styled("SLOW ", tag_style)),
            std::cmp::Ordering::Equal => (),
        }
        if !skin.stats.poison_resist.is_one() {
            line.push_span(Span::styled("RESIST ", tag_style));
        }
        if !skin.stats.growth_mod.is_one() {
            line.push_span(Span::styled("LESS GROWTH", tag_style));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::TxKind;
    use crate::profile::Profile;
    use crossterm::event::KeyCode;

    fn shop_with_coins(coins: u32) -> Shop {
        let mut globals = Globals::test();
        globals.profile.coins = coins;
        Shop::new(globals)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn purchase_deducts_coins_and_records_a_tx() {
        let mut shop = shop_with_coins(100);
        let _ = shop.handle_event(key(KeyCode::Down)); // Neon, 50 coins
        let _ = shop.handle_event(key(KeyCode::Enter));
        let globals = shop.globals();
        assert_eq!(globals.profile.coins, 50);
        assert!(globals.profile.owned[SkinId::Neon]);
        // not auto-equipped; buying and wearing are separate acts
        assert_eq!(globals.profile.active, SkinId::Classic);
        assert_eq!(globals.profile.txs.len(), 1);
        assert_eq!(globals.profile.txs[0].kind, TxKind::Purchase);
        // and everything survived a trip through the store
        let (reloaded, errors) = Profile::load(globals.store.as_ref(), "guest");
        assert!(errors.is_empty());
        assert_eq!(reloaded.coins, 50);
        assert!(reloaded.owned[SkinId::Neon]);
    }

    #[test]
    fn cannot_afford_means_no_mutation() {
        let mut shop = shop_with_coins(10);
        let _ = shop.handle_event(key(KeyCode::Down));
        let _ = shop.handle_event(key(KeyCode::Enter));
        let globals = shop.globals();
        assert_eq!(globals.profile.coins, 10);
        assert!(!globals.profile.owned[SkinId::Neon]);
        assert!(globals.profile.txs.is_empty());
        assert!(shop.notice.as_deref().is_some_and(|n| n.contains("coins")));
    }

    #[test]
    fn wearing_an_owned_skin_persists_the_choice() {
        let mut shop = shop_with_coins(100);
        let _ = shop.handle_event(key(KeyCode::Down));
        let _ = shop.handle_event(key(KeyCode::Enter)); // buy
        let _ = shop.handle_event(key(KeyCode::Enter)); // wear
        let globals = shop.globals();
        assert_eq!(globals.profile.active, SkinId::Neon);
        let (reloaded, _) = Profile::load(globals.store.as_ref(), "guest");
        assert_eq!(reloaded.active, SkinId::Neon);
    }

    #[test]
    fn escape_returns_to_the_menu() {
        let mut shop = shop_with_coins(0);
        assert!(matches!(
            shop.handle_event(key(KeyCode::Esc)),
            Some(Screen::Main(_))
        ));
    }
}
