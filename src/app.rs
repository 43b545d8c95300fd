use crate::game::Game;
use crate::gameover::GameOver;
use crate::leaderboard::BoardScreen;
use crate::menu::MainMenu;
use crate::shop::Shop;
use crate::util::Globals;
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals, warnings: Vec<String>) -> App {
        App {
            screen: Screen::Main(MainMenu::with_warnings(globals, warnings)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Game(ref game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::GameOver(ref over) => {
                terminal.draw(|frame| over.draw(frame))?;
            }
            Screen::Board(ref board) => {
                terminal.draw(|frame| board.draw(frame))?;
            }
            Screen::Shop(ref shop) => {
                terminal.draw(|frame| shop.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::GameOver(ref mut over) => over.process_input()?,
            Screen::Board(ref mut board) => board.process_input()?,
            Screen::Shop(ref mut shop) => shop.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    GameOver(GameOver),
    Board(BoardScreen),
    Shop(Shop),
    Quit,
}
