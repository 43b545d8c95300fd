//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the (square, toroidal) hunting ground, in cells
pub(crate) const GRID_SIZE: u16 = 20;

/// Time between movements of the snake at the start of a run
pub(crate) const INITIAL_INTERVAL: Duration = Duration::from_millis(150);

/// How much the tick interval shrinks for every mouse caught
pub(crate) const INTERVAL_STEP: Duration = Duration::from_millis(1);

/// The tick interval never drops below this
pub(crate) const MIN_INTERVAL: Duration = Duration::from_millis(60);

/// Snake length at the start of a run
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// The snake never shrinks below this length, no matter how much poison it
/// swallows
pub(crate) const MIN_SNAKE_LENGTH: usize = 2;

/// Every this-many mice caught, a big mouse shows up as well
pub(crate) const BIG_MOUSE_CADENCE: u32 = 10;

/// Chance of a poison pellet appearing whenever a mouse is caught
pub(crate) const POISON_CHANCE: f64 = 0.15;

/// Minimum mouse-drag displacement (in terminal cells) for a drag to count as
/// a swipe
pub(crate) const SWIPE_THRESHOLD: u16 = 2;

/// Maximum number of characters in a leaderboard nickname
pub(crate) const MAX_NAME_LENGTH: usize = 10;

/// Maximum number of entries on the leaderboard
pub(crate) const MAX_LEADERBOARD_ENTRIES: usize = 10;

/// Maximum number of receipts kept in a profile's transaction log
pub(crate) const MAX_TX_LOG: usize = 5;

/// How long the fake "writing to chain" overlay lingers before reporting
/// success
pub(crate) const MINT_DELAY: Duration = Duration::from_millis(1500);

/// How long the fake success banner lingers before moving on
pub(crate) const CONFIRM_DELAY: Duration = Duration::from_millis(800);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '>';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '<';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for an ordinary mouse
pub(crate) const MOUSE_SYMBOL: char = '●';

/// Glyph for a big mouse
pub(crate) const BIG_MOUSE_SYMBOL: char = '▲';

/// Glyph for a poison pellet
pub(crate) const POISON_SYMBOL: char = '◆';

/// Glyph for the snake's head after a fatal collision
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Glyph for empty cells of the hunting ground
pub(crate) const GRID_DOT_SYMBOL: char = '·';

/// Style for an ordinary mouse
pub(crate) const MOUSE_STYLE: Style = Style::new().fg(Color::Rgb(0x94, 0xA3, 0xB8));

/// Style for a big mouse
pub(crate) const BIG_MOUSE_STYLE: Style = Style::new()
    .fg(Color::Rgb(0xF5, 0x9E, 0x0B))
    .add_modifier(Modifier::BOLD);

/// Style for a poison pellet
pub(crate) const POISON_STYLE: Style = Style::new().fg(Color::Rgb(0xEF, 0x44, 0x44));

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the grid dots between items
pub(crate) const GRID_DOT_STYLE: Style = Style::new().fg(Color::Rgb(0x1E, 0x29, 0x3B));

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the coin balance wherever it is shown
pub(crate) const COIN_STYLE: Style = Style::new().fg(Color::Rgb(0xFB, 0xBF, 0x24));

/// Style for a connected wallet address
pub(crate) const WALLET_STYLE: Style = Style::new().fg(Color::Rgb(0x00, 0x52, 0xFF));

/// Style for leaderboard scores
pub(crate) const SCORE_STYLE: Style = Style::new()
    .fg(Color::Rgb(0x22, 0xC5, 0x5E))
    .add_modifier(Modifier::BOLD);

/// Style for the "NEW RECORD" badge on the game-over screen
pub(crate) const RECORD_STYLE: Style = Style::new()
    .fg(Color::Rgb(0xF5, 0x9E, 0x0B))
    .add_modifier(Modifier::BOLD);

/// Fallback line shown when the commentary capability fails or is disabled
pub(crate) const DEFAULT_COMMENTARY: &str = "Excellent score!";
