use crate::core::{Direction, GameEngine, GameError, MergeRule, Vec2};
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::time::Duration;

const CELL_WIDTH: usize = 7;
const CELL_HEIGHT: usize = 3;

/// Reads a board written as rows of whitespace separated values, `.` for empty.
pub fn parse_board(s: &str, merge_rule: MergeRule) -> Result<GameEngine, GameError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|cell| match cell {
                "." => Ok(0),
                _ => cell
                    .parse::<u32>()
                    .map_err(|_| GameError::InvalidCell(cell.to_string())),
            })
            .collect::<Result<Vec<u32>, GameError>>()?;
        rows.push(row);
    }
    GameEngine::from_values(&rows, merge_rule)
}

pub fn render_board_to_string(engine: &GameEngine) -> String {
    let mut result = String::new();
    for row in engine.values() {
        let cells: Vec<String> = row
            .iter()
            .map(|&v| if v == 0 { ".".to_string() } else { v.to_string() })
            .collect();
        result.push_str(&cells.join(" "));
        result.push('\n');
    }
    result
}

/// A tile value drawn at a fractional board position.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSprite {
    pub x: f32,
    pub y: f32,
    pub value: u32,
}

fn lerp(from: Vec2, to: Vec2, t: f32) -> (f32, f32) {
    let t = t.clamp(0.0, 1.0);
    (
        from.x as f32 + (to.x - from.x) as f32 * t,
        from.y as f32 + (to.y - from.y) as f32 * t,
    )
}

/// Positions of every visible tile `progress` of the way through the last move.
///
/// Merged tiles are drawn as their two halves until the slide is over, and
/// tiles spawned by the move only show up once it has finished.
pub fn layout_tiles(engine: &GameEngine, progress: f32) -> Vec<TileSprite> {
    let done = progress >= 1.0;
    let mut sprites = Vec::new();
    for tile in engine.iter_tiles() {
        if tile.is_empty() || (tile.is_fresh_spawn() && !done) {
            continue;
        }
        match tile.merged_from.as_slice() {
            [a, b] if !done => {
                for &source in [a, b] {
                    let (x, y) = lerp(source, tile.coord, progress);
                    sprites.push(TileSprite { x, y, value: tile.value / 2 });
                }
            }
            [source] => {
                let (x, y) = lerp(*source, tile.coord, progress);
                sprites.push(TileSprite { x, y, value: tile.value });
            }
            _ => sprites.push(TileSprite {
                x: tile.coord.x as f32,
                y: tile.coord.y as f32,
                value: tile.value,
            }),
        }
    }
    sprites
}

fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::DarkGray,
        2 => Color::White,
        4 => Color::LightYellow,
        8 => Color::LightRed,
        16 => Color::Red,
        32 => Color::LightMagenta,
        64 => Color::Magenta,
        128 => Color::LightCyan,
        256 => Color::Cyan,
        512 => Color::LightBlue,
        1024 => Color::LightGreen,
        _ => Color::Yellow,
    }
}

/// Draws sprites into a character canvas, one styled span per run of equal values.
fn render_sprites(width: i32, height: i32, sprites: &[TileSprite]) -> Vec<Line<'static>> {
    let cols = width as usize * CELL_WIDTH;
    let rows = height as usize * CELL_HEIGHT;
    let mut canvas: Vec<Vec<(char, u32)>> = vec![vec![(' ', 0); cols]; rows];

    for y in 0..height as usize {
        for x in 0..width as usize {
            canvas[y * CELL_HEIGHT + CELL_HEIGHT / 2][x * CELL_WIDTH + CELL_WIDTH / 2] = ('·', 0);
        }
    }

    for sprite in sprites {
        let left = (sprite.x * CELL_WIDTH as f32).round() as usize;
        let row = (sprite.y * CELL_HEIGHT as f32).round() as usize + CELL_HEIGHT / 2;
        let text = format!("{:^width$}", sprite.value, width = CELL_WIDTH);
        let Some(line) = canvas.get_mut(row) else {
            continue;
        };
        for (offset, ch) in text.chars().enumerate() {
            if let Some(cell) = line.get_mut(left + offset) {
                *cell = (ch, sprite.value);
            }
        }
    }

    canvas
        .into_iter()
        .map(|row| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_value = row.first().map_or(0, |c| c.1);
            for (ch, value) in row {
                if value != run_value && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_value));
                }
                run_value = value;
                run.push(ch);
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_value));
            }
            Line::from(spans)
        })
        .collect()
}

fn styled_run(text: String, value: u32) -> Span<'static> {
    let style = Style::default().fg(tile_color(value));
    if value >= 128 {
        Span::styled(text, style.add_modifier(Modifier::BOLD))
    } else {
        Span::styled(text, style)
    }
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

/// Runs `session`, then `restore` whether or not the session failed.
///
/// The session's error wins over a failure to restore.
pub fn run_then_restore<T, S, R>(session: S, restore: R) -> Result<T, Box<dyn std::error::Error>>
where
    S: FnOnce() -> Result<T, Box<dyn std::error::Error>>,
    R: FnOnce() -> Result<(), Box<dyn std::error::Error>>,
{
    let result = session();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = state.engine;
    let sprites = layout_tiles(engine, state.progress());
    let board = render_sprites(engine.width(), engine.height(), &sprites);

    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        let title = format!("2048 | Score: {}", engine.score());
        let board_paragraph = Paragraph::new(board)
            .block(Block::default().borders(Borders::ALL).title(title))
            .alignment(Alignment::Center);
        f.render_widget(board_paragraph, chunks[0]);

        let instructions = if state.game_over {
            "Game over! R to restart, Q to quit"
        } else if state.won {
            "You reached 2048! Keep going, R to restart, Q to quit"
        } else {
            "Controls: WASD or Arrow keys to move, R to restart, Q to quit"
        };

        let instructions = if let Some(delta) = state.last_delta {
            format!("{} | Last: +{}", instructions, delta)
        } else {
            instructions.to_string()
        };

        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[1]);
    })?;
    Ok(())
}

pub enum ConsoleInput {
    Move(Direction),
    Reset,
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input(timeout: Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(timeout)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::Reset,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::Move(Direction::Up)
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::Move(Direction::Down)
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::Move(Direction::Left)
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::Move(Direction::Right)
                }
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}
