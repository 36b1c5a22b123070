//! Grid Snake entry point
//!
//! Terminal frontend: feeds frame timestamps and key presses into a
//! `GameSession`, draws its snapshot, and records finished runs.

use std::error::Error;
use std::io::{Stdout, Write, stdout};
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use grid_snake::consts::GRID_SIZE;
use grid_snake::leaderboard::{Leaderboard, LeaderboardEntry};
use grid_snake::sim::{GameEvent, GameSession, Orientation, Piece, SessionStatus, Snapshot};
use grid_snake::{Settings, format_elapsed};

/// Pause between frame callbacks (~60 Hz)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const DEFAULT_SETTINGS_PATH: &str = "grid-snake.json";

/// Raw-mode alternate screen, restored on drop
struct Screen {
    stdout: Stdout,
}

impl Screen {
    fn enter() -> std::io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        terminal::enable_raw_mode()?;
        Ok(Self { stdout })
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
    }
}

enum Command {
    Steer(Orientation),
    StartOrRestart,
    TogglePause,
    Quit,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let settings_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
    let settings = Settings::load(&settings_path);
    let board_path = settings_path.with_extension("leaderboard.json");
    let mut leaderboard = Leaderboard::load(&board_path);

    let seed = settings.seed.unwrap_or_else(now_unix_ms);
    log::info!("Grid Snake starting with seed {}", seed);

    let mut screen = Screen::enter()?;
    run(&mut screen, &settings, seed, &mut leaderboard, &board_path)
}

fn run(
    screen: &mut Screen,
    settings: &Settings,
    seed: u64,
    leaderboard: &mut Leaderboard,
    board_path: &Path,
) -> Result<(), Box<dyn Error>> {
    let mut session = GameSession::new(seed, settings.effective_tick_rate())?;
    let mut next_seed = seed;
    let epoch = Instant::now();

    loop {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match command_for(&key) {
                Some(Command::Steer(o)) => {
                    session.steer(o);
                }
                Some(Command::StartOrRestart) => match session.status() {
                    SessionStatus::Idle => {
                        session.start();
                    }
                    SessionStatus::Ended => {
                        next_seed = next_seed.wrapping_add(1);
                        session.reset(next_seed)?;
                        session.start();
                    }
                    _ => {}
                },
                Some(Command::TogglePause) => {
                    if !session.pause() {
                        session.resume();
                    }
                }
                Some(Command::Quit) => {
                    session.end();
                    handle_events(&mut session, settings, leaderboard, board_path, screen)?;
                    return Ok(());
                }
                None => {}
            }
        }

        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        session.frame(now_ms)?;
        handle_events(&mut session, settings, leaderboard, board_path, screen)?;
        draw(screen, &session.snapshot(), session.elapsed_secs(), leaderboard)?;

        sleep(FRAME_INTERVAL);
    }
}

fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') => Some(Command::Steer(Orientation::Up)),
        KeyCode::Down | KeyCode::Char('s') => Some(Command::Steer(Orientation::Down)),
        KeyCode::Left | KeyCode::Char('a') => Some(Command::Steer(Orientation::Left)),
        KeyCode::Right | KeyCode::Char('d') => Some(Command::Steer(Orientation::Right)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::StartOrRestart),
        KeyCode::Esc | KeyCode::Char('p') => Some(Command::TogglePause),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

fn handle_events(
    session: &mut GameSession,
    settings: &Settings,
    leaderboard: &mut Leaderboard,
    board_path: &Path,
    screen: &mut Screen,
) -> Result<(), Box<dyn Error>> {
    for event in session.drain_events() {
        match event {
            GameEvent::FruitEaten { .. } if settings.sound_on => {
                // Terminal bell stands in for the eat sound
                queue!(screen.stdout, Print('\u{7}'))?;
            }
            // Quitting or a full board is not a lost game
            GameEvent::Ended { cause, score, .. } if cause.is_game_over() => {
                let entry = LeaderboardEntry {
                    username: settings.username.clone(),
                    score,
                    elapsed_secs: session.elapsed_secs(),
                    timestamp: now_unix_ms() as f64,
                };
                if let Some(rank) = leaderboard.record(entry) {
                    log::info!("New leaderboard rank {} with score {}", rank, score);
                    leaderboard.save(board_path)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

fn draw(
    screen: &mut Screen,
    snap: &Snapshot,
    elapsed_secs: u64,
    leaderboard: &Leaderboard,
) -> std::io::Result<()> {
    let out = &mut screen.stdout;
    queue!(out, terminal::Clear(ClearType::All))?;

    // Each cell is two columns wide so the board looks square
    let width = GRID_SIZE as u16 * 2;
    let height = GRID_SIZE as u16;
    let border = format!("+{}+", "-".repeat(width as usize));
    queue!(out, cursor::MoveTo(0, 0), Print(&border))?;
    for row in 1..=height {
        queue!(out, cursor::MoveTo(0, row), Print('|'))?;
        queue!(out, cursor::MoveTo(width + 1, row), Print('|'))?;
    }
    queue!(out, cursor::MoveTo(0, height + 1), Print(&border))?;

    let fruit = snap.fruit.position;
    let fruit_glyph = snap.fruit.kind.name().chars().next().unwrap_or('*');
    queue!(
        out,
        cursor::MoveTo(1 + fruit.x as u16 * 2, 1 + fruit.y as u16),
        SetForegroundColor(Color::Red),
        Print(fruit_glyph),
        ResetColor
    )?;

    // Draw tail first so the head wins on shared cells
    for (pos, piece) in snap.snake.iter().rev() {
        queue!(
            out,
            cursor::MoveTo(1 + pos.x as u16 * 2, 1 + pos.y as u16),
            SetForegroundColor(Color::Green),
            Print(glyph(*piece)),
            ResetColor
        )?;
    }

    let hud = format!("Score: {}  Time: {}", snap.score, format_elapsed(elapsed_secs));
    queue!(out, cursor::MoveTo(0, height + 2), Print(hud))?;

    let prompt = match snap.status {
        SessionStatus::Idle => "Enter to start, arrows/WASD to steer, q to quit".to_string(),
        SessionStatus::Running => "Esc to pause".to_string(),
        SessionStatus::Paused => "Paused - Esc to resume".to_string(),
        SessionStatus::Ended => match leaderboard.top_score() {
            Some(best) => format!("Game over! Best: {}  Enter to play again", best),
            None => "Game over! Enter to play again".to_string(),
        },
    };
    queue!(out, cursor::MoveTo(0, height + 3), Print(prompt))?;

    out.flush()
}

fn glyph(piece: Piece) -> char {
    use Orientation::*;
    match piece {
        Piece::Head(Up) => '^',
        Piece::Head(Down) => 'v',
        Piece::Head(Left) => '<',
        Piece::Head(Right) => '>',
        Piece::Body(Up | Down) => '║',
        Piece::Body(Left | Right) => '═',
        // Joins the side the body came in from with the side it leaves by
        Piece::Corner(out, entered) => match (out, entered.opposite()) {
            (Up, Right) | (Right, Up) => '╚',
            (Up, Left) | (Left, Up) => '╝',
            (Down, Right) | (Right, Down) => '╔',
            (Down, Left) | (Left, Down) => '╗',
            _ => '╬',
        },
        Piece::Tail(_) => '•',
    }
}

fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
