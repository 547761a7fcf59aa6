use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use top_down_scroller::assets::{Assets, ImageLoader, SpriteLoader};
use top_down_scroller::compute::{init_state, layout, update};
use top_down_scroller::constants::{BACKGROUND_IMAGE, PLAYER_IMAGE, WINDOW_TITLE};
use top_down_scroller::display::{self, Viewport};
use top_down_scroller::entities::{GameState, Input};
use top_down_scroller::error::GameError;

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

const LOG_FILE: &str = "scroller.log";

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events.
const HOLD_WINDOW: u64 = 4;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn current_input(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Input {
    Input {
        left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        fire: is_held(key_frame, &KeyCode::Char(' '), frame),
    }
}

fn viewport() -> std::io::Result<Viewport> {
    let (width, height) = terminal::size()?;
    let (width, height) = layout(width, height);
    Ok(Viewport::for_terminal(width, height))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits or an update fails.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, and each frame the keys still "fresh" are folded into
/// one `Input` snapshot.  Release events (keyboard-enhancement terminals)
/// remove keys immediately.
fn game_loop<W: Write, L: SpriteLoader>(
    out: &mut W,
    mut state: GameState,
    assets: &mut Assets<L>,
    rx: &mpsc::Receiver<Event>,
) -> Result<GameState, GameError> {
    let mut rng = thread_rng();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut view = viewport()?;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(state);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(state);
                            }
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(..) => {
                    view = viewport()?;
                }
                _ => {}
            }
        }

        let input = current_input(&key_frame, frame);
        state = update(&state, &input, assets, &mut rng)?;
        display::render(out, &state, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging() -> anyhow::Result<()> {
    // The terminal belongs to the game, so log lines go to a file.
    let file = File::create(LOG_FILE).with_context(|| format!("creating {}", LOG_FILE))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    // Startup sprites are required; fail before touching the terminal.
    let mut assets = Assets::new(ImageLoader::new("."));
    let background = assets
        .get(BACKGROUND_IMAGE)
        .context("loading background image")?;
    let player = assets.get(PLAYER_IMAGE).context("loading player sprite image")?;
    let state = init_state(player, background);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(WINDOW_TITLE))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, state, &mut assets, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(final_state) => {
            log::info!("exiting with score {}", final_state.score);
            Ok(())
        }
        Err(err) => {
            log::error!("game stopped: {}", err);
            Err(err).context("running game")
        }
    }
}
