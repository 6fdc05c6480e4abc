mod audio;
mod config;
mod flow;
mod input;
mod menu;
mod minis;
mod registry;
mod render;
mod sequence;
mod time;

use std::{cell::RefCell, io, rc::Rc};

use audio::WebAudioBank;
use config::Config;
use flow::Arcade;
use input::{pixel_to_nearest_cell, pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent, Key};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

/// `performance.now()`, the clock every phase is measured against.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
///
/// With `clamp`, points outside the grid land on its nearest edge cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState, clamp: bool) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let (x, y) = (mouse_x as f64 - rect.left(), mouse_y as f64 - rect.top());
    if clamp {
        return pixel_to_nearest_cell(x, y, rect.width(), rect.height(), cs.terminal_cols, cs.terminal_rows);
    }
    let col = pixel_x_to_col(x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

/// Read the JSON config embedded in the page, falling back to defaults.
fn load_config() -> Config {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("flux-config"))
        .and_then(|el| el.text_content());
    let Some(text) = text else {
        log::info!("no #flux-config element, using defaults");
        return Config::default();
    };
    match Config::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using defaults", e);
            Config::default()
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Esc => Key::Esc,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    })
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    let config = load_config();
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64 ^ js_sys::Date::now() as u64);
    let arcade = Arcade::new(&config, WebAudioBank::load(), seed, now_ms())
        .map_err(|e| io::Error::other(e.to_string()))?;

    let arcade = Rc::new(RefCell::new(arcade));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch handler: presses, releases and hover all go to the arcade.
    terminal.on_mouse_event({
        let arcade = arcade.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            let pressed_or_released = matches!(
                mouse_event.event,
                MouseEventKind::Pressed | MouseEventKind::Released
            );
            if pressed_or_released && mouse_event.button != MouseButton::Left {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            // A release outside the grid still ends whatever the press started.
            let released = matches!(mouse_event.event, MouseEventKind::Released);
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs, released) else {
                return;
            };

            let event = match mouse_event.event {
                MouseEventKind::Pressed => InputEvent::PointerDown { col, row },
                MouseEventKind::Released => InputEvent::PointerUp { col, row },
                MouseEventKind::Moved => InputEvent::PointerMove { col, row },
                _ => return,
            };
            arcade.borrow_mut().handle_input(event, &cs, now_ms());
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let arcade = arcade.clone();
        let click_state = click_state.clone();
        move |key_event| {
            let Some(key) = map_key(key_event.code) else {
                return;
            };
            let cs = click_state.borrow();
            arcade
                .borrow_mut()
                .handle_input(InputEvent::Key(key), &cs, now_ms());
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let now = now_ms();
            let mut arcade = arcade.borrow_mut();
            arcade.tick(now);
            render::draw(f, &*arcade, &mut click_state.borrow_mut(), now);
        }
    });

    Ok(())
}
