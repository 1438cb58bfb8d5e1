mod console_log;

use std::{cell::RefCell, io, rc::Rc};

use log::{info, warn, LevelFilter};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use mansion_crawler::input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use mansion_crawler::mansion::{ConfirmRestart, GameSession, MansionGame, SessionConfig};

/// Optional `<script id="mansion-config" type="application/json">` in the host page.
const CONFIG_ELEMENT_ID: &str = "mansion-config";

/// Restart confirmation through `window.confirm`.
struct BrowserConfirm;

impl ConfirmRestart for BrowserConfirm {
    fn confirm_restart(&mut self, message: &str) -> bool {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
}

fn load_config() -> SessionConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content());
    let Some(text) = text else {
        return SessionConfig::default();
    };
    match SessionConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
            SessionConfig::default()
        }
    }
}

/// Query the grid container's bounding rect and convert pixel coordinates to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let config = load_config();
    let level = if config.reveal_items {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if console_log::init(level).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }

    let host_seed = js_sys::Date::now() as u64;
    info!(
        "session config: max_searchable_areas={}, seed={:?}",
        config.max_searchable_areas,
        config.seed.unwrap_or(host_seed)
    );
    let session = GameSession::new(config, host_seed);
    let game = Rc::new(RefCell::new(MansionGame::new(session, Box::new(BrowserConfirm))));
    let click_state = Rc::new(RefCell::new(ClickState::new()));

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let hit = {
                let cs = click_state.borrow();
                if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                    return;
                }
                dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                    .and_then(|(col, row)| cs.hit_test(col, row))
            };

            if let Some(id) = hit {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let ch = match key_event.code {
                KeyCode::Char(c) => c,
                KeyCode::Enter => '\n',
                KeyCode::Up => 'w',
                KeyCode::Left => 'a',
                KeyCode::Down => 's',
                KeyCode::Right => 'd',
                _ => return,
            };
            game.borrow_mut().handle_input(&InputEvent::Key(ch));
        }
    });

    terminal.draw_web(move |f| {
        let game = game.borrow();
        let size = f.area();

        {
            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
        }

        game.render(f, size, &click_state);
    });

    Ok(())
}
