mod input;
mod render;

use std::{cell::RefCell, io, rc::Rc};

use geo_clicker::catalog::UPGRADES;
use geo_clicker::time::Scheduler;
use geo_clicker::{EngineConfig, Session, Timestamp};
use input::Command;
use log::{Level, LevelFilter, Log, Metadata, Record};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

#[cfg(target_arch = "wasm32")]
type Store = geo_clicker::save::LocalStorageStore;
#[cfg(not(target_arch = "wasm32"))]
type Store = geo_clicker::save::MemoryStore;

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let text = format!("[{}] {}", record.level(), record.args());
        match record.level() {
            Level::Error => web_sys::console::error_1(&text.into()),
            Level::Warn => web_sys::console::warn_1(&text.into()),
            _ => web_sys::console::log_1(&text.into()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn now_ms() -> Timestamp {
    js_sys::Date::now() as Timestamp
}

fn confirm_reset() -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message("Reset game and clear save?").ok())
        .unwrap_or(false)
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    init_logging();

    let config = EngineConfig::default();
    let now = now_ms();
    let scheduler = RefCell::new(Scheduler::new(&config));
    let session = Rc::new(RefCell::new(Session::open(
        Store::default(),
        SmallRng::seed_from_u64(now),
        config,
        now,
    )));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Keyboard handler
    terminal.on_key_event({
        let session = session.clone();
        move |key_event| {
            let Some(command) = input::command_for_key(&key_event.code) else {
                return;
            };
            // Ask before borrowing: the dialog blocks the JS thread.
            if command == Command::Reset && !confirm_reset() {
                return;
            }
            let now = now_ms();
            let mut s = session.borrow_mut();
            match command {
                Command::Action => {
                    s.record_action();
                }
                Command::Buy(idx) => {
                    if let Some(def) = UPGRADES.get(idx) {
                        if let Err(e) = s.purchase(def.id, now) {
                            log::error!("GeoClicker: {e}");
                        }
                    }
                }
                Command::Scenario => {
                    s.trigger_random(now, true);
                }
                Command::Save => s.save(now),
                Command::Reset => s.reset(now),
            }
        }
    });

    terminal.draw_web(move |f| {
        let now = now_ms();
        let due = scheduler.borrow_mut().poll(now as f64);
        let mut s = session.borrow_mut();
        if due.tick {
            s.tick(now);
        }
        for _ in 0..due.scenario_checks {
            s.scenario_check(now);
        }
        if due.autosave {
            s.autosave(now);
        }
        render::render(&*s, f, now);
    });

    Ok(())
}
