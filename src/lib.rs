// terminal engine for the LinkOS desktop
// compiled to wasm and driven by an xterm.js instance on the page
pub mod animation;
pub mod api;
pub mod command;
pub mod commands;
pub mod completion;
pub mod config;
pub mod editor;
pub mod error;
pub mod events;
pub mod games;
pub mod history;
pub mod logging;
pub mod path;
pub mod render;
pub mod session;
pub mod storage;
pub mod terminal;
pub mod theme;
pub mod vfs;

pub use config::TerminalConfig;
pub use terminal::{Step, Task, Terminal};

/// write the snapshot for a terminal that just finished a command
pub fn persist(terminal: &Terminal) {
    let config = &terminal.session().config;
    if !config.persist_session {
        return;
    }
    let id = terminal.session().short_id();
    match storage::save(&config.storage_key, &terminal.session().snapshot()) {
        Ok(()) => log::debug!("session {}: saved to {}", id, config.storage_key),
        Err(e) => log::warn!("session {}: could not save: {}", id, e),
    }
}

/// stored snapshot for this config, `None` when absent or unreadable
pub fn restore_snapshot(config: &TerminalConfig) -> Option<storage::SessionSnapshot> {
    if !config.persist_session {
        return None;
    }
    match storage::load(&config.storage_key) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            log::warn!("ignoring stored session: {}", e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebTerminal;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;

    // xterm on the page, everything printed goes through `writer`
    // keys come in through handle_input
    #[wasm_bindgen(js_name = Terminal)]
    pub struct WebTerminal {
        inner: Rc<RefCell<Terminal>>,
        writer: js_sys::Function,
    }

    #[wasm_bindgen(js_class = Terminal)]
    impl WebTerminal {
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: &str, writer: js_sys::Function) -> WebTerminal {
            // early logger so config warnings show up, then the configured level
            logging::init(log::LevelFilter::Info);
            let config = TerminalConfig::from_json(config_json);
            logging::init(config.log_level());
            WebTerminal {
                inner: Rc::new(RefCell::new(Terminal::new(config))),
                writer,
            }
        }

        /// load the filesystem, bring back the stored session and print the banner.
        /// resolves to false when the filesystem could not be loaded
        pub async fn init(&self) -> bool {
            let config = self.inner.borrow().session().config.clone();
            let fs = match api::fetch_text(&config.filesystem_url).await {
                Ok(raw) => vfs::load_document(&raw),
                Err(e) => Err(e),
            };
            let loaded = fs.is_ok();
            let step = self.inner.borrow_mut().start(fs, restore_snapshot(&config));
            apply(&self.inner, &self.writer, step);
            loaded
        }

        /// raw data from xterm's onData. returns whether the terminal is busy
        pub fn handle_input(&self, data: &str) -> bool {
            let step = self.inner.borrow_mut().handle_input(data);
            apply(&self.inner, &self.writer, step);
            self.is_busy()
        }

        /// run a line for the page (e.g. a dock shortcut). ignored while busy
        pub fn run_command(&self, line: &str) -> bool {
            if self.is_busy() {
                return false;
            }
            write(&self.writer, &format!("{}\r\n", line));
            let step = self.inner.borrow_mut().submit_line(line);
            apply(&self.inner, &self.writer, step);
            true
        }

        pub fn is_busy(&self) -> bool {
            self.inner.borrow().is_busy()
        }

        pub fn prompt(&self) -> String {
            self.inner.borrow().session().prompt()
        }

        pub fn current_directory(&self) -> String {
            self.inner.borrow().session().path.render()
        }

        /// the page resized the terminal
        pub fn set_columns(&self, columns: usize) {
            self.inner.borrow_mut().session_mut().config.columns = columns.max(1);
        }

        pub fn get_command_list(&self) -> JsValue {
            let catalog = self.inner.borrow().session().catalog().to_vec();
            serde_wasm_bindgen::to_value(&catalog).unwrap_or(JsValue::NULL)
        }

        pub fn get_history(&self) -> JsValue {
            let history = self.inner.borrow().session().history.entries().to_vec();
            serde_wasm_bindgen::to_value(&history).unwrap_or(JsValue::NULL)
        }
    }

    fn write(writer: &js_sys::Function, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Err(e) = writer.call1(&JsValue::NULL, &JsValue::from_str(text)) {
            log::error!("writer failed: {:?}", e);
        }
    }

    // print, fire effects, save, then hand async work to the event loop
    fn apply(inner: &Rc<RefCell<Terminal>>, writer: &js_sys::Function, step: Step) {
        write(writer, &step.output);
        for effect in &step.effects {
            events::emit(effect);
        }
        if step.finished {
            persist(&inner.borrow());
        }

        let Some(task) = step.task else {
            return;
        };
        let inner = inner.clone();
        let writer = writer.clone();
        match task {
            Task::Wait(fut) => spawn_local(async move {
                let result = fut.await;
                let step = inner.borrow_mut().complete_deferred(result);
                apply(&inner, &writer, step);
            }),
            Task::Animate(typewriter) => {
                let delay = inner.borrow().session().config.animation_delay_ms;
                spawn_local(async move {
                    let completed =
                        animation::play(typewriter, || animation::tick(delay), |chunk| write(&writer, chunk)).await;
                    let step = inner.borrow_mut().finish_animation(completed);
                    apply(&inner, &writer, step);
                })
            }
            Task::Clock { program } => spawn_local(async move {
                loop {
                    let Some(delay) = inner.borrow().tick_interval(program) else {
                        break;
                    };
                    animation::tick(delay).await;
                    let Some(step) = inner.borrow_mut().program_tick(program) else {
                        break;
                    };
                    apply(&inner, &writer, step);
                }
            }),
        }
    }
}
