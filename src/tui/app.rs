use crate::client::SearchClient;
use crate::config::SearchConfig;
use crate::controller::SearchController;
use crate::tui::grid::{GridState, GridViewport};
use crate::tui::search::SearchInput;
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Card rows moved per mouse wheel notch
const WHEEL_ROWS: isize = 1;

pub struct App {
    pub controller: SearchController,

    // Sub-states
    pub search: SearchInput,
    pub grid: GridState,
    /// Grid geometry from the last frame
    pub viewport: GridViewport,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(config: SearchConfig, client: Arc<dyn SearchClient>) -> Self {
        let search = SearchInput::new(config.initial_query.clone());
        let mut controller = SearchController::new(config, client);
        controller.start();

        Self {
            controller,
            search,
            grid: GridState::default(),
            viewport: GridViewport::default(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            // Wake up early for a due debounce deadline
            let mut timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if let Some(deadline) = self.controller.next_wakeup() {
                timeout = timeout.min(deadline.saturating_duration_since(Instant::now()));
            }

            if event::poll(timeout).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(Event::Mouse(mouse)) => match mouse.kind {
                        MouseEventKind::ScrollDown => self.scroll(WHEEL_ROWS),
                        MouseEventKind::ScrollUp => self.scroll(-WHEEL_ROWS),
                        _ => {}
                    },
                    _ => {}
                }
            }

            self.process_updates(Instant::now());
            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    /// Apply settled queries and finished fetches, then check the last card
    pub fn process_updates(&mut self, now: Instant) {
        self.controller.tick(now);
        if self.controller.session().items().is_empty() {
            self.grid.reset();
        }
        if self.controller.observe(&self.viewport) {
            debug!("last card in view, loading next page");
        }
    }

    fn scroll(&mut self, rows: isize) {
        let total = self.controller.session().items().len();
        self.grid.scroll_by(rows, total);
    }

    fn query_edited(&mut self) {
        self.controller.input(self.search.query.clone(), Instant::now());
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q')
                if key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && self.search.clear() {
                    self.query_edited();
                } else if self.search.focused {
                    self.search.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::F(5) => {
                self.controller.reload();
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_grid_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.query_edited();
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.query_edited();
                }
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.query_edited();
                }
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(),
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.search.focused = false;
                let total = self.controller.session().items().len();
                if self.grid.selected.is_none() {
                    self.grid.select_first(total);
                }
            }
            _ => {}
        }
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        let total = self.controller.session().items().len();
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => self.grid.select_next(total),
            KeyCode::Left | KeyCode::Char('h') => self.grid.select_prev(total),
            KeyCode::Down | KeyCode::Char('j') => self.grid.select_down(total),
            KeyCode::Up | KeyCode::Char('k') => {
                if self.grid.selected.is_some_and(|i| i < self.grid.columns) {
                    self.search.focused = true;
                } else {
                    self.grid.select_up(total);
                }
            }
            KeyCode::PageDown => self.grid.page_down(total),
            KeyCode::PageUp => self.grid.page_up(total),
            KeyCode::Home => self.grid.select_first(total),
            KeyCode::End => self.grid.select_last(total),
            KeyCode::Tab | KeyCode::Char('/') => self.search.focused = true,
            KeyCode::Char(c) => {
                // Typing anywhere goes to the search box
                self.search.focused = true;
                self.search.end();
                self.search.insert(c);
                self.query_edited();
            }
            _ => {}
        }
    }
}
