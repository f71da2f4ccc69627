use std::time::Duration;

use crossterm::event::KeyEvent;

use crate::app::GazetteError;
use crate::converter::{DisplayText, TextConverter};
use crate::domain::Entry;
use crate::tui::event::{Action, AppEvent};
use crate::tui::layout;
use crate::tui::widgets::{EntryList, ListRow, Spinner, Viewport};

/// Top-level display state, derived from what the app currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Loading,
    Listing,
    Viewing,
    Failed,
}

/// Side effects requested by [`App::update`], run by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchList,
    FetchContent { url: String, generation: u64 },
    ScheduleTick(Duration),
    OpenInBrowser(String),
    Quit,
}

/// The entry the user drilled into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position of the entry in feed order.
    pub index: usize,
    pub url: String,
    pub generation: u64,
}

pub struct App {
    entries: Option<Vec<Entry>>,
    selection: Option<Selection>,
    /// Generation of the content fetch currently outstanding.
    in_flight: Option<u64>,
    display: Option<DisplayText>,
    failure: Option<GazetteError>,
    generation: u64,
    status: Option<String>,
    list: EntryList,
    viewport: Viewport,
    spinner: Spinner,
    converter: TextConverter,
}

impl App {
    pub fn new(list_title: impl Into<String>, converter: TextConverter, tick: Duration) -> Self {
        Self {
            entries: None,
            selection: None,
            in_flight: None,
            display: None,
            failure: None,
            generation: 0,
            status: None,
            list: EntryList::new(list_title),
            viewport: Viewport::default(),
            spinner: Spinner::new(tick),
            converter,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.failure.is_some() {
            Mode::Failed
        } else if self.entries.is_none() {
            Mode::Loading
        } else if self.display.is_some() {
            Mode::Viewing
        } else {
            Mode::Listing
        }
    }

    pub fn entries(&self) -> &[Entry] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        let index = self.selection.as_ref()?.index;
        self.entries().get(index)
    }

    pub fn display(&self) -> Option<&DisplayText> {
        self.display.as_ref()
    }

    pub fn failure(&self) -> Option<&GazetteError> {
        self.failure.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn list(&self) -> &EntryList {
        &self.list
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// Apply one event and return the commands it produced.
    pub fn update(&mut self, event: AppEvent) -> Vec<Command> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(_, height) => {
                self.resize(height);
                Vec::new()
            }
            // A failure is terminal: nothing but keys and resizes matters after it
            _ if self.failure.is_some() => Vec::new(),
            AppEvent::Start => self.start(),
            AppEvent::ListFetched(Ok(entries)) => {
                self.populate(entries);
                Vec::new()
            }
            AppEvent::ListFetched(Err(e)) => {
                self.fail(e);
                Vec::new()
            }
            AppEvent::ContentFetched { generation, result } => {
                self.content_fetched(generation, result);
                Vec::new()
            }
            AppEvent::Tick => self.tick(),
        }
    }

    fn start(&mut self) -> Vec<Command> {
        self.selection = None;
        self.in_flight = None;
        vec![Command::FetchList, self.spinner.start()]
    }

    fn populate(&mut self, entries: Vec<Entry>) {
        tracing::info!("Loaded {} entries", entries.len());
        self.list
            .set_rows(entries.iter().map(ListRow::from).collect());
        self.entries = Some(entries);
        self.selection = None;
        self.in_flight = None;
        self.display = None;
    }

    fn fail(&mut self, error: GazetteError) {
        if error.is_network() {
            tracing::error!("Network failure: {}", error);
        } else {
            tracing::error!("Fatal: {}", error);
        }
        self.in_flight = None;
        self.failure = Some(error);
    }

    fn resize(&mut self, height: u16) {
        self.list.set_size(layout::list_height(height));
        self.viewport.set_size(layout::viewport_height(height));
    }

    fn tick(&mut self) -> Vec<Command> {
        if self.mode() != Mode::Loading {
            return Vec::new();
        }
        self.spinner.update().into_iter().collect()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let action = Action::from(key);
        if action == Action::ForceQuit {
            return vec![Command::Quit];
        }

        match self.mode() {
            Mode::Failed | Mode::Loading => match action {
                Action::Quit => vec![Command::Quit],
                Action::Back if self.failure.is_some() => vec![Command::Quit],
                _ => Vec::new(),
            },
            Mode::Viewing => match action {
                Action::Quit | Action::Back => {
                    self.back_to_list();
                    Vec::new()
                }
                Action::OpenInBrowser => {
                    let url = self
                        .selection
                        .as_ref()
                        .map(|s| s.url.clone())
                        .unwrap_or_default();
                    self.open(url)
                }
                _ => self.viewport.update(key).into_iter().collect(),
            },
            Mode::Listing => {
                if self.list.is_filtering() {
                    return self.list.update(key).into_iter().collect();
                }
                self.status = None;
                match action {
                    Action::Quit => vec![Command::Quit],
                    Action::Select => self.select_highlighted(),
                    Action::Back if self.in_flight.is_some() => {
                        self.abandon_fetch();
                        Vec::new()
                    }
                    Action::OpenInBrowser => {
                        let url = self
                            .list
                            .selected_index()
                            .and_then(|i| self.entries().get(i))
                            .map(|e| e.url.trim().to_string())
                            .unwrap_or_default();
                        self.open(url)
                    }
                    _ => self.list.update(key).into_iter().collect(),
                }
            }
        }
    }

    fn select_highlighted(&mut self) -> Vec<Command> {
        if let Some(generation) = self.in_flight {
            tracing::debug!("Content fetch {} still in flight, ignoring select", generation);
            return Vec::new();
        }

        let Some(index) = self.list.selected_index() else {
            return Vec::new();
        };
        let Some(entry) = self.entries().get(index) else {
            return Vec::new();
        };
        let has_link = entry.has_link();
        let url = entry.url.trim().to_string();
        let title = entry.display_title().to_string();
        let body = entry.text.clone();

        self.generation += 1;
        self.selection = Some(Selection {
            index,
            url: url.clone(),
            generation: self.generation,
        });

        if !has_link {
            tracing::debug!("Entry {} has no link, showing its own text", index);
            let converted = self.converter.convert_self_post(&title, &body);
            self.show(converted);
            return Vec::new();
        }

        tracing::debug!("Fetching content for entry {} from {}", index, url);
        self.in_flight = Some(self.generation);
        vec![Command::FetchContent {
            url,
            generation: self.generation,
        }]
    }

    fn content_fetched(&mut self, generation: u64, result: crate::app::Result<Vec<u8>>) {
        if self.in_flight != Some(generation) {
            tracing::debug!("Dropping stale content from fetch {}", generation);
            return;
        }
        self.in_flight = None;

        match result {
            Ok(bytes) => {
                let converted = self.converter.convert(&bytes);
                self.show(converted);
            }
            Err(e) => self.fail(e),
        }
    }

    fn show(&mut self, converted: crate::app::Result<DisplayText>) {
        match converted {
            Ok(text) => {
                self.viewport.set_content_height(text.len());
                self.viewport.goto_top();
                self.display = Some(text);
            }
            Err(e) => self.fail(e),
        }
    }

    fn back_to_list(&mut self) {
        if let Some(selection) = self.selection.take() {
            self.list.select(selection.index);
        }
        self.display = None;
        self.in_flight = None;
        self.viewport.set_content_height(0);
        self.viewport.goto_top();
    }

    fn abandon_fetch(&mut self) {
        if let Some(generation) = self.in_flight.take() {
            tracing::debug!("Abandoning content fetch {}", generation);
        }
        self.selection = None;
        self.status = Some("Fetch cancelled".to_string());
    }

    fn open(&mut self, url: String) -> Vec<Command> {
        if url.is_empty() {
            self.status = Some("This entry has no link to open".to_string());
            return Vec::new();
        }
        self.status = Some(format!("Opening {}", url));
        vec![Command::OpenInBrowser(url)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColorConfig;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    const WIDTH: u16 = 80;
    const HEIGHT: u16 = 24;
    const PAGE: &[u8] = b"<html><body><h1>Story</h1><p>Some readable text.</p></body></html>";

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn entry(id: u64, title: &str, url: &str) -> Entry {
        Entry {
            id,
            title: title.to_string(),
            score: id * 10,
            url: url.to_string(),
            by: "pg".to_string(),
            kind: "story".to_string(),
            ..Default::default()
        }
    }

    fn sample_entries() -> Vec<Entry> {
        vec![
            entry(1, "First", "https://one.example/a"),
            entry(2, "Second", "https://two.example/b"),
            entry(3, "Third", ""),
        ]
    }

    fn new_app() -> App {
        let mut app = App::new(
            "Top Stories",
            TextConverter::new(60),
            Duration::from_millis(100),
        );
        app.update(AppEvent::Resize(WIDTH, HEIGHT));
        app
    }

    fn listing_app() -> App {
        let mut app = new_app();
        app.update(AppEvent::Start);
        app.update(AppEvent::ListFetched(Ok(sample_entries())));
        app
    }

    fn viewing_app() -> App {
        let mut app = listing_app();
        let commands = app.update(key(KeyCode::Enter));
        let Some(Command::FetchContent { generation, .. }) = commands.first().cloned() else {
            panic!("expected a content fetch, got {:?}", commands);
        };
        app.update(AppEvent::ContentFetched {
            generation,
            result: Ok(PAGE.to_vec()),
        });
        app
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal
            .draw(|frame| layout::render(frame, app, &ColorConfig::default()))
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen_text(buffer: &Buffer) -> String {
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_start_emits_list_fetch_and_tick() {
        let mut app = new_app();
        assert_eq!(app.mode(), Mode::Loading);

        let commands = app.update(AppEvent::Start);
        assert_eq!(
            commands,
            vec![
                Command::FetchList,
                Command::ScheduleTick(Duration::from_millis(100))
            ]
        );
        assert_eq!(app.mode(), Mode::Loading);
    }

    #[test]
    fn test_list_fetch_populates_rows_in_order() {
        let app = listing_app();
        assert_eq!(app.mode(), Mode::Listing);
        let titles: Vec<&str> = app.list().rows().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert!(app.selection().is_none());
    }

    #[test]
    fn test_empty_list_is_listing() {
        let mut app = new_app();
        app.update(AppEvent::ListFetched(Ok(Vec::new())));
        assert_eq!(app.mode(), Mode::Listing);
        assert!(screen_text(&draw(&app)).contains("No items."));
    }

    #[test]
    fn test_list_fetch_timeout_fails() {
        let mut app = new_app();
        app.update(AppEvent::Start);
        app.update(AppEvent::ListFetched(Err(GazetteError::Timeout(
            "http://feed.test/index.json".to_string(),
        ))));

        assert_eq!(app.mode(), Mode::Failed);
        assert!(app.list().is_empty());
        let screen = screen_text(&draw(&app));
        assert!(screen.contains("timed out"));
        assert!(!screen.contains("Top Stories"));
    }

    #[test]
    fn test_navigation_keeps_mode_and_selection() {
        let mut app = listing_app();
        let keys = [
            KeyCode::Down,
            KeyCode::Char('j'),
            KeyCode::Up,
            KeyCode::Char('k'),
            KeyCode::PageDown,
            KeyCode::PageUp,
            KeyCode::Char('G'),
            KeyCode::Char('g'),
            KeyCode::End,
            KeyCode::Home,
        ];
        for code in keys {
            let commands = app.update(key(code));
            assert!(commands.is_empty());
            assert_eq!(app.mode(), Mode::Listing);
            assert!(app.selection().is_none());
        }
    }

    #[test]
    fn test_select_then_content_shows_viewing() {
        let mut app = listing_app();
        app.update(key(KeyCode::Down));

        let commands = app.update(key(KeyCode::Enter));
        assert_eq!(
            commands,
            vec![Command::FetchContent {
                url: "https://two.example/b".to_string(),
                generation: 1,
            }]
        );
        assert_eq!(app.mode(), Mode::Listing);
        assert!(app.is_fetching());

        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Ok(PAGE.to_vec()),
        });

        assert_eq!(app.mode(), Mode::Viewing);
        assert_eq!(app.display(), Some(&TextConverter::new(60).convert(PAGE).unwrap()));
        assert_eq!(app.viewport().offset(), 0);
        assert_eq!(app.selected_entry().map(|e| e.id), Some(2));
    }

    #[test]
    fn test_second_select_while_fetching_is_ignored() {
        let mut app = listing_app();
        assert_eq!(app.update(key(KeyCode::Enter)).len(), 1);
        app.update(key(KeyCode::Down));
        assert!(app.update(key(KeyCode::Enter)).is_empty());
        assert_eq!(app.selection().map(|s| s.index), Some(0));
    }

    #[test]
    fn test_viewport_starts_at_top_for_each_selection() {
        let long_page = format!(
            "<html><body>{}</body></html>",
            (0..200).map(|i| format!("<p>line {}</p>", i)).collect::<String>()
        );
        let mut app = listing_app();
        app.update(key(KeyCode::Enter));
        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Ok(long_page.clone().into_bytes()),
        });
        app.update(key(KeyCode::PageDown));
        assert!(app.viewport().offset() > 0);

        app.update(key(KeyCode::Char('q')));
        app.update(key(KeyCode::Enter));
        app.update(AppEvent::ContentFetched {
            generation: 2,
            result: Ok(long_page.into_bytes()),
        });
        assert_eq!(app.mode(), Mode::Viewing);
        assert_eq!(app.viewport().offset(), 0);
    }

    #[test]
    fn test_quit_from_viewing_returns_to_list() {
        let mut app = listing_app();
        app.update(key(KeyCode::Down));
        let commands = app.update(key(KeyCode::Enter));
        assert_eq!(commands.len(), 1);
        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Ok(PAGE.to_vec()),
        });
        assert_eq!(app.mode(), Mode::Viewing);

        let commands = app.update(key(KeyCode::Char('q')));
        assert!(commands.is_empty());
        assert_eq!(app.mode(), Mode::Listing);
        assert!(app.selection().is_none());
        assert!(app.display().is_none());
        assert_eq!(app.list().selected_index(), Some(1));
    }

    #[test]
    fn test_escape_from_viewing_returns_to_list() {
        let mut app = viewing_app();
        app.update(key(KeyCode::Esc));
        assert_eq!(app.mode(), Mode::Listing);
    }

    #[test]
    fn test_quit_from_listing_exits() {
        let mut app = listing_app();
        assert_eq!(app.update(key(KeyCode::Char('q'))), vec![Command::Quit]);
    }

    #[test]
    fn test_quit_while_filtering_is_absorbed() {
        let mut app = listing_app();
        app.update(key(KeyCode::Char('/')));
        let commands = app.update(key(KeyCode::Char('q')));
        assert!(commands.is_empty());
        assert_eq!(app.mode(), Mode::Listing);
        assert_eq!(app.list().filter_value(), "q");
    }

    #[test]
    fn test_enter_while_filtering_applies_filter() {
        let mut app = listing_app();
        app.update(key(KeyCode::Char('/')));
        app.update(key(KeyCode::Char('s')));
        app.update(key(KeyCode::Char('e')));
        assert!(app.update(key(KeyCode::Enter)).is_empty());
        assert!(app.selection().is_none());

        let commands = app.update(key(KeyCode::Enter));
        assert_eq!(
            commands,
            vec![Command::FetchContent {
                url: "https://two.example/b".to_string(),
                generation: 1,
            }]
        );
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let mut app = viewing_app();
        assert_eq!(app.update(ctrl_c), vec![Command::Quit]);
    }

    #[test]
    fn test_stale_content_after_abandon_is_ignored() {
        let mut app = listing_app();
        app.update(key(KeyCode::Enter));
        app.update(key(KeyCode::Esc));
        assert!(!app.is_fetching());
        assert!(app.selection().is_none());
        assert_eq!(app.status(), Some("Fetch cancelled"));

        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Ok(PAGE.to_vec()),
        });
        assert_eq!(app.mode(), Mode::Listing);
        assert!(app.display().is_none());
    }

    #[test]
    fn test_content_from_older_generation_is_ignored() {
        let mut app = listing_app();
        app.update(key(KeyCode::Enter));
        app.update(key(KeyCode::Esc));
        app.update(key(KeyCode::Down));
        app.update(key(KeyCode::Enter));

        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Err(GazetteError::Timeout("https://one.example/a".to_string())),
        });
        assert_eq!(app.mode(), Mode::Listing);
        assert!(app.is_fetching());

        app.update(AppEvent::ContentFetched {
            generation: 2,
            result: Ok(PAGE.to_vec()),
        });
        assert_eq!(app.mode(), Mode::Viewing);
        assert_eq!(app.selected_entry().map(|e| e.id), Some(2));
    }

    #[test]
    fn test_entry_without_url_is_shown_without_fetch() {
        let mut app = listing_app();
        app.update(key(KeyCode::End));
        let commands = app.update(key(KeyCode::Enter));
        assert!(commands.is_empty());
        assert_eq!(app.mode(), Mode::Viewing);
        assert!(screen_text(&draw(&app)).contains("no external link"));
    }

    #[test]
    fn test_content_fetch_failure_fails() {
        let mut app = listing_app();
        app.update(key(KeyCode::Enter));
        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Err(GazetteError::EmptyResponse("https://one.example/a".to_string())),
        });
        assert_eq!(app.mode(), Mode::Failed);
        assert!(screen_text(&draw(&app)).contains("Empty response"));
    }

    #[test]
    fn test_conversion_failure_fails() {
        let mut app = listing_app();
        app.update(key(KeyCode::Enter));
        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Ok(vec![0xff, 0xfe, 0xfd]),
        });
        assert_eq!(app.mode(), Mode::Failed);
        assert!(matches!(app.failure(), Some(GazetteError::Conversion(_))));
    }

    #[test]
    fn test_failed_accepts_only_exit() {
        let mut app = listing_app();
        app.update(key(KeyCode::Enter));
        app.update(AppEvent::ContentFetched {
            generation: 1,
            result: Err(GazetteError::MissingUrl),
        });

        assert!(app.update(key(KeyCode::Down)).is_empty());
        assert!(app.update(key(KeyCode::Enter)).is_empty());
        app.update(AppEvent::ListFetched(Ok(sample_entries())));
        assert_eq!(app.mode(), Mode::Failed);
        assert_eq!(app.update(key(KeyCode::Char('q'))), vec![Command::Quit]);
    }

    #[test]
    fn test_tick_reschedules_only_while_loading() {
        let mut app = new_app();
        app.update(AppEvent::Start);
        let before = app.spinner().frame();
        assert_eq!(
            app.update(AppEvent::Tick),
            vec![Command::ScheduleTick(Duration::from_millis(100))]
        );
        assert_ne!(app.spinner().frame(), before);

        app.update(AppEvent::ListFetched(Ok(sample_entries())));
        assert!(app.update(AppEvent::Tick).is_empty());
    }

    #[test]
    fn test_open_in_browser() {
        let mut app = listing_app();
        assert_eq!(
            app.update(key(KeyCode::Char('o'))),
            vec![Command::OpenInBrowser("https://one.example/a".to_string())]
        );

        app.update(key(KeyCode::End));
        assert!(app.update(key(KeyCode::Char('o'))).is_empty());
        assert_eq!(app.status(), Some("This entry has no link to open"));
    }

    #[test]
    fn test_resize_keeps_mode() {
        let mut app = viewing_app();
        app.update(AppEvent::Resize(100, 40));
        assert_eq!(app.mode(), Mode::Viewing);
        assert_eq!(app.viewport().height(), layout::viewport_height(40) as usize);
    }

    #[test]
    fn test_render_is_idempotent() {
        let loading = {
            let mut app = new_app();
            app.update(AppEvent::Start);
            app
        };
        for app in [loading, listing_app(), viewing_app()] {
            assert_eq!(draw(&app), draw(&app));
        }
    }

    #[test]
    fn test_render_per_mode() {
        let mut app = new_app();
        app.update(AppEvent::Start);
        assert!(screen_text(&draw(&app)).contains("Fetching stories..."));

        app.update(AppEvent::ListFetched(Ok(sample_entries())));
        let listing = screen_text(&draw(&app));
        assert!(listing.contains("Top Stories"));
        assert!(listing.contains("First"));
        assert!(listing.contains("Second"));

        let viewing = screen_text(&draw(&viewing_app()));
        assert!(viewing.contains("Story"));
        assert!(viewing.contains("100%"));
        assert!(viewing.contains("Press q to return to list"));
    }
}
