use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use tracing::warn;

use sentence_sift::{
    EditSession, SessionError, UnicodeSegmenter,
    cli::CliArgs,
    config::Config,
    input::TextInput,
    logging,
    render::{self, Highlights},
    theme::Theme,
};

const STATUS_TIMEOUT: Duration = Duration::from_secs(4);
const EDIT_BOX_HEIGHT: u16 = 7;
const MOUSE_SCROLL_LINES: isize = 3;

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let config = args.merge_into(Config::load(args.config.as_deref()));
    logging::init(config.log_file.as_deref())?;

    let mut app = App::new(config, Theme::default());
    if let Some(path) = &args.path {
        app.open(path);
    }
    if let Some(query) = &args.terms {
        app.search.set_text(query.clone());
        app.run_filter();
    }

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;
    terminal.clear().ok();

    let res = run_app(&mut terminal, &mut app).context("application error");

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();
    let mut needs_redraw = true;

    while !app.should_quit() {
        if needs_redraw {
            terminal
                .draw(|frame| app.draw(frame))
                .context("failed to draw frame")?;
            needs_redraw = false;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("event poll failed")? {
            let evt = event::read().context("failed to read event")?;
            app.handle_event(evt);
            needs_redraw = true;
        }

        if last_tick.elapsed() >= tick_rate {
            let had_message_before = app.has_status_message();
            app.on_tick();
            last_tick = Instant::now();
            if had_message_before && !app.has_status_message() {
                needs_redraw = true;
            }
        }
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Focus {
    Search,
    List,
    Edit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Search => Focus::List,
            Focus::List => Focus::Edit,
            Focus::Edit => Focus::Search,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Search => Focus::Edit,
            Focus::List => Focus::Search,
            Focus::Edit => Focus::List,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PromptKind {
    Open,
    SaveAs,
    GoTo,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::Open => "Open file",
            PromptKind::SaveAs => "Save as",
            PromptKind::GoTo => "Go to match",
        }
    }
}

struct PathPrompt {
    kind: PromptKind,
    input: TextInput,
}

struct StatusMessage {
    text: String,
    shown_at: Instant,
    is_error: bool,
}

struct App {
    session: EditSession,
    config: Config,
    theme: Theme,
    file_path: Option<PathBuf>,
    focus: Focus,
    search: TextInput,
    edit: TextInput,
    prompt: Option<PathPrompt>,
    list_state: ListState,
    list_area: Rect,
    document_area: Rect,
    scroll_top: usize,
    last_view_height: usize,
    last_focus_line: Option<usize>,
    should_quit: bool,
    quit_armed: bool,
    status_message: Option<StatusMessage>,
}

impl App {
    fn new(config: Config, theme: Theme) -> Self {
        let segmenter = UnicodeSegmenter::new(config.language.clone());
        Self {
            session: EditSession::new(Box::new(segmenter)),
            config,
            theme,
            file_path: None,
            focus: Focus::Search,
            search: TextInput::new(),
            edit: TextInput::new(),
            prompt: None,
            list_state: ListState::default(),
            list_area: Rect::default(),
            document_area: Rect::default(),
            scroll_top: 0,
            last_view_height: 1,
            last_focus_line: None,
            should_quit: false,
            quit_armed: false,
            status_message: None,
        }
    }

    fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn has_status_message(&self) -> bool {
        self.status_message.is_some()
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            shown_at: Instant::now(),
            is_error: false,
        });
    }

    fn report_error(&mut self, action: &str, err: &SessionError) {
        warn!(action, error = %err, "operation failed");
        self.status_message = Some(StatusMessage {
            text: format!("Could not {action}: {err}"),
            shown_at: Instant::now(),
            is_error: true,
        });
    }

    fn open(&mut self, path: &Path) {
        match self.session.load(path) {
            Ok(()) => {
                self.file_path = Some(path.to_path_buf());
                self.scroll_top = 0;
                self.last_focus_line = None;
                self.sync_selection();
                self.set_status(format!("Loaded {}", path.display()));
            }
            Err(err) => self.report_error("load file", &err),
        }
    }

    fn save(&mut self) {
        match self.file_path.clone() {
            Some(path) => self.save_to(&path),
            None => self.open_prompt(PromptKind::SaveAs),
        }
    }

    fn save_to(&mut self, path: &Path) {
        match self.session.save(path) {
            Ok(()) => {
                self.file_path = Some(path.to_path_buf());
                self.set_status("Saved");
            }
            Err(err) => self.report_error("save file", &err),
        }
    }

    fn run_filter(&mut self) {
        match self.session.find_matches(self.search.text()) {
            Ok(count) => {
                self.sync_selection();
                if self.session.terms().is_empty() {
                    self.set_status("Search cleared");
                } else {
                    self.set_status(format!("{count} matching sentences"));
                    if count > 0 {
                        self.focus = Focus::List;
                    }
                }
            }
            Err(err) => self.report_error("find matches", &err),
        }
    }

    fn select_next(&mut self) {
        if self.session.next() {
            self.sync_selection();
        }
    }

    fn select_previous(&mut self) {
        if self.session.previous() {
            self.sync_selection();
        }
    }

    fn select_index(&mut self, index: usize) {
        if self.session.select_index(index) {
            self.sync_selection();
        }
    }

    fn commit_edit(&mut self) {
        let new_text = self.edit.text().to_string();
        match self.session.replace(&new_text) {
            Ok(Some(outcome)) => {
                self.sync_selection();
                if outcome.still_matches {
                    self.set_status("Replaced");
                } else {
                    self.set_status("Replaced; sentence no longer matches and left the list");
                }
            }
            Ok(None) => self.set_status("No sentence selected"),
            Err(err) => self.report_error("replace sentence", &err),
        }
    }

    /// Loads the current sentence into the edit box and lines the list up
    /// with the session cursor.
    fn sync_selection(&mut self) {
        self.list_state.select(self.session.cursor());
        match self.session.current() {
            Some(current) => self.edit.set_text(current.text.clone()),
            None => self.edit.clear(),
        }
    }

    fn request_quit(&mut self) {
        if self.session.is_dirty() && !self.quit_armed {
            self.quit_armed = true;
            self.set_status("Unsaved changes. Press Ctrl-Q again to quit");
            return;
        }
        self.should_quit = true;
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        let initial = match (kind, &self.file_path) {
            (PromptKind::SaveAs, Some(path)) => path.display().to_string(),
            _ => String::new(),
        };
        self.prompt = Some(PathPrompt {
            kind,
            input: TextInput::with_text(initial),
        });
    }

    fn submit_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let raw = prompt.input.text().trim();
        if raw.is_empty() {
            return;
        }
        match prompt.kind {
            PromptKind::Open => self.open(Path::new(raw)),
            PromptKind::SaveAs => self.save_to(Path::new(raw)),
            PromptKind::GoTo => self.go_to_match(raw),
        }
    }

    /// Selects the match with the 1-based number shown in the list.
    fn go_to_match(&mut self, raw: &str) {
        let count = self.session.matches().len();
        match raw.parse::<usize>() {
            Ok(number) if (1..=count).contains(&number) => {
                self.select_index(number - 1);
                self.focus = Focus::List;
            }
            _ => self.set_status(format!("No match {raw} (1-{count})")),
        }
    }

    fn on_tick(&mut self) {
        self.prune_status_message();
    }

    fn prune_status_message(&mut self) {
        if let Some(message) = &self.status_message
            && message.shown_at.elapsed() > STATUS_TIMEOUT
        {
            self.status_message = None;
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        self.scroll_top = self.scroll_top.saturating_add_signed(delta);
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => self.handle_key(code, modifiers),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, event: MouseEvent) {
        if self.prompt.is_some() {
            return;
        }
        let over_list = contains(self.list_area, event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = list_row_to_index(
                    self.list_area,
                    self.list_state.offset(),
                    event.column,
                    event.row,
                ) {
                    self.focus = Focus::List;
                    self.select_index(index);
                }
            }
            MouseEventKind::ScrollUp if over_list => self.select_previous(),
            MouseEventKind::ScrollDown if over_list => self.select_next(),
            MouseEventKind::ScrollUp if contains(self.document_area, event.column, event.row) => {
                self.scroll_by(-MOUSE_SCROLL_LINES);
            }
            MouseEventKind::ScrollDown
                if contains(self.document_area, event.column, event.row) =>
            {
                self.scroll_by(MOUSE_SCROLL_LINES);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.prompt.is_some() {
            self.handle_prompt_key(code, modifiers);
            return;
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let quit_key = ctrl && matches!(code, KeyCode::Char('q') | KeyCode::Char('c'));
        if !quit_key {
            self.quit_armed = false;
        }

        match (code, ctrl) {
            (KeyCode::Char('q') | KeyCode::Char('c'), true) => self.request_quit(),
            (KeyCode::Char('s'), true) => self.save(),
            (KeyCode::Char('w'), true) => self.open_prompt(PromptKind::SaveAs),
            (KeyCode::Char('o'), true) => self.open_prompt(PromptKind::Open),
            (KeyCode::Char('g'), true) => self.open_prompt(PromptKind::GoTo),
            (KeyCode::Char('f'), true) => self.focus = Focus::Search,
            (KeyCode::Char('n'), true) => self.select_next(),
            (KeyCode::Char('p'), true) => self.select_previous(),
            (KeyCode::Char('r'), true) => self.commit_edit(),
            (KeyCode::Tab, _) => self.focus = self.focus.next(),
            (KeyCode::BackTab, _) => self.focus = self.focus.previous(),
            _ => match self.focus {
                Focus::Search => self.handle_search_key(code, modifiers),
                Focus::List => self.handle_list_key(code),
                Focus::Edit => self.handle_edit_key(code, modifiers),
            },
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Enter => self.submit_prompt(),
            _ => {
                if let Some(prompt) = self.prompt.as_mut() {
                    edit_text_input(&mut prompt.input, code, modifiers);
                }
            }
        }
    }

    fn handle_search_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Enter => self.run_filter(),
            KeyCode::Down => self.focus = Focus::List,
            _ => {
                edit_text_input(&mut self.search, code, modifiers);
            }
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) {
        let page = self.last_view_height.max(1) as isize;
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Home | KeyCode::Char('g') => self.select_index(0),
            KeyCode::End | KeyCode::Char('G') => {
                let last = self.session.matches().len().saturating_sub(1);
                self.select_index(last);
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if self.session.current().is_some() {
                    self.focus = Focus::Edit;
                }
            }
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::PageDown => self.scroll_by(page),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match (code, modifiers) {
            (KeyCode::Enter, m)
                if m.contains(KeyModifiers::SHIFT) || m.contains(KeyModifiers::ALT) =>
            {
                self.edit.insert_char('\n');
            }
            (KeyCode::Char('j'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.edit.insert_char('\n');
            }
            (KeyCode::Enter, _) => self.commit_edit(),
            (KeyCode::Esc, _) => {
                self.sync_selection();
                self.focus = Focus::List;
            }
            _ => {
                edit_text_input(&mut self.edit, code, modifiers);
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 4 || area.width < 10 {
            return;
        }

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(EDIT_BOX_HEIGHT),
                Constraint::Length(1),
            ])
            .split(area);
        let search_area = vertical[0];
        let body_area = vertical[1];
        let edit_area = vertical[2];
        let status_area = vertical[3];

        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Min(10)])
            .split(body_area);
        let list_area = horizontal[0];
        let document_area = horizontal[1];

        self.draw_search(frame, search_area);
        self.draw_match_list(frame, list_area);
        self.draw_document(frame, document_area);
        self.draw_edit_box(frame, edit_area);

        let status = self.status_line();
        frame.render_widget(Paragraph::new(status), status_area);

        if self.prompt.is_some() {
            self.draw_prompt(frame, area);
        }
    }

    fn pane(&self, title: String, focus: Focus) -> Block<'static> {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focus == focus))
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let block = self.pane(
            "Search terms (space-separated, all must match)".to_string(),
            Focus::Search,
        );
        let widget = Paragraph::new(self.search.text().to_string()).block(block);
        frame.render_widget(widget, area);

        if self.focus == Focus::Search && self.prompt.is_none() {
            let (_, column) = self.search.caret_position();
            place_cursor(frame, area, 0, column);
        }
    }

    fn draw_match_list(&mut self, frame: &mut Frame, area: Rect) {
        let width = self.config.list_label_width;
        let items: Vec<ListItem> = self
            .session
            .matches()
            .entries()
            .iter()
            .enumerate()
            .map(|(idx, entry)| ListItem::new(render::list_label(idx, &entry.text, width)))
            .collect();
        let title = format!("Matches ({})", self.session.matches().len());
        let list = List::new(items)
            .highlight_style(self.theme.list_selected_style())
            .block(self.pane(title, Focus::List));

        self.list_area = area;
        self.list_state.select(self.session.cursor());
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }

    fn draw_document(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2).max(1) as usize;
        let viewport_height = area.height.saturating_sub(2).max(1) as usize;
        self.last_view_height = viewport_height;
        self.document_area = area;

        let highlights = Highlights::from_session(&self.session);
        let render = render::render_document(
            &self.session.document_text(),
            &highlights,
            &self.theme,
            inner_width,
        );

        if render.focus_line != self.last_focus_line {
            if let Some(line) = render.focus_line
                && (line < self.scroll_top || line >= self.scroll_top + viewport_height)
            {
                self.scroll_top = line.saturating_sub(viewport_height / 3);
            }
            self.last_focus_line = render.focus_line;
        }
        let max_scroll = render.total_lines.saturating_sub(viewport_height);
        self.scroll_top = self.scroll_top.min(max_scroll);

        let title = match &self.file_path {
            Some(path) => path.display().to_string(),
            None => "[no file]".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let paragraph = Paragraph::new(Text::from(render.lines))
            .block(block)
            .scroll((self.scroll_top.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_edit_box(&self, frame: &mut Frame, area: Rect) {
        let title = match self.session.cursor() {
            Some(idx) => format!(
                "Edit sentence {} (Enter replace, Shift-Enter newline, Esc revert)",
                idx + 1
            ),
            None => "Edit sentence (select a match first)".to_string(),
        };
        let widget =
            Paragraph::new(self.edit.text().to_string()).block(self.pane(title, Focus::Edit));
        frame.render_widget(widget, area);

        if self.focus == Focus::Edit && self.prompt.is_none() {
            let (line, column) = self.edit.caret_position();
            place_cursor(frame, area, line, column);
        }
    }

    fn draw_prompt(&self, frame: &mut Frame, area: Rect) {
        let Some(prompt) = &self.prompt else {
            return;
        };

        let width = area.width.saturating_sub(4).min(80).max(10);
        let popup_area = Rect::new(
            area.x + (area.width.saturating_sub(width)) / 2,
            area.y + (area.height.saturating_sub(3)) / 2,
            width,
            3.min(area.height),
        );

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(format!("{} (Enter confirm, Esc cancel)", prompt.kind.title()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        frame.render_widget(
            Paragraph::new(prompt.input.text().to_string()).block(block),
            popup_area,
        );

        let (_, column) = prompt.input.caret_position();
        place_cursor(frame, popup_area, 0, column);
    }

    fn status_line(&mut self) -> Line<'static> {
        self.prune_status_message();

        let position = match self.session.current() {
            Some(current) => {
                let (line, column) =
                    render::line_col(&self.session.document_text(), current.start);
                format!(
                    "{}/{} [{},{}]",
                    self.session.cursor().map_or(0, |idx| idx + 1),
                    self.session.matches().len(),
                    line + 1,
                    column + 1
                )
            }
            None => format!("-/{}", self.session.matches().len()),
        };

        if let Some(message) = &self.status_message {
            let style = if message.is_error {
                self.theme.error_style()
            } else {
                self.theme.status_bar_style()
            };
            return Line::from(vec![
                Span::styled(format!(" {position} | "), self.theme.status_bar_style()),
                Span::styled(message.text.clone(), style),
            ]);
        }

        let file_name = self
            .file_path
            .as_ref()
            .map_or_else(|| "[no file]".to_string(), |path| path.display().to_string());
        let marker = if self.session.is_dirty() { "*" } else { "" };
        Line::from(vec![
            Span::styled(format!(" {position} | "), self.theme.status_bar_style()),
            Span::styled(format!("{file_name}{marker}"), self.theme.filename_style()),
            Span::styled(
                 " | Tab focus | ^N/^P next/prev | ^G go to | ^R replace | ^O open | ^S save | ^Q quit",
                self.theme.status_bar_style(),
            ),
        ])
    }
}

/// Shared line-editing keys for the search field, prompt and edit box.
fn edit_text_input(input: &mut TextInput, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    match code {
        KeyCode::Char(ch) if !ctrl && !modifiers.contains(KeyModifiers::ALT) => {
            input.insert_char(ch);
            true
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left if ctrl => input.move_word_left(),
        KeyCode::Right if ctrl => input.move_word_right(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => {
            input.move_home();
            true
        }
        KeyCode::End => {
            input.move_end();
            true
        }
        _ => false,
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    area.contains(Position::new(column, row))
}

/// Maps a click inside the bordered match list to an entry index. `offset` is
/// the first visible entry. The caller rejects indices past the end.
fn list_row_to_index(area: Rect, offset: usize, column: u16, row: u16) -> Option<usize> {
    let inner = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    if !contains(inner, column, row) {
        return None;
    }
    Some(offset + usize::from(row - inner.y))
}

fn place_cursor(frame: &mut Frame, area: Rect, line: u16, column: u16) {
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    if inner_width == 0 || line >= inner_height {
        return;
    }
    let x = area.x + 1 + column.min(inner_width - 1);
    let y = area.y + 1 + line;
    frame.set_cursor_position(Position::new(x, y));
}
