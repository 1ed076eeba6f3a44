//! Main TUI application state and logic

use super::panes::utils::{flatten, TreeLine};
use super::panes::{self, TreeRenderData, TreeScrollState};
use crate::inspector::diagnostics::Console;
use crate::inspector::{Activation, Inspector, View};
use crate::value::Value;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::rc::Rc;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Console,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// Collapse state and flags, kept across passes
    pub inspector: Inspector,

    /// The value being inspected
    pub root: Value,

    /// Diagnostic output shared with the inspector
    pub console: Rc<Console>,

    /// Result of the latest pass
    pub view: View,

    /// The latest pass, one entry per visible line
    lines: Vec<TreeLine>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index of the selected tree line
    pub selected: usize,

    pub tree_scroll: TreeScrollState,
    pub console_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app; `console` must be the sink `inspector` reports to
    pub fn new(inspector: Inspector, root: Value, console: Rc<Console>) -> Self {
        let status_message = if console.is_empty() {
            String::from("Ready!")
        } else {
            String::from("Configuration problems, see console")
        };
        let mut app = App {
            view: inspector.render(&root),
            inspector,
            root,
            console,
            lines: Vec::new(),
            focused_pane: FocusedPane::Tree,
            selected: 0,
            tree_scroll: TreeScrollState { offset: 0 },
            console_scroll: 0,
            should_quit: false,
            status_message,
        };
        app.lines = app.view.root.as_ref().map(flatten).unwrap_or_default();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Start a new pass, keeping the selection on the same path when possible
    fn refresh(&mut self) {
        let selected_path = self.selected_line().and_then(|line| line.path.clone());

        self.view = self.inspector.render(&self.root);
        self.lines = self.view.root.as_ref().map(flatten).unwrap_or_default();

        if let Some(path) = selected_path {
            if let Some(i) = self
                .lines
                .iter()
                .position(|line| line.path.as_deref() == Some(path.as_str()))
            {
                self.selected = i;
            }
        }
        self.selected = self.selected.min(self.lines.len().saturating_sub(1));
    }

    fn selected_line(&self) -> Option<&TreeLine> {
        self.lines.get(self.selected)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Tree pane and console stacked, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(75),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(size);

        panes::render_tree_pane(
            frame,
            main_chunks[0],
            TreeRenderData {
                view: &self.view,
                lines: &self.lines,
                selected: self.selected,
            },
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        panes::render_console_pane(
            frame,
            main_chunks[1],
            &self.console,
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            if self.lines.is_empty() { 0 } else { self.selected + 1 },
            self.lines.len(),
            self.inspector.is_minimized(),
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.selected = self.selected.saturating_sub(1),
                FocusedPane::Console => self.console_scroll = self.console_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => {
                    if self.selected + 1 < self.lines.len() {
                        self.selected += 1;
                    }
                }
                FocusedPane::Console => self.console_scroll = self.console_scroll.saturating_add(1),
            },
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.lines.len().saturating_sub(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(),
            KeyCode::Char('p') => self.reveal_selected(),
            KeyCode::Char('d') => self.dump_selected(),
            KeyCode::Char('m') => {
                let minimized = self.inspector.toggle_minimized();
                self.status_message = if minimized { "Minimized" } else { "Restored" }.to_string();
                self.refresh();
            }
            _ => {}
        }
    }

    /// Toggle the selected row, or dump it when it is an opaque value without a path
    fn activate_selected(&mut self) {
        let Some(line) = self.selected_line() else {
            return;
        };
        match line.path.clone() {
            Some(path) => {
                let collapsed = self.inspector.toggle_collapse(&path);
                self.status_message = format!(
                    "{} {}",
                    if collapsed { "Collapsed" } else { "Expanded" },
                    path
                );
                self.refresh();
            }
            None => self.dump_selected(),
        }
    }

    fn reveal_selected(&mut self) {
        let path = self
            .selected_line()
            .and_then(|line| self.inspector.reveal_path(line.path.as_deref()));
        self.status_message = match path {
            Some(path) => format!("Object path: {}", path),
            None => "No path for this row".to_string(),
        };
    }

    fn dump_selected(&mut self) {
        let target = self
            .selected_line()
            .and_then(|line| line.summary.as_ref())
            .and_then(|summary| Some((summary.path.clone(), summary.dump.clone()?)));
        match target {
            Some((path, activation @ Activation::Dump { .. })) => {
                self.inspector.activate(&path, &activation);
                self.status_message = format!("Dumped {} to console", path);
                self.console_scroll = usize::MAX;
            }
            _ => self.status_message = "Nothing to dump".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InspectorConfig;
    use crate::value::BufferKind;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(root: Value) -> App {
        let console = Rc::new(Console::new());
        let inspector = Inspector::with_sink(&InspectorConfig::default(), &root, console.clone());
        App::new(inspector, root, console)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_toggle_selected_row() {
        let mut app = app(Value::object([(
            "a",
            Value::object([("b", Value::from(1))]),
        )]));
        assert_eq!(app.lines.len(), 3);
        assert_eq!(app.view.stats.nodes, 3);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.lines.len(), 2);
        assert_eq!(app.view.stats.nodes, 2);
        assert_eq!(app.selected, 1);
        assert_eq!(app.status_message, "Collapsed $.a");

        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.lines.len(), 3);
    }

    #[test]
    fn test_reveal_and_dump() {
        let mut app = app(Value::object([(
            "buf",
            Value::buffer(BufferKind::Uint8, vec![7]),
        )]));

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.status_message, "No path for this row");

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.status_message, "Object path: $.buf");

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.console.len(), 1);
    }

    #[test]
    fn test_minimize_and_quit() {
        let mut app = app(Value::array([Value::from(1)]));
        press(&mut app, KeyCode::Char('m'));
        assert!(app.inspector.is_minimized());
        assert!(app.view.root.is_none());
        assert!(app.lines.is_empty());
        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.lines.len(), 2);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_title() {
        let mut app = app(Value::object([("answer", Value::from(42))]));
        let screen = draw(&mut app);
        assert!(screen.contains("XRay"));
        assert!(screen.contains("answer"));
        assert!(screen.contains("Console (0)"));
    }

    #[test]
    fn test_dump_scrolls_console_to_bottom() {
        let mut app = app(Value::object([(
            "buf",
            Value::buffer(BufferKind::Uint8, vec![9]),
        )]));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.console_scroll, usize::MAX);

        let screen = draw(&mut app);
        assert!(screen.contains("Console (1)"));
        assert!(screen.contains("$.buf Uint8Array"));
        assert_eq!(app.console_scroll, 0);
    }
}
