//! Interactive terminal menu using ratatui
//!
//! Pages are kept in a `MenuBook` arena and navigated by a `MenuSession`,
//! which is plain state and knows nothing about the terminal. The
//! [`TerminalPresenter`] draws the session and runs selected commands with the
//! TUI suspended.

use std::io::{self, stdout, Write};
use std::process::Command;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use log::{info, warn};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::presenter::Presenter;
use crate::pipeline::MenuNode;

/// Index of a page inside a `MenuBook`.
type PageId = usize;

/// One selectable row of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuEntry {
    Submenu { label: String, page: PageId },
    Command { label: String, command: String },
}

impl MenuEntry {
    fn label(&self) -> &str {
        match self {
            MenuEntry::Submenu { label, .. } | MenuEntry::Command { label, .. } => label,
        }
    }
}

/// A menu page: a title and its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MenuPage {
    title: String,
    description: Option<String>,
    entries: Vec<MenuEntry>,
}

/// Arena of pages built by mounting a menu tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct MenuBook {
    pages: Vec<MenuPage>,
}

impl MenuBook {
    fn page(&self, id: PageId) -> &MenuPage {
        &self.pages[id]
    }

    fn add_page(&mut self, title: &str, description: Option<String>) -> PageId {
        self.pages.push(MenuPage {
            title: title.to_string(),
            description,
            entries: Vec::new(),
        });
        self.pages.len() - 1
    }

    fn add_submenu(&mut self, parent: PageId, node: &MenuNode) -> PageId {
        let page = self.add_page(&node.label, node.description.clone());
        self.pages[parent].entries.push(MenuEntry::Submenu {
            label: node.label.clone(),
            page,
        });
        page
    }

    fn add_command(&mut self, parent: PageId, label: &str, command: &str) {
        self.pages[parent].entries.push(MenuEntry::Command {
            label: label.to_string(),
            command: command.to_string(),
        });
    }
}

/// What the caller should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionAction {
    /// Redraw only
    None,
    /// Run a shell command
    Run { label: String, command: String },
    /// Leave the menu
    Exit,
}

/// Navigation state over a [`MenuBook`].
///
/// Each page shows its entries followed by one extra row: "Exit" on the root
/// page, "Return to <parent>" on submenus.
#[derive(Debug, Clone)]
struct MenuSession<'a> {
    book: &'a MenuBook,
    /// Open pages with their selected row, root first
    stack: Vec<(PageId, usize)>,
}

impl<'a> MenuSession<'a> {
    fn new(book: &'a MenuBook, root: PageId) -> Self {
        Self {
            book,
            stack: vec![(root, 0)],
        }
    }

    fn page_id(&self) -> PageId {
        self.top().0
    }

    fn page(&self) -> &'a MenuPage {
        self.book.page(self.page_id())
    }

    fn selected(&self) -> usize {
        self.top().1
    }

    /// Entries plus the trailing exit/return row.
    fn row_count(&self) -> usize {
        self.page().entries.len() + 1
    }

    /// Selected entry, or `None` when the exit/return row is selected.
    fn selected_entry(&self) -> Option<&'a MenuEntry> {
        self.page().entries.get(self.selected())
    }

    /// Label of the trailing row.
    fn exit_label(&self) -> String {
        match self.stack.len() {
            1 => "Exit".to_string(),
            n => format!("Return to {}", self.book.page(self.stack[n - 2].0).title),
        }
    }

    /// Titles of the open pages, root first.
    fn breadcrumb(&self) -> Vec<&'a str> {
        self.stack
            .iter()
            .map(|(id, _)| self.book.page(*id).title.as_str())
            .collect()
    }

    fn move_up(&mut self) {
        let row = &mut self.top_mut().1;
        *row = row.saturating_sub(1);
    }

    fn move_down(&mut self) {
        let last = self.row_count() - 1;
        let row = &mut self.top_mut().1;
        if *row < last {
            *row += 1;
        }
    }

    fn move_first(&mut self) {
        self.top_mut().1 = 0;
    }

    fn move_last(&mut self) {
        let last = self.row_count() - 1;
        self.top_mut().1 = last;
    }

    /// Activate the selected row.
    fn select(&mut self) -> SessionAction {
        match self.selected_entry() {
            Some(MenuEntry::Submenu { page, .. }) => {
                self.stack.push((*page, 0));
                SessionAction::None
            }
            Some(MenuEntry::Command { label, command }) => SessionAction::Run {
                label: label.clone(),
                command: command.clone(),
            },
            None => self.back(),
        }
    }

    /// Jump to the n-th row (1-based) and activate it.
    fn select_number(&mut self, number: usize) -> SessionAction {
        if number == 0 || number > self.row_count() {
            return SessionAction::None;
        }
        self.top_mut().1 = number - 1;
        self.select()
    }

    /// Close the current page; closing the root page exits.
    fn back(&mut self) -> SessionAction {
        if self.stack.len() > 1 {
            self.stack.pop();
            SessionAction::None
        } else {
            SessionAction::Exit
        }
    }

    /// Map a key press to navigation.
    fn handle_key(&mut self, key: KeyEvent) -> SessionAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return SessionAction::Exit;
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_down(),
            KeyCode::Home => self.move_first(),
            KeyCode::End => self.move_last(),
            KeyCode::Enter => return self.select(),
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => return self.back(),
            KeyCode::Char('q') | KeyCode::Char('Q') => return SessionAction::Exit,
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let number = c.to_digit(10).unwrap_or(0) as usize;
                return self.select_number(number);
            }
            _ => {}
        }
        SessionAction::None
    }

    fn top(&self) -> (PageId, usize) {
        self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut (PageId, usize) {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

/// Full-screen ratatui front end.
#[derive(Debug, Default)]
pub struct TerminalPresenter {
    book: MenuBook,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for TerminalPresenter {
    type Handle = PageId;

    fn create_root_menu(&mut self, title: &str) -> PageId {
        self.book.add_page(title, None)
    }

    fn push_submenu(&mut self, parent: &PageId, node: &MenuNode) -> PageId {
        self.book.add_submenu(*parent, node)
    }

    fn add_command_item(&mut self, parent: &PageId, label: &str, command: &str) {
        self.book.add_command(*parent, label, command)
    }

    fn run(self, root: PageId) -> Result<()> {
        anyhow::ensure!(root < self.book.pages.len(), "unknown menu page {}", root);

        // Setup terminal
        enable_raw_mode().context("Failed to initialise the terminal")?;
        stdout().execute(EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

        let result = run_menu_loop(&mut terminal, &self.book, root);

        // Restore terminal
        disable_raw_mode()?;
        stdout().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

fn run_menu_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    book: &MenuBook,
    root: PageId,
) -> Result<()> {
    let mut session = MenuSession::new(book, root);
    let mut status: Option<String> = None;

    loop {
        terminal.draw(|frame| draw_ui(frame, &session, status.as_deref()))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match session.handle_key(key) {
                SessionAction::None => {}
                SessionAction::Exit => return Ok(()),
                SessionAction::Run { label, command } => {
                    status = Some(run_command(terminal, &label, &command)?);
                }
            }
        }
    }
}

/// Run `command` with the TUI suspended; returns a status line.
fn run_command(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    label: &str,
    command: &str,
) -> Result<String> {
    if command.trim().is_empty() {
        return Ok(format!("{}: nothing to run", label));
    }

    with_terminal_suspension(terminal, || {
        info!("Running {:?}: {}", label, command);
        println!("$ {}", command);
        let status = shell(command).status();

        let line = match status {
            Ok(status) => {
                info!("{:?} exited with {}", label, status);
                match status.code() {
                    Some(code) => format!("{}: exited with status {}", label, code),
                    None => format!("{}: terminated by signal", label),
                }
            }
            Err(err) => {
                warn!("Failed to start {:?}: {}", label, err);
                format!("{}: failed to start ({})", label, err)
            }
        };

        println!();
        print!("{}. Press Enter to return to the menu...", line);
        io::stdout().flush()?;
        io::stdin()
            .read_line(&mut String::new())
            .context("Failed to read from stdin")?;
        Ok(line)
    })
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

fn with_terminal_suspension<F, T>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    f: F,
) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    let result = f();
    enable_raw_mode()?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    result
}

fn draw_ui(frame: &mut Frame, session: &MenuSession, status: Option<&str>) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(1),
        ])
        .split(area);

    // Title with the path of open pages
    let title = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {}", session.breadcrumb().join(" › ")),
        Style::default().fg(Color::White).bold(),
    )]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" shellmenu ")
            .title_style(Style::default().fg(Color::Cyan).bold()),
    );
    frame.render_widget(title, chunks[0]);

    // Entries, numbered like the keys that select them
    let page = session.page();
    let mut rows: Vec<ListItem> = page
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = match entry {
                MenuEntry::Submenu { .. } => " ›",
                MenuEntry::Command { .. } => "",
            };
            ListItem::new(format!("  {:>2} - {}{}", i + 1, entry.label(), marker))
        })
        .collect();
    rows.push(
        ListItem::new(format!("  {:>2} - {}", rows.len() + 1, session.exit_label()))
            .style(Style::default().fg(Color::DarkGray)),
    );

    let list = List::new(rows)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::Cyan).bold());
    let mut list_state = ListState::default();
    list_state.select(Some(session.selected()));
    frame.render_stateful_widget(list, chunks[1], &mut list_state);

    // Details of the highlighted row, or the result of the last command
    let detail = match (status, session.selected_entry()) {
        (Some(status), _) => {
            Span::styled(format!("  {}", status), Style::default().fg(Color::Yellow))
        }
        (None, Some(MenuEntry::Command { command, .. })) => {
            Span::styled(format!("  $ {}", command), Style::default().fg(Color::DarkGray))
        }
        (None, Some(MenuEntry::Submenu { page, .. })) => {
            let description = session_page_description(session, *page);
            Span::styled(format!("  {}", description), Style::default().fg(Color::DarkGray))
        }
        (None, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(detail)), chunks[2]);

    let help_text = Line::from(vec![
        Span::styled("  ↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" move  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter/1-9", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" back  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Q", Style::default().fg(Color::Cyan)),
        Span::styled(" quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), chunks[3]);
}

fn session_page_description(session: &MenuSession, page: PageId) -> String {
    session
        .book
        .page(page)
        .description
        .clone()
        .unwrap_or_default()
}
