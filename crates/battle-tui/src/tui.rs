//! Ratatui TUI frontend for the battle client.
//!
//! Pure UI module: terminal lifecycle, rendering, and input → intent
//! mapping. All game state lives in
//! [`battle_client::game_state::ClientGameState`]; this module has no
//! networking dependencies.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
};
use std::io::{self, Stdout};

use battle_client::game_state::{ClientGameState, Phase};
use battle_core::element::{BASE_HP, Element};

// ---------------------------------------------------------------------------
// UserIntent — result of processing user input
// ---------------------------------------------------------------------------

/// The result of processing a user input event.
#[derive(Debug)]
pub enum UserIntent {
    /// No action needed.
    None,
    /// The user wants to quit the application.
    Quit,
    /// The user picked a creature on the setup screen.
    StartGame(Element),
    /// The user pressed the attack control.
    Attack,
    /// The user wants to abandon the finished game and return to setup.
    Restart,
}

// ---------------------------------------------------------------------------
// TUI-only state
// ---------------------------------------------------------------------------

/// UI-layer state that lives alongside (but separate from) the game state.
#[derive(Default)]
struct TuiState {
    /// Cursor position in the setup screen's creature list.
    selected_creature: usize,
}

// ---------------------------------------------------------------------------
// Public API — Tui struct
// ---------------------------------------------------------------------------

/// Owns the ratatui terminal and all UI-layer state.
///
/// The client orchestrator ([`crate::client`]) drives this struct: call
/// [`Tui::render`] each frame and [`Tui::poll_and_handle_input`] to process
/// keyboard events.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    state: TuiState,
}

impl Tui {
    /// Set up the terminal (raw mode, alternate screen) and return a ready `Tui`.
    pub fn setup() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self {
            terminal,
            state: TuiState::default(),
        })
    }

    /// Restore the terminal to its original state.
    pub fn teardown(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Draw the current frame.
    pub fn render(&mut self, gs: &ClientGameState) -> io::Result<()> {
        self.terminal.draw(|f| ui(f, gs, &self.state))?;
        Ok(())
    }

    /// Poll for a keyboard event and, if one is available, translate it into
    /// a [`UserIntent`]. This never blocks — returns [`UserIntent::None`]
    /// immediately when no event is pending.
    pub fn poll_and_handle_input(&mut self, gs: &ClientGameState) -> io::Result<UserIntent> {
        if !event::poll(std::time::Duration::from_millis(0))? {
            return Ok(UserIntent::None);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(UserIntent::None);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(UserIntent::None);
        }
        Ok(self.handle_key_event(key, gs))
    }

    // -- private -----------------------------------------------------------

    fn handle_key_event(&mut self, key: KeyEvent, gs: &ClientGameState) -> UserIntent {
        if key.code == KeyCode::Esc {
            return UserIntent::Quit;
        }

        match gs.phase {
            Phase::Setup => self.handle_setup_key(key),
            Phase::Battle => handle_battle_key(key, gs),
        }
    }

    fn handle_setup_key(&mut self, key: KeyEvent) -> UserIntent {
        let count = Element::ALL.len();
        match key.code {
            KeyCode::Up => {
                self.state.selected_creature = (self.state.selected_creature + count - 1) % count;
                UserIntent::None
            }
            KeyCode::Down => {
                self.state.selected_creature = (self.state.selected_creature + 1) % count;
                UserIntent::None
            }
            KeyCode::Enter => UserIntent::StartGame(Element::ALL[self.state.selected_creature]),
            _ => UserIntent::None,
        }
    }
}

fn handle_battle_key(key: KeyEvent, gs: &ClientGameState) -> UserIntent {
    match key.code {
        // Enter follows whichever control is currently live.
        KeyCode::Enter => {
            if gs.restart_visible() {
                UserIntent::Restart
            } else if gs.attack_enabled() {
                UserIntent::Attack
            } else {
                UserIntent::None
            }
        }
        KeyCode::Char('a') if gs.attack_enabled() => UserIntent::Attack,
        KeyCode::Char('r') if gs.restart_visible() => UserIntent::Restart,
        _ => UserIntent::None,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn ui(frame: &mut Frame, gs: &ClientGameState, tui: &TuiState) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),   // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    match gs.phase {
        Phase::Setup => render_setup(frame, gs, tui, main_layout[0]),
        Phase::Battle => render_battle(frame, gs, main_layout[0]),
    }

    render_status_bar(frame, gs, main_layout[1]);
}

fn render_setup(frame: &mut Frame, gs: &ClientGameState, tui: &TuiState, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Creature list
            Constraint::Length(3), // Feedback
        ])
        .split(area);

    let items: Vec<ListItem> = Element::ALL
        .iter()
        .enumerate()
        .map(|(index, element)| {
            let selected = index == tui.selected_creature;
            let marker = if selected { "▶ " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Black).bg(Color::Blue).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{marker}{element}"),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Choose Your Creature ")
            .title_style(Style::default().fg(Color::Blue).bold()),
    );
    frame.render_widget(list, layout[0]);

    let feedback = match &gs.last_error {
        Some(err) => Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(Span::styled(
            " Up/Down to choose, Enter to fight",
            Style::default().fg(Color::Gray),
        )),
    };
    frame.render_widget(Paragraph::new(feedback), layout[1]);
}

fn render_battle(frame: &mut Frame, gs: &ClientGameState, area: Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Health bars
            Constraint::Min(5),    // Battle log
            Constraint::Length(4), // Turn / result panel
        ])
        .split(area);

    let bars = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    let Some(snapshot) = &gs.snapshot else {
        return;
    };
    render_combatant(
        frame,
        bars[0],
        " You ",
        snapshot.player_creature.element,
        gs.player_hp(),
    );
    render_combatant(
        frame,
        bars[1],
        " AI ",
        snapshot.ai_creature.element,
        gs.ai_hp(),
    );

    render_log(frame, gs, layout[1]);
    render_turn_panel(frame, gs, layout[2]);
}

fn render_combatant(frame: &mut Frame, area: Rect, title: &str, element: Element, hp: i32) {
    let color = if hp > BASE_HP / 2 {
        Color::Green
    } else if hp > BASE_HP / 4 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(title)
                .title_style(Style::default().fg(Color::Magenta).bold()),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(f64::from(hp.clamp(0, BASE_HP)) / f64::from(BASE_HP))
        .label(format!("{element}  {hp}/{BASE_HP}"));

    frame.render_widget(gauge, area);
}

/// The slice of log entries that fits in `visible` rows, anchored to the
/// bottom so the newest entry is always on screen.
fn bottom_window(entries: &[String], visible: usize) -> &[String] {
    let skip = entries.len().saturating_sub(visible);
    &entries[skip..]
}

fn render_log(frame: &mut Frame, gs: &ClientGameState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = bottom_window(gs.log(), visible)
        .iter()
        .map(|entry| {
            let style = if entry.contains("defeated") {
                Style::default().fg(Color::Green).bold()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Span::styled(entry.clone(), style))
        })
        .collect();

    let log_list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Battle Log ")
            .title_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(log_list, area);
}

fn render_turn_panel(frame: &mut Frame, gs: &ClientGameState, area: Rect) {
    let mut lines = Vec::new();

    if let Some(err) = &gs.last_error {
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    if let Some(result) = gs.status_line() {
        lines.push(Line::from(Span::styled(
            format!(" {result}"),
            Style::default().fg(Color::Green).bold(),
        )));
        lines.push(Line::from(vec![
            Span::styled(" R", Style::default().fg(Color::Cyan).bold()),
            Span::raw(": New game"),
        ]));
    } else if let Some(turn) = gs.turn_line() {
        let style = if gs.attack_enabled() {
            Style::default().fg(Color::Yellow).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(format!(" {turn}"), style)));
        if gs.attack_visible() {
            let attack_style = if gs.attack_enabled() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                Span::styled(" A", attack_style.fg(Color::Cyan).bold()),
                Span::styled(": Attack", attack_style),
            ]));
        }
    }

    let panel = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Turn ")
            .title_style(Style::default().fg(Color::Yellow).bold()),
    );

    frame.render_widget(panel, area);
}

fn render_status_bar(frame: &mut Frame, gs: &ClientGameState, area: Rect) {
    let pending = if gs.request_pending {
        Span::styled("● Waiting for server...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled("● Ready", Style::default().fg(Color::Green))
    };
    let status = Paragraph::new(Line::from(vec![
        pending,
        Span::raw(" | "),
        Span::styled("ESC", Style::default().fg(Color::Cyan).bold()),
        Span::raw(": Quit"),
    ]));
    frame.render_widget(status, area);
}
