//! Interactive demo: a grid over a synthetic table of agent runs.
//!
//! Keys: Tab focuses/unfocuses the grid, j/k or arrows move, Space toggles
//! selection, Enter activates, n/p page, a hides/shows the Agent column,
//! l toggles the loading state, q quits. The mouse works on headers (click
//! to sort, drag to reorder, drag a right edge to resize), rows, and the
//! pager footer.

use std::fs::File;
use std::io;
use std::panic;
use std::sync::Mutex;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::info;

use opsgrid::{
    ClientPagination, ColumnDef, Grid, GridProps, PaginationConfig, RowIdSource, SelectionMode,
};

#[derive(Debug, Clone)]
struct Run {
    id: String,
    agent: String,
    status: String,
    duration_secs: u64,
    tokens: u64,
}

const AGENTS: [&str; 4] = ["planner", "executor", "critic", "researcher"];
const STATUSES: [&str; 3] = ["succeeded", "failed", "running"];

/// Deterministic synthetic dataset, large enough to exercise paging.
fn synthetic_runs(count: usize) -> Vec<Run> {
    (0..count)
        .map(|i| Run {
            id: format!("run-{i:04}"),
            agent: AGENTS[i % AGENTS.len()].to_string(),
            status: STATUSES[(i * 7) % STATUSES.len()].to_string(),
            duration_secs: ((i * 37) % 600) as u64,
            tokens: ((i * 1013) % 90_000) as u64,
        })
        .collect()
}

fn run_id(run: &Run) -> String {
    run.id.clone()
}

fn columns() -> Vec<ColumnDef<Run>> {
    vec![
        ColumnDef::selection(|_: &Run| String::new()),
        ColumnDef::new("id", "Run", |r: &Run| r.id.clone())
            .with_sizes(8, 10, 14)
            .not_hideable(),
        ColumnDef::new("agent", "Agent", |r: &Run| r.agent.clone()).with_sizes(6, 12, 20),
        ColumnDef::new("status", "Status", |r: &Run| r.status.clone()).with_sizes(6, 10, 12),
        ColumnDef::new("duration", "Duration", |r: &Run| {
            format!("{}s", r.duration_secs)
        })
        .with_sizes(6, 9, 12),
        ColumnDef::new("tokens", "Tokens", |r: &Run| r.tokens.to_string()).with_sizes(6, 8, 12),
    ]
}

/// Restore the terminal before the default panic output runs
fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));
}

fn main() -> io::Result<()> {
    let log = File::create("runs-demo.log")?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();
    info!("runs demo started");

    install_panic_hook();

    let props = GridProps::new(columns(), RowIdSource::Extract(run_id))
        .with_selection_mode(SelectionMode::Multi)
        .with_pagination(PaginationConfig::client(ClientPagination {
            page_size: 25,
            page_size_options: vec![10, 25, 50],
        }));
    let mut grid = Grid::new(props);
    grid.set_rows(synthetic_runs(500));
    grid.callbacks_mut().on_row_activate = Some(Box::new(|id| {
        info!(run = id, "activated");
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut grid);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    grid: &mut Grid<Run>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.size();
            let grid_area = Rect {
                height: area.height.saturating_sub(1),
                ..area
            };
            grid.render(frame, grid_area);

            let help = Paragraph::new(
                "Tab focus  j/k move  Space select  Enter open  n/p page  a agent col  l loading  q quit",
            )
            .style(Style::default().add_modifier(Modifier::DIM));
            let help_area = Rect {
                y: area.y + area.height.saturating_sub(1),
                height: 1,
                ..area
            };
            frame.render_widget(help, help_area);
        })?;

        match event::read()? {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Tab => grid.set_focused(!grid.is_focused()),
                KeyCode::Char('n') => grid.next_page(),
                KeyCode::Char('p') => grid.previous_page(),
                KeyCode::Char('a') => grid.toggle_column_visibility("agent"),
                KeyCode::Char('l') => {
                    let loading = !grid.is_loading();
                    grid.set_loading(loading);
                }
                _ => {
                    grid.handle_key(&key);
                }
            },
            Event::Mouse(mouse) => {
                grid.handle_mouse(&mouse);
            }
            Event::FocusLost => grid.handle_focus_lost(),
            _ => {}
        }
    }
}
