//! Quick Search Demo - filter a long list by just typing
//!
//! Start typing to filter 10,001 numbers; there is no search field to
//! focus first. Backspace deletes, Escape clears, Ctrl+C exits.
//! Pass `--disabled` to start with quick search turned off; F2 toggles it.
//!
//! Logs go to `quick_search.log` (filter with RUST_LOG).
//!
//! Run with: cargo run --example quick_search

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};
use spark_signals::{effect, signal, Signal};
use spark_quick_search::pipeline::terminal::terminal_size;
use spark_quick_search::{
    attach, mount, on_keyboard, run, PropValue, QuickSearchProps, SearchPlacement,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const PROMPT: &str = "Type to search";

fn items_to_display(items: &[String], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return items.to_vec();
    }
    items.iter().filter(|item| item.contains(query)).cloned().collect()
}

fn draw(
    items: &[String],
    query: &str,
    enabled: bool,
    focused: bool,
    size: (u16, u16),
) -> io::Result<()> {
    let (_, height) = size;
    let matches = items_to_display(items, query);
    let mut out = io::stdout();

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    let field = if query.is_empty() {
        format!("🔍 {}", PROMPT)
    } else {
        format!("🔍 {}", query)
    };
    queue!(out, SetAttribute(Attribute::Bold), Print(field), SetAttribute(Attribute::Reset))?;

    let status = format!(
        "{} matches · quick search {} · input {}",
        matches.len(),
        if enabled { "on" } else { "off" },
        if focused { "focused" } else { "unfocused" },
    );
    queue!(out, MoveTo(0, 1), SetAttribute(Attribute::Dim), Print(status), SetAttribute(Attribute::Reset))?;

    let rows = height.saturating_sub(3) as usize;
    for (row, item) in matches.iter().take(rows).enumerate() {
        queue!(out, MoveTo(2, row as u16 + 3), Print(item))?;
    }
    out.flush()
}

fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::never(".", "quick_search.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    guard
}

fn main() -> spark_quick_search::Result<()> {
    // Guard must live for all of main() so logs are flushed.
    let _guard = init_logging();

    let items: Vec<String> = (0..=10_000).map(|n| n.to_string()).collect();
    let query = signal(String::new());
    let enabled: Signal<bool> = signal(!std::env::args().any(|arg| arg == "--disabled"));
    let focused = signal(false);

    let handle = mount()?;

    // F2 toggles quick search; registered before the scope so it is seen first.
    let toggle = enabled.clone();
    let _stop_toggle = on_keyboard(move |event| {
        if event.key == "F2" {
            toggle.set(!toggle.get());
            true
        } else {
            false
        }
    });

    let search = attach(QuickSearchProps {
        enabled: PropValue::Signal(enabled.clone()),
        focus: Some(focused.clone()),
        placement: SearchPlacement::Toolbar,
        prompt: Some(PROMPT.to_string()),
        ..QuickSearchProps::new(query.clone())
    });

    let _stop_render = effect({
        let query = query.clone();
        let enabled = enabled.clone();
        let focused = focused.clone();
        move || {
            let result = draw(&items, &query.get(), enabled.get(), focused.get(), terminal_size());
            if let Err(err) = result {
                tracing::error!(%err, "failed to draw");
            }
        }
    });

    let result = run(&handle);

    search.cleanup();
    handle.unmount();
    tracing::info!(final_query = %query.get(), "quick search demo finished");
    result
}
