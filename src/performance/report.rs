use super::{format::IntegerFormat, record::TimerRecord};

/// Width of the table, in characters.
pub const TABLE_WIDTH: usize = 75;

pub const STILL_RUNNING: &str = "STILL RUNNING";
pub const NO_EVENTS: &str = "No Events Tracked";

const ELLIPSIS: &str = "...";

/// Renders the bordered results table.
pub fn render<'a, I, F>(title: &str, records: I, format: &F) -> String
where
    I: IntoIterator<Item = &'a TimerRecord>,
    F: IntegerFormat + ?Sized,
{
    let separator = "-".repeat(TABLE_WIDTH);
    let title_width = TABLE_WIDTH / 2 + title.chars().count() / 2;

    let mut table = format!("\n{separator}\n{title:>title_width$}\n{separator}\n\n");

    let mut rows = records.into_iter().peekable();
    if rows.peek().is_none() {
        table.push('\t');
        table.push_str(NO_EVENTS);
        table.push('\n');
    }

    for record in rows {
        table.push_str(&row(record, format));
        table.push('\n');
    }

    table.push('\n');
    table.push_str(&separator);
    table.push_str("\n\n");

    table
}

fn row<F: IntegerFormat + ?Sized>(record: &TimerRecord, format: &F) -> String {
    let value = match record.elapsed() {
        Some(elapsed) => format!("{} {}", format.format(elapsed), record.unit()),
        None => STILL_RUNNING.to_string(),
    };

    let name = fit_name(record.name(), TABLE_WIDTH.saturating_sub(value.chars().count() + 1));
    let width = TABLE_WIDTH.saturating_sub(name.chars().count());

    format!("{name}{value:>width$}")
}

/// Shortens `name` to at most `max` characters, marking the cut with `...`.
fn fit_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }

    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut short: String = name.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}
