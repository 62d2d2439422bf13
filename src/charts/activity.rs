//! Charts over the messages table.

use chrono::{Datelike, Timelike};

use super::{ChartData, ChartOptions, Tally};
use crate::core::pipeline::ResultTables;
use crate::message::NormalizedMessage;

/// Series name for single-series charts.
const ALL: &str = "messages";

fn sender<'a>(tables: &ResultTables, msg: &'a NormalizedMessage) -> &'a str {
    msg.sender_label(tables.sender_label)
}

pub(super) fn sender_messages(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut tally: Tally = Tally::default();
    for msg in &tables.messages {
        tally.add(sender(tables, msg), ALL, 1.0);
    }
    tally.into_top(usize::MAX)
}

pub(super) fn weekday_messages(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut tally = Tally::default();
    for msg in &tables.messages {
        let weekday = msg.datetime.weekday();
        tally.add_keyed(
            weekday.num_days_from_monday(),
            &msg.datetime.format("%A").to_string(),
            sender(tables, msg),
            1.0,
        );
    }
    tally.into_sorted()
}

pub(super) fn top_days_messages(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    let mut tally: Tally = Tally::default();
    for msg in &tables.messages {
        tally.add(&msg.date.format("%Y-%m-%d").to_string(), sender(tables, msg), 1.0);
    }
    tally.into_top(options.top_days)
}

pub(super) fn time_in_day_messages(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut tally = Tally::default();
    for msg in &tables.messages {
        let hour = msg.datetime.hour();
        tally.add_keyed(hour, &format!("{hour:02}:00"), sender(tables, msg), 1.0);
    }
    tally.into_sorted()
}

pub(super) fn per_month_messages(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut tally = Tally::default();
    for msg in &tables.messages {
        let key = (msg.date.year(), msg.date.month());
        tally.add_keyed(key, &format!("{}-{:02}", key.0, key.1), sender(tables, msg), 1.0);
    }
    tally.into_sorted()
}

pub(super) fn term_messages(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut tally = Tally::default();
    for msg in &tables.messages {
        let key = (msg.date.year(), msg.term_number);
        tally.add_keyed(key, &msg.term, sender(tables, msg), 1.0);
    }
    tally.into_sorted()
}

pub(super) fn message_types(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut tally: Tally = Tally::default();
    for msg in &tables.messages {
        tally.add(msg.kind.as_str(), sender(tables, msg), 1.0);
    }
    tally.into_top(usize::MAX)
}

pub(super) fn top_stickers(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    let mut tally: Tally = Tally::default();
    for msg in &tables.messages {
        if let Some(sticker) = msg.sticker.as_deref() {
            tally.add(sticker, sender(tables, msg), 1.0);
        }
    }
    tally.into_top(options.top_stickers)
}
