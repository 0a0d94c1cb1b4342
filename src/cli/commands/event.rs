//! Calendar event command implementations.

use crate::cli::{EventArgs, EventCommands};
use crate::error::Result;
use crate::model::{CalendarEvent, NewCalendarEvent};
use colored::Colorize;
use std::path::PathBuf;

/// Execute event commands.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the operation fails.
pub fn execute(command: &EventCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = super::open_storage(db_path)?;

    match command {
        EventCommands::Add(args) => {
            let event = storage.create_calendar_event(&new_event(args))?;
            if json {
                return super::print_json(&event);
            }
            println!("{} {}", "Created event:".green().bold(), event.title);
            println!("  ID:   {}", event.id.dimmed());
            println!("  When: {} - {}", event.start, event.end);
            Ok(())
        }
        EventCommands::List { date, month } => {
            let events = match (date, month) {
                (Some(date), _) => storage.events_on(*date)?,
                (None, Some(ym)) => storage.events_in_month(ym.year, ym.month)?,
                (None, None) => storage.list_calendar_events()?,
            };
            print_events(&events, json)
        }
        EventCommands::Delete { id } => {
            storage.delete_calendar_event(id)?;
            if json {
                super::print_json(&serde_json::json!({ "deleted": id }))
            } else {
                println!("Deleted event {id}");
                Ok(())
            }
        }
    }
}

fn new_event(args: &EventArgs) -> NewCalendarEvent {
    NewCalendarEvent {
        title: args.title.clone(),
        start: args.start,
        end: args.end,
        memo: args.memo.clone(),
        all_day: args.all_day,
        color: args.color.clone(),
        sort_order: args.sort_order,
    }
}

fn print_events(events: &[CalendarEvent], json: bool) -> Result<()> {
    if json {
        return super::print_json(&events);
    }

    if events.is_empty() {
        println!("No events.");
        return Ok(());
    }
    for event in events {
        let memo = event.memo.as_deref().unwrap_or_default();
        println!(
            "{} {} - {}  {}  {}",
            event.start.format("%Y-%m-%d %H:%M"),
            event.end.format("%H:%M"),
            event.title.bold(),
            memo.dimmed(),
            event.id.dimmed()
        );
    }
    Ok(())
}
