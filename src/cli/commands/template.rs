//! Template command implementations.

use crate::cli::{TemplateArgs, TemplateCommands};
use crate::error::Result;
use crate::model::{EventTemplate, NewTemplate};
use crate::storage::{ApplyOutcome, SqliteStorage};
use colored::Colorize;
use std::path::PathBuf;

/// Execute template commands.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the operation fails.
pub fn execute(command: &TemplateCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut storage = super::open_storage(db_path)?;

    match command {
        TemplateCommands::Add(args) => {
            let template = storage.create_template(&new_template(args))?;
            print_template_result("Created template", &template, json)
        }
        TemplateCommands::Edit { id, args } => {
            let template = storage.update_template(id, &new_template(args))?;
            print_template_result("Updated template", &template, json)
        }
        TemplateCommands::Delete { id } => {
            storage.delete_template(id)?;
            if json {
                super::print_json(&serde_json::json!({ "deleted": id }))
            } else {
                println!("Deleted template {id}");
                Ok(())
            }
        }
        TemplateCommands::List => list(&storage, json),
        TemplateCommands::Move { from, to } => {
            storage.move_template(*from, *to)?;
            list(&storage, json)
        }
        TemplateCommands::Apply { id, dates } => {
            let outcome = storage.apply_template(id, dates)?;
            print_apply_outcome(&outcome, json)
        }
    }
}

fn new_template(args: &TemplateArgs) -> NewTemplate {
    NewTemplate {
        title: args.title.clone(),
        start_time: args.start,
        end_time: args.end,
        memo: args.memo.clone(),
        all_day: args.all_day,
        color: args.color.clone(),
    }
}

fn print_template_result(verb: &str, template: &EventTemplate, json: bool) -> Result<()> {
    if json {
        return super::print_json(template);
    }
    println!("{} {}", format!("{verb}:").green().bold(), template.title);
    println!("  ID:    {}", template.id.dimmed());
    println!("  Time:  {} - {}", template.start_time, template.end_time);
    Ok(())
}

fn list(storage: &SqliteStorage, json: bool) -> Result<()> {
    let templates = storage.list_templates()?;
    if json {
        return super::print_json(&templates);
    }

    if templates.is_empty() {
        println!("No templates.");
        return Ok(());
    }
    for (position, template) in templates.iter().enumerate() {
        let all_day = if template.all_day { " (all day)" } else { "" };
        println!(
            "{position:>3}. {} {}-{}{all_day}  {}",
            template.title.bold(),
            template.start_time,
            template.end_time,
            template.id.dimmed()
        );
    }
    Ok(())
}

fn print_apply_outcome(outcome: &ApplyOutcome, json: bool) -> Result<()> {
    if json {
        return super::print_json(outcome);
    }

    for event in &outcome.created {
        println!("{} {} {}", "+".green(), event.start, event.title);
    }
    for conflict in &outcome.conflicts {
        println!(
            "{} {} already exists as {}",
            "!".yellow(),
            conflict.date,
            conflict.existing_id.dimmed()
        );
    }
    println!(
        "Created {} event(s), {} duplicate(s) skipped",
        outcome.created.len(),
        outcome.conflicts.len()
    );
    Ok(())
}
