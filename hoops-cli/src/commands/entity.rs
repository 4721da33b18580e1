//! Entity command handlers
//!
//! The same five subcommands for every collection: listing, viewing,
//! creating, updating and deleting records.

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::*;
use hoops_client::{ApiClient, HttpRepository, Repository};
use hoops_core::Entity;
use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;

/// Entity subcommands
#[derive(Subcommand)]
pub enum EntityCommands {
    /// List all records
    List,
    /// Show one record
    Get {
        /// Record ID
        id: i32,
    },
    /// Create a record from a JSON document
    Create {
        /// Record fields, e.g. '{"name": "Point Guard"}'
        #[arg(short, long)]
        json: String,
    },
    /// Replace every field of a record
    Update {
        /// Record ID
        id: i32,

        /// Record fields as JSON
        #[arg(short, long)]
        json: String,
    },
    /// Delete a record
    Delete {
        /// Record ID
        id: i32,
    },
}

/// Handle entity commands for collection `T`
pub async fn handle<T: Entity>(
    command: EntityCommands,
    client: &ApiClient,
    cancel: &CancellationToken,
) -> Result<()> {
    let repository = client.repository::<T>();

    match command {
        EntityCommands::List => list(&repository, cancel).await,
        EntityCommands::Get { id } => get(&repository, id, cancel).await,
        EntityCommands::Create { json } => {
            let entity = parse_record::<T>(&json, 0)?;
            repository.add(&entity, cancel).await?;
            println!(
                "{}",
                format!("✓ {} created successfully!", capitalize(T::LABEL))
                    .green()
                    .bold()
            );
            Ok(())
        }
        EntityCommands::Update { id, json } => {
            let entity = parse_record::<T>(&json, id)?;
            repository
                .update(&entity, cancel)
                .await
                .with_context(|| format!("Failed to update {} {}", T::LABEL, id))?;
            println!(
                "{}",
                format!("✓ {} {} updated successfully!", capitalize(T::LABEL), id)
                    .green()
                    .bold()
            );
            Ok(())
        }
        EntityCommands::Delete { id } => {
            repository
                .delete(id, cancel)
                .await
                .with_context(|| format!("Failed to delete {} {}", T::LABEL, id))?;
            println!(
                "{}",
                format!("✓ {} {} deleted successfully!", capitalize(T::LABEL), id)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

/// List all records of a collection
async fn list<T: Entity>(repository: &HttpRepository<T>, cancel: &CancellationToken) -> Result<()> {
    let entities = repository.get_all(cancel).await?;

    if entities.is_empty() {
        println!("{}", format!("No {} found.", T::RESOURCE.to_lowercase()).yellow());
    } else {
        println!(
            "{}",
            format!("Found {} {}:", entities.len(), T::RESOURCE.to_lowercase()).bold()
        );
        println!();
        for entity in &entities {
            print_record(entity)?;
        }
    }

    Ok(())
}

/// Get and display a single record
async fn get<T: Entity>(
    repository: &HttpRepository<T>,
    id: i32,
    cancel: &CancellationToken,
) -> Result<()> {
    match repository.get(id, cancel).await? {
        Some(entity) => print_record(&entity),
        None => bail!("{} {} not found", capitalize(T::LABEL), id),
    }
}

/// Decode and validate a record typed on the command line
///
/// `id` replaces whatever identifier the document carried.
fn parse_record<T: Entity>(json: &str, id: i32) -> Result<T> {
    let mut entity: T = serde_json::from_str(json)
        .with_context(|| format!("Invalid {} document", T::LABEL))?;
    entity.set_id(id);

    let errors = entity.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        bail!("Invalid {}: {}", T::LABEL, details.join("; "));
    }

    Ok(entity)
}

/// Print a record's fields, identifier first
fn print_record<T: Entity>(entity: &T) -> Result<()> {
    let value = serde_json::to_value(entity).context("Failed to render record")?;

    println!("  {} {}", "▸".cyan(), entity.id().to_string().cyan());
    if let JsonValue::Object(fields) = value {
        for (key, field) in fields.iter().filter(|(key, _)| key.as_str() != "id") {
            let rendered = match field {
                JsonValue::String(s) => s.bold().to_string(),
                JsonValue::Null => "-".dimmed().to_string(),
                other => other.to_string(),
            };
            println!("    {:<16} {}", format!("{key}:"), rendered);
        }
    }
    println!();

    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoops_core::domain::{Player, Team};

    #[test]
    fn test_parse_record_sets_id() {
        let team: Team = parse_record(r#"{"id": 99, "name": "Rockets", "seasonWins": 41}"#, 3).unwrap();
        assert_eq!(team.id, 3);
        assert_eq!(team.season_wins, 41);
    }

    #[test]
    fn test_parse_record_rejects_invalid() {
        let err = parse_record::<Player>(r#"{"name": "", "jerseyNumber": 7}"#, 0).unwrap_err();
        assert!(err.to_string().contains("name: Name cannot be empty"));

        assert!(parse_record::<Player>("not json", 0).is_err());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("coach"), "Coach");
        assert_eq!(capitalize(""), "");
    }
}
