//! triageq CLI — operator interface to the intake queue.
//!
//! Every invocation replays the durable log first, so each command sees
//! the full admission history. Pops are a per-process view; the log itself
//! is append-only.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use triageq::config::Config;
use triageq::engine::Engine;
use triageq::error::Error;
use triageq::export;
use triageq::log::CaseLog;
use triageq::model::Priority;

#[derive(Parser)]
#[command(name = "triageq", about = "Priority-ordered case intake queue")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Admit a case: classify, queue, and append to the log
    Add {
        patient_id: String,
        name: String,
        /// Urgency label (Emergency, Urgent, Standard, Routine);
        /// anything else classifies as Routine
        priority: String,
        condition: String,
    },
    /// Pop and show the most urgent queued case
    Next,
    /// Show all queued cases in pop order
    List {
        /// Emit the snapshot as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show the number of queued cases
    Size,
    /// Show the rank-to-label table
    Labels,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut engine = Engine::new(CaseLog::new(&config.log_path));
    engine.reload()?;

    match cli.command {
        Command::Add {
            patient_id,
            name,
            priority,
            condition,
        } => cmd_add(&mut engine, patient_id, name, &priority, condition),
        Command::Next => cmd_next(&mut engine),
        Command::List { json } => cmd_list(&engine, json),
        Command::Size => {
            println!("{}", engine.len());
            Ok(())
        }
        Command::Labels => {
            for rank in 1..=4u8 {
                println!("{rank}  {}", Priority::label_for_rank(rank));
            }
            Ok(())
        }
    }
}

fn cmd_add(
    engine: &mut Engine,
    patient_id: String,
    name: String,
    priority: &str,
    condition: String,
) -> anyhow::Result<()> {
    let admission = engine.admit(patient_id, name, priority, condition);
    admission.durable?;

    let rec = &admission.record;
    println!(
        "Admitted: {} ({}, rank {})",
        rec.patient_id,
        rec.priority,
        rec.priority.rank()
    );
    Ok(())
}

fn cmd_next(engine: &mut Engine) -> anyhow::Result<()> {
    match engine.next_case() {
        Ok(rec) => {
            println!("Patient:    {}", rec.patient_id);
            println!("Name:       {}", rec.name);
            println!("Priority:   {} (rank {})", rec.priority, rec.priority.rank());
            println!("Condition:  {}", rec.condition);
            println!("Admitted:   {}", rec.created_at);
            Ok(())
        }
        Err(Error::EmptyQueue) => {
            println!("No cases queued.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_list(engine: &Engine, json: bool) -> anyhow::Result<()> {
    let snapshot = engine.snapshot();

    if json {
        println!("{}", export::to_json_string(&snapshot)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!("No cases queued.");
        return Ok(());
    }

    println!(
        "{:<12}  {:<20}  {:<9}  {:<30}  ADMITTED",
        "PATIENT", "NAME", "PRIORITY", "CONDITION"
    );
    println!("{}", "-".repeat(96));

    for rec in &snapshot {
        let condition = truncate_chars(&rec.condition, 30);
        println!(
            "{:<12}  {:<20}  {:<9}  {:<30}  {}",
            rec.patient_id,
            rec.name,
            rec.priority.label(),
            condition,
            rec.created_at.format("%Y-%m-%d %H:%M")
        );
    }

    println!("\n{} case(s)", snapshot.len());
    Ok(())
}

/// Truncate to at most `max` characters, never splitting a multi-byte
/// character. Conditions are arbitrary unvalidated text.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
