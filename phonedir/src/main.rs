mod logger;

use clap::{Parser, Subcommand};
use directory::command::executor::{CommandExecutor, CommandOutput};
use directory::command::parser::parse_command;
use directory::config::DirectoryConfig;
use directory::directory::{Directory, ImportReport};
use directory::persist::file_store::FsRecordStore;
use directory::persist::{load_directory, save_directory};
use directory::record::{Record, sample_records};
use directory::stats::{SlotView, TableStats};
use log::warn;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "phonedir")]
#[command(about = "Phone directory on open-addressed hash tables")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[arg(short, long)]
    table_size: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    Exec { command: String },
    Shell,
    InitData,
}

struct Session {
    directory: Directory,
    store: FsRecordStore,
    executor: CommandExecutor,
}

impl Session {
    fn open(config: &DirectoryConfig) -> anyhow::Result<Self> {
        let store = FsRecordStore::new(&config.data_dir)?;
        let (directory, report) = load_directory(&store, config.table_size)?;
        if !report.failed.is_empty() {
            warn!(
                "{} stored record(s) could not be loaded",
                report.failed.len()
            );
        }
        Ok(Self {
            directory,
            store,
            executor: CommandExecutor::new(),
        })
    }

    fn run(&mut self, line: &str) -> anyhow::Result<CommandOutput> {
        let command = parse_command(line)?;
        self.executor
            .execute(command, &mut self.directory, &mut self.store)
    }

    fn save(&mut self) -> anyhow::Result<()> {
        save_directory(&mut self.store, &self.directory)
    }
}

fn main() -> anyhow::Result<()> {
    logger::initialize_logger();
    let cli = Cli::parse();

    let mut config = DirectoryConfig::default().with_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(size) = cli.table_size {
        config.table_size = size;
    }
    config.validate()?;

    match cli.command {
        Some(Commands::Exec { command }) => {
            execute_command(&command, &config)?;
        }
        Some(Commands::Shell) => {
            start_interactive_shell(&config)?;
        }
        Some(Commands::InitData) => {
            initialize_sample_data(&config)?;
        }
        None => {
            start_interactive_shell(&config)?;
        }
    }

    Ok(())
}

fn execute_command(line: &str, config: &DirectoryConfig) -> anyhow::Result<()> {
    let mut session = Session::open(config)?;
    let mutates = parse_command(line)?.is_mutation();

    let output = session.run(line)?;
    display_output(&output);

    if mutates {
        session.save()?;
    }
    Ok(())
}

fn start_interactive_shell(config: &DirectoryConfig) -> anyhow::Result<()> {
    println!("Phone Directory Shell");
    println!("Type 'help' for help, 'exit' or 'quit' to quit");
    println!(
        "Data directory: {} (table size {})\n",
        config.data_dir.display(),
        config.table_size
    );

    let mut session = Session::open(config)?;
    println!("{} record(s) loaded\n", session.directory.len());

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("phonedir> ");
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                rl.add_history_entry(line)?;

                match line.to_lowercase().as_str() {
                    "exit" | "quit" => {
                        break;
                    }
                    "help" => {
                        print_help();
                    }
                    "cls" => {
                        clear_terminal();
                    }
                    _ => match session.run(line) {
                        Ok(output) => display_output(&output),
                        Err(e) => println!("Error: {}", e),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    session.save()?;
    println!("Saved {} record(s). Goodbye!", session.directory.len());
    Ok(())
}

fn initialize_sample_data(config: &DirectoryConfig) -> anyhow::Result<()> {
    println!("Initializing sample data in {}...", config.data_dir.display());

    let mut store = FsRecordStore::new(&config.data_dir)?;
    let mut directory = Directory::new(config.table_size)?;
    let report = directory.import(sample_records());
    save_directory(&mut store, &directory)?;

    display_import("Loaded", &report);
    println!("Sample data initialized successfully!");

    println!("\nTry these commands:");
    println!("  search user alice_smith");
    println!("  search phone 555-0101");
    println!("  table user");
    println!("  stats");

    Ok(())
}

fn display_output(output: &CommandOutput) {
    match output {
        CommandOutput::Inserted { record, report } => {
            println!("✓ Inserted {}", record.username);
            println!(
                "  username hash: {} -> index {} ({} probe(s))",
                report.username.hash, report.username.index, report.username.probes
            );
            println!(
                "  phone hash:    {} -> index {} ({} probe(s))",
                report.phone.hash, report.phone.index, report.phone.probes
            );
        }
        CommandOutput::Found {
            kind,
            record,
            index,
            hash,
            probes,
        } => {
            display_records(std::slice::from_ref(record));
            println!(
                "\n{} table: hash {} -> index {}, search length {}",
                kind, hash, index, probes
            );
        }
        CommandOutput::Deleted(report) => {
            println!(
                "✓ Deleted {} ({} slot(s) tombstoned)",
                report.record.username, report.tombstoned
            );
        }
        CommandOutput::Records(records) => display_records(records),
        CommandOutput::Stats(stats) => {
            display_stats(&stats.username);
            println!();
            display_stats(&stats.phone);
        }
        CommandOutput::Table { kind, slots } => display_slots(&kind.to_string(), slots),
        CommandOutput::Cleared => println!("✓ Directory cleared"),
        CommandOutput::Saved { count } => println!("✓ Saved {} record(s)", count),
        CommandOutput::Loaded(report) => display_import("Loaded", report),
        CommandOutput::Imported(report) => display_import("Imported", report),
        CommandOutput::Exported { path, count } => {
            println!("✓ Exported {} record(s) to {}", count, path)
        }
    }
}

fn display_import(verb: &str, report: &ImportReport) {
    println!(
        "✓ {} {} record(s), {} failed",
        verb,
        report.inserted,
        report.failed.len()
    );
    for (record, err) in &report.failed {
        println!("  ✗ {}: {}", record.username, err);
    }
}

fn display_stats(stats: &TableStats) {
    println!("{} table", stats.key_kind);
    println!("  size:            {}", stats.size);
    println!("  occupied:        {}", stats.occupied);
    println!("  empty:           {}", stats.empty);
    println!("  deleted:         {}", stats.tombstoned);
    println!("  load factor:     {:.1}%", stats.load_factor);
    println!("  average probes:  {:.2}", stats.average_probes);
    println!("  collision rate:  {:.1}%", stats.collision_rate * 100.0);
}

fn display_records(records: &[Record]) {
    if records.is_empty() {
        println!("(no records)");
        return;
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![
                (i + 1).to_string(),
                r.username.clone(),
                r.phone_number.clone(),
                r.address.clone(),
            ]
        })
        .collect();
    print_grid(&["No.", "Username", "Phone Number", "Address"], &rows);
    println!("\n({} records)", records.len());
}

fn display_slots(kind: &str, slots: &[SlotView]) {
    let rows: Vec<Vec<String>> = slots
        .iter()
        .map(|slot| {
            vec![
                slot.index.to_string(),
                slot.status.to_string(),
                slot.key.clone().unwrap_or_else(|| "-".to_string()),
                slot.hash
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_grid(&["Index", "Status", kind, "Hash"], &rows);
}

fn print_grid(headers: &[&str], rows: &[Vec<String>]) {
    let mut column_widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();

    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            column_widths[i] = column_widths[i].max(cell.chars().count());
        }
    }

    let padded_headers: Vec<String> = headers
        .iter()
        .zip(&column_widths)
        .map(|(header, &width)| format!("{:<width$}", header, width = width))
        .collect();
    println!("{}", padded_headers.join(" | "));

    let separator: Vec<String> = column_widths
        .iter()
        .map(|&width| "-".repeat(width))
        .collect();
    println!("{}", separator.join("-|-"));

    for row in rows {
        let padded_row: Vec<String> = row
            .iter()
            .zip(&column_widths)
            .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", padded_row.join(" | "));
    }
}

fn clear_terminal() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("Phone Directory Help:");
    println!("---------------------");
    println!();
    println!("  Directory Commands:");
    println!("    insert <username> <phone> [address]  - Add a record");
    println!("    search user|phone <key>              - Look up a record");
    println!("    delete user|phone <key>              - Remove a record");
    println!("    list                                 - Show all records");
    println!("    table user|phone                     - Show slot-by-slot table");
    println!("    stats                                - Show table statistics");
    println!("    clear                                - Remove all records");
    println!("    save | load                          - Write or reread the snapshot");
    println!("    import <path> | export <path>        - Bulk records (.json or lines)");
    println!("    sample                               - Replace contents with sample data");
    println!();
    println!("  Quote values containing spaces with single quotes.");
    println!();
    println!("  Shell Commands:");
    println!("    help    - Show this help");
    println!("    cls     - Clear the terminal screen");
    println!("    exit    - Exit the shell");
    println!("    quit    - Exit the shell");
}
