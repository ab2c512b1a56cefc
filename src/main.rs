use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use eyre::{Result, WrapErr};
use marksheet::config::Config;
use marksheet::display;
use marksheet::loaders::{FileLoader, Loader, load_or_empty};
use marksheet::model::{Extremum, FieldUpdate, RecordStore, SortKey, StudentId, StudentRecord};
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Use FILE instead of marksheet.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Read and write student records in FILE
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Save even if malformed records in the data file would be lost
    #[arg(long)]
    force: bool,
    /// Set verbosity level
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all students
    List {
        #[arg(short, long, value_enum)]
        sort: Option<SortField>,
        /// Highest first
        #[arg(short, long)]
        descending: bool,
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Show the student with the given id or full name
    Show { query: String },
    /// Show the student with the highest percentage
    Top,
    /// Show the student with the lowest percentage
    Bottom,
    /// Show the class average percentage
    Average,
    /// Add a new student
    Add {
        id: u32,
        name: String,
        cw1: u32,
        cw2: u32,
        cw3: u32,
        exam: u32,
    },
    /// Delete the student with the given id or full name
    Remove { query: String },
    /// Change one field of a student record
    Update {
        query: String,
        #[command(subcommand)]
        field: Field,
    },
}

#[derive(Debug, Subcommand)]
enum Field {
    /// Replace the student's name
    Name {
        name: String,
    },
    /// Set one coursework mark (slot 1 to 3)
    Coursework {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
        slot: u8,
        score: u32,
    },
    /// Set the exam mark
    Exam {
        score: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SortField {
    Name,
    Id,
    Percentage,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Csv,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> SortKey {
        match field {
            SortField::Name => SortKey::Name,
            SortField::Id => SortKey::Id,
            SortField::Percentage => SortKey::Percentage,
        }
    }
}

impl From<Field> for FieldUpdate {
    fn from(field: Field) -> FieldUpdate {
        match field {
            Field::Name { name } => FieldUpdate::Name(name),
            Field::Coursework { slot, score } => FieldUpdate::Coursework {
                slot: usize::from(slot - 1),
                score,
            },
            Field::Exam { score } => FieldUpdate::Exam(score),
        }
    }
}

impl Command {
    fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add { .. } | Command::Remove { .. } | Command::Update { .. }
        )
    }
}

fn warn_about_comma(name: &str) {
    if name.contains(',') {
        eprintln!("warning: names containing a comma cannot be read back from the data file");
    }
}

fn run(command: Command, store: &mut RecordStore, precision: usize) -> Result<()> {
    match command {
        Command::List {
            sort,
            descending,
            format,
        } => {
            let records = match sort {
                Some(field) => store.sorted_by(field.into(), descending),
                None => store.all().iter().collect(),
            };
            match format {
                Format::Table => {
                    print!("{}", display::render_table(&records, precision));
                    println!("{}", display::status_line(&*store));
                }
                Format::Csv => print!("{}", display::render_csv(&records, precision)?),
            }
        }
        Command::Show { query } => {
            let record = store.find(&query)?;
            println!("{}", display::describe(record, precision));
        }
        Command::Top => {
            let record = store.extremum(Extremum::Highest)?;
            println!("Top student: {}", display::describe(record, precision));
        }
        Command::Bottom => {
            let record = store.extremum(Extremum::Lowest)?;
            println!("Lowest: {}", display::describe(record, precision));
        }
        Command::Average => {
            println!(
                "Class average over {} students: {:.2}%",
                store.len(),
                store.class_average()?
            );
        }
        Command::Add {
            id,
            name,
            cw1,
            cw2,
            cw3,
            exam,
        } => {
            warn_about_comma(&name);
            let record = StudentRecord::new(StudentId::new(id)?, &name, [cw1, cw2, cw3], exam)?;
            let added = record.to_string();
            store.add(record)?;
            println!("Added: {added}");
        }
        Command::Remove { query } => {
            let id = store.find(&query)?.id();
            let record = store.remove(id)?;
            println!("Deleted: {record}");
        }
        Command::Update { query, field } => {
            if let Field::Name { name } = &field {
                warn_about_comma(name);
            }
            let id = store.find(&query)?.id();
            let record = store.update(id, field.into())?;
            println!("Updated: {}", display::describe(record, precision));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let config = Config::load(args.config.as_deref())?;
    let loader = FileLoader::new(args.file.unwrap_or(config.storage.file));
    let mutates = args.command.mutates();
    let decoded = if mutates {
        // A missing data file is created by the first save.
        let (decoded, missing) = load_or_empty(&loader)?;
        if let Some(e) = missing {
            eprintln!("warning: {e}, starting with no student records");
        }
        decoded
    } else {
        loader.load()?
    };
    if decoded.skipped > 0 {
        eprintln!(
            "warning: {} malformed records in {} were skipped",
            decoded.skipped,
            loader.path().display()
        );
        if mutates && !args.force {
            decoded
                .ensure_complete()
                .wrap_err("refusing to save, pass --force to drop them")?;
        }
    }
    let mut store = decoded.store;
    run(args.command, &mut store, config.display.precision)?;
    if mutates {
        loader.save(&store)?;
        info!(students = store.len(), "records saved");
    }
    Ok(())
}
