mod error;
mod script;
mod state;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use canvas::doc::encode_polygon_set;
use canvas::session::Outcome;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::error::HostError;
use crate::state::CanvasStore;

#[derive(Parser, Debug)]
#[command(name = "figureboard", about = "Edit and inspect per-record polygon canvases")]
struct Cli {
    /// Canvas store file.
    #[arg(long, env = "FIGUREBOARD_STORE", default_value = "figures.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a pointer script over a record's canvas.
    Edit {
        record: String,
        /// Natural width of the background image.
        #[arg(long)]
        width: u32,
        /// Natural height of the background image.
        #[arg(long)]
        height: u32,
        /// Background image URL.
        #[arg(long)]
        image: Option<String>,
        /// JSON Lines script, or `-` for stdin.
        #[arg(long, default_value = "-")]
        script: String,
    },
    /// Store a polygon-set JSON array for a record.
    Import {
        record: String,
        /// Polygon-set JSON file, or `-` for stdin.
        #[arg(default_value = "-")]
        file: String,
    },
    /// Print a record's stored polygon set.
    Show { record: String },
    /// List stored records.
    List,
}

fn main() -> Result<(), HostError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut store = CanvasStore::load(&cli.store)?;

    match cli.command {
        Command::Edit { record, width, height, image, script } => {
            run_edit(&mut store, &record, width, height, image.as_deref(), &script)
        }
        Command::Import { record, file } => run_import(&mut store, &record, &file),
        Command::Show { record } => run_show(&store, &record),
        Command::List => {
            run_list(&store);
            Ok(())
        }
    }
}

fn run_edit(
    store: &mut CanvasStore,
    record: &str,
    width: u32,
    height: u32,
    image: Option<&str>,
    script_path: &str,
) -> Result<(), HostError> {
    let reader: Box<dyn BufRead> = if script_path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(script_path).map_err(|err| HostError::io(script_path, err))?;
        Box::new(BufReader::new(file))
    };
    let steps = script::parse(reader)?;

    let figures = store.get(record).map(<[_]>::to_vec).unwrap_or_default();
    info!(record, width, height, image, figures = figures.len(), steps = steps.len(), "editing");

    let report = script::run(&steps, f64::from(width), f64::from(height), figures)?;
    println!(
        "created {} discarded {} frames {} cursor {}",
        report.created,
        report.discarded,
        report.frames,
        report.cursor.as_css()
    );

    match report.outcome {
        Outcome::Persist(figures) => {
            let count = figures.len();
            let replaced = store.upsert(record, figures);
            store.save()?;
            info!(record, figures = count, replaced, "canvas persisted");
            println!("persisted {count} figures for {record}");
        }
        Outcome::Discard => {
            info!(record, "canvas discarded");
            println!("discarded changes for {record}");
        }
    }
    Ok(())
}

fn run_import(store: &mut CanvasStore, record: &str, path: &str) -> Result<(), HostError> {
    let json = if path == "-" {
        io::read_to_string(io::stdin()).map_err(|err| HostError::io(path, err))?
    } else {
        fs::read_to_string(path).map_err(|err| HostError::io(path, err))?
    };
    let count = store.import(record, &json)?;
    store.save()?;
    info!(record, figures = count, "polygon set imported");
    println!("imported {count} figures for {record}");
    Ok(())
}

fn run_show(store: &CanvasStore, record: &str) -> Result<(), HostError> {
    let figures = store.get(record).ok_or_else(|| HostError::UnknownRecord(record.to_owned()))?;
    println!("{}", encode_polygon_set(figures)?);
    Ok(())
}

fn run_list(store: &CanvasStore) {
    for entry in store.records() {
        println!("{}\t{}", entry.record_id, entry.canvas.len());
    }
    eprintln!("{} records in {}", store.records().len(), store.path().display());
}
