use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

use student_roster::group::group_with_order;
use student_roster::{Classifier, Record, Result, RosterError, SchoolsSpec, Store};
use student_roster::{codec, diagnostics, render};

use anyhow::Context;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Student roster: bulk text import and school/track/grade grouping", long_about = None)]
struct Cli {
    /// Flat-file roster (name,grade,track,school). Missing file = empty roster.
    #[arg(long, global = true, env = "ROSTER_STORE", default_value = "roster.csv")]
    store: PathBuf,

    /// School/track table (JSON). Built-in table when omitted.
    #[arg(long, global = true, env = "ROSTER_SCHOOLS")]
    schools: Option<PathBuf>,

    /// Debug logging (ROSTER_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse free text (one student per line) and add new students.
    Import {
        /// Text file to read; stdin when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Add one student.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        grade: String,

        #[arg(long)]
        track: String,

        /// Defaults to the school that owns the track.
        #[arg(long)]
        school: Option<String>,
    },

    /// Rename a student.
    Rename {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Delete a student.
    Remove {
        #[arg(long)]
        name: String,
    },

    /// Delete every student.
    Clear,

    /// Replace the roster with demo data.
    Sample,

    /// Print the roster grouped by school, track and grade.
    Show {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Only students whose name, grade or track contains this text.
        #[arg(long)]
        search: Option<String>,
    },

    /// Write a self-contained HTML report of the grouped roster.
    Report {
        #[arg(short = 'o', long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init(cli.verbose);

    let classifier = load_classifier(cli.schools.as_deref())?;
    let mut store = open_store(&cli.store, classifier)?;

    match cli.cmd {
        Commands::Import { input } => {
            let text = match &input {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("read input file {}", path.display()))?,
                None => std::io::read_to_string(std::io::stdin()).context("read stdin")?,
            };

            let summary = store.import_text(&text);
            save_store(&cli.store, &store)?;

            println!("Added {} student(s).", summary.added.len());
            if summary.duplicates > 0 {
                println!("Already present: {}", summary.duplicates);
            }
            if !summary.rejected.is_empty() {
                println!("Skipped lines:");
                for line in &summary.rejected {
                    println!(" - {}", line);
                }
            }
        }
        Commands::Add {
            name,
            grade,
            track,
            school,
        } => {
            let school =
                school.unwrap_or_else(|| store.classifier().resolve_school(&track, None));
            let added = store.add_one(&name, &grade, &track, &school)?;
            println!(
                "Added {} (grade {}, {}, {})",
                added.name, added.grade, added.track, added.school
            );
            save_store(&cli.store, &store)?;
        }
        Commands::Rename { from, to } => {
            let renamed = store.rename(&from, &to)?;
            println!("Renamed {} -> {}", from.trim(), renamed.name);
            save_store(&cli.store, &store)?;
        }
        Commands::Remove { name } => {
            let removed = store.remove(&name).ok_or_else(|| RosterError::NotFound {
                name: name.trim().to_string(),
            })?;
            println!("Removed {}", removed.name);
            save_store(&cli.store, &store)?;
        }
        Commands::Clear => {
            let n = store.len();
            store.clear();
            save_store(&cli.store, &store)?;
            println!("Removed {} student(s).", n);
        }
        Commands::Sample => {
            store.load_sample();
            save_store(&cli.store, &store)?;
            println!("Loaded {} sample students.", store.len());
        }
        Commands::Show { format, search } => {
            let tree = match search.as_deref() {
                Some(q) => {
                    let hits: Vec<Record> = store.search(q).into_iter().cloned().collect();
                    group_with_order(&hits, store.classifier().grades())
                }
                None => store.tree(),
            };
            match format {
                Format::Text => print!("{}", render::render_text_tree(&tree)),
                Format::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
            }
        }
        Commands::Report { out } => {
            let html = render::render_html_report(&store.tree())?;
            fs::write(&out, html).with_context(|| format!("write report {}", out.display()))?;
            println!("Wrote {}", out.display());
        }
    }

    Ok(())
}

fn load_classifier(path: Option<&Path>) -> Result<Classifier> {
    let Some(path) = path else {
        return Ok(Classifier::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read schools file {}", path.display()))?;
    SchoolsSpec::from_json(&text)?
        .validate_and_build()
        .with_context(|| format!("invalid schools file {}", path.display()))
}

fn open_store(path: &Path, classifier: Classifier) -> Result<Store> {
    let mut store = Store::new(classifier);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "store file missing, starting empty");
        return Ok(store);
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("read store file {}", path.display()))?;
    let rows = codec::decode(&text);
    let decoded = rows.len();
    let added = store.load(rows);
    tracing::debug!(path = %path.display(), decoded, added, "store loaded");
    Ok(store)
}

fn save_store(path: &Path, store: &Store) -> Result<()> {
    let text = codec::encode(store.records())?;
    fs::write(path, text).with_context(|| format!("write store file {}", path.display()))?;
    tracing::debug!(path = %path.display(), records = store.len(), "store saved");
    Ok(())
}
