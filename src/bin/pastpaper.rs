//! CLI binary for pastpaper-extract.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use pastpaper_extract::{
    extract_to_file, load_exam, ArtifactOrigin, CatalogEntry, ExamModel, ExtractionConfig,
    StarterStrategy,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Summary of Option D from a paper and its mark scheme
  pastpaper may-2019-paper2.txt may-2019-paper2-ms.txt

  # Full structured model as JSON
  pastpaper --json paper.txt scheme.txt > exam.json

  # Write the model to a file (atomic write)
  pastpaper paper.txt scheme.txt -o out/may-2019.json

  # Another option section, questions numbered from 1
  pastpaper --section-start "option c" --section-end "end of option c" \
            --min-question 1 paper.txt scheme.txt

  # Sources can be URLs
  pastpaper https://example.org/p2.txt https://example.org/p2-ms.txt

  # Scaffold-only starter code
  pastpaper --starter scaffold paper.txt scheme.txt

INPUT:
  Both documents must be plain UTF-8 text extracted from the original PDFs.
  PDF files are rejected.

ENVIRONMENT VARIABLES:
  Every flag can be set with a PASTPAPER_* variable, e.g.
  PASTPAPER_SECTION_START, PASTPAPER_MIN_QUESTION, PASTPAPER_STARTER.
  RUST_LOG overrides the log filter chosen by -v / -q.
"#;

/// Extract structured questions, mark schemes and code from exam texts.
#[derive(Parser, Debug)]
#[command(
    name = "pastpaper",
    version,
    about = "Extract structured questions, mark schemes and code from exam texts",
    long_about = "Split the text of an exam question paper and its mark scheme into numbered \
questions and lettered sub-questions, join each sub-question with its mark-scheme answer and \
marks, classify coding tasks, generate starter code, and extract the code, UML boxes and tables \
the questions refer to.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Question paper text: local file path or HTTP/HTTPS URL.
    question_paper: String,

    /// Mark scheme text: local file path or HTTP/HTTPS URL.
    mark_scheme: String,

    /// Catalog id stored in the model (default: question paper file stem).
    #[arg(long, env = "PASTPAPER_ID")]
    id: Option<String>,

    /// Human-readable label stored in the model (default: the id).
    #[arg(long, env = "PASTPAPER_LABEL")]
    label: Option<String>,

    /// Paper level tag: HL or SL (default: inferred from id and label).
    #[arg(long, env = "PASTPAPER_LEVEL")]
    level: Option<String>,

    /// Marker that opens the target section (case-insensitive).
    #[arg(long, env = "PASTPAPER_SECTION_START", default_value = "option d")]
    section_start: String,

    /// Marker that closes the target section (case-insensitive).
    #[arg(long, env = "PASTPAPER_SECTION_END", default_value = "end of option d")]
    section_end: String,

    /// Lowest question number kept.
    #[arg(long, env = "PASTPAPER_MIN_QUESTION", default_value_t = 10)]
    min_question: u32,

    /// Starter-code strategy.
    #[arg(long, env = "PASTPAPER_STARTER", value_enum, default_value = "context")]
    starter: StarterArg,

    /// Lines of code context on each side of a matched method name.
    #[arg(long, env = "PASTPAPER_CONTEXT_RADIUS", default_value_t = 3)]
    context_radius: usize,

    /// HTTP fetch timeout in seconds.
    #[arg(long, env = "PASTPAPER_FETCH_TIMEOUT", default_value_t = 30)]
    fetch_timeout: u64,

    /// Write the JSON model to this file instead of stdout.
    #[arg(short, long, env = "PASTPAPER_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the full model as JSON instead of a text summary.
    #[arg(long, env = "PASTPAPER_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PASTPAPER_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PASTPAPER_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum StarterArg {
    Scaffold,
    Context,
}

impl From<StarterArg> for StarterStrategy {
    fn from(v: StarterArg) -> Self {
        match v {
            StarterArg::Scaffold => StarterStrategy::Scaffold,
            StarterArg::Context => StarterStrategy::ContextAware,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;
    let entry = build_entry(&cli);

    // ── Run extraction ───────────────────────────────────────────────────
    if let Some(ref output_path) = cli.output {
        let stats = extract_to_file(&entry, output_path, &config)
            .await
            .context("Extraction failed")?;

        if !cli.quiet {
            eprintln!(
                "{}  {} questions  {} sub-questions ({} coding)  →  {}",
                green("✔"),
                stats.questions_retained,
                stats.sub_questions,
                stats.coding_sub_questions,
                bold(&output_path.display().to_string()),
            );
        }
    } else {
        let model = load_exam(&entry, &config)
            .await
            .context("Extraction failed")?;

        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if cli.json {
            let json =
                serde_json::to_string_pretty(&model).context("Failed to serialise model")?;
            writeln!(handle, "{json}").context("Failed to write to stdout")?;
        } else {
            handle
                .write_all(render_summary(&model).as_bytes())
                .context("Failed to write to stdout")?;
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "Extracted {}/{} questions, {} mark-scheme matches",
                model.stats.questions_retained,
                model.stats.questions_found,
                model.stats.mark_scheme_matches
            );
        }
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
fn build_config(cli: &Cli) -> Result<ExtractionConfig> {
    ExtractionConfig::builder()
        .section_start(cli.section_start.clone())
        .section_end(cli.section_end.clone())
        .min_question_number(cli.min_question)
        .starter_strategy(cli.starter.clone().into())
        .context_radius(cli.context_radius)
        .fetch_timeout_secs(cli.fetch_timeout)
        .build()
        .context("Invalid configuration")
}

fn build_entry(cli: &Cli) -> CatalogEntry {
    let id = cli.id.clone().unwrap_or_else(|| {
        Path::new(&cli.question_paper)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "exam".to_string())
    });
    CatalogEntry {
        label: cli.label.clone().unwrap_or_else(|| id.clone()),
        id,
        question_source: cli.question_paper.clone(),
        mark_scheme_source: cli.mark_scheme.clone(),
        level: cli.level.clone(),
    }
}

/// Human-readable overview of a model.
fn render_summary(model: &ExamModel) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}\n",
        bold(&model.meta.label),
        dim(&format!("[{}]", model.meta.level))
    ));

    let code = &model.code;
    let origin = code
        .artifacts
        .first()
        .map(|a| match a.origin {
            ArtifactOrigin::Verbatim => "verbatim classes",
            ArtifactOrigin::UmlSkeleton => "UML skeletons",
            ArtifactOrigin::RawFallback => "raw code",
            ArtifactOrigin::Placeholder => "no code",
        })
        .unwrap_or("no code");
    out.push_str(&format!(
        "{} {} artefacts ({}), {} UML boxes, {} tables{}\n\n",
        cyan("◆"),
        code.artifacts.len(),
        origin,
        code.uml_diagrams.len(),
        code.tables.len(),
        if code.tree.is_some() { ", binary tree" } else { "" }
    ));

    for question in &model.questions {
        out.push_str(&format!("{}\n", bold(&format!("Question {}", question.number))));
        for sub in &question.sub_questions {
            let marks = sub
                .marks
                .map(|m| format!("[{m}]"))
                .unwrap_or_else(|| "[-]".to_string());
            let first_line = sub.text.lines().next().unwrap_or("");
            out.push_str(&format!(
                "  ({}) {:<5} {}{}\n",
                sub.letter,
                marks,
                if sub.is_coding { green("code ") } else { dim("prose") },
                dim(&format!("  {first_line}"))
            ));
        }
    }
    out
}
