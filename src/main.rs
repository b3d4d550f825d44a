use anyhow::{Context, bail};
use growth_screen::algorithm::growth::{ClassDistribution, aggregate_with_config, classify_roster};
use growth_screen::collections::Roster;
use growth_screen::export::{roster_rows, to_record_batch};
use growth_screen::loader::read_csv_table;
use growth_screen::schema::{SynonymTable, normalize_with_config};
use growth_screen::utils::logging::{
    create_sheet_progress_bar, finish_progress_bar, log_operation_complete, log_operation_start,
};
use growth_screen::{EngineConfig, ReferenceCache};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;

const USAGE: &str = "usage: growth-screen <reference.csv> <class.csv>... [--student NAME]";

struct Args {
    reference: PathBuf,
    sheets: Vec<PathBuf>,
    student: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut paths = Vec::new();
    let mut student = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--student" {
            student = Some(args.next().context("--student needs a name")?);
        } else {
            paths.push(PathBuf::from(arg));
        }
    }
    if paths.len() < 2 {
        bail!(USAGE);
    }
    let reference = paths.remove(0);
    Ok(Args {
        reference,
        sheets: paths,
        student,
    })
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args()?;
    let config = EngineConfig::default();
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.worker_threads)
        .build_global()
        .context("Failed to start worker pool")?;

    let cache = ReferenceCache::new();
    let reference_key = args.reference.display().to_string();
    log_operation_start("Loading reference curves from", &reference_key);
    let store = cache.get_or_load(&reference_key, || read_csv_table(&args.reference))?;

    let synonyms = SynonymTable::default();
    let pb = create_sheet_progress_bar(args.sheets.len() as u64, Some("classifying"));
    let stdout = std::io::stdout();

    for sheet in &args.sheets {
        let start = Instant::now();
        let source = sheet.display().to_string();
        let roster = load_roster(sheet, &synonyms, &config)?;

        let entries = classify_roster(&roster, &store, &config);
        let distribution = ClassDistribution::from_entries(&entries);
        for (status, count) in &distribution.counts {
            if *count > 0 {
                info!("{source}: {status}: {count}");
            }
        }

        let batch = to_record_batch(&roster_rows(&entries))?;
        {
            let mut writer = arrow::json::LineDelimitedWriter::new(stdout.lock());
            writer.write(&batch)?;
            writer.finish()?;
        }

        if let Some(name) = &args.student {
            if let Some(student) = roster.get(name) {
                let series = aggregate_with_config(student, &store, &config);
                writeln!(stdout.lock(), "{}", serde_json::to_string_pretty(&series)?)?;
            }
        }

        log_operation_complete("classified", &source, entries.len(), Some(start.elapsed()));
        pb.inc(1);
    }
    finish_progress_bar(&pb, "done");

    Ok(())
}

fn load_roster(path: &Path, synonyms: &SynonymTable, config: &EngineConfig) -> anyhow::Result<Roster> {
    let raw = read_csv_table(path)?;
    let table = normalize_with_config(&raw, synonyms, config)
        .with_context(|| format!("{} cannot be used", path.display()))?;
    Ok(Roster::from_table(&table)?)
}
