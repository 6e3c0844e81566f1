// core/src/bin/runplan.rs: ikke-interaktiv kommandolinje over kjernen

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use runplan_core::cli::{
    render_adjustments, render_comparison, render_estimate, render_history, render_plan_report,
    render_prediction,
};
use runplan_core::comparison::{compare, ActualSession, WatchRecord};
use runplan_core::config::{load_config, EstimatorConfig};
use runplan_core::training_log::DEFAULT_LOG_FILE;
use runplan_core::units::parse_clock;
use runplan_core::{
    aggregate, load_record_file, template, PlanStore, SessionModel, TrainingLogStore, WeekLog,
};

#[derive(Parser)]
#[command(name = "runplan", about = "Run/walk plan estimates and statistics", version)]
struct Cli {
    /// Estimatorkonfig (JSON). Standardkurve brukes hvis utelatt.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Mappe for lagrede planer
    #[arg(long, global = true, default_value = "custom_plans")]
    dir: PathBuf,

    /// Treningslogg (JSON)
    #[arg(long, global = true, default_value = DEFAULT_LOG_FILE)]
    log: PathBuf,

    /// Skriv Prometheus-tellere for denne kjøringen til slutt
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimer distanse for én økt
    Estimate {
        /// Total løpetid (min)
        #[arg(long)]
        run: f64,
        /// Total gangtid (min)
        #[arg(long, default_value = "0")]
        walk: f64,
        #[arg(long, default_value = "1")]
        sets: u32,
    },
    /// Vis plan med ukes- og progresjonstall
    Show {
        /// Planfil (JSON)
        plan: PathBuf,
    },
    /// Lagre den innebygde 7-ukers 5K-planen
    Template {
        #[arg(long)]
        name: Option<String>,
        /// Skriv til denne fila i stedet for plan-mappen
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Sammenlign plan mot klokkedata (JSON-liste fra skjermbilde-uttrekket)
    Compare { plan: PathBuf, actuals: PathBuf },
    /// List lagrede planer
    List,
    /// Flytt en lagret plan til deleted_plans/
    Delete { name: String },
    /// Logg en treningsuke (standard: neste ulogede uke)
    Log {
        #[arg(long)]
        week: Option<u32>,
        /// Snittempo, "7:30" eller 7.5 (min/km)
        #[arg(long, value_parser = parse_pace_arg)]
        pace: Option<f64>,
        /// Lengste løp (km)
        #[arg(long)]
        distance: Option<f64>,
        /// 1 = svært sliten, 10 = helt restituert
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        recovery: u8,
        /// Hoppet over større økter denne uka
        #[arg(long)]
        skipped: bool,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Forslag til justering av kommende uker
    Adjust,
    /// 5K-prognose fra siste uke med tempo
    Predict,
    /// Vis loggede uker
    History,
    /// Eksporter loggen til JSON
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Slett treningsloggen
    Reset {
        /// Bekreft sletting
        #[arg(long)]
        yes: bool,
    },
}

fn parse_pace_arg(raw: &str) -> Result<f64, String> {
    parse_clock(raw)
        .or_else(|| raw.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| format!("ugyldig tempo `{raw}` (bruk M:SS eller minutter)"))
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn estimator_config(path: Option<&Path>) -> Result<EstimatorConfig> {
    match path {
        Some(p) => load_config(p).with_context(|| format!("konfig {}", p.display())),
        None => Ok(EstimatorConfig::default()),
    }
}

fn load_actuals(path: &Path) -> Result<Vec<ActualSession>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("leser {}", path.display()))?;
    let records: Vec<WatchRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("ugyldig klokkedata i {}", path.display()))?;
    Ok(records.iter().map(ActualSession::from).collect())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let estimator = estimator_config(cli.config.as_deref())?.build()?;
    let store = PlanStore::new(&cli.dir);
    let logs = TrainingLogStore::new(&cli.log);

    match cli.command {
        Command::Estimate { run, walk, sets } => {
            let session = SessionModel::new(1, 1, run, walk, sets);
            let est = estimator.estimate(&session)?;
            print!("{}", render_estimate(&session, &est));
        }
        Command::Show { plan } => {
            let record = load_record_file(&plan)
                .with_context(|| format!("kunne ikke laste {}", plan.display()))?;
            let pairs = estimator.estimate_plan(&record)?;
            let stats = aggregate(&pairs)?;
            let results: Vec<_> = pairs.iter().map(|(_, e)| *e).collect();
            print!("{}", render_plan_report(&record, &results, &stats));
        }
        Command::Template { name, out } => {
            let mut record = template::five_k_plan();
            if let Some(n) = name {
                record.name = n;
            }
            let path = match out {
                Some(p) => {
                    runplan_core::save_record_file(&record, &p)?;
                    p
                }
                None => store.save(&record)?,
            };
            println!("Lagret `{}` til {}", record.name, path.display());
        }
        Command::Compare { plan, actuals } => {
            let record = load_record_file(&plan)
                .with_context(|| format!("kunne ikke laste {}", plan.display()))?;
            let pairs = estimator.estimate_plan(&record)?;
            let report = compare(&pairs, &load_actuals(&actuals)?);
            print!("{}", render_comparison(&report));
        }
        Command::List => {
            for name in store.list()? {
                println!("{name}");
            }
        }
        Command::Delete { name } => {
            let dest = store.delete(&name)?;
            println!("Plan flyttet til {}", dest.display());
        }
        Command::Log { week, pace, distance, recovery, skipped, comments } => {
            let week = match week {
                Some(w) => w,
                None => logs
                    .load()?
                    .next_week()
                    .context("alle ukene i planen er allerede logget")?,
            };
            let entry = WeekLog {
                pace,
                distance,
                recovery: Some(recovery),
                skipped,
                comments,
                ..WeekLog::new()
            };
            logs.log_week(week, entry)?;
            println!("✅ Uke {week} logget");
        }
        Command::Adjust => {
            print!("{}", render_adjustments(&logs.load()?.adjustments()));
        }
        Command::Predict => {
            print!("{}", render_prediction(&logs.load()?));
        }
        Command::History => {
            print!("{}", render_history(&logs.load()?));
        }
        Command::Export { out } => {
            let dest = logs.export(out.as_deref())?;
            println!("✅ Logg eksportert til {}", dest.display());
        }
        Command::Reset { yes } => {
            if !yes {
                println!("Avbrutt: bruk --yes for å slette {}", logs.path().display());
            } else if logs.reset()? {
                println!("✅ Treningsloggen er slettet");
            } else {
                println!("ℹ️ Fant ingen logg å slette");
            }
        }
    }

    // tellerne lever bare i denne prosessen
    if cli.metrics {
        print!("{}", runplan_core::metrics::gather_text()?);
    }
    Ok(())
}
