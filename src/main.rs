use std::path::PathBuf;

use apriori::{Dataset, MiningOptions, Session};
use clap::Parser;

/// Mine frequent itemsets and association rules from a dataset file (FILE)
#[derive(Debug, Parser)]
#[command(version)]
struct Argv {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// read mining options from a JSON file (CONFIG)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
    /// minimum support in [0, 1]
    #[arg(short = 's', long = "support")]
    min_support: Option<f64>,
    /// minimum confidence in [0, 1]
    #[arg(short = 'c', long = "confidence")]
    min_confidence: Option<f64>,
    /// mine only the named attribute (repeatable)
    #[arg(short, long = "attribute", value_name = "NAME")]
    attributes: Vec<String>,
    /// pretreat an attribute, e.g. age=/10 (repeatable)
    #[arg(short, long = "pretreat", value_name = "NAME=OPTION")]
    pretreat: Vec<String>,
    /// output every large itemset of every level
    #[arg(long)]
    levels: bool,
    /// output the selected and pretreated records
    #[arg(long)]
    table: bool,
    #[arg(required = true, value_name = "FILE")]
    dataset: PathBuf,
}

fn run(argv: &Argv) -> apriori::Result<()> {
    let ds = Dataset::read_file(&argv.dataset)?;
    let mut options = match &argv.config {
        Some(path) => MiningOptions::from_file(path)?,
        None => MiningOptions::default(),
    };
    if let Some(s) = argv.min_support {
        options.min_support = s;
    }
    if let Some(c) = argv.min_confidence {
        options.min_confidence = c;
    }
    if !argv.attributes.is_empty() {
        options.select_by_name(&ds, &argv.attributes)?;
    }
    for s in &argv.pretreat {
        match s.split_once('=') {
            Some((name, option)) => options.pretreat_by_name(&ds, name, option)?,
            None => log::warn!("ignoring pretreatment without '=': {s}"),
        }
    }
    let mut session = Session::with_options(ds, options)?;
    if argv.table {
        print!("{}", session.table()?);
        println!();
    }
    session.run()?;
    print!("{}", session.information());
    print!("{}", session.options_report());
    if session.options().pretreat.is_some() {
        print!("{}", session.pretreatment_report());
    }
    print!("{}", session.level_counts());
    if argv.levels {
        print!("{}", session.levels_report());
    }
    print!("{}", session.rules_report());
    Ok(())
}

fn main() {
    let argv = Argv::parse();
    let level = match argv.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
    log::info!("argv: {:?}", argv);
    if let Err(e) = run(&argv) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
