use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use route_compare::models::{Ipv4Address, Ipv6Address};
use route_compare::processing::Kernel;
use route_compare::{
    compare_route_files, compile_line_pattern, DEFAULT_IPV4_PATTERN, DEFAULT_IPV6_PATTERN,
};

/// Perform set operations on collections of IP address ranges, such as
/// routing-table snapshots.
///
/// Addresses are read from both files, one record per line, extracted by a
/// regular expression with two captures: the address and the prefix
/// length. The full line must match; lines that do not match are ignored.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Set operation to perform
    #[arg(value_enum)]
    operation: Operation,

    /// Address family of the records in both files
    #[arg(value_enum)]
    family: Family,

    /// Route file for set A
    file_a: PathBuf,

    /// Route file for set B
    file_b: PathBuf,

    /// Custom line pattern used in lieu of the family default
    pattern: Option<String>,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum Operation {
    /// Subnets either in A or in B
    Union,
    /// Subnets both in A and in B
    Intersect,
    /// Both differences: '+' lines are only in B, '-' lines only in A
    Diff,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
enum Family {
    Ipv4,
    Ipv6,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging();
    let cli = Cli::parse();
    log::info!("#Start main()");

    let kernel = match cli.operation {
        Operation::Union => Kernel::Union,
        Operation::Intersect => Kernel::Intersection,
        Operation::Diff => Kernel::Difference,
    };

    match cli.family {
        Family::Ipv4 => {
            let pattern =
                compile_line_pattern(cli.pattern.as_deref().unwrap_or(DEFAULT_IPV4_PATTERN))?;
            compare_route_files::<Ipv4Address>(&cli.file_a, &cli.file_b, &pattern, kernel)?;
        }
        Family::Ipv6 => {
            let pattern =
                compile_line_pattern(cli.pattern.as_deref().unwrap_or(DEFAULT_IPV6_PATTERN))?;
            compare_route_files::<Ipv6Address>(&cli.file_a, &cli.file_b, &pattern, kernel)?;
        }
    }

    Ok(())
}

/// A log4rs.yml next to the working directory wins; otherwise log to
/// stderr at the level named by LOG_LEVEL (default warn) so stdout stays
/// clean for result blocks.
fn init_logging() {
    if std::path::Path::new("log4rs.yml").exists() {
        log4rs::init_file("log4rs.yml", Default::default()).expect("Error initializing log4rs");
        return;
    }

    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l})} {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .expect("Error building log configuration");
    log4rs::init_config(config).expect("Error initializing log4rs");
}
