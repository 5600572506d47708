//! Route record ingestion.
//!
//! Reads a routing-table dump line by line and extracts `address/prefix`
//! pairs by matching each full line against a regular expression with two
//! capture groups. Lines that do not match are skipped; lines that match
//! but carry an unparseable address abort the run.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{Address, Cidr};
use crate::output::OutputSink;

/// Default line pattern for IPv4 route dumps.
pub const DEFAULT_IPV4_PATTERN: &str = r"[^0-9]*([0-9\.]+)/([0-9]+).*";
/// Default line pattern for IPv6 route dumps.
pub const DEFAULT_IPV6_PATTERN: &str = r"[^0-9a-fA-F\:]*([0-9a-fA-F\:\.]+)/([0-9]+).*";

lazy_static! {
    static ref DEFAULT_IPV4_REGEX: Regex =
        compile_line_pattern(DEFAULT_IPV4_PATTERN).expect("Invalid default IPv4 pattern?");
    static ref DEFAULT_IPV6_REGEX: Regex =
        compile_line_pattern(DEFAULT_IPV6_PATTERN).expect("Invalid default IPv6 pattern?");
}

/// Compile a line pattern, anchored so the full line must match.
pub fn compile_line_pattern(pattern: &str) -> Result<Regex, Box<dyn Error>> {
    let regex = Regex::new(&format!("^(?:{pattern})$"))
        .map_err(|e| format!("Invalid line pattern '{pattern}': {e}"))?;
    Ok(regex)
}

/// The built-in full-line pattern for an address family.
pub fn default_line_pattern<A: Address>() -> &'static Regex {
    match A::MAX_LENGTH {
        32 => &DEFAULT_IPV4_REGEX,
        _ => &DEFAULT_IPV6_REGEX,
    }
}

/// Read a file and emit one [`Cidr`] per successfully matched and parsed
/// line. Returns the number of records emitted.
pub fn read_routes<A: Address>(
    path: &Path,
    pattern: &Regex,
    sink: &mut dyn OutputSink<A>,
) -> Result<usize, Box<dyn Error>> {
    let file = File::open(path).map_err(|e| format!("Cannot read file {}: {e}", path.display()))?;

    let mut matched = 0;
    for line in BufReader::new(file).lines() {
        let line = line?;
        let Some(captures) = pattern.captures(&line) else {
            log::trace!("no match, skipping line: {line}");
            continue;
        };
        // A custom pattern with fewer than two captures matches nothing
        // useful; such lines are skipped like non-matching ones.
        if let (Some(addr), Some(prefix)) = (captures.get(1), captures.get(2)) {
            let addr = A::from_text(addr.as_str())?;
            let prefix = prefix
                .as_str()
                .parse::<u8>()
                .map_err(|_| format!("Invalid prefix length '{}'", prefix.as_str()))?;
            let block = Cidr::new(addr, prefix)?;
            log::debug!("matched {block} in line: {line}");
            sink.emit(&block);
            matched += 1;
        }
    }

    if matched == 0 {
        log::warn!("no route records matched in {}", path.display());
    }
    log::info!("read {matched} route records from {}", path.display());
    Ok(matched)
}
