use std::{fs, io};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

/// Reads a text file into one `String` per line, dropping any `\r` left by CRLF endings.
pub(crate) fn file_to_vec(filename: &Path) -> io::Result<Vec<String>> {
    let file_in = fs::File::open(filename)?;
    let file_reader = BufReader::new(file_in);
    file_reader
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .collect()
}

/// Logs the time spent in one stage and returns the running total, for chaining stage after stage.
pub(crate) fn trace(profile: bool, l_type: &str, l_step: &str, start: Instant, _elapsed: Duration) -> Duration {
    if profile {
        log::info!("{} | Total={:.2?} | {}={:.2?}", l_type, start.elapsed(), l_step, start.elapsed() - _elapsed);
    }
    else {
        log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, start.elapsed(), l_step, start.elapsed() - _elapsed);
    }
    start.elapsed()
}
