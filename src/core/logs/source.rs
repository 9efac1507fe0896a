use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Ordered list of physical log files read as one combined sequence.
///
/// Files are concatenated in declaration order; lines are never re-sorted by time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogSources {
    paths: Vec<PathBuf>,
}

impl LogSources {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// All lines of all sources; missing or unreadable files contribute nothing
    pub fn read_all(&self) -> Vec<String> {
        self.paths.iter().flat_map(|path| read_lines(path)).collect()
    }

    /// Last `n` lines of the combined sequence
    pub fn tail(&self, n: usize) -> Vec<String> {
        let mut lines = self.read_all();
        let start = lines.len().saturating_sub(n);
        lines.drain(..start);
        lines
    }

    /// At most `max` lines of the combined sequence, keeping the most recent ones
    pub fn bounded(&self, max: usize) -> Vec<String> {
        self.tail(max)
    }

    /// Human-readable list of the configured paths, e.g. `a and b`
    pub fn describe(&self) -> String {
        let names: Vec<_> = self
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect();

        match names.split_last() {
            None => "no sources".to_string(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        }
    }
}

/// Read one file as lines with lossy UTF-8 decoding
pub fn read_lines(path: &Path) -> Vec<String> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect(),
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            log::warn!("Cannot read log source {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Last `n` elements of `lines`
pub fn tail<T>(lines: &[T], n: usize) -> &[T] {
    &lines[lines.len().saturating_sub(n)..]
}

/// At most `max` elements of `lines`, keeping the most recent ones
pub fn bounded<T>(lines: &[T], max: usize) -> &[T] {
    tail(lines, max)
}
