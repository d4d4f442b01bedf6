//! Dataset Loader Module
//! Supplies the player dataset from a static CSV snapshot or a live query.

use crate::config::SourceConfig;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("No data loaded")]
    NoData,
}

/// Read a CSV file with Polars.
pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::NotFound(path.to_path_buf()));
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    // A frame without columns means there is no dataset at all
    if df.width() == 0 {
        return Err(LoaderError::NoData);
    }

    Ok(df)
}

/// Where a render pass gets its dataset from.
pub trait DataSource {
    /// Short human-readable description for status lines and logs.
    fn describe(&self) -> String;

    /// Whether every pass fetches a fresh snapshot.
    fn is_live(&self) -> bool;

    /// Dataset snapshot for one render pass.
    fn snapshot(&mut self) -> Result<DataFrame, LoaderError>;
}

/// CSV file loaded once and reused for every pass.
pub struct StaticSource {
    path: PathBuf,
    df: Option<DataFrame>,
}

impl StaticSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            df: None,
        }
    }
}

impl DataSource for StaticSource {
    fn describe(&self) -> String {
        format!("static: {}", self.path.display())
    }

    fn is_live(&self) -> bool {
        false
    }

    fn snapshot(&mut self) -> Result<DataFrame, LoaderError> {
        if let Some(df) = &self.df {
            return Ok(df.clone());
        }

        let df = read_csv(&self.path)?;
        log::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            self.path.display()
        );
        self.df = Some(df.clone());
        Ok(df)
    }
}

/// Query collaborator behind a live source.
pub trait LiveQuery {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<DataFrame, LoaderError>;
}

/// Live query reading a CSV export that another process keeps current.
pub struct CsvExportQuery {
    path: PathBuf,
}

impl CsvExportQuery {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LiveQuery for CsvExportQuery {
    fn describe(&self) -> String {
        format!("csv export {}", self.path.display())
    }

    fn fetch(&self) -> Result<DataFrame, LoaderError> {
        read_csv(&self.path)
    }
}

/// Source that re-runs its query on every render pass.
pub struct LiveSource {
    query: Box<dyn LiveQuery>,
}

impl LiveSource {
    pub fn new(query: Box<dyn LiveQuery>) -> Self {
        Self { query }
    }
}

impl DataSource for LiveSource {
    fn describe(&self) -> String {
        format!("live: {}", self.query.describe())
    }

    fn is_live(&self) -> bool {
        true
    }

    fn snapshot(&mut self) -> Result<DataFrame, LoaderError> {
        let df = self.query.fetch()?;
        log::info!(
            "Fetched fresh snapshot ({} rows) from {}",
            df.height(),
            self.query.describe()
        );
        Ok(df)
    }
}

/// Build the data source selected in the configuration.
pub fn source_from_config(config: &SourceConfig) -> Box<dyn DataSource> {
    match config {
        SourceConfig::Static { path } => Box::new(StaticSource::new(path)),
        SourceConfig::Live { path, .. } => {
            Box::new(LiveSource::new(Box::new(CsvExportQuery::new(path))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingQuery {
        calls: std::rc::Rc<Cell<usize>>,
    }

    impl LiveQuery for CountingQuery {
        fn describe(&self) -> String {
            "counting".to_string()
        }

        fn fetch(&self) -> Result<DataFrame, LoaderError> {
            self.calls.set(self.calls.get() + 1);
            let rows = self.calls.get() as i64;
            Ok(DataFrame::new(vec![Column::new("Age".into(), vec![rows])])?)
        }
    }

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "player_report_{}_{}.csv",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_reported() {
        let mut source = StaticSource::new("/definitely/not/here.csv");
        assert!(matches!(source.snapshot(), Err(LoaderError::NotFound(_))));
    }

    #[test]
    fn test_static_source_loads_once() {
        let path = temp_csv("static", "Age,Current club\n20,Ajax\n22,Inter\n");
        let mut source = StaticSource::new(&path);

        let first = source.snapshot().unwrap();
        assert_eq!(first.height(), 2);

        // Later passes reuse the snapshot even if the file changes
        std::fs::write(&path, "Age,Current club\n20,Ajax\n").unwrap();
        let second = source.snapshot().unwrap();
        assert_eq!(second.height(), 2);
        assert!(!source.is_live());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_live_source_fetches_every_pass() {
        let calls = std::rc::Rc::new(Cell::new(0));
        let mut source = LiveSource::new(Box::new(CountingQuery {
            calls: calls.clone(),
        }));

        source.snapshot().unwrap();
        source.snapshot().unwrap();
        assert_eq!(calls.get(), 2);
        assert!(source.is_live());
        assert_eq!(source.describe(), "live: counting");
    }

    #[test]
    fn test_live_csv_export_sees_updates() {
        let path = temp_csv("live", "Age\n20\n");
        let mut source = source_from_config(&SourceConfig::Live {
            path: path.clone(),
            refresh_secs: None,
        });
        assert_eq!(source.snapshot().unwrap().height(), 1);

        std::fs::write(&path, "Age\n20\n21\n").unwrap();
        assert_eq!(source.snapshot().unwrap().height(), 2);

        std::fs::remove_file(&path).ok();
    }
}
