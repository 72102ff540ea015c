use super::series::Row;
use crate::error::{PlotError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// A loaded table. Wraps a Polars DataFrame and hands out rows of raw cell
/// text for the series builder.
pub struct DataSource {
    materialized: DataFrame,
    file_path: Option<PathBuf>,
}

impl DataSource {
    /// Load data from a file (CSV or Parquet)
    ///
    /// CSV columns are read as text so that cells reach the series builder
    /// exactly as written.
    pub fn load(path: &Path) -> Result<Self> {
        profiling::scope!("DataSource::load");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PlotError::UnsupportedFormat {
                extension: String::new(),
            })?;

        let df = match extension.to_lowercase().as_str() {
            "parquet" => LazyFrame::scan_parquet(path, Default::default())?.collect()?,
            "csv" => LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(0))
                .finish()?
                .collect()?,
            ext => {
                return Err(PlotError::UnsupportedFormat {
                    extension: ext.to_string(),
                });
            }
        };

        log::info!(
            "loaded {} ({} rows, {} columns)",
            path.display(),
            df.height(),
            df.width()
        );

        Self::from_dataframe(df, Some(path.to_path_buf()))
    }

    pub fn from_dataframe(df: DataFrame, path: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            materialized: df,
            file_path: path,
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.materialized
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn height(&self) -> usize {
        self.materialized.height()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// File name for window titles and log lines
    pub fn display_name(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string())
    }

    /// Every row as column name to cell text. Null cells are left out.
    pub fn rows(&self) -> Result<Vec<Row>> {
        profiling::scope!("DataSource::rows");

        let mut rows = vec![Row::new(); self.materialized.height()];
        for column in self.materialized.get_columns() {
            let name = column.name().to_string();
            let text = column.as_materialized_series().cast(&DataType::String)?;
            for (row, value) in rows.iter_mut().zip(text.str()?.into_iter()) {
                if let Some(value) = value {
                    row.insert(name.clone(), value.to_string());
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::{build_sections, AxisSelection};
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_csv_loading() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "time,height,note").unwrap();
        writeln!(file, "1,2,a").unwrap();
        writeln!(file, "2,4,b").unwrap();
        writeln!(file, "3,8,c").unwrap();
        file.flush().unwrap();

        let ds = DataSource::load(file.path()).unwrap();
        assert_eq!(ds.height(), 3);
        assert_eq!(ds.column_names(), vec!["time", "height", "note"]);

        let rows = ds.rows().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1]["height"], "4");
        assert_eq!(rows[2]["note"], "c");
    }

    #[test]
    fn test_rows_feed_series_builder() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y").unwrap();
        writeln!(file, "1,2").unwrap();
        writeln!(file, "2,abc").unwrap();
        writeln!(file, "3,6").unwrap();
        writeln!(file, "4,8").unwrap();
        file.flush().unwrap();

        let ds = DataSource::load(file.path()).unwrap();
        let rows = ds.rows().unwrap();
        let series = build_sections(&rows, &AxisSelection::new("x", "y")).unwrap();
        assert_eq!(series.sections_x(), &[vec![1.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn test_unsupported_format() {
        let file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = DataSource::load(file.path()).err().unwrap();
        assert!(matches!(err, PlotError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_from_dataframe_numeric_columns() {
        let df = df!("a" => [1.5f64, 2.5], "b" => [3i64, 4]).unwrap();
        let ds = DataSource::from_dataframe(df, None).unwrap();
        assert_eq!(ds.display_name(), "untitled");

        let rows = ds.rows().unwrap();
        assert_eq!(rows[0]["a"].parse::<f64>().unwrap(), 1.5);
        assert_eq!(rows[1]["b"].parse::<f64>().unwrap(), 4.0);
    }
}
