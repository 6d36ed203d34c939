//! Price history loading from CSV files.

use std::io::Read;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use holdsweep_core::date_math::parse_date;
use holdsweep_core::{PricePoint, PriceSeries};

const DATE_COLUMN: &str = "date";

/// Read a price series from CSV with a header row.
///
/// Column names match case-insensitively. Rows with an empty price cell
/// (market holidays in some exports) are skipped.
pub fn read_price_csv<R: Read>(
    reader: R,
    name: &str,
    price_column: &str,
) -> color_eyre::Result<PriceSeries> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().wrap_err("failed to read CSV header")?.clone();
    let find = |column: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| eyre!("CSV has no `{column}` column"))
    };
    let date_idx = find(DATE_COLUMN)?;
    let price_idx = find(price_column)?;

    let mut points = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = record.wrap_err_with(|| format!("failed to read CSV line {line}"))?;
        let price_cell = record.get(price_idx).unwrap_or("");
        if price_cell.is_empty() {
            continue;
        }
        let date_cell = record.get(date_idx).unwrap_or("");
        let date = parse_date(date_cell).wrap_err_with(|| format!("line {line}"))?;
        let price: f64 = price_cell
            .parse()
            .wrap_err_with(|| format!("line {line}: invalid price {price_cell:?}"))?;
        points.push(PricePoint::new(date, price));
    }

    let series = PriceSeries::new(name, points)?;
    tracing::debug!(
        name,
        points = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "Loaded price series"
    );
    Ok(series)
}

/// Load a price series from a CSV file, named after the file stem.
pub fn load_price_csv(path: &Path, price_column: &str) -> color_eyre::Result<PriceSeries> {
    let file = std::fs::File::open(path)
        .wrap_err_with(|| format!("failed to open price file {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "prices".to_string());
    read_price_csv(file, &name, price_column)
        .wrap_err_with(|| format!("failed to load prices from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;
    use std::io::Write;

    #[test]
    fn test_reads_and_sorts() {
        let csv = "Date,Open,Close\n2016-01-05,10,11\n20160104,9,10.5\n2016-01-06,11,\n";
        let series = read_price_csv(csv.as_bytes(), "t", "close").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date(2016, 1, 4)));
        assert_eq!(series.points()[0].price, 10.5);
        assert_eq!(series.last_date(), Some(date(2016, 1, 5)));
    }

    #[test]
    fn test_custom_price_column() {
        let csv = "date,adj_close\n2016-01-04,7.25\n";
        let series = read_price_csv(csv.as_bytes(), "t", "Adj_Close").unwrap();
        assert_eq!(series.points()[0].price, 7.25);
    }

    #[test]
    fn test_missing_column() {
        let csv = "date,open\n2016-01-04,1\n";
        assert!(read_price_csv(csv.as_bytes(), "t", "close").is_err());
    }

    #[test]
    fn test_bad_rows_rejected() {
        let bad_date = "date,close\n2016-02-30,1\n";
        assert!(read_price_csv(bad_date.as_bytes(), "t", "close").is_err());

        let bad_price = "date,close\n2016-02-01,abc\n";
        assert!(read_price_csv(bad_price.as_bytes(), "t", "close").is_err());

        let duplicate = "date,close\n2016-02-01,1\n2016-02-01,2\n";
        assert!(read_price_csv(duplicate.as_bytes(), "t", "close").is_err());

        let negative = "date,close\n2016-02-01,-1\n";
        assert!(read_price_csv(negative.as_bytes(), "t", "close").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("SPX.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "date,close\n2016-01-04,100\n2016-01-05,101").unwrap();
        drop(file);

        let series = load_price_csv(&path, "close").unwrap();
        assert_eq!(series.name(), "SPX");
        assert_eq!(series.len(), 2);

        assert!(load_price_csv(&dir.path().join("missing.csv"), "close").is_err());
    }
}
