use super::CatalogEntry;
use serde::Deserialize;
use std::io::Read;

/// Reads `make,model,year,msrp` rows. Blank lines are skipped and fields are trimmed.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<CatalogEntry>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut entries = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        entries.push(CatalogEntry {
            make: row.make,
            model: row.model,
            year: row.year,
            msrp: row.msrp,
        });
    }

    Ok(entries)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(alias = "Make")]
    make: String,
    #[serde(alias = "Model")]
    model: String,
    #[serde(alias = "Year")]
    year: i32,
    #[serde(alias = "MSRP", alias = "Msrp")]
    msrp: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_capitalized_headers() {
        let csv = "Make,Model,Year,MSRP\nHonda , Fit,2019, 17000\n";
        let entries = parse_catalog(csv.as_bytes()).expect("csv parses");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].make, "Honda");
        assert_eq!(entries[0].model, "Fit");
        assert_eq!(entries[0].msrp, 17000.0);
    }

    #[test]
    fn reports_non_numeric_prices() {
        let csv = "make,model,year,msrp\nHonda,Fit,2019,call dealer\n";
        assert!(parse_catalog(csv.as_bytes()).is_err());
    }
}
