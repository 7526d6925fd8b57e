use crate::mapping::Mapping;

use color_eyre::eyre::{Report, Result};
use fastunifrac_table::Table;

const MAPPING: &str = "#SampleID\tBarcodeSequence\tLinkerPrimerSequence\tDescription\n\
                       #Comments\n\
                       #One comment more\n\
                       S1\tAAAAAAAAAAAA\tAAAAAAAAAAAAAAAAAAAAA\tDescription of S1\n\
                       S2\tAAAAAAAAAAAC\tAAAAAAAAAAAAAAAAAAAAA\tDescription of S2\n\
                       S3\tAAAAAAAAAAAG\tAAAAAAAAAAAAAAAAAAAAA\tDescription of S3\n";

#[test]
fn from_table_by_sample_and_column() -> Result<(), Report> {
    let table = Table::from_reader(MAPPING.as_bytes(), '\t', None)?;
    let mapping = Mapping::from_table(&table)?;

    assert_eq!(
        mapping.headers,
        ["SampleID", "BarcodeSequence", "LinkerPrimerSequence", "Description"]
    );
    assert_eq!(mapping.comments, ["Comments", "One comment more"]);
    assert_eq!(mapping.samples.len(), 3);
    assert_eq!(mapping.get("S2", "BarcodeSequence"), Some("AAAAAAAAAAAC"));
    assert_eq!(mapping.description("S3"), Some("Description of S3"));
    assert_eq!(mapping.description("S4"), None);
    assert_eq!(mapping.get("S1", "SampleID"), None);
    Ok(())
}

#[test]
fn from_table_short_row() -> Result<(), Report> {
    let text = "#SampleID\tTreatment\tDescription\ns1\tControl\n";
    let table = Table::from_reader(text.as_bytes(), '\t', None)?;
    let mapping = Mapping::from_table(&table)?;

    assert_eq!(mapping.get("s1", "Treatment"), Some("Control"));
    assert_eq!(mapping.description("s1"), None);
    Ok(())
}

#[test]
fn from_table_requires_hash_header() -> Result<(), Report> {
    let text = "SampleID\tDescription\ns1\tGut\n";
    let table = Table::from_reader(text.as_bytes(), '\t', None)?;
    assert!(Mapping::from_table(&table).is_err());

    assert!(Mapping::from_table(&Table::new()).is_err());
    Ok(())
}

#[test]
fn read_mapping_file() -> Result<(), Report> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("mapping.txt");
    std::fs::write(&path, MAPPING)?;

    let mapping = Mapping::read(&path)?;
    assert_eq!(mapping.description("S1"), Some("Description of S1"));
    Ok(())
}
