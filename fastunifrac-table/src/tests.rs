use crate::Table;

use color_eyre::eyre::{Report, Result};
use std::io::Write;

const MAPPING: &str = "#SampleID\tBarcodeSequence\tDescription\n\
                       #A comment inside the body\n\
                       s1\tAAAA\tFirst sample\n\
                       \n\
                       s2\tCCCC\tSecond sample\n";

#[test]
fn from_reader_keeps_jagged_rows() -> Result<(), Report> {
    let text = "\ta\tb\tc\na\t0\nb\t1\t0\nc\t2\t4\t0\n";
    let table = Table::from_reader(text.as_bytes(), '\t', None)?;

    assert_eq!(table.headers, ["", "a", "b", "c"]);
    assert_eq!(table.rows[0], ["a", "0"]);
    assert_eq!(table.rows[2], ["c", "2", "4", "0"]);
    assert!(table.comments.is_empty());
    Ok(())
}

#[test]
fn from_reader_without_comment_prefix_keeps_hash_lines() -> Result<(), Report> {
    let table = Table::from_reader(MAPPING.as_bytes(), '\t', None)?;

    assert_eq!(table.headers, ["#SampleID", "BarcodeSequence", "Description"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0], ["#A comment inside the body"]);
    Ok(())
}

#[test]
fn from_reader_collects_comments() -> Result<(), Report> {
    let text = "#Test name\r\nSample1\tSample2\r\ns1\ts2\r\n";
    let table = Table::from_reader(text.as_bytes(), '\t', Some('#'))?;

    assert_eq!(table.comments, ["Test name"]);
    assert_eq!(table.headers, ["Sample1", "Sample2"]);
    assert_eq!(table.rows, [["s1", "s2"]]);
    Ok(())
}

#[test]
fn read_records_path() -> Result<(), Report> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    write!(file, "x,y\n1,2\n")?;

    let table = Table::read(&file.path(), ',', None)?;
    assert_eq!(table.headers, ["x", "y"]);
    assert_eq!(table.rows, [["1", "2"]]);
    assert_eq!(table.path.as_deref(), Some(file.path()));
    Ok(())
}

#[test]
fn read_missing_file() {
    let result = Table::read(&"does/not/exist.tsv", '\t', None);
    assert!(result.is_err());
}

#[test]
fn markdown_pads_short_rows() -> Result<(), Report> {
    let mut table = Table::new();
    table.headers = vec!["Bucket", "Label"];
    table.rows = vec![vec!["1", "Low"], vec!["2"]];

    let expected = "| Bucket | Label |\n\
                    |--------|-------|\n\
                    |   1    |  Low  |\n\
                    |   2    |       |\n";
    assert_eq!(table.to_markdown()?, expected);
    Ok(())
}

#[test]
fn write_keeps_comments_and_short_rows() -> Result<(), Report> {
    let mut table = Table::new();
    table.comments = vec!["Buckets".to_string()];
    table.headers = vec!["", "s1", "s2"];
    table.rows = vec![vec!["s1", "0", "3"], vec!["s2"]];

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("buckets.csv");
    table.write(&path, ',')?;

    let observed = std::fs::read_to_string(&path)?;
    assert_eq!(observed, "#Buckets\n,s1,s2\ns1,0,3\ns2\n");

    let table = Table::read(&path, ',', Some('#'))?;
    assert_eq!(table.comments, ["Buckets"]);
    assert_eq!(table.rows[1], ["s2"]);
    Ok(())
}
