use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use schools_etl::error::ExtractError;
use schools_etl::export::{export_batch, output_path, write_table};
use schools_etl::ingestion::{load_one, BatchOptions, SourceFile};
use schools_etl::types::{RowTable, Value};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("schools-etl-{name}-{nanos}"));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_region_xlsx(path: &Path, with_gap: bool) {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Name").unwrap();
    ws.write_string(0, 1, "Learners").unwrap();
    ws.write_string(1, 0, "Parkview Primary").unwrap();
    ws.write_number(1, 1, 420).unwrap();
    ws.write_string(2, 0, "Rietfontein Secondary").unwrap();
    if !with_gap {
        ws.write_number(2, 1, 515).unwrap();
    }
    wb.save(path).unwrap();
}

#[test]
fn export_batch_writes_one_json_file_per_source() {
    let dir = tmp_dir("per-file");
    let out_dir = dir.join("out");
    let regions = ["Gauteng", "Free State"];
    let sources: Vec<SourceFile> = regions
        .iter()
        .map(|r| {
            let path = dir.join(format!("{r}.xlsx"));
            write_region_xlsx(&path, false);
            SourceFile::new(path)
        })
        .collect();

    let report = export_batch(&sources, &out_dir, &BatchOptions::default());
    assert_eq!(report.summary(), "2/2 files extracted successfully");
    assert_eq!(
        report.written,
        vec![out_dir.join("Gauteng.json"), out_dir.join("Free State.json")]
    );

    for (dest, region) in report.written.iter().zip(regions.iter()) {
        let text = std::fs::read_to_string(dest).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rows = parsed.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Source_Province"], serde_json::json!(region));
        assert_eq!(rows[0]["Learners"], serde_json::json!(420));
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn exported_rows_omit_absent_cells() {
    let dir = tmp_dir("gap");
    let src = dir.join("Limpopo.xlsx");
    write_region_xlsx(&src, true);

    let opts = BatchOptions {
        tag: false,
        ..Default::default()
    };
    let report = export_batch(&[SourceFile::new(&src)], dir.join("out"), &opts);
    assert_eq!(report.succeeded, 1);

    let text = std::fs::read_to_string(&report.written[0]).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    let rows = parsed.as_array().unwrap();
    assert!(rows[0].get("Learners").is_some());
    // Row 2's Learners cell was empty, so the key is gone, not null.
    assert!(rows[1].get("Learners").is_none());
    // 2-space indentation.
    assert!(text.starts_with("[\n  {"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn load_failure_does_not_stop_later_writes() {
    let dir = tmp_dir("mixed");
    let missing = dir.join("Eastern Cape.xlsx");
    let valid = dir.join("Western Cape.xlsx");
    write_region_xlsx(&valid, false);

    let sources = vec![SourceFile::new(&missing), SourceFile::new(&valid)];
    let report = export_batch(&sources, dir.join("out"), &BatchOptions::default());

    assert_eq!(report.summary(), "1/2 files extracted successfully");
    assert_eq!(report.written, vec![dir.join("out").join("Western Cape.json")]);
    assert!(matches!(report.failures[0], ExtractError::Load { .. }));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unwritable_output_dir_is_reported_as_write_failure() {
    let dir = tmp_dir("unwritable");
    let src = dir.join("Gauteng.xlsx");
    write_region_xlsx(&src, false);

    // A plain file where the output directory should go.
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let out_dir = blocker.join("out");

    let report = export_batch(&[SourceFile::new(&src)], &out_dir, &BatchOptions::default());
    assert_eq!(report.summary(), "0/1 files extracted successfully");
    assert!(matches!(report.failures[0], ExtractError::Write { .. }));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn write_table_round_trips_through_load_one() {
    let dir = tmp_dir("round-trip");
    let src = dir.join("North West.xlsx");
    write_region_xlsx(&src, false);

    let table = load_one(&SourceFile::new(&src)).unwrap();
    let dest = output_path(dir.join("out"), &SourceFile::new(&src));
    write_table(&table, &dest).unwrap();
    assert_eq!(dest.file_name().unwrap(), "North West.json");

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&dest).unwrap()).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), table.row_count());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn serialize_preserves_row_order_and_field_sets() {
    let table = RowTable::new(
        vec!["A".to_string(), "B".to_string()],
        vec![
            vec![Some(Value::Int64(1)), Some(Value::Utf8("x".to_string()))],
            vec![Some(Value::Int64(2)), None],
            vec![None, Some(Value::Bool(true))],
        ],
    );

    let bytes = schools_etl::export::serialize(&table).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let rows = parsed.as_array().unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["A"], serde_json::json!(1));
    assert_eq!(
        rows[1].as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["A"]
    );
    assert_eq!(
        rows[2].as_object().unwrap().keys().collect::<Vec<_>>(),
        vec!["B"]
    );
}
