use chrono::NaiveDate;
use tasktagger::export::ExportFormat;
use tasktagger::samples::SAMPLE_TASKS;
use tasktagger::TaskProcessor;

fn export_time() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap()
}

#[tokio::test]
async fn test_csv_export_of_processed_samples() {
    let outcome = TaskProcessor::offline().process(SAMPLE_TASKS).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = ExportFormat::Csv
        .write_to(dir.path(), outcome.records(), &export_time())
        .unwrap();
    let content = std::fs::read_to_string(path).unwrap();

    // header plus one row per task, each terminated by CRLF
    assert_eq!(content.matches("\r\n").count(), SAMPLE_TASKS.len() + 1);
    assert!(content.contains("\"#bug, #urgent\",5,2024-06-01 08:30:00"));
}

#[tokio::test]
async fn test_spreadsheet_export_of_processed_samples() {
    let outcome = TaskProcessor::offline().process(SAMPLE_TASKS).await.unwrap();
    let dir = tempfile::tempdir().unwrap();

    let path = ExportFormat::Spreadsheet
        .write_to(dir.path(), outcome.records(), &export_time())
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "AI_Processed_Tasks_20240601_083000.xml"
    );

    let xml = std::fs::read_to_string(path).unwrap();
    assert!(xml.contains("<?mso-application progid=\"Excel.Sheet\"?>"));
    assert!(xml.contains("Total Tasks: 10"));
    assert_eq!(xml.matches("ss:Height=\"60\"").count(), SAMPLE_TASKS.len());
    assert!(xml.contains(">Urgent<"));
    assert!(xml.contains(">Low-Medium<"));
}
