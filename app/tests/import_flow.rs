use std::sync::Arc;

use gridpad_app::{Command, KeywordAssistant, Notification, Severity, Store, StoreError};
use gridpad_config::Settings;
use gridpad_engine::{ParsedFile, ParsedTable, Scalar};
use gridpad_io::{BinaryReader, IngestError, PlaceholderBinaryReader, UploadedFile};

fn text(s: &str) -> Scalar {
    Scalar::Text(s.to_string())
}

/// Reader that returns two worksheets for any workbook.
struct TwoSheetReader;

impl BinaryReader for TwoSheetReader {
    fn parse(&self, _bytes: &[u8], file_name: &str) -> Result<ParsedFile, IngestError> {
        Ok(ParsedFile::new(
            file_name,
            vec![
                ParsedTable::new("Jan", vec![vec![Scalar::Number(1.0)]]),
                ParsedTable::new("Feb", vec![vec![Scalar::Number(2.0)]]),
            ],
        ))
    }
}

#[test]
fn unsupported_file_is_isolated() {
    let mut store = Store::default();
    let files = vec![
        UploadedFile::new("one.csv", "a,1\n"),
        UploadedFile::new("two.txt", "ignored"),
        UploadedFile::new("three.tsv", "b\t2\n"),
    ];

    let ids = smol::block_on(store.import_files(files)).unwrap();

    assert_eq!(ids.len(), 2);
    assert_eq!(
        store.workbook().sheet_names(),
        vec!["Sheet1", "one.csv-Sheet1", "three.tsv-Sheet1"]
    );

    let notices = store.take_notifications();
    let unsupported: Vec<&Notification> = notices
        .iter()
        .filter(|n| n.title == "Unsupported file type")
        .collect();
    assert_eq!(unsupported.len(), 1);
    assert!(unsupported[0].description.contains("two.txt"));

    let titles: Vec<&str> = notices.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Files uploaded",
            "File processed successfully",
            "Unsupported file type",
            "File processed successfully",
            "Data imported successfully",
        ]
    );
    assert_eq!(notices[4].description, "Added 2 new sheet(s).");
}

#[test]
fn import_keeps_active_sheet_and_coerces() {
    let mut store = Store::default();
    let files = vec![UploadedFile::new(
        "people.csv",
        "Name,Age\nJohn,30\n\"07\",NaN",
    )];
    let ids = smol::block_on(store.import_files(files)).unwrap();

    let wb = store.workbook();
    assert_eq!(wb.active_sheet().name, "Sheet1");

    let sheet = wb.sheet_by_id(ids[0]).unwrap();
    assert_eq!(
        sheet.grid.to_scalars(),
        vec![
            vec![text("Name"), text("Age")],
            vec![text("John"), Scalar::Number(30.0)],
            vec![Scalar::Number(7.0), text("NaN")],
        ]
    );
}

#[test]
fn import_can_activate_first_sheet() {
    let settings = Settings {
        activate_first_imported_sheet: true,
        ..Settings::default()
    };
    let mut store = Store::new(settings);
    let ids = smol::block_on(store.import_files(vec![
        UploadedFile::new("a.csv", "1\n"),
        UploadedFile::new("b.csv", "2\n"),
    ]))
    .unwrap();
    assert_eq!(store.workbook().active_sheet_id(), ids[0]);
}

#[test]
fn binary_placeholder_reports_failure() {
    let mut store = Store::default();
    let ids = smol::block_on(
        store.import_files(vec![UploadedFile::new("book.xlsx", vec![0u8, 1, 2])]),
    )
    .unwrap();

    assert!(ids.is_empty());
    assert_eq!(store.workbook().sheet_count(), 1);
    let notices = store.take_notifications();
    assert_eq!(notices.last().unwrap().title, "Error processing file");
    assert_eq!(notices.last().unwrap().severity, Severity::Destructive);
    assert!(notices.iter().all(|n| n.title != "Data imported successfully"));
}

#[test]
fn binary_reader_tables_become_sheets() {
    let mut store = Store::with_parts(
        Settings::default(),
        Arc::new(KeywordAssistant),
        Arc::new(TwoSheetReader),
    );
    smol::block_on(store.import_files(vec![UploadedFile::new("q.xlsx", vec![0u8])])).unwrap();
    assert_eq!(
        store.workbook().sheet_names(),
        vec!["Sheet1", "q.xlsx-Jan", "q.xlsx-Feb"]
    );
}

#[test]
fn chat_upload_is_logged() {
    let mut store = Store::default();
    let job = store.upload_from_chat(vec![
        UploadedFile::new("a.csv", "x\n"),
        UploadedFile::new("b.csv", "y\n"),
    ]);
    assert_eq!(
        store.conversation().last().unwrap().content,
        "Uploaded 2 file(s): a.csv, b.csv"
    );
    let (ticket, report) = smol::block_on(job.run());
    store.complete_import(ticket, report).unwrap();
    assert_eq!(store.workbook().sheet_count(), 3);
}

#[test]
fn import_after_dispose_is_stale() {
    let mut store = Store::default();
    let job = store.begin_import(vec![UploadedFile::new("late.csv", "1,2\n")]);
    store.dispose();

    let (ticket, report) = smol::block_on(job.run());
    assert_eq!(store.complete_import(ticket, report), Err(StoreError::Stale));
    assert_eq!(store.workbook().sheet_count(), 1);
}

#[test]
fn reply_after_dispose_is_stale() {
    let mut store = Store::new(Settings {
        response_delay_ms: 0,
        ..Settings::default()
    });
    let job = store.send_message("hello").unwrap();
    store.dispose();
    assert!(!store.conversation().is_pending());

    let (ticket, reply) = smol::block_on(job.run());
    assert_eq!(store.deliver_reply(ticket, reply), Err(StoreError::Stale));
    // greeting + user message only
    assert_eq!(store.conversation().messages().len(), 2);
}

#[test]
fn import_merge_command_directly() {
    let mut store = Store::default();
    let placeholder = PlaceholderBinaryReader;
    let report = gridpad_io::ingest_batch(&[UploadedFile::new("d.csv", "z\n")], &placeholder);
    store.dispatch(Command::ImportMerge(report.parsed)).unwrap();
    assert_eq!(store.workbook().sheet_names(), vec!["Sheet1", "d.csv-Sheet1"]);
}
