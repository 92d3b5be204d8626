use booklet_layout::records::RawRecord;
use booklet_layout::{BookletError, BookletInput, BookletOptions, PaperSize};
use booklet_pdf::*;
use lopdf::{Document, Object};
use serde_json::{Value, json};
use tempfile::NamedTempFile;

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn input(meetings: usize) -> BookletInput {
    let meetings: Vec<_> = (0..meetings)
        .map(|i| {
            record(json!({
                "meeting_name": format!("Hope Group {}", i),
                "start_time": format!("{}:30", 7 + i % 12),
                "duration_time": "60",
                "weekday_tinyint": i % 7 + 1,
                "location_text": "Community Center",
                "location_street": "12 Elm St",
                "location_municipality": "Lakeside",
                "formats": "O",
            }))
        })
        .collect();
    let formats = vec![record(json!({ "id": 1, "key_string": "O", "name_string": "Open" }))];
    BookletInput::from_records(&meetings, &formats).unwrap()
}

fn number(object: &Object) -> f32 {
    match object {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r as f32,
        other => panic!("Expected number, got {:?}", other),
    }
}

fn page_sizes(doc: &Document) -> Vec<(f32, f32)> {
    doc.get_pages()
        .values()
        .map(|id| {
            let page = doc.get_object(*id).unwrap().as_dict().unwrap();
            let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
            (number(&media_box[2]), number(&media_box[3]))
        })
        .collect()
}

#[tokio::test]
async fn test_booklet_pdf_has_one_page_per_side() {
    let temp = NamedTempFile::new().unwrap();
    let options = BookletOptions {
        bookletize: true,
        ..Default::default()
    };

    let stats = generate_pdf(&input(40), &options, temp.path()).await.unwrap();

    let doc = Document::load(temp.path()).unwrap();
    assert_eq!(doc.get_pages().len(), stats.physical_pages);
    assert_eq!(stats.logical_pages % 4, 0);

    // letter landscape, 279mm x 216mm
    for (width, height) in page_sizes(&doc) {
        assert!((width - 792.0).abs() < 2.0, "width {}", width);
        assert!((height - 612.0).abs() < 2.0, "height {}", height);
    }
}

#[tokio::test]
async fn test_half_page_pdf_uses_portrait_half_sheets() {
    let temp = NamedTempFile::new().unwrap();
    let options = BookletOptions {
        paper_size: PaperSize::Legal,
        ..Default::default()
    };

    let stats = generate_pdf(&input(12), &options, temp.path()).await.unwrap();

    let doc = Document::load(temp.path()).unwrap();
    assert_eq!(doc.get_pages().len(), stats.logical_pages);
    // half of legal landscape, 178mm x 216mm
    for (width, height) in page_sizes(&doc) {
        assert!((width - 504.0).abs() < 2.0, "width {}", width);
        assert!((height - 612.0).abs() < 2.0, "height {}", height);
    }
}

#[test]
fn test_generate_bytes_is_a_pdf() {
    let (bytes, stats) = generate_pdf_bytes(&input(3), &BookletOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert_eq!(stats.meetings, 3);
}

#[tokio::test]
async fn test_failed_layout_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("booklet.pdf");
    let empty = BookletInput::new(Vec::new(), Vec::new());

    let result = generate_pdf(&empty, &BookletOptions::default(), &output).await;

    assert!(matches!(
        result,
        Err(RenderError::Layout(BookletError::NoPages))
    ));
    assert!(!output.exists());
}
