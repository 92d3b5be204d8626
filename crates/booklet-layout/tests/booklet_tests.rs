use booklet_layout::blocks::LayoutBlock;
use booklet_layout::canvas::Point;
use booklet_layout::paginate::PageKind;
use booklet_layout::records::RawRecord;
use booklet_layout::*;
use serde_json::{Value, json};

struct FixedWidth;

impl TextMeasure for FixedWidth {
    fn text_width(&self, text: &str, font: &FontSpec) -> f32 {
        // half an em per character
        text.chars().count() as f32 * font.size_mm() * 0.5
    }
}

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn meeting_records(count: usize) -> Vec<RawRecord> {
    (0..count)
        .map(|i| {
            record(json!({
                "meeting_name": format!("Recovery Group {}", i),
                "start_time": format!("{}:00", 8 + i % 12),
                "duration_time": "1:00",
                "weekday_tinyint": (i * 7 / count.max(1)) as u64 + 1,
                "location_text": "Fellowship Hall",
                "location_street": format!("{} Main St", 100 + i),
                "location_municipality": "Springfield",
                "formats": "O,D",
            }))
        })
        .collect()
}

fn format_records() -> Vec<RawRecord> {
    ["O:Open", "C:Closed", "D:Discussion", "WC:Wheelchair Accessible", "O:Open duplicate"]
        .iter()
        .enumerate()
        .map(|(i, pair)| {
            let (key, name) = pair.split_once(':').unwrap();
            record(json!({ "id": i + 1, "key_string": key, "name_string": name }))
        })
        .collect()
}

fn input(meetings: usize) -> BookletInput {
    BookletInput::from_records(&meeting_records(meetings), &format_records()).unwrap()
}

#[test]
fn test_formats_are_sorted_and_deduplicated() {
    let input = input(1);
    let keys: Vec<_> = input.formats.iter().map(|f| f.key.as_str()).collect();
    assert_eq!(keys, vec!["C", "D", "O", "WC"]);
}

#[test]
fn test_invalid_record_fails_whole_input() {
    let mut meetings = meeting_records(3);
    meetings[1].insert("weekday_tinyint".to_string(), json!(8));
    match BookletInput::from_records(&meetings, &format_records()) {
        Err(BookletError::Validation(e)) => assert_eq!(e.field, "weekday_tinyint"),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[test]
fn test_formats_table_is_last_content() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions::default();
    let pages = logical_pages(&input(5), &options, &ctx).unwrap();

    let last = pages.last().unwrap();
    assert!(matches!(
        last.blocks.last(),
        Some(LayoutBlock::FormatsTable(table)) if table.entries.len() == 4
    ));
}

#[test]
fn test_formats_table_can_be_disabled() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        include_formats_table: false,
        ..Default::default()
    };
    let pages = logical_pages(&input(5), &options, &ctx).unwrap();
    assert!(
        pages
            .iter()
            .flat_map(|p| &p.blocks)
            .all(|b| !matches!(b, LayoutBlock::FormatsTable(_)))
    );
}

#[test]
fn test_phone_list_gets_own_page() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        phone_list: true,
        ..Default::default()
    };
    let pages = logical_pages(&input(3), &options, &ctx).unwrap();
    let last = pages.last().unwrap();
    assert_eq!(last.blocks.len(), 1);
    match &last.blocks[0] {
        LayoutBlock::PhoneList(list) => {
            assert!(list.rows > 10);
            assert!(list.height(&ctx) <= options.geometry().column_height_mm);
        }
        other => panic!("Expected phone list, got {}", other.describe()),
    }
}

#[test]
fn test_booklet_pads_to_multiple_of_four() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        bookletize: true,
        ..Default::default()
    };
    for meetings in [1, 10, 25, 60] {
        let layout = layout_booklet(&input(meetings), &options, &ctx).unwrap();
        let stats = &layout.statistics;
        assert_eq!(stats.logical_pages % 4, 0);
        assert_eq!(
            stats.content_pages + stats.filler_pages + stats.blank_pages,
            stats.logical_pages
        );
        assert_eq!(layout.pages.len(), stats.physical_pages);
        assert_eq!(stats.sheets * 2, stats.physical_pages);
    }
}

#[test]
fn test_single_page_mode_does_not_pad() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions::default();
    let input = input(1);
    let pages = logical_pages(&input, &options, &ctx).unwrap();
    assert_eq!(pages.len(), 1);
    assert!(pages.iter().all(|p| p.kind() == PageKind::Content));
}

#[test]
fn test_custom_fillers_replace_builtin() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        bookletize: true,
        ..Default::default()
    };
    let input = input(1).with_fillers(vec![FillerContent::new("Local Helplines", ["Call us"])]);
    let pages = logical_pages(&input, &options, &ctx).unwrap();

    let titles: Vec<_> = pages
        .iter()
        .filter_map(|p| match p.blocks.first() {
            Some(LayoutBlock::Filler(filler)) => Some(filler.title.text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(titles, vec!["Local Helplines"]);
}

#[test]
fn test_empty_input_has_no_pages() {
    let ctx = LayoutContext::new(&FixedWidth);
    let input = BookletInput::new(Vec::new(), Vec::new());
    assert!(matches!(
        layout_booklet(&input, &BookletOptions::default(), &ctx),
        Err(BookletError::NoPages)
    ));
}

#[test]
fn test_invalid_options_fail_before_layout() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        second_header_field: Some(HeaderField::Weekday),
        ..Default::default()
    };
    assert!(matches!(
        layout_booklet(&input(3), &options, &ctx),
        Err(BookletError::Config(_))
    ));
}

#[test]
fn test_render_opens_one_canvas_page_per_physical_page() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        bookletize: true,
        ..Default::default()
    };
    let layout = layout_booklet(&input(30), &options, &ctx).unwrap();

    let mut canvas = RecordingCanvas::new();
    render_booklet(&layout.pages, &layout.geometry, &mut canvas, &ctx);

    assert_eq!(canvas.page_count(), layout.pages.len());
    for op in &canvas.ops {
        if let DrawOp::NewPage {
            width_mm,
            height_mm,
        } = op
        {
            assert_eq!(*width_mm, layout.geometry.page_width_mm);
            assert_eq!(*height_mm, layout.geometry.page_height_mm);
        }
    }
}

#[test]
fn test_rendered_cells_stay_inside_their_column() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        bookletize: true,
        ..Default::default()
    };
    let layout = layout_booklet(&input(40), &options, &ctx).unwrap();
    let geometry = layout.geometry;

    let mut canvas = RecordingCanvas::new();
    render_booklet(&layout.pages, &geometry, &mut canvas, &ctx);

    let bottom = geometry.page_height_mm - geometry.margin_mm + 1e-3;
    for page in canvas.cells_by_page() {
        for cell in page {
            assert!(cell.origin.y >= geometry.margin_mm - 1e-3);
            assert!(cell.origin.y + cell.height <= bottom, "{:?}", cell.text);
        }
    }
}

#[test]
fn test_front_page_shows_first_listing_on_right() {
    let ctx = LayoutContext::new(&FixedWidth);
    let options = BookletOptions {
        bookletize: true,
        ..Default::default()
    };
    let layout = layout_booklet(&input(30), &options, &ctx).unwrap();
    assert!(layout.statistics.content_pages > 1);

    let mut canvas = RecordingCanvas::new();
    render_booklet(&layout.pages, &layout.geometry, &mut canvas, &ctx);

    let front = &canvas.cells_by_page()[0];
    let first_day = front
        .iter()
        .find(|cell| cell.text == "Sunday")
        .expect("first day header on the front page");
    assert_eq!(
        first_day.origin,
        Point::new(layout.geometry.right_column_x_mm, layout.geometry.margin_mm)
    );
}
