use booklet_layout::text::{StyledWrap, parse_markup, wrap_plain};
use booklet_layout::*;

/// Widths proportional to the built-in tables, so lines vary realistically
fn ctx() -> LayoutContext<'static> {
    LayoutContext::new(&BuiltinMetrics)
}

const SAMPLES: &[&str] = &[
    "Just for Today (O,D,WC)",
    "First Presbyterian Church, 1500 North Franklin Boulevard, Springfield, IL, 62701",
    "A   spaced\tout\nname",
    "Supercalifragilisticexpialidocious meeting place",
    "<b>1.</b> Keep coming back, even on the days it feels <i>hard</i>.",
    "<b>Bold <u>and underlined</u></b> then plain text that keeps going for a while",
];

fn words(text: &str) -> Vec<String> {
    parse_markup(text).iter().map(|w| w.text()).collect()
}

#[test]
fn test_plain_lines_fit_unless_single_word() {
    let font = FontSpec::plain(FontFamily::Helvetica, 10.0);
    for text in SAMPLES {
        for width in [15.0, 25.0, 40.0, 60.0, 120.0] {
            for line in wrap_plain(&ctx(), text, &font, width) {
                let fits = ctx().run_width(&line, &font) <= width + 1e-4;
                assert!(
                    fits || !line.contains(' '),
                    "'{}' overflows {}mm",
                    line,
                    width
                );
            }
        }
    }
}

#[test]
fn test_plain_wrap_preserves_words() {
    let font = FontSpec::bold(FontFamily::Times, 12.0);
    for text in SAMPLES.iter().take(4) {
        let expected: Vec<_> = text.split_whitespace().collect();
        for width in [10.0, 20.0, 33.3, 50.0, 200.0] {
            let lines = wrap_plain(&ctx(), text, &font, width);
            let rejoined: Vec<_> = lines.iter().flat_map(|l| l.split(' ')).collect();
            assert_eq!(rejoined, expected, "width {}", width);
        }
    }
}

#[test]
fn test_styled_lines_fit_unless_single_word() {
    let font = FontSpec::plain(FontFamily::Helvetica, 9.0);
    for text in SAMPLES {
        for width in [15.0, 30.0, 45.0, 90.0] {
            let wrap = StyledWrap::new(ctx(), text, font, width);
            for line in wrap.lines() {
                let single_word = !line.text().trim().contains(' ');
                assert!(
                    line.width(&ctx(), &font) <= width + 1e-4 || single_word,
                    "'{}' overflows {}mm",
                    line.text(),
                    width
                );
            }
        }
    }
}

#[test]
fn test_styled_wrap_preserves_words_and_styles() {
    let font = FontSpec::plain(FontFamily::Courier, 8.0);
    for text in SAMPLES {
        let expected = words(text);
        for width in [12.0, 28.0, 64.0] {
            let wrap = StyledWrap::new(ctx(), text, font, width);
            let rejoined: Vec<String> = wrap
                .lines()
                .flat_map(|line| {
                    line.text()
                        .split(' ')
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                })
                .collect();
            assert_eq!(rejoined, expected, "width {}", width);
        }
    }
}

#[test]
fn test_styled_runs_alternate_styles() {
    let font = FontSpec::plain(FontFamily::Helvetica, 10.0);
    let wrap = StyledWrap::new(ctx(), SAMPLES[5], font, 500.0);
    for line in wrap.lines() {
        for pair in line.runs.windows(2) {
            assert_ne!(pair[0].style, pair[1].style);
        }
    }
}

#[test]
fn test_wrap_is_deterministic() {
    let font = FontSpec::plain(FontFamily::Helvetica, 10.0);
    let first = wrap_plain(&ctx(), SAMPLES[1], &font, 37.0);
    for _ in 0..5 {
        assert_eq!(wrap_plain(&ctx(), SAMPLES[1], &font, 37.0), first);
    }
}
