//! Width-constrained line breaking
//!
//! Two wrappers share one greedy rule:
//! - a word that would push the line past the width starts a new line
//! - a line whose width lands on or past the width closes right after the word
//! - words are never split, so a single over-long word gets a line of its own
//!
//! [`wrap_plain`] handles uniform text. [`StyledWrap`] handles text carrying
//! `<b>`, `<i>` and `<u>` markers and keeps adjacent words of the same style in
//! one run. Line width is the sum of each run's measured width plus the cell
//! margin on both sides of every run.

use crate::metrics::{FontSpec, FontStyle, LayoutContext};

/// Contiguous text sharing one emphasis style
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    pub text: String,
    pub style: FontStyle,
}

/// Runs that together fit within one column width
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledLine {
    pub runs: Vec<StyledRun>,
}

impl StyledLine {
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Measured width including per-run margins
    pub fn width(&self, ctx: &LayoutContext<'_>, font: &FontSpec) -> f32 {
        self.runs
            .iter()
            .map(|run| ctx.run_width(&run.text, &font.with_style(run.style)))
            .sum()
    }

    /// Plain text of the line without styling
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    fn push_word(&mut self, word: &StyledWord) {
        let mut separator = if self.runs.is_empty() { "" } else { " " };
        for fragment in &word.fragments {
            match self.runs.last_mut() {
                Some(last) if last.style == fragment.style => {
                    last.text.push_str(separator);
                    last.text.push_str(&fragment.text);
                }
                _ => self.runs.push(StyledRun {
                    text: format!("{}{}", separator, fragment.text),
                    style: fragment.style,
                }),
            }
            separator = "";
        }
    }
}

/// A whitespace-delimited word; markers inside a word split it into fragments
#[derive(Debug, Clone, PartialEq)]
pub struct StyledWord {
    pub fragments: Vec<StyledRun>,
}

impl StyledWord {
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Clone, Copy)]
enum Marker {
    Bold,
    Italic,
    Underline,
}

const MARKERS: [(&str, Marker, bool); 6] = [
    ("<b>", Marker::Bold, true),
    ("</b>", Marker::Bold, false),
    ("<i>", Marker::Italic, true),
    ("</i>", Marker::Italic, false),
    ("<u>", Marker::Underline, true),
    ("</u>", Marker::Underline, false),
];

fn match_marker(rest: &str) -> Option<(usize, Marker, bool)> {
    MARKERS.iter().find_map(|&(tag, marker, opening)| {
        rest.get(..tag.len())
            .filter(|head| head.eq_ignore_ascii_case(tag))
            .map(|_| (tag.len(), marker, opening))
    })
}

/// Split marked-up text into words, each fragment carrying the style active
/// where it occurred. Markers nest; an unmatched closing marker is ignored.
pub fn parse_markup(text: &str) -> Vec<StyledWord> {
    let mut words = Vec::new();
    let mut fragments: Vec<StyledRun> = Vec::new();
    let mut buf = String::new();
    // open counts for bold, italic, underline
    let mut depth = [0u32; 3];

    let style_of = |depth: &[u32; 3]| FontStyle {
        bold: depth[0] > 0,
        italic: depth[1] > 0,
        underline: depth[2] > 0,
    };

    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some((len, marker, opening)) = match_marker(rest).filter(|_| c == '<') {
            if !buf.is_empty() {
                fragments.push(StyledRun {
                    text: std::mem::take(&mut buf),
                    style: style_of(&depth),
                });
            }
            let slot = &mut depth[marker as usize];
            *slot = if opening {
                *slot + 1
            } else {
                slot.saturating_sub(1)
            };
            rest = &rest[len..];
            continue;
        }

        if c.is_whitespace() {
            if !buf.is_empty() {
                fragments.push(StyledRun {
                    text: std::mem::take(&mut buf),
                    style: style_of(&depth),
                });
            }
            if !fragments.is_empty() {
                words.push(StyledWord {
                    fragments: std::mem::take(&mut fragments),
                });
            }
        } else {
            buf.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    if !buf.is_empty() {
        fragments.push(StyledRun {
            text: buf,
            style: style_of(&depth),
        });
    }
    if !fragments.is_empty() {
        words.push(StyledWord { fragments });
    }
    words
}

/// Styled text prepared for wrapping at a fixed width.
///
/// [`StyledWrap::lines`] can be called any number of times; each call walks
/// the words from the start and yields the same partition.
#[derive(Debug, Clone)]
pub struct StyledWrap<'a> {
    words: Vec<StyledWord>,
    font: FontSpec,
    max_width: f32,
    ctx: LayoutContext<'a>,
}

impl<'a> StyledWrap<'a> {
    pub fn new(ctx: LayoutContext<'a>, text: &str, font: FontSpec, max_width: f32) -> Self {
        Self {
            words: parse_markup(text),
            font,
            max_width,
            ctx,
        }
    }

    pub fn lines(&self) -> StyledLines<'_, 'a> {
        StyledLines {
            wrap: self,
            next_word: 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }
}

/// Lazy line iterator over a [`StyledWrap`]
#[derive(Debug, Clone)]
pub struct StyledLines<'w, 'a> {
    wrap: &'w StyledWrap<'a>,
    next_word: usize,
}

impl Iterator for StyledLines<'_, '_> {
    type Item = StyledLine;

    fn next(&mut self) -> Option<StyledLine> {
        let wrap = self.wrap;
        let mut line = StyledLine::default();

        while let Some(word) = wrap.words.get(self.next_word) {
            let mut proposed = line.clone();
            proposed.push_word(word);
            if !line.is_empty() && proposed.width(&wrap.ctx, &wrap.font) > wrap.max_width {
                break;
            }
            line = proposed;
            self.next_word += 1;
            if line.width(&wrap.ctx, &wrap.font) >= wrap.max_width {
                break;
            }
        }

        if line.is_empty() { None } else { Some(line) }
    }
}

/// Wrap uniform-style text into lines no wider than `max_width`
pub fn wrap_plain(
    ctx: &LayoutContext<'_>,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let proposed = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if !current.is_empty() && ctx.run_width(&proposed, font) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = proposed;
        }

        if ctx.run_width(&current, font) >= max_width {
            lines.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
