//! Parsing of Tesseract's TSV output.
//!
//! Columns: level, page_num, block_num, par_num, line_num, word_num, left,
//! top, width, height, conf, text. Word rows (level 5) carry a confidence in
//! 0..100; structural rows carry -1.

use pagescan::TextFragment;

const WORD_LEVEL: &str = "5";
const COLUMNS: usize = 12;

/// Group TSV word rows into one fragment per text line, in reading order.
///
/// Line confidence is the character-weighted mean of its word confidences,
/// scaled to 0.0 - 1.0. Lines with no non-blank words are dropped.
pub fn parse_tsv(output: &str) -> Vec<TextFragment> {
    let mut fragments = Vec::new();
    let mut current: Option<LineAccumulator> = None;

    for row in output.lines() {
        let cols: Vec<&str> = row.splitn(COLUMNS, '\t').collect();
        if cols.len() < COLUMNS - 1 || cols[0] != WORD_LEVEL {
            continue;
        }
        let text = cols.get(COLUMNS - 1).map(|t| t.trim()).unwrap_or("");
        if text.is_empty() {
            continue;
        }
        let Ok(conf) = cols[10].trim().parse::<f32>() else {
            continue;
        };
        let key = (cols[1], cols[2], cols[3], cols[4]);

        match current.as_mut() {
            Some(line) if line.key == key => line.push(text, conf),
            _ => {
                if let Some(line) = current.take() {
                    fragments.push(line.finish());
                }
                let mut line = LineAccumulator::new(key);
                line.push(text, conf);
                current = Some(line);
            }
        }
    }

    if let Some(line) = current {
        fragments.push(line.finish());
    }
    fragments
}

/// Page, block, paragraph and line number of a word row.
type LineKey<'a> = (&'a str, &'a str, &'a str, &'a str);

struct LineAccumulator<'a> {
    key: LineKey<'a>,
    words: Vec<String>,
    weighted: f64,
    chars: usize,
}

impl<'a> LineAccumulator<'a> {
    fn new(key: LineKey<'a>) -> Self {
        Self {
            key,
            words: Vec::new(),
            weighted: 0.0,
            chars: 0,
        }
    }

    fn push(&mut self, word: &str, conf: f32) {
        let chars = word.chars().count();
        let conf = (f64::from(conf) / 100.0).clamp(0.0, 1.0);
        self.weighted += conf * chars as f64;
        self.chars += chars;
        self.words.push(word.to_string());
    }

    fn finish(self) -> TextFragment {
        let confidence = if self.chars == 0 {
            0.0
        } else {
            (self.weighted / self.chars as f64) as f32
        };
        TextFragment::new(self.words.join(" "), confidence)
    }
}
