use crate::counters::FrequencyCounter;
use crate::error::Result;
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Comment marker; the rest of the line after it is ignored.
const COMMENT: char = '#';

/// Reads whitespace-separated tokens from a text stream, line by line.
///
/// Blank lines are skipped and anything after a `#` on a line is treated as a
/// comment.
pub struct TokenReader<R: BufRead> {
    reader: R,
    line: String,
    pending: VecDeque<String>,
    finished: bool,
    /// Number of lines consumed so far.
    pub line_number: u64,
}

impl<R: BufRead> TokenReader<R> {
    pub fn new(reader: R) -> Self {
        TokenReader {
            reader,
            line: String::new(),
            pending: VecDeque::new(),
            finished: false,
            line_number: 0,
        }
    }

    /// Reads lines until one carries at least one token.
    ///
    /// Returns `Ok(false)` at EOF.
    fn fill_pending(&mut self) -> io::Result<bool> {
        while self.pending.is_empty() {
            if self.finished {
                return Ok(false);
            }

            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                self.finished = true;
                return Ok(false);
            }
            self.line_number += 1;

            let content = match self.line.find(COMMENT) {
                Some(start) => &self.line[..start],
                None => &self.line,
            };
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TokenReader<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.fill_pending() {
            Ok(true) => self.pending.pop_front().map(Ok),
            Ok(false) => None,
            Err(e) => {
                // no way to resume after a failed read
                self.finished = true;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

/// Adds every token of `reader` to `counter` once.
///
/// Returns the number of tokens added.
pub fn load_into<C: FrequencyCounter, R: BufRead>(counter: &mut C, reader: R) -> Result<u64> {
    let mut added = 0;
    for token in TokenReader::new(reader) {
        counter.add(&token?, 1)?;
        added += 1;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::{CountMinSketch, ExactCounter};
    use std::io::Cursor;

    fn tokens(data: &str) -> Vec<String> {
        TokenReader::new(Cursor::new(data))
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_one_token_per_line() {
        assert_eq!(tokens("apple\nbanana\napple\n"), vec!["apple", "banana", "apple"]);
    }

    #[test]
    fn test_whitespace_and_blank_lines() {
        assert_eq!(
            tokens("  apple\tbanana  \n\n\r\ncherry date\n   \n"),
            vec!["apple", "banana", "cherry", "date"]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tokens("# header line\napple # trailing\n#\nbanana#cherry\n"),
            vec!["apple", "banana"]
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        assert_eq!(tokens("apple\nbanana"), vec!["apple", "banana"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
        assert!(tokens("\n# only a comment\n").is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let mut reader = TokenReader::new(Cursor::new("a\n\nb c\n"));
        assert_eq!(reader.next().unwrap().unwrap(), "a");
        assert_eq!(reader.line_number, 1);
        assert_eq!(reader.next().unwrap().unwrap(), "b");
        assert_eq!(reader.line_number, 3);
        assert_eq!(reader.next().unwrap().unwrap(), "c");
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_load_into_sketch() {
        let data = "apple banana\napple\n# ignored apple\ncherry\n";
        let mut cms: CountMinSketch = CountMinSketch::new(1000, 10).unwrap();
        let added = load_into(&mut cms, Cursor::new(data)).unwrap();

        assert_eq!(added, 4);
        assert_eq!(cms.estimate("apple"), 2);
        assert_eq!(cms.estimate("banana"), 1);
        assert_eq!(cms.estimate("cherry"), 1);
    }

    #[test]
    fn test_load_into_exact_counter() {
        let mut counter: ExactCounter = ExactCounter::new();
        load_into(&mut counter, Cursor::new("x y x z x")).unwrap();
        assert_eq!(counter.estimate("x"), 3);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let bytes: &[u8] = b"apple\n\xff\xfe\n";
        let mut reader = TokenReader::new(Cursor::new(bytes));
        assert_eq!(reader.next().unwrap().unwrap(), "apple");
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }
}
