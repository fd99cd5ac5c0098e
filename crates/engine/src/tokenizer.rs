use std::io::{self, BufRead};
use std::iter::FusedIterator;
use tally_core::scan::{self, WordSplitter};
use tally_core::{Granularity, Token};

/// Lazy token stream over a buffered reader.
///
/// Yields `Ok` tokens until end of stream. A read failure is yielded once as
/// `Err` and ends the stream; it is not restartable.
pub struct Tokens<R> {
    reader: R,
    granularity: Granularity,
    words: WordSplitter,
    done: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R, granularity: Granularity) -> Self {
        Self {
            reader,
            granularity,
            words: WordSplitter::new(),
            done: false,
        }
    }

    fn next_line(&mut self) -> io::Result<Option<Token>> {
        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        scan::strip_line_terminator(&mut line);
        Ok(Some(Token::new(line)))
    }

    fn next_word(&mut self) -> io::Result<Option<Token>> {
        loop {
            let buf = fill_buf(&mut self.reader)?;
            if buf.is_empty() {
                return Ok(self.words.finish());
            }
            let (used, word) = self.words.feed(buf);
            self.reader.consume(used);
            if word.is_some() {
                return Ok(word);
            }
        }
    }

    fn next_byte(&mut self) -> io::Result<Option<Token>> {
        let Some(&byte) = fill_buf(&mut self.reader)?.first() else {
            return Ok(None);
        };
        self.reader.consume(1);
        Ok(Some(Token::new(vec![byte])))
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = match self.granularity {
            Granularity::Line => self.next_line(),
            Granularity::Word => self.next_word(),
            Granularity::Byte => self.next_byte(),
        };
        match next {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Tokens<R> {}

/// `fill_buf` that retries on `Interrupted`.
///
/// The inner reader is asked for more data at most once per successful call.
/// End of stream is returned without a second read, and the buffered bytes are
/// handed out again by a call that does not touch the reader.
pub(crate) fn fill_buf<R: BufRead + ?Sized>(reader: &mut R) -> io::Result<&[u8]> {
    loop {
        match reader.fill_buf() {
            Ok([]) => return Ok(&[]),
            Ok(_) => break,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    reader.fill_buf()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io::{BufReader, Cursor, Read};

    /// Reader serving `data` and then failing.
    pub(crate) struct FailingReader {
        data: Cursor<Vec<u8>>,
    }

    impl FailingReader {
        pub(crate) fn new(data: &[u8]) -> Self {
            Self {
                data: Cursor::new(data.to_vec()),
            }
        }
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::other("device vanished")),
                n => Ok(n),
            }
        }
    }

    /// Reader replaying a fixed sequence of read results. An empty chunk is an
    /// end of stream; once the script runs out every read returns `Ok(0)`.
    pub(crate) struct ScriptedReader {
        script: VecDeque<io::Result<Vec<u8>>>,
    }

    impl ScriptedReader {
        pub(crate) fn new(script: impl IntoIterator<Item = io::Result<Vec<u8>>>) -> Self {
            Self {
                script: script.into_iter().collect(),
            }
        }
    }

    impl Read for ScriptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.script.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(mut chunk)) => {
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        self.script.push_front(Ok(chunk.split_off(n)));
                    }
                    Ok(n)
                }
            }
        }
    }

    pub(crate) fn chunk(bytes: &[u8]) -> io::Result<Vec<u8>> {
        Ok(bytes.to_vec())
    }

    fn tokens(input: &[u8], granularity: Granularity) -> Vec<Vec<u8>> {
        Tokens::new(Cursor::new(input.to_vec()), granularity)
            .map(|t| t.unwrap().into_bytes())
            .collect()
    }

    #[test]
    fn lines_without_delimiters() {
        assert_eq!(
            tokens(b"a\nb\na\n", Granularity::Line),
            vec![b"a".to_vec(), b"b".to_vec(), b"a".to_vec()]
        );
    }

    #[test]
    fn final_unterminated_line_is_a_token() {
        assert_eq!(
            tokens(b"one\ntwo", Granularity::Line),
            vec![b"one".to_vec(), b"two".to_vec()]
        );
    }

    #[test]
    fn blank_lines_and_crlf() {
        assert_eq!(
            tokens(b"\n\r\nx\r\n", Granularity::Line),
            vec![Vec::new(), Vec::new(), b"x".to_vec()]
        );
        assert!(tokens(b"", Granularity::Line).is_empty());
    }

    #[test]
    fn words_collapse_whitespace() {
        assert_eq!(
            tokens(b"  hello   world  ", Granularity::Word),
            vec![b"hello".to_vec(), b"world".to_vec()]
        );
        assert!(tokens(b" \n\t ", Granularity::Word).is_empty());
    }

    #[test]
    fn words_across_tiny_buffers() {
        let reader = BufReader::with_capacity(2, Cursor::new("ab\u{3000}cd ef".as_bytes().to_vec()));
        let words: Vec<_> = Tokens::new(reader, Granularity::Word)
            .map(|t| t.unwrap().into_bytes())
            .collect();
        assert_eq!(words, vec![b"ab".to_vec(), b"cd".to_vec(), b"ef".to_vec()]);
    }

    #[test]
    fn bytes_one_per_token() {
        assert_eq!(
            tokens(b"a\nb", Granularity::Byte),
            vec![b"a".to_vec(), b"\n".to_vec(), b"b".to_vec()]
        );
    }

    #[test]
    fn read_error_is_yielded_once_then_stream_ends() {
        let reader = BufReader::with_capacity(4, FailingReader::new(b"l1\nl2\npartial"));
        let mut stream = Tokens::new(reader, Granularity::Line);
        assert_eq!(stream.next().unwrap().unwrap().as_bytes(), b"l1");
        assert_eq!(stream.next().unwrap().unwrap().as_bytes(), b"l2");
        let err = stream.next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "device vanished");
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn first_end_of_stream_ends_every_granularity() {
        for (granularity, expected) in [
            (Granularity::Line, vec![b"a".to_vec()]),
            (Granularity::Word, vec![b"a".to_vec()]),
            (Granularity::Byte, vec![b"a".to_vec(), b"\n".to_vec()]),
        ] {
            let reader = BufReader::new(ScriptedReader::new([chunk(b"a\n"), chunk(b""), chunk(b"b\n")]));
            let got: Vec<_> = Tokens::new(reader, granularity)
                .map(|t| t.unwrap().into_bytes())
                .collect();
            assert_eq!(got, expected, "{granularity:?}");
        }
    }

    #[test]
    fn read_error_between_chunks_is_not_lost() {
        for granularity in [Granularity::Word, Granularity::Byte] {
            let reader = BufReader::new(ScriptedReader::new([
                chunk(b"ab"),
                Err(io::Error::other("boom")),
                chunk(b"cd"),
            ]));
            let results: Vec<_> = Tokens::new(reader, granularity).collect();
            let last = results.last().unwrap();
            assert_eq!(last.as_ref().unwrap_err().to_string(), "boom", "{granularity:?}");
            assert!(results[..results.len() - 1].iter().all(Result::is_ok));
        }
    }

    #[test]
    fn interrupted_reads_are_retried() {
        let reader = BufReader::new(ScriptedReader::new([
            chunk(b"x "),
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            chunk(b"y"),
        ]));
        let words: Vec<_> = Tokens::new(reader, Granularity::Word)
            .map(|t| t.unwrap().into_bytes())
            .collect();
        assert_eq!(words, vec![b"x".to_vec(), b"y".to_vec()]);
    }
}
