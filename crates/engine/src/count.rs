use crate::tokenizer::{Tokens, fill_buf};
use std::io::{self, BufRead};
use tally_core::Granularity;

/// Counts tokens straight from the reader's buffer without materialising them.
///
/// Lines and bytes are counted per chunk; words go through [`Tokens`] since a
/// word boundary may depend on bytes from the next chunk. `total` is updated as
/// chunks are consumed, so it holds the partial count when an error is
/// returned.
///
/// # Errors
///
/// Returns the first read error other than `Interrupted`.
pub fn count_chunks<R: BufRead>(
    reader: &mut R,
    granularity: Granularity,
    total: &mut u64,
) -> io::Result<()> {
    if granularity == Granularity::Word {
        for token in Tokens::new(reader, granularity) {
            token?;
            *total += 1;
        }
        return Ok(());
    }

    let mut last_byte = None;
    loop {
        let buf = fill_buf(reader)?;
        if buf.is_empty() {
            break;
        }
        let len = buf.len();
        *total += match granularity {
            Granularity::Line => bytecount::count(buf, b'\n') as u64,
            _ => len as u64,
        };
        last_byte = buf.last().copied();
        reader.consume(len);
    }

    // 末尾に改行がない場合の行カウント補正
    if granularity == Granularity::Line && last_byte.is_some_and(|b| b != b'\n') {
        *total += 1;
    }
    Ok(())
}
