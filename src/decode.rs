//! Reading vertex buffers back into [VertexRecord]s.

use std::io::{ErrorKind, Read};

use crate::{
    error::DecodeError,
    framing::{Framing, Header, HEADER_SIZE},
    record::{VertexRecord, RECORD_SIZE},
};

/// Decode a complete vertex buffer held in memory.
pub fn decode(bytes: &[u8], framing: Framing) -> Result<Vec<VertexRecord>, DecodeError> {
    let (header, body) = match framing {
        Framing::Raw => (None, bytes),
        Framing::Headered => {
            let Some((head, body)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
                return Err(DecodeError::Truncated {
                    offset: 0,
                    trailing: bytes.len(),
                });
            };
            (Some(Header::from_bytes(head)?), body)
        }
    };

    let chunks = body.chunks_exact(RECORD_SIZE);
    let trailing = chunks.remainder().len();
    if trailing != 0 {
        return Err(DecodeError::Truncated {
            offset: (framing.prefix_len() + body.len() - trailing) as u64,
            trailing,
        });
    }
    if let Some(header) = header {
        let actual = (body.len() / RECORD_SIZE) as u64;
        if u64::from(header.record_count) != actual {
            return Err(DecodeError::RecordCount {
                declared: header.record_count,
                actual,
            });
        }
    }

    Ok(chunks
        .map(|chunk| {
            let mut record = [0u8; RECORD_SIZE];
            record.copy_from_slice(chunk);
            VertexRecord::from_bytes(&record)
        })
        .collect())
}

/// Streams [VertexRecord]s out of a reader.
///
/// Yields an error, then stops, if the stream ends partway through a record or disagrees with its
/// header about how many records it holds.
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: R,
    header: Option<Header>,
    offset: u64,
    records: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    /// Read a headerless stream.
    pub fn raw(reader: R) -> Self {
        Self {
            reader,
            header: None,
            offset: 0,
            records: 0,
            done: false,
        }
    }

    /// Read and validate the header, then stream the records after it.
    pub fn headered(mut reader: R) -> Result<Self, DecodeError> {
        let mut head = [0u8; HEADER_SIZE];
        let read = fill(&mut reader, &mut head)?;
        if read != HEADER_SIZE {
            return Err(DecodeError::Truncated {
                offset: 0,
                trailing: read,
            });
        }
        Ok(Self {
            header: Some(Header::from_bytes(&head)?),
            offset: HEADER_SIZE as u64,
            ..Self::raw(reader)
        })
    }

    #[inline]
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Records yielded so far.
    #[inline]
    pub fn records_read(&self) -> u64 {
        self.records
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_record(&mut self) -> Result<Option<VertexRecord>, DecodeError> {
        let mut buf = [0u8; RECORD_SIZE];
        match fill(&mut self.reader, &mut buf)? {
            0 => {
                if let Some(header) = self.header {
                    if u64::from(header.record_count) != self.records {
                        return Err(DecodeError::RecordCount {
                            declared: header.record_count,
                            actual: self.records,
                        });
                    }
                }
                Ok(None)
            }
            RECORD_SIZE => {
                self.offset += RECORD_SIZE as u64;
                self.records += 1;
                Ok(Some(VertexRecord::from_bytes(&buf)))
            }
            trailing => Err(DecodeError::Truncated {
                offset: self.offset,
                trailing,
            }),
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<VertexRecord, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.read_record().transpose();
        if !matches!(result, Some(Ok(_))) {
            self.done = true;
        }
        result
    }
}

impl<R: Read> std::iter::FusedIterator for RecordReader<R> {}

/// Like [Read::read_exact], but reports how much was read when the stream ends early.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(read)
}
