/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::{
    fs::{self, File, OpenOptions},
    io::{BufReader, BufWriter, Error, Read, Result, Seek, SeekFrom, Write},
    path::Path,
};

use super::{
    storage_provider::{closed_handle, read_fully},
    OpenMode, StorageHandle, StorageProvider,
};

/// Buffered provider: handles wrap the file in a user-space buffer.
///
/// `create` first checks whether the path exists and fails with `EEXIST` if it does; the
/// caller retries without `create`. A created file is always opened read-write, and
/// `truncate` cuts the file to zero length after it is opened.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamStorageProvider;

impl StorageProvider for StreamStorageProvider {
    type Handle = StreamHandle;

    fn name(&self) -> &'static str {
        "stream"
    }

    fn open(&self, path: &Path, mode: OpenMode) -> Result<Self::Handle> {
        let mut read_only = mode.is_read_only();
        if mode.is_create() {
            if fs::metadata(path).is_ok() {
                return Err(Error::from_raw_os_error(libc::EEXIST));
            }
            read_only = false;
        }

        let stream = if read_only {
            Stream::Reader(TrackedReader::new(File::open(path)?))
        } else {
            let file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(mode.is_create())
                .truncate(false)
                .open(path)?;
            // Reopening without `create` keeps the contents so an existing destination can
            // be validated.
            if mode.is_truncate() {
                file.set_len(0)?;
            }
            Stream::Writer(BufWriter::new(file))
        };

        Ok(StreamHandle {
            stream: Some(stream),
        })
    }
}

#[derive(Debug)]
enum Stream {
    Reader(TrackedReader<File>),
    Writer(BufWriter<File>),
}

/// A buffered reader that remembers its logical position.
///
/// `BufReader::seek` always drops the buffer. Seeking relative to a known position
/// keeps it whenever the target still lies inside the buffered range, so nearby
/// seek-then-read pairs are served from memory.
#[derive(Debug)]
struct TrackedReader<R> {
    reader: BufReader<R>,
    // `None` after a failed or short read, when the position is no longer known.
    position: Option<u64>,
}

impl<R: Read + Seek> TrackedReader<R> {
    fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            position: Some(0),
        }
    }

    fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    fn seek(&mut self, offset: u64) -> Result<u64> {
        let delta = self.position.and_then(|current| {
            let offset = i64::try_from(offset).ok()?;
            let current = i64::try_from(current).ok()?;
            offset.checked_sub(current)
        });
        self.position = None;
        match delta {
            Some(delta) => self.reader.seek_relative(delta)?,
            None => {
                self.reader.seek(SeekFrom::Start(offset))?;
            }
        }
        self.position = Some(offset);
        Ok(offset)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let result = read_fully(&mut self.reader, buffer);
        self.position = match result {
            Ok(n) if n == buffer.len() => self.position.map(|p| p + n as u64),
            _ => None,
        };
        result
    }
}

/// A buffered stream over an open file.
///
/// Read-only handles buffer reads. Read-write handles buffer writes; a read on such a
/// handle flushes pending writes first and then reads through to the file.
#[derive(Debug)]
pub struct StreamHandle {
    stream: Option<Stream>,
}

impl StreamHandle {
    fn stream(&mut self) -> Result<&mut Stream> {
        self.stream.as_mut().ok_or_else(closed_handle)
    }
}

impl StorageHandle for StreamHandle {
    fn stat(&mut self) -> Result<u64> {
        let file = match self.stream()? {
            Stream::Reader(reader) => reader.get_ref(),
            Stream::Writer(writer) => {
                writer.flush()?;
                writer.get_ref()
            }
        };
        Ok(file.metadata()?.len())
    }

    fn seek(&mut self, offset: u64) -> Result<u64> {
        match self.stream()? {
            Stream::Reader(reader) => reader.seek(offset),
            Stream::Writer(writer) => writer.seek(SeekFrom::Start(offset)),
        }
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        match self.stream()? {
            Stream::Reader(reader) => reader.read(buffer),
            Stream::Writer(writer) => {
                writer.flush()?;
                read_fully(writer.get_mut(), buffer)
            }
        }
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize> {
        match self.stream()? {
            // Same outcome as writing through a descriptor opened `O_RDONLY`.
            Stream::Reader(_) => Err(Error::from_raw_os_error(libc::EBADF)),
            Stream::Writer(writer) => {
                writer.write_all(buffer)?;
                Ok(buffer.len())
            }
        }
    }

    fn close(&mut self) -> Result<()> {
        match self.stream.take() {
            None | Some(Stream::Reader(_)) => Ok(()),
            Some(Stream::Writer(writer)) => {
                writer.into_inner().map_err(|err| err.into_error())?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Counts the reads and seeks that reach the wrapped reader.
    struct Counting<R> {
        inner: R,
        reads: usize,
        seeks: usize,
    }

    impl<R> Counting<R> {
        fn new(inner: R) -> Self {
            Self {
                inner,
                reads: 0,
                seeks: 0,
            }
        }
    }

    impl<R: Read> Read for Counting<R> {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            self.reads += 1;
            self.inner.read(buf)
        }
    }

    impl<R: Seek> Seek for Counting<R> {
        fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
            self.seeks += 1;
            self.inner.seek(pos)
        }
    }

    #[test]
    fn nearby_seeks_are_served_from_the_buffer() {
        let data: Vec<u8> = (0..=255).collect();
        let mut reader = TrackedReader::new(Counting::new(Cursor::new(data)));

        let mut element = [0u8; 8];
        for position in [0u64, 8, 16, 24, 120, 64, 200] {
            assert_eq!(reader.seek(position).unwrap(), position);
            assert_eq!(reader.read(&mut element).unwrap(), 8);
            assert_eq!(element[0], position as u8);
        }

        assert_eq!(reader.get_ref().reads, 1);
        assert_eq!(reader.get_ref().seeks, 0);
    }

    #[test]
    fn seeks_outside_the_buffer_reach_the_file() {
        let data: Vec<u8> = (0..32).collect();
        let mut reader = TrackedReader {
            reader: BufReader::with_capacity(8, Counting::new(Cursor::new(data))),
            position: Some(0),
        };

        let mut pair = [0u8; 2];
        reader.seek(4).unwrap();
        reader.read(&mut pair).unwrap();
        assert_eq!(pair, [4, 5]);

        reader.seek(24).unwrap();
        reader.read(&mut pair).unwrap();
        assert_eq!(pair, [24, 25]);

        reader.seek(2).unwrap();
        reader.read(&mut pair).unwrap();
        assert_eq!(pair, [2, 3]);

        assert_eq!(reader.get_ref().seeks, 3);
    }

    #[test]
    fn short_reads_forget_the_position() {
        let mut reader = TrackedReader::new(Cursor::new(vec![1u8, 2, 3]));
        let mut buffer = [0u8; 4];
        assert_eq!(reader.read(&mut buffer).unwrap(), 0);
        assert_eq!(reader.position, None);

        reader.seek(1).unwrap();
        let mut pair = [0u8; 2];
        assert_eq!(reader.read(&mut pair).unwrap(), 2);
        assert_eq!(pair, [2, 3]);
    }

    #[test]
    fn create_fails_on_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.bin");
        fs::write(&path, [1u8; 24]).unwrap();

        let err = StreamStorageProvider
            .open(&path, OpenMode::read_write().create(true).truncate(true))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(err.raw_os_error(), Some(libc::EEXIST));

        // The retry without `create` keeps the contents unless truncation is asked for.
        let mut handle = StreamStorageProvider
            .open(&path, OpenMode::read_write())
            .unwrap();
        assert_eq!(handle.stat().unwrap(), 24);
        handle.close().unwrap();

        let mut handle = StreamStorageProvider
            .open(&path, OpenMode::read_write().truncate(true))
            .unwrap();
        assert_eq!(handle.stat().unwrap(), 0);
        handle.close().unwrap();
    }

    #[test]
    fn create_on_missing_file_opens_read_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.bin");

        let mut handle = StreamStorageProvider
            .open(&path, OpenMode::read_only().create(true))
            .unwrap();
        assert_eq!(handle.write(b"abcdef").unwrap(), 6);
        assert_eq!(handle.stat().unwrap(), 6);

        let mut buffer = [0u8; 3];
        handle.seek(2).unwrap();
        assert_eq!(handle.read(&mut buffer).unwrap(), 3);
        assert_eq!(&buffer, b"cde");
        handle.close().unwrap();
    }

    #[test]
    fn writes_are_flushed_on_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flush.bin");

        let mut handle = StreamStorageProvider
            .open(&path, OpenMode::read_write().create(true))
            .unwrap();
        handle.seek(4).unwrap();
        handle.write(b"tail").unwrap();
        handle.seek(0).unwrap();
        handle.write(b"head").unwrap();
        handle.close().unwrap();
        handle.close().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"headtail");
    }

    #[test]
    fn read_only_handles_reject_writes_and_report_end_of_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ro.bin");
        fs::write(&path, b"0123456789").unwrap();

        let mut handle = StreamStorageProvider
            .open(&path, OpenMode::read_only())
            .unwrap();
        let mut buffer = [0u8; 4];
        handle.seek(8).unwrap();
        assert_eq!(handle.read(&mut buffer).unwrap(), 0);

        handle.seek(6).unwrap();
        assert_eq!(handle.read(&mut buffer).unwrap(), 4);
        assert_eq!(&buffer, b"6789");

        let err = handle.write(b"x").unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));

        handle.close().unwrap();
        assert_eq!(
            handle.stat().unwrap_err().raw_os_error(),
            Some(libc::EBADF)
        );
    }
}
