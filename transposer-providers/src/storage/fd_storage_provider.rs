/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */
use std::{
    fs::{File, OpenOptions},
    io::{Result, Seek, SeekFrom, Write},
    path::Path,
};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use super::{
    storage_provider::{closed_handle, read_fully},
    OpenMode, StorageHandle, StorageProvider,
};

/// Unbuffered provider: every handle operation is forwarded straight to the OS file.
///
/// `create` asks for create-if-absent without checking whether the path exists, so
/// opening an existing file with `create` succeeds and leaves its contents alone unless
/// `truncate` is also requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct FdStorageProvider;

impl StorageProvider for FdStorageProvider {
    type Handle = FdHandle;

    fn name(&self) -> &'static str {
        "fd"
    }

    fn open(&self, path: &Path, mode: OpenMode) -> Result<Self::Handle> {
        let mut options = OpenOptions::new();
        options.read(true);
        if mode.is_read_only() {
            // std refuses create/truncate without write access, the OS does not.
            #[cfg(unix)]
            {
                let mut flags = 0;
                if mode.is_create() {
                    flags |= libc::O_CREAT;
                }
                if mode.is_truncate() {
                    flags |= libc::O_TRUNC;
                }
                options.custom_flags(flags);
            }
            #[cfg(not(unix))]
            options
                .write(mode.is_create() || mode.is_truncate())
                .create(mode.is_create())
                .truncate(mode.is_truncate());
        } else {
            options
                .write(true)
                .create(mode.is_create())
                .truncate(mode.is_truncate());
        }
        #[cfg(unix)]
        options.mode(0o666);

        let file = options.open(path)?;
        Ok(FdHandle { file: Some(file) })
    }
}

/// An open file descriptor.
#[derive(Debug)]
pub struct FdHandle {
    file: Option<File>,
}

impl FdHandle {
    fn file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or_else(closed_handle)
    }
}

impl StorageHandle for FdHandle {
    fn stat(&mut self) -> Result<u64> {
        Ok(self.file()?.metadata()?.len())
    }

    fn seek(&mut self, offset: u64) -> Result<u64> {
        self.file()?.seek(SeekFrom::Start(offset))
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        read_fully(self.file()?, buffer)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize> {
        self.file()?.write_all(buffer)?;
        Ok(buffer.len())
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the file closes the descriptor.
        self.file.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn create_does_not_fail_on_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("existing.bin");
        fs::write(&path, [7u8; 16]).unwrap();

        let mut handle = FdStorageProvider
            .open(&path, OpenMode::read_write().create(true))
            .unwrap();
        assert_eq!(handle.stat().unwrap(), 16);

        let mut handle2 = FdStorageProvider
            .open(&path, OpenMode::read_write().create(true).truncate(true))
            .unwrap();
        assert_eq!(handle2.stat().unwrap(), 0);
        handle.close().unwrap();
        handle2.close().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn read_only_create_makes_a_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("created.bin");

        let mut handle = FdStorageProvider
            .open(&path, OpenMode::read_only().create(true))
            .unwrap();
        assert!(path.exists());
        assert_eq!(handle.stat().unwrap(), 0);

        let err = handle.write(b"x").unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
        handle.close().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn read_only_create_keeps_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.bin");
        fs::write(&path, b"0123").unwrap();

        let mut handle = FdStorageProvider
            .open(&path, OpenMode::read_only().create(true))
            .unwrap();
        let mut buffer = [0u8; 4];
        assert_eq!(handle.read(&mut buffer).unwrap(), 4);
        assert_eq!(&buffer, b"0123");
        handle.close().unwrap();
    }

    #[test]
    fn open_without_create_requires_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FdStorageProvider
            .open(&dir.path().join("missing.bin"), OpenMode::read_only())
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));
    }

    #[test]
    fn seek_read_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.bin");

        let mut handle = FdStorageProvider
            .open(&path, OpenMode::read_write().create(true))
            .unwrap();
        assert_eq!(handle.write(b"Hello, world!").unwrap(), 13);
        assert_eq!(handle.seek(7).unwrap(), 7);
        assert_eq!(handle.write(b"there").unwrap(), 5);

        let mut buffer = [0u8; 5];
        handle.seek(0).unwrap();
        assert_eq!(handle.read(&mut buffer).unwrap(), 5);
        assert_eq!(&buffer, b"Hello");

        handle.seek(10).unwrap();
        assert_eq!(handle.read(&mut buffer).unwrap(), 0, "end-of-data");
        handle.close().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"Hello, there!");
    }

    #[test]
    fn close_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("close.bin");

        let mut handle = FdStorageProvider
            .open(&path, OpenMode::read_write().create(true))
            .unwrap();
        handle.close().unwrap();
        handle.close().unwrap();

        let err = handle.seek(0).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    }
}
