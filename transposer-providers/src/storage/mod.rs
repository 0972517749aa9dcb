/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

mod storage_provider;
pub use storage_provider::{OpenMode, StorageHandle, StorageProvider};

mod fd_storage_provider;
pub use fd_storage_provider::{FdHandle, FdStorageProvider};

mod stream_storage_provider;
pub use stream_storage_provider::{StreamHandle, StreamStorageProvider};
