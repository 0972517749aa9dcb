/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

//! One complete run: optional source initialization followed by the transpose.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{debug, info};
use transposer::{
    error::ErrorContext, Algorithm, Dims, Driver, FileRole, TransposeError, TransposeResult,
};

use crate::{
    init::initialize,
    storage::{
        FdStorageProvider, OpenMode, StorageHandle, StorageProvider, StreamStorageProvider,
    },
    transpose::transpose,
    utils::{natural_unit, Timer},
    validate::{validate, SizePolicy},
};

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransposeConfig {
    /// Source file, read under the `jki` layout.
    pub input: PathBuf,
    /// Destination file, written under the `jik` layout. Optional only when the run just
    /// initializes the source.
    pub output: Option<PathBuf>,
    pub dims: Dims,
    /// Reject files larger than the dimensions require.
    pub exact_dims: bool,
    pub algorithm: Algorithm,
    pub driver: Driver,
    /// Fill the source with synthetic data before transposing.
    pub init_input: bool,
}

impl TransposeConfig {
    /// A transpose of `input` into `output` with the default algorithm and driver.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, dims: Dims) -> Self {
        Self {
            input: input.into(),
            output: Some(output.into()),
            dims,
            exact_dims: false,
            algorithm: Algorithm::default(),
            driver: Driver::default(),
            init_input: false,
        }
    }

    pub fn size_policy(&self) -> SizePolicy {
        SizePolicy::from_exact(self.exact_dims)
    }
}

/// What a successful run measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub init_elapsed: Option<Duration>,
    pub transpose_elapsed: Option<Duration>,
    /// Byte length of the source, once validated.
    pub input_size: Option<u64>,
    /// Byte length of a pre-existing destination, once validated.
    pub output_size: Option<u64>,
}

/// Run `config` on the provider its `driver` names.
pub fn run_config(config: &TransposeConfig) -> TransposeResult<RunSummary> {
    match config.driver {
        Driver::Fd => run(&FdStorageProvider, config),
        Driver::Stream => run(&StreamStorageProvider, config),
    }
}

/// Initialize and/or transpose according to `config`, using `storage` for every file.
pub fn run<S: StorageProvider>(
    storage: &S,
    config: &TransposeConfig,
) -> TransposeResult<RunSummary> {
    let mut summary = RunSummary::default();
    let dims = &config.dims;
    let policy = config.size_policy();

    info!("using i/o driver '{}'", storage.name());
    let mut timer = Timer::new();

    if config.init_input {
        let (mut source, _) = open_creating(
            storage,
            &config.input,
            OpenMode::read_write().create(true).truncate(true),
            FileRole::Input,
        )?;
        info!("init input file using algorithm '{}'", config.algorithm);

        timer.reset();
        initialize(config.algorithm, dims, &mut source)?;
        close(&mut source, FileRole::Input)?;
        let elapsed = timer.elapsed();
        info!("elapsed file init time {:.6} s", elapsed.as_secs_f64());
        summary.init_elapsed = Some(elapsed);

        if config.output.is_none() {
            return Ok(summary);
        }
    }

    let output = config
        .output
        .as_deref()
        .ok_or_else(|| TransposeError::log_config_error("no output file name provided"))?;

    let mut source = storage
        .open(&config.input, OpenMode::read_only())
        .with_context(|| {
            format!(
                "unable to open input file for reading: {}",
                config.input.display()
            )
        })?;
    info!("input file open for reading: {}", config.input.display());

    let input_size = validate(&mut source, FileRole::Input, dims, policy)?;
    log_sizes(dims, FileRole::Input, input_size);
    summary.input_size = Some(input_size);

    let (mut destination, existed) = open_creating(
        storage,
        output,
        OpenMode::read_write().create(true),
        FileRole::Output,
    )?;
    if existed {
        let output_size = validate(&mut destination, FileRole::Output, dims, policy)?;
        log_sizes(dims, FileRole::Output, output_size);
        summary.output_size = Some(output_size);
    }
    info!("output file open for writing: {}", output.display());

    info!("using algorithm '{}'", config.algorithm);
    timer.reset();
    transpose(config.algorithm, dims, &mut source, &mut destination)?;
    close(&mut destination, FileRole::Output)?;
    let elapsed = timer.elapsed();
    info!("elapsed file processing time {:.6} s", elapsed.as_secs_f64());
    summary.transpose_elapsed = Some(elapsed);

    close(&mut source, FileRole::Input)?;
    Ok(summary)
}

/// Open with `mode`, falling back to opening without `create` when the provider refuses
/// to create an existing path. The flag is set when the fallback was taken.
fn open_creating<S: StorageProvider>(
    storage: &S,
    path: &Path,
    mode: OpenMode,
    role: FileRole,
) -> TransposeResult<(S::Handle, bool)> {
    match storage.open(path, mode) {
        Ok(handle) => Ok((handle, false)),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            debug!("{} file {} already exists", role, path.display());
            let handle = storage
                .open(path, mode.create(false))
                .with_context(|| format!("unable to open {} file: {}", role, path.display()))?;
            Ok((handle, true))
        }
        Err(err) => Err(TransposeError::from(err)
            .context(format!("unable to create {} file: {}", role, path.display()))),
    }
}

fn close<H: StorageHandle>(handle: &mut H, role: FileRole) -> TransposeResult<()> {
    handle
        .close()
        .with_context(|| format!("unable to close {} file", role))
}

fn log_sizes(dims: &Dims, role: FileRole, actual: u64) {
    info!("{} data source is {}", dims, natural_unit(dims.byte_len()));
    info!("{} file is {}", role, natural_unit(actual));
}
