/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use clap::{error::ErrorKind, Parser};
use transposer_providers::pipeline::run_config;
use transposer_tools::utils::{init_subscriber, CMDResult, TransposeArgs};

fn main() {
    init_subscriber();

    if let Err(err) = run() {
        tracing::error!("{}", err);
        std::process::exit(err.exit_code);
    }
}

fn run() -> CMDResult<()> {
    let args = match TransposeArgs::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return Err(err.into()),
    };

    let config = args.into_config()?;
    run_config(&config)?;
    Ok(())
}
