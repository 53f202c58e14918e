use clap::Parser;

use crate::error::{AppError, AppResult};

use super::WblgArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<WblgArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    WblgArgs::try_parse_from(args).map_err(AppError::from)
}
