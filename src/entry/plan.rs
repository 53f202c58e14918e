use clap::ArgMatches;
use tracing::debug;

use crate::app::run_local;
use crate::args::WblgArgs;
use crate::config::{LoadSettings, apply_config, load_config, resolve_settings};
use crate::error::{AppError, AppResult, InterfaceError};
use crate::system::interfaces::list_interfaces;

pub(crate) enum RunPlan {
    ListInterfaces(Vec<String>),
    Load(LoadSettings),
}

pub(crate) fn build_plan(mut args: WblgArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    let available = list_interfaces().map_err(AppError::interface)?;
    debug!(?available, "Discovered interfaces");

    if args.list_interfaces {
        return Ok(RunPlan::ListInterfaces(available));
    }

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    if available.is_empty() && args.interface.is_some() {
        return Err(AppError::interface(InterfaceError::NoneAvailable));
    }

    Ok(RunPlan::Load(resolve_settings(&args, &available)?))
}

pub(crate) async fn execute_plan(plan: RunPlan) -> AppResult<()> {
    match plan {
        RunPlan::ListInterfaces(names) => {
            println!("Available interfaces:");
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        RunPlan::Load(settings) => run_local(settings).await,
    }
}
