//! Command dispatch
//!
//! Every command writes to the given sink so tests can capture output.
//! Command-line flags are the last configuration layer: they override the
//! loaded settings for the one command that reads them.

use std::io::Write;

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::CliResult;
use crate::config::Settings;
use crate::domain::{Sample, Tree, TreeConvert};
use crate::errors::TreeResult;
use crate::queue::{FreeList, QueueStrategy};
use crate::traversal::TraversalOrder;
use crate::visitor::{evaluate_in, evaluate_reversed};

pub fn execute_command<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Walk {
            order,
            queue,
            sample,
        }) => _walk(settings, order.as_deref(), queue.as_deref(), *sample, out),
        Some(Commands::Eval {
            order,
            reversed,
            sample,
        }) => _eval(settings, order.as_deref(), *reversed, *sample, out),
        Some(Commands::Show { sample }) => _show(*sample, out),
        Some(Commands::Samples) => _samples(out),
        Some(Commands::Config { template }) => _config(settings, *template, out),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "exprtree", out);
            Ok(())
        }
        None => {
            write!(out, "{}", Cli::command().render_help())?;
            Ok(())
        }
    }
}

/// Size and cap the queue-node pool used by level-order walks of samples.
#[instrument(level = "debug", skip(settings))]
pub fn prepare_free_list(settings: &Settings) -> FreeList<Tree<i64>> {
    let pool = FreeList::<Tree<i64>>::shared();
    pool.set_limit(settings.node_limit);
    pool.reserve(settings.free_list_prealloc);
    pool
}

fn resolve_order(flag: Option<&str>, fallback: TraversalOrder) -> TreeResult<TraversalOrder> {
    flag.map_or(Ok(fallback), str::parse)
}

fn resolve_queue(flag: Option<&str>, fallback: QueueStrategy) -> TreeResult<QueueStrategy> {
    flag.map_or(Ok(fallback), str::parse)
}

#[instrument(skip(settings, out))]
fn _walk<W: Write>(
    settings: &Settings,
    order: Option<&str>,
    queue: Option<&str>,
    sample: Sample,
    out: &mut W,
) -> CliResult<()> {
    let order = resolve_order(order, settings.traversal_order)?;
    let queue = resolve_queue(queue, settings.queue_strategy)?;
    debug!("walk {} with {} over {}", sample, order, queue);

    let tree = sample.build();
    let symbols = tree
        .iter_with(order, queue)?
        .map_ok(|node| node.to_string())
        .collect::<TreeResult<Vec<_>>>()?;
    for symbol in symbols {
        writeln!(out, "{}", symbol)?;
    }
    Ok(())
}

#[instrument(skip(settings, out))]
fn _eval<W: Write>(
    settings: &Settings,
    order: Option<&str>,
    reversed: bool,
    sample: Sample,
    out: &mut W,
) -> CliResult<()> {
    let tree = sample.build();
    let value = if reversed {
        evaluate_reversed(&tree)?
    } else {
        let order = resolve_order(order, TraversalOrder::PostOrder)?;
        debug!("evaluate {} in {} ({} configured for walks)", sample, order, settings.traversal_order);
        evaluate_in(&tree, order)?
    };
    writeln!(out, "{}", value)?;
    Ok(())
}

fn _show<W: Write>(sample: Sample, out: &mut W) -> CliResult<()> {
    write!(out, "{}", sample.build().to_tree_string())?;
    Ok(())
}

fn _samples<W: Write>(out: &mut W) -> CliResult<()> {
    for sample in Sample::ALL {
        writeln!(out, "{:<12} {}", sample.name(), sample.expression())?;
    }
    Ok(())
}

fn _config<W: Write>(settings: &Settings, template: bool, out: &mut W) -> CliResult<()> {
    if template {
        write!(out, "{}", Settings::template())?;
    } else {
        write!(out, "{}", settings.to_toml()?)?;
    }
    Ok(())
}
