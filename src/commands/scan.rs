//! Scan command implementation

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::cli::{OutputFormat, ScanArgs, SortOrder};
use crate::config::Config;
use crate::scanner::{
    format_banner, format_json, format_listing, format_size, format_tree, spawn_build,
    BuildHandle, FolderNode, FormatOptions, ScanOptions,
};
use crate::signals::install_cancel_handler;

const SPINNER_INTERVAL: Duration = Duration::from_millis(100);

/// Scan settings after merging command-line flags over the config file.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub format: OutputFormat,
    pub sort: SortOrder,
    pub scan_options: ScanOptions,
    pub format_options: FormatOptions,
}

impl ScanPlan {
    pub fn resolve(args: &ScanArgs, config: &Config) -> Result<Self> {
        let format = match args.format {
            Some(format) => format,
            None => parse_format(&config.output.format)?,
        };
        let sort = match args.sort {
            Some(sort) => sort,
            None => parse_sort(&config.output.sort)?,
        };

        let depth_limit = args.depth_limit.unwrap_or(config.scanner.depth_limit);
        if depth_limit == 0 {
            bail!("--depth-limit must be greater than 0");
        }

        let scan_options = ScanOptions::new()
            .with_follow_symlinks(config.scanner.follow_symlinks && !args.no_follow_links)
            .with_depth_limit(depth_limit);

        let format_options = FormatOptions::new()
            .with_max_depth(args.max_depth.unwrap_or(config.output.max_depth))
            .with_counts(config.output.show_counts && !args.no_counts);

        Ok(Self {
            format,
            sort,
            scan_options,
            format_options,
        })
    }
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "listing" => Ok(OutputFormat::Listing),
        "tree" => Ok(OutputFormat::Tree),
        "json" => Ok(OutputFormat::Json),
        other => bail!("Unknown output format '{}'", other),
    }
}

fn parse_sort(s: &str) -> Result<SortOrder> {
    match s.to_lowercase().as_str() {
        "none" => Ok(SortOrder::None),
        "name" => Ok(SortOrder::Name),
        "size" => Ok(SortOrder::Size),
        other => bail!("Unknown sort order '{}'", other),
    }
}

/// Run the scan command
pub fn run(args: ScanArgs, config: &Config, quiet: bool) -> Result<()> {
    let plan = ScanPlan::resolve(&args, config)?;

    tracing::info!(path = %args.path.display(), "Scanning directory");

    let handle = spawn_build(&args.path, plan.scan_options.clone());
    if let Err(err) = install_cancel_handler(handle.cancel_flag()) {
        tracing::warn!(%err, "Could not install interrupt handler");
    }

    let mut tree = wait_with_spinner(handle, quiet || plan.format == OutputFormat::Json)?;

    match plan.sort {
        SortOrder::None => {}
        SortOrder::Name => tree.sort_by_name(),
        SortOrder::Size => tree.sort_by_size(),
    }

    print!("{}", render(&tree, &args.path, &plan, quiet)?);

    Ok(())
}

fn wait_with_spinner(handle: BuildHandle, hidden: bool) -> crate::Result<FolderNode> {
    let spinner = if hidden {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner
    };

    while !handle.is_finished() {
        let progress = handle.progress();
        spinner.set_message(format!(
            "Scanning... {} folders, {} files",
            progress.folders(),
            progress.files()
        ));
        spinner.tick();
        thread::sleep(SPINNER_INTERVAL);
    }
    spinner.finish_and_clear();

    handle.join()
}

/// Render a finished tree in the planned format.
pub fn render(tree: &FolderNode, root: &Path, plan: &ScanPlan, quiet: bool) -> Result<String> {
    let output = match plan.format {
        OutputFormat::Listing => {
            let mut output = String::new();
            if !quiet {
                let shown = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
                output.push_str(&format_banner(&shown));
            }
            output.push_str(&format_listing(tree));
            output
        }
        OutputFormat::Tree => {
            let mut output = format_tree(tree, &plan.format_options);
            if !quiet {
                output.push_str(&format!(
                    "\nTotal: {} in {} files, {} folders\n",
                    format_size(tree.total_size()),
                    tree.recursive_file_count(),
                    tree.folder_count()
                ));
            }
            output
        }
        OutputFormat::Json => format!("{}\n", format_json(tree, true)?),
    };

    Ok(output)
}
