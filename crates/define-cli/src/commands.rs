//! Listing commands.

use anyhow::{Result, anyhow};
use define_cli::{ExternalCodes, NameFilter, ReportOptions, load_document, report};
use define_model::MetadataVersion;
use tracing::{debug, info_span, warn};

use crate::cli::{CodesArgs, ListArgs};
use crate::table::print_report;

pub fn run_datasets(args: &ListArgs) -> Result<()> {
    with_metadata(args, "datasets", |mdv, options| {
        print_report(&report::datasets(mdv, options));
    })
}

pub fn run_vars(args: &ListArgs) -> Result<()> {
    with_metadata(args, "vars", |mdv, options| {
        print_report(&report::variables(mdv, options));
    })
}

pub fn run_codelists(args: &ListArgs) -> Result<()> {
    with_metadata(args, "codelists", |mdv, options| {
        print_report(&report::code_lists(mdv, options));
    })
}

pub fn run_codes(args: &CodesArgs) -> Result<()> {
    let external = if args.hide_external {
        ExternalCodes::Hide
    } else if args.only_external {
        ExternalCodes::Only
    } else {
        ExternalCodes::Show
    };
    with_metadata(&args.list, "codes", |mdv, options| {
        let reports = report::codes(mdv, options, external);
        debug!(
            coded = reports.coded.len(),
            external = reports.external.len(),
            "codes listing"
        );
        print_report(&reports.coded);
        print_report(&reports.external);
    })
}

/// Loads the file, builds report options, and hands the metadata to `print`.
fn with_metadata<F>(args: &ListArgs, command: &str, print: F) -> Result<()>
where
    F: FnOnce(&MetadataVersion, &ReportOptions),
{
    let span = info_span!("command", name = command, file = %args.file.display());
    let _guard = span.enter();

    let options = report_options(args)?;
    let document = load_document(&args.file, &args.encoding)?;
    let Some(mdv) = document.metadata_version() else {
        warn!("study {} has no MetaDataVersion, nothing to list", document.study.oid);
        return Ok(());
    };
    print(mdv, &options);
    Ok(())
}

fn report_options(args: &ListArgs) -> Result<ReportOptions> {
    let filter = args
        .filter
        .as_deref()
        .map(NameFilter::new)
        .transpose()
        .map_err(|error| anyhow!("invalid filter value: {error}"))?;
    Ok(ReportOptions {
        lang: args.lang.clone(),
        extended: args.extended,
        filter,
    })
}
