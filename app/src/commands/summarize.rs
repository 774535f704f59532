use std::path::Path;

use anyhow::Result;
use ycs_core::domain::LabeledDataset;
use ycs_core::store::load_labeled;

use super::report;
use crate::cli::ReportArgs;

pub fn run(input: &Path, args: &ReportArgs) -> Result<()> {
    let labeled = LabeledDataset::new(load_labeled(input)?);
    report::emit(&labeled, args)
}
