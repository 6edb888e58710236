//! Completion rule - decides whether a lot needs no further work
//!
//! Input and output images are paired by display rank: the cropper writes one
//! output per input and normalization then renames outputs (`6.jpg` becomes
//! `6(1).jpg`), so the n-th input image corresponds to the n-th output image
//! of the same lot. An identical basename in the output also counts.

use std::collections::BTreeSet;

use crate::domain::entities::Lot;

/// How many of `input`'s images are accounted for in the output folder.
///
/// With a `ledger`, an input image only counts if its basename has also been
/// recorded as reviewed.
pub fn accounted_for(input: &Lot, output: Option<&Lot>, ledger: Option<&BTreeSet<String>>) -> usize {
    let output_len = output.map_or(0, Lot::len);
    let output_names: BTreeSet<&str> = output
        .map(|lot| lot.assets().iter().map(|a| a.file_name()).collect())
        .unwrap_or_default();

    input
        .assets()
        .iter()
        .enumerate()
        .filter(|(index, asset)| *index < output_len || output_names.contains(asset.file_name()))
        .filter(|(_, asset)| ledger.map_or(true, |reviewed| reviewed.contains(asset.file_name())))
        .count()
}

/// A lot is done when every input image is accounted for
pub fn is_done(input: &Lot, output: Option<&Lot>, ledger: Option<&BTreeSet<String>>) -> bool {
    !input.is_empty() && accounted_for(input, output, ledger) == input.len()
}
