//! Parallel conversion of independent documents, one per worker.

use std::collections::HashMap;
use std::path::PathBuf;

use rayon::prelude::*;

use crate::errors::{ConversionError, Result};
use crate::models::{ConversionOptions, ConversionReport, ConversionRequest};
use crate::storage::{convert_request, OutputLocks};
use log::{info, warn};

/// Converts every request in parallel. Results keep the order of `requests`.
///
/// When several valid requests name the same output file, the first one wins
/// and the later ones fail with [`ConversionError::OutputBusy`], whatever order
/// the workers happen to run in. Invalid requests fail with their own error and
/// never claim a path.
pub fn convert_batch(
    requests: &[ConversionRequest],
    options: &ConversionOptions,
) -> Vec<Result<ConversionReport>> {
    convert_batch_with_locks(requests, options, &OutputLocks::new())
}

/// Like [`convert_batch`], but claims output paths in a registry shared with
/// other batches or callers running at the same time.
pub fn convert_batch_with_locks(
    requests: &[ConversionRequest],
    options: &ConversionOptions,
    locks: &OutputLocks,
) -> Vec<Result<ConversionReport>> {
    let mut first_claim: HashMap<PathBuf, usize> = HashMap::new();
    let owners: Vec<Option<usize>> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            request
                .validate()
                .ok()
                .map(|()| *first_claim.entry(request.output_path()).or_insert(index))
        })
        .collect();

    let results: Vec<Result<ConversionReport>> = requests
        .par_iter()
        .enumerate()
        .map(|(index, request)| {
            request.validate()?;
            let output_path = request.output_path();
            if let Some(owner) = owners[index].filter(|&owner| owner != index) {
                warn!(
                    "[convert_batch] Request {} duplicates the output of request {}: '{}'",
                    index,
                    owner,
                    output_path.display()
                );
                return Err(ConversionError::OutputBusy(output_path));
            }
            let _guard = locks.acquire(&output_path)?;
            convert_request(request, options)
        })
        .collect();

    let succeeded = results.iter().filter(|r| r.is_ok()).count();
    info!(
        "Batch finished: {} of {} conversion(s) succeeded",
        succeeded,
        requests.len()
    );
    results
}
