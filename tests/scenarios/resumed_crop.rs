//! Scenario: a cropping pass is cancelled and resumed
//!
//! The resumed pass only processes lots that are not already done, even
//! after the first pass's outputs were normalized.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;

use tempfile::tempdir;

use lotname::application::{
    BatchEvent, BatchJob, BatchRunner, CancelToken, CompletionTracker, NormalizeUseCase,
};
use lotname::domain::services::{NameCodec, RenamePlanner};
use lotname::domain::value_objects::LotId;
use lotname::error::LotResult;
use lotname::infrastructure::{LocalFs, TextLedgerRepository};

use crate::common::{file_names, write_images};

#[test]
fn scenario_cancel_normalize_resume() {
    let root = tempdir().unwrap();
    let (input, output) = (root.path().join("in"), root.path().join("out"));
    write_images(&input, &["6.jpg", "6(1).jpg", "7.jpg", "8.jpg"]);
    fs::create_dir_all(&output).unwrap();

    let tracker = CompletionTracker::new(LocalFs::new(), NameCodec::default(), TextLedgerRepository::new());
    let cancel = CancelToken::new();
    let cropped = AtomicUsize::new(0);
    let runner = BatchRunner::new(|source: &Path, destination: &Path| -> LotResult<()> {
        fs::copy(source, destination)?;
        if cropped.fetch_add(1, Ordering::SeqCst) + 1 == 2 {
            cancel.cancel();
        }
        Ok(())
    });

    // First pass stops after lot 6
    let jobs = BatchJob::for_inputs(tracker.pending_inputs(&input, &output).unwrap(), &output);
    assert_eq!(jobs.len(), 4);
    let (tx, rx) = mpsc::channel();
    let summary = runner.run(&jobs, &tx, &cancel);
    assert!(summary.cancelled);
    assert_eq!(summary.processed, 2);

    let events: Vec<BatchEvent> = rx.try_iter().collect();
    assert_eq!(events.first(), Some(&BatchEvent::Started { total: 4 }));
    assert_eq!(
        events.last(),
        Some(&BatchEvent::Finished {
            processed: 2,
            failed: 0,
            cancelled: true,
        })
    );

    // Normalizing the partial output does not make lot 6 look unfinished
    NormalizeUseCase::new(LocalFs::new(), RenamePlanner::default(), ".lotname-tmp-")
        .normalize(&output, false)
        .unwrap();
    assert_eq!(file_names(&output), ["6(1).jpg", "6(2).jpg"]);

    // Second pass only sees lots 7 and 8
    let pending = tracker.pending_inputs(&input, &output).unwrap();
    assert_eq!(pending, [input.join("7.jpg"), input.join("8.jpg")]);

    let (tx, _rx) = mpsc::channel();
    let summary = BatchRunner::new(|source: &Path, destination: &Path| -> LotResult<()> {
        fs::copy(source, destination)?;
        Ok(())
    })
    .run(&BatchJob::for_inputs(pending, &output), &tx, &CancelToken::new());
    assert_eq!(summary.processed, 2);
    assert!(!summary.cancelled);

    let done = tracker.already_done(&input, &output, false).unwrap();
    assert_eq!(
        done.into_iter().collect::<Vec<_>>(),
        [LotId::new("6"), LotId::new("7"), LotId::new("8")]
    );
}
