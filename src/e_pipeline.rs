use crate::e_dispatcher::FlowDispatcher;
use crate::e_error::FlowError;
use crate::e_file::PipelineFile;
use crate::e_fmt::format_elapsed;
use crate::prelude::*;

/// What came out the far end of one run.
#[derive(Debug, Default)]
pub struct PipelineOutcome {
    /// Files forwarded downstream, in arrival order.
    pub forwarded: Vec<PipelineFile>,
    /// Files the dispatcher refused, with the reason.
    pub rejected: Vec<FlowError>,
    pub passed: bool,
}

/// Feeds `files` through the dispatcher and finishes the run.
///
/// With the `concurrent` feature and `jobs > 1` the per-file work runs on a
/// thread pool; results are still returned in arrival order.
pub fn run_pipeline<I>(dispatcher: &FlowDispatcher, files: I, jobs: usize) -> PipelineOutcome
where
    I: IntoIterator<Item = PipelineFile>,
{
    let start = Instant::now();
    let results = transform_all(dispatcher, files, jobs);

    let mut outcome = PipelineOutcome::default();
    for result in results {
        match result {
            Ok(file) => outcome.forwarded.push(file),
            Err(e) => outcome.rejected.push(e),
        }
    }
    outcome.passed = dispatcher.finish();
    debug!(
        "pipeline finished in {}: {} forwarded, {} rejected",
        format_elapsed(start.elapsed()),
        outcome.forwarded.len(),
        outcome.rejected.len()
    );
    outcome
}

#[cfg(feature = "concurrent")]
fn transform_all<I>(
    dispatcher: &FlowDispatcher,
    files: I,
    jobs: usize,
) -> Vec<Result<PipelineFile, FlowError>>
where
    I: IntoIterator<Item = PipelineFile>,
{
    if jobs <= 1 {
        return files.into_iter().map(|f| dispatcher.transform(f)).collect();
    }

    use threadpool::ThreadPool;
    let pool = ThreadPool::new(jobs);
    let (tx, rx) = std::sync::mpsc::channel();
    let mut count = 0;
    for (index, file) in files.into_iter().enumerate() {
        let tx = tx.clone();
        let dispatcher = dispatcher.clone();
        pool.execute(move || {
            let result = dispatcher.transform(file);
            // The receiver outlives the pool; a send can only fail if it was dropped.
            let _ = tx.send((index, result));
        });
        count += 1;
    }
    drop(tx);
    pool.join();

    let mut results: Vec<(usize, Result<PipelineFile, FlowError>)> = rx.iter().collect();
    if results.len() != count {
        warn!(
            "{} of {} files were lost by a panicking worker",
            count - results.len(),
            count
        );
    }
    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

#[cfg(not(feature = "concurrent"))]
fn transform_all<I>(
    dispatcher: &FlowDispatcher,
    files: I,
    jobs: usize,
) -> Vec<Result<PipelineFile, FlowError>>
where
    I: IntoIterator<Item = PipelineFile>,
{
    if jobs > 1 {
        debug!("built without the concurrent feature; ignoring jobs = {}", jobs);
    }
    files.into_iter().map(|f| dispatcher.transform(f)).collect()
}
