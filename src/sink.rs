//! Job sink
//!
//! Persists a compiled job. Only a [`MillJob`] can be written, and one only
//! exists once compilation has fully succeeded.

use brdmill_camtools::MillJob;
use std::io;
use std::path::Path;
use tracing::info;

/// Write the job text to `path`, replacing any previous job
pub fn write_job(path: &Path, job: &MillJob) -> io::Result<()> {
    std::fs::write(path, job.commands())?;
    info!(
        layer = job.layer(),
        bytes = job.commands().len(),
        "Wrote mill job to {}",
        path.display()
    );
    Ok(())
}
