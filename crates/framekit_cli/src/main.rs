//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `framekit_core` linkage and storage bootstrap.
//! - Run one accepted and one rejected placement on an in-memory store.
//! - Keep output deterministic for quick local sanity checks.

use framekit_core::db::open_db_in_memory;
use framekit_core::{
    CircleDraft, CircleService, CircleServiceError, FrameDraft, FrameService,
    SqliteSpatialRepository,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("framekit_core ping={}", framekit_core::ping());
    println!("framekit_core version={}", framekit_core::core_version());

    match smoke() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("framekit smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn smoke() -> Result<(), Box<dyn Error>> {
    let conn = open_db_in_memory()?;
    let repo = SqliteSpatialRepository::try_new(&conn)?;
    let frames = FrameService::new(repo);
    let circles = CircleService::new(repo);

    let frame = frames.create_frame(&FrameDraft::new(0.0, 0.0, 10.0, 10.0))?;
    circles.create_circle(frame.uuid, &CircleDraft::new(0.0, 0.0, 2.0))?;

    match circles.create_circle(frame.uuid, &CircleDraft::new(1.0, 0.0, 2.0)) {
        Err(CircleServiceError::Invalid(errors)) => {
            println!("touching circle rejected: {}", errors.full_messages().join("; "));
        }
        Ok(_) => return Err("touching circle was accepted".into()),
        Err(other) => return Err(other.into()),
    }

    let summary = frames.frame_summary(frame.uuid)?;
    println!("frame circles={}", summary.total_circles);
    Ok(())
}
