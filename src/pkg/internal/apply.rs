use bson::oid::ObjectId;

use crate::{
    pkg::internal::{
        adaptors::{
            applications::{
                mutators::ApplicationMutator, selectors::ApplicationSelector, spec::ApplyInput,
            },
            jobs::mutators::JobMutator,
        },
        store::{DocumentStore, InsertOutcome},
    },
    prelude::{AppError, Result},
};

/// Records an application and bumps the job's applicant counter.
///
/// The duplicate check, the increment and the insert are separate store
/// operations. A failed insert is compensated with a decrement; a crash between
/// the increment and the insert leaves the counter one too high.
pub async fn apply_to_job(store: &dyn DocumentStore, input: ApplyInput) -> Result<InsertOutcome> {
    let applied = ApplicationSelector::new(store)
        .has_applied(&input.job_id, &input.email)
        .await?;
    if applied {
        tracing::warn!("{} already applied to job {}", &input.email, &input.job_id);
        return Err(AppError::Conflict(
            "User has already applied for this job".into(),
        ));
    }

    let jobs = JobMutator::new(store);
    // a malformed id can't name a job; treat it like a missing one
    let (job_id, job) = match ObjectId::parse_str(&input.job_id) {
        Ok(oid) => (Some(oid), jobs.add_applicants(&oid, 1).await?),
        Err(_) => (None, None),
    };
    let (Some(job_id), Some(job)) = (job_id, job) else {
        tracing::warn!("job {} not found, application dropped", &input.job_id);
        return Err(AppError::Internal(
            "Failed to update \"applicants\" count".into(),
        ));
    };

    let application = input.into_entry(&job);
    match ApplicationMutator::new(store).create(&application).await {
        Ok(outcome) => {
            tracing::info!(
                "{} applied to job {}",
                &application.email,
                &application.job_id
            );
            Ok(outcome)
        }
        Err(e) => {
            if let Err(rollback) = jobs.add_applicants(&job_id, -1).await {
                tracing::error!(
                    "could not roll back applicant count for job {}: {}",
                    &application.job_id,
                    rollback
                );
            }
            Err(e)
        }
    }
}
