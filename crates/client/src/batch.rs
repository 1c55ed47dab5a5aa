//! Client-side fan-out of independent calls.
//!
//! Calls in a batch run concurrently and are not atomic: earlier successes
//! stay applied when a later call fails. The report keeps every per-call
//! outcome and collapses failure into a single [`ClientError::BatchFailed`].

use futures::future::join_all;
use parish_core::member::FamilyRole;
use parish_core::types::DbId;

use crate::types::Member;
use crate::{ClientError, ClientResult, Session};

/// Outcome of each call, keyed by the id it acted on, in request order.
#[derive(Debug)]
pub struct BatchReport<T> {
    pub outcomes: Vec<(DbId, ClientResult<T>)>,
}

impl<T> BatchReport<T> {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    /// All results, or one `BatchFailed` if any call failed.
    pub fn into_result(self) -> ClientResult<Vec<T>> {
        let failed = self.failed_count();
        if failed > 0 {
            return Err(ClientError::BatchFailed(format!(
                "{failed} of {} updates failed",
                self.outcomes.len()
            )));
        }
        self.outcomes
            .into_iter()
            .map(|(_, result)| result)
            .collect()
    }
}

/// Place several members in the same family (and optionally house) with one
/// concurrent request per member.
pub async fn add_members_to_family(
    session: &Session,
    family_id: DbId,
    member_ids: &[DbId],
    house_id: Option<DbId>,
    family_role: Option<FamilyRole>,
) -> BatchReport<Member> {
    let calls = member_ids
        .iter()
        .map(|&id| async move {
            let result = session
                .assign_family(id, family_id, house_id, family_role)
                .await;
            (id, result)
        });
    let outcomes = join_all(calls).await;

    let report = BatchReport { outcomes };
    if !report.is_success() {
        tracing::warn!(
            family_id,
            failed = report.failed_count(),
            total = member_ids.len(),
            "Batch family assignment partially failed"
        );
    }
    report
}
