use async_trait::async_trait;

use crate::allocation::allocation_model::{
    AllocationRequest, AllocationResult, MilitaryContributionRecord, MilitaryContributionRequest,
    ReversalResult,
};
use crate::errors::Result;

/// Posts 100%-vested earnings rows for every eligible participant of a plan
/// year.
#[async_trait]
pub trait AllocationServiceTrait: Send + Sync {
    async fn apply(&self, request: AllocationRequest) -> Result<AllocationResult>;
}

/// Removes a plan year's engine-created rows and repairs the derived
/// snapshots.
#[async_trait]
pub trait ReversalServiceTrait: Send + Sync {
    async fn revert(&self, plan_year: i16) -> Result<ReversalResult>;
}

/// Posts individual military-service contributions.
#[async_trait]
pub trait MilitaryServiceTrait: Send + Sync {
    async fn post_contribution(
        &self,
        request: MilitaryContributionRequest,
    ) -> Result<MilitaryContributionRecord>;
}

/// Hook for hosts that want to meter engine activity. The engine reports
/// outcomes after each committed run; observers must not fail.
pub trait PostingObserver: Send + Sync {
    fn allocation_applied(&self, plan_year: i16, result: &AllocationResult);
    fn allocation_reverted(&self, plan_year: i16, result: &ReversalResult);
    fn military_posted(&self, record: &MilitaryContributionRecord);
}

/// Default observer that ignores every event.
#[derive(Debug, Default, Clone)]
pub struct NoopObserver;

impl PostingObserver for NoopObserver {
    fn allocation_applied(&self, _plan_year: i16, _result: &AllocationResult) {}
    fn allocation_reverted(&self, _plan_year: i16, _result: &ReversalResult) {}
    fn military_posted(&self, _record: &MilitaryContributionRecord) {}
}
