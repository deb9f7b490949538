//! LoadProfileHandler - Query handler for the profile page.

use tracing::instrument;

use crate::adapters::store::ReportStoreAdapter;
use crate::domain::foundation::UserId;
use crate::domain::report::ProfileView;
use crate::ports::StoreError;

/// What the profile page should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileOutcome {
    Found(ProfileView),
    /// Signed in, but no assessment has been saved yet.
    NoAssessmentYet,
    /// Not signed in; sample content.
    Demo(ProfileView),
}

pub struct LoadProfileHandler {
    store: ReportStoreAdapter,
}

impl LoadProfileHandler {
    pub fn new(store: ReportStoreAdapter) -> Self {
        Self { store }
    }

    #[instrument(skip(self), fields(signed_in = identity.is_some()))]
    pub async fn handle(&self, identity: Option<&UserId>) -> Result<ProfileOutcome, StoreError> {
        let Some(identity) = identity else {
            return Ok(ProfileOutcome::Demo(ProfileView::demo()));
        };

        Ok(match self.store.load(identity).await? {
            Some(view) => ProfileOutcome::Found(view),
            None => ProfileOutcome::NoAssessmentYet,
        })
    }
}
