//! Incremental suggestion loading for the results screen

use crate::model::Outcome;
use super::AppController;

impl AppController {
    /// Fetch more suggestions, excluding every dish already shown.
    ///
    /// Triggers arriving while a fetch is in flight, or after the list is
    /// exhausted, are dropped. Failures are logged and never shown.
    pub async fn load_more_suggestions(&self) {
        let model = self.model.lock().await;
        let Some(client) = model.get_client() else {
            return;
        };
        let session = model.session.clone();
        drop(model);

        let Some(request) = session.lock().await.begin_load_more() else {
            tracing::trace!("Load more skipped");
            return;
        };

        tracing::debug!(
            generation = request.generation,
            exclude = request.exclude.len(),
            "Loading more suggestions"
        );

        let result = client
            .suggest_dishes(&request.ingredients, request.image.as_deref(), &request.exclude)
            .await
            .map_err(|e| {
                let e = e.into_pagination();
                tracing::warn!(error = %e, "Pagination fetch failed");
                e.to_string()
            });
        let loaded = result.as_ref().map(Vec::len).ok();

        let mut session = session.lock().await;
        match session.finish_load_more(request.generation, result) {
            Outcome::Applied if session.has_reached_end => {
                tracing::info!(total = session.suggestions.len(), "No more suggestions")
            }
            Outcome::Applied => tracing::info!(
                loaded = ?loaded,
                total = session.suggestions.len(),
                "Loaded more suggestions"
            ),
            Outcome::Stale => {
                tracing::debug!(generation = request.generation, "Discarded stale suggestions page")
            }
        }
    }
}
