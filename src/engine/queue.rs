use crate::error::AppError;
use crate::models::walk::Walk;
use crate::state::AppState;

pub async fn enqueue_walk(state: &AppState, walk: Walk) -> Result<(), AppError> {
    state
        .walk_tx
        .send(walk)
        .await
        .map_err(|err| AppError::Internal(format!("walk queue send failed: {err}")))?;

    state.metrics.walks_in_queue.inc();
    Ok(())
}
