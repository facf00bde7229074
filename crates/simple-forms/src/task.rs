//! Background form tasks

use crate::error::Result;
use crate::presenter::{Identity, Presenter};
use crate::strategy::Prepared;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

/// Handle to a form that is being shown
///
/// Dropping the handle detaches the task. Failures are also logged at
/// `error` level, so a detached task never loses one.
#[derive(Debug)]
pub struct FormTask {
    id: Uuid,
    join: JoinHandle<Result<()>>,
}

impl FormTask {
    pub(crate) fn spawn<I: Identity>(
        runtime: &Handle,
        prepared: Prepared<I>,
        presenter: Arc<dyn Presenter<I>>,
        identity: I,
    ) -> Self {
        let id = Uuid::new_v4();
        let span = tracing::debug_span!("form", %id, kind = %prepared.kind());

        let join = runtime.spawn(
            async move {
                let result = prepared.complete(presenter, identity).await;
                if let Err(e) = &result {
                    tracing::error!("form {} failed: {}", id, e);
                }
                result
            }
            .instrument(span),
        );

        Self { id, join }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait until the answer has been dispatched
    pub async fn wait(self) -> Result<()> {
        self.join.await?
    }
}
