//! Actions representing side effects to be executed by the host.
//!
//! The event handler returns a `Vec<Action>` after processing each event.
//! Actions are the boundary between the pure state transitions inside the
//! core and the effectful operations the embedding host performs: talking to
//! the worker and handing files to the user.

use crate::worker::RepoRequest;

/// Commands produced by the event handler for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a request to the catalog worker.
    ///
    /// Enables asynchronous loads, saves, and exports without blocking the
    /// event loop. The matching [`RepoResponse`](crate::worker::RepoResponse)
    /// comes back as a later event.
    PostToWorker(RepoRequest),

    /// Offers a produced file to the user for download.
    DownloadFile {
        /// Suggested file name, extension included.
        name: String,
        /// File contents.
        bytes: Vec<u8>,
    },
}
