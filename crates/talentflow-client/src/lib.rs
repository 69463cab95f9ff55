//! Client-side state for talentflow: a query cache with cooperative
//! cancellation, optimistic update coordinators for board reorder and
//! pipeline stage moves, toast-style notifications, an HTTP API client,
//! and the in-progress assessment form draft.

pub mod api;
pub mod cache;
pub mod coordinator;
pub mod draft;
pub mod notify;

pub use api::{ApiError, CandidatesApi, HttpClient, JobsApi};
pub use cache::QueryCache;
pub use coordinator::{CandidatesCoordinator, JobsCoordinator};
pub use notify::{Notice, NoticeLevel, Notices};
