pub mod collaborators;
pub mod curriculum;
pub mod progress;

pub use collaborators::{
    BadgeGranter, ProgressEventSink, StorageBadgeGranter, TracingEventSink,
};
pub use curriculum::CurriculumService;
pub use progress::ProgressService;
