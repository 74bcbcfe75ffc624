// src/actions.rs
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::types::job::JobView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobAction {
    Apply,
    Track,
    Bookmark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "url", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// A caller-supplied handler took care of it
    Handled,
    /// The job's own link should be opened
    OpenLink(String),
    /// Nothing to do for this job
    Unavailable,
}

/// Run a card action. A supplied handler always wins; without one, Apply falls
/// back to the job link and Track/Bookmark do nothing beyond logging.
pub fn perform_action(
    action: JobAction,
    job: &JobView,
    handler: Option<&dyn Fn(&JobView)>,
) -> ActionOutcome {
    if let Some(handler) = handler {
        handler(job);
        return ActionOutcome::Handled;
    }

    match action {
        JobAction::Apply => match &job.link {
            Some(link) => ActionOutcome::OpenLink(link.clone()),
            None => {
                info!("No job link available for: {}", job.title);
                ActionOutcome::Unavailable
            }
        },
        JobAction::Track | JobAction::Bookmark => {
            info!("{:?} is not available yet for job {}", action, job.id);
            ActionOutcome::Unavailable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::RawJob;
    use crate::view::build_view;
    use chrono::Utc;
    use std::cell::Cell;

    fn job(link: Option<&str>) -> JobView {
        let raw = RawJob {
            title: Some("Rust Engineer".into()),
            link: link.map(str::to_string),
            ..RawJob::new(1)
        };
        build_view(&raw, Utc::now())
    }

    #[test]
    fn test_apply_opens_link() {
        let outcome = perform_action(JobAction::Apply, &job(Some("https://jobs.example/1")), None);
        assert_eq!(outcome, ActionOutcome::OpenLink("https://jobs.example/1".into()));
    }

    #[test]
    fn test_apply_without_link() {
        assert_eq!(
            perform_action(JobAction::Apply, &job(None), None),
            ActionOutcome::Unavailable
        );
    }

    #[test]
    fn test_handler_takes_precedence() {
        let calls = Cell::new(0);
        let handler = |_: &JobView| calls.set(calls.get() + 1);

        for action in [JobAction::Apply, JobAction::Track, JobAction::Bookmark] {
            let outcome = perform_action(action, &job(Some("https://jobs.example/1")), Some(&handler));
            assert_eq!(outcome, ActionOutcome::Handled);
        }
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_track_and_bookmark_are_noops() {
        assert_eq!(
            perform_action(JobAction::Track, &job(Some("https://x")), None),
            ActionOutcome::Unavailable
        );
        assert_eq!(
            perform_action(JobAction::Bookmark, &job(None), None),
            ActionOutcome::Unavailable
        );
    }
}
