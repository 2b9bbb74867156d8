//! Workflow engine: the read → decide → versioned write → notify loop.
//!
//! Each mutating operation loads the item fresh, runs one of the pure rule
//! functions, and saves with the item's version. A [`CoreError::Conflict`]
//! from the store triggers exactly [`CONFLICT_RETRIES`] re-read and re-run;
//! after that the conflict is returned to the caller.
//!
//! Assignment is the exception: the store runs the whole decision inside
//! one serialized write via [`ContentStore::save_assignment`], so the
//! least-loaded pick and the write cannot interleave with another
//! assignment.

use std::sync::Arc;

use serde::Deserialize;

use crate::assignment::{
    apply_assignment, authorize_assignment, check_assignable, pick_least_loaded,
    AssignmentChoice, AssignmentRequest, Candidate,
};
use crate::content::{validate_submission, ContentItem};
use crate::dissolution::disapprove;
use crate::error::CoreError;
use crate::person::Person;
use crate::policy::{WorkflowPolicy, CONFLICT_RETRIES};
use crate::queue::QueueFilter;
use crate::review::{resubmit, review_script, ReviewDecision};
use crate::roles::{Actor, Role};
use crate::stage::ProductionStage;
use crate::stage_graph::{available_transitions, StageEdge};
use crate::store::{ContentStore, Notifier, PersonDirectory, WorkflowEvent};
use crate::transition::{actor_may_take, validate_transition};
use crate::trust::{approve_on_pickup, gate_submission, GateOutcome};
use crate::types::DbId;

/// Fields a submitter provides for a new content item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Submission {
    pub title: String,
    pub description: Option<String>,
    pub reference_url: Option<String>,
}

/// Orchestrates workflow operations over the host's collaborators.
#[derive(Clone)]
pub struct WorkflowEngine {
    store: Arc<dyn ContentStore>,
    directory: Arc<dyn PersonDirectory>,
    notifier: Arc<dyn Notifier>,
    policy: WorkflowPolicy,
}

impl WorkflowEngine {
    pub fn new(
        store: Arc<dyn ContentStore>,
        directory: Arc<dyn PersonDirectory>,
        notifier: Arc<dyn Notifier>,
        policy: WorkflowPolicy,
    ) -> Self {
        Self {
            store,
            directory,
            notifier,
            policy,
        }
    }

    pub fn policy(&self) -> &WorkflowPolicy {
        &self.policy
    }

    /* ----------------------------------------------------------------------
    Reads
    ---------------------------------------------------------------------- */

    pub async fn get(&self, id: DbId) -> Result<ContentItem, CoreError> {
        self.store.load_item(id).await
    }

    pub async fn queue(&self, filter: &QueueFilter) -> Result<Vec<ContentItem>, CoreError> {
        self.store.list_items(filter).await
    }

    /// Edges the actor may take from the item's current stage. Non-admins
    /// only see edges for slots they hold.
    pub async fn available_transitions(
        &self,
        id: DbId,
        actor: &Actor,
    ) -> Result<Vec<StageEdge>, CoreError> {
        let item = self.store.load_item(id).await?;
        if item.is_dissolved {
            return Ok(Vec::new());
        }
        Ok(item
            .effective_stage()
            .map(|stage| {
                available_transitions(stage, actor.role)
                    .into_iter()
                    .filter(|edge| actor_may_take(edge, &item, actor))
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    /* ----------------------------------------------------------------------
    Submission and review
    ---------------------------------------------------------------------- */

    /// Create a content item, auto-approving it for trusted submitters.
    pub async fn submit(
        &self,
        submission: Submission,
        author_id: DbId,
    ) -> Result<GateOutcome, CoreError> {
        validate_submission(&submission.title, submission.description.as_deref())?;
        let author = self.directory.get_person(author_id).await?;
        if !author.is_active {
            return Err(CoreError::Forbidden(format!(
                "Person {author_id} is inactive"
            )));
        }

        let now = chrono::Utc::now();
        let draft = ContentItem::draft(
            submission.title.trim(),
            submission.description,
            submission.reference_url,
            author.id,
            now,
        );
        let outcome = gate_submission(&draft, &author, &self.policy, now);
        let item = self.store.insert_item(&outcome.item).await?;

        tracing::info!(
            content_id = item.id,
            author_id = author.id,
            auto_approved = outcome.auto_approved,
            "Content submitted"
        );

        let event = if outcome.auto_approved {
            WorkflowEvent::AutoApproved
        } else {
            WorkflowEvent::Submitted
        };
        self.notifier.notify(&event, &item, &[author.id]).await;

        Ok(GateOutcome {
            auto_approved: outcome.auto_approved,
            item,
        })
    }

    pub async fn review(
        &self,
        id: DbId,
        decision: &ReviewDecision,
        actor: &Actor,
    ) -> Result<ContentItem, CoreError> {
        let (_, item) = self
            .mutate(id, "review", |current| {
                review_script(current, decision, actor, chrono::Utc::now())
            })
            .await?;

        let event = match decision {
            ReviewDecision::Approve { .. } => WorkflowEvent::Approved,
            ReviewDecision::Reject { .. } => WorkflowEvent::Rejected,
        };
        tracing::info!(
            content_id = id,
            actor_id = actor.id,
            event = event.event_type(),
            "Script reviewed"
        );
        self.notifier.notify(&event, &item, &[item.author_id]).await;
        Ok(item)
    }

    pub async fn resubmit(&self, id: DbId, actor: &Actor) -> Result<ContentItem, CoreError> {
        let (_, item) = self
            .mutate(id, "resubmit", |current| {
                resubmit(current, actor, chrono::Utc::now())
            })
            .await?;
        tracing::info!(content_id = id, actor_id = actor.id, "Script resubmitted");
        self.notifier
            .notify(&WorkflowEvent::Resubmitted, &item, &[item.author_id])
            .await;
        Ok(item)
    }

    /* ----------------------------------------------------------------------
    Production
    ---------------------------------------------------------------------- */

    /// Move an item along one edge of the stage graph.
    pub async fn transition(
        &self,
        id: DbId,
        to: ProductionStage,
        actor: &Actor,
        note: Option<&str>,
    ) -> Result<ContentItem, CoreError> {
        let (before, item) = self
            .mutate(id, "transition", |current| {
                validate_transition(current, to, actor, note, chrono::Utc::now())
            })
            .await?;

        tracing::info!(
            content_id = id,
            actor_id = actor.id,
            from = ?before.effective_stage(),
            to = %to,
            "Stage changed"
        );

        let recipients = stakeholders(&item);
        let changed = WorkflowEvent::StageChanged {
            from: before.effective_stage(),
            to,
        };
        self.notifier.notify(&changed, &item, &recipients).await;
        if to == ProductionStage::Posted {
            self.notifier
                .notify(&WorkflowEvent::Posted, &item, &recipients)
                .await;
        }
        Ok(item)
    }

    /// Send an approved item back to review, dissolving it at the threshold.
    pub async fn disapprove(
        &self,
        id: DbId,
        reason: &str,
        actor: &Actor,
    ) -> Result<ContentItem, CoreError> {
        let policy = self.policy;
        let (_, item) = self
            .mutate(id, "disapprove", |current| {
                disapprove(current, reason, actor, &policy, chrono::Utc::now())
            })
            .await?;

        let event = if item.is_dissolved {
            WorkflowEvent::Dissolved {
                rejection_count: item.rejection_count,
            }
        } else {
            WorkflowEvent::Disapproved {
                rejection_count: item.rejection_count,
            }
        };
        tracing::info!(
            content_id = id,
            actor_id = actor.id,
            rejection_count = item.rejection_count,
            dissolved = item.is_dissolved,
            "Content disapproved"
        );
        self.notifier
            .notify(&event, &item, &stakeholders(&item))
            .await;
        Ok(item)
    }

    /// Fill one or more assignment slots, explicitly or by least load.
    ///
    /// A trusted videographer picking up a pending item approves it on the
    /// way in.
    pub async fn assign(
        &self,
        id: DbId,
        request: &AssignmentRequest,
        actor: &Actor,
    ) -> Result<ContentItem, CoreError> {
        request.validate()?;
        authorize_assignment(request, actor)?;

        // Explicit people are looked up here; auto slots stay `None` until
        // the store hands over candidates under its lock.
        let mut planned: Vec<(Role, Option<Person>)> = Vec::new();
        let mut auto_roles: Vec<Role> = Vec::new();
        for (role, choice) in request.slots() {
            match choice {
                AssignmentChoice::Explicit { .. } => {
                    let person = self.resolve_assignment(role, choice).await?;
                    planned.push((role, Some(person)));
                }
                AssignmentChoice::Auto => {
                    auto_roles.push(role);
                    planned.push((role, None));
                }
            }
        }

        let picker = if actor.is_admin() {
            None
        } else {
            planned
                .iter()
                .filter_map(|(_, person)| person.as_ref())
                .find(|person| person.id == actor.id)
                .cloned()
        };

        let policy = self.policy;
        let decide = |current: &ContentItem,
                      candidates: &[Candidate]|
         -> Result<ContentItem, CoreError> {
            let mut resolved = Vec::with_capacity(planned.len());
            for (role, person) in &planned {
                let person = match person {
                    Some(person) => person.clone(),
                    None => {
                        let picked = pick_least_loaded(*role, candidates)?.clone();
                        tracing::debug!(
                            content_id = current.id,
                            role = %role,
                            person_id = picked.id,
                            candidates = candidates.len(),
                            "Auto-assignment resolved"
                        );
                        picked
                    }
                };
                resolved.push((*role, person));
            }

            let now = chrono::Utc::now();
            let base = picker
                .as_ref()
                .and_then(|p| approve_on_pickup(current, p, &policy, now))
                .unwrap_or_else(|| current.clone());
            apply_assignment(&base, &resolved, actor, now)
        };

        let (before, item) = self
            .store
            .save_assignment(id, &auto_roles, &decide)
            .await?;

        if before.status != item.status {
            tracing::info!(
                content_id = id,
                actor_id = actor.id,
                "Content auto-approved on pickup"
            );
            self.notifier
                .notify(&WorkflowEvent::AutoApproved, &item, &[item.author_id])
                .await;
        }

        for (role, _) in &planned {
            let Some(person_id) = item.assignees.get(*role) else {
                continue;
            };
            tracing::info!(
                content_id = id,
                actor_id = actor.id,
                role = %role,
                person_id,
                "Team member assigned"
            );
            let event = WorkflowEvent::Assigned {
                role: *role,
                person_id,
            };
            self.notifier.notify(&event, &item, &[person_id]).await;
        }
        Ok(item)
    }

    /// Resolve a single slot to a person.
    ///
    /// Workload counts are read fresh from the directory on every call. The
    /// result is not locked; [`assign`](Self::assign) resolves auto slots
    /// inside the store's assignment transaction instead.
    pub async fn resolve_assignment(
        &self,
        role: Role,
        choice: AssignmentChoice,
    ) -> Result<Person, CoreError> {
        if !role.is_assignable() {
            return Err(CoreError::Validation(format!(
                "Role {role} cannot be assigned to content"
            )));
        }

        match choice {
            AssignmentChoice::Explicit { person_id } => {
                let person = self.directory.get_person(person_id).await?;
                check_assignable(&person, role)?;
                Ok(person)
            }
            AssignmentChoice::Auto => {
                let people = self.directory.list_by_role(role).await?;
                let mut candidates = Vec::with_capacity(people.len());
                for person in people.into_iter().filter(|p| p.is_active) {
                    let active_assignments =
                        self.directory.count_active_assignments(person.id).await?;
                    candidates.push(Candidate {
                        person,
                        active_assignments,
                    });
                }
                let picked = pick_least_loaded(role, &candidates)?.clone();
                tracing::debug!(
                    role = %role,
                    person_id = picked.id,
                    candidates = candidates.len(),
                    "Auto-assignment resolved"
                );
                Ok(picked)
            }
        }
    }

    /* ----------------------------------------------------------------------
    Internals
    ---------------------------------------------------------------------- */

    /// Load, apply, and save with a version check, retrying once on
    /// conflict. Returns the item as loaded and as saved.
    async fn mutate<F>(
        &self,
        id: DbId,
        operation: &'static str,
        apply: F,
    ) -> Result<(ContentItem, ContentItem), CoreError>
    where
        F: Fn(&ContentItem) -> Result<ContentItem, CoreError> + Send + Sync,
    {
        let mut attempt: u32 = 0;
        loop {
            let current = self.store.load_item(id).await?;
            let next = apply(&current)?;
            match self.store.save_item(&next).await {
                Ok(saved) => return Ok((current, saved)),
                Err(CoreError::Conflict(msg)) if attempt < CONFLICT_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        content_id = id,
                        operation,
                        attempt,
                        error = %msg,
                        "Concurrent update detected, retrying with fresh read"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Author plus every assignee, without duplicates.
fn stakeholders(item: &ContentItem) -> Vec<DbId> {
    let mut ids = vec![item.author_id];
    for id in item.assignees.people() {
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}
