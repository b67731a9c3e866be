//! In-memory integration tests for task lifecycle operations.

use super::helpers::{ScriptedGateway, gateway, generate, generate_accepted, owner, service_with};
use rstest::rstest;
use skillquest::task::{
    domain::{TaskDomainError, TaskId, TaskStatus},
    services::{ErrorDisposition, TaskLifecycleError},
};
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accept_moves_task_from_pending_to_skill_group(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate(&service, &gateway, &alice, "python").await?;

    let accepted = service.accept_task(&alice, task.id()).await?;

    eyre::ensure!(accepted.status() == TaskStatus::Accepted, "task should be accepted");
    eyre::ensure!(
        service.list_pending(&alice).await?.is_empty(),
        "pending listing should be empty"
    );
    let grouped = service.list_accepted_by_skill(&alice).await?;
    let python = grouped
        .get("Python")
        .ok_or_else(|| eyre::eyre!("missing Python group"))?;
    eyre::ensure!(python == &vec![accepted], "group should hold the accepted task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn double_accept_is_rejected(gateway: Arc<ScriptedGateway>) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;

    let result = service.accept_task(&alice, task.id()).await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(TaskDomainError::InvalidState { .. }))
        ),
        "expected InvalidState, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_task_is_terminal(gateway: Arc<ScriptedGateway>) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate(&service, &gateway, &alice, "python").await?;
    service.reject_task(&alice, task.id()).await?;

    let accept = service.accept_task(&alice, task.id()).await;
    let delete = service.delete_task(&alice, task.id()).await;
    let toggle = service.set_completion(&alice, task.id(), true).await;

    for result in [accept, delete, toggle] {
        let err = result.err().ok_or_else(|| eyre::eyre!("expected failure"))?;
        eyre::ensure!(
            err.disposition() == ErrorDisposition::BadRequest,
            "expected bad request, got {err:?}"
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_soft_deletes_accepted_task(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;

    service.delete_task(&alice, task.id()).await?;

    let fetched = service.get_task(&alice, task.id()).await?;
    eyre::ensure!(fetched.status() == TaskStatus::Rejected, "task should be rejected");
    eyre::ensure!(
        service.list_accepted_by_skill(&alice).await?.is_empty(),
        "grouping should be empty"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_toggle_round_trips(gateway: Arc<ScriptedGateway>) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;

    let on = service.set_completion(&alice, task.id(), true).await?;
    let off = service.set_completion(&alice, task.id(), false).await?;

    eyre::ensure!(on.is_completed() && !off.is_completed(), "flag should follow");
    eyre::ensure!(
        on.status() == TaskStatus::Accepted && off.status() == TaskStatus::Accepted,
        "status should stay accepted"
    );
    eyre::ensure!(off.updated_at() > on.updated_at(), "updates should be stamped");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_tasks_group_by_skill_newest_first(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let first = generate_accepted(&service, &gateway, &alice, "python").await?;
    let rust = generate_accepted(&service, &gateway, &alice, "rust").await?;
    let second = generate_accepted(&service, &gateway, &alice, "Python").await?;

    let grouped = service.list_accepted_by_skill(&alice).await?;

    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    eyre::ensure!(keys == ["Python", "Rust"], "unexpected groups {keys:?}");
    let python: Vec<TaskId> = grouped
        .get("Python")
        .map(|tasks| tasks.iter().map(|task| task.id()).collect())
        .unwrap_or_default();
    eyre::ensure!(
        python == vec![second.id(), first.id()],
        "python group should be newest first"
    );
    let rust_group = grouped
        .get("Rust")
        .ok_or_else(|| eyre::eyre!("missing Rust group"))?;
    eyre::ensure!(rust_group == &vec![rust], "rust group should hold one task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn skill_groups_follow_their_newest_task(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    generate_accepted(&service, &gateway, &alice, "python").await?;
    generate_accepted(&service, &gateway, &alice, "rust").await?;
    generate_accepted(&service, &gateway, &alice, "go").await?;

    let grouped = service.list_accepted_by_skill(&alice).await?;

    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    eyre::ensure!(
        keys == ["Go", "Rust", "Python"],
        "groups should be ordered by their newest task, got {keys:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_owners_see_not_found(gateway: Arc<ScriptedGateway>) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let bob = owner("bob");
    let task = generate(&service, &gateway, &alice, "python").await?;

    let results = [
        service.get_task(&bob, task.id()).await,
        service.accept_task(&bob, task.id()).await,
        service.reject_task(&bob, task.id()).await,
    ];

    for result in results {
        let err = result.err().ok_or_else(|| eyre::eyre!("expected failure"))?;
        eyre::ensure!(
            err.disposition().http_status() == 404,
            "expected 404, got {err:?}"
        );
    }
    eyre::ensure!(
        service.get_task(&alice, task.id()).await?.status() == TaskStatus::Pending,
        "owner's task should be untouched"
    );
    Ok(())
}
