//! Submission analysis and automatic completion through the service.

use super::helpers::{
    ScriptedGateway, analysis_reply, gateway, generate, generate_accepted, owner, service_with,
};
use rstest::rstest;
use skillquest::task::{
    domain::{TaskDomainError, TaskStatus},
    services::{AnalyzeSubmissionRequest, ErrorDisposition, TaskLifecycleError},
};
use std::sync::Arc;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn high_score_completes_task(gateway: Arc<ScriptedGateway>) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;
    gateway.push_reply(analysis_reply(90.0));

    let analysis = service
        .analyze_submission(
            AnalyzeSubmissionRequest::new(alice.clone(), task.id())
                .with_text("import csv\nprint(list(csv.reader(open('a.csv'))))"),
        )
        .await?;

    eyre::ensure!(
        analysis.feedback.strengths == "Correct output\nReadable names",
        "list feedback should be joined"
    );
    let stored = service.get_task(&alice, task.id()).await?;
    eyre::ensure!(stored.status() == TaskStatus::Completed, "task should be completed");
    eyre::ensure!(stored.is_completed(), "completed flag should be set");
    eyre::ensure!(
        service.list_accepted_by_skill(&alice).await?.is_empty(),
        "completed task should leave the accepted grouping"
    );
    Ok(())
}

#[rstest]
#[case::low(60.0)]
#[case::boundary(80.0)]
#[tokio::test(flavor = "multi_thread")]
async fn score_at_or_below_threshold_leaves_task(
    gateway: Arc<ScriptedGateway>,
    #[case] score: f64,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;
    gateway.push_reply(analysis_reply(score));

    service
        .analyze_submission(AnalyzeSubmissionRequest::new(alice.clone(), task.id()).with_text("x"))
        .await?;

    let stored = service.get_task(&alice, task.id()).await?;
    eyre::ensure!(stored == task, "task should be unchanged, got {stored:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn uploaded_file_is_sent_instead_of_text(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;
    gateway.push_reply(analysis_reply(10.0));

    service
        .analyze_submission(
            AnalyzeSubmissionRequest::new(alice, task.id())
                .with_file(b"print('from upload')".to_vec())
                .with_text("typed in the form"),
        )
        .await?;

    let prompts = gateway.prompts();
    let prompt = prompts
        .last()
        .ok_or_else(|| eyre::eyre!("analysis prompt missing"))?;
    eyre::ensure!(prompt.contains("print('from upload')"), "file content should be sent");
    eyre::ensure!(!prompt.contains("typed in the form"), "text should be ignored");
    eyre::ensure!(prompt.contains("Level: Beginner"), "level should be included");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_task_cannot_be_analyzed(gateway: Arc<ScriptedGateway>) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate(&service, &gateway, &alice, "python").await?;

    let result = service
        .analyze_submission(AnalyzeSubmissionRequest::new(alice, task.id()).with_text("x"))
        .await;

    eyre::ensure!(
        matches!(
            result,
            Err(TaskLifecycleError::Domain(TaskDomainError::InvalidState { .. }))
        ),
        "expected InvalidState, got {result:?}"
    );
    eyre::ensure!(gateway.prompts().len() == 1, "only the generation prompt is sent");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_submission_is_bad_request(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;

    let err = service
        .analyze_submission(AnalyzeSubmissionRequest::new(alice, task.id()))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected failure"))?;

    eyre::ensure!(
        matches!(err, TaskLifecycleError::Domain(TaskDomainError::MissingSubmission)),
        "expected MissingSubmission, got {err:?}"
    );
    eyre::ensure!(err.disposition() == ErrorDisposition::BadRequest, "expected 400");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_score_is_internal(
    gateway: Arc<ScriptedGateway>,
) -> Result<(), eyre::Report> {
    let service = service_with(&gateway);
    let alice = owner("alice");
    let task = generate_accepted(&service, &gateway, &alice, "python").await?;
    gateway.push_reply(analysis_reply(150.0));

    let err = service
        .analyze_submission(AnalyzeSubmissionRequest::new(alice.clone(), task.id()).with_text("x"))
        .await
        .err()
        .ok_or_else(|| eyre::eyre!("expected failure"))?;

    eyre::ensure!(
        matches!(err, TaskLifecycleError::InvalidScore(_)),
        "expected InvalidScore, got {err:?}"
    );
    eyre::ensure!(err.disposition() == ErrorDisposition::Internal, "expected 500");
    let stored = service.get_task(&alice, task.id()).await?;
    eyre::ensure!(stored.status() == TaskStatus::Accepted, "task should stay accepted");
    Ok(())
}
