//! When steps for task lifecycle BDD scenarios.

use super::world::{TaskLifecycleWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use skillquest::task::{
    domain::OwnerId,
    services::{AnalyzeSubmissionRequest, GenerateTaskRequest},
};

#[when(r#""{owner}" requests a "{skill}" task for {hours:f64} hours"#)]
fn owner_requests_task(
    world: &mut TaskLifecycleWorld,
    owner: String,
    skill: String,
    hours: f64,
) -> Result<(), eyre::Report> {
    let owner_id = OwnerId::new(owner)?;
    let result = run_async(
        world
            .service
            .generate_task(GenerateTaskRequest::new(owner_id.clone(), skill, hours)),
    );
    if let Ok(ref task) = result {
        world.last_task = Some(task.clone());
    }
    world.owner = Some(owner_id);
    world.last_generation_result = Some(result);
    Ok(())
}

#[when("the owner accepts the task")]
fn owner_accepts_task(world: &mut TaskLifecycleWorld) -> Result<(), eyre::Report> {
    let (owner, task) = world.owned_task()?;
    let result = run_async(world.service.accept_task(&owner, task.id()));
    if let Ok(ref accepted) = result {
        world.last_task = Some(accepted.clone());
    }
    world.last_accept_result = Some(result);
    Ok(())
}

#[when(r#"the owner submits "{submission}""#)]
fn owner_submits(world: &mut TaskLifecycleWorld, submission: String) -> Result<(), eyre::Report> {
    let (owner, task) = world.owned_task()?;
    let analysis = run_async(world.service.analyze_submission(
        AnalyzeSubmissionRequest::new(owner.clone(), task.id()).with_text(submission),
    ))
    .wrap_err("analyze submission")?;
    let refreshed = run_async(world.service.get_task(&owner, task.id()))
        .wrap_err("reload task after analysis")?;
    world.last_task = Some(refreshed);
    world.last_analysis = Some(analysis);
    Ok(())
}
