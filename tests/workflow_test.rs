// ABOUTME: Integration tests for manual and scheduled workout workflows
// ABOUTME: Checks default targets, result stamping, history appends, unsupported items, and exiting a day
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GetUpGo Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use getupgo::config::{CoachConfig, IntelligenceConfig};
use getupgo::errors::{AppResult, ErrorCode};
use getupgo::history::{HistoryLog, MemoryHistory};
use getupgo::models::{SessionStatus, Target, WorkoutMode};
use getupgo::schedule::{Escalation, SchedulePlan, ScheduleRun};
use getupgo::session::{
    control_channel, ControlHandle, ControlReceiver, FrameRead, ReplayDetector, ReplaySource,
    VideoSource,
};
use getupgo::workflow::{Coach, ScheduledStep};

const MONDAY_PLAN: &str = r"
Starter:
  Monday:
    - Squats - 2 sets of 3 reps
    - Burpees - 10 reps
    - Rest 2 minutes
    - Plank - 5 reps
";

fn coach() -> Coach {
    common::init_test_logging();
    let config = CoachConfig {
        pause_poll: Duration::from_millis(5),
        ..CoachConfig::default()
    };
    Coach::new(
        config,
        &IntelligenceConfig::default(),
        Box::new(MemoryHistory::new()),
    )
}

#[test]
fn test_manual_request_fills_default_targets() {
    let coach = coach();

    let squats = coach.manual_request("squat", None).unwrap();
    assert_eq!(squats.exercise, "Squats");
    assert_eq!(squats.target, Target::Reps(10));

    let tree = coach.manual_request("Tree", None).unwrap();
    assert_eq!(tree.exercise, "Tree Pose");
    assert_eq!(tree.target, Target::Seconds(30.0));

    let plank = coach
        .manual_request("Plank", Some(Target::Seconds(45.0)))
        .unwrap();
    assert_eq!(plank.target, Target::Seconds(45.0));

    let error = coach.manual_request("Burpees", None).unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_manual_run_is_recorded_once() {
    let mut coach = coach();
    let request = coach
        .manual_request("Squats", Some(Target::Reps(4)))
        .unwrap();
    let mut source = common::squat_source(4);

    let result = coach
        .run_manual(
            &request,
            &mut source,
            &mut ReplayDetector,
            &ControlReceiver::always_running(),
        )
        .await
        .unwrap();

    assert_eq!(result.status, SessionStatus::Success);
    assert_eq!(result.mode, Some(WorkoutMode::Manual));
    assert!(result.day.is_none());

    let entries = coach.history().entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].session_id, result.session_id);
}

#[tokio::test]
async fn test_scheduled_day_runs_every_item() {
    let mut coach = coach();
    let plan = Arc::new(SchedulePlan::from_yaml(MONDAY_PLAN).unwrap());
    let mut run = ScheduleRun::start(plan, "Starter", "Monday").unwrap();
    let control = ControlReceiver::always_running();

    let mut sources = vec![
        common::squat_source(3),
        ReplaySource::from_frames(Vec::new()),
        ReplaySource::from_frames(Vec::new()),
        common::plank_source(6),
    ]
    .into_iter();

    let mut steps = Vec::new();
    loop {
        let mut source = sources
            .next()
            .unwrap_or_else(|| ReplaySource::from_frames(Vec::new()));
        let step = coach
            .run_scheduled_item(&mut run, &mut source, &mut ReplayDetector, &control)
            .await
            .unwrap();
        if step == ScheduledStep::DayComplete {
            break;
        }
        steps.push(step);
    }
    assert_eq!(steps.len(), 4);

    let ScheduledStep::Finished(squats) = &steps[0] else {
        panic!("expected a squat result, got {:?}", steps[0]);
    };
    assert_eq!(squats.status, SessionStatus::Success);
    assert_eq!(squats.reps, Some(3.0));
    assert_eq!(squats.mode, Some(WorkoutMode::Scheduled));
    assert_eq!(squats.level.as_deref(), Some("Starter"));
    assert_eq!(squats.day.as_deref(), Some("Monday"));

    let ScheduledStep::Finished(burpees) = &steps[1] else {
        panic!("expected a failed burpee record, got {:?}", steps[1]);
    };
    assert_eq!(burpees.status, SessionStatus::Fail);
    assert!(burpees.error.as_deref().unwrap().contains("not supported"));
    assert_eq!(burpees.target, Some(Target::Reps(10)));

    assert!(matches!(&steps[2], ScheduledStep::Rest(item) if item.is_rest()));

    // A hold item written in reps is timed in seconds
    let ScheduledStep::Finished(plank) = &steps[3] else {
        panic!("expected a plank result, got {:?}", steps[3]);
    };
    assert_eq!(plank.status, SessionStatus::Success);
    assert_eq!(plank.target, Some(Target::Seconds(5.0)));
    assert_eq!(plank.time, Some(5.0));

    assert_eq!(run.completed().len(), 4);
    let expected = squats.calories + plank.calories;
    assert!((run.daily_calories() - expected).abs() < 1e-9);
    assert_eq!(coach.history().entries().unwrap().len(), 3);

    assert_eq!(run.escalate().unwrap(), Escalation::FreeChoice);
}

/// Replay that asks the session to exit after a number of reads
struct ExitingSource {
    inner: ReplaySource,
    handle: ControlHandle,
    exit_after: usize,
}

impl VideoSource for ExitingSource {
    type Image = Option<Vec<Option<[f32; 4]>>>;

    fn open(&mut self) -> AppResult<()> {
        self.inner.open()
    }

    fn read(&mut self) -> AppResult<FrameRead<Self::Image>> {
        let read = self.inner.read()?;
        if self.inner.reads() == self.exit_after {
            self.handle.exit();
        }
        Ok(read)
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

fn beginner_monday() -> ScheduleRun {
    ScheduleRun::start(Arc::new(SchedulePlan::builtin()), "Beginner", "Monday").unwrap()
}

#[tokio::test]
async fn test_exit_before_the_day_records_nothing() {
    let mut coach = coach();
    let mut run = beginner_monday();
    let (handle, control) = control_channel();
    handle.exit();

    for _ in 0..3 {
        let mut source = common::squat_source(15);
        let step = coach
            .run_scheduled_item(&mut run, &mut source, &mut ReplayDetector, &control)
            .await
            .unwrap();
        let ScheduledStep::Aborted(Some(next)) = step else {
            panic!("expected the day to stop, got {step:?}");
        };
        assert_eq!(next.exercise.as_deref(), Some("Squats"));
        assert_eq!(source.reads(), 0);
    }

    assert!(coach.history().entries().unwrap().is_empty());
    assert!(run.completed().is_empty());
    assert_eq!(run.remaining().len(), 3);
    assert!(run.escalate().is_err());
}

#[tokio::test]
async fn test_exit_mid_item_stops_the_day_without_escalating() {
    let mut coach = coach();
    let mut run = beginner_monday();
    let (handle, control) = control_channel();

    let mut squats = common::squat_source(15);
    let first = coach
        .run_scheduled_item(&mut run, &mut squats, &mut ReplayDetector, &control)
        .await
        .unwrap();
    assert!(matches!(&first, ScheduledStep::Finished(result) if result.status == SessionStatus::Success));

    let mut pushups = ExitingSource {
        inner: common::squat_source(10),
        handle: handle.clone(),
        exit_after: 3,
    };
    let second = coach
        .run_scheduled_item(&mut run, &mut pushups, &mut ReplayDetector, &control)
        .await
        .unwrap();
    let ScheduledStep::Aborted(Some(stopped)) = second else {
        panic!("expected the day to stop, got {second:?}");
    };
    assert_eq!(stopped.exercise.as_deref(), Some("Pushups"));
    assert_eq!(pushups.inner.releases(), 1);

    assert_eq!(coach.history().entries().unwrap().len(), 1);
    assert_eq!(run.completed().len(), 1);
    assert_eq!(run.remaining(), [stopped.raw.as_str(), "Tree Pose – 30 sec"]);
    assert!(run.is_aborted());
    assert!(run.escalate().is_err());

    handle.resume();
    let mut source = common::plank_source(30);
    let after = coach
        .run_scheduled_item(&mut run, &mut source, &mut ReplayDetector, &control)
        .await
        .unwrap();
    assert!(matches!(after, ScheduledStep::Aborted(_)));
    assert_eq!(coach.history().entries().unwrap().len(), 1);
}
