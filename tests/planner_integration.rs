//! End-to-end planning tests over the public API
//!
//! These tests exercise the full pipeline: task descriptors in, validated
//! execution plan out, advisory review on top. Unit tests for individual
//! engine components live in the plan module.

use taskweave::{
    Advisor, Advisory, DependencyOptimizer, PlanError, Planner, PlannerConfig, TaskDescriptor,
};

fn descriptor(id: &str, deps: &[&str]) -> TaskDescriptor {
    TaskDescriptor::new(id, format!("{} step", id))
        .with_dependencies(deps.iter().map(|d| d.to_string()).collect())
}

#[test]
fn test_full_feature_build_plan() {
    // A realistic small feature: research and design fan out, backend and
    // frontend build on design, release gates on everything
    let tasks = vec![
        descriptor("research", &[]).with_duration(30),
        descriptor("design", &["research"]).with_duration(45),
        descriptor("backend", &["design"])
            .with_duration(120)
            .with_agent_type("coder"),
        descriptor("frontend", &["design"])
            .with_duration(90)
            .with_agent_type("coder"),
        descriptor("integration", &["backend", "frontend"]).with_duration(60),
        descriptor("docs", &["design"]).with_duration(30),
    ];

    let plan = Planner::default().plan(&tasks).unwrap();

    assert_eq!(plan.total_tasks, 6);
    assert_eq!(plan.execution_order.len(), 6);

    // backend, frontend and docs share a level and are all parallel-safe
    let wide_phase = plan
        .phases
        .iter()
        .find(|p| p.tasks.len() == 3)
        .expect("one phase should batch the three level-2 tasks");
    assert!(wide_phase.parallel);

    // The longest chain runs through the backend
    assert_eq!(
        plan.critical_path,
        vec!["research", "design", "backend", "integration"]
    );
    assert_eq!(plan.minimum_time, 30 + 45 + 120 + 60);

    // 3 of 6 tasks run in a multi-task phase
    assert_eq!(plan.parallel_efficiency, 50.0);
}

#[test]
fn test_exclusive_tasks_serialize_within_their_level() {
    // Two migrations touch the same database and cannot race
    let tasks = vec![
        descriptor("schema", &[]),
        descriptor("migrate-users", &["schema"]).exclusive(),
        descriptor("migrate-orders", &["schema"]).exclusive(),
        descriptor("reindex", &["schema"]),
    ];

    let plan = Planner::default().plan(&tasks).unwrap();

    let shapes: Vec<Vec<String>> = plan
        .phases
        .iter()
        .map(|p| p.tasks.iter().map(|t| t.id.clone()).collect())
        .collect();

    assert_eq!(
        shapes,
        vec![
            vec!["schema".to_string()],
            vec!["reindex".to_string()],
            vec!["migrate-users".to_string()],
            vec!["migrate-orders".to_string()],
        ]
    );
}

#[test]
fn test_cycle_aborts_without_partial_plan() {
    let tasks = vec![
        descriptor("a", &["c"]),
        descriptor("b", &["a"]),
        descriptor("c", &["b"]),
    ];

    let err = Planner::default().plan(&tasks).unwrap_err();
    assert_eq!(err, PlanError::CyclicDependency);
}

#[test]
fn test_unknown_reference_reported_with_both_ids() {
    let tasks = vec![descriptor("deploy", &["build"])];

    match Planner::default().plan(&tasks).unwrap_err() {
        PlanError::UnknownDependency {
            task_id,
            dependency,
        } => {
            assert_eq!(task_id, "deploy");
            assert_eq!(dependency, "build");
        }
        other => panic!("expected UnknownDependency, got {:?}", other),
    }
}

#[test]
fn test_optimize_then_plan_then_advise() {
    // "review" declares a redundant dependency on "setup"
    let tasks = vec![
        descriptor("setup", &[]),
        descriptor("build", &["setup"]),
        descriptor("review", &["setup", "build"]),
    ];

    let reduced = DependencyOptimizer::reduce(&tasks);
    let review = reduced.iter().find(|t| t.id == "review").unwrap();
    assert_eq!(review.dependencies, vec!["build".to_string()]);

    let plan = Planner::default().plan(&reduced).unwrap();
    assert_eq!(plan.execution_order, vec!["setup", "build", "review"]);

    // A pure chain parallelizes nothing
    let advisories = Advisor::default().review(&plan);
    assert!(advisories
        .iter()
        .any(|a| matches!(a, Advisory::LowParallelEfficiency { efficiency } if *efficiency == 0.0)));
}

#[test]
fn test_planner_level_optimization_flag() {
    let tasks = vec![
        descriptor("a", &[]),
        descriptor("b", &["a"]),
        descriptor("c", &["a", "b"]),
    ];

    let plan = Planner::new(PlannerConfig {
        optimize_dependencies: true,
    })
    .plan(&tasks)
    .unwrap();

    // The reduced dependency set is what gets echoed into the plan
    let c = plan
        .phases
        .iter()
        .flat_map(|p| &p.tasks)
        .find(|t| t.id == "c")
        .unwrap();
    assert_eq!(c.dependencies, vec!["b".to_string()]);
}

#[test]
fn test_duration_strings_from_json_input() {
    let raw = r#"[
        {"id": "fetch", "description": "pull data", "estimated_duration": "10 min"},
        {"id": "crunch", "description": "process", "estimated_duration": 25,
         "dependencies": ["fetch"]},
        {"id": "report", "description": "write up", "estimated_duration": "later",
         "dependencies": ["crunch"]}
    ]"#;
    let tasks: Vec<TaskDescriptor> = serde_json::from_str(raw).unwrap();

    let plan = Planner::default().plan(&tasks).unwrap();

    // 10 + 25 + fallback 5
    assert_eq!(plan.minimum_time, 40);
    assert_eq!(plan.critical_path, vec!["fetch", "crunch", "report"]);
}
