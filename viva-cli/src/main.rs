use std::io::Write as _;
use std::sync::Arc;

use viva_core::assessment::{Decision, parse_assessment};
use viva_core::config::AppConfig;
use viva_core::roles::{RoleSelection, builtin_roles, resolve_job_title};
use viva_engine::coordinator::{CoordinatorConfig, InterviewCoordinator};
use viva_engine::fallback::{NullSpeech, NullTone};
use viva_engine::session::{Screen, screen_for};
use viva_runtime::builder::build_coordinator_from_config;
use viva_runtime::mock::{MockInterviewApi, MockProctorApi};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Terminal front for the interview coordinator.
    // Point VIVA_INTERVIEW_URL / VIVA_PROCTOR_URL at the backends, or set
    // VIVA_DEMO=1 to run against scripted services with no network at all.

    let demo = std::env::var("VIVA_DEMO").map(|v| v == "1").unwrap_or(false);

    let cfg = AppConfig {
        interview_base_url: std::env::var("VIVA_INTERVIEW_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".into()),
        proctor_base_url: std::env::var("VIVA_PROCTOR_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8080".into()),
        ..AppConfig::default()
    };

    let coordinator = if demo {
        InterviewCoordinator::new(
            CoordinatorConfig::from_app_config(&cfg),
            Arc::new(MockInterviewApi::default()),
            Arc::new(MockProctorApi::default()),
            Arc::new(NullTone),
            Arc::new(NullSpeech),
        )
    } else {
        build_coordinator_from_config(&cfg, Arc::new(NullTone), Arc::new(NullSpeech))?
    };

    // First argument: a preset role id, or a free-form job title.
    let title = match std::env::args().nth(1) {
        Some(arg) => resolve_job_title(&RoleSelection::Preset(arg.clone()))
            .or_else(|| resolve_job_title(&RoleSelection::Custom(arg)))
            .ok_or_else(|| anyhow::anyhow!("no job title given"))?,
        None => {
            println!("Positions:");
            for role in builtin_roles() {
                println!("  {:16} {}", role.id, role.title);
            }
            resolve_job_title(&RoleSelection::Preset("frontend-dev".into()))
                .expect("built-in role")
        }
    };

    println!("Starting interview: {title}");
    coordinator.start_interview(&title).await;

    let stdin = std::io::stdin();
    loop {
        let snapshot = coordinator.snapshot().await;

        if snapshot.proctor_failed {
            anyhow::bail!(
                "proctoring could not be started: {}",
                snapshot.error.as_deref().unwrap_or("unknown error")
            );
        }
        if let Some(error) = &snapshot.error {
            if snapshot.current_question.is_empty() {
                anyhow::bail!("interview failed to start: {error}");
            }
            eprintln!("! {error} (answer again to retry)");
        }

        if snapshot.proctor.warnings > 0 {
            println!(
                "  [warnings: {}/5{}]",
                snapshot.proctor.warnings,
                snapshot
                    .visual_alert
                    .as_deref()
                    .map(|reason| format!(" - {reason}"))
                    .unwrap_or_default()
            );
        }

        match screen_for(&snapshot) {
            Screen::Stopped => {
                println!("Test stopped after {} warnings", snapshot.proctor.warnings);
                break;
            }
            Screen::Results => {
                print_results(snapshot.assessment.as_deref().unwrap_or(""));
                break;
            }
            Screen::Selection | Screen::Interview => {
                println!(
                    "\nQ{}/5: {}",
                    snapshot.current_question_number, snapshot.current_question
                );
                print!("> ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                if stdin.read_line(&mut line)? == 0 {
                    println!("(end of input)");
                    break;
                }
                coordinator.submit_answer(line.trim()).await;
            }
        }
    }

    coordinator.reset().await;
    Ok(())
}

fn print_results(assessment: &str) {
    let summary = parse_assessment(assessment);

    println!("\n=== Interview results ===");
    if let Some(score) = summary.score {
        println!("Score: {score}/100");
    }
    match summary.decision {
        Some(Decision::Pass) => println!("Decision: PASS"),
        Some(Decision::Fail) => println!("Decision: FAIL"),
        None => {}
    }
    if !summary.strengths.is_empty() {
        println!("Strengths:");
        for item in &summary.strengths {
            println!("  + {item}");
        }
    }
    if !summary.improvements.is_empty() {
        println!("Areas for improvement:");
        for item in &summary.improvements {
            println!("  - {item}");
        }
    }

    println!("\n{assessment}");
}
