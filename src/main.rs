#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::Error;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::cli::Mode;
use crate::application::cli::SyllabusInput;
use crate::application::repl;
use crate::application::syllabus;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::PlanError;
use crate::domain::models::SyllabusRequest;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::Assistant;
use crate::domain::services::ConversationDriver;
use crate::domain::services::PlanFiles;
use crate::domain::services::PlanRequestBuilder;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! The study planner has failed with the following app version and error.\n\nVersion: {}\nBuilt: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            env!("VERGEN_BUILD_TIMESTAMP"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn start_chat() -> Result<()> {
    let assistant = Arc::new(Assistant::from_config().await?);
    let driver = ConversationDriver::new(assistant);
    let greeting = driver.transcript().visible_turns().to_vec();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    background_futures.spawn(async move {
        return ActionsService::start(driver, PlanFiles::default(), event_tx, &mut action_rx)
            .await;
    });

    let repl_future = repl::start(greeting, action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => {
            match res {
                Some(Ok(res)) => res,
                Some(Err(join_err)) => Err(join_err.into()),
                None => Ok(()),
            }
        },
        res = repl_future => res,
    );

    return res;
}

async fn start_syllabus(input: SyllabusInput) -> Result<()> {
    let text = syllabus::read_syllabus(&input).await?;

    let assistant = Arc::new(Assistant::from_config().await?);
    let planner = PlanRequestBuilder::new(assistant);
    let request = SyllabusRequest::new(&text, input.total_days, input.daily_hours);

    eprintln!("{}", Paint::new("Generating study plan...").dimmed());
    let plan = planner.build_plan_from_syllabus(&request).await?;
    let file_path = PlanFiles::default().save(&plan).await?;

    println!("{}\n", plan.text.trim());
    eprintln!(
        "{}",
        Paint::green(format!("Saved to {}", file_path.display()))
    );

    return Ok(());
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("STUDYPLANNER_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("studyplanner")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("studyplanner")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let mode = match cli::parse().await {
        Ok(Some(mode)) => mode,
        Ok(None) => return,
        Err(err) => {
            drop(guard);
            handle_error(err);
            return;
        }
    };

    let res = match mode {
        Mode::Chat => start_chat().await,
        Mode::Syllabus(input) => start_syllabus(input).await,
    };

    if let Err(err) = res {
        // Flush buffered logs before exiting.
        drop(guard);
        if let Some(plan_err) = err.downcast_ref::<PlanError>() {
            eprintln!("{}", Paint::red(plan_err.to_string()));
            process::exit(1);
        }
        handle_error(err);
    }
}
