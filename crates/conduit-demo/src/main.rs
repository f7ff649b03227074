use clap::Parser;
use conduit::{Mediator, PageRequest, PipelineConfig, Request, Sensitive};
use conduit_demo::diagnostics::{
    DivideByZeroCommand, DivideByZeroQuery, ExceptionThrownCommand, NotificationCommand,
};
use conduit_demo::people::{
    GetPeopleByAgeQuery, GetPeoplePaginatedQuery, GetPersonByIdQuery, InMemoryPersonRepository,
    NewPersonCommand, PersonId, UpdatePersonCommand,
};
use conduit_demo::{DemoError, event_bus, mediator, telemetry};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "conduit-demo")]
#[command(about = "Run the people registry scenarios through the mediator pipeline")]
struct Cli {
    /// Turn off fault containment (panics abort the scenario)
    #[arg(long)]
    disable_exception: bool,

    /// Turn off entry/exit logging
    #[arg(long)]
    disable_logging: bool,

    /// Turn off validators
    #[arg(long)]
    disable_validation: bool,

    /// Turn off notification merging
    #[arg(long)]
    disable_notification: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::from_env();
        PipelineConfig {
            exception: config.exception && !self.disable_exception,
            logging: config.logging && !self.disable_logging,
            validation: config.validation && !self.disable_validation,
            notification: config.notification && !self.disable_notification,
        }
    }
}

/// Dispatch `request` on its own task, print the outcome, return its value
async fn run<R>(mediator: &Mediator, label: &str, request: R) -> Result<Option<R::Response>, DemoError>
where
    R: Request,
    R::Response: Serialize,
{
    let mediator = mediator.clone();
    let task = tokio::spawn(async move { mediator.send(request).await });

    match task.await {
        Ok(Ok(outcome)) => {
            println!("{label}: {}", serde_json::to_string_pretty(&outcome)?);
            Ok(outcome.into_value().ok())
        }
        Ok(Err(error)) => {
            println!("{label}: {error}");
            Ok(None)
        }
        Err(join_error) => {
            println!("{label}: handler task failed: {join_error}");
            Ok(None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), DemoError> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_level, cli.json_logs);

    let config = cli.pipeline_config();
    info!(behaviors = ?config.active(), "starting demo");

    let repository = Arc::new(InMemoryPersonRepository::new());
    let mediator = mediator(repository, event_bus(), config)?;

    let created = run(
        &mediator,
        "new person",
        NewPersonCommand {
            name: "Ana Souza".into(),
            email: "ana@example.com".into(),
            age: 31,
            password: Sensitive::new("secret123".into()),
        },
    )
    .await?;

    run(
        &mediator,
        "duplicate e-mail",
        NewPersonCommand {
            name: "Ana Clone".into(),
            email: "ana@example.com".into(),
            age: 40,
            password: Sensitive::new("secret123".into()),
        },
    )
    .await?;

    run(
        &mediator,
        "invalid person",
        NewPersonCommand {
            name: String::new(),
            email: "not-an-email".into(),
            age: 12,
            password: Sensitive::new("secret123".into()),
        },
    )
    .await?;

    let id = created.unwrap_or_else(PersonId::nil);
    run(
        &mediator,
        "update person",
        UpdatePersonCommand {
            id,
            name: "Ana S. Lima".into(),
            email: "ana@example.com".into(),
            age: 32,
        },
    )
    .await?;

    run(
        &mediator,
        "update unknown person",
        UpdatePersonCommand {
            id: PersonId::new(),
            name: "Nobody".into(),
            email: "nobody@example.com".into(),
            age: 50,
        },
    )
    .await?;

    run(&mediator, "person by id", GetPersonByIdQuery { id }).await?;
    run(&mediator, "people aged 32", GetPeopleByAgeQuery { age: 32 }).await?;
    run(
        &mediator,
        "people page",
        GetPeoplePaginatedQuery {
            page: PageRequest::new(0, 10),
            name: None,
            age: None,
        },
    )
    .await?;

    run(
        &mediator,
        "notification",
        NotificationCommand {
            notification: "Something worth telling the caller".into(),
        },
    )
    .await?;
    run(&mediator, "divide by zero (command)", DivideByZeroCommand).await?;
    run(&mediator, "divide by zero (query)", DivideByZeroQuery).await?;
    run(&mediator, "exception thrown", ExceptionThrownCommand).await?;

    Ok(())
}
