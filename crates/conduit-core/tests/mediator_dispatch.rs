//! Registry and dispatch tests
//!
//! Coverage targets:
//! - Build-time registration errors
//! - Missing handlers
//! - Repeated and concurrent dispatch

mod common;

use common::*;
use conduit::{FnValidator, Mediator, MediatorError, Pipeline, PipelineConfig};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_second_handler_for_same_type_is_rejected() {
    let result = Mediator::builder()
        .handler::<Register, _>(RegisterHandler::default())
        .handler::<Register, _>(RegisterHandler::default())
        .build();

    assert!(matches!(result, Err(MediatorError::DuplicateHandler("Register"))));
}

#[test]
fn test_validators_need_a_handler() {
    let result = Mediator::builder()
        .handler::<Divide, _>(DivideHandler)
        .validator::<Register, _>(FnValidator::new(adult))
        .build();

    assert!(matches!(
        result,
        Err(MediatorError::ValidatorWithoutHandler("Register"))
    ));
}

#[tokio::test]
async fn test_unregistered_request_type() {
    let mediator = Mediator::builder()
        .handler::<Divide, _>(DivideHandler)
        .build()
        .unwrap();

    let error = mediator.send(Explode).await.unwrap_err();

    assert!(matches!(error, MediatorError::HandlerNotRegistered("Explode")));
    assert_eq!(
        error.to_string(),
        "No handler registered for request type Explode"
    );
}

#[tokio::test]
async fn test_shared_handler_registration() {
    let calls = Arc::new(AtomicUsize::new(0));
    let handler = Arc::new(RegisterHandler::counting(&calls));
    let mediator = Mediator::builder().shared_handler::<Register>(handler).build().unwrap();

    mediator.send(Register::new("Ana", 30)).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_identical_requests_are_independent() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mediator = Mediator::builder()
        .handler::<Register, _>(RegisterHandler::counting(&calls))
        .build()
        .unwrap();
    let request = Register::new("Ana", 30);

    let first = mediator.send(request.clone()).await.unwrap();
    let second = mediator.send(request).await.unwrap();

    assert_eq!(first.value(), Ok(&1));
    assert_eq!(second.value(), Ok(&2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_from_many_tasks() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mediator = Mediator::builder()
        .handler::<Register, _>(RegisterHandler::counting(&calls))
        .handler::<Notify, _>(NotifyHandler)
        .build()
        .unwrap();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let mediator = mediator.clone();
            tokio::spawn(async move {
                let message = format!("task {i}");
                let notified = mediator
                    .send(Notify::messages(&[message.as_str()]))
                    .await
                    .unwrap();
                let registered = mediator.send(Register::new("Ana", 30)).await.unwrap();
                (message, notified, registered)
            })
        })
        .collect();

    for task in tasks {
        let (message, notified, registered) = task.await.unwrap();
        assert_eq!(notified.errors().len(), 1);
        assert_eq!(notified.errors()[0].message(), message);
        assert!(registered.is_success());
    }
    assert_eq!(calls.load(Ordering::SeqCst), 32);
}

#[tokio::test]
async fn test_config_is_exposed() {
    let config = PipelineConfig::default().with_logging(false);
    let mediator = Mediator::builder()
        .config(config)
        .handler::<Divide, _>(DivideHandler)
        .build()
        .unwrap();

    assert_eq!(mediator.config(), &config);
    assert!(mediator.has_handler::<Divide>());
    assert!(!mediator.has_handler::<Register>());
}

#[tokio::test]
async fn test_pipeline_can_be_composed_by_hand() {
    let pipeline = Pipeline::<Divide>::new(Arc::new(DivideHandler))
        .with_behavior(Arc::new(conduit::ExceptionBehavior))
        .with_behavior(Arc::new(conduit::LoggingBehavior));

    let outcome = pipeline
        .execute(
            &Divide {
                dividend: 1,
                divisor: 0,
            },
            &conduit::RequestContext::default(),
        )
        .await
        .unwrap();

    assert_eq!(pipeline.behavior_names(), vec!["exception", "logging"]);
    assert!(outcome.is_failure());
}
