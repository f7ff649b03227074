//! Common test utilities: sample requests, handlers and a log capture

#![allow(dead_code)]

use async_trait::async_trait;
use conduit::{
    Fault, FieldError, Handler, HandlerResult, Outcome, Request, RequestContext, RequestKind,
    Sensitive, Error,
};
use parking_lot::Mutex;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::fmt::MakeWriter;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone)]
pub struct Register {
    pub name: String,
    pub age: u32,
    pub password: Sensitive<String>,
}

impl Register {
    pub fn new(name: &str, age: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
            password: Sensitive::new("secret123".to_string()),
        }
    }
}

impl Request for Register {
    type Response = usize;
    const KIND: RequestKind = RequestKind::Command;
}

#[derive(Debug, Clone, Copy)]
pub struct Divide {
    pub dividend: i32,
    pub divisor: i32,
}

impl Request for Divide {
    type Response = i32;
    const KIND: RequestKind = RequestKind::Query;
}

#[derive(Debug)]
pub struct Explode;

impl Request for Explode {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

#[derive(Debug, Default)]
pub struct Notify {
    pub messages: Vec<String>,
    pub fail_with: Option<String>,
}

impl Notify {
    pub fn messages(messages: &[&str]) -> Self {
        Self {
            messages: messages.iter().map(|m| m.to_string()).collect(),
            fail_with: None,
        }
    }
}

impl Request for Notify {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

#[derive(Debug)]
pub struct WaitForCancel;

impl Request for WaitForCancel {
    type Response = ();
    const KIND: RequestKind = RequestKind::Command;
}

// ============================================================================
// Handlers
// ============================================================================

/// Counts its invocations and returns the running count
#[derive(Default)]
pub struct RegisterHandler {
    pub calls: Arc<AtomicUsize>,
}

impl RegisterHandler {
    pub fn counting(calls: &Arc<AtomicUsize>) -> Self {
        Self {
            calls: calls.clone(),
        }
    }
}

#[async_trait]
impl Handler<Register> for RegisterHandler {
    async fn handle(&self, _: &Register, _: &RequestContext) -> HandlerResult<usize> {
        Ok(Outcome::success(self.calls.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

pub struct DivideHandler;

#[async_trait]
impl Handler<Divide> for DivideHandler {
    async fn handle(&self, request: &Divide, _: &RequestContext) -> HandlerResult<i32> {
        Ok(Outcome::success(request.dividend / request.divisor))
    }
}

pub struct ExplodeHandler;

#[async_trait]
impl Handler<Explode> for ExplodeHandler {
    async fn handle(&self, _: &Explode, _: &RequestContext) -> HandlerResult<()> {
        Err(Fault::msg("database unreachable at 10.0.0.7"))
    }
}

pub struct NotifyHandler;

#[async_trait]
impl Handler<Notify> for NotifyHandler {
    async fn handle(&self, request: &Notify, ctx: &RequestContext) -> HandlerResult<()> {
        ctx.notifier().notify_all(request.messages.iter().cloned());
        Ok(match &request.fail_with {
            Some(message) => Outcome::with_error(Error::new(message.clone())),
            None => Outcome::unit(),
        })
    }
}

pub struct WaitForCancelHandler;

#[async_trait]
impl Handler<WaitForCancel> for WaitForCancelHandler {
    async fn handle(&self, _: &WaitForCancel, ctx: &RequestContext) -> HandlerResult<()> {
        tokio::select! {
            _ = ctx.cancellation().cancelled() => Err(Fault::Cancelled),
            _ = tokio::time::sleep(Duration::from_secs(30)) => Ok(Outcome::unit()),
        }
    }
}

// ============================================================================
// Validators
// ============================================================================

pub fn name_required(request: &Register) -> Vec<FieldError> {
    if request.name.is_empty() {
        vec![FieldError::new("name", "must not be empty")]
    } else {
        Vec::new()
    }
}

pub fn adult(request: &Register) -> Vec<FieldError> {
    if request.age < 18 {
        vec![FieldError::new("age", "must be at least 18")]
    } else {
        Vec::new()
    }
}

// ============================================================================
// Log capture
// ============================================================================

/// Collects formatted log output of the current thread
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Route DEBUG and above of the current thread into this capture
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}
