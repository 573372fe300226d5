use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::action::AgentAction;
use super::catalog::ToolCatalog;
use super::errors::{SessionError, StartError};
use super::events::{EventSink, SessionEvent, SessionObserver};
use super::legacy;
use super::models::{AgentOptions, SessionOutcome};
use super::planner::Planner;
use super::session::{ConversationTurn, Phase, SessionState};
use crate::rpc::{JsonRpcRequest, METHOD_TOOLS_LIST, RequestIdAllocator};
use crate::tooling::{ToolInvokeError, ToolInvoker, render_tool_output, resolve_response};

/// Accepts goals and runs each one as its own session task.
///
/// Only one session runs at a time; a goal submitted while another is in
/// flight is rejected rather than queued or interleaved.
pub struct AgentLoopController {
    planner: Planner,
    invoker: Arc<dyn ToolInvoker>,
    options: AgentOptions,
    active: Arc<AtomicBool>,
}

impl AgentLoopController {
    pub fn new(planner: Planner, invoker: Arc<dyn ToolInvoker>, options: AgentOptions) -> Self {
        Self {
            planner,
            invoker,
            options,
            active: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn options(&self) -> &AgentOptions {
        &self.options
    }

    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Validate `goal` and spawn its session on the current tokio runtime.
    pub fn start(&self, goal: impl Into<String>) -> Result<SessionHandle, StartError> {
        let goal = goal.into();
        let goal = goal.trim();
        if goal.is_empty() {
            return Err(StartError::InvalidGoal);
        }
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Rejecting goal while another session is running");
            return Err(StartError::SessionActive);
        }
        let guard = ActiveGuard(Arc::clone(&self.active));

        let session_id = Uuid::new_v4();
        let (sink, events) = EventSink::channel();
        let cancel = CancellationToken::new();
        let runner = SessionRunner {
            session_id,
            active: guard,
            planner: self.planner.clone(),
            invoker: Arc::clone(&self.invoker),
            options: self.options.clone(),
            ids: RequestIdAllocator::new(),
            state: SessionState::new(goal),
            cancel: cancel.clone(),
        };

        info!(%session_id, goal, max_iterations = self.options.max_iterations, "Session accepted");
        let span = info_span!("session", id = %session_id);
        let task = tokio::spawn(
            async move { runner.run(sink).await }.instrument(span),
        );

        Ok(SessionHandle {
            session_id,
            goal: goal.to_string(),
            events,
            cancel,
            task,
        })
    }
}

/// Clears the controller's busy flag when dropped: right before the terminal
/// event on a normal finish, or with the session task if it panics.
struct ActiveGuard(Arc<AtomicBool>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Caller's side of a running session.
pub struct SessionHandle {
    session_id: Uuid,
    goal: String,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    cancel: CancellationToken,
    task: JoinHandle<SessionOutcome>,
}

impl SessionHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    /// Fail the session with "cancelled". A planner or tool call still in
    /// flight is abandoned and its reply never reaches the session.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Next notification; `None` once the session has emitted its terminal event.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }

    /// Feed every notification to `observer`, then wait for the outcome.
    pub async fn drive<O: SessionObserver + ?Sized>(mut self, observer: &mut O) -> SessionOutcome {
        while let Some(event) = self.events.recv().await {
            observer.dispatch(&event);
        }
        self.join().await
    }

    pub async fn join(self) -> SessionOutcome {
        let Self {
            session_id,
            goal,
            task,
            ..
        } = self;
        match task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%session_id, %err, "Session task did not finish cleanly");
                let error = SessionError::Aborted(err.to_string());
                SessionOutcome {
                    session_id,
                    goal,
                    phase: Phase::Failed {
                        reason: error.reason(),
                    },
                    iterations: 0,
                    history: Vec::new(),
                    result: Err(error),
                }
            }
        }
    }
}

/// The state machine of one session. Lives inside the session task and is
/// the only writer of its [`SessionState`].
struct SessionRunner {
    session_id: Uuid,
    active: ActiveGuard,
    planner: Planner,
    invoker: Arc<dyn ToolInvoker>,
    options: AgentOptions,
    ids: RequestIdAllocator,
    state: SessionState,
    cancel: CancellationToken,
}

impl SessionRunner {
    async fn run(mut self, sink: EventSink) -> SessionOutcome {
        let result = self.drive(&sink).await;
        self.finish(result, sink)
    }

    async fn drive(&mut self, sink: &EventSink) -> Result<String, SessionError> {
        self.select_device(sink).await?;
        self.fetch_catalog(sink).await?;

        let limit = self.options.max_iterations;
        loop {
            let iteration = self.state.iteration;
            if iteration >= limit {
                return Err(SessionError::IterationLimitExceeded { limit });
            }

            self.enter(
                sink,
                Phase::Planning { iteration },
                format!("Planning step {} of at most {limit}", iteration + 1),
            );
            let request_id = self.ids.next();
            // Counted before the call, so a failed model call is still a consultation.
            self.state.begin_consultation();
            let action = until_cancelled(
                &self.cancel,
                self.planner.plan(
                    &self.state.goal,
                    &self.state.catalog,
                    &self.state.history,
                    request_id,
                ),
            )
            .await??;

            match action {
                AgentAction::Completion { message } => {
                    self.state.record(ConversationTurn::Completion {
                        message: message.clone(),
                    });
                    return Ok(message);
                }
                AgentAction::Unparseable { raw_text, reason } => {
                    return Err(SessionError::PlannerParse { reason, raw_text });
                }
                AgentAction::ToolCall { request } => {
                    self.invoke(sink, iteration, request).await?;
                }
            }
        }
    }

    async fn select_device(&mut self, sink: &EventSink) -> Result<(), SessionError> {
        let device = self.options.device.clone();
        self.enter(
            sink,
            Phase::SelectingDevice,
            format!("Connecting to {} device {}", device.device_type, device.device),
        );

        if let Some(discovery) = device.discovery_tool.as_deref() {
            let devices = self.bootstrap_call(discovery, Value::Null).await?;
            debug!(tool = discovery, devices = %render_tool_output(&devices), "Devices discovered");
        }
        let arguments = self.options.bootstrap_arguments();
        self.bootstrap_call(&device.bootstrap_tool, arguments).await?;
        info!(device = device.device.as_str(), "Device selected");
        Ok(())
    }

    /// Plumbing call made before planning; its output never enters the history.
    async fn bootstrap_call(&self, tool: &str, arguments: Value) -> Result<Value, SessionError> {
        let request = JsonRpcRequest::call_tool(self.ids.next(), tool, arguments);
        self.call(request)
            .await?
            .and_then(|output| self.screen_legacy(output))
            .map_err(|err| SessionError::from_invocation(tool, err))
    }

    async fn fetch_catalog(&mut self, sink: &EventSink) -> Result<(), SessionError> {
        self.enter(sink, Phase::FetchingCatalog, "Fetching available tools");

        let request = JsonRpcRequest::list_tools(self.ids.next());
        let result = self
            .call(request)
            .await?
            .map_err(|err| SessionError::from_invocation(METHOD_TOOLS_LIST, err))?;

        let catalog = ToolCatalog::from_list_result(&result);
        if catalog.is_empty() {
            return Err(SessionError::EmptyCatalog {
                raw: result.to_string(),
            });
        }
        info!(tools = catalog.len(), "Tool catalog fetched");
        self.state.catalog = catalog;
        Ok(())
    }

    async fn invoke(
        &mut self,
        sink: &EventSink,
        iteration: u32,
        request: JsonRpcRequest,
    ) -> Result<(), SessionError> {
        let tool = request.tool_name().unwrap_or_default().to_string();
        let arguments = request.arguments();
        self.enter(
            sink,
            Phase::Invoking { iteration },
            format!("Calling tool '{tool}'"),
        );

        let resolved = self
            .call(request)
            .await?
            .and_then(|output| self.screen_legacy(output));
        match resolved {
            Ok(output) => {
                let text = render_tool_output(&output);
                info!(tool = tool.as_str(), "Tool call succeeded");
                sink.tool_result(text);
                self.state.record(ConversationTurn::ToolInvocation {
                    tool,
                    arguments,
                    result: Some(output),
                    error: None,
                });
                Ok(())
            }
            Err(err) => {
                warn!(tool = tool.as_str(), %err, "Tool call failed");
                self.state.record(ConversationTurn::ToolInvocation {
                    tool: tool.clone(),
                    arguments,
                    result: None,
                    error: Some(err.to_string()),
                });
                Err(SessionError::from_invocation(&tool, err))
            }
        }
    }

    /// One round trip. The outer error is cancellation only.
    async fn call(
        &self,
        request: JsonRpcRequest,
    ) -> Result<Result<Value, ToolInvokeError>, SessionError> {
        let expected = request.id;
        let response = until_cancelled(&self.cancel, self.invoker.invoke(request)).await?;
        Ok(resolve_response(expected, response))
    }

    fn screen_legacy(&self, output: Value) -> Result<Value, ToolInvokeError> {
        if self.planner.legacy_heuristics() {
            let text = render_tool_output(&output);
            if legacy::failure_signal(&text) {
                return Err(ToolInvokeError::ToolFailure { message: text });
            }
        }
        Ok(output)
    }

    fn enter(&mut self, sink: &EventSink, phase: Phase, status: impl Into<String>) {
        debug!(from = %self.state.phase, to = %phase, "Phase transition");
        self.state.phase = phase;
        sink.status(status);
    }

    fn finish(self, result: Result<String, SessionError>, sink: EventSink) -> SessionOutcome {
        let Self {
            session_id,
            active,
            mut state,
            ..
        } = self;
        // Observers may start the next goal as soon as they see the terminal event.
        drop(active);

        match &result {
            Ok(message) => {
                state.phase = Phase::Completed;
                info!(iterations = state.iteration, "Session completed");
                sink.complete(message.clone());
            }
            Err(err) => {
                state.phase = Phase::Failed {
                    reason: err.reason(),
                };
                warn!(iterations = state.iteration, error = %err, "Session failed");
                sink.fail(err.user_message());
            }
        }

        SessionOutcome {
            session_id,
            goal: state.goal,
            phase: state.phase,
            iterations: state.iteration,
            history: state.history,
            result,
        }
    }
}

/// Await `work` unless the session is cancelled first; a cancelled future is
/// dropped along with whatever it would have returned.
async fn until_cancelled<F: Future>(
    token: &CancellationToken,
    work: F,
) -> Result<F::Output, SessionError> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(SessionError::Cancelled),
        output = work => Ok(output),
    }
}
