//! Two-trigger control loop that walks a chain through a generation port.
//!
//! The driver owns a single "current chain" slot and an event queue:
//!
//! - **Trigger A** ([`ChainDriver::set_inputs`]) fires when the
//!   `(model, input)` pair changes. It supersedes the previous epoch, cancels
//!   any in-flight call and, when both values are present, builds a fresh
//!   [`ChainState`].
//! - **Trigger B** (internal `advance`) fires after every state change. It
//!   finds the active step, truncates its input and spawns exactly one
//!   generation call.
//!
//! Generation results come back through the queue tagged with the epoch they
//! were issued under. [`ChainDriver::process_next`] applies results from the
//! current epoch and drops everything else.

use crate::{BudgetSettings, ChainState, ContextBudget, truncate_middle};
use personas_core::{ChainStep, GenerateRequest, GenerateResponse, Message};
use personas_error::{
    ChainError, ChainErrorKind, GenerationError, PersonasError, PersonasResult,
};
use personas_interface::{ChainView, GenerationPort, ModelRegistry};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, instrument, warn};

/// Result of one generation call, tagged with its epoch.
#[derive(Debug)]
struct GenerationEvent {
    epoch: u64,
    index: usize,
    outcome: PersonasResult<GenerateResponse>,
}

/// Drives one chain at a time through a [`GenerationPort`].
///
/// Generation calls are spawned onto the current Tokio runtime. Outside a
/// runtime no call is started; the chain halts with an error instead.
///
/// # Examples
///
/// ```no_run
/// use personas_chain::{ChainDriver, InMemoryModelRegistry, youtube_persona_steps};
/// use personas_core::ModelInfo;
/// # use personas_core::{GenerateRequest, GenerateResponse};
/// # use personas_error::PersonasResult;
/// # use personas_interface::{CancellationToken, GenerationPort};
/// # use std::sync::Arc;
/// # struct Echo;
/// # #[async_trait::async_trait]
/// # impl GenerationPort for Echo {
/// #     async fn generate(&self, r: &GenerateRequest, _: &CancellationToken) -> PersonasResult<GenerateResponse> {
/// #         Ok(GenerateResponse::new(r.user_text().unwrap_or_default()))
/// #     }
/// #     fn port_name(&self) -> &'static str { "echo" }
/// # }
///
/// # async fn run() -> PersonasResult<()> {
/// let registry = InMemoryModelRegistry::new().with_model(ModelInfo::new("gpt-4o-mini", 128_000));
/// let mut driver = ChainDriver::new(youtube_persona_steps(), Arc::new(Echo), registry)?;
///
/// driver.set_inputs(Some("gpt-4o-mini"), Some("transcript text"));
/// let view = driver.run_until_idle().await;
/// assert!(view.is_finished);
/// # Ok(())
/// # }
/// ```
pub struct ChainDriver<G, R>
where
    G: GenerationPort + ?Sized + 'static,
    R: ModelRegistry,
{
    steps: Vec<ChainStep>,
    port: Arc<G>,
    registry: R,
    settings: BudgetSettings,

    model_id: Option<String>,
    input: Option<String>,

    chain: Option<ChainState>,
    error: Option<String>,
    halted: bool,

    epoch: u64,
    cancel: CancellationToken,
    in_flight: Option<usize>,
    outstanding: usize,

    events_tx: mpsc::UnboundedSender<GenerationEvent>,
    events_rx: mpsc::UnboundedReceiver<GenerationEvent>,
}

impl<G, R> ChainDriver<G, R>
where
    G: GenerationPort + ?Sized + 'static,
    R: ModelRegistry,
{
    /// Create an idle driver for `steps`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainErrorKind::EmptyChain`] when `steps` is empty.
    pub fn new(steps: Vec<ChainStep>, port: Arc<G>, registry: R) -> PersonasResult<Self> {
        if steps.is_empty() {
            return Err(ChainError::new(ChainErrorKind::EmptyChain).into());
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Ok(Self {
            steps,
            port,
            registry,
            settings: BudgetSettings::default(),
            model_id: None,
            input: None,
            chain: None,
            error: None,
            halted: false,
            epoch: 0,
            cancel: CancellationToken::new(),
            in_flight: None,
            outstanding: 0,
            events_tx,
            events_rx,
        })
    }

    /// Builder method to override budget settings.
    pub fn with_settings(mut self, settings: BudgetSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Supply the current model selection and input text (Trigger A).
    ///
    /// Empty strings count as absent. Re-supplying the current pair is a
    /// no-op. Any change supersedes the previous chain: its in-flight call is
    /// cancelled and its eventual result ignored.
    #[instrument(skip(self, model, input), fields(
        model = model.unwrap_or(""),
        input_chars = input.map(|s| s.chars().count()).unwrap_or(0),
    ))]
    pub fn set_inputs(&mut self, model: Option<&str>, input: Option<&str>) {
        let model = model.filter(|s| !s.is_empty()).map(str::to_string);
        let input = input.filter(|s| !s.is_empty()).map(str::to_string);

        if model == self.model_id && input == self.input {
            debug!("Inputs unchanged");
            return;
        }
        self.model_id = model;
        self.input = input;

        self.supersede();

        let Some(input) = self.input.clone() else {
            debug!(epoch = self.epoch, "Input cleared");
            return;
        };
        let Some(model_id) = self.model_id.clone() else {
            self.error = Some(ChainErrorKind::ModelNotProvided.to_string());
            debug!("Input present without a model");
            return;
        };

        self.error = None;
        let chain = ContextBudget::resolve(
            &self.registry,
            &model_id,
            *self.settings.chars_per_token(),
        )
        .and_then(|budget| {
            debug!(
                context_tokens = budget.context_tokens(),
                input_chars = budget.input_chars(),
                "Resolved context budget"
            );
            ChainState::initialize(&self.steps, input, budget)
        });

        match chain {
            Ok(chain) => {
                info!(epoch = self.epoch, steps = chain.steps().len(), "Chain initialized");
                self.chain = Some(chain);
                self.advance();
            }
            Err(e) => {
                warn!(error = %e, "Chain initialization failed");
                self.error = Some(e.user_message());
            }
        }
    }

    /// Wait for the next generation result and apply it.
    ///
    /// Returns `false` without waiting when no call is outstanding.
    pub async fn process_next(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Process results until no call is outstanding, then return the view.
    ///
    /// A port that never answers and is never cancelled keeps this pending.
    pub async fn run_until_idle(&mut self) -> ChainView {
        while self.process_next().await {}
        self.view()
    }

    /// Read-only projection of the current chain.
    pub fn view(&self) -> ChainView {
        match &self.chain {
            Some(chain) => ChainView {
                is_finished: chain.is_finished(),
                is_transforming: !chain.steps().is_empty() && !chain.is_finished(),
                progress: *chain.progress(),
                output: chain.final_output().clone(),
                error: self.error.clone(),
            },
            None => ChainView {
                error: self.error.clone(),
                ..ChainView::default()
            },
        }
    }

    /// Current chain snapshot, if one exists.
    pub fn chain(&self) -> Option<&ChainState> {
        self.chain.as_ref()
    }

    /// Last recorded error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current epoch; increments every time the inputs change.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Token handed to calls issued in the current epoch.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Step index of the call in flight, if any.
    pub fn in_flight(&self) -> Option<usize> {
        self.in_flight
    }

    /// Cancel the current epoch and arm a fresh token.
    fn supersede(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.epoch += 1;
        self.chain = None;
        self.in_flight = None;
        self.halted = false;
    }

    /// Trigger B: start the active step, if any.
    #[instrument(skip(self), fields(epoch = self.epoch))]
    fn advance(&mut self) {
        if self.halted || self.in_flight.is_some() {
            return;
        }
        let Some(chain) = &self.chain else {
            return;
        };
        let Some(step) = chain.next_incomplete_step() else {
            debug!("Chain finished");
            return;
        };

        let index = *step.index();
        let input = match (step.input(), step.output()) {
            (Some(input), None) => input.clone(),
            (input, output) => {
                let err = PersonasError::from(ChainError::new(ChainErrorKind::InvariantViolation(
                    format!(
                        "step {} ('{}') has input: {}, output: {}",
                        index,
                        step.name(),
                        input.is_some(),
                        output.is_some()
                    ),
                )));
                warn!(step = index, error = %err, "Refusing to run step");
                self.error = Some(err.user_message());
                self.halted = true;
                return;
            }
        };

        let budget = chain.input_char_budget();
        let user_text = truncate_middle(&input, budget);
        if user_text.len() != input.len() {
            debug!(
                step = index,
                original_chars = input.chars().count(),
                budget,
                "Truncated step input"
            );
        }

        let request = GenerateRequest {
            model: self.model_id.clone().unwrap_or_default(),
            messages: vec![
                Message::system(step.system_prompt().clone()),
                Message::user(user_text.into_owned()),
            ],
            max_tokens: chain.budget().max_output_tokens(),
        };

        self.spawn_generation(index, request);
    }

    fn spawn_generation(&mut self, index: usize, request: GenerateRequest) {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                let err = PersonasError::from(GenerationError::failed(format!(
                    "no Tokio runtime to run the step on: {}",
                    e
                )));
                error!(step = index, error = %err, "Cannot start generation");
                self.error = Some(format!("Transformation Error: {}", err.user_message()));
                self.halted = true;
                return;
            }
        };

        let port = Arc::clone(&self.port);
        let token = self.cancel.clone();
        let tx = self.events_tx.clone();
        let epoch = self.epoch;
        let span = info_span!("generation", step = index, epoch, port = self.port.port_name());

        self.in_flight = Some(index);
        self.outstanding += 1;

        runtime.spawn(
            async move {
                // The port runs in its own task so a panic comes back as a JoinError.
                let call_token = token.clone();
                let mut call = tokio::spawn(
                    async move { port.generate(&request, &call_token).await }.in_current_span(),
                );

                let outcome = tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        call.abort();
                        Err(GenerationError::cancelled().into())
                    }
                    joined = &mut call => match joined {
                        Ok(result) => result,
                        Err(e) if e.is_cancelled() => Err(GenerationError::cancelled().into()),
                        Err(e) => Err(GenerationError::failed(format!(
                            "generation task panicked: {}",
                            e
                        ))
                        .into()),
                    },
                };
                // The driver may already be gone.
                let _ = tx.send(GenerationEvent {
                    epoch,
                    index,
                    outcome,
                });
            }
            .instrument(span),
        );
    }

    #[instrument(skip(self, event), fields(step = event.index, event_epoch = event.epoch, epoch = self.epoch))]
    fn handle_event(&mut self, event: GenerationEvent) {
        self.outstanding = self.outstanding.saturating_sub(1);

        if event.epoch != self.epoch {
            debug!("Discarding result from a superseded epoch");
            return;
        }
        self.in_flight = None;

        match event.outcome {
            Ok(response) => {
                let Some(chain) = &self.chain else {
                    return;
                };
                match chain.complete_step(event.index, response.content) {
                    Ok(next) => {
                        debug!(progress = next.progress(), "Step complete");
                        if next.is_finished() {
                            info!("Chain complete");
                        }
                        self.chain = Some(next);
                        self.advance();
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not record step output");
                        self.error = Some(e.user_message());
                        self.halted = true;
                    }
                }
            }
            Err(e) if e.is_cancellation() => {
                debug!("Generation cancelled");
                self.halted = true;
            }
            Err(e) => {
                error!(error = %e, "Generation failed");
                self.error = Some(format!("Transformation Error: {}", e.user_message()));
                self.halted = true;
            }
        }
    }
}

impl<G, R> Drop for ChainDriver<G, R>
where
    G: GenerationPort + ?Sized + 'static,
    R: ModelRegistry,
{
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl<G, R> std::fmt::Debug for ChainDriver<G, R>
where
    G: GenerationPort + ?Sized + 'static,
    R: ModelRegistry,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainDriver")
            .field("port", &self.port.port_name())
            .field("model_id", &self.model_id)
            .field("epoch", &self.epoch)
            .field("in_flight", &self.in_flight)
            .field("halted", &self.halted)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryModelRegistry;
    use async_trait::async_trait;
    use personas_core::ModelInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingPort {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GenerationPort for CountingPort {
        async fn generate(
            &self,
            _request: &GenerateRequest,
            _cancel: &CancellationToken,
        ) -> PersonasResult<GenerateResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GenerateResponse::new("out"))
        }

        fn port_name(&self) -> &'static str {
            "counting"
        }
    }

    fn driver(port: Arc<CountingPort>) -> ChainDriver<CountingPort, InMemoryModelRegistry> {
        let registry = InMemoryModelRegistry::new().with_model(ModelInfo::new("m", 3000));
        let steps = vec![ChainStep::new("one", "p1"), ChainStep::new("two", "p2")];
        ChainDriver::new(steps, port, registry).unwrap()
    }

    #[tokio::test]
    async fn stale_epoch_results_are_ignored() {
        let port = Arc::new(CountingPort::default());
        let mut driver = driver(port);
        driver.set_inputs(Some("m"), Some("text"));
        let before = driver.chain().cloned();

        driver.handle_event(GenerationEvent {
            epoch: driver.epoch() - 1,
            index: 0,
            outcome: Ok(GenerateResponse::new("stale")),
        });
        assert_eq!(driver.chain().cloned(), before);
        assert_eq!(driver.in_flight(), Some(0));

        driver.handle_event(GenerationEvent {
            epoch: driver.epoch() - 1,
            index: 0,
            outcome: Err(GenerationError::failed("late failure").into()),
        });
        assert_eq!(driver.error(), None);
    }

    #[tokio::test]
    async fn step_with_output_but_incomplete_halts_without_calling_port() {
        let port = Arc::new(CountingPort::default());
        let mut driver = driver(Arc::clone(&port));

        let budget = ContextBudget::new(3000, 3).unwrap();
        let state = ChainState::initialize(&driver.steps, "text", budget)
            .unwrap()
            .with_dangling_output(0, "already here");
        driver.chain = Some(state);
        driver.advance();

        assert!(driver.error().unwrap().contains("invariant"));
        assert_eq!(driver.in_flight(), None);
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
        assert!(!driver.process_next().await);
    }

    #[tokio::test]
    async fn step_without_input_halts_without_calling_port() {
        let port = Arc::new(CountingPort::default());
        let mut driver = driver(Arc::clone(&port));

        let budget = ContextBudget::new(3000, 3).unwrap();
        let state = ChainState::initialize(&driver.steps, "text", budget)
            .unwrap()
            .without_input(0);
        driver.chain = Some(state);
        driver.advance();

        assert!(driver.error().unwrap().contains("invariant"));
        assert_eq!(driver.in_flight(), None);
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
        assert!(!driver.process_next().await);
    }

    #[test]
    fn missing_runtime_is_reported_instead_of_panicking() {
        let port = Arc::new(CountingPort::default());
        let mut driver = driver(Arc::clone(&port));

        driver.set_inputs(Some("m"), Some("text"));

        let error = driver.error().unwrap();
        assert!(error.starts_with("Transformation Error: no Tokio runtime"));
        assert_eq!(driver.in_flight(), None);
        assert!(driver.chain().is_some());
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_steps_are_rejected() {
        let registry = InMemoryModelRegistry::new();
        let result = ChainDriver::new(Vec::new(), Arc::new(CountingPort::default()), registry);
        assert!(result.is_err());
    }
}
