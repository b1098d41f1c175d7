use crate::{Error, Result, flows::Category};
use serde::Serialize;
use tracing::{debug, info, warn};

// Pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Validating,
    Routing,
    Generating,
    Formatting,
    Completed,
    Failed,
}

// Pipeline events
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    InputValidated,
    Routed(Category),
    Generated(String),
    Formatted(String),
    FormattingDegraded(String),
    Failed(String),
}

/// What a submission has produced so far.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub needs_routing: bool,
    pub needs_formatting: bool,
    pub category: Option<Category>,
    pub draft: Option<String>,
    pub output: Option<String>,
    pub degraded: bool,
    pub last_error: Option<String>,
}

pub struct PipelineStateMachine {
    state: PipelineState,
    pub context: PipelineContext,
}

impl PipelineStateMachine {
    pub fn new(needs_routing: bool, needs_formatting: bool) -> Self {
        debug!(
            "Creating pipeline FSM (routing: {}, formatting: {})",
            needs_routing, needs_formatting
        );
        Self {
            state: PipelineState::Validating,
            context: PipelineContext {
                needs_routing,
                needs_formatting,
                ..Default::default()
            },
        }
    }

    /// Starts past routing with a category the caller already knows.
    pub fn with_category(mut self, category: Category) -> Self {
        self.context.category = Some(category);
        self.context.needs_routing = false;
        self
    }

    pub fn current_state(&self) -> PipelineState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, PipelineState::Completed | PipelineState::Failed)
    }

    pub fn transition(&mut self, event: PipelineEvent) -> Result<PipelineState> {
        let old_state = self.state;

        let new_state = match (old_state, &event) {
            (PipelineState::Validating, PipelineEvent::InputValidated) => {
                if self.context.needs_routing {
                    PipelineState::Routing
                } else {
                    PipelineState::Generating
                }
            }
            (PipelineState::Routing, PipelineEvent::Routed(category)) => {
                self.context.category = Some(*category);
                PipelineState::Generating
            }
            (PipelineState::Generating, PipelineEvent::Generated(draft)) => {
                if self.context.needs_formatting {
                    self.context.draft = Some(draft.clone());
                    PipelineState::Formatting
                } else {
                    self.context.output = Some(draft.clone());
                    PipelineState::Completed
                }
            }
            (PipelineState::Formatting, PipelineEvent::Formatted(output)) => {
                self.context.output = Some(output.clone());
                PipelineState::Completed
            }
            (PipelineState::Formatting, PipelineEvent::FormattingDegraded(placeholder)) => {
                self.context.degraded = true;
                self.context.output = Some(placeholder.clone());
                PipelineState::Completed
            }
            (state, PipelineEvent::Failed(reason))
                if !matches!(state, PipelineState::Completed | PipelineState::Failed) =>
            {
                self.context.last_error = Some(reason.clone());
                PipelineState::Failed
            }
            _ => {
                warn!(
                    "Invalid pipeline transition from {:?} with event {:?}",
                    old_state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", old_state),
                    requested: event_name(&event).to_string(),
                });
            }
        };

        info!(
            "Pipeline transition: {:?} -> {:?} ({})",
            old_state,
            new_state,
            event_name(&event)
        );
        self.state = new_state;
        Ok(new_state)
    }

    pub fn output(&self) -> Option<&str> {
        self.context.output.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.context.last_error.as_deref()
    }
}

fn event_name(event: &PipelineEvent) -> &'static str {
    match event {
        PipelineEvent::InputValidated => "InputValidated",
        PipelineEvent::Routed(_) => "Routed",
        PipelineEvent::Generated(_) => "Generated",
        PipelineEvent::Formatted(_) => "Formatted",
        PipelineEvent::FormattingDegraded(_) => "FormattingDegraded",
        PipelineEvent::Failed(_) => "Failed",
    }
}
