use super::{
    GenerationRequest, PipelineOutcome, RequestKind,
    fsm::{PipelineEvent, PipelineState, PipelineStateMachine},
};
use crate::{
    Error, Result,
    config::{ArenaConfig, Config},
    flows::{Artifact, ArtifactKind, Category, Formatter, Generator, Recommender, Router},
    llm::{LlmClient, OpenAiClient},
    session::{SessionStore, StagedTurn, Transcript},
    validation::{ProductInput, Prompt},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Target shape handed to the formatter for generated components.
pub const COMPONENT_SHAPE: &str = "A single React functional component written in JSX or TSX. Code only: no explanations, no prose, no markdown outside one fenced code block.";

pub const EMPTY_RECOMMENDATION_PROMPT: &str = "Please enter a prompt to get recommendations.";

/// What the generating stage of a run works on.
enum Job<'a> {
    Prompt { kind: RequestKind, prompt: &'a Prompt },
    Product(&'a ProductInput),
}

/// Sequences router, generator and formatter for each request type.
pub struct Arena {
    router: Router,
    generator: Generator,
    formatter: Formatter,
    recommender: Recommender,
    format_code: bool,
}

impl Arena {
    pub fn new(config: &Config) -> Self {
        info!(
            "Initializing arena with model '{}' via {}",
            config.llm.model, config.llm.provider
        );
        let client: Arc<dyn LlmClient> = Arc::new(OpenAiClient::new(config.llm.clone()));
        Self::with_client(client, &config.arena)
    }

    pub fn with_client(client: Arc<dyn LlmClient>, arena: &ArenaConfig) -> Self {
        Self {
            router: Router::new(client.clone()),
            generator: Generator::new(client.clone()),
            formatter: Formatter::new(client.clone()),
            recommender: Recommender::new(client),
            format_code: arena.format_code,
        }
    }

    /// Runs one prompt-driven request through the pipeline.
    pub async fn run(&self, request: GenerationRequest) -> Result<PipelineOutcome> {
        let kind = request.kind;
        let mut fsm = PipelineStateMachine::new(
            kind.needs_routing(),
            kind.produces_code() && self.format_code,
        );
        if kind == RequestKind::UiElement {
            fsm = fsm.with_category(Category::UiElement);
        } else if let Some(category) = request.category {
            fsm = fsm.with_category(category);
        }

        let prompt = match Prompt::parse(&request.prompt) {
            Ok(prompt) => prompt,
            Err(e) => return Err(fail(&mut fsm, e)),
        };

        if !request.params.is_empty() {
            debug!(
                "Generation parameters {:?} are accepted but not forwarded to the backend",
                request.params
            );
        }

        fsm.transition(PipelineEvent::InputValidated)?;
        let artifact_kind = match kind {
            RequestKind::Component | RequestKind::UiElement => ArtifactKind::Component,
            RequestKind::Text => ArtifactKind::Text,
        };
        self.drive(&mut fsm, Job::Prompt { kind, prompt: &prompt })
            .await?;

        outcome(&fsm, artifact_kind)
    }

    /// Generates a product description; never routed or formatted.
    pub async fn describe_product(
        &self,
        product_name: &str,
        keywords: &str,
    ) -> Result<PipelineOutcome> {
        let mut fsm = PipelineStateMachine::new(false, false);
        let input = match ProductInput::parse(product_name, keywords) {
            Ok(input) => input,
            Err(e) => return Err(fail(&mut fsm, e)),
        };

        fsm.transition(PipelineEvent::InputValidated)?;
        self.drive(&mut fsm, Job::Product(&input)).await?;

        outcome(&fsm, ArtifactKind::ProductDescription)
    }

    async fn drive(&self, fsm: &mut PipelineStateMachine, job: Job<'_>) -> Result<()> {
        while !fsm.is_terminal() {
            match fsm.current_state() {
                PipelineState::Routing => {
                    let Job::Prompt { prompt, .. } = &job else {
                        return Err(Error::internal("routing requires a prompt"));
                    };
                    match self.router.route(prompt).await {
                        Ok(category) => {
                            fsm.transition(PipelineEvent::Routed(category))?;
                        }
                        Err(e) => return Err(fail(fsm, e)),
                    }
                }
                PipelineState::Generating => {
                    match self.generate(&job, fsm.context.category).await {
                        Ok(artifact) => {
                            fsm.transition(PipelineEvent::Generated(artifact.content))?;
                        }
                        Err(e) => return Err(fail(fsm, e)),
                    }
                }
                PipelineState::Formatting => {
                    let draft = fsm.context.draft.clone().unwrap_or_default();
                    match self.formatter.format(&draft, COMPONENT_SHAPE).await {
                        Ok(snippet) if !snippet.trim().is_empty() => {
                            fsm.transition(PipelineEvent::Formatted(snippet))?;
                        }
                        Ok(_) => {
                            warn!("Formatter returned an empty snippet");
                            fsm.transition(PipelineEvent::FormattingDegraded(degraded_message(
                                &Error::formatting("the formatter returned nothing"),
                            )))?;
                        }
                        Err(e) => {
                            warn!("Formatting failed, returning placeholder: {}", e);
                            fsm.transition(PipelineEvent::FormattingDegraded(
                                degraded_message(&e),
                            ))?;
                        }
                    }
                }
                state @ (PipelineState::Validating
                | PipelineState::Completed
                | PipelineState::Failed) => {
                    return Err(Error::internal(format!(
                        "pipeline cannot advance from {:?}",
                        state
                    )));
                }
            }
        }
        Ok(())
    }

    async fn generate(&self, job: &Job<'_>, category: Option<Category>) -> Result<Artifact> {
        match job {
            Job::Prompt {
                kind: RequestKind::Component,
                prompt,
            } => self.generator.generate_component(prompt, category).await,
            Job::Prompt {
                kind: RequestKind::UiElement,
                prompt,
            } => self.generator.generate_ui_element(prompt).await,
            Job::Prompt {
                kind: RequestKind::Text,
                prompt,
            } => self.generator.generate_text(prompt).await,
            Job::Product(input) => self.generator.generate_product_description(input).await,
        }
    }

    /// Runs a request inside a session: the user turn is staged before the
    /// backend calls and committed only when the pipeline completes. If the
    /// run fails or this future is dropped, the staged turn is discarded.
    pub async fn submit(
        &self,
        sessions: &SessionStore,
        session_id: &str,
        request: GenerationRequest,
    ) -> Result<(PipelineOutcome, Transcript)> {
        let prompt = Prompt::parse(&request.prompt)?;
        let user_message = request.kind.user_message(prompt.as_str());
        let turn = sessions.stage(session_id, user_message)?;

        let outcome = self.run(request).await?;
        settle(turn, outcome)
    }

    pub async fn submit_description(
        &self,
        sessions: &SessionStore,
        session_id: &str,
        product_name: &str,
        keywords: &str,
    ) -> Result<(PipelineOutcome, Transcript)> {
        ProductInput::parse(product_name, keywords)?;
        let turn = sessions.stage(session_id, format!("Generate description for {product_name}"))?;

        let outcome = self.describe_product(product_name, keywords).await?;
        settle(turn, outcome)
    }

    pub async fn generate_component_action(&self, prompt: &str) -> Result<String> {
        Ok(self.run(GenerationRequest::component(prompt)).await?.output)
    }

    pub async fn generate_ui_action(&self, prompt: &str) -> Result<String> {
        Ok(self
            .run(GenerationRequest::new(RequestKind::UiElement, prompt))
            .await?
            .output)
    }

    pub async fn generate_text_action(&self, prompt: &str) -> Result<String> {
        Ok(self
            .run(GenerationRequest::new(RequestKind::Text, prompt))
            .await?
            .output)
    }

    pub async fn generate_description_action(
        &self,
        product_name: &str,
        keywords: &str,
    ) -> Result<String> {
        Ok(self.describe_product(product_name, keywords).await?.output)
    }

    /// Independent of any session. A blank prompt gets a hint instead of a
    /// backend call.
    pub async fn recommendation_action(&self, prompt: &str) -> Result<String> {
        let Ok(prompt) = Prompt::parse(prompt) else {
            return Ok(EMPTY_RECOMMENDATION_PROMPT.to_string());
        };

        self.recommender.recommend(&prompt).await.map_err(|e| {
            error!("Error getting recommendations: {}", e);
            e
        })
    }

    /// Formats arbitrary model output; errors propagate here.
    pub async fn format_action(&self, raw_response: &str, target_shape: &str) -> Result<String> {
        if raw_response.trim().is_empty() {
            return Err(Error::validation("Raw response cannot be empty."));
        }
        if target_shape.trim().is_empty() {
            return Err(Error::validation("Target shape cannot be empty."));
        }
        self.formatter.format(raw_response, target_shape).await
    }
}

fn fail(fsm: &mut PipelineStateMachine, e: Error) -> Error {
    if matches!(e, Error::Validation(_)) {
        debug!("Rejected input: {}", e);
    } else {
        error!("Pipeline failed in state {:?}: {}", fsm.current_state(), e);
    }
    if let Err(transition_error) = fsm.transition(PipelineEvent::Failed(e.to_string())) {
        warn!("Could not record pipeline failure: {}", transition_error);
    }
    e
}

fn outcome(fsm: &PipelineStateMachine, kind: ArtifactKind) -> Result<PipelineOutcome> {
    let output = fsm
        .output()
        .ok_or_else(|| Error::internal("pipeline completed without output"))?;

    Ok(PipelineOutcome {
        kind,
        output: output.to_string(),
        category: fsm.context.category,
        degraded: fsm.context.degraded,
    })
}

fn settle(turn: StagedTurn, outcome: PipelineOutcome) -> Result<(PipelineOutcome, Transcript)> {
    let transcript = turn.commit(outcome.output.clone())?;
    Ok((outcome, transcript))
}

fn degraded_message(e: &Error) -> String {
    format!("Sorry, the generated code could not be formatted. {}", e)
}
