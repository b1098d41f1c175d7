mod executor;
pub mod fsm;
mod types;

pub use executor::{Arena, COMPONENT_SHAPE, EMPTY_RECOMMENDATION_PROMPT};
pub use fsm::{PipelineContext, PipelineEvent, PipelineState, PipelineStateMachine};
pub use types::{GenerationParams, GenerationRequest, PipelineOutcome, RequestKind};
