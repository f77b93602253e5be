mod payload;
mod resolver;
mod swarm;

pub use payload::{PayloadValue, SubmissionPayload};
pub use resolver::{
    ClassPickers, FieldInput, HOST, RUN_TIME, ResolvedField, SHAPE_CLASS, SHAPE_PLACEHOLDER,
    SPAWN_RATE, SwarmFormModel, USER_CLASSES, USER_COUNT, resolve_form,
};
pub use swarm::{ExtraOption, ExtraOptionValue, SwarmConfiguration, SwarmState};
