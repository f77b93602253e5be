//! Derives the start form's fields from shared swarm state.
//!
//! Three sources compete for each value: what the user types, shape-class
//! control, and what the backend last reported. Resolution runs once per
//! form build and never talks to the backend.

use tracing::debug;

use super::swarm::{ExtraOption, ExtraOptionValue, SwarmConfiguration};

/// Value shown in numeric fields that a shape class controls.
pub const SHAPE_PLACEHOLDER: &str = "-";

/// Field name for peak user count.
pub const USER_COUNT: &str = "userCount";
/// Field name for the ramp-up rate.
pub const SPAWN_RATE: &str = "spawnRate";
/// Field name for the target host.
pub const HOST: &str = "host";
/// Field name for the run duration.
pub const RUN_TIME: &str = "runTime";
/// Field name for the selected user classes.
pub const USER_CLASSES: &str = "userClasses";
/// Field name for the selected shape class.
pub const SHAPE_CLASS: &str = "shapeClass";

const HOST_OVERRIDE_WARNING: &str = "(setting this will override the host for the User classes)";

/// The editable input behind a field, with its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    /// Free text.
    Text(String),
    /// Free text that is masked when displayed.
    Secret(String),
    /// On/off toggle.
    Checkbox(bool),
    /// Exactly one of `options`, or nothing when `options` is empty.
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Any subset of `options`; `selected[i]` tracks `options[i]`.
    MultiSelect {
        options: Vec<String>,
        selected: Vec<bool>,
    },
}

impl FieldInput {
    /// Builds a single select with the first option chosen.
    pub fn select(options: Vec<String>) -> Self {
        let selected = (!options.is_empty()).then_some(0);
        Self::Select { options, selected }
    }

    /// Builds a multi select with every option chosen.
    pub fn multi_select(options: Vec<String>) -> Self {
        let selected = vec![true; options.len()];
        Self::MultiSelect { options, selected }
    }

    /// Returns the text value of a text-like input.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Secret(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` when the input carries no value.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) | Self::Secret(s) => s.is_empty(),
            Self::Checkbox(_) => false,
            Self::Select { selected, .. } => selected.is_none(),
            Self::MultiSelect { selected, .. } => !selected.iter().any(|s| *s),
        }
    }
}

/// A single form field ready for rendering and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    /// Submission key.
    pub name: String,
    /// Display label.
    pub label: String,
    /// Optional hint shown alongside the field.
    pub help: Option<String>,
    /// Disabled fields are shown but cannot be edited.
    pub disabled: bool,
    /// Whether the field must carry a value on submit.
    pub required: bool,
    pub input: FieldInput,
}

impl ResolvedField {
    fn new(name: &str, label: impl Into<String>, input: FieldInput) -> Self {
        Self {
            name: name.to_string(),
            label: label.into(),
            help: None,
            disabled: false,
            required: false,
            input,
        }
    }
}

/// User and shape class selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPickers {
    pub user_classes: ResolvedField,
    pub shape_class: ResolvedField,
}

/// View-model for the start form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwarmFormModel {
    /// Present only when the backend allows class picking.
    pub class_pickers: Option<ClassPickers>,
    pub user_count: ResolvedField,
    pub spawn_rate: ResolvedField,
    pub host: ResolvedField,
    pub run_time: ResolvedField,
    /// One field per declared extra option, in key order.
    pub custom_parameters: Vec<ResolvedField>,
}

impl SwarmFormModel {
    /// Returns `true` if the custom parameters section should be shown.
    pub fn has_custom_parameters(&self) -> bool {
        !self.custom_parameters.is_empty()
    }

    /// Consumes the model, returning every field in display order.
    pub fn into_fields(self) -> Vec<ResolvedField> {
        let mut fields = Vec::with_capacity(6 + self.custom_parameters.len());
        if let Some(pickers) = self.class_pickers {
            fields.push(pickers.user_classes);
            fields.push(pickers.shape_class);
        }
        fields.push(self.user_count);
        fields.push(self.spawn_rate);
        fields.push(self.host);
        fields.push(self.run_time);
        fields.extend(self.custom_parameters);
        fields
    }
}

/// Resolves every field of the start form from `swarm`.
pub fn resolve_form(swarm: &SwarmConfiguration) -> SwarmFormModel {
    debug!(
        is_shape = swarm.is_shape,
        picker = swarm.show_userclass_picker,
        extra_options = swarm.extra_options.len(),
        "resolving start form"
    );

    let class_pickers = swarm.show_userclass_picker.then(|| ClassPickers {
        user_classes: ResolvedField::new(
            USER_CLASSES,
            "User Classes",
            FieldInput::multi_select(swarm.available_user_classes.clone()),
        ),
        shape_class: ResolvedField::new(
            SHAPE_CLASS,
            "Shape Class",
            FieldInput::select(swarm.available_shape_classes.clone()),
        ),
    });

    let user_count = shape_controlled(
        USER_COUNT,
        "Number of users (peak concurrency)",
        swarm.is_shape,
        match swarm.user_count {
            Some(n) if n > 0 => n.to_string(),
            _ => "1".to_string(),
        },
    );
    let spawn_rate = shape_controlled(
        SPAWN_RATE,
        "Ramp Up (users started/second)",
        swarm.is_shape,
        rate_default(swarm.spawn_rate),
    );

    SwarmFormModel {
        class_pickers,
        user_count,
        spawn_rate,
        host: ResolvedField::new(
            HOST,
            host_label(swarm.override_host_warning),
            FieldInput::Text(swarm.host.clone()),
        ),
        run_time: ResolvedField::new(
            RUN_TIME,
            "Run time (e.g. 20, 20s, 3m, 2h, 1h20m, 3h30m10s, etc.)",
            FieldInput::Text(swarm.run_time.clone().unwrap_or_default()),
        ),
        custom_parameters: swarm
            .extra_options
            .iter()
            .map(|(name, option)| custom_parameter(name, option))
            .collect(),
    }
}

/// Builds a numeric field that a shape class disables.
fn shape_controlled(name: &str, label: &str, is_shape: bool, value: String) -> ResolvedField {
    let mut field = ResolvedField::new(name, label, FieldInput::Text(value));
    if is_shape {
        field.input = FieldInput::Text(SHAPE_PLACEHOLDER.to_string());
        field.disabled = true;
        field.help = Some("Disabled for tests using LoadTestShape class".to_string());
    }
    field
}

/// Stored spawn rate as text, `1` when unset or zero.
///
/// Whole rates print without a fractional part.
fn rate_default(stored: Option<f64>) -> String {
    match stored {
        Some(n) if n > 0.0 && n.is_finite() => n.to_string(),
        _ => "1".to_string(),
    }
}

fn host_label(override_host_warning: bool) -> String {
    if override_host_warning {
        format!("Host {HOST_OVERRIDE_WARNING}")
    } else {
        "Host".to_string()
    }
}

fn custom_parameter(name: &str, option: &ExtraOption) -> ResolvedField {
    let default = option
        .default_value
        .as_ref()
        .map(ExtraOptionValue::to_form_text)
        .unwrap_or_default();

    let input = match (&option.choices, &option.default_value) {
        (Some(choices), _) if !choices.is_empty() => {
            let selected = choices
                .iter()
                .position(|c| *c == default)
                .or(Some(0));
            FieldInput::Select {
                options: choices.clone(),
                selected,
            }
        }
        (_, Some(ExtraOptionValue::Bool(b))) => FieldInput::Checkbox(*b),
        _ if option.is_secret => FieldInput::Secret(default),
        _ => FieldInput::Text(default),
    };

    ResolvedField {
        name: name.to_string(),
        label: name.to_string(),
        help: option.help_text.clone(),
        disabled: false,
        required: option.is_required,
        input,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use quickcheck_macros::quickcheck;

    use super::*;

    fn base_swarm() -> SwarmConfiguration {
        SwarmConfiguration {
            host: "https://example.com".into(),
            user_count: Some(5),
            spawn_rate: Some(2.0),
            run_time: Some("5m".into()),
            available_user_classes: vec!["UserA".into(), "UserB".into()],
            available_shape_classes: vec!["ShapeX".into(), "ShapeY".into()],
            ..SwarmConfiguration::default()
        }
    }

    fn option(default: Option<ExtraOptionValue>) -> ExtraOption {
        ExtraOption {
            default_value: default,
            ..ExtraOption::default()
        }
    }

    mod numeric_fields {
        use super::*;

        #[test]
        fn uses_stored_values() {
            let model = resolve_form(&base_swarm());
            assert_eq!(model.user_count.input, FieldInput::Text("5".into()));
            assert_eq!(model.spawn_rate.input, FieldInput::Text("2".into()));
            assert!(!model.user_count.disabled);
            assert!(!model.spawn_rate.disabled);
        }

        #[test]
        fn zero_defaults_to_one() {
            let swarm = SwarmConfiguration {
                user_count: Some(0),
                spawn_rate: Some(0.0),
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert_eq!(model.user_count.input, FieldInput::Text("1".into()));
            assert_eq!(model.spawn_rate.input, FieldInput::Text("1".into()));
        }

        #[test]
        fn unset_defaults_to_one() {
            let swarm = SwarmConfiguration {
                user_count: None,
                spawn_rate: None,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert_eq!(model.user_count.input, FieldInput::Text("1".into()));
            assert_eq!(model.spawn_rate.input, FieldInput::Text("1".into()));
        }

        #[test]
        fn fractional_spawn_rate_is_kept() {
            let swarm = SwarmConfiguration {
                spawn_rate: Some(0.5),
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert_eq!(model.spawn_rate.input, FieldInput::Text("0.5".into()));
        }

        #[test]
        fn shape_mode_disables_with_placeholder() {
            let swarm = SwarmConfiguration {
                is_shape: true,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            for field in [&model.user_count, &model.spawn_rate] {
                assert!(field.disabled, "{} should be disabled", field.name);
                assert_eq!(field.input, FieldInput::Text(SHAPE_PLACEHOLDER.into()));
            }
        }

        #[quickcheck]
        fn shape_mode_ignores_stored_values(users: Option<u64>, rate: Option<u32>) -> bool {
            let swarm = SwarmConfiguration {
                is_shape: true,
                user_count: users,
                spawn_rate: rate.map(f64::from),
                ..SwarmConfiguration::default()
            };
            let model = resolve_form(&swarm);
            model.user_count.disabled
                && model.spawn_rate.disabled
                && model.user_count.input.text() == Some(SHAPE_PLACEHOLDER)
                && model.spawn_rate.input.text() == Some(SHAPE_PLACEHOLDER)
        }

        #[quickcheck]
        fn never_defaults_to_zero(users: Option<u64>) -> bool {
            let swarm = SwarmConfiguration {
                user_count: users,
                ..SwarmConfiguration::default()
            };
            let model = resolve_form(&swarm);
            model.user_count.input.text() != Some("0")
        }
    }

    mod host_and_run_time {
        use super::*;

        #[test]
        fn host_uses_stored_value() {
            let model = resolve_form(&base_swarm());
            assert_eq!(model.host.name, HOST);
            assert_eq!(
                model.host.input,
                FieldInput::Text("https://example.com".into())
            );
            assert_eq!(model.host.label, "Host");
        }

        #[test]
        fn host_never_disabled_in_shape_mode() {
            let swarm = SwarmConfiguration {
                is_shape: true,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert!(!model.host.disabled);
            assert_eq!(
                model.host.input,
                FieldInput::Text("https://example.com".into())
            );
        }

        #[test]
        fn host_label_warns_about_override() {
            let swarm = SwarmConfiguration {
                override_host_warning: true,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert!(model.host.label.starts_with("Host "));
            assert!(model.host.label.contains("override the host"));
        }

        #[test]
        fn run_time_is_free_text() {
            let swarm = SwarmConfiguration {
                run_time: Some("1h20m".into()),
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert_eq!(model.run_time.input, FieldInput::Text("1h20m".into()));
            assert!(!model.run_time.disabled);
        }

        #[test]
        fn run_time_unset_is_empty() {
            let swarm = SwarmConfiguration {
                run_time: None,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert_eq!(model.run_time.input, FieldInput::Text(String::new()));
        }
    }

    mod class_pickers {
        use super::*;

        #[test]
        fn hidden_when_picker_disabled() {
            let model = resolve_form(&base_swarm());
            assert!(model.class_pickers.is_none());
        }

        #[test]
        fn shown_when_picker_enabled() {
            let swarm = SwarmConfiguration {
                show_userclass_picker: true,
                ..base_swarm()
            };
            let pickers = resolve_form(&swarm).class_pickers.unwrap();
            assert_eq!(pickers.user_classes.name, USER_CLASSES);
            assert_eq!(
                pickers.user_classes.input,
                FieldInput::MultiSelect {
                    options: vec!["UserA".into(), "UserB".into()],
                    selected: vec![true, true],
                }
            );
            assert_eq!(pickers.shape_class.name, SHAPE_CLASS);
            assert_eq!(
                pickers.shape_class.input,
                FieldInput::Select {
                    options: vec!["ShapeX".into(), "ShapeY".into()],
                    selected: Some(0),
                }
            );
        }

        #[test]
        fn empty_shape_list_selects_nothing() {
            let swarm = SwarmConfiguration {
                show_userclass_picker: true,
                available_shape_classes: vec![],
                ..base_swarm()
            };
            let pickers = resolve_form(&swarm).class_pickers.unwrap();
            assert!(pickers.shape_class.input.is_empty());
        }

        #[test]
        fn pickers_lead_field_order() {
            let swarm = SwarmConfiguration {
                show_userclass_picker: true,
                ..base_swarm()
            };
            let names: Vec<String> = resolve_form(&swarm)
                .into_fields()
                .into_iter()
                .map(|f| f.name)
                .collect();
            assert_eq!(
                names,
                vec![USER_CLASSES, SHAPE_CLASS, USER_COUNT, SPAWN_RATE, HOST, RUN_TIME]
            );
        }
    }

    mod custom_parameters {
        use super::*;

        #[test]
        fn empty_schema_has_no_section() {
            let model = resolve_form(&base_swarm());
            assert!(!model.has_custom_parameters());
            assert!(model.custom_parameters.is_empty());
        }

        #[test]
        fn one_field_per_option() {
            let mut extra_options = BTreeMap::new();
            extra_options.insert(
                "my_arg".to_string(),
                option(Some(ExtraOptionValue::Text("hello".into()))),
            );
            extra_options.insert("empty".to_string(), option(None));
            let swarm = SwarmConfiguration {
                extra_options,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            assert!(model.has_custom_parameters());
            let names: Vec<&str> = model
                .custom_parameters
                .iter()
                .map(|f| f.name.as_str())
                .collect();
            assert_eq!(names, vec!["empty", "my_arg"]);
            assert_eq!(
                model.custom_parameters[1].input,
                FieldInput::Text("hello".into())
            );
            assert_eq!(model.custom_parameters[0].input, FieldInput::Text(String::new()));
        }

        #[test]
        fn input_kind_follows_option_metadata() {
            let mut extra_options = BTreeMap::new();
            extra_options.insert(
                "flag".to_string(),
                option(Some(ExtraOptionValue::Bool(true))),
            );
            extra_options.insert(
                "token".to_string(),
                ExtraOption {
                    default_value: Some(ExtraOptionValue::Text("s3cret".into())),
                    is_secret: true,
                    ..ExtraOption::default()
                },
            );
            extra_options.insert(
                "region".to_string(),
                ExtraOption {
                    default_value: Some(ExtraOptionValue::Text("eu".into())),
                    choices: Some(vec!["us".into(), "eu".into()]),
                    help_text: Some("where to run".into()),
                    is_required: true,
                    ..ExtraOption::default()
                },
            );
            let swarm = SwarmConfiguration {
                extra_options,
                ..base_swarm()
            };
            let model = resolve_form(&swarm);
            let by_name = |name: &str| {
                model
                    .custom_parameters
                    .iter()
                    .find(|f| f.name == name)
                    .unwrap()
                    .clone()
            };
            assert_eq!(by_name("flag").input, FieldInput::Checkbox(true));
            assert_eq!(by_name("token").input, FieldInput::Secret("s3cret".into()));
            let region = by_name("region");
            assert_eq!(
                region.input,
                FieldInput::Select {
                    options: vec!["us".into(), "eu".into()],
                    selected: Some(1),
                }
            );
            assert_eq!(region.help.as_deref(), Some("where to run"));
            assert!(region.required);
        }
    }

    #[test]
    fn resolving_twice_is_identical() {
        let mut swarm = base_swarm();
        swarm.show_userclass_picker = true;
        swarm
            .extra_options
            .insert("arg".into(), option(Some(ExtraOptionValue::Text("v".into()))));
        assert_eq!(resolve_form(&swarm), resolve_form(&swarm));
    }

    #[quickcheck]
    fn resolve_is_idempotent(users: Option<u64>, is_shape: bool, picker: bool) -> bool {
        let swarm = SwarmConfiguration {
            user_count: users,
            is_shape,
            show_userclass_picker: picker,
            ..base_swarm()
        };
        resolve_form(&swarm) == resolve_form(&swarm)
    }
}
