//! The three-step "new project" wizard.
//!
//! Which fields are required, and how long they must be, is declared once in
//! [`FORM_SCHEMA`]. Each step validates only its own fields before moving on,
//! and the whole schema is checked again when the final step submits.

use thiserror::Error;

use crate::models::CreateProjectInput;

/// Bad user input. The message is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Por favor ingresa un nombre de proyecto válido")]
    InvalidName,

    #[error("Por favor describe tus preocupaciones principales")]
    InvalidConcerns,

    #[error("Por favor completa todos los campos")]
    MissingField(FormField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Basics,
    Objectives,
    Engagement,
}

impl WizardStep {
    /// 1-based position shown in the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            Self::Basics => 1,
            Self::Objectives => 2,
            Self::Engagement => 3,
        }
    }

    fn next(&self) -> Option<Self> {
        match self {
            Self::Basics => Some(Self::Objectives),
            Self::Objectives => Some(Self::Engagement),
            Self::Engagement => None,
        }
    }
}

/// A text field of the new-project form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Industry,
    ModelType,
    Phase,
    Region,
    MainConcerns,
    MainOpportunities,
    Duration,
    Deliverable,
    Budget,
}

impl FormField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Industry => "industry",
            Self::ModelType => "modelType",
            Self::Phase => "phase",
            Self::Region => "region",
            Self::MainConcerns => "mainConcerns",
            Self::MainOpportunities => "mainOpportunities",
            Self::Duration => "duration",
            Self::Deliverable => "deliverable",
            Self::Budget => "budget",
        }
    }

    pub fn value<'a>(&self, input: &'a CreateProjectInput) -> &'a str {
        match self {
            Self::Name => &input.name,
            Self::Industry => &input.industry,
            Self::ModelType => &input.model_type,
            Self::Phase => &input.phase,
            Self::Region => &input.region,
            Self::MainConcerns => &input.main_concerns,
            Self::MainOpportunities => &input.main_opportunities,
            Self::Duration => &input.duration,
            Self::Deliverable => &input.deliverable,
            Self::Budget => &input.budget,
        }
    }

    fn error(&self) -> ValidationError {
        match self {
            Self::Name => ValidationError::InvalidName,
            Self::MainConcerns => ValidationError::InvalidConcerns,
            other => ValidationError::MissingField(*other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Optional,
    Required,
    /// Required, with at least this many characters after trimming.
    MinLength(usize),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: FormField,
    pub step: WizardStep,
    pub rule: Rule,
}

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_CONCERNS_LEN: usize = 10;

const fn spec(field: FormField, step: WizardStep, rule: Rule) -> FieldSpec {
    FieldSpec { field, step, rule }
}

pub const FORM_SCHEMA: &[FieldSpec] = &[
    spec(FormField::Name, WizardStep::Basics, Rule::MinLength(MIN_NAME_LEN)),
    spec(FormField::Industry, WizardStep::Basics, Rule::Optional),
    spec(FormField::ModelType, WizardStep::Basics, Rule::Optional),
    spec(FormField::Phase, WizardStep::Basics, Rule::Optional),
    spec(FormField::Region, WizardStep::Basics, Rule::Optional),
    spec(FormField::MainConcerns, WizardStep::Objectives, Rule::MinLength(MIN_CONCERNS_LEN)),
    spec(FormField::MainOpportunities, WizardStep::Objectives, Rule::Optional),
    spec(FormField::Duration, WizardStep::Engagement, Rule::Required),
    spec(FormField::Deliverable, WizardStep::Engagement, Rule::Required),
    spec(FormField::Budget, WizardStep::Engagement, Rule::Optional),
];

fn check(spec: &FieldSpec, input: &CreateProjectInput) -> Result<(), ValidationError> {
    let value = spec.field.value(input).trim();
    let ok = match spec.rule {
        Rule::Optional => true,
        Rule::Required => !value.is_empty(),
        Rule::MinLength(min) => value.chars().count() >= min,
    };
    if ok {
        Ok(())
    } else {
        tracing::debug!("Field {} failed {:?}", spec.field.key(), spec.rule);
        Err(spec.field.error())
    }
}

/// Check a project name on its own.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() >= MIN_NAME_LEN {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}

/// Check the fields belonging to one step, reporting the first failure.
pub fn validate_step(step: WizardStep, input: &CreateProjectInput) -> Result<(), ValidationError> {
    FORM_SCHEMA
        .iter()
        .filter(|spec| spec.step == step)
        .try_for_each(|spec| check(spec, input))
}

/// Check every field in the schema.
pub fn validate_all(input: &CreateProjectInput) -> Result<(), ValidationError> {
    FORM_SCHEMA.iter().try_for_each(|spec| check(spec, input))
}

/// Result of pressing "next" on the wizard.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved on to the given step.
    Next(WizardStep),
    /// The last step passed; the collected input is ready to create.
    Submit(CreateProjectInput),
}

/// Linear wizard state: the current step plus the fields filled in so far.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    draft: CreateProjectInput,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Basics,
            draft: CreateProjectInput::default(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &CreateProjectInput {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CreateProjectInput {
        &mut self.draft
    }

    /// Validate the current step and move forward.
    ///
    /// On failure the wizard stays where it is. Submitting hands over the
    /// draft and resets the wizard to the first step.
    pub fn advance(&mut self) -> Result<Advance, ValidationError> {
        validate_step(self.step, &self.draft)?;

        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Next(next))
            }
            None => {
                validate_all(&self.draft)?;
                let input = std::mem::take(&mut self.draft);
                self.step = WizardStep::Basics;
                Ok(Advance::Submit(input))
            }
        }
    }

    /// Discard the draft and return to the first step.
    pub fn reset(&mut self) {
        self.step = WizardStep::Basics;
        self.draft = CreateProjectInput::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CreateProjectInput {
        CreateProjectInput {
            name: "Acme Corp".to_string(),
            main_concerns: "Necesitamos validar el mercado".to_string(),
            duration: "2-3-weeks".to_string(),
            deliverable: "discovery-only".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("ab"), Err(ValidationError::InvalidName));
        assert_eq!(validate_name("   "), Err(ValidationError::InvalidName));
        assert_eq!(validate_name("  ab  "), Err(ValidationError::InvalidName));
        assert!(validate_name("abc").is_ok());
        assert!(validate_name("Ñuñ").is_ok());
    }

    #[test]
    fn test_walks_all_steps_and_submits() {
        let mut wizard = Wizard::new();
        *wizard.draft_mut() = filled();

        assert_eq!(wizard.advance(), Ok(Advance::Next(WizardStep::Objectives)));
        assert_eq!(wizard.advance(), Ok(Advance::Next(WizardStep::Engagement)));
        assert_eq!(wizard.advance(), Ok(Advance::Submit(filled())));
        assert_eq!(wizard.step(), WizardStep::Basics);
        assert_eq!(wizard.draft(), &CreateProjectInput::default());
    }

    #[test]
    fn test_short_name_blocks_first_step() {
        let mut wizard = Wizard::new();
        wizard.draft_mut().name = "ab".to_string();

        assert_eq!(wizard.advance(), Err(ValidationError::InvalidName));
        assert_eq!(wizard.step(), WizardStep::Basics);
    }

    #[test]
    fn test_short_concerns_block_second_step() {
        let mut wizard = Wizard::new();
        wizard.draft_mut().name = "Acme Corp".to_string();
        wizard.draft_mut().main_concerns = "poco".to_string();

        wizard.advance().unwrap();
        assert_eq!(wizard.advance(), Err(ValidationError::InvalidConcerns));
        assert_eq!(wizard.step(), WizardStep::Objectives);
    }

    #[test]
    fn test_missing_deliverable_blocks_submit() {
        let mut wizard = Wizard::new();
        *wizard.draft_mut() = CreateProjectInput {
            deliverable: String::new(),
            ..filled()
        };

        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(
            wizard.advance(),
            Err(ValidationError::MissingField(FormField::Deliverable))
        );
        assert_eq!(wizard.step(), WizardStep::Engagement);
    }

    #[test]
    fn test_reset_returns_to_first_step() {
        let mut wizard = Wizard::new();
        *wizard.draft_mut() = filled();
        wizard.advance().unwrap();

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::Basics);
        assert!(wizard.draft().name.is_empty());
    }

    #[test]
    fn test_validate_all_reports_first_failure() {
        let input = CreateProjectInput {
            name: "Acme".to_string(),
            ..Default::default()
        };
        assert_eq!(validate_all(&input), Err(ValidationError::InvalidConcerns));
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(
            ValidationError::InvalidName.to_string(),
            "Por favor ingresa un nombre de proyecto válido"
        );
        assert_eq!(
            ValidationError::MissingField(FormField::Duration).to_string(),
            "Por favor completa todos los campos"
        );
    }
}
