//! Field validation for the add and edit forms.
//!
//! The store accepts any integer; these checks run before a form is
//! submitted and are what keeps ages in [14, 50] and shirt numbers in
//! [0, 99].

use footify_types::{
    errors::ValidationError,
    player::{NewPlayer, Player},
    position::Position,
};

pub const MIN_AGE: i32 = 14;
pub const MAX_AGE: i32 = 50;
pub const MIN_SHIRT_NUMBER: i32 = 0;
pub const MAX_SHIRT_NUMBER: i32 = 99;

/// Result of checking a numeric text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    /// Nothing typed yet. Shows no error but can't be submitted either.
    Empty,
    Valid(i32),
    Invalid(ValidationError),
}

impl FieldCheck {
    pub fn value(&self) -> Option<i32> {
        match self {
            FieldCheck::Valid(n) => Some(*n),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ValidationError> {
        match self {
            FieldCheck::Invalid(e) => Some(*e),
            _ => None,
        }
    }

    /// Inline message for the field, if any.
    pub fn message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }
}

struct Bounds {
    min: i32,
    max: i32,
    too_low: ValidationError,
    too_high: ValidationError,
}

const AGE_BOUNDS: Bounds = Bounds {
    min: MIN_AGE,
    max: MAX_AGE,
    too_low: ValidationError::AgeTooLow,
    too_high: ValidationError::AgeTooHigh,
};

const SHIRT_NUMBER_BOUNDS: Bounds = Bounds {
    min: MIN_SHIRT_NUMBER,
    max: MAX_SHIRT_NUMBER,
    too_low: ValidationError::ShirtNumberTooLow,
    too_high: ValidationError::ShirtNumberTooHigh,
};

fn check_number(input: &str, bounds: &Bounds) -> FieldCheck {
    if input.is_empty() {
        return FieldCheck::Empty;
    }

    match input.parse::<i32>() {
        Err(_) => FieldCheck::Invalid(ValidationError::NotANumber),
        Ok(n) if n < bounds.min => FieldCheck::Invalid(bounds.too_low),
        Ok(n) if n > bounds.max => FieldCheck::Invalid(bounds.too_high),
        Ok(n) => FieldCheck::Valid(n),
    }
}

pub fn validate_age(input: &str) -> FieldCheck {
    check_number(input, &AGE_BOUNDS)
}

pub fn validate_shirt_number(input: &str) -> FieldCheck {
    check_number(input, &SHIRT_NUMBER_BOUNDS)
}

/// Returns the trimmed name, or an error when nothing is left.
pub fn validate_name(input: &str) -> Result<&str, ValidationError> {
    match input.trim() {
        "" => Err(ValidationError::NameRequired),
        name => Ok(name),
    }
}

fn required(check: FieldCheck, field: &'static str) -> Result<i32, ValidationError> {
    match check {
        FieldCheck::Valid(n) => Ok(n),
        FieldCheck::Invalid(e) => Err(e),
        FieldCheck::Empty => Err(ValidationError::MissingField(field)),
    }
}

/// Raw input of the "add player" dialog.
#[derive(Debug, Clone, Default)]
pub struct AddPlayerForm {
    pub name: String,
    pub age: String,
    pub shirt_number: String,
    pub position: Position,
}

impl AddPlayerForm {
    pub fn age_check(&self) -> FieldCheck {
        validate_age(&self.age)
    }

    pub fn shirt_number_check(&self) -> FieldCheck {
        validate_shirt_number(&self.shirt_number)
    }

    /// Whether the submit button should be enabled.
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<NewPlayer, ValidationError> {
        let name = validate_name(&self.name)?;
        let age = required(self.age_check(), "Age")?;
        let shirt_number = required(self.shirt_number_check(), "Shirt number")?;

        Ok(NewPlayer {
            name: name.to_string(),
            age,
            shirt_number,
            position: self.position,
        })
    }
}

/// Raw input of the "edit player" dialog, prefilled from the player.
#[derive(Debug, Clone)]
pub struct EditPlayerForm {
    pub name: String,
    pub shirt_number: String,
    pub position: Position,
}

impl EditPlayerForm {
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            shirt_number: player.shirt_number.to_string(),
            position: player.position,
        }
    }

    pub fn shirt_number_check(&self) -> FieldCheck {
        validate_shirt_number(&self.shirt_number)
    }

    pub fn can_submit(&self) -> bool {
        self.shirt_number_check().error().is_none()
    }

    /// Returns a copy of `player` with the form's values applied.
    ///
    /// An emptied shirt number field keeps the stored number, and so does
    /// a blank name.
    pub fn apply(&self, player: &Player) -> Result<Player, ValidationError> {
        let shirt_number = match self.shirt_number_check() {
            FieldCheck::Valid(n) => n,
            FieldCheck::Empty => player.shirt_number,
            FieldCheck::Invalid(e) => return Err(e),
        };
        let name = validate_name(&self.name).unwrap_or(player.name.as_str());

        Ok(Player {
            name: name.to_string(),
            shirt_number,
            position: self.position,
            ..player.clone()
        })
    }
}
