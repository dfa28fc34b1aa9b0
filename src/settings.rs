//! Configuration of the directive builder

use crate::error::{SettingsError, SettingsResult};


/// How constructs get turned into graph directives.
///
/// Deserializable from any serde format, missing fields taking their default value.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The graphing engine's independent variable, substituted into parent curves
    pub primary_variable   : String,
    /// Integration variable of the running antiderivative of an indefinite integral
    pub dummy_variable     : String,
    /// Lower limit of the running antiderivative
    pub accumulator_origin : String,
    /// Base name of the helper function a derivative is defined through, e.g. `f` for `f_{3}(x)`
    pub function_name      : String,
    /// Whether plain expressions depending on the primary variable get a `y = ` prefix
    pub implicit_y         : bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_variable   : String::from("x"),
            dummy_variable     : String::from("t"),
            accumulator_origin : String::from("0"),
            function_name      : String::from("f"),
            implicit_y         : true,
        }
    }
}

impl Settings {
    /// Creates the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the independent variable.
    pub fn with_primary_variable(mut self, variable : &str) -> Self {
        self.primary_variable = variable.to_string();
        self
    }

    /// Sets the integration variable of running antiderivatives.
    pub fn with_dummy_variable(mut self, variable : &str) -> Self {
        self.dummy_variable = variable.to_string();
        self
    }

    /// Sets the lower limit of running antiderivatives.
    pub fn with_accumulator_origin(mut self, origin : &str) -> Self {
        self.accumulator_origin = origin.to_string();
        self
    }

    /// Sets the base name of derivative helper functions.
    pub fn with_function_name(mut self, name : &str) -> Self {
        self.function_name = name.to_string();
        self
    }

    /// Turns the `y = ` prefix of plain expressions on or off.
    pub fn with_implicit_y(mut self, implicit_y : bool) -> Self {
        self.implicit_y = implicit_y;
        self
    }

    /// Checks the primary variable is a single letter, distinct from the dummy variable.
    pub fn validate(&self) -> SettingsResult<()> {
        let mut chars = self.primary_variable.chars();
        match (chars.next(), chars.next()) {
            (None, _) =>
                return Err(SettingsError::EmptyPrimaryVariable),
            (Some(letter), None) if letter.is_ascii_alphabetic() => (),
            _ =>
                return Err(SettingsError::InvalidPrimaryVariable(self.primary_variable.as_str().into())),
        }

        if self.dummy_variable == self.primary_variable {
            return Err(SettingsError::DummyVariableClash(self.dummy_variable.as_str().into()));
        }
        Ok(())
    }
}
