use crate::angle::AngleMode;
use crate::error::Error;
use crate::expr::Evaluator;
use crate::format::format;

/// A calculator session: the evaluator with its `ans` slot, the current
/// angle mode and a memory register.
///
/// Every input goes through the same pipeline: rewrite for the angle mode,
/// evaluate (updating `ans` on success), and optionally format.
///
/// # Examples
/// ```
/// # use sciculator::{AngleMode, Calculator};
/// let mut calculator = Calculator::new();
/// assert_eq!(calculator.angle_mode(), AngleMode::Degrees);
/// assert_eq!(calculator.calculate_formatted("sin(30) * 4"), Ok("2".to_string()));
/// assert_eq!(calculator.calculate_formatted("ans + 1"), Ok("3".to_string()));
///
/// calculator.toggle_angle_mode();
/// assert_eq!(calculator.calculate("cos(0)"), Ok(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    evaluator: Evaluator,
    angle_mode: AngleMode,
    memory: f64,
}

impl Calculator {
    /// Create a session in the default angle mode
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session in the given angle mode
    #[must_use]
    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        Self {
            angle_mode,
            ..Self::default()
        }
    }

    /// Evaluate `input` in the current angle mode
    pub fn calculate(&mut self, input: &str) -> Result<f64, Error> {
        let expression = self.angle_mode.rewrite(input);
        self.evaluator.evaluate(&expression)
    }

    /// Evaluate `input` and format the result for display
    pub fn calculate_formatted(&mut self, input: &str) -> Result<String, Error> {
        self.calculate(input).map(format)
    }

    /// Current angle mode
    #[must_use]
    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Set the angle mode for the following calculations
    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.angle_mode = angle_mode;
    }

    /// Switch between degrees and radians, returning the new mode
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.angle_mode = self.angle_mode.toggle();
        tracing::debug!(mode = %self.angle_mode, "angle mode changed");
        self.angle_mode
    }

    /// Result of the last successful calculation
    #[must_use]
    pub fn last_answer(&self) -> f64 {
        self.evaluator.last_answer()
    }

    /// Evaluate `input` and add the result to the memory
    pub fn memory_add(&mut self, input: &str) -> Result<f64, Error> {
        let value = self.calculate(input)?;
        self.memory += value;
        Ok(self.memory)
    }

    /// Evaluate `input` and subtract the result from the memory
    pub fn memory_sub(&mut self, input: &str) -> Result<f64, Error> {
        let value = self.calculate(input)?;
        self.memory -= value;
        Ok(self.memory)
    }

    /// Reset the memory to zero
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    /// Value stored in the memory
    #[must_use]
    pub fn memory_recall(&self) -> f64 {
        self.memory
    }

    /// The memory indicator, `M=<value>`, if the memory is not empty
    #[must_use]
    pub fn memory_display(&self) -> Option<String> {
        if self.memory == 0.0 {
            None
        } else {
            Some(format!("M={}", format(self.memory)))
        }
    }
}
