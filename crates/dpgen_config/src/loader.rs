//! Parsing and validation of generator configurations.

use crate::error::ConfigError;
use crate::types::GeneratorConfig;

const MAX_PORTS: u32 = 1000;

/// Widest port or register a configuration may ask for.
pub const MAX_WIDTH: u32 = 1 << 16;

/// Parses a TOML document into a validated [`GeneratorConfig`].
///
/// Missing keys take their defaults.
pub fn load_config_from_str(content: &str) -> Result<GeneratorConfig, ConfigError> {
    let config: GeneratorConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

impl GeneratorConfig {
    /// Rejects configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.module_name.is_empty() || !is_identifier(&self.module_name) {
            return Err(ConfigError::ValidationError(format!(
                "module name '{}' is not a legal identifier",
                self.module_name
            )));
        }
        check_count("num_inputs", self.num_inputs, 1, MAX_PORTS)?;
        check_count("num_outputs", self.num_outputs, 1, MAX_PORTS)?;
        check_width_range("input width", self.input_width_min, self.input_width_max)?;
        check_width_range("output width", self.output_width_min, self.output_width_max)?;
        check_count("num_operations", self.num_operations, 1, u32::MAX)?;
        check_count("max_depth", self.max_depth, 1, u32::MAX)?;
        check_count("cases_per_statement", self.cases_per_statement, 1, u32::MAX)?;
        self.validate_weights()
    }

    fn validate_weights(&self) -> Result<(), ConfigError> {
        let w = &self.weights;
        let named = [
            ("category.arithmetic", w.category.arithmetic),
            ("category.logical", w.category.logical),
            ("category.comparison", w.category.comparison),
            ("category.shift", w.category.shift),
            ("category.mux", w.category.mux),
            ("category.concat", w.category.concat),
            ("category.reduction", w.category.reduction),
            ("arithmetic.add", w.arithmetic.add),
            ("arithmetic.sub", w.arithmetic.sub),
            ("arithmetic.mult", w.arithmetic.mult),
            ("arithmetic.div", w.arithmetic.div),
            ("arithmetic.mod", w.arithmetic.modulo),
            ("shift.sll", w.shift.sll),
            ("shift.srl", w.shift.srl),
            ("shift.sra", w.shift.sra),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeWeight(name.to_string()));
            }
        }

        if w.category.as_array().iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::NonPositiveCategoryWeight);
        }
        // Case items draw arithmetic operators whenever sharing is enabled,
        // even with a zero arithmetic category weight.
        let arithmetic_drawn = w.category.arithmetic > 0.0
            || (self.generate_sharing_opportunities && self.case_statement_count() > 0);
        if arithmetic_drawn && w.arithmetic.as_array().iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::EmptyOperatorWeights("arithmetic".to_string()));
        }
        if w.category.shift > 0.0 && w.shift.as_array().iter().sum::<f64>() <= 0.0 {
            return Err(ConfigError::EmptyOperatorWeights("shift".to_string()));
        }
        Ok(())
    }
}

fn check_count(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::CountOutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_width_range(field: &'static str, min: u32, max: u32) -> Result<(), ConfigError> {
    if min < 1 || min > max || max > MAX_WIDTH {
        return Err(ConfigError::InvalidWidthRange { field, min, max });
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
