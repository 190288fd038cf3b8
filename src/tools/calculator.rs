//! Floating point calculation tool.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{require_arg, ParamSpec, Tool, ToolError};

/// Perform a floating point calculation on two string operands.
///
/// Operands arrive as strings because the model converts natural language
/// into stringified parameters; an operand that does not parse reads as `0`.
/// The result is formatted with Rust's shortest round-trip `f64` display, so
/// `"2" * "2.5"` comes back as `"5"`.
pub struct Calculator;

#[async_trait]
impl Tool for Calculator {
    fn name(&self) -> &str {
        "perform_calculation"
    }

    fn description(&self) -> &str {
        "Perform a floating point calculation for the supplied values and operator"
    }

    fn parameters(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec {
                name: "value_one",
                description: "The first floating point value as a string",
            },
            ParamSpec {
                name: "value_two",
                description: "The second floating point value as a string",
            },
            ParamSpec {
                name: "operator",
                description: "The operator for the calculation. Can be one of +, -, *, /, %",
            },
        ]
    }

    async fn invoke(&self, args: &HashMap<String, String>) -> Result<String, ToolError> {
        let value_one = require_arg(args, "value_one")?;
        let value_two = require_arg(args, "value_two")?;
        let operator = require_arg(args, "operator")?;

        tracing::info!("running perform_calculation for {} {} {}", value_one, operator, value_two);

        let one: f64 = value_one.parse().unwrap_or(0.0);
        let two: f64 = value_two.parse().unwrap_or(0.0);

        // An unrecognized operator yields the zero-valued default rather than
        // an error; callers wanting operator validation must check first.
        let result = match operator {
            "+" => one + two,
            "-" => one - two,
            "*" => one * two,
            "/" => one / two,
            "%" => one % two,
            other => {
                tracing::warn!("unsupported operator: {}", other);
                0.0
            }
        };

        Ok(format!("{}", result))
    }
}
