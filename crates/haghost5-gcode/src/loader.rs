//! G-Code loader
//!
//! Entry points that turn an already-fetched G-code document into preview
//! geometry. Fetching the text is left to the caller.

use haghost5_core::{Error, GcodeError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::gcode::{tokenize, Command, Instruction, MotionInterpreter, ParseStats};
use crate::options::ParseOptions;
use crate::preview::{GcodeGeometry, Layer};

/// Layers of one parse, in the order they were opened
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    pub layers: Vec<Layer>,
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn into_geometry(self, split_layer: bool) -> GcodeGeometry {
        GcodeGeometry::from_layers(&self.layers, split_layer)
    }
}

/// Interpret a document into layers.
pub fn parse_layers(text: &str, options: &ParseOptions) -> Result<ParseResult> {
    debug!(
        "Starting G-code parse, input size: {} bytes, strict: {}",
        text.len(),
        options.strict
    );

    let mut interpreter = MotionInterpreter::new();
    for (line_number, instruction) in tokenize(text) {
        // Unsupported codes (M117 messages and the like) carry free text
        let interpreted = Command::from_code(&instruction.command) != Command::Other;
        if interpreted && !instruction.invalid.is_empty() {
            if options.strict {
                return Err(strict_error(line_number, &instruction).into());
            }
            warn!(
                "Line {}: malformed parameters {:?} in {}",
                line_number, instruction.invalid, instruction.command
            );
        }
        interpreter.execute(&instruction);
    }

    let (layers, stats) = interpreter.finish();
    debug!(
        "Parse complete: lines={}, layers={}, extruding={} ({:.1}mm), travel={} ({:.1}mm), ignored={}",
        stats.lines,
        layers.len(),
        stats.extruding_segments,
        stats.extruded_distance,
        stats.travel_segments,
        stats.travel_distance,
        stats.ignored_commands
    );

    Ok(ParseResult { layers, stats })
}

/// Interpret a document straight into renderer groups.
pub fn parse_gcode(text: &str, options: &ParseOptions) -> Result<GcodeGeometry> {
    Ok(parse_layers(text, options)?.into_geometry(options.split_layer))
}

fn strict_error(line_number: u32, instruction: &Instruction) -> GcodeError {
    let token = instruction.invalid.first().cloned().unwrap_or_default();
    let starts_with_letter = token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());

    if starts_with_letter {
        GcodeError::InvalidParameter {
            line_number,
            param: token,
            reason: "value is not a number".to_string(),
        }
    } else {
        GcodeError::InvalidSyntax {
            line_number,
            reason: format!("parameter '{}' has no address letter", token),
        }
    }
}

/// Reusable loader holding the options applied to every parse.
#[derive(Debug, Clone, Default)]
pub struct GcodeLoader {
    options: ParseOptions,
}

impl GcodeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn set_split_layer(&mut self, split_layer: bool) {
        self.options.split_layer = split_layer;
    }

    pub fn set_strict(&mut self, strict: bool) {
        self.options.strict = strict;
    }

    pub fn parse(&self, text: &str) -> Result<GcodeGeometry> {
        parse_gcode(text, &self.options)
    }

    pub fn parse_layers(&self, text: &str) -> Result<ParseResult> {
        parse_layers(text, &self.options)
    }

    /// Parse and hand the geometry to `on_load`. Failures are logged and
    /// dropped.
    pub fn load<F>(&self, text: &str, on_load: F)
    where
        F: FnOnce(GcodeGeometry),
    {
        match self.parse(text) {
            Ok(geometry) => on_load(geometry),
            Err(err) => error!("G-code load failed: {}", err),
        }
    }

    /// Parse and hand the geometry to `on_load`, or the failure to
    /// `on_error`.
    pub fn load_with<F, E>(&self, text: &str, on_load: F, on_error: E)
    where
        F: FnOnce(GcodeGeometry),
        E: FnOnce(Error),
    {
        match self.parse(text) {
            Ok(geometry) => on_load(geometry),
            Err(err) => on_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_error_kinds() {
        let instr = crate::gcode::tokenize_line("G1 Xabc");
        assert!(matches!(
            strict_error(4, &instr),
            GcodeError::InvalidParameter { line_number: 4, .. }
        ));

        let instr = crate::gcode::tokenize_line("G1 -5");
        assert!(matches!(
            strict_error(2, &instr),
            GcodeError::InvalidSyntax { line_number: 2, .. }
        ));
    }

    #[test]
    fn test_strict_ignores_unrecognized_commands() {
        let opts = ParseOptions::new().with_strict(true);
        let result = parse_layers("M117 Printing benchy\nG1 X1 E1\n", &opts).unwrap();
        assert_eq!(result.layers.len(), 1);
    }

    #[test]
    fn test_loader_setters() {
        let mut loader = GcodeLoader::new();
        loader.set_split_layer(true);
        loader.set_strict(true);
        assert_eq!(
            *loader.options(),
            ParseOptions::new().with_split_layer(true).with_strict(true)
        );
    }
}
