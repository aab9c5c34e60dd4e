//! Environment files: the host bindings a simulated run provides.
//!
//! Every input symbol is backed by a variable holding the declared constant,
//! every output symbol by a variable, and every basic behavior logs its
//! invocation.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use xabsl::{EnvironmentBuilder, InputBinding, RegistrationError, Symbols};
use xabsl_core::symbols::Domain;

use crate::lexer;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum EnvironmentError {
    #[error("line {line}: unrecognized input")]
    #[diagnostic(code(xabsl::environment::syntax))]
    Syntax { line: usize },

    #[error("line {line}: unknown directive `{directive}`")]
    #[diagnostic(
        code(xabsl::environment::directive),
        help("directives are enum, decimal-input, boolean-input, enumerated-input, decimal-output, boolean-output, enumerated-output, input-parameter, basic-behavior and behavior-parameter")
    )]
    UnknownDirective { line: usize, directive: String },

    #[error("line {line}: usage: {usage}")]
    #[diagnostic(code(xabsl::environment::usage))]
    Usage { line: usize, usage: &'static str },

    #[error("line {line}: invalid {what} `{found}`")]
    #[diagnostic(code(xabsl::environment::value))]
    InvalidValue {
        line: usize,
        what: &'static str,
        found: String,
    },

    #[error("line {line}: enumeration `{enumeration}` has no element `{element}`")]
    #[diagnostic(
        code(xabsl::environment::element),
        help("declare elements with `enum` before using them")
    )]
    UnknownElement {
        line: usize,
        enumeration: String,
        element: String,
    },
}

/// A formal parameter of an input symbol or basic behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    pub domain: Domain,
    pub name: String,
    pub enumeration: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    EnumElement {
        enumeration: String,
        element: String,
        value: i32,
    },
    DecimalInput {
        name: String,
        value: f64,
    },
    BooleanInput {
        name: String,
        value: bool,
    },
    EnumeratedInput {
        name: String,
        enumeration: String,
        value: i32,
    },
    DecimalOutput {
        name: String,
    },
    BooleanOutput {
        name: String,
    },
    EnumeratedOutput {
        name: String,
        enumeration: String,
    },
    InputParameter {
        symbol: String,
        parameter: ParameterDecl,
    },
    BasicBehavior {
        name: String,
    },
    BehaviorParameter {
        behavior: String,
        parameter: ParameterDecl,
    },
}

fn usage(directive: &str) -> &'static str {
    match directive {
        "enum" => "enum <enumeration> <element> <value>",
        "decimal-input" => "decimal-input <name> <value>",
        "boolean-input" => "boolean-input <name> <true|false>",
        "enumerated-input" => "enumerated-input <name> <enumeration> <element>",
        "decimal-output" => "decimal-output <name>",
        "boolean-output" => "boolean-output <name>",
        "enumerated-output" => "enumerated-output <name> <enumeration>",
        "input-parameter" => "input-parameter <symbol> <d|b|e> <name> [<enumeration>]",
        "basic-behavior" => "basic-behavior <name>",
        _ => "behavior-parameter <behavior> <d|b|e> <name> [<enumeration>]",
    }
}

fn parse_parameter(line: usize, words: &[&str]) -> Result<ParameterDecl, EnvironmentError> {
    let (domain, name, enumeration) = match words {
        ["d", name] => (Domain::Decimal, name, None),
        ["b", name] => (Domain::Boolean, name, None),
        ["e", name, enumeration] => (Domain::Enumerated, name, Some(enumeration.to_string())),
        [tag, ..] if !matches!(*tag, "d" | "b" | "e") => {
            return Err(EnvironmentError::InvalidValue {
                line,
                what: "parameter domain",
                found: tag.to_string(),
            });
        }
        _ => return Err(EnvironmentError::Syntax { line }),
    };
    Ok(ParameterDecl {
        domain,
        name: name.to_string(),
        enumeration,
    })
}

/// Parses an environment file. Enumerated inputs are resolved against the
/// `enum` lines above them.
pub fn parse(source: &str) -> Result<Vec<Declaration>, EnvironmentError> {
    let lines = lexer::lines(source).map_err(|line| EnvironmentError::Syntax { line })?;
    let mut elements: HashMap<(&str, &str), i32> = HashMap::new();
    let mut declarations = Vec::with_capacity(lines.len());

    for (line, words) in lines {
        let directive = words[0];
        let arguments = &words[1..];
        let wrong_usage = || EnvironmentError::Usage {
            line,
            usage: usage(directive),
        };
        let declaration = match (directive, arguments) {
            ("enum", [enumeration, element, value]) => {
                let value = value.parse::<i32>().map_err(|_| EnvironmentError::InvalidValue {
                    line,
                    what: "element value",
                    found: value.to_string(),
                })?;
                elements.insert((*enumeration, *element), value);
                Declaration::EnumElement {
                    enumeration: enumeration.to_string(),
                    element: element.to_string(),
                    value,
                }
            }
            ("decimal-input", [name, value]) => Declaration::DecimalInput {
                name: name.to_string(),
                value: value.parse::<f64>().map_err(|_| EnvironmentError::InvalidValue {
                    line,
                    what: "decimal",
                    found: value.to_string(),
                })?,
            },
            ("boolean-input", [name, value]) => Declaration::BooleanInput {
                name: name.to_string(),
                value: match *value {
                    "true" => true,
                    "false" => false,
                    found => {
                        return Err(EnvironmentError::InvalidValue {
                            line,
                            what: "boolean",
                            found: found.to_string(),
                        });
                    }
                },
            },
            ("enumerated-input", [name, enumeration, element]) => {
                let value = elements.get(&(*enumeration, *element)).copied().ok_or_else(|| {
                    EnvironmentError::UnknownElement {
                        line,
                        enumeration: enumeration.to_string(),
                        element: element.to_string(),
                    }
                })?;
                Declaration::EnumeratedInput {
                    name: name.to_string(),
                    enumeration: enumeration.to_string(),
                    value,
                }
            }
            ("decimal-output", [name]) => Declaration::DecimalOutput {
                name: name.to_string(),
            },
            ("boolean-output", [name]) => Declaration::BooleanOutput {
                name: name.to_string(),
            },
            ("enumerated-output", [name, enumeration]) => Declaration::EnumeratedOutput {
                name: name.to_string(),
                enumeration: enumeration.to_string(),
            },
            ("input-parameter", [symbol, parameter @ ..]) if !parameter.is_empty() => {
                Declaration::InputParameter {
                    symbol: symbol.to_string(),
                    parameter: parse_parameter(line, parameter)?,
                }
            }
            ("basic-behavior", [name]) => Declaration::BasicBehavior {
                name: name.to_string(),
            },
            ("behavior-parameter", [behavior, parameter @ ..]) if !parameter.is_empty() => {
                Declaration::BehaviorParameter {
                    behavior: behavior.to_string(),
                    parameter: parse_parameter(line, parameter)?,
                }
            }
            (
                "enum" | "decimal-input" | "boolean-input" | "enumerated-input" | "decimal-output"
                | "boolean-output" | "enumerated-output" | "input-parameter" | "basic-behavior"
                | "behavior-parameter",
                _,
            ) => return Err(wrong_usage()),
            _ => {
                return Err(EnvironmentError::UnknownDirective {
                    line,
                    directive: directive.to_string(),
                });
            }
        };
        declarations.push(declaration);
    }

    Ok(declarations)
}

fn input_domain(symbols: &Symbols, symbol: &str) -> Domain {
    if symbols.boolean_input_symbols().exists(symbol) {
        Domain::Boolean
    } else if symbols.enumerated_input_symbols().exists(symbol) {
        Domain::Enumerated
    } else {
        Domain::Decimal
    }
}

fn register_input_parameter(
    symbols: &mut Symbols,
    symbol: &str,
    parameter: &ParameterDecl,
) -> Result<(), RegistrationError> {
    let name = parameter.name.as_str();
    let enumeration = parameter.enumeration.as_deref().unwrap_or_default();
    match (input_domain(symbols, symbol), parameter.domain) {
        (Domain::Decimal, Domain::Decimal) => symbols
            .register_decimal_input_symbol_decimal_parameter(symbol, name, Rc::default()),
        (Domain::Decimal, Domain::Boolean) => symbols
            .register_decimal_input_symbol_boolean_parameter(symbol, name, Rc::default()),
        (Domain::Decimal, Domain::Enumerated) => symbols
            .register_decimal_input_symbol_enumerated_parameter(
                symbol,
                name,
                enumeration,
                Rc::default(),
            ),
        (Domain::Boolean, Domain::Decimal) => symbols
            .register_boolean_input_symbol_decimal_parameter(symbol, name, Rc::default()),
        (Domain::Boolean, Domain::Boolean) => symbols
            .register_boolean_input_symbol_boolean_parameter(symbol, name, Rc::default()),
        (Domain::Boolean, Domain::Enumerated) => symbols
            .register_boolean_input_symbol_enumerated_parameter(
                symbol,
                name,
                enumeration,
                Rc::default(),
            ),
        (Domain::Enumerated, Domain::Decimal) => symbols
            .register_enumerated_input_symbol_decimal_parameter(symbol, name, Rc::default()),
        (Domain::Enumerated, Domain::Boolean) => symbols
            .register_enumerated_input_symbol_boolean_parameter(symbol, name, Rc::default()),
        (Domain::Enumerated, Domain::Enumerated) => symbols
            .register_enumerated_input_symbol_enumerated_parameter(
                symbol,
                name,
                enumeration,
                Rc::default(),
            ),
    }
}

/// Registers the declarations with the engine being built.
pub fn register(
    declarations: &[Declaration],
    env: &mut EnvironmentBuilder,
) -> Result<(), RegistrationError> {
    for declaration in declarations {
        match declaration {
            Declaration::EnumElement {
                enumeration,
                element,
                value,
            } => env
                .symbols()
                .register_enum_element(enumeration, element, *value)?,
            Declaration::DecimalInput { name, value } => env
                .symbols()
                .register_decimal_input_symbol(name, Rc::new(Cell::new(*value)))?,
            Declaration::BooleanInput { name, value } => env
                .symbols()
                .register_boolean_input_symbol(name, Rc::new(Cell::new(*value)))?,
            Declaration::EnumeratedInput {
                name,
                enumeration,
                value,
            } => env.symbols().register_enumerated_input_symbol(
                name,
                enumeration,
                InputBinding::variable(Rc::new(Cell::new(*value))),
            )?,
            Declaration::DecimalOutput { name } => env
                .symbols()
                .register_decimal_output_symbol(name, Rc::new(Cell::new(0.0)))?,
            Declaration::BooleanOutput { name } => env
                .symbols()
                .register_boolean_output_symbol(name, Rc::new(Cell::new(false)))?,
            Declaration::EnumeratedOutput { name, enumeration } => env
                .symbols()
                .register_enumerated_output_symbol(name, enumeration, Rc::new(Cell::new(0)))?,
            Declaration::InputParameter { symbol, parameter } => {
                register_input_parameter(env.symbols(), symbol, parameter)?
            }
            Declaration::BasicBehavior { name } => {
                let behavior = name.clone();
                env.register_basic_behavior(name, move || {
                    tracing::info!(behavior = %behavior, "basic behavior executed");
                })?
            }
            Declaration::BehaviorParameter {
                behavior,
                parameter,
            } => {
                let name = parameter.name.as_str();
                match (parameter.domain, parameter.enumeration.as_deref()) {
                    (Domain::Decimal, _) => env.register_basic_behavior_decimal_parameter(
                        behavior,
                        name,
                        Rc::default(),
                    )?,
                    (Domain::Boolean, _) => env.register_basic_behavior_boolean_parameter(
                        behavior,
                        name,
                        Rc::default(),
                    )?,
                    (Domain::Enumerated, enumeration) => env
                        .register_basic_behavior_enumerated_parameter(
                            behavior,
                            name,
                            enumeration.unwrap_or_default(),
                            Rc::default(),
                        )?,
                }
            }
        }
    }
    Ok(())
}
