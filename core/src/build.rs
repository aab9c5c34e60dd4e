//! Shared state for building the option graph from intermediate code.

use crate::api::EngineOptions;
use crate::behavior::BehaviorEntry;
use crate::errors::{ConstructError, ErrorKind, NameKind, TagPosition};
use crate::parameters::Parameters;
use crate::reader::{Span, Token, TokenReader};
use crate::registry::NamedRegistry;
use crate::symbols::{Domain, Symbols};

/// Token reader plus the recursion guard for nested constructs.
pub(crate) struct Builder<'src> {
    reader: TokenReader<'src>,
    last_span: Span,
    depth: usize,
    max_depth: usize,
}

impl<'src> Builder<'src> {
    pub(crate) fn new(source: &'src str, options: &EngineOptions) -> Self {
        Self {
            reader: TokenReader::new(source, options.max_token_length),
            last_span: Span::default(),
            depth: 0,
            max_depth: options.max_nesting_depth,
        }
    }

    pub(crate) fn read_string(&mut self) -> Result<Token<'src>, ConstructError> {
        let token = self.reader.read_string()?;
        self.last_span = token.span.clone();
        Ok(token)
    }

    pub(crate) fn read_value(&mut self) -> Result<f64, ConstructError> {
        let (value, span) = self.reader.read_value()?;
        self.last_span = span;
        Ok(value)
    }

    pub(crate) fn read_count(&mut self) -> Result<(usize, Span), ConstructError> {
        let (count, span) = self.reader.read_count()?;
        self.last_span = span.clone();
        Ok((count, span))
    }

    pub(crate) fn read_boolean(&mut self) -> Result<bool, ConstructError> {
        let token = self.read_string()?;
        match token.text {
            "true" => Ok(true),
            "false" => Ok(false),
            found => Err(ConstructError::new(
                ErrorKind::InvalidBoolean {
                    found: found.to_string(),
                },
                token.span,
            )),
        }
    }

    pub(crate) fn expect_end(&mut self) -> Result<(), ConstructError> {
        self.reader.expect_end()
    }

    /// Runs `build` one nesting level deeper.
    pub(crate) fn nested<T>(
        &mut self,
        build: impl FnOnce(&mut Self) -> Result<T, ConstructError>,
    ) -> Result<T, ConstructError> {
        if self.depth >= self.max_depth {
            return Err(ConstructError::new(
                ErrorKind::NestingTooDeep {
                    max: self.max_depth,
                },
                self.last_span.clone(),
            ));
        }
        self.depth += 1;
        let result = build(self);
        self.depth -= 1;
        result
    }
}

pub(crate) fn unknown_tag(position: TagPosition, token: &Token<'_>) -> ConstructError {
    ConstructError::new(
        ErrorKind::UnknownTag {
            position,
            tag: token.text.to_string(),
        },
        token.span.clone(),
    )
}

/// Looks up `token` in `registry`, reporting an unresolved name otherwise.
pub(crate) fn resolve<T>(
    registry: &NamedRegistry<T>,
    kind: NameKind,
    token: &Token<'_>,
) -> Result<usize, ConstructError> {
    registry.position(token.text).ok_or_else(|| {
        ConstructError::new(
            ErrorKind::Unresolved {
                kind,
                name: token.text.to_string(),
            },
            token.span.clone(),
        )
    })
}

/// Everything a node inside an option body may refer to by name.
pub(crate) struct Scope<'a> {
    pub(crate) symbols: &'a Symbols,
    pub(crate) behaviors: &'a NamedRegistry<BehaviorEntry>,
    /// Formal parameters of every declared option.
    pub(crate) options: &'a NamedRegistry<Parameters>,
    /// Formal parameters of the option being built.
    pub(crate) parameters: &'a Parameters,
    /// States declared by the option being built.
    pub(crate) states: &'a NamedRegistry<()>,
}

impl Scope<'_> {
    pub(crate) fn option_parameter(
        &self,
        domain: Domain,
        token: &Token<'_>,
    ) -> Result<usize, ConstructError> {
        let kind = NameKind::OptionParameter(domain);
        match domain {
            Domain::Decimal => resolve(&self.parameters.decimal, kind, token),
            Domain::Boolean => resolve(&self.parameters.boolean, kind, token),
            Domain::Enumerated => resolve(&self.parameters.enumerated, kind, token),
        }
    }
}
