//! Require-site extraction.
//!
//! The scanner parses a file and walks every call expression in it,
//! collecting `require(...)` sites into import descriptors. It performs no
//! filesystem access and no evaluation: a call qualifies purely on shape
//! (bare identifier callee named `require`, exactly one argument), and the
//! argument expression is never interpreted beyond "is it a string
//! literal".

use oxc_allocator::Allocator;
use oxc_ast::ast::{Argument, CallExpression, Expression};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType, Span};
use rustc_hash::FxHashMap;

use crate::record::{ImportDescriptor, Reference};

/// Errors that can occur while scanning a file.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The parser rejected the source. Sources are parsed in module mode;
    /// script-mode constructs are not supported.
    #[error("parse failed: {0}")]
    Parse(String),
}

/// Extracts `require` call sites from source text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    /// Scan `source` and return its import descriptors in first-sighting
    /// order. Call sites sharing identical argument source fold into one
    /// descriptor with multiple references. Calls nested inside function
    /// bodies are included; no scope analysis is performed, so a local
    /// binding named `require` still counts.
    pub fn scan(&self, source: &str) -> Result<Vec<ImportDescriptor>, ScanError> {
        let allocator = Allocator::default();
        let parsed = Parser::new(&allocator, source, SourceType::mjs()).parse();
        if parsed.panicked || !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|error| error.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ScanError::Parse(message));
        }

        let mut collector = RequireCollector {
            source,
            descriptors: Vec::new(),
            by_specifier: FxHashMap::default(),
        };
        walk::walk_program(&mut collector, &parsed.program);
        Ok(collector.descriptors)
    }
}

struct RequireCollector<'s> {
    source: &'s str,
    descriptors: Vec<ImportDescriptor>,
    by_specifier: FxHashMap<String, usize>,
}

impl<'s> RequireCollector<'s> {
    fn slice(&self, span: Span) -> &'s str {
        &self.source[span.start as usize..span.end as usize]
    }

    fn record(&mut self, specifier: String, is_static: bool, call_span: Span) {
        let reference = Reference {
            source: self.slice(call_span).to_string(),
            start: call_span.start as usize,
            end: call_span.end as usize,
        };
        match self.by_specifier.get(&specifier) {
            Some(&index) => self.descriptors[index].references.push(reference),
            None => {
                self.by_specifier
                    .insert(specifier.clone(), self.descriptors.len());
                self.descriptors.push(ImportDescriptor {
                    specifier,
                    is_static,
                    references: vec![reference],
                });
            }
        }
    }
}

impl<'s, 'ast> Visit<'ast> for RequireCollector<'s> {
    fn visit_call_expression(&mut self, call: &CallExpression<'ast>) {
        if let Expression::Identifier(ident) = &call.callee {
            if ident.name.as_str() == "require" && call.arguments.len() == 1 {
                match &call.arguments[0] {
                    // A single string literal is a static import; the
                    // stored specifier is the literal's source with the
                    // surrounding quote characters stripped.
                    Argument::StringLiteral(literal) => {
                        let raw = self.slice(literal.span);
                        let specifier = raw[1..raw.len() - 1].to_string();
                        self.record(specifier, true, call.span);
                    }
                    // Anything else is dynamic; the specifier is the raw
                    // source slice of the argument expression.
                    argument => {
                        let specifier = self.slice(argument.span()).to_string();
                        self.record(specifier, false, call.span);
                    }
                }
            }
        }
        // Arguments and nested bodies can contain further require sites.
        walk::walk_call_expression(self, call);
    }
}
