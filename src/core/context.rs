//! Per-traversal state.
//!
//! One [`TraversalContext`] lives for a single pass over a single file. It
//! owns the file's registry and the edits planned so far, and remembers the
//! first failure so the traversal can stop early.

use tracing::{debug, trace};

use crate::{
    core::{
        data::{FileIdentity, MessageDescriptor, SourceRange},
        matcher::{Declaration, DeclarationSite},
        options::{ExtractOptions, Pass},
        parsers::ParsedSource,
        registry::MessageRegistry,
        rewrite::{TextEdit, plan_edits},
        validate::{Verdict, validate},
    },
    error::ExtractError,
};

pub struct TraversalContext<'a> {
    pub parsed: &'a ParsedSource,
    pub file: &'a FileIdentity,
    pub options: &'a ExtractOptions,
    pub pass: Pass,
    registry: MessageRegistry,
    edits: Vec<TextEdit>,
    matched: usize,
    failure: Option<ExtractError>,
}

/// What a finished traversal produced.
#[derive(Debug)]
pub struct TraversalOutput {
    pub messages: Vec<MessageDescriptor>,
    pub edits: Vec<TextEdit>,
    /// Number of declaration sites the matcher found.
    pub matched: usize,
}

impl<'a> TraversalContext<'a> {
    pub fn new(
        parsed: &'a ParsedSource,
        file: &'a FileIdentity,
        options: &'a ExtractOptions,
        pass: Pass,
    ) -> Self {
        Self {
            parsed,
            file,
            options,
            pass,
            registry: MessageRegistry::new(),
            edits: Vec::new(),
            matched: 0,
            failure: None,
        }
    }

    pub fn failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Validate, record and plan the rewrite of one declaration.
    ///
    /// After the first failure every further site is ignored.
    pub fn accept(&mut self, site: DeclarationSite) {
        if self.failed() {
            return;
        }
        self.matched += 1;
        if let Err(err) = self.process(&site) {
            debug!(site = %site.label(), error = %err, "declaration failed");
            self.failure = Some(err);
        }
    }

    fn process(&mut self, site: &DeclarationSite) -> Result<(), ExtractError> {
        let span = site.span();
        let range = SourceRange::new(self.parsed.position(span.lo), self.parsed.position(span.hi));
        trace!(site = %site.label(), source = %self.parsed.snippet(span), "matched declaration");

        match validate(site.fields(), range, self.file, self.options, self.pass)? {
            Verdict::Skip(reason) => {
                debug!(site = %site.label(), reason, "skipping declaration");
            }
            Verdict::Final(descriptor) => {
                debug!(site = %site.label(), id = %descriptor.id, "declaration already final");
                self.registry
                    .add(descriptor, range.start, &self.file.display_path)?;
            }
            Verdict::Extracted {
                descriptor,
                overridden,
            } => {
                debug!(site = %site.label(), id = %descriptor.id, "extracted message");
                let edits = plan_edits(
                    site.field_list(),
                    &descriptor,
                    overridden,
                    self.options,
                    &self.parsed.code,
                );
                self.registry
                    .add(descriptor, range.start, &self.file.display_path)?;
                self.edits.extend(edits);
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<TraversalOutput, ExtractError> {
        if let Some(err) = self.failure {
            return Err(err);
        }
        Ok(TraversalOutput {
            messages: self.registry.drain(),
            edits: self.edits,
            matched: self.matched,
        })
    }
}
