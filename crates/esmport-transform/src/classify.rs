//! Export style classification
//!
//! Decides which single export idiom a module uses and rejects every
//! ambiguous or unsupported combination before the module is mutated.

use crate::error::{DeclarationKind, StyleConflict, TransformError, TransformErrorKind};
use crate::queries::{self, AliasDeclaration, DefaultExport, ExportSite, MemberRef};
use crate::{EXPORTS, REQUIRE};
use esmport_ast::{Expr, Span, StmtKind};
use esmport_lexer::is_reserved_word;
use esmport_parser::Module;
use std::collections::BTreeMap;
use tracing::debug;

/// The export idiom of a module, with everything the rewrite needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    /// `exports.name = ...`, optionally through `const alias = exports;`
    Named(NamedExports),
    /// `module.exports = Local;`
    DefaultAlias(DefaultExport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamedExports {
    pub alias: Option<AliasDeclaration>,
    /// Sites under `exports` and under the alias, in source order
    pub sites: Vec<ExportSite>,
    /// `exports.x` and `alias.x` accesses, site targets included
    pub references: Vec<MemberRef>,
    /// Export name to the binding its references are rewritten to
    pub locals: BTreeMap<String, String>,
}

impl NamedExports {
    /// Object names the module exports through.
    pub fn objects(&self) -> Vec<&str> {
        let mut objects = vec![EXPORTS];
        if let Some(alias) = &self.alias {
            objects.push(alias.alias.value.name.as_str());
        }
        objects
    }
}

/// Classifies `module`; `Ok(None)` means there is nothing to transform.
pub fn classify(module: &Module) -> Result<Option<Style>, TransformError> {
    let source = module.source();
    let fail = |kind: TransformErrorKind, span: Span| TransformError::at(kind, source, span);

    if let Some(first) = queries::bad_export_reassignment(module, EXPORTS).first() {
        return Err(fail(TransformErrorKind::BadExportAlias, first.span));
    }

    let aliases = queries::alias_declaration(module, EXPORTS);
    if let Some(second) = aliases.get(1) {
        return Err(fail(
            TransformErrorKind::MultipleDeclarations {
                what: DeclarationKind::ExportAlias,
            },
            second.span,
        ));
    }
    let alias = aliases
        .first()
        .and_then(|stmt| AliasDeclaration::from_stmt(stmt, EXPORTS));

    let mut site_stmts = queries::export_site(module, EXPORTS);
    if let Some(alias) = &alias {
        site_stmts.extend(queries::export_site(module, &alias.alias.value.name));
        site_stmts.sort_by_key(|stmt| stmt.id);
    }
    let sites: Vec<ExportSite> = site_stmts
        .into_iter()
        .filter_map(ExportSite::from_stmt)
        .collect();

    let defaults = queries::default_export_assignment(module);
    if let Some(second) = defaults.get(1) {
        return Err(fail(
            TransformErrorKind::MultipleDeclarations {
                what: DeclarationKind::ModuleExports,
            },
            second.span,
        ));
    }
    let default = defaults.first().and_then(|stmt| DefaultExport::from_stmt(stmt));

    debug!(
        alias = alias.as_ref().map(|a| a.alias.value.name.as_str()),
        sites = sites.len(),
        default_export = default.is_some(),
        "collected export signals"
    );

    if let Some(default) = default {
        if alias.is_some() {
            return Err(TransformError::new(TransformErrorKind::ConflictingExportStyle {
                with: StyleConflict::ExportAlias,
            }));
        }
        if !sites.is_empty() {
            return Err(TransformError::new(TransformErrorKind::ConflictingExportStyle {
                with: StyleConflict::NamedExports,
            }));
        }
        check_default_alias(module, &default)?;
        debug!(local = %default.local.value, "default-alias style");
        return Ok(Some(Style::DefaultAlias(default)));
    }

    if sites.is_empty() {
        if alias.is_some() {
            debug!("exports alias is never used, leaving module unchanged");
        }
        return Ok(None);
    }

    let mut named = NamedExports {
        alias,
        sites,
        references: Vec::new(),
        locals: BTreeMap::new(),
    };
    named.references = named
        .objects()
        .into_iter()
        .flat_map(|object| queries::member_references(module, object))
        .collect();
    named.references.sort_by_key(|reference| reference.span.start);

    named.locals = check_named(module, &named)?;
    debug!(sites = named.sites.len(), "named export style");
    Ok(Some(Style::Named(named)))
}

/// Rejections specific to `module.exports = Local;`.
fn check_default_alias(module: &Module, default: &DefaultExport) -> Result<(), TransformError> {
    let source = module.source();
    let local = &default.local.value.name;

    if let Some(stmt) = queries::export_site(module, local).first() {
        let name = ExportSite::from_stmt(stmt)
            .map(|site| site.export_name().to_string())
            .unwrap_or_default();
        return Err(TransformError::at(
            TransformErrorKind::UnsupportedCombination {
                object: local.clone(),
                name,
            },
            source,
            stmt.span,
        ));
    }

    // The rewrite adds an `export default`; any existing one is a duplicate
    let mut defaults: Vec<_> = module
        .find(|stmt| stmt.kind == StmtKind::ExportDefault)
        .into_iter()
        .map(|stmt| stmt.span)
        .collect();
    if let Some(stmt) = module.stmt(default.stmt) {
        defaults.push(stmt.span);
    }
    defaults.sort_by_key(|span| span.start);

    if let Some(second) = defaults.get(1) {
        return Err(TransformError::at(
            TransformErrorKind::MultipleDeclarations {
                what: DeclarationKind::DefaultExport,
            },
            source,
            *second,
        ));
    }
    Ok(())
}

/// Rejections specific to named exports.
///
/// Returns the binding each export name resolves to after the rewrite.
fn check_named(module: &Module, named: &NamedExports) -> Result<BTreeMap<String, String>, TransformError> {
    let source = module.source();
    let fail = |kind: TransformErrorKind, span: Span| TransformError::at(kind, source, span);
    let objects = named.objects();
    let mut locals = BTreeMap::new();

    for site in &named.sites {
        let name = site.export_name();
        let stmt_span = module.stmt(site.stmt).map_or(site.name.span, |stmt| stmt.span);
        let local = match &site.value.value {
            Expr::Ident(ident) if objects.contains(&ident.name.as_str()) => {
                return Err(fail(
                    TransformErrorKind::SelfExport {
                        object: site.object.clone(),
                        name: name.to_string(),
                    },
                    stmt_span,
                ));
            }
            // Re-exports and deferred requires keep no declaration of their own
            Expr::Ident(ident) => ident.name.clone(),
            Expr::Call(call) if call.is_call_to(REQUIRE) => name.to_string(),
            _ if is_reserved_word(name) => {
                return Err(fail(
                    TransformErrorKind::ReservedExportName {
                        name: name.to_string(),
                    },
                    site.name.span,
                ));
            }
            _ => name.to_string(),
        };

        if locals.insert(name.to_string(), local).is_some() {
            return Err(fail(
                TransformErrorKind::MultipleDeclarations {
                    what: DeclarationKind::Export(name.to_string()),
                },
                stmt_span,
            ));
        }
    }

    // Parameters, arguments and shadowing declarations all show up here
    let alias_span = named
        .alias
        .as_ref()
        .and_then(|alias| module.stmt(alias.stmt))
        .map(|stmt| stmt.span);
    let bare = objects
        .iter()
        .flat_map(|object| {
            queries::bare_references(module, object)
                .into_iter()
                .map(move |span| (*object, span))
        })
        .filter(|(_, span)| {
            alias_span.map_or(true, |alias| span.start < alias.start || span.end > alias.end)
        })
        .min_by_key(|(_, span)| span.start);
    if let Some((object, span)) = bare {
        return Err(fail(
            TransformErrorKind::ExportObjectValue {
                object: object.to_string(),
            },
            span,
        ));
    }

    for reference in named.references.iter().filter(|r| !r.is_site_target) {
        let object = source[reference.span.start..reference.span.end]
            .split('.')
            .next()
            .unwrap_or_default()
            .to_string();

        if reference.assigned {
            return Err(fail(
                TransformErrorKind::NestedExportAssignment {
                    object,
                    name: reference.name.clone(),
                },
                reference.span,
            ));
        }
        let Some(local) = locals.get(&reference.name) else {
            return Err(fail(
                TransformErrorKind::UndefinedExport {
                    object,
                    name: reference.name.clone(),
                },
                reference.span,
            ));
        };
        if is_reserved_word(local) {
            return Err(fail(
                TransformErrorKind::ReservedExportName { name: local.clone() },
                reference.span,
            ));
        }
    }

    Ok(locals)
}
