//! Rewrite engine
//!
//! Turns a classified module into declarative exports by editing the module
//! tree in place. Every shape handled here was validated by the classifier,
//! so failures surface only as tree errors.

use crate::classify::{NamedExports, Style};
use crate::error::TransformError;
use crate::queries::{self, DefaultExport, ExportSite};
use crate::{EXPORTS, MODULE, REQUIRE};
use esmport_ast::*;
use esmport_parser::{export_list, Module, Synthetic};
use tracing::{debug, warn};

/// A local binding exported under a public name, flushed as one list.
#[derive(Debug, Clone, PartialEq)]
struct ExportBinding {
    local: String,
    exported: String,
    /// Comments of the removed site
    leading: Option<Span>,
    trailing: Option<Span>,
}

pub fn rewrite(module: &mut Module, style: &Style) -> Result<(), TransformError> {
    match style {
        Style::Named(named) => rewrite_named(module, named),
        Style::DefaultAlias(default) => rewrite_default(module, default),
    }
}

fn rewrite_named(module: &mut Module, named: &NamedExports) -> Result<(), TransformError> {
    let mut bindings = Vec::new();

    for site in &named.sites {
        let name = site.export_name();
        match &site.value.value {
            Expr::Call(call) if call.is_call_to(REQUIRE) => {
                debug!(name, "leaving require site to the import rewrite");
                if site.object != EXPORTS {
                    module.splice(site.object_span, EXPORTS)?;
                }
            }
            Expr::Ident(local) => {
                debug!(name, local = %local, "deferring re-export");
                let leading = module.take_leading(site.stmt)?;
                let trailing = module.take_trailing(site.stmt)?;
                module.remove(site.stmt)?;
                bindings.push(ExportBinding {
                    local: local.name.clone(),
                    exported: name.to_string(),
                    leading,
                    trailing,
                });
            }
            Expr::Function(function) => {
                debug!(name, "function export");
                module.replace(site.stmt, function_declaration(name, function))?;
            }
            Expr::Arrow(arrow) => {
                debug!(name, "arrow function export");
                module.replace(site.stmt, arrow_declaration(name, arrow))?;
            }
            Expr::Call(_) | Expr::Other => {
                debug!(name, "constant export");
                module.replace(site.stmt, const_declaration(name, site))?;
            }
        }
    }

    if !bindings.is_empty() {
        let list = export_list(
            bindings
                .iter()
                .map(|binding| (binding.local.as_str(), binding.exported.as_str())),
        );
        let leading = bindings.iter().filter_map(|binding| binding.leading);
        let trailing = bindings.iter().filter_map(|binding| binding.trailing);
        module.append(
            Synthetic::new()
                .with_leading(leading)
                .text(list)
                .with_trailing(trailing),
        );
    }

    for reference in named.references.iter().filter(|r| !r.is_site_target) {
        if let Some(local) = named.locals.get(&reference.name) {
            module.splice(reference.span, local.clone())?;
        }
    }

    if let Some(alias) = &named.alias {
        module.remove(alias.stmt)?;
    }

    warn_leftovers(module);
    Ok(())
}

fn rewrite_default(module: &mut Module, default: &DefaultExport) -> Result<(), TransformError> {
    let local = default.local.value.name.as_str();

    if queries::exports_name(module, local) {
        debug!(local, "binding already exported");
    } else {
        let leading = module.take_leading(default.stmt)?;
        module.insert_before(
            default.stmt,
            Synthetic::new()
                .with_leading(leading)
                .text(export_list([(local, local)])),
        )?;
    }

    module.replace(
        default.stmt,
        Synthetic::new().text(format!("export default {};", local)),
    )?;
    Ok(())
}

/// `export [async ]function[*] name(params) body`
fn function_declaration(name: &str, function: &FunctionExpr) -> Synthetic {
    let mut head = String::from("export ");
    if function.is_async {
        head.push_str("async ");
    }
    head.push_str("function");
    if function.is_generator {
        head.push('*');
    }
    head.push(' ');
    head.push_str(name);

    Synthetic::new()
        .text(head)
        .source(function.params)
        .text(" ")
        .source(function.body)
}

fn arrow_declaration(name: &str, arrow: &ArrowExpr) -> Synthetic {
    let head = if arrow.is_async {
        format!("export async function {}", name)
    } else {
        format!("export function {}", name)
    };

    let item = match arrow.params {
        ArrowParams::Ident(param) => Synthetic::new().text(format!("{}(", head)).source(param).text(") "),
        ArrowParams::Parenthesized(params) => Synthetic::new().text(head).source(params).text(" "),
    };

    match arrow.body {
        ArrowBody::Block(body) => item.source(body),
        ArrowBody::Expr(expr) => item.text("{\n  return ").source(expr).text(";\n}"),
    }
}

fn const_declaration(name: &str, site: &ExportSite) -> Synthetic {
    Synthetic::new()
        .text(format!("export const {} = ", name))
        .source(site.value.span)
        .text(";")
}

/// Reports legacy export code the rewrite leaves in place.
fn warn_leftovers(module: &Module) {
    for stmt in module.find(|stmt| {
        ExportSite::from_stmt(stmt)
            .map_or(false, |site| site.object == MODULE && site.export_name() == EXPORTS)
    }) {
        warn!(
            statement = %stmt.id,
            offset = stmt.span.start,
            "`module.exports` assignment left unchanged"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use esmport_parser::{print, PrintOptions};
    use pretty_assertions::assert_eq;

    fn run(source: &str) -> String {
        let mut module = Module::parse(source, 0).unwrap();
        let style = classify(&module).unwrap().expect("module has exports");
        rewrite(&mut module, &style).unwrap();
        print(&module, &PrintOptions::default())
    }

    #[test]
    fn test_function_export_keeps_comments() {
        let source = "/**\n * Identity.\n */\nexports.foo = function bar(a) { return a; };\n";
        assert_eq!(
            run(source),
            "/**\n * Identity.\n */\nexport function foo(a) { return a; }\n"
        );
    }

    #[test]
    fn test_async_generator_function() {
        let source = "exports.items = async function* (list) {\n  yield* list;\n};\n";
        assert_eq!(
            run(source),
            "export async function* items(list) {\n  yield* list;\n}\n"
        );
    }

    #[test]
    fn test_arrow_exports() {
        let source = "exports.double = x => x * 2;\nexports.load = async (a, b) => {\n  return a + b;\n};\n";
        assert_eq!(
            run(source),
            "export function double(x) {\n  return x * 2;\n}\nexport async function load(a, b) {\n  return a + b;\n}\n"
        );
    }

    #[test]
    fn test_const_exports() {
        let source = "exports.VERSION = '1.0.0';\nexports.config = { debug: false }; // defaults\nexports.thing = new Thing();\n";
        assert_eq!(
            run(source),
            "export const VERSION = '1.0.0';\nexport const config = { debug: false }; // defaults\nexport const thing = new Thing();\n"
        );
    }

    #[test]
    fn test_reexports_are_bundled_with_comments() {
        let source = "const x = 1;\n\n// First\nexports.a = x;\nexports.b = y;\n";
        assert_eq!(run(source), "const x = 1;\n\n// First\nexport { x as a, y as b };\n");
    }

    #[test]
    fn test_require_site_untouched() {
        let source = "exports.util = require('./util');\nexports.a = 1;\n";
        assert_eq!(run(source), "exports.util = require('./util');\nexport const a = 1;\n");
    }

    #[test]
    fn test_references_become_bare_names() {
        let source = "exports.limit = 10;\nexports.check = function (n) {\n  return n < exports.limit;\n};\n";
        assert_eq!(
            run(source),
            "export const limit = 10;\nexport function check(n) {\n  return n < limit;\n}\n"
        );
    }

    #[test]
    fn test_alias_declaration_removed() {
        let source = "'use strict';\n\nconst api = exports;\n\napi.run = () => api.stop();\napi.stop = function stop() {};\n";
        assert_eq!(
            run(source),
            "'use strict';\n\nexport function run() {\n  return stop();\n}\nexport function stop() {}\n"
        );
    }

    #[test]
    fn test_default_alias() {
        let source = "class Foo {}\n\n/** Expose */\nmodule.exports = Foo; // main\n";
        assert_eq!(
            run(source),
            "class Foo {}\n\n/** Expose */\nexport { Foo };\nexport default Foo; // main\n"
        );
    }

    #[test]
    fn test_default_alias_already_exported() {
        let source = "export class Foo {}\nmodule.exports = Foo;\n";
        assert_eq!(run(source), "export class Foo {}\nexport default Foo;\n");
    }

    #[test]
    fn test_reexport_keeps_trailing_comment() {
        let source = "const x = 1;\nexports.a = x; // public name\n";
        assert_eq!(run(source), "const x = 1;\n\nexport { x as a }; // public name\n");

        let source = "exports.a = x; /* keep */\nexports.b = 1;\n";
        assert_eq!(run(source), "export const b = 1;\n\nexport { x as a }; /* keep */\n");
    }

    #[test]
    fn test_reexport_reference_uses_local() {
        let source = "const x = 1;\nexports.a = x;\nfoo(exports.a);\n";
        assert_eq!(run(source), "const x = 1;\nfoo(x);\n\nexport { x as a };\n");
    }

    #[test]
    fn test_references_inside_template() {
        let source = "exports.t = `${exports.a}`;\nexports.a = 1;\n";
        assert_eq!(run(source), "export const t = `${a}`;\nexport const a = 1;\n");
    }

    #[test]
    fn test_alias_require_site_uses_exports() {
        let source = "const lib = exports;\nlib.util = require('./u');\n";
        assert_eq!(run(source), "exports.util = require('./u');\n");

        let source = "const lib = exports;\n\nlib.util = require('./u');\nlib.size = 4;\n";
        assert_eq!(run(source), "exports.util = require('./u');\nexport const size = 4;\n");
    }
}
