//! # Esmport Parser
//!
//! Statement-level parser for JavaScript modules. The top level of a module
//! is split into statements following the statement grammar and automatic
//! semicolon insertion; the shapes of assignments and declarations that the
//! export transform inspects are recognized, everything else is kept as
//! source spans. The resulting [`Module`] is edited in place and printed
//! back with [`print`].

use esmport_ast::*;
use esmport_lexer::{Lexer, Token, TokenKind};

// Module declarations
mod error;
mod parser;
mod stmt;
mod expr;
mod comments;
mod helpers;
pub mod tree;
pub mod print;

// Re-export public types
pub use error::{ParseError, ParseResult};
pub use parser::{parse_module, Parser};
pub use print::{export_list, print, PrintOptions, QuoteStyle};
pub use tree::{Module, Piece, Synthetic, TreeError};

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Module {
        parse_module(source, 0).unwrap()
    }

    fn kinds(source: &str) -> Vec<StmtKind> {
        parse(source)
            .statements()
            .iter()
            .map(|stmt| stmt.kind.clone())
            .collect()
    }

    fn texts(source: &str) -> Vec<String> {
        let module = parse(source);
        module
            .statements()
            .iter()
            .map(|stmt| module.text(stmt.span).to_string())
            .collect()
    }

    fn assign(source: &str) -> Assign {
        match kinds(source).remove(0) {
            StmtKind::Assign(assign) => assign,
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_statement_boundaries() {
        let source = "'use strict';\nconst a = require('a')\nfunction f() { return 1 }\nclass B extends mix(A) { m() {} }\nif (a) f(); else { g() }\nexports.x = 1\n";
        assert_eq!(
            texts(source),
            [
                "'use strict';",
                "const a = require('a')",
                "function f() { return 1 }",
                "class B extends mix(A) { m() {} }",
                "if (a) f(); else { g() }",
                "exports.x = 1",
            ]
        );
    }

    #[test]
    fn test_asi_continuations() {
        let source = "exports.a = 0\n  | exports.b;\nconst f = function () {\n}\n.bind(null)\nfoo\n(bar)\nx\n++y\n";
        assert_eq!(
            texts(source),
            [
                "exports.a = 0\n  | exports.b;",
                "const f = function () {\n}\n.bind(null)",
                "foo\n(bar)",
                "x",
                "++y",
            ]
        );
    }

    #[test]
    fn test_control_flow_statements() {
        let source = "for (const x of xs) use(x)\nwhile (a) { b() }\ndo step(); while (more)\ntry { a() } catch { b() } finally { c() }\nswitch (k) { case 1: break }\nlabel: for (;;) {}\n{ block() }\nasync function run() {}\n";
        assert_eq!(parse(source).statements().len(), 8);
    }

    #[test]
    fn test_import_export_kinds() {
        let source = "import a from 'a';\nimport('b');\nexport const c = 1;\nexport { c as d };\nexport default class {}\nexport function e() {}\n";
        assert_eq!(
            kinds(source),
            [
                StmtKind::Import,
                StmtKind::Other,
                StmtKind::Export,
                StmtKind::Export,
                StmtKind::ExportDefault,
                StmtKind::Export,
            ]
        );
    }

    #[test]
    fn test_member_assignment() {
        let assign = assign("exports.foo = bar;");
        assert_eq!(assign.op, AssignOp::Assign);
        match assign.target {
            AssignTarget::Member { object, property } => {
                assert_eq!(object.value.name, "exports");
                assert_eq!(property.value.name, "foo");
            }
            other => panic!("unexpected target {:?}", other),
        }
        assert_eq!(assign.value.value, Expr::Ident(Ident::new("bar")));
    }

    #[test]
    fn test_assignment_targets() {
        assert!(matches!(assign("exports = lib;").target, AssignTarget::Ident(_)));
        assert!(matches!(assign("a.b.c = 1;").target, AssignTarget::Other(_)));
        assert!(matches!(assign("a[b] = 1;").target, AssignTarget::Other(_)));
        assert!(matches!(assign("exports.default = 1;").target, AssignTarget::Member { .. }));
        assert_eq!(assign("count += 1;").op, AssignOp::Compound);
    }

    #[test]
    fn test_not_single_assignments() {
        assert_eq!(kinds("a = 1, b = 2;"), [StmtKind::Other]);
        assert_eq!(kinds("ok ? a = 1 : b();"), [StmtKind::Other]);
        assert_eq!(kinds("foo(a = 1);"), [StmtKind::Other]);
        assert_eq!(kinds("a == b;"), [StmtKind::Other]);
    }

    #[test]
    fn test_function_values() {
        let source = "exports.f = async function* gen(a, b) { yield a; };";
        let module = parse(source);
        let StmtKind::Assign(assign) = &module.statements()[0].kind else {
            panic!("expected assignment");
        };
        let Expr::Function(function) = &assign.value.value else {
            panic!("expected function, got {:?}", assign.value.value);
        };
        assert!(function.is_async);
        assert!(function.is_generator);
        assert_eq!(function.name.as_ref().map(|n| n.value.name.as_str()), Some("gen"));
        assert_eq!(module.text(function.params), "(a, b)");
        assert_eq!(module.text(function.body), "{ yield a; }");
    }

    #[test]
    fn test_arrow_values() {
        let source = "a.b = (x, y) => { return x; };\na.c = async v => v * 2;\na.d = async(1);\n";
        let module = parse(source);
        let values: Vec<&Expr> = module
            .statements()
            .iter()
            .map(|stmt| match &stmt.kind {
                StmtKind::Assign(assign) => &assign.value.value,
                other => panic!("unexpected {:?}", other),
            })
            .collect();

        let Expr::Arrow(block) = values[0] else { panic!("expected arrow") };
        assert!(!block.is_async);
        assert!(matches!(block.params, ArrowParams::Parenthesized(span) if module.text(span) == "(x, y)"));
        assert!(matches!(block.body, ArrowBody::Block(span) if module.text(span) == "{ return x; }"));

        let Expr::Arrow(expr) = values[1] else { panic!("expected arrow") };
        assert!(expr.is_async);
        assert!(matches!(expr.params, ArrowParams::Ident(span) if module.text(span) == "v"));
        assert!(matches!(expr.body, ArrowBody::Expr(span) if module.text(span) == "v * 2"));

        assert!(matches!(values[2], Expr::Call(call) if call.is_call_to("async")));
    }

    #[test]
    fn test_other_values() {
        for source in [
            "a.b = require('x').y;",
            "a.b = function () {}();",
            "a.b = new Thing();",
            "a.b = undefined;",
            "a.b = { c: 1 };",
        ] {
            assert_eq!(assign(source).value.value, Expr::Other, "{}", source);
        }
        assert!(matches!(assign("a.b = require('x');").value.value, Expr::Call(_)));
    }

    #[test]
    fn test_var_declarators() {
        let kinds = kinds("const lib = exports, { a } = b, c;");
        let StmtKind::VarDecl(decl) = &kinds[0] else {
            panic!("expected declaration");
        };
        assert_eq!(decl.kind, VarKind::Const);
        assert_eq!(decl.declarators.len(), 3);
        assert_eq!(
            decl.declarators[0].name.as_ref().map(|n| n.value.name.as_str()),
            Some("lib")
        );
        assert_eq!(
            decl.declarators[0].init.as_ref().map(|init| &init.value),
            Some(&Expr::Ident(Ident::new("exports")))
        );
        assert!(decl.declarators[1].name.is_none());
        assert!(decl.declarators[2].init.is_none());
    }

    #[test]
    fn test_comment_attachment() {
        let source = "// header\n\na(); // trailing\n/* lead */\n// lead too\nb();\nfunction f() { /* inside */ }\n// footer\n";
        let module = parse(source);
        let stmts = module.statements();
        let text = |c: &Comment| module.text(c.span).to_string();

        assert!(stmts[0].leading.is_empty());
        assert_eq!(stmts[0].trailing.iter().map(text).collect::<Vec<_>>(), ["// trailing"]);
        assert_eq!(
            stmts[1].leading.iter().map(text).collect::<Vec<_>>(),
            ["/* lead */", "// lead too"]
        );
        assert!(stmts[2].leading.is_empty());
        assert!(stmts[2].trailing.is_empty());
    }

    #[test]
    fn test_syntax_errors() {
        for source in ["foo(;\n", "a = 'open\n", "}\n", "function f( {}\n", "/* open"] {
            assert!(parse_module(source, 0).is_err(), "{}", source);
        }
        let error = parse_module("a = 1);\n", 0).unwrap_err();
        assert_eq!(error.message, "Unexpected token ')'");
        assert_eq!(error.span.start, 5);

        let error = parse_module("call(1;\n", 0).unwrap_err();
        assert_eq!(error.message, "Unclosed delimiter");
        assert_eq!(error.span.start, 4);
    }
}
