//! Print -> parse -> print must reach a fixpoint after the first print.

use bumpalo::Bump;
use esparse_options::ParserOptions;
use esparse_parser::{parse_module, parse_script};
use esparse_printer::print_program;

fn print_source(source: &str, module: bool) -> String {
    let arena = Bump::new();
    let output = if module {
        parse_module(&arena, "input.js", source, ParserOptions::default())
    } else {
        parse_script(&arena, "input.js", source, ParserOptions::default())
    }
    .expect("parse aborted");
    assert!(
        !output.has_errors(),
        "source:\n{source}\n{:?}",
        output.diagnostics.diagnostics()
    );
    print_program(output.program)
}

fn assert_fixpoint(source: &str, module: bool) {
    let first = print_source(source, module);
    let second = print_source(&first, module);
    assert_eq!(first, second, "printer is not stable for:\n{source}");
}

const SCRIPTS: &[&str] = &[
    "var a = 1, b = a + 2 * 3, c = (a + b) * 3;",
    "x = a ? b : c ? d : e; y = (a, b); z = a ?? b;",
    "if (a) if (b) f(); else g();",
    "if (a) { b(); } else if (c) { d(); } else { e(); }",
    "for (var i = 0, n = xs.length; i < n; i++) { if (xs[i]) continue; }",
    "for (var k in o) delete o[k]; for (const v of [1, 2, 3]) log(v);",
    "for (var x = (a in b); x; x--) {}",
    "label: while (true) { do { break label; } while (0) }",
    "switch (k) { case 0: a(); case 1: { b(); break; } default: c(); }",
    "try { risky(); } catch ({message}) { report(message); } finally { cleanup(); }",
    "try { risky(); } catch { ignore(); }",
    "function f(a, b = 1, {c, d: [e]} = {}, ...rest) { return a + b + c + e + rest.length; }",
    "function* gen() { yield 1; yield* other(); }",
    "async function load(url) { const response = await fetch(url); return response.json(); }",
    "const add = (a, b) => a + b; const obj = () => ({a: 1}); const noop = async () => {};",
    "var o = {a: 1, 'b': 2, 3: c, [d]: e, f, g() {}, get h() { return 1; }, set h(v) {}, ...rest};",
    "var [first, , third = 3, ...others] = list;",
    "({a, b: {c}} = source); [x, y] = [y, x];",
    "a?.b.c; a?.[0]?.(1); (a?.b).c;",
    "new Foo; new Foo(1, 2); new (getClass())(); new a.b.C();",
    "var t = `head ${a + b} middle ${`nested ${c}`} tail`; tag`x${y}z`;",
    "var r = /ab+c/gi.test(s); var big = 10n ** 3n;",
    "x = -(-a); y = +(+b); z = - --c; w = !(!d); v = typeof void 0;",
    "x = (-2) ** 2; y = 2 ** -2; z = (a ** b) ** c;",
    "a = b = c; a += 1; a **= 2; a ??= b; a ||= c; a &&= d;",
    "x = a && b || c; y = a && (b || c); z = (a || b) ?? c;",
    "(function () { return this; })(); (function named() {}).call(o);",
    "(class {}); var C = class Named extends Base {};",
    "class Point extends Base { constructor(x, y) { super(x); this.y = y; } static origin() { return new Point(0, 0); } get length() { return 0; } *[Symbol.iterator]() {} async save() {} }",
    "function outer() { function inner() { return new.target; } return arguments.length; }",
    "with (scope) { value = 1; }",
    "if (a) function f() {}",
    "var f = function () {}; var g = function named() {};",
    "x = a in b; y = a instanceof B; z = (a, b) in c;",
    "x = (1).toFixed(2); y = 1.5.toFixed(2); z = a[0].b;",
];

const MODULES: &[&str] = &[
    "import d from \"a\"; import * as ns from \"b\"; import {x, y as z} from \"c\"; import \"d\";",
    "import d, {e} from \"a\"; export {d, e as f};",
    "export var a = 1; export let b = 2; export const c = 3;",
    "export function f() {} export class C {} export async function g() {}",
    "export default function () {}",
    "export default class {}",
    "export default (a, b);",
    "export * from \"m\"; export * as ns from \"n\"; export {x as y} from \"o\";",
    "export {\"string name\" as local} from \"p\"; import {\"other\" as other} from \"q\";",
];

#[test]
fn test_script_corpus_reaches_fixpoint() {
    for source in SCRIPTS {
        assert_fixpoint(source, false);
    }
}

#[test]
fn test_module_corpus_reaches_fixpoint() {
    for source in MODULES {
        assert_fixpoint(source, true);
    }
}

#[test]
fn test_printed_module_keeps_its_record() {
    let source = "import {a as b} from \"m\"; export {b as c}; export * from \"n\"; export default 1;";
    let printed = print_source(source, true);

    let arena = Bump::new();
    let original = parse_module(&arena, "input.js", source, ParserOptions::default()).expect("parse aborted");
    let reparsed = parse_module(&arena, "printed.js", &printed, ParserOptions::default()).expect("parse aborted");
    let (original, reparsed) = (
        original.program.module.expect("module record"),
        reparsed.program.module.expect("module record"),
    );
    assert_eq!(original.requested_modules, reparsed.requested_modules);
    assert_eq!(original.import_entries, reparsed.import_entries);
    assert_eq!(original.local_export_entries, reparsed.local_export_entries);
    assert_eq!(original.indirect_export_entries, reparsed.indirect_export_entries);
    assert_eq!(original.star_export_entries, reparsed.star_export_entries);
}

#[test]
fn test_printing_preserves_function_flags() {
    let source = "function f(a = 1) { eval(a); return () => this; }";
    let printed = print_source(source, false);

    let arena = Bump::new();
    let original = parse_script(&arena, "input.js", source, ParserOptions::default()).expect("parse aborted");
    let reparsed = parse_script(&arena, "printed.js", &printed, ParserOptions::default()).expect("parse aborted");
    assert_eq!(original.program.flags, reparsed.program.flags);
    let flags = |program: &esparse_ast::node::FunctionNode<'_>| {
        program
            .source_statements()
            .filter_map(|statement| match statement {
                esparse_ast::node::Statement::FunctionDeclaration(function) => Some(function.flags),
                _ => None,
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(flags(original.program), flags(reparsed.program));
}
