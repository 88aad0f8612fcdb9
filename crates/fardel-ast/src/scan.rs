//! Single-pass module scanning.
//!
//! One parse produces everything the bundler needs from a module: the
//! ordered raw import specifiers (import declarations and re-export sources,
//! duplicates preserved) and the splice plan that rewrites the module into
//! the factory convention.

use oxc_allocator::Allocator;
use oxc_ast::ast::{
    Declaration, ExportAllDeclaration, ExportDefaultDeclaration, ExportDefaultDeclarationKind,
    ExportNamedDeclaration, ImportDeclaration, ImportDeclarationSpecifier, ModuleExportName,
    Statement,
};
use oxc_span::GetSpan;

use crate::error::{AstError, Result};
use crate::parser::{parse, ParseOptions};
use crate::rewrite::{
    apply, destructure_entry, export_target, js_string, member, Splice,
};

/// The import/export structure of one module, plus its rewrite plan.
///
/// Produced by [`scan`]. The original source text is not retained; pass it
/// back to [`ScannedModule::into_factory_body`] to obtain the rewritten body.
#[derive(Debug, Default)]
pub struct ScannedModule {
    specifiers: Vec<String>,
    splices: Vec<Splice>,
    appends: Vec<String>,
}

impl ScannedModule {
    /// Raw import specifiers in source order, duplicates preserved.
    ///
    /// Sources of `import` declarations and of re-export declarations
    /// (`export .. from`, `export * from`) both count: each one becomes a
    /// `require` call in the rewritten body and therefore needs a mapping
    /// entry at run time.
    pub fn specifiers(&self) -> &[String] {
        &self.specifiers
    }

    /// Rewrite the module into the factory convention.
    ///
    /// `source` must be the exact text this module was scanned from; the
    /// splice offsets index into it.
    pub fn into_factory_body(self, source: &str) -> String {
        apply(source, self.splices, &self.appends)
    }
}

/// Parse `source` and collect its module structure.
///
/// # Errors
///
/// [`AstError::Parse`] if the source has syntax errors, and
/// [`AstError::Unsupported`] for module syntax the factory rewrite cannot
/// express (destructuring export declarations, TypeScript export
/// assignments). Both are fatal; there is no partial scan.
pub fn scan(source: &str, options: &ParseOptions) -> Result<ScannedModule> {
    let allocator = Allocator::default();
    let program = parse(&allocator, source, options)?;

    let mut module = ScannedModule::default();
    for statement in program.body.iter() {
        match statement {
            Statement::ImportDeclaration(import) => {
                lower_import(&mut module, import);
            }
            Statement::ExportNamedDeclaration(export) => {
                lower_export_named(&mut module, export)?;
            }
            Statement::ExportDefaultDeclaration(export) => {
                lower_export_default(&mut module, export, source);
            }
            Statement::ExportAllDeclaration(export) => {
                lower_export_all(&mut module, export);
            }
            Statement::TSExportAssignment(_) | Statement::TSNamespaceExportDeclaration(_) => {
                return Err(AstError::Unsupported {
                    construct: "TypeScript export assignment".to_string(),
                });
            }
            _ => {}
        }
    }

    Ok(module)
}

fn lower_import(module: &mut ScannedModule, import: &ImportDeclaration<'_>) {
    let specifier = import.source.value.to_string();
    let require = format!("require({})", js_string(&specifier));
    module.specifiers.push(specifier);

    let mut namespace: Option<String> = None;
    let mut entries: Vec<(String, String)> = Vec::new();
    if let Some(specs) = &import.specifiers {
        for spec in specs {
            match spec {
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default_spec) => {
                    entries.push(("default".to_string(), default_spec.local.name.to_string()));
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(ns_spec) => {
                    namespace = Some(ns_spec.local.name.to_string());
                }
                ImportDeclarationSpecifier::ImportSpecifier(named_spec) => {
                    entries.push((
                        export_name(&named_spec.imported),
                        named_spec.local.name.to_string(),
                    ));
                }
            }
        }
    }

    let text = if let Some(ns) = namespace {
        // `import d, * as ns from ..` binds the namespace first, then the
        // default off of it.
        let mut text = format!("const {ns} = {require}");
        for (imported, local) in &entries {
            text.push_str(&format!(", {local} = {}", member(&ns, imported)));
        }
        text.push(';');
        text
    } else if entries.is_empty() {
        format!("{require};")
    } else {
        let fields = entries
            .iter()
            .map(|(imported, local)| destructure_entry(imported, local))
            .collect::<Vec<_>>()
            .join(", ");
        format!("const {{ {fields} }} = {require};")
    };

    module.splices.push(Splice {
        start: import.span.start,
        end: import.span.end,
        text,
    });
}

fn lower_export_named(
    module: &mut ScannedModule,
    export: &ExportNamedDeclaration<'_>,
) -> Result<()> {
    if let Some(declaration) = &export.declaration {
        // Keep the declaration in place, drop the `export ` prefix.
        let decl_span = declaration.span();
        module
            .splices
            .push(Splice::cut(export.span.start, decl_span.start));
        for name in declared_names(declaration)? {
            module
                .appends
                .push(format!("{} = {name};", export_target(&name)));
        }
    } else if let Some(source) = &export.source {
        let specifier = source.value.to_string();
        let require = format!("require({})", js_string(&specifier));
        module.specifiers.push(specifier);
        for spec in &export.specifiers {
            let local = export_name(&spec.local);
            let exported = export_name(&spec.exported);
            module.appends.push(format!(
                "{} = {};",
                export_target(&exported),
                member(&require, &local)
            ));
        }
        module
            .splices
            .push(Splice::cut(export.span.start, export.span.end));
    } else {
        for spec in &export.specifiers {
            let local = export_name(&spec.local);
            let exported = export_name(&spec.exported);
            module
                .appends
                .push(format!("{} = {local};", export_target(&exported)));
        }
        module
            .splices
            .push(Splice::cut(export.span.start, export.span.end));
    }
    Ok(())
}

fn lower_export_default(
    module: &mut ScannedModule,
    export: &ExportDefaultDeclaration<'_>,
    source: &str,
) {
    match &export.declaration {
        // Named function/class declarations keep their binding (and, for
        // functions, their hoisting); the default export is assigned by name.
        ExportDefaultDeclarationKind::FunctionDeclaration(function)
            if function.id.is_some() =>
        {
            if let Some(id) = &function.id {
                module
                    .splices
                    .push(Splice::cut(export.span.start, function.span.start));
                module
                    .appends
                    .push(format!("module.exports.default = {};", id.name));
            }
        }
        ExportDefaultDeclarationKind::ClassDeclaration(class) if class.id.is_some() => {
            if let Some(id) = &class.id {
                module
                    .splices
                    .push(Splice::cut(export.span.start, class.span.start));
                module
                    .appends
                    .push(format!("module.exports.default = {};", id.name));
            }
        }
        _ => {
            // Everything else is an expression position: rewrite the
            // `export default` prefix into an assignment.
            let stmt = &source[export.span.start as usize..export.span.end as usize];
            let rest_offset = stmt
                .find("default")
                .map(|at| at + "default".len())
                .unwrap_or(0);
            module.splices.push(Splice {
                start: export.span.start,
                end: export.span.start + rest_offset as u32,
                text: "module.exports.default =".to_string(),
            });
            if !stmt.trim_end().ends_with(';') {
                module.splices.push(Splice {
                    start: export.span.end,
                    end: export.span.end,
                    text: ";".to_string(),
                });
            }
        }
    }
}

fn lower_export_all(module: &mut ScannedModule, export: &ExportAllDeclaration<'_>) {
    let specifier = export.source.value.to_string();
    let require = format!("require({})", js_string(&specifier));
    module.specifiers.push(specifier);
    match &export.exported {
        // `export * as ns from ..` re-exports the whole namespace object
        // under one name.
        Some(name) => {
            module.appends.push(format!(
                "{} = {require};",
                export_target(&export_name(name))
            ));
        }
        None => {
            module
                .appends
                .push(format!("Object.assign(module.exports, {require});"));
        }
    }
    module
        .splices
        .push(Splice::cut(export.span.start, export.span.end));
}

/// The bindings introduced by an exported declaration.
///
/// Destructuring patterns cannot be re-exported by splicing names, so they
/// are rejected rather than silently dropped.
fn declared_names(declaration: &Declaration<'_>) -> Result<Vec<String>> {
    match declaration {
        Declaration::FunctionDeclaration(function) => Ok(function
            .id
            .iter()
            .map(|id| id.name.to_string())
            .collect()),
        Declaration::ClassDeclaration(class) => {
            Ok(class.id.iter().map(|id| id.name.to_string()).collect())
        }
        Declaration::VariableDeclaration(variable) => {
            let mut names = Vec::new();
            for declarator in &variable.declarations {
                match &declarator.id.kind {
                    oxc_ast::ast::BindingPatternKind::BindingIdentifier(ident) => {
                        names.push(ident.name.to_string());
                    }
                    _ => {
                        return Err(AstError::Unsupported {
                            construct: "destructuring pattern in export declaration"
                                .to_string(),
                        });
                    }
                }
            }
            Ok(names)
        }
        _ => Err(AstError::Unsupported {
            construct: "exported declaration kind".to_string(),
        }),
    }
}

fn export_name(name: &ModuleExportName) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_mjs(source: &str) -> ScannedModule {
        scan(source, &ParseOptions::default()).expect("scan should succeed")
    }

    fn rewrite(source: &str) -> String {
        scan_mjs(source).into_factory_body(source)
    }

    #[test]
    fn collects_specifiers_in_source_order() {
        let source = r#"
import { a } from "./a.js";
import "./side.js";
export { b } from "./b.js";
export * from "./c.js";
"#;
        let module = scan_mjs(source);
        assert_eq!(
            module.specifiers(),
            ["./a.js", "./side.js", "./b.js", "./c.js"]
        );
    }

    #[test]
    fn preserves_duplicate_specifiers() {
        let source = r#"
import { a } from "./dup.js";
import { b } from "./dup.js";
"#;
        assert_eq!(scan_mjs(source).specifiers(), ["./dup.js", "./dup.js"]);
    }

    #[test]
    fn rewrites_named_import() {
        let body = rewrite(r#"import { foo, bar as baz } from "./m.js";"#);
        assert!(body.contains(r#"const { foo, bar: baz } = require("./m.js");"#));
        assert!(!body.contains("import"));
    }

    #[test]
    fn rewrites_default_import() {
        let body = rewrite(r#"import widget from "./widget.js";"#);
        assert!(body.contains(r#"const { default: widget } = require("./widget.js");"#));
    }

    #[test]
    fn rewrites_namespace_import() {
        let body = rewrite(r#"import * as util from "./util.js";"#);
        assert!(body.contains(r#"const util = require("./util.js");"#));
    }

    #[test]
    fn rewrites_default_with_namespace() {
        let body = rewrite(r#"import d, * as ns from "./m.js";"#);
        assert!(body.contains(r#"const ns = require("./m.js"), d = ns.default;"#));
    }

    #[test]
    fn rewrites_side_effect_import() {
        let body = rewrite(r#"import "./setup.js";"#);
        assert!(body.contains(r#"require("./setup.js");"#));
    }

    #[test]
    fn rewrites_exported_function() {
        let body = rewrite("export function greet() { return 1; }\n");
        assert!(body.contains("function greet() { return 1; }"));
        assert!(body.contains("module.exports.greet = greet;"));
        assert!(!body.contains("export "));
    }

    #[test]
    fn rewrites_exported_const_list() {
        let body = rewrite("export const x = 1, y = 2;\n");
        assert!(body.contains("const x = 1, y = 2;"));
        assert!(body.contains("module.exports.x = x;"));
        assert!(body.contains("module.exports.y = y;"));
    }

    #[test]
    fn rewrites_export_clause_with_rename() {
        let body = rewrite("const a = 1;\nexport { a as b };\n");
        assert!(body.contains("module.exports.b = a;"));
        assert!(!body.contains("export {"));
    }

    #[test]
    fn rewrites_reexport() {
        let body = rewrite(r#"export { helper } from "./util.js";"#);
        assert!(body.contains(r#"module.exports.helper = require("./util.js").helper;"#));
    }

    #[test]
    fn rewrites_export_star() {
        let body = rewrite(r#"export * from "./util.js";"#);
        assert!(body.contains(r#"Object.assign(module.exports, require("./util.js"));"#));
    }

    #[test]
    fn rewrites_default_export_expression() {
        let body = rewrite("export default 42;\n");
        assert!(body.contains("module.exports.default = 42;"));
    }

    #[test]
    fn rewrites_anonymous_default_function() {
        let body = rewrite("export default function () { return 7; }\n");
        assert!(body.contains("module.exports.default = function () { return 7; };"));
    }

    #[test]
    fn keeps_named_default_function_binding() {
        let body = rewrite("export default function main() {}\nmain();\n");
        assert!(body.contains("function main() {}"));
        assert!(body.contains("module.exports.default = main;"));
    }

    #[test]
    fn syntax_error_is_fatal() {
        let err = scan("import {", &ParseOptions::default()).unwrap_err();
        assert!(matches!(err, AstError::Parse { .. }));
    }

    #[test]
    fn destructuring_export_is_unsupported() {
        let err = scan(
            "export const { a } = obj;",
            &ParseOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AstError::Unsupported { .. }));
    }
}
