//! Artifact rendering.
//!
//! A pure data-to-text step: the module table goes in, the finished
//! JavaScript artifact comes out. All resolution and id assignment happened
//! earlier; the template only interpolates.

use minijinja::{context, Environment};
use serde::Serialize;
use tracing::debug;

use crate::table::ModuleTable;
use crate::Result;

/// The emitted bundle: an IIFE receiving the module registry, with the
/// loader implementing the same protocol as [`crate::ModuleRegistry`].
/// Factories are keyed by numeric id as `[factory, mapping]` pairs;
/// execution starts by loading the entry id.
const BUNDLE_TEMPLATE: &str = r#"(function (modules) {
  function load(id) {
    if (!Object.prototype.hasOwnProperty.call(modules, id)) {
      throw new Error("Module " + id + " is missing from the bundle");
    }
    var factory = modules[id][0];
    var mapping = modules[id][1];
    function localRequire(specifier) {
      if (!Object.prototype.hasOwnProperty.call(mapping, specifier)) {
        throw new Error("Unresolved import '" + specifier + "' in module " + id);
      }
      return load(mapping[specifier]);
    }
    var module = { exports: {} };
    factory(localRequire, module, module.exports);
    return module.exports;
  }
  load({{ entry }});
})({
{%- for module in modules %}
  {{ module.id }}: [function (require, module, exports) {
{{ module.code }}
  }, {{ module.mapping }}],
{%- endfor %}
});
"#;

#[derive(Serialize)]
struct TemplateModule {
    id: u32,
    code: String,
    /// Pre-serialized JSON object literal; inserted verbatim.
    mapping: String,
}

/// Render the self-executing artifact text for a module table.
pub fn render(table: &ModuleTable) -> Result<String> {
    let modules: Vec<TemplateModule> = table
        .modules
        .iter()
        .map(|(id, record)| TemplateModule {
            id: id.get(),
            code: record.code.clone(),
            mapping: serde_json::to_string(&record.mapping)
                .expect("specifier mapping serializes to JSON"),
        })
        .collect();

    let mut env = Environment::new();
    env.add_template("bundle", BUNDLE_TEMPLATE)?;
    let artifact = env
        .get_template("bundle")?
        .render(context! { entry => table.entry.get(), modules => modules })?;

    debug!(modules = table.modules.len(), bytes = artifact.len(), "rendered artifact");
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use fardel_graph::AssetId;

    use super::*;
    use crate::table::ModuleRecord;

    fn sample() -> ModuleTable {
        let mut modules = IndexMap::new();
        let mut mapping = IndexMap::new();
        mapping.insert("./greet.js".to_string(), AssetId::new(2));
        modules.insert(
            AssetId::new(1),
            ModuleRecord {
                code: "const { greet } = require(\"./greet.js\");\ngreet();".to_string(),
                mapping,
            },
        );
        modules.insert(
            AssetId::new(2),
            ModuleRecord {
                code: "module.exports.greet = function () {};".to_string(),
                mapping: IndexMap::new(),
            },
        );
        ModuleTable {
            entry: AssetId::new(1),
            modules,
        }
    }

    #[test]
    fn embeds_loader_and_kickoff() {
        let artifact = render(&sample()).unwrap();
        assert!(artifact.contains("function load(id)"));
        assert!(artifact.contains("load(1);"));
        assert!(artifact.contains("var module = { exports: {} };"));
    }

    #[test]
    fn embeds_every_module_with_id_and_mapping() {
        let artifact = render(&sample()).unwrap();
        assert!(artifact.contains("1: [function (require, module, exports) {"));
        assert!(artifact.contains("2: [function (require, module, exports) {"));
        assert!(artifact.contains(r#"{"./greet.js":2}"#));
        assert!(artifact.contains("module.exports.greet = function () {};"));
    }

    #[test]
    fn renders_module_code_verbatim() {
        let artifact = render(&sample()).unwrap();
        assert!(artifact.contains("const { greet } = require(\"./greet.js\");"));
    }
}
