//! The Module Record built while a module is parsed.
//!
//! Entries follow the ECMAScript ImportEntry/ExportEntry records. All text
//! is arena-borrowed so the record can hang off the module's root function.

/// The synthetic local name bound by `export default <expression>`.
pub const DEFAULT_EXPORT_BINDING_NAME: &str = "*default*";

/// The name `default` as used by default imports and exports.
pub const DEFAULT_NAME: &str = "default";

/// What an import or indirect export takes from the requested module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportName<'a> {
    /// A single exported binding (possibly `default`).
    Name(&'a str),
    /// The module namespace object (`* as ns`).
    Namespace,
    /// Every export except `default` (`export * from`).
    AllButDefault,
}

impl<'a> ImportName<'a> {
    pub fn as_name(&self) -> Option<&'a str> {
        match self {
            ImportName::Name(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImportEntry<'a> {
    pub module_request: &'a str,
    pub import_name: ImportName<'a>,
    pub local_name: &'a str,
}

impl<'a> ImportEntry<'a> {
    /// `import d from "m"`.
    pub fn import_default(module_request: &'a str, local_name: &'a str) -> Self {
        Self {
            module_request,
            import_name: ImportName::Name(DEFAULT_NAME),
            local_name,
        }
    }

    /// `import * as ns from "m"`.
    pub fn import_namespace(module_request: &'a str, local_name: &'a str) -> Self {
        Self {
            module_request,
            import_name: ImportName::Namespace,
            local_name,
        }
    }

    /// `import {a as b} from "m"`.
    pub fn import_specifier(module_request: &'a str, import_name: &'a str, local_name: &'a str) -> Self {
        Self {
            module_request,
            import_name: ImportName::Name(import_name),
            local_name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExportEntry<'a> {
    /// `None` only for `export * from "m"`.
    pub export_name: Option<&'a str>,
    pub module_request: Option<&'a str>,
    pub import_name: Option<ImportName<'a>>,
    /// The exported local binding. Kept on an indirect entry that
    /// re-exports an imported binding.
    pub local_name: Option<&'a str>,
}

impl<'a> ExportEntry<'a> {
    /// `export {local as exported}` or a declaration exporting `local`.
    pub fn export_local(export_name: &'a str, local_name: &'a str) -> Self {
        Self {
            export_name: Some(export_name),
            module_request: None,
            import_name: None,
            local_name: Some(local_name),
        }
    }

    /// `export default ...` bound to `local_name`.
    pub fn export_default(local_name: &'a str) -> Self {
        Self::export_local(DEFAULT_NAME, local_name)
    }

    /// Re-export of a binding of another module.
    pub fn export_indirect(export_name: &'a str, module_request: &'a str, import_name: ImportName<'a>) -> Self {
        Self {
            export_name: Some(export_name),
            module_request: Some(module_request),
            import_name: Some(import_name),
            local_name: None,
        }
    }

    /// `export {local as exported}` where `local` is a named or default
    /// import: an indirect export that still records `local`.
    pub fn export_imported(export_name: &'a str, local_name: &'a str, import: &ImportEntry<'a>) -> Self {
        Self {
            local_name: Some(local_name),
            ..Self::export_indirect(export_name, import.module_request, import.import_name)
        }
    }

    /// `export * from "m"`.
    pub fn export_star_from(module_request: &'a str) -> Self {
        Self {
            export_name: None,
            module_request: Some(module_request),
            import_name: Some(ImportName::AllButDefault),
            local_name: None,
        }
    }
}

/// The finalized Module Record of one module.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleRecord<'a> {
    /// Requested module specifiers, de-duplicated, in first-request order.
    pub requested_modules: &'a [&'a str],
    pub import_entries: &'a [ImportEntry<'a>],
    pub local_export_entries: &'a [ExportEntry<'a>],
    pub indirect_export_entries: &'a [ExportEntry<'a>],
    pub star_export_entries: &'a [ExportEntry<'a>],
    pub has_default_export: bool,
}

impl<'a> ModuleRecord<'a> {
    /// The import entry that binds `local_name`, if any.
    pub fn import_for_local(&self, local_name: &str) -> Option<&ImportEntry<'a>> {
        self.import_entries.iter().find(|e| e.local_name == local_name)
    }

    /// Every exported name, in entry order.
    pub fn exported_names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.local_export_entries
            .iter()
            .chain(self.indirect_export_entries.iter())
            .filter_map(|e| e.export_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_constructors() {
        let d = ExportEntry::export_default(DEFAULT_EXPORT_BINDING_NAME);
        assert_eq!(d.export_name, Some("default"));
        assert_eq!(d.local_name, Some("*default*"));

        let star = ExportEntry::export_star_from("m");
        assert_eq!(star.export_name, None);
        assert_eq!(star.import_name, Some(ImportName::AllButDefault));

        let imp = ImportEntry::import_default("m", "d");
        assert_eq!(imp.import_name.as_name(), Some("default"));

        let e = ExportEntry::export_imported("e", "d", &imp);
        assert_eq!(e.export_name, Some("e"));
        assert_eq!(e.local_name, Some("d"));
        assert_eq!(e.module_request, Some("m"));
        assert_eq!(e.import_name, Some(ImportName::Name("default")));
    }

    #[test]
    fn test_record_lookups() {
        let imports = [ImportEntry::import_specifier("m", "a", "b")];
        let locals = [ExportEntry::export_local("x", "x")];
        let indirect = [ExportEntry::export_indirect("c", "m", ImportName::Name("a"))];
        let record = ModuleRecord {
            requested_modules: &["m"],
            import_entries: &imports,
            local_export_entries: &locals,
            indirect_export_entries: &indirect,
            star_export_entries: &[],
            has_default_export: false,
        };
        assert_eq!(record.import_for_local("b").map(|e| e.module_request), Some("m"));
        assert!(record.import_for_local("a").is_none());
        assert_eq!(record.exported_names().collect::<Vec<_>>(), vec!["x", "c"]);
    }
}
