//! The scope/context stack.
//!
//! Frames are pushed when the parser enters a function, block, loop,
//! labelled statement, switch or module, and popped when it leaves. Label
//! and jump-target lookups stop at the innermost function boundary; usage
//! flags (`this`, `arguments`, eval, super calls) propagate outwards through
//! arrow functions to the function that owns them.

use esparse_ast::module::{ExportEntry, ImportEntry, ImportName, ModuleRecord};
use esparse_ast::types::{BlockFlags, FunctionFlags, FunctionId, FunctionKind};
use esparse_core::collections::{FxHashSet, FxIndexSet};
use esparse_core::{alloc_list, Atom, StringInterner, TextRange};
use bumpalo::Bump;

// ============================================================================
// Frames
// ============================================================================

/// A function under construction.
#[derive(Debug)]
pub struct FunctionFrame<'a> {
    pub id: FunctionId,
    pub kind: FunctionKind,
    pub flags: FunctionFlags,
    /// Name inferred from the enclosing definition, for anonymous functions.
    pub default_name: Option<&'a str>,
    /// Bound parameter names, in declaration order.
    pub parameter_names: Vec<Atom>,
    /// The function's own binding identifier, re-checked if the body turns
    /// out to be strict.
    pub binding_name: Option<(&'a str, TextRange)>,
    /// Parameter identifiers with their ranges, for the same re-check.
    pub parameter_bindings: Vec<(&'a str, TextRange)>,
    /// Set while the parameter list is being parsed.
    pub in_parameters: bool,
    /// Flags of the function body block.
    pub body_flags: BlockFlags,
}

impl<'a> FunctionFrame<'a> {
    pub fn new(id: FunctionId, kind: FunctionKind, flags: FunctionFlags) -> Self {
        Self {
            id,
            kind,
            flags,
            default_name: None,
            parameter_names: Vec::new(),
            binding_name: None,
            parameter_bindings: Vec::new(),
            in_parameters: false,
            body_flags: BlockFlags::IS_BODY,
        }
    }

    #[inline]
    pub fn is_arrow(&self) -> bool {
        self.kind == FunctionKind::Arrow
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.flags.contains(FunctionFlags::STRICT)
    }
}

/// A block scope: declared names for redeclaration checks.
#[derive(Debug, Default)]
pub struct BlockFrame {
    pub flags: BlockFlags,
    pub lexical_names: FxHashSet<Atom>,
    pub var_names: FxHashSet<Atom>,
}

impl BlockFrame {
    pub fn new(flags: BlockFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }
}

/// The Module Record while it is being assembled.
#[derive(Debug, Default)]
pub struct ModuleBuilder<'a> {
    pub requested_modules: FxIndexSet<&'a str>,
    pub import_entries: Vec<ImportEntry<'a>>,
    /// Local exports before imported names are resolved to indirect ones.
    pub export_entries: Vec<ExportEntry<'a>>,
    pub indirect_export_entries: Vec<ExportEntry<'a>>,
    pub star_export_entries: Vec<ExportEntry<'a>>,
    pub exported_names: FxHashSet<&'a str>,
    pub has_default_export: bool,
}

impl<'a> ModuleBuilder<'a> {
    pub fn add_request(&mut self, specifier: &'a str) {
        self.requested_modules.insert(specifier);
    }

    /// Record an exported name. Returns `false` if it was already exported.
    pub fn add_export_name(&mut self, name: &'a str) -> bool {
        self.exported_names.insert(name)
    }

    /// Resolve re-exported imports and move everything into the arena.
    ///
    /// A local export of an imported binding becomes an indirect export of
    /// the imported name, except for namespace imports which stay local.
    pub fn finish(self, arena: &'a Bump) -> ModuleRecord<'a> {
        let mut local = Vec::new();
        let mut indirect = self.indirect_export_entries;
        for entry in self.export_entries {
            let import = entry
                .local_name
                .and_then(|name| self.import_entries.iter().find(|i| i.local_name == name));
            match (import, entry.export_name, entry.local_name) {
                (Some(import), Some(export_name), Some(local_name)) if import.import_name != ImportName::Namespace => {
                    indirect.push(ExportEntry::export_imported(export_name, local_name, import));
                }
                _ => local.push(entry),
            }
        }
        let requested: Vec<&'a str> = self.requested_modules.into_iter().collect();
        ModuleRecord {
            requested_modules: alloc_list(arena, requested),
            import_entries: alloc_list(arena, self.import_entries),
            local_export_entries: alloc_list(arena, local),
            indirect_export_entries: alloc_list(arena, indirect),
            star_export_entries: alloc_list(arena, self.star_export_entries),
            has_default_export: self.has_default_export,
        }
    }
}

#[derive(Debug)]
pub enum Frame<'a> {
    Function(FunctionFrame<'a>),
    Block(BlockFrame),
    Loop,
    Label(Atom),
    Switch,
    Module(ModuleBuilder<'a>),
}

/// Result of resolving the target of a `continue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpTarget {
    Found,
    /// No enclosing loop, or no label with that name.
    Missing,
    /// The label exists but does not label a loop.
    NotIteration,
}

// ============================================================================
// ContextStack
// ============================================================================

pub struct ContextStack<'a> {
    frames: Vec<Frame<'a>>,
    interner: StringInterner,
}

impl<'a> ContextStack<'a> {
    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(16),
            interner: StringInterner::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, frame: Frame<'a>) -> usize {
        self.frames.push(frame);
        self.frames.len()
    }

    /// Pop the frame pushed when the stack reached `depth`. Anything left
    /// above it means a rule forgot to pop and is reported as `None`.
    pub fn pop_to(&mut self, depth: usize) -> Option<Frame<'a>> {
        if self.frames.len() != depth {
            self.frames.truncate(depth);
            self.frames.pop();
            return None;
        }
        self.frames.pop()
    }

    pub fn intern(&mut self, name: &str) -> Atom {
        self.interner.intern(name)
    }

    pub fn resolve(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }

    // ------------------------------------------------------------------------
    // Function lookups
    // ------------------------------------------------------------------------

    /// The innermost function frame.
    pub fn current_function(&self) -> Option<&FunctionFrame<'a>> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Function(func) => Some(func),
            _ => None,
        })
    }

    pub fn current_function_mut(&mut self) -> Option<&mut FunctionFrame<'a>> {
        self.frames.iter_mut().rev().find_map(|f| match f {
            Frame::Function(func) => Some(func),
            _ => None,
        })
    }

    /// The innermost function that is not an arrow function.
    pub fn nearest_non_arrow_function(&self) -> Option<&FunctionFrame<'a>> {
        self.functions().find(|f| !f.is_arrow())
    }

    /// Function frames, innermost first.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionFrame<'a>> {
        self.frames.iter().rev().filter_map(|f| match f {
            Frame::Function(func) => Some(func),
            _ => None,
        })
    }

    fn functions_mut(&mut self) -> impl Iterator<Item = &mut FunctionFrame<'a>> {
        self.frames.iter_mut().rev().filter_map(|f| match f {
            Frame::Function(func) => Some(func),
            _ => None,
        })
    }

    pub fn is_strict(&self) -> bool {
        self.current_function().is_some_and(FunctionFrame::is_strict)
    }

    pub fn set_strict(&mut self) {
        if let Some(func) = self.current_function_mut() {
            func.flags |= FunctionFlags::STRICT;
        }
    }

    pub fn clear_strict(&mut self) {
        if let Some(func) = self.current_function_mut() {
            func.flags.remove(FunctionFlags::STRICT);
        }
    }

    /// Set `flag` on every function from the innermost one out to and
    /// including the nearest non-arrow function.
    fn mark_through_arrows(&mut self, flag: FunctionFlags) {
        for func in self.functions_mut() {
            func.flags |= flag;
            if !func.is_arrow() {
                break;
            }
        }
    }

    pub fn mark_this(&mut self) {
        self.mark_through_arrows(FunctionFlags::USES_THIS);
    }

    pub fn mark_arguments(&mut self) {
        self.mark_through_arrows(FunctionFlags::USES_ARGUMENTS);
    }

    pub fn mark_new_target(&mut self) {
        self.mark_through_arrows(FunctionFlags::USES_NEW_TARGET);
    }

    pub fn mark_super(&mut self) {
        self.mark_through_arrows(FunctionFlags::USES_SUPER);
    }

    pub fn mark_super_call(&mut self) {
        self.mark_through_arrows(FunctionFlags::HAS_DIRECT_SUPER);
    }

    /// A direct `eval` call: the current function has eval, every enclosing
    /// function has nested eval, and every scope on the way needs a scope
    /// object.
    pub fn mark_eval(&mut self) {
        let mut in_current = true;
        let mut in_arrow = false;
        for frame in self.frames.iter_mut().rev() {
            match frame {
                Frame::Function(func) => {
                    if in_current {
                        func.flags |= FunctionFlags::HAS_EVAL;
                        in_arrow = func.is_arrow();
                        in_current = false;
                    } else {
                        func.flags |= FunctionFlags::HAS_NESTED_EVAL;
                    }
                    func.flags |= FunctionFlags::HAS_SCOPE_BLOCK;
                    func.body_flags |= BlockFlags::NEEDS_SCOPE;
                }
                Frame::Block(block) => block.flags |= BlockFlags::NEEDS_SCOPE,
                _ => {}
            }
        }
        if in_arrow {
            self.mark_this();
            self.mark_new_target();
        }
    }

    // ------------------------------------------------------------------------
    // Jump targets
    // ------------------------------------------------------------------------

    /// Frames of the current function, innermost first.
    fn frames_in_function(&self) -> impl Iterator<Item = (usize, &Frame<'a>)> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .take_while(|(_, f)| !matches!(f, Frame::Function(_)))
    }

    /// Index of the active label frame named `name` in the current function.
    pub fn find_label(&self, name: Atom) -> Option<usize> {
        self.frames_in_function().find_map(|(i, f)| match f {
            Frame::Label(label) if *label == name => Some(i),
            _ => None,
        })
    }

    /// Whether `break` (with an optional label) has a target.
    pub fn breakable_for(&self, label: Option<Atom>) -> bool {
        match label {
            Some(name) => self.find_label(name).is_some(),
            None => self
                .frames_in_function()
                .any(|(_, f)| matches!(f, Frame::Loop | Frame::Switch)),
        }
    }

    /// Resolve the target of `continue` (with an optional label).
    pub fn continuable_for(&self, label: Option<Atom>) -> JumpTarget {
        match label {
            None => {
                if self.frames_in_function().any(|(_, f)| matches!(f, Frame::Loop)) {
                    JumpTarget::Found
                } else {
                    JumpTarget::Missing
                }
            }
            Some(name) => {
                let Some(index) = self.find_label(name) else {
                    return JumpTarget::Missing;
                };
                // `a: b: while (x) continue a;` labels the loop through `b`.
                let labelled = self.frames[index + 1..]
                    .iter()
                    .find(|f| !matches!(f, Frame::Label(_)));
                match labelled {
                    Some(Frame::Loop) => JumpTarget::Found,
                    _ => JumpTarget::NotIteration,
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------------

    fn current_block_mut(&mut self) -> Option<&mut BlockFrame> {
        for frame in self.frames.iter_mut().rev() {
            match frame {
                Frame::Block(block) => return Some(block),
                Frame::Function(_) => return None,
                _ => {}
            }
        }
        None
    }

    /// Whether the innermost block is the body of the current function.
    pub fn in_function_body_block(&self) -> bool {
        for frame in self.frames.iter().rev() {
            match frame {
                Frame::Block(block) => return block.flags.contains(BlockFlags::IS_BODY),
                Frame::Function(_) => return false,
                _ => {}
            }
        }
        false
    }

    pub fn mark_block_needs_scope(&mut self) {
        if let Some(block) = self.current_block_mut() {
            block.flags |= BlockFlags::NEEDS_SCOPE;
        }
    }

    /// Declare a `let`, `const` or `class` binding in the innermost block.
    /// Returns `false` on a conflicting declaration.
    pub fn declare_lexical(&mut self, name: &str) -> bool {
        let atom = self.intern(name);
        let at_body = self.in_function_body_block();
        let conflicts_with_parameter = at_body
            && self
                .current_function()
                .is_some_and(|f| f.parameter_names.contains(&atom));
        let Some(block) = self.current_block_mut() else {
            return true;
        };
        block.flags |= BlockFlags::NEEDS_SCOPE;
        if block.var_names.contains(&atom) || conflicts_with_parameter {
            return false;
        }
        block.lexical_names.insert(atom)
    }

    /// Declare a `var` binding: it is visible in every block up to the
    /// function, so it conflicts with a lexical binding in any of them.
    pub fn declare_var(&mut self, name: &str) -> bool {
        let atom = self.intern(name);
        let mut ok = true;
        for frame in self.frames.iter_mut().rev() {
            match frame {
                Frame::Block(block) => {
                    if block.lexical_names.contains(&atom) {
                        ok = false;
                    }
                    block.var_names.insert(atom);
                }
                Frame::Function(_) => break,
                _ => {}
            }
        }
        ok
    }

    /// Record a parameter name on the current function. Returns `false`
    /// if it was already bound by another parameter.
    pub fn declare_parameter(&mut self, name: &str) -> bool {
        let atom = self.intern(name);
        match self.current_function_mut() {
            Some(func) if func.parameter_names.contains(&atom) => false,
            Some(func) => {
                func.parameter_names.push(atom);
                true
            }
            None => true,
        }
    }

    // ------------------------------------------------------------------------
    // Modules
    // ------------------------------------------------------------------------

    pub fn module_mut(&mut self) -> Option<&mut ModuleBuilder<'a>> {
        self.frames.iter_mut().rev().find_map(|f| match f {
            Frame::Module(module) => Some(module),
            _ => None,
        })
    }

    /// Whether the parser is directly in a module body, outside any block.
    pub fn is_module_top_level(&self) -> bool {
        let n = self.frames.len();
        n >= 2
            && matches!(self.frames[n - 1], Frame::Block(ref b) if b.flags.contains(BlockFlags::IS_BODY))
            && matches!(self.frames[n - 2], Frame::Module(_))
    }
}

impl Default for ContextStack<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(kind: FunctionKind, id: u32) -> Frame<'static> {
        Frame::Function(FunctionFrame::new(FunctionId(id), kind, FunctionFlags::NONE))
    }

    fn flags_of(stack: &ContextStack<'_>) -> Vec<FunctionFlags> {
        stack.functions().map(|f| f.flags).collect()
    }

    #[test]
    fn test_this_propagates_through_arrows() {
        let mut stack = ContextStack::new();
        stack.push(function(FunctionKind::Script, 0));
        stack.push(function(FunctionKind::Normal, 1));
        stack.push(function(FunctionKind::Arrow, 2));
        stack.push(function(FunctionKind::Arrow, 3));
        stack.mark_this();

        let flags = flags_of(&stack);
        assert!(flags[0].contains(FunctionFlags::USES_THIS));
        assert!(flags[1].contains(FunctionFlags::USES_THIS));
        assert!(flags[2].contains(FunctionFlags::USES_THIS));
        assert!(!flags[3].contains(FunctionFlags::USES_THIS));
    }

    #[test]
    fn test_eval_marks_nested_eval_outwards() {
        let mut stack = ContextStack::new();
        stack.push(function(FunctionKind::Script, 0));
        stack.push(function(FunctionKind::Normal, 1));
        stack.push(Frame::Block(BlockFrame::new(BlockFlags::NONE)));
        stack.push(function(FunctionKind::Arrow, 2));
        stack.mark_eval();

        let flags = flags_of(&stack);
        assert!(flags[0].contains(FunctionFlags::HAS_EVAL));
        assert!(flags[0].contains(FunctionFlags::USES_THIS | FunctionFlags::USES_NEW_TARGET));
        assert!(flags[1].contains(FunctionFlags::HAS_NESTED_EVAL));
        assert!(flags[1].contains(FunctionFlags::HAS_SCOPE_BLOCK));
        assert!(flags[2].contains(FunctionFlags::HAS_NESTED_EVAL));
        assert!(!flags[1].contains(FunctionFlags::HAS_EVAL));
    }

    #[test]
    fn test_labels_stop_at_function_boundary() {
        let mut stack = ContextStack::new();
        let outer = stack.intern("outer");
        stack.push(function(FunctionKind::Script, 0));
        stack.push(Frame::Label(outer));
        stack.push(Frame::Loop);
        assert!(stack.find_label(outer).is_some());
        assert_eq!(stack.continuable_for(Some(outer)), JumpTarget::Found);

        stack.push(function(FunctionKind::Normal, 1));
        assert!(stack.find_label(outer).is_none());
        assert!(!stack.breakable_for(None));
        assert_eq!(stack.continuable_for(None), JumpTarget::Missing);
    }

    #[test]
    fn test_continue_needs_a_loop_label() {
        let mut stack = ContextStack::new();
        let block = stack.intern("block");
        stack.push(function(FunctionKind::Script, 0));
        stack.push(Frame::Label(block));
        stack.push(Frame::Block(BlockFrame::new(BlockFlags::NONE)));
        stack.push(Frame::Loop);
        assert!(stack.breakable_for(Some(block)));
        assert_eq!(stack.continuable_for(Some(block)), JumpTarget::NotIteration);
        assert_eq!(stack.continuable_for(None), JumpTarget::Found);
    }

    #[test]
    fn test_lexical_redeclaration() {
        let mut stack = ContextStack::new();
        stack.push(function(FunctionKind::Script, 0));
        stack.push(Frame::Block(BlockFrame::new(BlockFlags::IS_BODY)));
        assert!(stack.declare_lexical("x"));
        assert!(!stack.declare_lexical("x"));
        assert!(stack.declare_var("y"));
        stack.push(Frame::Block(BlockFrame::new(BlockFlags::NONE)));
        assert!(!stack.declare_var("x"));
        assert!(!stack.declare_lexical("x"));
    }

    #[test]
    fn test_pop_to_detects_imbalance() {
        let mut stack = ContextStack::new();
        let depth = stack.push(function(FunctionKind::Script, 0));
        stack.push(Frame::Loop);
        assert!(stack.pop_to(depth).is_none());
        assert_eq!(stack.depth(), 0);

        let depth = stack.push(Frame::Switch);
        assert!(matches!(stack.pop_to(depth), Some(Frame::Switch)));
    }

    #[test]
    fn test_module_finish_resolves_reexported_imports() {
        let arena = Bump::new();
        let mut module = ModuleBuilder::default();
        module.add_request("m");
        module.import_entries.push(ImportEntry::import_specifier("m", "a", "b"));
        module.import_entries.push(ImportEntry::import_namespace("m", "ns"));
        module.export_entries.push(ExportEntry::export_local("c", "b"));
        module.export_entries.push(ExportEntry::export_local("n", "ns"));
        module.export_entries.push(ExportEntry::export_local("x", "x"));

        let record = module.finish(&arena);
        assert_eq!(record.requested_modules, &["m"]);
        let [export] = record.indirect_export_entries else {
            panic!("expected one indirect export, got {:?}", record.indirect_export_entries);
        };
        assert_eq!(export.export_name, Some("c"));
        assert_eq!(export.local_name, Some("b"));
        assert_eq!(export.module_request, Some("m"));
        assert_eq!(export.import_name, Some(ImportName::Name("a")));
        let locals: Vec<_> = record.local_export_entries.iter().filter_map(|e| e.export_name).collect();
        assert_eq!(locals, vec!["n", "x"]);
    }
}
