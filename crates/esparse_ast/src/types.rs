//! Flag types and small handle types shared by the scanner, parser and IR.

use std::fmt;

bitflags::bitflags! {
    /// Flags for IR nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u32 {
        const NONE                          = 0;
        /// Generated by the parser (parameter prologue, concise body return).
        const SYNTHESIZED                   = 1 << 0;
        /// Written inside parentheses in the source.
        const PARENTHESIZED                 = 1 << 1;
        /// Part of an optional chain (`a?.b.c`: both accesses).
        const OPTIONAL_CHAIN                = 1 << 2;
        /// This link itself is written with `?.`.
        const OPTIONAL                      = 1 << 3;
        /// An object/array literal containing `{a = 1}` shorthand initializers.
        const COVER_INITIALIZED_NAME        = 1 << 4;
        /// Call to the plain identifier `eval`.
        const DIRECT_EVAL                   = 1 << 5;
        /// A directive prologue entry.
        const DIRECTIVE                     = 1 << 6;
        /// Array/object literal converted to an assignment pattern.
        const DESTRUCTURING                 = 1 << 7;
        /// `for each (x in o)`.
        const FOR_EACH                      = 1 << 8;
        /// `for await (x of o)`.
        const FOR_AWAIT                     = 1 << 9;
        /// A `yield*` delegation.
        const DELEGATE                      = 1 << 10;
        /// Identifier written with unicode escapes.
        const ESCAPED                       = 1 << 11;
        /// The node or one of its children failed to parse.
        const THIS_NODE_HAS_ERROR           = 1 << 12;
        /// Trailing comma after the last element or argument.
        const TRAILING_COMMA                = 1 << 13;
        /// The declaration is part of an `export` statement.
        const EXPORT_CONTEXT                = 1 << 14;
    }
}

bitflags::bitflags! {
    /// Token flags set by the scanner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                              = 0;
        const PRECEDING_LINE_BREAK              = 1 << 0;
        const UNTERMINATED                      = 1 << 1;
        /// Identifier or keyword written with `\u` escapes.
        const UNICODE_ESCAPE                    = 1 << 2;
        const SCIENTIFIC                        = 1 << 3;
        /// Legacy octal number (`017`) or decimal with leading zero (`089`).
        const OCTAL                             = 1 << 4;
        const HEX_SPECIFIER                     = 1 << 5;
        const BINARY_SPECIFIER                  = 1 << 6;
        const OCTAL_SPECIFIER                   = 1 << 7;
        const CONTAINS_SEPARATOR                = 1 << 8;
        /// String containing a legacy octal escape (`"\07"`) or `\8`/`\9`.
        const OCTAL_ESCAPE                      = 1 << 9;
        /// Template part whose cooked value is undefined.
        const CONTAINS_INVALID_ESCAPE           = 1 << 10;
        /// String literal containing any escape sequence.
        const HAS_ESCAPE                        = 1 << 11;

        const NUMERIC_LITERAL_FLAGS = Self::SCIENTIFIC.bits()
            | Self::OCTAL.bits()
            | Self::HEX_SPECIFIER.bits()
            | Self::BINARY_SPECIFIER.bits()
            | Self::OCTAL_SPECIFIER.bits()
            | Self::CONTAINS_SEPARATOR.bits();
    }
}

bitflags::bitflags! {
    /// Properties of a function accumulated while its body is parsed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FunctionFlags: u32 {
        const NONE                      = 0;
        const STRICT                    = 1 << 0;
        /// The script or module root.
        const PROGRAM                   = 1 << 1;
        const IS_STATEMENT              = 1 << 2;
        const IS_DECLARED               = 1 << 3;
        const ANONYMOUS                 = 1 << 4;
        const IS_ASYNC                  = 1 << 5;
        const IS_METHOD                 = 1 << 6;
        const IS_CLASS_CONSTRUCTOR      = 1 << 7;
        const IS_SUBCLASS_CONSTRUCTOR   = 1 << 8;
        const IS_DEFAULT_CONSTRUCTOR    = 1 << 9;
        const USES_THIS                 = 1 << 10;
        const USES_ARGUMENTS            = 1 << 11;
        const USES_NEW_TARGET           = 1 << 12;
        const USES_SUPER                = 1 << 13;
        const HAS_DIRECT_SUPER          = 1 << 14;
        const HAS_EVAL                  = 1 << 15;
        const HAS_NESTED_EVAL           = 1 << 16;
        const HAS_SCOPE_BLOCK           = 1 << 17;
        const HAS_NON_SIMPLE_PARAMETERS = 1 << 18;
        /// A parameter or top-level declaration named `arguments`.
        const DEFINES_ARGUMENTS         = 1 << 19;
        const HAS_EXPRESSION_BODY       = 1 << 20;

        /// Flags that describe how the body behaves, as opposed to how the
        /// function was declared. These are what a lazy reparse restores.
        const BODY_FLAGS = Self::USES_THIS.bits()
            | Self::USES_ARGUMENTS.bits()
            | Self::USES_NEW_TARGET.bits()
            | Self::USES_SUPER.bits()
            | Self::HAS_DIRECT_SUPER.bits()
            | Self::HAS_EVAL.bits()
            | Self::HAS_NESTED_EVAL.bits()
            | Self::HAS_SCOPE_BLOCK.bits()
            | Self::DEFINES_ARGUMENTS.bits()
            | Self::STRICT.bits();
    }
}

bitflags::bitflags! {
    /// Flags for blocks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BlockFlags: u16 {
        const NONE          = 0;
        /// The block declares lexical bindings or is affected by eval.
        const NEEDS_SCOPE   = 1 << 0;
        /// A function or program body.
        const IS_BODY       = 1 << 1;
        /// Generated by the parser rather than written in braces.
        const IS_SYNTHETIC  = 1 << 2;
        const IS_SWITCH     = 1 << 3;
    }
}

/// Pre-order index of a function head within one parse; the program is 0.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct FunctionId(pub u32);

impl FunctionId {
    pub const PROGRAM: FunctionId = FunctionId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn next(self) -> FunctionId {
        FunctionId(self.0 + 1)
    }
}

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a function node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Script,
    Module,
    Normal,
    Arrow,
    Generator,
    Getter,
    Setter,
}

impl FunctionKind {
    pub fn is_program(self) -> bool {
        matches!(self, FunctionKind::Script | FunctionKind::Module)
    }

    pub fn is_accessor(self) -> bool {
        matches!(self, FunctionKind::Getter | FunctionKind::Setter)
    }
}

/// `var`, `let` or `const`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

impl VariableKind {
    pub fn is_lexical(self) -> bool {
        !matches!(self, VariableKind::Var)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// Scanner state at a function's closing `}`: enough to restart lexing
/// right after the function without rescanning its body.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Checkpoint {
    /// Byte offset of the closing `}`.
    pub offset: u32,
    /// 0-based line of the closing `}`.
    pub line: u32,
    /// 0-based byte column of the closing `}`.
    pub column: u32,
}

impl Checkpoint {
    pub fn new(offset: u32, line: u32, column: u32) -> Self {
        Self { offset, line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_flags_exclude_declaration_shape() {
        assert!(FunctionFlags::BODY_FLAGS.contains(FunctionFlags::HAS_EVAL));
        assert!(!FunctionFlags::BODY_FLAGS.contains(FunctionFlags::IS_METHOD));
        assert!(!FunctionFlags::BODY_FLAGS.contains(FunctionFlags::IS_ASYNC));
    }

    #[test]
    fn test_function_id_order() {
        let id = FunctionId::PROGRAM;
        assert_eq!(id.next(), FunctionId(1));
        assert!(id < id.next());
        assert_eq!(id.next().to_string(), "#1");
    }

    #[test]
    fn test_variable_kind() {
        assert!(VariableKind::Let.is_lexical());
        assert!(!VariableKind::Var.is_lexical());
        assert_eq!(VariableKind::Const.as_str(), "const");
    }
}
