//! Reserved words
//!
//! The keyword table is a logos lexer run over a single, already-scanned word: a word is a
//! keyword when the lexer matches one keyword spanning the whole word.

use logos::Logos;
use std::fmt;

macro_rules! keywords {
    ($($variant:ident => $text:literal,)*) => {
        #[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[token($text)]
                $variant,
            )*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant,)*];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)*
                }
            }
        }
    };
}

keywords! {
    Abstract => "abstract",
    As => "as",
    Async => "async",
    Await => "await",
    Base => "base",
    Break => "break",
    Case => "case",
    Catch => "catch",
    Class => "class",
    Const => "const",
    Continue => "continue",
    Default => "default",
    Delegate => "delegate",
    Do => "do",
    Else => "else",
    Enum => "enum",
    Explicit => "explicit",
    Extern => "extern",
    False => "false",
    Finally => "finally",
    For => "for",
    Foreach => "foreach",
    If => "if",
    Implicit => "implicit",
    In => "in",
    Interface => "interface",
    Internal => "internal",
    Is => "is",
    Namespace => "namespace",
    New => "new",
    Null => "null",
    Operator => "operator",
    Out => "out",
    Override => "override",
    Params => "params",
    Partial => "partial",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Readonly => "readonly",
    Ref => "ref",
    Return => "return",
    Sealed => "sealed",
    Static => "static",
    Struct => "struct",
    Switch => "switch",
    This => "this",
    Throw => "throw",
    True => "true",
    Try => "try",
    Typeof => "typeof",
    Using => "using",
    Var => "var",
    Virtual => "virtual",
    Void => "void",
    Where => "where",
    While => "while",
    Yield => "yield",
}

impl Keyword {
    /// Classifies a complete word
    pub fn classify(word: &str) -> Option<Keyword> {
        let mut lexer = Keyword::lexer(word);
        match lexer.next() {
            Some(Ok(keyword)) if lexer.span() == (0..word.len()) => Some(keyword),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
