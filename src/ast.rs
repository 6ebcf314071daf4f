//! Syntax tree for the analyzed Java subset.
//!
//! The node set is closed: everything the analysis understands has its own
//! variant, and everything else is collapsed into an `Other` node so the
//! walker can treat it as an inert no-op instead of failing.

/// Byte range in the source plus the 1-based line its first byte sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) line: u32,
}

impl Span {
    pub(crate) fn new(start: usize, end: usize, line: u32) -> Span {
        Span { start, end, line }
    }

    /// Span from the start of `self` to the end of `other`.
    pub(crate) fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CompilationUnit {
    pub(crate) types: Vec<ClassDecl>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassDecl {
    pub(crate) name: String,
    pub(crate) methods: Vec<MethodDecl>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MethodDecl {
    pub(crate) name: String,
    pub(crate) params: Vec<ParamDecl>,
    pub(crate) body: Option<Block>,
    pub(crate) span: Span,
}

/// Parameter with its annotation names as written, e.g. `Nullable` or a
/// fully qualified `org.example.Nullable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParamDecl {
    pub(crate) annotations: Vec<String>,
    pub(crate) name: String,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub(crate) statements: Vec<Stmt>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Stmt {
    Block(Block),
    Expr(ExprStmt),
    If(IfStmt),
    Switch(SwitchStmt),
    /// Statement kind without analysis semantics (loops, returns, throws, ...).
    Other(Span),
}

impl Stmt {
    pub(crate) fn span(&self) -> Span {
        match self {
            Stmt::Block(block) => block.span,
            Stmt::Expr(stmt) => stmt.span,
            Stmt::If(stmt) => stmt.span,
            Stmt::Switch(stmt) => stmt.span,
            Stmt::Other(span) => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExprStmt {
    pub(crate) expr: Expr,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IfStmt {
    pub(crate) condition: Expr,
    pub(crate) then_branch: Box<Stmt>,
    pub(crate) else_branch: Option<Box<Stmt>>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SwitchStmt {
    pub(crate) selector: Expr,
    pub(crate) entries: Vec<SwitchEntry>,
    pub(crate) span: Span,
}

/// One `case`/`default` arm. Labels carry no nullability information and are
/// dropped at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SwitchEntry {
    pub(crate) statements: Vec<Stmt>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Expr {
    Literal(LiteralExpr),
    Name(NameExpr),
    FieldAccess(FieldAccessExpr),
    Call(CallExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Assign(AssignExpr),
    VarDecl(VarDeclExpr),
    Paren(ParenExpr),
    /// Expression kind without analysis semantics (`new`, casts, ternaries, ...).
    Other(Span),
}

impl Expr {
    pub(crate) fn span(&self) -> Span {
        match self {
            Expr::Literal(expr) => expr.span,
            Expr::Name(expr) => expr.span,
            Expr::FieldAccess(expr) => expr.span,
            Expr::Call(expr) => expr.span,
            Expr::Unary(expr) => expr.span,
            Expr::Binary(expr) => expr.span,
            Expr::Assign(expr) => expr.span,
            Expr::VarDecl(expr) => expr.span,
            Expr::Paren(expr) => expr.span,
            Expr::Other(span) => *span,
        }
    }

    /// Strips any number of enclosing parentheses.
    pub(crate) fn unwrap_parens(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.inner;
        }
        expr
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiteralKind {
    Null,
    Bool,
    Int,
    Float,
    Char,
    Str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LiteralExpr {
    pub(crate) kind: LiteralKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameExpr {
    pub(crate) name: String,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldAccessExpr {
    pub(crate) scope: Box<Expr>,
    pub(crate) field: String,
    pub(crate) span: Span,
}

/// Method call; `receiver` is `None` for a bare `name(args)` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallExpr {
    pub(crate) receiver: Option<Box<Expr>>,
    pub(crate) name: String,
    pub(crate) args: Vec<Expr>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Not,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnaryExpr {
    pub(crate) op: UnaryOp,
    pub(crate) operand: Box<Expr>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    And,
    Or,
    Equals,
    NotEquals,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BinaryExpr {
    pub(crate) op: BinaryOp,
    pub(crate) lhs: Box<Expr>,
    pub(crate) rhs: Box<Expr>,
    pub(crate) span: Span,
}

/// `target = value`. Compound operators (`+=`, `-=`, ...) are flagged and
/// left unanalyzed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AssignExpr {
    pub(crate) target: Box<Expr>,
    pub(crate) value: Box<Expr>,
    pub(crate) compound: bool,
    pub(crate) span: Span,
}

/// Local variable declaration, possibly with several declarators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VarDeclExpr {
    pub(crate) declarators: Vec<Declarator>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Declarator {
    pub(crate) name: String,
    pub(crate) init: Option<Expr>,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParenExpr {
    pub(crate) inner: Box<Expr>,
    pub(crate) span: Span,
}
