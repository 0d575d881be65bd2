use std::fmt;

use tamarin_lexer::Token;

// ---
// Program
// ---

/// The root of every parsed Tamarin program: an ordered sequence of
/// top-level statements owning the entire tree below it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    /// The literal of the first statement's defining token, or the empty
    /// string for an empty program.
    pub fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or("")
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

// ---
// Statements
// ---

/// A statement: anything that can appear at program or block level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let(LetStatement),
    Return(ReturnStatement),
    Expression(ExpressionStatement),
    Block(BlockStatement),
}

impl Statement {
    /// The literal text of this statement's defining token.
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let(s) => &s.token.literal,
            Statement::Return(s) => &s.token.literal,
            Statement::Expression(s) => &s.token.literal,
            Statement::Block(s) => &s.token.literal,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "{s}"),
            Statement::Return(s) => write!(f, "{s}"),
            Statement::Expression(s) => write!(f, "{s}"),
            Statement::Block(s) => write!(f, "{s}"),
        }
    }
}

/// `let <name> = <value>;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStatement {
    /// The `let` token.
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

impl fmt::Display for LetStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} = {};", self.token.literal, self.name, self.value)
    }
}

/// `return <value>;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnStatement {
    /// The `return` token.
    pub token: Token,
    pub value: Expression,
}

impl fmt::Display for ReturnStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.token.literal, self.value)
    }
}

/// A bare expression used in statement position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    /// The first token of the expression.
    pub token: Token,
    pub expression: Expression,
}

impl fmt::Display for ExpressionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// A braced, ordered sequence of statements, used as if/function bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockStatement {
    /// The `{` token.
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for statement in &self.statements {
            write!(f, " {statement}")?;
        }
        write!(f, " }}")
    }
}

// ---
// Expressions
// ---

/// An expression: anything that produces a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    Boolean(BooleanLiteral),
    Integer(IntegerLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    Function(FunctionLiteral),
    Call(CallExpression),
}

impl Expression {
    /// The literal text of this expression's defining token.
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(e) => &e.token.literal,
            Expression::Boolean(e) => &e.token.literal,
            Expression::Integer(e) => &e.token.literal,
            Expression::Prefix(e) => &e.token.literal,
            Expression::Infix(e) => &e.token.literal,
            Expression::If(e) => &e.token.literal,
            Expression::Function(e) => &e.token.literal,
            Expression::Call(e) => &e.token.literal,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(e) => write!(f, "{e}"),
            Expression::Boolean(e) => write!(f, "{e}"),
            Expression::Integer(e) => write!(f, "{e}"),
            Expression::Prefix(e) => write!(f, "{e}"),
            Expression::Infix(e) => write!(f, "{e}"),
            Expression::If(e) => write!(f, "{e}"),
            Expression::Function(e) => write!(f, "{e}"),
            Expression::Call(e) => write!(f, "{e}"),
        }
    }
}

/// A name reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    /// Build an identifier node from an identifier token.
    pub fn from_token(token: &Token) -> Self {
        Self {
            token: token.clone(),
            name: token.literal.clone(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A literal `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

/// A 64-bit signed integer literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token.literal)
    }
}

/// A prefix operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// Logical not: `!`
    Not,
    /// Arithmetic negation: `-`
    Neg,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Neg => write!(f, "-"),
        }
    }
}

/// A binary (infix) operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
        };
        write!(f, "{symbol}")
    }
}

/// `<op><operand>` where op is `!` or `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpression {
    /// The operator token.
    pub token: Token,
    pub operator: PrefixOp,
    pub operand: Box<Expression>,
}

impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.operator, self.operand)
    }
}

/// `<left> <op> <right>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfixExpression {
    /// The operator token.
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: BinaryOp,
    pub right: Box<Expression>,
}

impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

/// `if (<condition>) <consequence> [else <alternative>]`.
///
/// The alternative is present only if an `else` was textually seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IfExpression {
    /// The `if` token.
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if ({}) {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {alternative}")?;
        }
        Ok(())
    }
}

/// `fn(<parameters>) <body>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLiteral {
    /// The `fn` token.
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.token.literal)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{parameter}")?;
        }
        write!(f, ") {}", self.body)
    }
}

/// `<function>(<arguments>)` — the callee is an identifier or a function
/// literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpression {
    /// The `(` token.
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{argument}")?;
        }
        write!(f, ")")
    }
}
